use crate::error::{Result, ScorecardError};
use crate::types::batch::ScoringBatch;
use crate::types::config::ScorecardConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "scorecard.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".scorecard/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/supplier-scorecard/config.toml";

/// Loads config for a batch living in `root`. `explicit` replaces the project file.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ScorecardConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, explicit, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<ScorecardConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ScorecardError::PathNotFound(path.display().to_string()));
        }
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    let project = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(DEFAULT_CONFIG_FILE));
    merge_file_if_exists(&mut merged, &project)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: ScorecardConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ScorecardError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Reads and parses a batch file; schema errors carry the file path.
pub fn load_batch(path: &Path) -> Result<ScoringBatch> {
    if !path.exists() {
        return Err(ScorecardError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    ScoringBatch::parse(&content)
        .map_err(|e| ScorecardError::BatchParse(format!("{}: {}", path.display(), e)))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "merging config layer");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ScorecardError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
