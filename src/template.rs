use crate::config::DEFAULT_CONFIG_FILE;
use crate::error::{Result, ScorecardError};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BATCH_FILE: &str = "batch.toml";

const BATCH_TEMPLATE: &str = include_str!("../templates/batch.toml");
const CONFIG_TEMPLATE: &str = include_str!("../templates/scorecard.toml");

#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    pub dry_run: bool,
    pub no_overwrite: bool,
}

/// Files `init` writes, relative to the target directory.
pub fn planned_files() -> [(&'static str, &'static str); 2] {
    [
        (DEFAULT_BATCH_FILE, BATCH_TEMPLATE),
        (DEFAULT_CONFIG_FILE, CONFIG_TEMPLATE),
    ]
}

pub fn write_templates(dir: &Path, options: InitOptions) -> Result<Vec<PathBuf>> {
    let targets = planned_files()
        .into_iter()
        .map(|(name, content)| (dir.join(name), content))
        .collect::<Vec<_>>();

    if options.no_overwrite {
        if let Some((existing, _)) = targets.iter().find(|(path, _)| path.exists()) {
            return Err(ScorecardError::AlreadyExists(existing.display().to_string()));
        }
    }

    if options.dry_run {
        return Ok(targets.into_iter().map(|(path, _)| path).collect());
    }

    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(targets.len());
    for (path, content) in targets {
        fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "template written");
        written.push(path);
    }
    Ok(written)
}
