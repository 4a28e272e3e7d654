pub mod batch;
pub mod config;
pub mod report;
pub mod scoring;
