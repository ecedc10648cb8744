//! CLI-specific error types

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::import::ImportError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read file {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Failed to write file {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Output file exists: {0}. Use --force to overwrite.")]
    OutputExists(PathBuf),

    #[error("Entity type not found: {0}")]
    EntityTypeNotFound(String),

    #[error("Diagnostics reported {0} problem(s)")]
    DiagnosticsFailed(usize),

    #[error("Import error: {0}")]
    ImportError(#[from] ImportError),

    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),

    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
