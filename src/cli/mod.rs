//! Command-line interface for `odata-explorer`

pub mod commands;
pub mod error;

pub use error::CliError;
