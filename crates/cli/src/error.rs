//! Failures of `flow-title` subcommands and the exit code each one maps to.
//!
//! | code | cause |
//! |------|-------|
//! | 2    | argument parsing (reported by clap) |
//! | 10   | the title rejected a config value or surface size |
//! | 11   | writing the page or the PNG failed |
//! | 12   | `--pointer`, `--params` or `--theme-color` could not be parsed |
//! | 13   | the `--json` report could not be serialized |

use flow_title_core::TitleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Config validation or field/raster sizing failed.
    #[error("{0}")]
    Title(TitleError),
    /// Output file could not be written.
    #[error("{0}")]
    Io(String),
    /// A command-line value was malformed.
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Title(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl From<TitleError> for CliError {
    /// PNG write failures surface from the preview crate as
    /// `TitleError::Io`; they exit like any other write failure.
    fn from(e: TitleError) -> Self {
        match e {
            TitleError::Io(msg) => CliError::Io(msg),
            other => CliError::Title(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}
