//! Error types used by this crate.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::data::AppId;

/// Custom error type returned when something goes wrong between reading the Steam library files
/// and handing a game over to the launcher.
#[derive(Error, Debug)]
pub enum SteamDmenuError {
    /// A path given to us doesn't exist, or isn't the kind of path we need
    #[error("Path does not exist or is not a {expected}: {path:?}")]
    Path {
        path: PathBuf,
        expected: &'static str,
    },

    /// Malformed VDF text, or a value that doesn't have the expected shape
    #[error("Malformed VDF: {0}")]
    Format(String),

    /// No `appmanifest_<id>.acf` for an app listed in `libraryfolders.vdf`
    #[error("No app manifest found for app {app_id} at {path:?}")]
    ManifestNotFound { app_id: AppId, path: PathBuf },

    /// A required key is absent from an otherwise valid document
    #[error("Missing field \"{field}\" in {context}")]
    FieldMissing { field: &'static str, context: String },

    /// The selector command can't be used
    #[error("Invalid selector command: {0}")]
    Selector(String),

    /// Error originating from [`io::Error`]
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, SteamDmenuError>;

impl SteamDmenuError {
    /// Builds a [`SteamDmenuError::Format`] from a `nom` error, pointing at the line of `input`
    /// where parsing stopped.
    pub(crate) fn from_nom(input: &str, err: nom::Err<nom::error::Error<&str>>) -> Self {
        let (remaining, kind) = match &err {
            nom::Err::Error(e) | nom::Err::Failure(e) => (e.input, Some(e.code)),
            nom::Err::Incomplete(_) => ("", None),
        };

        let consumed = input.len().saturating_sub(remaining.len());
        let line = input.get(..consumed).unwrap_or(input).matches('\n').count() + 1;

        match kind {
            Some(kind) => Self::Format(format!("unexpected input at line {line} ({kind:?})")),
            None => Self::Format(format!("unexpected end of input at line {line}")),
        }
    }
}
