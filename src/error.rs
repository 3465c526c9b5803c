//! Errors raised while loading config and map files

use std::fmt;
use std::io;

/// Failure to load a config or map file
#[derive(Debug)]
pub enum LoadError {
    Io { path: String, source: io::Error },
    UnknownOption { option: String },
    MissingValue { option: String },
    InvalidValue { option: String, value: String },
    Json(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "can't open \"{path}\": {source}"),
            Self::UnknownOption { option } => write!(f, "invalid config option \"{option}\""),
            Self::MissingValue { option } => {
                write!(f, "config option \"{option}\" has no value")
            }
            Self::InvalidValue { option, value } => {
                write!(f, "invalid value \"{value}\" for config option \"{option}\"")
            }
            Self::Json(err) => write!(f, "invalid JSON config: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
