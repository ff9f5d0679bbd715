//! Error types for the unpackaging steps.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The documents whose shape is checked before editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    /// The `.csproj` project file.
    Project,
    /// `Properties/launchSettings.json`.
    LaunchSettings,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Project => f.write_str("csproj file"),
            Document::LaunchSettings => f.write_str("launchSettings.json"),
        }
    }
}

/// Errors raised while editing the project files.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file does not exist.
    #[error("The file '{}' does not exist.", .0.display())]
    NotFound(PathBuf),

    /// The document parsed but does not have the expected shape.
    #[error("Invalid {0} format.")]
    Format(Document),

    /// No Windows target framework could be derived from the project.
    #[error("Could not find TargetFramework in csproj file.")]
    MissingTargetFramework,

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The project file is not well-formed XML.
    #[error(transparent)]
    Xml(#[from] xmltree::ParseError),

    /// The project document could not be serialized.
    #[error(transparent)]
    XmlWrite(#[from] xmltree::Error),

    /// The launch settings are not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
