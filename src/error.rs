use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListfigError {
    #[error("unable to read {context} as {expected}: {found}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
        found: String,
    },

    #[error("unsupported item in layered list {kind}: {item}")]
    UnsupportedItem { kind: &'static str, item: String },

    #[error("unsupported key \"{key}\" in directive: {directive}")]
    UnsupportedKey { key: String, directive: String },

    #[error("Invalid value for '{key}' in {path}: {source}")]
    Layer {
        key: String,
        path: PathBuf,
        source: Box<ListfigError>,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to edit {path}: {source}")]
    Edit {
        path: PathBuf,
        source: toml_edit::TomlError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write '{key}': '{segment}' is not a table")]
    KeyConflict { key: String, segment: String },

    #[error("Field name is required — call .field() on the builder")]
    FieldRequired,

    #[error("App name is required — call .app_name() on the builder")]
    AppNameRequired,

    #[error("No persist path configured — call .persist_path() on the builder")]
    NoPersistPath,

    #[error("Ancestors is not valid as a persist path (it resolves to multiple directories)")]
    AncestorsNotAllowedAsPersistPath,
}

impl ListfigError {
    /// The decode error underneath any [`Layer`](Self::Layer) wrapping.
    pub fn root(&self) -> &ListfigError {
        match self {
            ListfigError::Layer { source, .. } => source.root(),
            other => other,
        }
    }
}
