use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading options or persisting a device configuration.
///
/// Binding conflicts are not errors: a session reports them on the row and
/// keeps capturing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to write TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown action `{0}`")]
    UnknownAction(String),

    #[error("the Menu button is unbound; resolve the hotkey prompt before finishing")]
    HotkeyUnresolved,
}

pub type Result<T> = std::result::Result<T, Error>;
