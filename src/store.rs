//! Persisting device configurations.
//!
//! [`ConfigStore`] is the seam a finished session writes through. [`FileStore`]
//! keeps every configured device in a single file, TOML by default or JSON when
//! the path ends in `.json`.
//!
//! # Example
//! ```no_run
//! use stickbind::{ConfigStore, DeviceConfig, DeviceId, FileStore};
//!
//! let mut store = FileStore::new("input.toml");
//! let cfg = DeviceConfig::new(DeviceId::Keyboard, "Keyboard", "keyboard");
//! store.write_device_config(&cfg).expect("save");
//! ```

use crate::binding::DeviceConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Destination for finished device configurations.
pub trait ConfigStore {
    fn write_device_config(&mut self, config: &DeviceConfig) -> Result<()>;
}

/// On-disk contents: every device configured so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfigFile {
    #[serde(default, rename = "device")]
    pub devices: Vec<DeviceConfig>,
}

impl InputConfigFile {
    /// Replaces the entry for the same device (GUID and name) or appends.
    pub fn upsert(&mut self, config: &DeviceConfig) {
        match self
            .devices
            .iter_mut()
            .find(|d| d.device_guid == config.device_guid && d.device_name == config.device_name)
        {
            Some(existing) => *existing = config.clone(),
            None => self.devices.push(config.clone()),
        }
    }

    pub fn find(&self, guid: &str, name: &str) -> Option<&DeviceConfig> {
        self.devices
            .iter()
            .find(|d| d.device_guid == guid && d.device_name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

/// Stores all device configurations in one file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> Format {
        match self.path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Toml,
        }
    }

    fn io_err(&self, source: std::io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Reads the file; a missing file is an empty set.
    pub fn load(&self) -> Result<InputConfigFile> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(InputConfigFile::default()),
            Err(e) => return Err(self.io_err(e)),
        };
        let file = match self.format() {
            Format::Toml => toml::from_str(&text)?,
            Format::Json => serde_json::from_str(&text)?,
        };
        Ok(file)
    }

    pub fn save(&self, file: &InputConfigFile) -> Result<()> {
        let text = match self.format() {
            Format::Toml => toml::to_string_pretty(file)?,
            Format::Json => serde_json::to_string_pretty(file)?,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        fs::write(&self.path, text).map_err(|e| self.io_err(e))
    }
}

impl ConfigStore for FileStore {
    fn write_device_config(&mut self, config: &DeviceConfig) -> Result<()> {
        let mut file = self.load()?;
        file.upsert(config);
        self.save(&file)?;
        tracing::info!(
            path = %self.path.display(),
            device = %config.device_id,
            bindings = config.len(),
            "saved device configuration"
        );
        Ok(())
    }
}
