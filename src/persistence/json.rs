//! JSON save file
//!
//! The whole document is kept in memory and rewritten on every write
//! (temp file + rename). Keys this crate doesn't know are preserved.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{ProgressKey, ProgressionStore, StoreError};

/// Save document on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    doc: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the save at `path`, creating a zeroed one on first run
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                log::info!("No save at {}, starting fresh", path.display());
                let store = Self {
                    doc: default_document(),
                    path,
                };
                store.flush()?;
                return Ok(store);
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        let doc: Map<String, Value> = serde_json::from_str(&text)
            .map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;
        log::info!("Loaded save from {}", path.display());
        Ok(Self { path, doc })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let text = serde_json::to_string_pretty(&self.doc)
            .map_err(|e| write_err(io::Error::other(e)))?;
        write_atomic(&self.path, &text).map_err(write_err)
    }
}

impl ProgressionStore for JsonFileStore {
    fn read(&self, key: ProgressKey) -> Result<u64, StoreError> {
        match self.doc.get(key.as_str()) {
            None => Ok(0),
            Some(value) => value.as_u64().ok_or_else(|| StoreError::InvalidValue {
                key: key.as_str(),
                value: value.to_string(),
            }),
        }
    }

    fn write(&mut self, key: ProgressKey, value: u64) -> Result<(), StoreError> {
        self.doc.insert(key.as_str().to_string(), Value::from(value));
        self.flush()
    }
}

fn default_document() -> Map<String, Value> {
    ProgressKey::ALL
        .iter()
        .map(|key| (key.as_str().to_string(), Value::from(0u64)))
        .collect()
}

fn write_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("save");
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));
    fs::write(&tmp_path, text)?;
    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}
