//! Key-value slots kept in a single JSON file.
//!
//! The file holds one JSON object mapping slot keys to string values. Writes
//! go to a sibling temp file which is then renamed over the original, so a
//! crash mid-write never leaves a truncated file behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use rota_core::store::KeyValueStore;

type Slots = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Uses `path` as the slot file, creating its parent directory if needed.
    ///
    /// The file itself is only created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create directory {}", parent.display()))?;
        }

        tracing::debug!("Using slot file {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_slots(&self) -> Result<Slots> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Slots::new()),
            Err(e) => {
                return Err(e)
                    .wrap_err_with(|| format!("Failed to read {}", self.path.display()));
            }
        };

        if raw.trim().is_empty() {
            return Ok(Slots::new());
        }

        serde_json::from_str(&raw)
            .wrap_err_with(|| format!("Slot file {} is not a JSON object of strings", self.path.display()))
    }

    fn write_slots(&self, slots: &Slots) -> Result<()> {
        let raw = serde_json::to_string_pretty(slots).wrap_err("Failed to encode slot file")?;
        let temp_path = self.temp_path();

        fs::write(&temp_path, raw.as_bytes())
            .wrap_err_with(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .wrap_err_with(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut slots = self.read_slots()?;
        Ok(slots.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.read_slots().unwrap_or_else(|e| {
            tracing::warn!("Replacing unreadable slot file: {:#}", e);
            Slots::new()
        });

        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots)
    }
}
