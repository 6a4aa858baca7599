//! Storage backends for the rotation schedule list.

pub mod file;
pub mod mock;

pub use file::FileStore;

use eyre::Result;
use rota_core::RotationController;
use std::path::Path;

/// Opens the slot file at `path` and loads a controller over it.
pub fn open_controller(path: impl AsRef<Path>) -> Result<RotationController<FileStore>> {
    let store = FileStore::open(path)?;
    Ok(RotationController::new(store))
}
