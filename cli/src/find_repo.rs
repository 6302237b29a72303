use std::{env, path::Path};

use gitlet_core::repo::{Error, Result};
use gitlet_on_disk::Locator;

// Find the gitlet repo whose working tree is the given path.
//
// Only the simplest case is handled: a `.gitlet` directory directly
// inside the given path. Parent directories are not searched.
//
// Returns `gitlet_core::repo::Error::NotARepository` if no such
// repo exists.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Locator> {
    Locator::locate(path, true)
}

// Find the gitlet repo for the current working directory.
pub fn from_current_dir() -> Result<Locator> {
    let path = env::current_dir().map_err(|source| Error::StorageReadFailed {
        path: ".".into(),
        source,
    })?;
    from_path(path)
}
