use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::Locator;

/// A `TempRepo` creates a temporary, empty repository. This is often
/// used in unit tests that need somewhere to read and write objects.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub struct TempRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    locator: Locator,
}

impl TempRepo {
    // Create a new repo in a temporary directory.
    // This directory will be deleted when the struct is dropped.
    pub fn new() -> TempRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let (locator, _) = Locator::create(tempdir.path()).unwrap();

        TempRepo { tempdir, locator }
    }

    // Return the path for this repo's root (working directory).
    pub fn path(&self) -> &Path {
        self.locator.work_dir()
    }

    // Return the locator for this repo.
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    // Write a file into the working directory and return its path.
    pub fn write_file<C: AsRef<[u8]>>(&self, name: &str, contents: C) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}
