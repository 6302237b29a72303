//! Finding and bootstrapping a repository's `.gitlet` directory.

use std::fs;
use std::path::{Path, PathBuf};

use gitlet_core::repo::{Error, Result};
use tracing::info;

/// Name of the metadata directory inside the working tree.
pub const GITLET_DIR: &str = ".gitlet";

const HEAD_TXT: &str = "ref: refs/heads/master\n";
const DESCRIPTION_TXT: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

/// Tells whether `Locator::create` made a new repository or found one already there.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InitStatus {
    Created,
    Reinitialized,
}

/// Where a repository lives: its working tree and the `.gitlet` directory inside it.
///
/// A `Locator` is just a pair of paths. It is cheap to build, holds no open
/// files, and is owned by whoever asked for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Locator {
    work_dir: PathBuf,
    gitlet_dir: PathBuf,
}

impl Locator {
    /// Locate the repository whose working tree is `work_dir`.
    ///
    /// If `require_existing` is true, the `.gitlet` directory must already
    /// exist. Pass false only when about to create one.
    pub fn locate<P: AsRef<Path>>(work_dir: P, require_existing: bool) -> Result<Locator> {
        let work_dir = work_dir.as_ref().to_path_buf();
        let gitlet_dir = work_dir.join(GITLET_DIR);

        if require_existing && !gitlet_dir.exists() {
            return Err(Error::NotARepository(gitlet_dir));
        }

        Ok(Locator {
            work_dir,
            gitlet_dir,
        })
    }

    /// Creates a new, empty repository on the local file system.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    ///
    /// If a `.gitlet` directory is already present, nothing in it is touched
    /// and `InitStatus::Reinitialized` is returned. Otherwise the working tree
    /// (if needed) and the full `.gitlet` skeleton are created. A failure
    /// partway through leaves whatever was already created in place.
    pub fn create<P: AsRef<Path>>(work_dir: P) -> Result<(Locator, InitStatus)> {
        let locator = Locator::locate(work_dir, false)?;
        let work_dir = locator.work_dir();
        let gitlet_dir = locator.gitlet_dir();

        if work_dir.exists() && !work_dir.is_dir() {
            return Err(Error::NotADirectory(work_dir.to_path_buf()));
        }

        if gitlet_dir.exists() {
            if !gitlet_dir.is_dir() {
                return Err(Error::NotADirectory(gitlet_dir.to_path_buf()));
            }

            info!(path = %gitlet_dir.display(), "reinitialized existing repository");
            return Ok((locator, InitStatus::Reinitialized));
        }

        if !work_dir.exists() {
            fs::create_dir_all(work_dir).map_err(|source| Error::StorageWriteFailed {
                path: work_dir.to_path_buf(),
                source,
            })?;
        }

        create_dir(gitlet_dir)?;
        create_objects_dir(gitlet_dir)?;
        create_refs_dir(gitlet_dir)?;
        create_head(gitlet_dir)?;
        create_config(gitlet_dir)?;
        create_description(gitlet_dir)?;

        info!(path = %gitlet_dir.display(), "initialized empty repository");
        Ok((locator, InitStatus::Created))
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.gitlet` directory.
    pub fn gitlet_dir(&self) -> &Path {
        self.gitlet_dir.as_path()
    }

    /// Return the root of the loose object store.
    pub fn objects_dir(&self) -> PathBuf {
        self.gitlet_dir.join("objects")
    }
}

fn create_objects_dir(gitlet_dir: &Path) -> Result<()> {
    create_dir(&gitlet_dir.join("objects"))
}

fn create_refs_dir(gitlet_dir: &Path) -> Result<()> {
    let refs_dir = gitlet_dir.join("refs");
    create_dir(&refs_dir)?;
    create_dir(&refs_dir.join("heads"))?;
    create_dir(&refs_dir.join("tags"))
}

fn create_head(gitlet_dir: &Path) -> Result<()> {
    create_file(&gitlet_dir.join("HEAD"), HEAD_TXT)
}

fn create_config(gitlet_dir: &Path) -> Result<()> {
    create_file(&gitlet_dir.join("config"), "")
}

fn create_description(gitlet_dir: &Path) -> Result<()> {
    create_file(&gitlet_dir.join("description"), DESCRIPTION_TXT)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir(path).map_err(|source| Error::StorageWriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn create_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::StorageWriteFailed {
        path: path.to_path_buf(),
        source,
    })
}
