//! Represents an abstract gitlet repository.
//!
//! ## Design Goals
//!
//! The object model in this crate doesn't care where objects are kept.
//! `gitlet_on_disk` provides loose objects in a local `.gitlet` directory,
//! but any mechanism that can map an object ID to stored bytes can
//! implement `Repo`.

use std::path::Path;

mod error;
pub use error::{Error, Result};

use crate::object::{self, Id, Object};

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and retrieving objects.
///
/// Implementations must treat stored objects as write-once: the same ID always
/// names the same bytes, so writing an object that already exists may rewrite
/// it but never changes it.
pub trait Repo {
    /// Read the object with the given ID.
    ///
    /// Analogous to [`git cat-file`](https://git-scm.com/docs/git-cat-file).
    fn read_object(&self, id: &Id) -> Result<Object>;

    /// Compute the ID of the file at `source` as a blob and, if `persist` is
    /// true, store it.
    ///
    /// The ID is returned either way. Analogous to
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) with
    /// `persist` standing in for `-w`.
    fn write_object(&self, source: &Path, persist: bool) -> Result<Id>;

    /// Compute the ID the file at `source` would have without storing it.
    fn hash_object(&self, source: &Path) -> Result<Id> {
        object::hash_file(source)
    }
}
