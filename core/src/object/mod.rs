//! Represents the gitlet concept of an "object" which is a tuple of
//! object type and binary data identified by the hash of its encoded form.

use std::{fs, path::Path, str};

use crate::hasher;
use crate::repo::{Error, Result};

pub mod header;
pub use header::{Header, MAX_HEADER_LEN};

mod id;
pub use id::{Id, ParseIdError, HEX_LEN, ID_LEN};

mod kind;
pub use kind::Kind;

/// Describes a single object read from (or about to be written to) a repository.
///
/// The object owns its payload. Its size is always the length of that
/// payload; the header is not part of it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Object {
    kind: Kind,
    content: Vec<u8>,
}

impl Object {
    /// Create a new Object.
    pub fn new(kind: Kind, content: Vec<u8>) -> Object {
        Object { kind, content }
    }

    /// Create a blob from the contents of a file.
    ///
    /// Files are always stored as blobs. Building trees, commits, or tags
    /// from the file system is not supported.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Object> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|source| Error::SourceFileNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Object::new(Kind::Blob, content))
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the size (in bytes) of the object's payload.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the object is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Return the object's payload.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Consume the object and return its payload.
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// Return the payload as a string slice if it happens to be UTF-8 text.
    pub fn as_text(&self) -> Option<&str> {
        str::from_utf8(&self.content).ok()
    }

    /// Return the encoded form of the object: header followed by payload,
    /// in one contiguous buffer.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut encoded = header::encode(self.kind, self.len())?;
        encoded.reserve_exact(self.len());
        encoded.extend_from_slice(&self.content);
        Ok(encoded)
    }

    /// Computes the object's ID from its type, size, and content.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn id(&self) -> Result<Id> {
        Ok(hasher::hash(&self.encode()?))
    }
}

/// Compute the ID the file at `path` would have if it were stored as a blob.
///
/// Nothing is written, and no repository is needed.
pub fn hash_file<P: AsRef<Path>>(path: P) -> Result<Id> {
    Object::from_file(path)?.id()
}
