use std::{io, path::PathBuf};

use thiserror::Error;

use crate::object::{Id, ParseIdError};
use crate::zlib::FlateError;

/// Describes the potential error conditions that might arise from gitlet
/// object and repository operations.
///
/// Every operation either produces a complete result or fails with one of
/// these; there is no partial success.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not a gitlet repository (or the .gitlet directory is missing): {0}")]
    NotARepository(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("unable to read source file {path}")]
    SourceFileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("object {0} not found")]
    ObjectNotFound(Id),

    #[error("malformed object header: {0}")]
    MalformedHeader(String),

    #[error("invalid object type `{0}`")]
    InvalidType(String),

    #[error("object {id} is corrupt: {reason}")]
    CorruptObject { id: Id, reason: String },

    #[error("unable to decompress object {id}")]
    DecompressionFailed {
        id: Id,
        #[source]
        cause: FlateError,
    },

    #[error("unable to compress object {id}")]
    CompressionFailed {
        id: Id,
        #[source]
        cause: FlateError,
    },

    #[error("unable to write {path}")]
    StorageWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to read {path}")]
    StorageReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    InvalidId(#[from] ParseIdError),
}

/// A specialized `Result` type for gitlet operations.
pub type Result<T> = std::result::Result<T, Error>;
