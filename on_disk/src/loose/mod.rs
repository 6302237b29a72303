//! Loose object storage: one zlib-compressed file per object at
//! `.gitlet/objects/<first 2 hex digits>/<remaining 38 hex digits>`.

use std::{
    fs::{self, File},
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use gitlet_core::{
    hasher,
    object::{header, Header, Id, Object, MAX_HEADER_LEN},
    repo::{Error, Repo, Result},
    zlib::{self, FlateError},
};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::Locator;

// How much of the compressed file to read when peeking at the header. A
// dynamic deflate block can spend a few hundred bytes on its code tables
// before the first header byte comes out, so this is larger than the header.
const PEEK_LEN: u64 = 512;

// zlib can't inflate to more than this many times its compressed size.
const MAX_INFLATE_RATIO: u64 = 1032;

impl Locator {
    /// Return the path where the object with the given ID is (or would be) stored.
    ///
    /// Doesn't touch the file system.
    pub fn object_path(&self, id: &Id) -> PathBuf {
        let mut path = self.objects_dir();
        path.push(id.prefix());
        path.push(id.suffix());
        path
    }

    /// Returns true if an object with the given ID is stored in this repo.
    ///
    /// Only checks that the file is there; use `read_object` to check it's intact.
    pub fn has_object(&self, id: &Id) -> bool {
        self.object_path(id).is_file()
    }

    fn put_loose_object(&self, id: &Id, encoded: &[u8]) -> Result<()> {
        let compressed =
            deflate(encoded).map_err(|cause| Error::CompressionFailed { id: *id, cause })?;

        let dir = self.objects_dir().join(id.prefix());
        if let Err(source) = fs::create_dir(&dir) {
            if source.kind() != io::ErrorKind::AlreadyExists || !dir.is_dir() {
                return Err(Error::StorageWriteFailed { path: dir, source });
            }
        }

        // Write to a temporary file next to the final path, then rename it
        // into place so readers never see a partially written object.
        let path = self.object_path(id);
        let write_failed = |source: io::Error| Error::StorageWriteFailed {
            path: path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&dir).map_err(write_failed)?;
        temp.write_all(&compressed).map_err(write_failed)?;
        make_read_only(temp.as_file()).map_err(write_failed)?;
        temp.persist(&path).map_err(|err| write_failed(err.error))?;

        debug!(%id, compressed_len = compressed.len(), "wrote loose object");
        Ok(())
    }
}

impl Repo for Locator {
    fn read_object(&self, id: &Id) -> Result<Object> {
        let path = self.object_path(id);
        if !path.is_file() {
            return Err(Error::ObjectNotFound(*id));
        }

        let read_failed = |source: io::Error| Error::StorageReadFailed {
            path: path.clone(),
            source,
        };

        let mut file = File::open(&path).map_err(read_failed)?;
        let compressed_len = file.metadata().map_err(read_failed)?.len();

        let mut prefix = Vec::new();
        (&mut file)
            .take(PEEK_LEN)
            .read_to_end(&mut prefix)
            .map_err(read_failed)?;

        let peek = zlib::peek(&prefix, MAX_HEADER_LEN)
            .map_err(|cause| Error::DecompressionFailed { id: *id, cause })?;

        let header = header::decode(&peek.data).map_err(|err| corrupt_header(id, err))?;
        let end = header
            .payload_offset
            .checked_add(header.size)
            .ok_or_else(|| corrupt(id, "object size overflows"))?;

        // The peek is the whole object only if the stream ended cleanly and
        // exactly where the header says. Anything else goes through the full
        // read, which reports it.
        if peek.complete && end == peek.data.len() {
            debug!(%id, kind = %header.kind, size = header.size, "read object from header peek");
            let mut content = peek.data;
            content.drain(..header.payload_offset);
            return Ok(Object::new(header.kind, content));
        }

        if end as u64 > compressed_len.saturating_mul(MAX_INFLATE_RATIO) {
            return Err(corrupt(
                id,
                format!(
                    "declared size {} is impossible for {} compressed bytes",
                    header.size, compressed_len
                ),
            ));
        }

        let mut compressed = Vec::new();
        file.seek(SeekFrom::Start(0)).map_err(read_failed)?;
        file.read_to_end(&mut compressed).map_err(read_failed)?;

        let content = inflate_payload(id, &compressed, &header)?;

        debug!(%id, kind = %header.kind, size = header.size, "read object in full");
        Ok(Object::new(header.kind, content))
    }

    fn write_object(&self, source: &Path, persist: bool) -> Result<Id> {
        let object = Object::from_file(source)?;
        let encoded = object.encode()?;
        let id = hasher::hash(&encoded);

        if persist {
            self.put_loose_object(&id, &encoded)?;
        }

        debug!(%id, size = object.len(), persist, "hashed {}", source.display());
        Ok(id)
    }
}

// Inflate the whole object and return just its payload.
fn inflate_payload(id: &Id, compressed: &[u8], header: &Header) -> Result<Vec<u8>> {
    let expected_len = header.payload_offset + header.size;

    let mut inflated = zlib::decompress(compressed, expected_len, false)
        .map_err(|cause| Error::DecompressionFailed { id: *id, cause })?;

    let start = inflated
        .iter()
        .take(MAX_HEADER_LEN)
        .position(|&b| b == 0)
        .map(|nul| nul + 1)
        .ok_or_else(|| corrupt(id, "no null terminator in header"))?;

    if inflated.len() != start + header.size {
        return Err(corrupt(
            id,
            format!(
                "expected {} bytes of content, found {}",
                header.size,
                inflated.len().saturating_sub(start)
            ),
        ));
    }

    inflated.drain(..start);
    Ok(inflated)
}

// Compress, growing the output buffer until the compressed form fits.
fn deflate(encoded: &[u8]) -> zlib::Result<Vec<u8>> {
    let mut capacity = encoded.len().max(zlib::MIN_COMPRESS_CAPACITY);
    let mut attempt = zlib::compress(encoded);

    while let Err(FlateError::BufferTooSmall) = attempt {
        capacity = capacity.checked_mul(2).ok_or(FlateError::OutOfMemory)?;
        attempt = zlib::compress_into(encoded, capacity);
    }

    attempt
}

// Stored objects are never modified in place.
#[cfg(unix)]
fn make_read_only(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(0o444))
}

#[cfg(not(unix))]
fn make_read_only(_file: &File) -> io::Result<()> {
    Ok(())
}

fn corrupt<S: Into<String>>(id: &Id, reason: S) -> Error {
    let reason = reason.into();
    warn!(%id, %reason, "corrupt object");
    Error::CorruptObject { id: *id, reason }
}

fn corrupt_header(id: &Id, err: Error) -> Error {
    match err {
        Error::MalformedHeader(reason) => corrupt(id, reason),
        err @ Error::InvalidType(_) => corrupt(id, err.to_string()),
        err => err,
    }
}

#[cfg(test)]
mod tests;
