//! Content hashing for object IDs.

use sha1::{Digest, Sha1};

use crate::object::Id;

/// Compute the object ID of an encoded object (header and payload).
///
/// Pure and infallible: the same bytes always produce the same ID.
pub fn hash(encoded: &[u8]) -> Id {
    let digest = Sha1::digest(encoded);

    // SHA-1 always yields 20 bytes, which is exactly what `Id::new` wants.
    match Id::new(digest.as_slice()) {
        Ok(id) => id,
        Err(err) => unreachable!("SHA-1 digest is not a valid object ID: {}", err),
    }
}
