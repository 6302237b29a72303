//! Buffer-to-buffer zlib compression with explicit output sizing.
//!
//! Unlike the streaming `flate2::read`/`flate2::write` adapters, these
//! functions inflate or deflate into a buffer of a fixed capacity chosen by
//! the caller and report what happened when that capacity wasn't right.

use flate2::{
    Compress, Compression, Decompress, DecompressError, FlushCompress, FlushDecompress, Status,
};
use thiserror::Error;

/// Smallest output buffer `compress` will start with.
pub const MIN_COMPRESS_CAPACITY: usize = 512;

/// Why a compression or decompression attempt failed.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FlateError {
    /// The output buffer could not be allocated.
    #[error("out of memory")]
    OutOfMemory,

    /// The output didn't fit in the buffer provided.
    #[error("buffer too small")]
    BufferTooSmall,

    /// The input is not a valid (or not a complete) zlib stream.
    #[error("data corrupted")]
    DataCorrupted,

    /// Any other failure reported by zlib.
    #[error("zlib error: {0}")]
    Stream(String),
}

/// A specialized `Result` type for compression operations.
pub type Result<T> = std::result::Result<T, FlateError>;

/// Compress `src` into a buffer sized to the larger of `src.len()` and
/// `MIN_COMPRESS_CAPACITY`.
///
/// Input that doesn't compress well can end up slightly larger than it
/// started. That case fails with `BufferTooSmall`; callers should retry with
/// `compress_into` and a larger capacity.
pub fn compress(src: &[u8]) -> Result<Vec<u8>> {
    compress_into(src, src.len().max(MIN_COMPRESS_CAPACITY))
}

/// Compress `src` into a buffer of exactly `capacity` bytes.
pub fn compress_into(src: &[u8], capacity: usize) -> Result<Vec<u8>> {
    let mut out = allocate(capacity)?;
    let mut deflater = Compress::new(Compression::default(), true);

    match deflater.compress_vec(src, &mut out, FlushCompress::Finish) {
        Ok(Status::StreamEnd) => Ok(out),
        Ok(Status::Ok) | Ok(Status::BufError) => Err(FlateError::BufferTooSmall),
        Err(err) => Err(FlateError::Stream(err.to_string())),
    }
}

/// Inflate `src` into a buffer of at most `expected_max_size` bytes.
///
/// When `tolerate_truncation` is set, running out of output space or input,
/// or hitting corrupt data partway through, is not an error: whatever was
/// inflated up to that point is returned. This is how a reader peeks at the
/// header of an object without inflating all of it.
pub fn decompress(
    src: &[u8],
    expected_max_size: usize,
    tolerate_truncation: bool,
) -> Result<Vec<u8>> {
    let (out, status) = inflate(src, expected_max_size)?;

    match status {
        Ok(Status::StreamEnd) => Ok(out),
        _ if tolerate_truncation => Ok(out),
        Ok(_) if out.len() == out.capacity() => Err(FlateError::BufferTooSmall),
        Ok(_) => Err(FlateError::DataCorrupted),
        Err(_) => Err(FlateError::DataCorrupted),
    }
}

/// Output of `peek`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Inflated {
    /// Everything inflated before stopping.
    pub data: Vec<u8>,

    /// True only if the whole stream, checksum included, was inflated
    /// without error and fit in the buffer.
    pub complete: bool,
}

/// Like `decompress` with `tolerate_truncation` set, but also reports
/// whether the stream ended cleanly.
///
/// A partial result is enough to read a header from. Only a complete one
/// can be trusted as the entire object.
pub fn peek(src: &[u8], expected_max_size: usize) -> Result<Inflated> {
    let (data, status) = inflate(src, expected_max_size)?;

    Ok(Inflated {
        data,
        complete: matches!(status, Ok(Status::StreamEnd)),
    })
}

fn inflate(
    src: &[u8],
    capacity: usize,
) -> Result<(Vec<u8>, std::result::Result<Status, DecompressError>)> {
    let mut out = allocate(capacity)?;
    let mut inflater = Decompress::new(true);

    let status = inflater.decompress_vec(src, &mut out, FlushDecompress::Finish);
    Ok((out, status))
}

fn allocate(capacity: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(capacity)
        .map_err(|_| FlateError::OutOfMemory)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    const TEST_CONTENT: &[u8] = b"blob 13\0test content\n";

    #[test]
    fn round_trip() {
        let compressed = compress(TEST_CONTENT).unwrap();
        assert!(compressed.len() <= MIN_COMPRESS_CAPACITY);

        let inflated = decompress(&compressed, TEST_CONTENT.len(), false).unwrap();
        assert_eq!(inflated, TEST_CONTENT);
    }

    #[test]
    fn empty_input() {
        let compressed = compress(b"").unwrap();
        let inflated = decompress(&compressed, 16, false).unwrap();
        assert!(inflated.is_empty());
    }

    #[test]
    fn incompressible_input_needs_a_bigger_buffer() {
        // A simple xorshift sequence won't compress.
        let mut x: u32 = 0x9e37_79b9;
        let noise: Vec<u8> = (0..4096)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                x as u8
            })
            .collect();

        assert_eq!(compress(&noise).unwrap_err(), FlateError::BufferTooSmall);

        let compressed = compress_into(&noise, noise.len() * 2).unwrap();
        let inflated = decompress(&compressed, noise.len(), false).unwrap();
        assert_eq!(inflated, noise);
    }

    #[test]
    fn output_larger_than_expected() {
        let compressed = compress(TEST_CONTENT).unwrap();
        let err = decompress(&compressed, 4, false).unwrap_err();
        assert_eq!(err, FlateError::BufferTooSmall);
    }

    #[test]
    fn truncated_input() {
        let compressed = compress(TEST_CONTENT).unwrap();
        let err = decompress(&compressed[..6], 64, false).unwrap_err();
        assert_eq!(err, FlateError::DataCorrupted);
    }

    #[test]
    fn garbage_input() {
        let err = decompress(b"sand in the gears", 64, false).unwrap_err();
        assert_eq!(err, FlateError::DataCorrupted);
    }

    #[test]
    fn tolerate_truncation_returns_prefix() {
        let content = "foobar".repeat(1000);
        let compressed = compress(content.as_bytes()).unwrap();

        let peek = decompress(&compressed, 10, true).unwrap();
        assert_eq!(peek, b"foobarfoob");

        let peek = decompress(&compressed[..compressed.len() / 2], 6000, true).unwrap();
        assert!(content.as_bytes().starts_with(&peek));
    }

    #[test]
    fn tolerate_truncation_on_garbage_is_empty() {
        let peek = decompress(b"sand in the gears", 64, true).unwrap();
        assert!(peek.is_empty());
    }

    #[test]
    fn peek_whole_stream() {
        let compressed = compress(TEST_CONTENT).unwrap();

        let peek = peek(&compressed, 128).unwrap();
        assert_eq!(peek.data, TEST_CONTENT);
        assert!(peek.complete);
    }

    #[test]
    fn peek_partial_stream() {
        let content = "foobar".repeat(1000);
        let compressed = compress(content.as_bytes()).unwrap();

        let peek = peek(&compressed, 10).unwrap();
        assert_eq!(peek.data, b"foobarfoob");
        assert!(!peek.complete);
    }

    #[test]
    fn peek_bad_checksum_is_incomplete() {
        let mut compressed = compress(TEST_CONTENT).unwrap();
        let last = compressed.len() - 1;
        compressed[last] ^= 0xff;

        let peek = peek(&compressed, 128).unwrap();
        assert!(!peek.complete);

        let err = decompress(&compressed, 128, false).unwrap_err();
        assert_eq!(err, FlateError::DataCorrupted);
    }

    #[test]
    fn impossible_allocation_is_out_of_memory() {
        let err = decompress(b"", usize::MAX, false).unwrap_err();
        assert_eq!(err, FlateError::OutOfMemory);
    }

    proptest! {
        #[test]
        fn prop_round_trip(data: Vec<u8>) {
            let capacity = data.len() * 2 + MIN_COMPRESS_CAPACITY;
            let compressed = compress_into(&data, capacity).unwrap();
            let inflated = decompress(&compressed, data.len(), false).unwrap();
            prop_assert_eq!(inflated, data);
        }
    }
}
