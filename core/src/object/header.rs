//! Object header framing.
//!
//! Every stored object starts with `<type-name> <decimal-size>\0` followed by
//! exactly `size` payload bytes. The header is small and bounded, which lets a
//! reader inflate only a short prefix of a large object to learn its type and
//! size before deciding how much memory the payload needs.

use super::Kind;
use crate::repo::{Error, Result};

/// Upper bound on the length of an encoded header, null terminator included.
///
/// The longest possible header (`commit ` followed by the 20 digits of
/// `u64::MAX` and a null) is well under this.
pub const MAX_HEADER_LEN: usize = 128;

/// A decoded object header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    pub kind: Kind,

    /// Length of the payload in bytes, not counting the header.
    pub size: usize,

    /// Offset of the first payload byte, i.e. one past the header's null.
    pub payload_offset: usize,
}

/// Produce the header `<type-name> <size>\0` for an object of the given kind.
///
/// Fails with `InvalidType` for `Kind::Unknown`, which has no name to write.
pub fn encode(kind: Kind, size: usize) -> Result<Vec<u8>> {
    let name = kind
        .name()
        .ok_or_else(|| Error::InvalidType(kind.to_string()))?;

    let header = format!("{} {}\0", name, size).into_bytes();
    assert!(header.len() <= MAX_HEADER_LEN);

    Ok(header)
}

/// Parse an object header from the start of `buf`.
///
/// Only the first `MAX_HEADER_LEN` bytes are examined, so `buf` may be a
/// partial prefix of a much larger object.
pub fn decode(buf: &[u8]) -> Result<Header> {
    let window = &buf[..buf.len().min(MAX_HEADER_LEN)];

    // The payload may contain anything, so only look for the space
    // before the header's null.
    let nul = window.iter().position(|&b| b == 0);
    let space = window[..nul.unwrap_or(window.len())]
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::MalformedHeader("no space after object type".to_string()))?;

    let name = &window[..space];
    let kind = Kind::from_name(name);
    if kind == Kind::Unknown {
        return Err(Error::InvalidType(
            String::from_utf8_lossy(name).into_owned(),
        ));
    }

    let nul = nul
        .ok_or_else(|| Error::MalformedHeader("no null terminator after size".to_string()))?;

    let size = parse_size(&window[space + 1..nul])?;

    Ok(Header {
        kind,
        size,
        payload_offset: nul + 1,
    })
}

fn parse_size(digits: &[u8]) -> Result<usize> {
    if digits.is_empty() {
        return Err(Error::MalformedHeader("missing object size".to_string()));
    }

    digits.iter().try_fold(0usize, |size, &c| {
        if !c.is_ascii_digit() {
            return Err(Error::MalformedHeader(format!(
                "unexpected `{}` in object size",
                c.escape_ascii()
            )));
        }

        size.checked_mul(10)
            .and_then(|s| s.checked_add((c - b'0') as usize))
            .ok_or_else(|| Error::MalformedHeader("object size overflows".to_string()))
    })
}
