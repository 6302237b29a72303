use std::fmt::{self, Write};
use std::str::FromStr;

use thiserror::Error;

/// Length of an object ID in bytes.
pub const ID_LEN: usize = 20;

/// Length of an object ID rendered as hex digits.
pub const HEX_LEN: usize = ID_LEN * 2;

/// An error which can be returned when parsing an object ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    /// Value being parsed is empty.
    #[error("cannot parse object ID from empty string")]
    Empty,

    /// Contains an invalid digit.
    ///
    /// Uppercase hex digits are rejected too: object IDs are always
    /// rendered in lowercase, so they are always parsed that way.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    /// ID is longer than 40 hex digits (or 20 bytes).
    #[error("value is more than 40 digits long")]
    Overflow,

    /// ID is shorter than 40 hex digits (or 20 bytes).
    #[error("value is less than 40 digits long")]
    Underflow,

    /// Value was zero.
    #[error("ID would be zero")]
    Zero,
}

/// An object ID identifies an object within a repository.
///
/// It is the SHA-1 digest of the object's encoded form (header and payload)
/// and is stored as 20 bytes, but is usually shown as 40 lowercase hex digits.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Id {
    id: [u8; ID_LEN],
}

impl Id {
    /// Create a new ID from a 20-byte digest.
    ///
    /// It is an error if the slice contains anything other than 20 bytes.
    pub fn new(id: &[u8]) -> Result<Id, ParseIdError> {
        match id.len() {
            ID_LEN => {
                let mut bytes = [0; ID_LEN];
                bytes.copy_from_slice(id);
                Ok(Id { id: bytes })
            }
            0 => Err(ParseIdError::Empty),
            n if n < ID_LEN => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Convert a 40-character hex ID to an object ID.
    ///
    /// It is an error if the ID contains anything other than 40 lowercase hex digits.
    pub fn from_hex<T: AsRef<[u8]>>(id: T) -> Result<Id, ParseIdError> {
        let hex = id.as_ref();

        match hex.len() {
            HEX_LEN => {
                let mut bytes = [0; ID_LEN];
                for (byte, pair) in bytes.iter_mut().zip(hex.chunks(2)) {
                    *byte = digit_value(pair[0])? << 4 | digit_value(pair[1])?;
                }

                if bytes.iter().all(|x| *x == 0) {
                    Err(ParseIdError::Zero)
                } else {
                    Ok(Id { id: bytes })
                }
            }
            0 => Err(ParseIdError::Empty),
            n if n < HEX_LEN => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Return the raw 20-byte digest.
    pub fn as_bytes(&self) -> &[u8] {
        &self.id
    }

    /// Return the first two hex digits, which name the fan-out directory
    /// an object is stored in.
    pub fn prefix(&self) -> String {
        let mut s = String::with_capacity(2);
        push_hex(&mut s, self.id[0]);
        s
    }

    /// Return the remaining 38 hex digits, which name the object file
    /// within its fan-out directory.
    pub fn suffix(&self) -> String {
        let mut s = String::with_capacity(HEX_LEN - 2);
        for &byte in self.id[1..].iter() {
            push_hex(&mut s, byte);
        }
        s
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::from_hex(s.as_bytes())
    }
}

static CHARS: &[u8] = b"0123456789abcdef";

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.id.iter() {
            f.write_char(CHARS[(byte >> 4) as usize].into())?;
            f.write_char(CHARS[(byte & 0xf) as usize].into())?;
        }

        Ok(())
    }
}

fn push_hex(s: &mut String, byte: u8) {
    s.push(CHARS[(byte >> 4) as usize].into());
    s.push(CHARS[(byte & 0xf) as usize].into());
}

fn digit_value(c: u8) -> Result<u8, ParseIdError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        _ => Err(ParseIdError::InvalidDigit(c as char)),
    }
}
