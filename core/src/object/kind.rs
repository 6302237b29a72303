use std::fmt::{self, Display, Formatter};

/// Describes the fundamental object type (blob, tree, commit, or tag).
///
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
///
/// `Unknown` stands in for any type name that isn't one of the four literals.
/// It can be recognized but never encoded.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
    Tag,
    Unknown,
}

impl Kind {
    /// Map a type name as it appears in an object header to a `Kind`.
    pub fn from_name(name: &[u8]) -> Kind {
        match name {
            b"blob" => Kind::Blob,
            b"tree" => Kind::Tree,
            b"commit" => Kind::Commit,
            b"tag" => Kind::Tag,
            _ => Kind::Unknown,
        }
    }

    /// Return the literal name used in object headers, if there is one.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Kind::Blob => Some("blob"),
            Kind::Tree => Some("tree"),
            Kind::Commit => Some("commit"),
            Kind::Tag => Some("tag"),
            Kind::Unknown => None,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name().unwrap_or("unknown"))
    }
}
