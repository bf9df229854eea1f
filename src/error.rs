//! The error type shared by all fallible operations of this crate.

use std::{fmt, io};

use failure::Fail;

use crate::{
    attr::AttrKind,
    handle::{hsize, Handle, MeshElement, VertexHandle},
};


/// Shorthand for `Result<T, ringmesh::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// A location inside a text mesh file. Lines and fields are 1-based, the
/// record keyword is field 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub field: Option<usize>,
}

impl Span {
    pub fn line(line: usize) -> Self {
        Self { line, field: None }
    }

    pub fn field(line: usize, field: usize) -> Self {
        Self { line, field: Some(field) }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "line {}, field {}", self.line, field),
            None => write!(f, "line {}", self.line),
        }
    }
}

/// Everything that can go wrong when building, querying or (de)serializing a
/// mesh.
///
/// Failed mutating operations never leave the mesh in a partially updated
/// state: either the whole operation succeeds or nothing changes.
#[derive(Debug, Fail)]
pub enum Error {
    /// The handle does not refer to a live element (removed or never
    /// issued).
    #[fail(display = "invalid {} handle {}{}: no such element", element, prefix, idx)]
    InvalidHandle {
        element: MeshElement,
        prefix: &'static str,
        idx: hsize,
    },

    /// The requested mutation would produce an invalid face or mesh.
    #[fail(display = "invalid topology: {}", _0)]
    InvalidTopology(String),

    /// A vertex cannot be removed in strict mode because faces still
    /// reference it.
    #[fail(display = "vertex {:?} is still referenced by {} face(s)", vertex, faces)]
    DanglingReference {
        vertex: VertexHandle,
        faces: usize,
    },

    #[fail(display = "{} attribute '{}' is already attached", element, name)]
    DuplicateAttribute {
        element: MeshElement,
        name: String,
    },

    #[fail(display = "no {} attribute named '{}' is attached", element, name)]
    UnknownAttribute {
        element: MeshElement,
        name: String,
    },

    #[fail(
        display = "attribute '{}' stores values of type {}, but {} was requested",
        name, actual, expected,
    )]
    AttributeTypeMismatch {
        name: String,
        expected: AttrKind,
        actual: AttrKind,
    },

    /// The index lies beyond the element index space (as opposed to
    /// `InvalidHandle` which is about removed slots inside of it).
    #[fail(display = "{} index {} is out of range (index space is {})", element, idx, len)]
    IndexOutOfRange {
        element: MeshElement,
        idx: hsize,
        len: hsize,
    },

    /// A face record references fewer than three distinct vertices.
    #[fail(
        display = "malformed face at {}: references only {} distinct vertices",
        span, distinct,
    )]
    MalformedFace {
        span: Span,
        distinct: usize,
    },

    #[fail(display = "parse error at {}: {}", span, msg)]
    Parse {
        span: Span,
        msg: String,
    },

    #[fail(display = "IO error: {}", _0)]
    Io(#[fail(cause)] io::Error),
}

impl Error {
    pub(crate) fn invalid_handle<H: Handle>(handle: H) -> Self {
        let prefix = match H::ELEMENT {
            MeshElement::Vertex => "V",
            MeshElement::Face => "F",
        };

        Error::InvalidHandle {
            element: H::ELEMENT,
            prefix,
            idx: handle.idx(),
        }
    }

    pub(crate) fn parse(span: Span, msg: impl Into<String>) -> Self {
        Error::Parse { span, msg: msg.into() }
    }
}

impl From<io::Error> for Error {
    fn from(src: io::Error) -> Self {
        Error::Io(src)
    }
}
