//! The elements stored in a mesh.

use std::fmt;

use cgmath::Point3;
use smallvec::SmallVec;

use crate::handle::VertexHandle;


/// A vertex: a position in space. Its identity is the `VertexHandle` under
/// which it's stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>) -> Self {
        Self { position }
    }
}

/// The boundary of a face. Most faces are triangles or quads, so up to four
/// vertices are stored inline.
pub type FaceVertices = SmallVec<[VertexHandle; 4]>;

/// A polygonal face: an ordered list of at least three vertex handles (at
/// least three of them distinct). The order defines the winding.
///
/// A face doesn't store any adjacency information. That is kept in the
/// mesh's side tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    vertices: FaceVertices,
}

impl Face {
    /// Creates a face without validating it. Validation is done by
    /// `Mesh::add_face`.
    pub(crate) fn new(vertices: &[VertexHandle]) -> Self {
        Self { vertices: vertices.iter().cloned().collect() }
    }

    /// The vertices in winding order.
    pub fn vertices(&self) -> &[VertexHandle] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_triangle(&self) -> bool {
        self.vertices.len() == 3
    }

    pub fn contains(&self, v: VertexHandle) -> bool {
        self.vertices.contains(&v)
    }

    /// Returns the number of distinct vertices.
    pub fn distinct_count(&self) -> usize {
        distinct_count(&self.vertices)
    }

    /// Returns `true` if some vertex appears more than once.
    pub fn has_repeated_vertex(&self) -> bool {
        self.distinct_count() != self.vertices.len()
    }

    /// The undirected edges of this face, each exactly once, in boundary
    /// order. Steps between two equal consecutive vertices are skipped.
    pub fn edges(&self) -> SmallVec<[VertexPair; 4]> {
        let n = self.vertices.len();
        let mut out = SmallVec::<[VertexPair; 4]>::new();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if let Some(pair) = VertexPair::try_new(a, b) {
                if !out.contains(&pair) {
                    out.push(pair);
                }
            }
        }

        out
    }

    /// Returns the predecessor and successor of the first occurrence of `v`
    /// along the boundary, or `None` if `v` is not part of this face.
    pub fn neighbors_of(&self, v: VertexHandle) -> Option<(VertexHandle, VertexHandle)> {
        let n = self.vertices.len();
        let pos = self.vertices.iter().position(|&x| x == v)?;
        Some((self.vertices[(pos + n - 1) % n], self.vertices[(pos + 1) % n]))
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut FaceVertices {
        &mut self.vertices
    }
}

pub(crate) fn distinct_count(vertices: &[VertexHandle]) -> usize {
    vertices.iter()
        .enumerate()
        .filter(|(i, v)| !vertices[..*i].contains(v))
        .count()
}


/// An unordered pair of two distinct vertices, used as the key for an
/// undirected edge.
///
/// Equality and hashing are independent of the order in which the vertices
/// were given: `VertexPair::new(a, b) == VertexPair::new(b, a)`. Internally
/// the smaller handle is stored first.
///
/// ```
/// use ringmesh::{VertexHandle, VertexPair, handle::Handle};
///
/// let a = VertexHandle::new(3);
/// let b = VertexHandle::new(1);
/// assert_eq!(VertexPair::new(a, b), VertexPair::new(b, a));
/// assert_eq!(VertexPair::new(a, b).first(), b);
/// assert!(VertexPair::try_new(a, a).is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexPair {
    lo: VertexHandle,
    hi: VertexHandle,
}

impl VertexPair {
    /// Creates the pair of `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`. Use [`VertexPair::try_new`] if that can happen.
    pub fn new(a: VertexHandle, b: VertexHandle) -> Self {
        match Self::try_new(a, b) {
            Some(pair) => pair,
            None => panic!("cannot create a vertex pair from two equal vertices ({:?})", a),
        }
    }

    /// Creates the pair of `a` and `b` or returns `None` if `a == b`.
    pub fn try_new(a: VertexHandle, b: VertexHandle) -> Option<Self> {
        if a == b {
            None
        } else if a < b {
            Some(Self { lo: a, hi: b })
        } else {
            Some(Self { lo: b, hi: a })
        }
    }

    /// The vertex with the smaller index.
    pub fn first(&self) -> VertexHandle {
        self.lo
    }

    /// The vertex with the larger index.
    pub fn second(&self) -> VertexHandle {
        self.hi
    }

    pub fn contains(&self, v: VertexHandle) -> bool {
        self.lo == v || self.hi == v
    }

    /// Returns the vertex of this pair that isn't `v`, or `None` if `v` is
    /// not part of this pair.
    pub fn other(&self, v: VertexHandle) -> Option<VertexHandle> {
        if v == self.lo {
            Some(self.hi)
        } else if v == self.hi {
            Some(self.lo)
        } else {
            None
        }
    }
}

impl fmt::Debug for VertexPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{:?}, {:?}}}", self.lo, self.hi)
    }
}

impl fmt::Display for VertexPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
