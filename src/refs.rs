//! Types for references to elements within a mesh.
//!
//! A reference is a handle paired with a borrow of the mesh. Shared
//! references ([`VertexRef`], [`FaceRef`], [`TriangleRef`]) borrow the mesh
//! immutably and are `Copy`. Mutable references ([`VertexRefMut`],
//! [`FaceRefMut`]) borrow it exclusively. Since references are only handed
//! out for live elements and the borrow prevents removals, the accessors of
//! references don't need to return `Result`.

use std::fmt;

use cgmath::{prelude::*, Point3, Vector3};

use crate::{
    attr::{AttrType, ExtraData},
    error::Result,
    handle::{FaceHandle, Handle, VertexHandle},
    math::{normalize_or_zero, triangle_normal},
    mesh::{ElementHandle, Mesh},
    primitive::VertexPair,
};


/// A reference to an element within a mesh.
///
/// This is just a handle paired with a reference to the mesh associated with
/// that handle.
pub struct ElementRef<'a, HandleT: Handle> {
    handle: HandleT,
    mesh: &'a Mesh,
}

/// A reference to a face within a mesh.
///
/// This is just a face handle with a reference to the mesh. See [`ElementRef`]
/// for more information.
pub type FaceRef<'a> = ElementRef<'a, FaceHandle>;

/// A reference to a vertex within a mesh.
///
/// This is just a vertex handle with a reference to the mesh. See
/// [`ElementRef`] for more information.
pub type VertexRef<'a> = ElementRef<'a, VertexHandle>;


/// A mutable reference to an element within a mesh.
///
/// This is just a handle paired with a mutable reference to the mesh
/// associated with that handle.
pub struct ElementRefMut<'a, HandleT: Handle> {
    handle: HandleT,
    mesh: &'a mut Mesh,
}

/// A mutable reference to a face within a mesh.
pub type FaceRefMut<'a> = ElementRefMut<'a, FaceHandle>;

/// A mutable reference to a vertex within a mesh.
pub type VertexRefMut<'a> = ElementRefMut<'a, VertexHandle>;


/// Allows to create multiple impl blocks with different headers but same body.
macro_rules! multi_impl {
    (
        [$(
            { $($header:tt)* },
        )*]
        $body:tt
    ) => {
        $(
            $($header)*
            $body
        )*
    }
}


impl<'a, HandleT: Handle> ElementRef<'a, HandleT> {
    pub(crate) fn new(mesh: &'a Mesh, handle: HandleT) -> Self {
        Self { mesh, handle }
    }

    /// Returns the linked mesh with the full lifetime `'a`.
    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }
}

impl<'a, HandleT: Handle> ElementRefMut<'a, HandleT> {
    pub(crate) fn new(mesh: &'a mut Mesh, handle: HandleT) -> Self {
        Self { mesh, handle }
    }

    /// Returns an immutable reference to the linked mesh.
    pub fn mesh(&self) -> &Mesh {
        self.mesh
    }

    /// Returns a shared reference to the same element.
    pub fn as_ref(&self) -> ElementRef<'_, HandleT> {
        ElementRef::new(self.mesh, self.handle)
    }
}

impl<'a, HandleT: Handle> Clone for ElementRef<'a, HandleT> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
            mesh: self.mesh,
        }
    }
}

impl<'a, HandleT: Handle> Copy for ElementRef<'a, HandleT> {}

impl<HandleT: Handle> fmt::Debug for ElementRef<'_, HandleT> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ElementRef({:?})", self.handle)
    }
}

impl<HandleT: Handle> fmt::Debug for ElementRefMut<'_, HandleT> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ElementRefMut({:?})", self.handle)
    }
}


multi_impl!{
    [
        { impl<'a, HandleT: ElementHandle> ElementRef<'a, HandleT> },
        { impl<'a, HandleT: ElementHandle> ElementRefMut<'a, HandleT> },
    ]
    {
        /// Returns the stored handle.
        pub fn handle(&self) -> HandleT {
            self.handle
        }

        /// Returns the value of the attribute `A` for this element.
        pub fn get<A: ExtraData<Handle = HandleT>>(&self) -> Result<&A::Value> {
            HandleT::store(&self.mesh).get(A::NAME, self.handle)
        }

        /// Returns the value of the attribute with the given name for this
        /// element.
        pub fn attr<T: AttrType>(&self, name: &str) -> Result<&T> {
            HandleT::store(&self.mesh).get(name, self.handle)
        }
    }
}

impl<'a, HandleT: ElementHandle> ElementRefMut<'a, HandleT> {
    /// Sets the value of the attribute `A` for this element and returns the
    /// old value.
    pub fn set<A: ExtraData<Handle = HandleT>>(&mut self, value: A::Value) -> Result<A::Value> {
        HandleT::store_mut(self.mesh).set(A::NAME, self.handle, value)
    }

    /// Sets the value of the attribute with the given name for this element
    /// and returns the old value.
    pub fn set_attr<T: AttrType>(&mut self, name: &str, value: T) -> Result<T> {
        HandleT::store_mut(self.mesh).set(name, self.handle, value)
    }
}


// ===========================================================================
// ===== With VertexHandle
// ===========================================================================
multi_impl!{
    [
        { impl<'a> VertexRef<'a> },
        { impl<'a> VertexRefMut<'a> },
    ]
    {
        pub fn position(&self) -> Point3<f32> {
            self.mesh.vertices[self.handle].position
        }

        /// Number of neighboring vertices.
        pub fn degree(&self) -> usize {
            self.mesh.vertex_adj[self.handle].neighbors.len()
        }

        /// Returns `true` if no face uses this vertex.
        pub fn is_isolated(&self) -> bool {
            self.mesh.vertex_adj[self.handle].faces.is_empty()
        }

        /// Returns `true` if the vertex lies on a boundary edge.
        pub fn is_boundary(&self) -> bool {
            let v = self.handle;
            self.mesh.vertex_adj[v].neighbors.iter().any(|&w| {
                self.mesh.faces_of_edge(VertexPair::new(v, w)).len() == 1
            })
        }
    }
}

impl<'a> VertexRef<'a> {
    /// Returns an iterator over all faces adjacent to this vertex.
    ///
    /// This is just a convenience method wrapping
    /// [`Mesh::faces_around_vertex`]. For more information about the order of
    /// returned faces, take a look at its documentation.
    ///
    /// # Example
    ///
    /// ```
    /// use ringmesh::Mesh;
    ///
    /// //    (A)---(D)
    /// //     | \ Y |
    /// //     |  \  |
    /// //     | X \ |
    /// //     |    \|
    /// //    (B)---(C)
    /// let mut mesh = Mesh::new();
    /// let va = mesh.add_vertex([0.0, 1.0, 0.0]);
    /// let vb = mesh.add_vertex([0.0, 0.0, 0.0]);
    /// let vc = mesh.add_vertex([1.0, 0.0, 0.0]);
    /// let vd = mesh.add_vertex([1.0, 1.0, 0.0]);
    /// let fx = mesh.add_triangle([va, vb, vc]).unwrap();
    /// let fy = mesh.add_triangle([va, vc, vd]).unwrap();
    ///
    /// let v = mesh.vertex(va).unwrap();
    /// let face_handles = v.adjacent_faces()
    ///     .map(|f| f.handle())
    ///     .collect::<Vec<_>>();
    ///
    /// assert_eq!(face_handles, vec![fx, fy]);
    /// ```
    pub fn adjacent_faces(&self) -> impl Iterator<Item = FaceRef<'a>> + Clone {
        let mesh = self.mesh;
        mesh.vertex_adj[self.handle].faces.iter().map(move |&f| FaceRef::new(mesh, f))
    }

    /// Returns an iterator over all ring1 neighbors of this vertex (the
    /// vertices that are directly connected to `self` via an edge).
    ///
    /// See [`Mesh::vertices_around_vertex`] for the order.
    pub fn adjacent_vertices(&self) -> impl Iterator<Item = VertexRef<'a>> + Clone {
        let mesh = self.mesh;
        mesh.vertex_adj[self.handle].neighbors.iter().map(move |&v| VertexRef::new(mesh, v))
    }

    /// Returns an iterator over the triangles adjacent to this vertex.
    pub fn adjacent_triangles(&self) -> impl Iterator<Item = TriangleRef<'a>> + Clone {
        self.adjacent_faces().filter_map(|f| f.as_triangle())
    }
}

impl<'a> VertexRefMut<'a> {
    pub fn set_position(&mut self, position: Point3<f32>) {
        self.mesh.vertices[self.handle].position = position;
    }
}


// ===========================================================================
// ===== With FaceHandle
// ===========================================================================
multi_impl!{
    [
        { impl<'a> FaceRef<'a> },
        { impl<'a> FaceRefMut<'a> },
    ]
    {
        pub fn num_vertices(&self) -> usize {
            self.mesh.faces[self.handle].len()
        }

        pub fn is_triangle(&self) -> bool {
            self.mesh.faces[self.handle].is_triangle()
        }

        /// The undirected edges of the face in boundary order.
        pub fn edges(&self) -> impl Iterator<Item = VertexPair> {
            self.mesh.faces[self.handle].edges().into_iter()
        }

        pub fn is_adjacent_to_face(&self, other: FaceHandle) -> bool {
            self.mesh.are_adjacent_faces(self.handle, other).unwrap_or(false)
        }
    }
}

impl<'a> FaceRef<'a> {
    /// The vertex handles in winding order.
    pub fn vertices(&self) -> &'a [VertexHandle] {
        self.mesh.faces[self.handle].vertices()
    }

    /// Returns an iterator over all vertices of this face.
    pub fn adjacent_vertices(&self) -> impl Iterator<Item = VertexRef<'a>> + Clone {
        let mesh = self.mesh;
        self.vertices().iter().map(move |&v| VertexRef::new(mesh, v))
    }

    /// The positions of the vertices in winding order.
    pub fn positions(&self) -> impl Iterator<Item = Point3<f32>> + Clone + 'a {
        let mesh = self.mesh;
        self.vertices().iter().map(move |&v| mesh.vertices[v].position)
    }

    /// Returns the faces sharing an edge with this face.
    pub fn adjacent_faces(&self) -> impl Iterator<Item = FaceRef<'a>> {
        let mesh = self.mesh;
        let faces = mesh.faces_around_face(self.handle).unwrap_or_default();
        faces.into_iter().map(move |f| FaceRef::new(mesh, f))
    }

    /// Views this face as triangle, or returns `None` if it has more than
    /// three vertices.
    pub fn as_triangle(&self) -> Option<TriangleRef<'a>> {
        let v = self.vertices();
        if v.len() == 3 {
            Some(TriangleRef { face: *self, vertices: [v[0], v[1], v[2]] })
        } else {
            None
        }
    }
}


// ===========================================================================
// ===== Triangles
// ===========================================================================

/// A reference to a face with exactly three vertices.
#[derive(Clone, Copy)]
pub struct TriangleRef<'a> {
    face: FaceRef<'a>,
    vertices: [VertexHandle; 3],
}

impl<'a> TriangleRef<'a> {
    pub fn handle(&self) -> FaceHandle {
        self.face.handle()
    }

    pub fn face(&self) -> FaceRef<'a> {
        self.face
    }

    pub fn vertices(&self) -> [VertexHandle; 3] {
        self.vertices
    }

    pub fn positions(&self) -> [Point3<f32>; 3] {
        let mesh = self.face.mesh();
        let [a, b, c] = self.vertices;
        [mesh.vertices[a].position, mesh.vertices[b].position, mesh.vertices[c].position]
    }

    /// The unit normal (zero for degenerate triangles).
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = self.positions();
        normalize_or_zero(triangle_normal(a, b, c))
    }

    pub fn area(&self) -> f32 {
        let [a, b, c] = self.positions();
        triangle_normal(a, b, c).magnitude() / 2.0
    }
}

impl fmt::Debug for TriangleRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TriangleRef({:?}: {:?})", self.handle(), self.vertices)
    }
}
