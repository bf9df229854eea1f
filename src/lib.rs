//! A polygon mesh with explicit adjacency, per-element extra data and OBJ
//! input/output.
//!
//! The central type is [`Mesh`]: an arena of vertices and faces (addressed by
//! [`VertexHandle`] and [`FaceHandle`]) plus side tables that answer
//! adjacency queries directly:
//!
//! - the faces and ring-1 neighbors of every vertex,
//! - the faces sharing every undirected edge (keyed by [`VertexPair`]).
//!
//! Every mutation keeps those tables (and all attached extra data, see
//! [`attr`]) consistent. [`integrity::check`] verifies that and reports
//! topological oddities like boundary or non-manifold edges.
//!
//! # Example
//!
//! ```
//! use ringmesh::{Mesh, RemoveMode};
//!
//! let mut mesh = Mesh::new();
//! let a = mesh.add_vertex([0.0, 0.0, 0.0]);
//! let b = mesh.add_vertex([1.0, 0.0, 0.0]);
//! let c = mesh.add_vertex([0.0, 1.0, 0.0]);
//! let f = mesh.add_triangle([a, b, c])?;
//!
//! assert_eq!(mesh.faces_around_vertex(a)?.collect::<Vec<_>>(), vec![f]);
//! assert!(mesh.remove_vertex(a, RemoveMode::Strict).is_err());
//! # Ok::<(), ringmesh::Error>(())
//! ```

#[cfg(test)]
#[macro_use]
mod test_utils;

pub mod attr;
pub mod error;
pub mod handle;
pub mod integrity;
#[cfg(feature = "io")]
pub mod io;
pub mod map;
pub mod math;
pub mod mesh;
pub mod prelude;
pub mod primitive;
pub mod refs;


pub use self::{
    error::{Error, Result},
    handle::{FaceHandle, VertexHandle},
    integrity::IntegrityReport,
    mesh::{Mesh, RemoveMode},
    primitive::{Face, Vertex, VertexPair},
};
