//! Reading and writing Wavefront OBJ files.
//!
//! Only the geometric subset of the format is supported:
//!
//! | Record | Meaning |
//! |---|---|
//! | `v x y z [w]` | vertex position (`w` is ignored) |
//! | `vt u v [w]` | texture coordinate (`w` is ignored) |
//! | `vn x y z` | vertex normal |
//! | `f c1 c2 c3 ...` | polygon face, corners `v`, `v/vt`, `v//vn` or `v/vt/vn` |
//! | `usemtl [name]` | material of the following faces |
//! | `mtllib name...` | referenced material libraries |
//!
//! Indices are 1-based; negative indices count backwards from the last
//! record of that kind read so far. Other records (`o`, `g`, `s`, ...) are
//! ignored.
//!
//! Texture coordinates and normals are stored per vertex in the
//! [`TexCoord`](crate::attr::kinds::TexCoord) and
//! [`VertexNormal`](crate::attr::kinds::VertexNormal) attributes, materials
//! in [`FaceMaterial`](crate::attr::kinds::FaceMaterial) and the mesh's
//! [`MaterialTable`](crate::attr::MaterialTable).
//!
//! ```
//! use ringmesh::{io::{MeshWriter, obj}, attr::kinds::TexCoord};
//!
//! let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";
//! let mesh = obj::Reader::new(src.as_bytes()).read(obj::ReadOptions::default())?;
//! assert_eq!(mesh.num_faces(), 1);
//! assert!(mesh.has::<TexCoord>());
//!
//! let out = obj::Writer::new(&mesh).write_to_memory()?;
//! assert!(String::from_utf8(out).unwrap().ends_with("f 1/1 2/2 3/3\n"));
//! # Ok::<(), ringmesh::Error>(())
//! ```

mod read;
mod write;


pub use self::{
    read::{Corner, ReadOptions, Reader, Sink},
    write::{WriteOptions, Writer},
};
