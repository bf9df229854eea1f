//! The attributes this crate knows about, as typed markers.
//!
//! Each marker fixes the element kind, the value type and the column name of
//! one attribute. The loaders and the normal computations in
//! `Mesh` use these; user code can use any other name through
//! [`AttrStore`](super::AttrStore) directly.

use cgmath::{Vector2, Vector3};

use crate::{
    handle::{FaceHandle, VertexHandle},
    mesh::ElementHandle,
};
use super::AttrType;


/// A named, typed attribute of one element kind.
pub trait ExtraData: 'static {
    /// The kind of element the attribute is attached to.
    type Handle: ElementHandle;

    /// The type of the values.
    type Value: AttrType;

    /// The name of the attribute column.
    const NAME: &'static str;
}

macro_rules! extra_data {
    ($(#[$attr:meta])* $name:ident: $handle:ty => $value:ty, $column:literal;) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl ExtraData for $name {
            type Handle = $handle;
            type Value = $value;
            const NAME: &'static str = $column;
        }
    }
}

extra_data!{
    /// The smooth per-vertex normal. Loaded from `vn` records, written by
    /// `Mesh::compute_smooth_vertex_normals`.
    VertexNormal: VertexHandle => Vector3<f32>, "vertex_normal";
}
extra_data!{
    /// Per vertex, the weighted normals of all adjacent faces. Used as
    /// intermediate result when computing smooth vertex normals.
    FlatVertexNormals: VertexHandle => Vec<Vector3<f32>>, "flat_vertex_normals";
}
extra_data!{
    /// Whether the vertex lies on a boundary edge.
    BoundaryVertex: VertexHandle => bool, "boundary_vertex";
}
extra_data!{
    /// Texture coordinates (`vt` records).
    TexCoord: VertexHandle => Vector2<f32>, "tex_coord";
}
extra_data!{
    /// The face normal, written by `Mesh::compute_face_normals`.
    FaceNormal: FaceHandle => Vector3<f32>, "face_normal";
}
extra_data!{
    /// The name of the material of a face (`usemtl`). The empty string means
    /// "no material".
    FaceMaterial: FaceHandle => String, "material";
}


/// Material information of a whole mesh: the referenced material libraries
/// (`mtllib`) and the names of all materials in order of first use.
///
/// Materials themselves are not loaded, just referenced by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialTable {
    libraries: Vec<String>,
    names: Vec<String>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn add_library(&mut self, library: impl Into<String>) {
        let library = library.into();
        if !self.libraries.contains(&library) {
            self.libraries.push(library);
        }
    }

    /// Registers a material name and returns its index. Registering a known
    /// name returns the existing index.
    pub fn register(&mut self, name: &str) -> usize {
        match self.index_of(name) {
            Some(idx) => idx,
            None => {
                self.names.push(name.to_owned());
                self.names.len() - 1
            }
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty() && self.names.is_empty()
    }
}
