//! Everything related to handles.
//!
//! Handles are plain indices into the element arenas of a [`Mesh`]. They are
//! cheap to copy and don't borrow the mesh. A handle stays valid until its
//! element is removed or the mesh is compacted via [`Mesh::compact`].
//!
//! [`Mesh`]: crate::Mesh
//! [`Mesh::compact`]: crate::Mesh::compact

use std::{
    fmt,
    hash::Hash,
};

use static_assertions::assert_eq_size;


/// The integer used as index in handles.
///
/// By default, this is `u32`. With the `large-handle` feature enabled, it's
/// `u64`. Four billion elements are enough for nearly all meshes.
#[cfg(not(feature = "large-handle"))]
#[allow(non_camel_case_types)]
pub type hsize = u32;

/// The integer used as index in handles.
#[cfg(feature = "large-handle")]
#[allow(non_camel_case_types)]
pub type hsize = u64;


/// The kinds of elements stored in a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshElement {
    Vertex,
    Face,
}

impl fmt::Display for MeshElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MeshElement::Vertex => "vertex",
            MeshElement::Face => "face",
        }.fmt(f)
    }
}


/// Types that can be used to refer to some data. Basically a typed index.
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord + Hash {
    /// The kind of element this handle refers to.
    const ELEMENT: MeshElement;

    /// Create a handle from the given index.
    fn new(idx: hsize) -> Self;

    /// Return the index of the current handle.
    fn idx(&self) -> hsize;

    /// Helper method to create a handle directly from an `usize`.
    ///
    /// If `raw` cannot be represented by `hsize`, this function either panics
    /// or returns a nonsensical ID. In debug mode, this function is guaranteed
    /// to panic in this case.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        debug_assert!(raw <= hsize::max_value() as usize);
        Self::new(raw as hsize)
    }

    /// Helper method to get the ID as a usize directly from an handle.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident = $short:expr, $element:ident;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(hsize);

        impl Handle for $name {
            const ELEMENT: MeshElement = MeshElement::$element;

            #[inline(always)]
            fn new(id: hsize) -> Self {
                $name(id)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $short, self.idx())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    }
}

make_handle_type!{
    /// A handle that is associated with a face.
    FaceHandle = "F", Face;
}
make_handle_type!{
    /// A handle that is associated with a vertex.
    VertexHandle = "V", Vertex;
}

assert_eq_size!(FaceHandle, hsize);
assert_eq_size!(VertexHandle, hsize);
