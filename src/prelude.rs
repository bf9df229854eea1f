//! Reexports of all important traits of this library for convenience.
//!
//! As with every prelude, the main usage is to glob import everything from
//! this module:
//!
//! ```
//! use ringmesh::prelude::*;
//! ```
//!
//! Now you have all important traits in scope.

pub use crate::{
    attr::{AttrType, ExtraData},
    handle::Handle,
    math::Pos3Like,
    mesh::ElementHandle,
};

#[cfg(feature = "io")]
pub use crate::io::MeshWriter;
