//! Reading and writing OFF files.
//!
//! ```text
//! OFF
//! # vertices faces edges
//! 4 2 5
//! 0 1 0
//! 0 0 0
//! 1 0 0
//! 1 1 0
//! 3 0 1 2
//! 3 0 2 3
//! ```
//!
//! The counts may also follow the `OFF` keyword on the same line. Indices
//! are 0-based. Only positions and polygon faces are stored; additional
//! values after the coordinates or indices (usually colors) are ignored.

mod read;
mod write;

#[cfg(test)]
mod tests;

pub use self::{
    read::Reader,
    write::Writer,
};
