//! Circulators: iterators over the neighborhood of a vertex.
//!
//! All circulators are lazy, finite and cheap to clone. Cloning a circulator
//! (before advancing it) is the way to restart a circulation. They borrow the
//! mesh, so the mesh can't be mutated while one is alive.

use std::{iter::FusedIterator, slice};

use crate::{
    handle::{FaceHandle, VertexHandle},
    refs::{FaceRef, TriangleRef},
};
use super::Mesh;


/// Iterator over the faces around a vertex, in the order they were added.
/// Created by [`Mesh::faces_around_vertex`].
#[derive(Debug, Clone)]
pub struct FacesAroundVertex<'a> {
    iter: slice::Iter<'a, FaceHandle>,
}

impl<'a> FacesAroundVertex<'a> {
    pub(crate) fn new(faces: &'a [FaceHandle]) -> Self {
        Self { iter: faces.iter() }
    }
}

impl Iterator for FacesAroundVertex<'_> {
    type Item = FaceHandle;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for FacesAroundVertex<'_> {}
impl FusedIterator for FacesAroundVertex<'_> {}


/// Iterator over the ring-1 neighbors of a vertex. Created by
/// [`Mesh::vertices_around_vertex`].
#[derive(Debug, Clone)]
pub struct VerticesAroundVertex<'a> {
    iter: slice::Iter<'a, VertexHandle>,
}

impl<'a> VerticesAroundVertex<'a> {
    pub(crate) fn new(neighbors: &'a [VertexHandle]) -> Self {
        Self { iter: neighbors.iter() }
    }
}

impl Iterator for VerticesAroundVertex<'_> {
    type Item = VertexHandle;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for VerticesAroundVertex<'_> {}
impl FusedIterator for VerticesAroundVertex<'_> {}


/// Iterator over the triangular faces around a vertex. Faces with more than
/// three vertices are skipped. Created by [`Mesh::triangles_around_vertex`].
#[derive(Debug, Clone)]
pub struct TrianglesAroundVertex<'a> {
    mesh: &'a Mesh,
    iter: slice::Iter<'a, FaceHandle>,
}

impl<'a> TrianglesAroundVertex<'a> {
    pub(crate) fn new(mesh: &'a Mesh, faces: &'a [FaceHandle]) -> Self {
        Self { mesh, iter: faces.iter() }
    }
}

impl<'a> Iterator for TrianglesAroundVertex<'a> {
    type Item = TriangleRef<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        let mesh = self.mesh;
        self.iter.by_ref()
            .filter_map(|&f| FaceRef::new(mesh, f).as_triangle())
            .next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl FusedIterator for TrianglesAroundVertex<'_> {}
