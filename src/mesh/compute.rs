//! Derived per-element data: normals and boundary flags.

use cgmath::{prelude::*, Vector3};
use log::debug;

use crate::{
    attr::kinds::{BoundaryVertex, FaceNormal, FlatVertexNormals, VertexNormal},
    attr::ExtraData,
    error::Result,
    math::{angle_between, normalize_or_zero, triangle_normal},
};
use super::Mesh;


impl Mesh {
    /// Computes the normal of every face and stores it in the `FaceNormal`
    /// attribute (attaching it if necessary).
    ///
    /// The normal is `(b - a) × (c - a)` of the first three vertices `a`, `b`
    /// and `c`. If `normalize` is false, its length is twice the area of
    /// that triangle.
    pub fn compute_face_normals(&mut self, normalize: bool) -> Result<()> {
        let normals = self.faces.iter()
            .map(|(f, face)| {
                let v = face.vertices();
                let n = triangle_normal(
                    self.vertices[v[0]].position,
                    self.vertices[v[1]].position,
                    self.vertices[v[2]].position,
                );
                (f, if normalize { normalize_or_zero(n) } else { n })
            })
            .collect::<Vec<_>>();

        let column = self.face_data_mut()
            .get_or_attach::<<FaceNormal as ExtraData>::Value>(FaceNormal::NAME)?;
        for (f, n) in normals {
            column[f] = n;
        }

        debug!("computed {} face normals", self.num_faces());
        Ok(())
    }

    /// Computes a smooth normal for every vertex and stores it in the
    /// `VertexNormal` attribute.
    ///
    /// Each face contributes its unit normal, weighted by the interior angle
    /// at the vertex. Existing `FaceNormal`s are used if attached. The
    /// weighted normals are collected in the temporary `FlatVertexNormals`
    /// attribute, which is detached again at the end. Isolated vertices get
    /// the zero vector.
    pub fn compute_smooth_vertex_normals(&mut self, normalize: bool) -> Result<()> {
        let has_face_normals = self.has::<FaceNormal>();
        let mut contributions = Vec::new();
        for (f, face) in self.faces.iter() {
            let v = face.vertices();
            let pos = |i: usize| self.vertices[v[i % v.len()]].position;

            let face_normal = if has_face_normals {
                *self.get::<FaceNormal>(f)?
            } else {
                triangle_normal(pos(0), pos(1), pos(2))
            };
            let face_normal = normalize_or_zero(face_normal);

            for i in 0..v.len() {
                let p = pos(i);
                let next = pos(i + 1) - p;
                let prev = pos(i + v.len() - 1) - p;
                let weight = angle_between(next, prev);
                contributions.push((v[i], face_normal * weight));
            }
        }

        if !self.has::<FlatVertexNormals>() {
            self.attach::<FlatVertexNormals>()?;
        }
        {
            let flat = self.vertex_data_mut()
                .column_mut::<Vec<Vector3<f32>>>(FlatVertexNormals::NAME)?;
            for (v, n) in contributions {
                flat[v].push(n);
            }
        }

        let sums = self.column::<FlatVertexNormals>()?
            .iter()
            .map(|(v, list)| {
                let sum = list.iter().fold(Vector3::zero(), |acc, n| acc + n);
                (v, if normalize { normalize_or_zero(sum) } else { sum })
            })
            .collect::<Vec<_>>();

        let column = self.vertex_data_mut()
            .get_or_attach::<<VertexNormal as ExtraData>::Value>(VertexNormal::NAME)?;
        for (v, n) in sums {
            column[v] = n;
        }
        self.detach::<FlatVertexNormals>()?;

        debug!("computed {} smooth vertex normals", self.num_vertices());
        Ok(())
    }

    /// Sets the `BoundaryVertex` flag of every vertex (attaching the
    /// attribute if necessary).
    pub fn compute_boundary_vertices(&mut self) -> Result<()> {
        let flags = self.vertex_handles()
            .map(|v| self.is_boundary_vertex(v).map(|b| (v, b)))
            .collect::<Result<Vec<_>>>()?;

        let column = self.vertex_data_mut().get_or_attach::<bool>(BoundaryVertex::NAME)?;
        for (v, is_boundary) in flags {
            column[v] = is_boundary;
        }

        Ok(())
    }
}
