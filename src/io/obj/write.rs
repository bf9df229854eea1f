use std::io::Write;

use boolinator::Boolinator;
use log::debug;

use crate::{
    attr::kinds::{FaceMaterial, TexCoord, VertexNormal},
    error::Error,
    handle::VertexHandle,
    io::MeshWriter,
    map::DenseMap,
    mesh::Mesh,
};


/// Selects which extra data is written by [`Writer`]. Extra data that isn't
/// attached to the mesh is never written. *Default*: everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write `vt` records from the `TexCoord` attribute.
    pub tex_coords: bool,

    /// Write `vn` records from the `VertexNormal` attribute.
    pub normals: bool,

    /// Write `usemtl` records from the `FaceMaterial` attribute and the
    /// `mtllib` record from the material table.
    pub materials: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            tex_coords: true,
            normals: true,
            materials: true,
        }
    }
}

/// A writer for OBJ files. Implements [`MeshWriter`].
///
/// The output consists of, in this order: the `mtllib` record, one `v`
/// record per vertex (in handle order), one `vt` and one `vn` record per
/// vertex (if written at all) and the faces. Vertices are numbered densely,
/// so holes left by removed vertices don't show up in the file. A `usemtl`
/// record is written whenever the material changes from one face to the
/// next.
///
/// Floats are written in their shortest representation that parses back to
/// the same value, so reading and writing a file written by this writer
/// reproduces it exactly.
#[derive(Debug, Clone, Copy)]
pub struct Writer<'a> {
    mesh: &'a Mesh,
    options: WriteOptions,
}

impl<'a> Writer<'a> {
    /// Creates a writer for the given mesh with default options.
    pub fn new(mesh: &'a Mesh) -> Self {
        Self {
            mesh,
            options: WriteOptions::default(),
        }
    }

    pub fn with_options(self, options: WriteOptions) -> Self {
        Self { options, .. self }
    }
}

impl MeshWriter for Writer<'_> {
    type Error = Error;

    #[inline(never)]
    fn write_to(&self, mut w: impl Write) -> Result<(), Self::Error> {
        let mesh = self.mesh;

        // Attributes that are missing (or were attached with a different
        // type under the same name) are simply not written.
        let tex_coords = self.options.tex_coords.and_option_from(|| mesh.column::<TexCoord>().ok());
        let normals = self.options.normals.and_option_from(|| mesh.column::<VertexNormal>().ok());
        let materials = self.options.materials.and_option_from(|| mesh.column::<FaceMaterial>().ok());

        if self.options.materials {
            if let Some(table) = mesh.material_table() {
                if !table.libraries().is_empty() {
                    writeln!(w, "mtllib {}", table.libraries().join(" "))?;
                }
            }
        }

        // Dense, 1-based indices
        let mut index = DenseMap::<VertexHandle, usize>::with_capacity(mesh.num_vertices() as usize);
        for (i, v) in mesh.vertex_handles().enumerate() {
            index.insert(v, i + 1);
        }

        for v in mesh.vertices() {
            let p = v.position();
            writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
        }
        if let Some(tex_coords) = tex_coords {
            for v in mesh.vertex_handles() {
                let uv = tex_coords[v];
                writeln!(w, "vt {} {}", uv.x, uv.y)?;
            }
        }
        if let Some(normals) = normals {
            for v in mesh.vertex_handles() {
                let n = normals[v];
                writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
            }
        }

        let mut current_material = "";
        for face in mesh.faces() {
            if let Some(materials) = materials {
                let material = materials[face.handle()].as_str();
                if material != current_material {
                    if material.is_empty() {
                        writeln!(w, "usemtl")?;
                    } else {
                        writeln!(w, "usemtl {}", material)?;
                    }
                    current_material = material;
                }
            }

            write!(w, "f")?;
            for &v in face.vertices() {
                let i = index[v];
                match (tex_coords.is_some(), normals.is_some()) {
                    (false, false) => write!(w, " {}", i)?,
                    (true, false) => write!(w, " {}/{}", i, i)?,
                    (false, true) => write!(w, " {}//{}", i, i)?,
                    (true, true) => write!(w, " {}/{}/{}", i, i, i)?,
                }
            }
            writeln!(w)?;
        }

        debug!("wrote OBJ: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
        Ok(())
    }
}
