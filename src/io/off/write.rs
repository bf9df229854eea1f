use std::io::Write;

use log::debug;

use crate::{
    error::Error,
    handle::VertexHandle,
    io::MeshWriter,
    map::DenseMap,
    mesh::Mesh,
};


/// A writer for OFF files. Implements [`MeshWriter`].
///
/// Vertices are numbered densely from 0 in handle order. No extra data is
/// written.
#[derive(Debug, Clone, Copy)]
pub struct Writer<'a> {
    mesh: &'a Mesh,
}

impl<'a> Writer<'a> {
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }
}

impl MeshWriter for Writer<'_> {
    type Error = Error;

    #[inline(never)]
    fn write_to(&self, mut w: impl Write) -> Result<(), Self::Error> {
        let mesh = self.mesh;

        writeln!(w, "OFF")?;
        writeln!(w, "{} {} {}", mesh.num_vertices(), mesh.num_faces(), mesh.num_edges())?;

        let mut index = DenseMap::<VertexHandle, usize>::with_capacity(mesh.num_vertices() as usize);
        for (i, v) in mesh.vertices().enumerate() {
            index.insert(v.handle(), i);
            let p = v.position();
            writeln!(w, "{} {} {}", p.x, p.y, p.z)?;
        }

        for face in mesh.faces() {
            write!(w, "{}", face.num_vertices())?;
            for &v in face.vertices() {
                write!(w, " {}", index[v])?;
            }
            writeln!(w)?;
        }

        debug!("wrote OFF: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
        Ok(())
    }
}
