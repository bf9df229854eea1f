//! Reading and writing meshes from and to files.
//!
//! Two text formats are supported: Wavefront [`obj`] (positions, texture
//! coordinates, normals, polygon faces and material names) and [`off`]
//! (positions and polygon faces only). [`load`] and [`save`] pick the format
//! from the file extension.

use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, Cursor, Write},
    path::Path,
};

use log::debug;

use crate::{
    error::{Error, Result},
    mesh::Mesh,
};


mod parse;
pub mod obj;
pub mod off;

#[cfg(test)]
mod tests;


/// Types that can serialize a mesh with all its extra data. The mesh is
/// already stored within the type.
///
/// The main method of this trait is `write_to` which writes the mesh to a
/// given `io::Write` destination. There are some other provided methods for
/// easily writing to a file, to stdout and to memory.
pub trait MeshWriter {
    type Error: From<io::Error>;

    /// Writes the mesh and all selected extra data into the given `Write`
    /// instance.
    fn write_to(&self, writer: impl Write) -> std::result::Result<(), Self::Error>;

    /// Writes the mesh to the file given by the filename. Overwrites the file
    /// if it already exists.
    fn write_to_file(&self, path: impl AsRef<Path>) -> std::result::Result<(), Self::Error> {
        self.write_to(BufWriter::new(File::create(path)?))
    }

    /// Writes the mesh to stdout. Locks stdout for the time the mesh is being
    /// written.
    fn write_to_stdout(&self) -> std::result::Result<(), Self::Error> {
        let stdout = io::stdout();
        let lock = stdout.lock();
        self.write_to(lock)
    }

    /// Writes the mesh into a `Vec<u8>` which is returned on success.
    fn write_to_memory(&self) -> std::result::Result<Vec<u8>, Self::Error> {
        let mut w = Cursor::new(Vec::new());
        self.write_to(&mut w)?;
        Ok(w.into_inner())
    }
}

/// Represents one of the supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Obj,
    Off,
}

impl FileFormat {
    /// Tries to guess the file format from the file extension. The comparison
    /// is case insensitive.
    ///
    /// Returns `None` if:
    /// - the path/file has no extension in its name, or
    /// - the extension is no valid UTF8, or
    /// - the file extension is not known.
    pub fn from_extension(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| {
                match ext.to_ascii_lowercase().as_str() {
                    "obj" => Some(FileFormat::Obj),
                    "off" => Some(FileFormat::Off),
                    _ => None,
                }
            })
    }

    /// The canonical (lowercase) file extension of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Obj => "obj",
            FileFormat::Off => "off",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileFormat::Obj => "OBJ",
            FileFormat::Off => "OFF",
        }.fmt(f)
    }
}


/// Reads the file, guessing the format from its extension. OBJ files are
/// read with the default [`obj::ReadOptions`].
pub fn load(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let format = format_of(path)?;
    load_as(path, format)
}

/// Reads the file in the given format.
pub fn load_as(path: impl AsRef<Path>, format: FileFormat) -> Result<Mesh> {
    let path = path.as_ref();
    debug!("loading {} file '{}'", format, path.display());

    match format {
        FileFormat::Obj => obj::Reader::open(path)?.read(obj::ReadOptions::default()),
        FileFormat::Off => off::Reader::open(path)?.read(),
    }
}

/// Writes the mesh to the file, choosing the format from the extension. OBJ
/// files are written with the default [`obj::WriteOptions`].
pub fn save(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = format_of(path)?;
    debug!("saving {} file '{}'", format, path.display());

    match format {
        FileFormat::Obj => obj::Writer::new(mesh).write_to_file(path),
        FileFormat::Off => off::Writer::new(mesh).write_to_file(path),
    }
}

fn format_of(path: &Path) -> Result<FileFormat> {
    FileFormat::from_extension(path).ok_or_else(|| {
        let msg = format!("cannot determine file format of '{}'", path.display());
        Error::Io(io::Error::new(io::ErrorKind::InvalidInput, msg))
    })
}
