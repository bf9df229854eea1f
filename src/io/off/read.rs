use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use log::{debug, trace};

use crate::{
    error::{Error, Result, Span},
    handle::VertexHandle,
    io::parse::{Lines, Record},
    mesh::Mesh,
    primitive::distinct_count,
};


/// A reader for OFF files.
#[derive(Debug)]
pub struct Reader<R: io::Read> {
    reader: R,
}

impl Reader<File> {
    /// Creates a new `Reader` from the given file.
    pub fn open(path: impl AsRef<Path>) -> std::result::Result<Self, io::Error> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: io::Read> Reader<R> {
    /// Creates a new `Reader` from the given `io::Read` instance. The reader
    /// is buffered internally.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads the whole file into a new mesh. Like the OBJ reader, this
    /// either succeeds completely or returns an error.
    pub fn read(self) -> Result<Mesh> {
        let mut lines = Lines::new(BufReader::new(self.reader));

        // Header: `OFF`, optionally followed by the counts.
        let inline_counts = {
            let header = next(&mut lines, "'OFF' header")?;
            if header.keyword != "OFF" {
                return Err(Error::parse(
                    Span::field(header.line, 0),
                    format!("expected 'OFF' header, found '{}'", header.keyword),
                ));
            }

            if header.fields.is_empty() {
                None
            } else {
                Some(parse_counts(&header, 1)?)
            }
        };
        let (num_vertices, num_faces) = match inline_counts {
            Some(counts) => counts,
            None => parse_counts(&next(&mut lines, "vertex and face counts")?, 0)?,
        };

        let mut mesh = Mesh::new();
        let mut vertices = Vec::new();
        for _ in 0..num_vertices {
            let rec = next(&mut lines, "vertex")?;
            let pos = [rec.float_token(0)?, rec.float_token(1)?, rec.float_token(2)?];
            vertices.push(mesh.add_vertex(pos));
        }

        let mut face = Vec::new();
        for _ in 0..num_faces {
            let rec = next(&mut lines, "face")?;
            read_face(&rec, &vertices, &mut face)?;

            let distinct = distinct_count(&face);
            if distinct < 3 {
                return Err(Error::MalformedFace { span: rec.span(), distinct });
            }
            mesh.add_face(&face)?;
        }

        if let Some(rec) = lines.next_record()? {
            trace!("ignoring data after the last face (line {})", rec.line);
        }

        debug!("read OFF: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
        Ok(mesh)
    }
}

fn next<'a, B: BufRead>(lines: &'a mut Lines<B>, what: &str) -> Result<Record<'a>> {
    let eof_line = lines.line() + 1;
    lines.next_record()?.ok_or_else(|| {
        Error::parse(Span::line(eof_line), format!("unexpected end of file, expected {}", what))
    })
}

/// Parses `num_vertices num_faces [num_edges]` starting at the given token.
fn parse_counts(rec: &Record<'_>, start: usize) -> Result<(usize, usize)> {
    let available = rec.num_tokens() - start;
    if available < 2 || available > 3 {
        return Err(rec.error(format!(
            "expected vertex, face and edge counts, found {} values",
            available,
        )));
    }

    let num_vertices = rec.parse_token::<usize>(start, "vertex count")?;
    let num_faces = rec.parse_token::<usize>(start + 1, "face count")?;
    if available == 3 {
        // The edge count is often wrong or zero, so it's not checked.
        rec.parse_token::<usize>(start + 2, "edge count")?;
    }

    Ok((num_vertices, num_faces))
}

/// Parses `n i_1 ... i_n [color]` into `out`.
fn read_face(rec: &Record<'_>, vertices: &[VertexHandle], out: &mut Vec<VertexHandle>) -> Result<()> {
    let n = rec.parse_token::<usize>(0, "number of vertices")?;
    if rec.num_tokens() - 1 < n {
        return Err(rec.error(format!(
            "face with {} vertices lists only {} indices",
            n,
            rec.num_tokens() - 1,
        )));
    }

    out.clear();
    for i in 1..=n {
        let idx = rec.parse_token::<usize>(i, "vertex index")?;
        let v = vertices.get(idx).ok_or_else(|| {
            Error::parse(
                Span::field(rec.line, i),
                format!("vertex index {} is out of range ({} vertices)", idx, vertices.len()),
            )
        })?;
        out.push(*v);
    }

    Ok(())
}
