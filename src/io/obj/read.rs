use std::{
    collections::hash_map::Entry,
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use boolinator::Boolinator;
use cgmath::{Vector2, Vector3};
use fxhash::{FxHashMap, FxHashSet};
use log::{debug, trace, warn};
use ordered_float::OrderedFloat;

use crate::{
    attr::{
        ExtraData, MaterialTable,
        kinds::{FaceMaterial, TexCoord, VertexNormal},
    },
    error::{Error, Result, Span},
    handle::{FaceHandle, VertexHandle},
    io::parse::{Lines, Record},
    mesh::Mesh,
    primitive::distinct_count,
};


/// A reader for OBJ files.
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
    /// Creates a new `Reader` from the given `io::Read` instance. If you want
    /// to open a file, rather use [`Reader::open`]. The reader is buffered
    /// internally.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads the whole file into a new mesh.
    ///
    /// Either the whole file is read successfully or an error is returned;
    /// there is no partially read mesh. Faces referencing fewer than three
    /// distinct vertices result in `Error::MalformedFace`, everything else
    /// that can't be understood in `Error::Parse`.
    pub fn read(self, options: ReadOptions) -> Result<Mesh> {
        if options.unify_vertices {
            let mut sink = MeshSink::<UnifyingAdder>::new();
            self.read_raw_into(&mut sink)?;
            sink.finish()
        } else {
            let mut sink = MeshSink::<NonUnifyingAdder>::new();
            self.read_raw_into(&mut sink)?;
            sink.finish()
        }
    }

    /// Reads the whole file into the given sink.
    ///
    /// This is a low level building block that you usually don't want to use
    /// directly. Indices are resolved and range checked before they are
    /// passed to the sink.
    pub fn read_raw_into(self, sink: &mut impl Sink) -> Result<()> {
        let mut lines = Lines::new(BufReader::new(self.reader));
        let mut counts = Counts::default();
        let mut corners = Vec::new();

        while let Some(rec) = lines.next_record()? {
            match rec.keyword {
                "v" => {
                    rec.expect_fields(3, 4)?;
                    let pos = rec.vec3(0)?;
                    if rec.fields.len() == 4 {
                        rec.float(3)?;
                    }
                    sink.position(pos);
                    counts.positions += 1;
                }
                "vt" => {
                    rec.expect_fields(2, 3)?;
                    let uv = rec.vec2(0)?;
                    if rec.fields.len() == 3 {
                        rec.float(2)?;
                    }
                    sink.tex_coord(uv);
                    counts.tex_coords += 1;
                }
                "vn" => {
                    rec.expect_fields(3, 3)?;
                    sink.normal(rec.vec3(0)?);
                    counts.normals += 1;
                }
                "f" => {
                    corners.clear();
                    for i in 0..rec.fields.len() {
                        corners.push(parse_corner(&rec, i, &counts)?);
                    }
                    sink.face(&corners, rec.span())?;
                }
                "usemtl" => {
                    rec.expect_fields(0, 1)?;
                    sink.use_material(rec.fields.first().copied());
                }
                "mtllib" => {
                    rec.expect_fields(1, usize::max_value())?;
                    for name in &rec.fields {
                        sink.material_library(name);
                    }
                }
                other => trace!("ignoring '{}' record in line {}", other, rec.line),
            }
        }

        Ok(())
    }
}

/// Used to configure [`Reader::read`].
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Specifies if vertices with the exact same position should be unified
    /// into one. *Default*: `false`.
    ///
    /// OBJ files already share vertices between faces via indices, so this
    /// is only useful for files that store a separate vertex per corner.
    /// Positions are compared bit by bit (no epsilon).
    pub unify_vertices: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            unify_vertices: false,
        }
    }
}


/// One corner of a face: the 0-based indices of the records it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub position: usize,
    pub tex_coord: Option<usize>,
    pub normal: Option<usize>,
}

/// A sink can accept data from an OBJ file. This is mainly used for
/// [`Reader::read_raw_into`].
pub trait Sink {
    /// Is called for each `v` record.
    fn position(&mut self, position: [f32; 3]);

    /// Is called for each `vt` record.
    fn tex_coord(&mut self, uv: [f32; 2]);

    /// Is called for each `vn` record.
    fn normal(&mut self, normal: [f32; 3]);

    /// Is called for each `f` record. All indices of the corners are valid.
    fn face(&mut self, corners: &[Corner], span: Span) -> Result<()>;

    /// Is called for each `usemtl` record. `None` means no material.
    fn use_material(&mut self, name: Option<&str>);

    /// Is called for each library of an `mtllib` record.
    fn material_library(&mut self, name: &str);
}


#[derive(Debug, Default)]
struct Counts {
    positions: usize,
    tex_coords: usize,
    normals: usize,
}

fn parse_corner(rec: &Record<'_>, idx: usize, counts: &Counts) -> Result<Corner> {
    let field = rec.fields[idx];
    let span = rec.field_span(idx);

    let mut parts = field.split('/');
    let position = parts.next().unwrap_or("");
    let tex_coord = parts.next().filter(|s| !s.is_empty());
    let normal = parts.next().filter(|s| !s.is_empty());
    if parts.next().is_some() {
        return Err(Error::parse(span, format!("too many '/' in face corner '{}'", field)));
    }

    Ok(Corner {
        position: resolve_index(position, counts.positions, "vertex", span)?,
        tex_coord: tex_coord
            .map(|s| resolve_index(s, counts.tex_coords, "texture coordinate", span))
            .transpose()?,
        normal: normal
            .map(|s| resolve_index(s, counts.normals, "normal", span))
            .transpose()?,
    })
}

/// Turns a 1-based or negative (relative) index into a 0-based one.
fn resolve_index(s: &str, count: usize, what: &str, span: Span) -> Result<usize> {
    let idx = s.parse::<i64>().map_err(|_| {
        Error::parse(span, format!("expected {} index, found '{}'", what, s))
    })?;

    let resolved = if idx > 0 {
        idx - 1
    } else if idx < 0 {
        count as i64 + idx
    } else {
        return Err(Error::parse(span, format!("{} index 0 is invalid (indices start at 1)", what)));
    };

    if resolved < 0 || resolved >= count as i64 {
        return Err(Error::parse(span, format!(
            "{} index {} is out of range: only {} defined so far",
            what,
            idx,
            count,
        )));
    }

    Ok(resolved as usize)
}


// ===========================================================================
// ===== Building a mesh
// ===========================================================================

trait VertexAdder {
    fn new() -> Self;
    fn add_vertex(&mut self, mesh: &mut Mesh, pos: [f32; 3]) -> VertexHandle;
}

struct NonUnifyingAdder;
impl VertexAdder for NonUnifyingAdder {
    fn new() -> Self {
        NonUnifyingAdder
    }

    fn add_vertex(&mut self, mesh: &mut Mesh, pos: [f32; 3]) -> VertexHandle {
        mesh.add_vertex(pos)
    }
}

struct UnifyingAdder(FxHashMap<[OrderedFloat<f32>; 3], VertexHandle>);
impl VertexAdder for UnifyingAdder {
    fn new() -> Self {
        UnifyingAdder(FxHashMap::default())
    }

    fn add_vertex(&mut self, mesh: &mut Mesh, pos: [f32; 3]) -> VertexHandle {
        let key = [OrderedFloat(pos[0]), OrderedFloat(pos[1]), OrderedFloat(pos[2])];
        *self.0.entry(key).or_insert_with(|| mesh.add_vertex(pos))
    }
}

/// Per-vertex values referenced by face corners. The first corner wins.
#[derive(Default)]
struct CornerValues {
    assigned: FxHashMap<VertexHandle, usize>,
    conflicts: usize,
}

impl CornerValues {
    fn assign<T: PartialEq>(&mut self, values: &[T], v: VertexHandle, idx: usize) {
        match self.assigned.entry(v) {
            Entry::Vacant(e) => {
                e.insert(idx);
            }
            Entry::Occupied(e) => {
                if values[*e.get()] != values[idx] {
                    self.conflicts += 1;
                }
            }
        }
    }

    /// Returns the value of each vertex, or `None` if the values can't be
    /// mapped to vertices.
    fn resolve<T: Copy + PartialEq>(
        &self,
        what: &str,
        values: &[T],
        vertices: &[VertexHandle],
    ) -> Option<Vec<(VertexHandle, T)>> {
        if self.conflicts > 0 {
            warn!(
                "{} face corners reference different {} for the same vertex (kept the first)",
                self.conflicts,
                what,
            );
        }

        if !self.assigned.is_empty() {
            let mut out = self.assigned.iter().map(|(&v, &i)| (v, values[i])).collect::<Vec<_>>();

            // Vertices not used by any face (which can't reference the
            // value) get theirs by index, if there is one value per vertex.
            if values.len() == vertices.len() {
                let mut seen = FxHashSet::default();
                for (&v, &value) in vertices.iter().zip(values) {
                    if !self.assigned.contains_key(&v) && seen.insert(v) {
                        out.push((v, value));
                    }
                }
            }
            return Some(out);
        }
        if values.is_empty() {
            return None;
        }

        // No face references them: map them to vertices by index if the
        // counts match.
        let out = (values.len() == vertices.len()).as_some_from(|| {
            let mut seen = FxHashMap::default();
            for (&v, &value) in vertices.iter().zip(values) {
                seen.entry(v).or_insert(value);
            }
            seen.into_iter().collect::<Vec<_>>()
        });
        if out.is_none() {
            warn!(
                "dropping {} {}: not referenced by faces and not one per vertex ({} vertices)",
                values.len(),
                what,
                vertices.len(),
            );
        }

        out
    }
}

/// Builds a `Mesh` from the records of a file.
struct MeshSink<A: VertexAdder> {
    mesh: Mesh,
    adder: A,

    /// The vertex of each `v` record.
    vertices: Vec<VertexHandle>,
    tex_coords: Vec<Vector2<f32>>,
    normals: Vec<Vector3<f32>>,
    corner_tex_coords: CornerValues,
    corner_normals: CornerValues,

    materials: Option<MaterialTable>,
    uses_materials: bool,
    current_material: Option<usize>,
    face_materials: Vec<(FaceHandle, Option<usize>)>,

    face_buf: Vec<VertexHandle>,
}

impl<A: VertexAdder> MeshSink<A> {
    fn new() -> Self {
        Self {
            mesh: Mesh::new(),
            adder: A::new(),
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            corner_tex_coords: CornerValues::default(),
            corner_normals: CornerValues::default(),
            materials: None,
            uses_materials: false,
            current_material: None,
            face_materials: Vec::new(),
            face_buf: Vec::new(),
        }
    }

    fn finish(self) -> Result<Mesh> {
        let MeshSink {
            mut mesh,
            vertices,
            tex_coords,
            normals,
            corner_tex_coords,
            corner_normals,
            materials,
            uses_materials,
            face_materials,
            ..
        } = self;

        if let Some(values) = corner_tex_coords.resolve("texture coordinates", &tex_coords, &vertices) {
            let column = mesh.vertex_data_mut()
                .get_or_attach::<<TexCoord as ExtraData>::Value>(TexCoord::NAME)?;
            for (v, uv) in values {
                column[v] = uv;
            }
        }

        if let Some(values) = corner_normals.resolve("normals", &normals, &vertices) {
            let column = mesh.vertex_data_mut()
                .get_or_attach::<<VertexNormal as ExtraData>::Value>(VertexNormal::NAME)?;
            for (v, n) in values {
                column[v] = n;
            }
        }

        if uses_materials {
            let names = materials.as_ref().map(|t| t.names()).unwrap_or(&[]);
            let column = mesh.face_data_mut()
                .get_or_attach::<<FaceMaterial as ExtraData>::Value>(FaceMaterial::NAME)?;
            for (f, m) in face_materials {
                if let Some(m) = m {
                    column[f] = names[m].clone();
                }
            }
        }
        mesh.set_material_table(materials);

        debug!(
            "read OBJ: {} vertices, {} faces, {} texture coordinates, {} normals",
            mesh.num_vertices(),
            mesh.num_faces(),
            tex_coords.len(),
            normals.len(),
        );
        Ok(mesh)
    }
}

impl<A: VertexAdder> Sink for MeshSink<A> {
    fn position(&mut self, position: [f32; 3]) {
        let v = self.adder.add_vertex(&mut self.mesh, position);
        self.vertices.push(v);
    }

    fn tex_coord(&mut self, uv: [f32; 2]) {
        self.tex_coords.push(uv.into());
    }

    fn normal(&mut self, normal: [f32; 3]) {
        self.normals.push(normal.into());
    }

    fn face(&mut self, corners: &[Corner], span: Span) -> Result<()> {
        let vertices = &self.vertices;
        self.face_buf.clear();
        self.face_buf.extend(corners.iter().map(|c| vertices[c.position]));

        let distinct = distinct_count(&self.face_buf);
        if distinct < 3 {
            return Err(Error::MalformedFace { span, distinct });
        }
        let f = self.mesh.add_face(&self.face_buf)?;

        for (corner, &v) in corners.iter().zip(&self.face_buf) {
            if let Some(t) = corner.tex_coord {
                self.corner_tex_coords.assign(&self.tex_coords, v, t);
            }
            if let Some(n) = corner.normal {
                self.corner_normals.assign(&self.normals, v, n);
            }
        }

        self.face_materials.push((f, self.current_material));
        Ok(())
    }

    fn use_material(&mut self, name: Option<&str>) {
        self.uses_materials = true;
        let material = match name {
            Some(name) if !name.is_empty() => {
                Some(self.materials.get_or_insert_with(MaterialTable::new).register(name))
            }
            _ => None,
        };
        self.current_material = material;
    }

    fn material_library(&mut self, name: &str) {
        self.materials.get_or_insert_with(MaterialTable::new).add_library(name);
    }
}
