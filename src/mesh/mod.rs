//! The polygon mesh with explicit adjacency.

use cgmath::Point3;
use fxhash::FxHashMap;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::{
    attr::{AttrStore, AttrType, ExtraData, MaterialTable},
    error::{Error, Result},
    handle::{hsize, FaceHandle, Handle, VertexHandle},
    integrity::{self, IntegrityReport},
    map::DenseMap,
    math::Pos3Like,
    primitive::{distinct_count, Face, Vertex, VertexPair},
    refs::{FaceRef, FaceRefMut, VertexRef, VertexRefMut},
};


pub mod adj;
mod compute;
#[cfg(test)]
mod tests;

pub use self::adj::{FacesAroundVertex, TrianglesAroundVertex, VerticesAroundVertex};


/// Per-vertex adjacency: incident faces and ring-1 neighbors, both in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub(crate) struct VertexAdj {
    pub(crate) faces: SmallVec<[FaceHandle; 6]>,
    pub(crate) neighbors: SmallVec<[VertexHandle; 6]>,
}

/// The faces sharing one edge. In a manifold mesh, there are one or two.
pub(crate) type EdgeFaces = SmallVec<[FaceHandle; 2]>;

/// How `Mesh::remove_vertex` deals with faces still using the vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveMode {
    /// Fail with `Error::DanglingReference` if any face uses the vertex.
    Strict,

    /// Remove all faces using the vertex first.
    Cascade,
}

/// Element handles with an attribute store in `Mesh`.
pub trait ElementHandle: Handle {
    fn store(mesh: &Mesh) -> &AttrStore<Self>;
    fn store_mut(mesh: &mut Mesh) -> &mut AttrStore<Self>;
}

impl ElementHandle for VertexHandle {
    fn store(mesh: &Mesh) -> &AttrStore<Self> {
        &mesh.vertex_data
    }
    fn store_mut(mesh: &mut Mesh) -> &mut AttrStore<Self> {
        &mut mesh.vertex_data
    }
}

impl ElementHandle for FaceHandle {
    fn store(mesh: &Mesh) -> &AttrStore<Self> {
        &mesh.face_data
    }
    fn store_mut(mesh: &mut Mesh) -> &mut AttrStore<Self> {
        &mut mesh.face_data
    }
}


/// A polygon mesh: vertices, faces and the adjacency between them.
///
/// Besides the element arenas, the mesh keeps three side tables that are
/// updated by every mutation:
///
/// - per vertex, the incident faces and the neighboring vertices,
/// - per undirected edge (a [`VertexPair`]), the faces containing it.
///
/// Elements are identified by handles. Removing an element leaves a hole in
/// its arena, so the handles of all other elements stay valid. Only
/// [`Mesh::compact`] moves elements (and thus invalidates all handles).
///
/// # Example
///
/// ```
/// use ringmesh::Mesh;
///
/// //    (a)---(d)
/// //     | \   |
/// //     |  \  |
/// //     |   \ |
/// //    (b)---(c)
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex([0.0, 1.0, 0.0]);
/// let b = mesh.add_vertex([0.0, 0.0, 0.0]);
/// let c = mesh.add_vertex([1.0, 0.0, 0.0]);
/// let d = mesh.add_vertex([1.0, 1.0, 0.0]);
/// let f0 = mesh.add_triangle([a, b, c]).unwrap();
/// let f1 = mesh.add_triangle([a, c, d]).unwrap();
///
/// assert_eq!(mesh.num_edges(), 5);
/// assert!(mesh.are_adjacent_faces(f0, f1).unwrap());
/// assert_eq!(mesh.faces_around_vertex(a).unwrap().collect::<Vec<_>>(), vec![f0, f1]);
/// ```
#[derive(Debug, Clone)]
pub struct Mesh {
    pub(crate) vertices: DenseMap<VertexHandle, Vertex>,
    pub(crate) faces: DenseMap<FaceHandle, Face>,
    pub(crate) vertex_adj: DenseMap<VertexHandle, VertexAdj>,
    pub(crate) edges: FxHashMap<VertexPair, EdgeFaces>,
    vertex_data: AttrStore<VertexHandle>,
    face_data: AttrStore<FaceHandle>,
    material_table: Option<MaterialTable>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends the predecessor and the successor of every occurrence of `v` in
/// `face` to `neighbors`, skipping `v` itself and vertices already present.
fn push_face_neighbors(
    neighbors: &mut SmallVec<[VertexHandle; 6]>,
    face: &[VertexHandle],
    v: VertexHandle,
) {
    let n = face.len();
    for (i, _) in face.iter().enumerate().filter(|&(_, &w)| w == v) {
        for &w in &[face[(i + n - 1) % n], face[(i + 1) % n]] {
            if w != v && !neighbors.contains(&w) {
                neighbors.push(w);
            }
        }
    }
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: DenseMap::new(),
            faces: DenseMap::new(),
            vertex_adj: DenseMap::new(),
            edges: FxHashMap::default(),
            vertex_data: AttrStore::new(),
            face_data: AttrStore::new(),
            material_table: None,
        }
    }

    pub fn num_vertices(&self) -> hsize {
        self.vertices.num_elements()
    }

    pub fn num_faces(&self) -> hsize {
        self.faces.num_elements()
    }

    /// Number of distinct undirected edges.
    pub fn num_edges(&self) -> hsize {
        self.edges.len() as hsize
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains_vertex(&self, v: VertexHandle) -> bool {
        self.vertices.contains_handle(v)
    }

    pub fn contains_face(&self, f: FaceHandle) -> bool {
        self.faces.contains_handle(f)
    }

    // ===== Mutation ========================================================

    /// Adds a vertex at the given position and returns its handle. The vertex
    /// is isolated (not part of any face) until a face uses it.
    pub fn add_vertex(&mut self, position: impl Pos3Like) -> VertexHandle {
        let v = self.vertices.push(Vertex::new(position.to_point3()));
        self.vertex_adj.insert(v, VertexAdj::default());
        self.vertex_data.on_insert(v);
        v
    }

    /// Adds a face with the given boundary (in winding order) and returns
    /// its handle.
    ///
    /// Fails with `InvalidHandle` if a vertex doesn't exist and with
    /// `InvalidTopology` if the boundary has fewer than three distinct
    /// vertices. A vertex may appear more than once as long as there are
    /// three distinct ones; the integrity check reports such a face as
    /// degenerate.
    pub fn add_face(&mut self, vertices: &[VertexHandle]) -> Result<FaceHandle> {
        for &v in vertices {
            self.check_vertex(v)?;
        }

        let distinct = distinct_count(vertices);
        if distinct < 3 {
            return Err(Error::InvalidTopology(format!(
                "a face needs at least 3 distinct vertices, but {:?} has {}",
                vertices,
                distinct,
            )));
        }

        let face = Face::new(vertices);
        let edges = face.edges();
        let f = self.faces.push(face);

        // The new face comes last in every incident face list, so appending
        // its neighbors keeps the documented ring order.
        for &v in vertices {
            let adj = &mut self.vertex_adj[v];
            if !adj.faces.contains(&f) {
                adj.faces.push(f);
                push_face_neighbors(&mut adj.neighbors, vertices, v);
            }
        }

        for pair in edges {
            self.edges.entry(pair).or_default().push(f);
        }

        self.face_data.on_insert(f);
        Ok(f)
    }

    /// Convenience wrapper around `add_face` for triangles.
    pub fn add_triangle(&mut self, vertices: [VertexHandle; 3]) -> Result<FaceHandle> {
        self.add_face(&vertices)
    }

    /// Removes the face and returns it. Its vertices stay in the mesh (they
    /// might become isolated).
    pub fn remove_face(&mut self, f: FaceHandle) -> Result<Face> {
        let face = self.faces.remove(f).ok_or_else(|| Error::invalid_handle(f))?;

        for pair in face.edges() {
            let now_unused = match self.edges.get_mut(&pair) {
                Some(faces) => {
                    faces.retain(|x| *x != f);
                    faces.is_empty()
                }
                None => false,
            };
            if now_unused {
                self.edges.remove(&pair);
            }
        }

        for &v in face.vertices() {
            self.vertex_adj[v].faces.retain(|x| *x != f);
            self.rebuild_neighbors(v);
        }

        self.face_data.on_remove(f);
        Ok(face)
    }

    /// Recomputes the ring-1 neighbors of `v` from its remaining incident
    /// faces. O(degree).
    fn rebuild_neighbors(&mut self, v: VertexHandle) {
        let mut neighbors = SmallVec::new();
        for &f in &self.vertex_adj[v].faces {
            push_face_neighbors(&mut neighbors, self.faces[f].vertices(), v);
        }
        self.vertex_adj[v].neighbors = neighbors;
    }

    /// Removes the vertex and returns it.
    ///
    /// With `RemoveMode::Strict`, this fails with `DanglingReference` if any
    /// face uses the vertex (and nothing is changed). With
    /// `RemoveMode::Cascade`, those faces are removed first.
    pub fn remove_vertex(&mut self, v: VertexHandle, mode: RemoveMode) -> Result<Vertex> {
        self.check_vertex(v)?;

        let incident = self.vertex_adj[v].faces.clone();
        if !incident.is_empty() {
            match mode {
                RemoveMode::Strict => {
                    return Err(Error::DanglingReference { vertex: v, faces: incident.len() });
                }
                RemoveMode::Cascade => {
                    trace!("removing {} faces around {:?}", incident.len(), v);
                    for f in incident {
                        self.remove_face(f)?;
                    }
                }
            }
        }

        self.vertex_adj.remove(v);
        self.vertex_data.on_remove(v);
        self.vertices.remove(v).ok_or_else(|| Error::invalid_handle(v))
    }

    /// Removes all holes from the element arenas: afterwards, the vertex
    /// handles are `0..num_vertices` and the face handles `0..num_faces`.
    /// The relative order of elements is preserved.
    ///
    /// **All handles obtained before calling this method are invalid
    /// afterwards.** Attribute columns are compacted as well.
    pub fn compact(&mut self) {
        if self.vertices.is_compact() && self.faces.is_compact() {
            return;
        }

        debug!(
            "compacting mesh ({} vertices in {} slots, {} faces in {} slots)",
            self.vertices.num_elements(),
            self.vertices.index_space(),
            self.faces.num_elements(),
            self.faces.index_space(),
        );

        let mut vmap = DenseMap::<VertexHandle, VertexHandle>::new();
        let mut fmap = DenseMap::<FaceHandle, FaceHandle>::new();
        self.vertices = self.vertices.compacted(|old, new| { vmap.insert(old, new); });
        self.faces = self.faces.compacted(|old, new| { fmap.insert(old, new); });
        self.vertex_adj = self.vertex_adj.compacted(|_, _| {});

        for face in self.faces.values_mut() {
            for v in face.vertices_mut() {
                *v = vmap[*v];
            }
        }
        for adj in self.vertex_adj.values_mut() {
            for f in &mut adj.faces {
                *f = fmap[*f];
            }
            for v in &mut adj.neighbors {
                *v = vmap[*v];
            }
        }

        // Remapping is monotonic, so the order of every pair is preserved.
        let old_edges = std::mem::replace(&mut self.edges, FxHashMap::default());
        self.edges.reserve(old_edges.len());
        for (pair, faces) in old_edges {
            let pair = VertexPair::new(vmap[pair.first()], vmap[pair.second()]);
            let faces = faces.into_iter().map(|f| fmap[f]).collect();
            self.edges.insert(pair, faces);
        }

        self.vertex_data.on_compact();
        self.face_data.on_compact();
    }

    // ===== Element access ==================================================

    /// Returns a reference to the vertex or `InvalidHandle` if it doesn't
    /// exist.
    pub fn vertex(&self, v: VertexHandle) -> Result<VertexRef<'_>> {
        self.check_vertex(v)?;
        Ok(VertexRef::new(self, v))
    }

    pub fn vertex_mut(&mut self, v: VertexHandle) -> Result<VertexRefMut<'_>> {
        self.check_vertex(v)?;
        Ok(VertexRefMut::new(self, v))
    }

    /// Returns a reference to the face or `InvalidHandle` if it doesn't
    /// exist.
    pub fn face(&self, f: FaceHandle) -> Result<FaceRef<'_>> {
        self.check_face(f)?;
        Ok(FaceRef::new(self, f))
    }

    pub fn face_mut(&mut self, f: FaceHandle) -> Result<FaceRefMut<'_>> {
        self.check_face(f)?;
        Ok(FaceRefMut::new(self, f))
    }

    pub fn position(&self, v: VertexHandle) -> Result<Point3<f32>> {
        self.vertices.get(v)
            .map(|vertex| vertex.position)
            .ok_or_else(|| Error::invalid_handle(v))
    }

    /// The boundary of the face in winding order.
    pub fn vertices_of_face(&self, f: FaceHandle) -> Result<&[VertexHandle]> {
        self.faces.get(f)
            .map(|face| face.vertices())
            .ok_or_else(|| Error::invalid_handle(f))
    }

    /// All vertices in handle order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexRef<'_>> + Clone + '_ {
        self.vertices.handles().map(move |v| VertexRef::new(self, v))
    }

    /// All faces in handle order.
    pub fn faces(&self) -> impl Iterator<Item = FaceRef<'_>> + Clone + '_ {
        self.faces.handles().map(move |f| FaceRef::new(self, f))
    }

    pub fn vertex_handles(&self) -> impl Iterator<Item = VertexHandle> + Clone + '_ {
        self.vertices.handles()
    }

    pub fn face_handles(&self) -> impl Iterator<Item = FaceHandle> + Clone + '_ {
        self.faces.handles()
    }

    // ===== Adjacency queries ===============================================

    /// Circulates over the faces using `v`, in the order they were added.
    pub fn faces_around_vertex(&self, v: VertexHandle) -> Result<FacesAroundVertex<'_>> {
        self.check_vertex(v)?;
        Ok(FacesAroundVertex::new(&self.vertex_adj[v].faces))
    }

    /// Circulates over the vertices sharing an edge with `v`. The order is
    /// the order in which the edges first appeared: for each face (in the
    /// order they were added), the vertex before `v` and then the vertex
    /// after `v` along the boundary.
    pub fn vertices_around_vertex(&self, v: VertexHandle) -> Result<VerticesAroundVertex<'_>> {
        self.check_vertex(v)?;
        Ok(VerticesAroundVertex::new(&self.vertex_adj[v].neighbors))
    }

    /// Like `faces_around_vertex`, but only yields triangles.
    pub fn triangles_around_vertex(&self, v: VertexHandle) -> Result<TrianglesAroundVertex<'_>> {
        self.check_vertex(v)?;
        Ok(TrianglesAroundVertex::new(self, &self.vertex_adj[v].faces))
    }

    /// The faces containing the given edge. Empty if no face contains it.
    pub fn faces_of_edge(&self, edge: VertexPair) -> &[FaceHandle] {
        self.edges.get(&edge).map(|faces| faces.as_slice()).unwrap_or(&[])
    }

    /// All edges with the faces containing them. The iteration order is
    /// unspecified.
    pub fn edges(&self) -> impl Iterator<Item = (VertexPair, &[FaceHandle])> + '_ {
        self.edges.iter().map(|(pair, faces)| (*pair, faces.as_slice()))
    }

    /// Returns all faces sharing at least one edge with `f` (without `f`
    /// itself). Faces are ordered by the first shared edge along the
    /// boundary of `f`.
    pub fn faces_around_face(&self, f: FaceHandle) -> Result<SmallVec<[FaceHandle; 4]>> {
        let face = self.faces.get(f).ok_or_else(|| Error::invalid_handle(f))?;

        let mut out = SmallVec::new();
        for pair in face.edges() {
            for &other in self.faces_of_edge(pair) {
                if other != f && !out.contains(&other) {
                    out.push(other);
                }
            }
        }

        Ok(out)
    }

    /// Returns `true` if the faces share at least one edge. A face is not
    /// adjacent to itself.
    pub fn are_adjacent_faces(&self, a: FaceHandle, b: FaceHandle) -> Result<bool> {
        self.check_face(b)?;
        let face = self.faces.get(a).ok_or_else(|| Error::invalid_handle(a))?;
        Ok(a != b && face.edges().iter().any(|pair| self.faces_of_edge(*pair).contains(&b)))
    }

    /// Returns `true` if the vertex is incident to an edge that belongs to
    /// exactly one face. Isolated vertices are not boundary vertices.
    pub fn is_boundary_vertex(&self, v: VertexHandle) -> Result<bool> {
        self.check_vertex(v)?;
        Ok(self.vertex_adj[v].neighbors.iter().any(|&w| {
            self.faces_of_edge(VertexPair::new(v, w)).len() == 1
        }))
    }

    // ===== Extra data ======================================================

    pub fn vertex_data(&self) -> &AttrStore<VertexHandle> {
        &self.vertex_data
    }

    pub fn vertex_data_mut(&mut self) -> &mut AttrStore<VertexHandle> {
        &mut self.vertex_data
    }

    pub fn face_data(&self) -> &AttrStore<FaceHandle> {
        &self.face_data
    }

    pub fn face_data_mut(&mut self) -> &mut AttrStore<FaceHandle> {
        &mut self.face_data
    }

    /// Attaches the attribute `A`, with the default value for every element.
    pub fn attach<A: ExtraData>(&mut self) -> Result<()> {
        A::Handle::store_mut(self).attach::<A::Value>(A::NAME).map(|_| ())
    }

    pub fn detach<A: ExtraData>(&mut self) -> Result<()> {
        A::Handle::store_mut(self).detach(A::NAME).map(|_| ())
    }

    /// Returns `true` if the attribute `A` is attached.
    pub fn has<A: ExtraData>(&self) -> bool {
        A::Handle::store(self).kind_of(A::NAME) == Some(<A::Value as AttrType>::KIND)
    }

    pub fn get<A: ExtraData>(&self, handle: A::Handle) -> Result<&A::Value> {
        A::Handle::store(self).get(A::NAME, handle)
    }

    /// Sets the value of `A` for the given element and returns the old one.
    pub fn set<A: ExtraData>(&mut self, handle: A::Handle, value: A::Value) -> Result<A::Value> {
        A::Handle::store_mut(self).set(A::NAME, handle, value)
    }

    pub fn column<A: ExtraData>(&self) -> Result<&DenseMap<A::Handle, A::Value>> {
        A::Handle::store(self).column(A::NAME)
    }

    pub fn material_table(&self) -> Option<&MaterialTable> {
        self.material_table.as_ref()
    }

    /// Returns the material table, creating an empty one if necessary.
    pub fn material_table_mut(&mut self) -> &mut MaterialTable {
        self.material_table.get_or_insert_with(MaterialTable::new)
    }

    pub fn set_material_table(&mut self, table: Option<MaterialTable>) {
        self.material_table = table;
    }

    // ===== Integrity =======================================================

    /// Checks the mesh for topological problems. See [`integrity::check`].
    pub fn check_integrity(&self) -> IntegrityReport {
        integrity::check(self)
    }

    // ===== Helpers =========================================================

    fn check_vertex(&self, v: VertexHandle) -> Result<()> {
        if self.vertices.contains_handle(v) {
            Ok(())
        } else {
            Err(Error::invalid_handle(v))
        }
    }

    fn check_face(&self, f: FaceHandle) -> Result<()> {
        if self.faces.contains_handle(f) {
            Ok(())
        } else {
            Err(Error::invalid_handle(f))
        }
    }
}
