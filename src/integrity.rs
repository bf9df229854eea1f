//! Checking a mesh for topological problems.
//!
//! The checker is read-only. It recomputes the edge → faces relation from
//! the faces alone and compares the mesh's cached adjacency tables against
//! it. Problems are reported as data ([`Finding`]s), not as errors.

use std::fmt;

use derive_more::Display;
use fxhash::FxHashMap;
use log::debug;
use smallvec::SmallVec;

use crate::{
    handle::{hsize, FaceHandle, VertexHandle},
    mesh::Mesh,
    primitive::VertexPair,
};


/// How bad a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Severity {
    /// Normal for open meshes.
    #[display(fmt = "info")]
    Info,

    /// Valid but probably unwanted.
    #[display(fmt = "warning")]
    Warning,

    /// The mesh's internal tables are inconsistent. This never happens
    /// through the public API.
    #[display(fmt = "fatal")]
    Fatal,
}

/// Which two tables disagree in an [`Finding::AdjacencyAsymmetry`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Asymmetry {
    /// The vertex lists the face as incident, but the face doesn't contain
    /// the vertex (or doesn't exist).
    VertexToFace { vertex: VertexHandle, face: FaceHandle },

    /// The face contains the vertex, but the vertex doesn't list the face.
    FaceToVertex { face: FaceHandle, vertex: VertexHandle },

    /// The neighbor lists of the two vertices don't agree with the edges of
    /// the faces.
    VertexToVertex { vertex: VertexHandle, other: VertexHandle },

    /// The cached faces of the edge differ from the faces containing it.
    EdgeTable { edge: VertexPair },
}

/// A single problem found by [`check`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Finding {
    /// A face references the same vertex more than once.
    DegenerateFace {
        face: FaceHandle,
        repeated: Vec<VertexHandle>,
    },

    /// More than two faces share the edge.
    NonManifoldEdge {
        edge: VertexPair,
        faces: Vec<FaceHandle>,
    },

    /// Exactly one face contains the edge.
    BoundaryEdge {
        edge: VertexPair,
        face: FaceHandle,
    },

    /// No face uses the vertex.
    IsolatedVertex {
        vertex: VertexHandle,
    },

    /// A face references a vertex that doesn't exist.
    InvalidVertexReference {
        face: FaceHandle,
        vertex: VertexHandle,
    },

    /// The adjacency tables contradict each other.
    AdjacencyAsymmetry(Asymmetry),
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::BoundaryEdge { .. } => Severity::Info,
            Finding::DegenerateFace { .. }
            | Finding::NonManifoldEdge { .. }
            | Finding::IsolatedVertex { .. } => Severity::Warning,
            Finding::InvalidVertexReference { .. }
            | Finding::AdjacencyAsymmetry(_) => Severity::Fatal,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Finding::DegenerateFace { face, repeated } => {
                write!(f, "face {:?} repeats vertices {:?}", face, repeated)
            }
            Finding::NonManifoldEdge { edge, faces } => {
                write!(f, "edge {} is shared by {} faces {:?}", edge, faces.len(), faces)
            }
            Finding::BoundaryEdge { edge, face } => {
                write!(f, "edge {} is a boundary edge of face {:?}", edge, face)
            }
            Finding::IsolatedVertex { vertex } => write!(f, "vertex {:?} is isolated", vertex),
            Finding::InvalidVertexReference { face, vertex } => {
                write!(f, "face {:?} references non-existent vertex {:?}", face, vertex)
            }
            Finding::AdjacencyAsymmetry(a) => match a {
                Asymmetry::VertexToFace { vertex, face } => write!(
                    f,
                    "vertex {:?} lists face {:?}, but the face doesn't contain it",
                    vertex,
                    face,
                ),
                Asymmetry::FaceToVertex { face, vertex } => write!(
                    f,
                    "face {:?} contains vertex {:?}, but the vertex doesn't list it",
                    face,
                    vertex,
                ),
                Asymmetry::VertexToVertex { vertex, other } => write!(
                    f,
                    "neighbor tables of {:?} and {:?} disagree with the face edges",
                    vertex,
                    other,
                ),
                Asymmetry::EdgeTable { edge } => {
                    write!(f, "cached faces of edge {} are out of date", edge)
                }
            },
        }
    }
}


/// The result of [`check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityReport {
    pub vertex_count: hsize,
    pub face_count: hsize,
    pub edge_count: hsize,
    findings: Vec<Finding>,
}

impl IntegrityReport {
    /// All findings, in a deterministic order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity() == severity).count()
    }

    /// Returns `true` if the mesh's tables are inconsistent.
    pub fn is_fatal(&self) -> bool {
        self.count(Severity::Fatal) > 0
    }

    /// Returns `true` if there are no warnings and no fatal findings.
    pub fn is_clean(&self) -> bool {
        self.findings.iter().all(|f| f.severity() == Severity::Info)
    }

    /// No edge is shared by more than two faces.
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count() == 0
    }

    /// Every edge is shared by exactly two faces.
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0 && self.is_manifold()
    }

    pub fn boundary_edge_count(&self) -> usize {
        self.count_matching(|f| matches!(f, Finding::BoundaryEdge { .. }))
    }

    pub fn non_manifold_edge_count(&self) -> usize {
        self.count_matching(|f| matches!(f, Finding::NonManifoldEdge { .. }))
    }

    pub fn degenerate_face_count(&self) -> usize {
        self.count_matching(|f| matches!(f, Finding::DegenerateFace { .. }))
    }

    pub fn isolated_vertex_count(&self) -> usize {
        self.count_matching(|f| matches!(f, Finding::IsolatedVertex { .. }))
    }

    fn count_matching(&self, pred: impl Fn(&Finding) -> bool) -> usize {
        self.findings.iter().filter(|f| pred(f)).count()
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |b: bool| if b { "Yes" } else { "No" };

        writeln!(f, "Integrity Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(f)?;
        writeln!(f, "  Status:")?;
        writeln!(f, "    Consistent: {}", yes_no(!self.is_fatal()))?;
        writeln!(f, "    Manifold: {}", yes_no(self.is_manifold()))?;
        writeln!(f, "    Closed: {}", yes_no(self.is_closed()))?;

        if !self.findings.is_empty() {
            writeln!(f)?;
            writeln!(f, "  Counts:")?;
            let counts = [
                ("Boundary edges", self.boundary_edge_count()),
                ("Non-manifold edges", self.non_manifold_edge_count()),
                ("Degenerate faces", self.degenerate_face_count()),
                ("Isolated vertices", self.isolated_vertex_count()),
                ("Fatal", self.count(Severity::Fatal)),
            ];
            for (label, count) in counts.iter().filter(|(_, c)| *c > 0) {
                writeln!(f, "    {}: {}", label, count)?;
            }

            let problems = self.findings.iter().filter(|f| f.severity() != Severity::Info);
            for finding in problems {
                writeln!(f, "    [{}] {}", finding.severity(), finding)?;
            }
        }

        Ok(())
    }
}


/// Checks the mesh and returns a report of all findings.
///
/// ```
/// use ringmesh::{Mesh, integrity};
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex([0.0, 0.0, 0.0]);
/// let b = mesh.add_vertex([1.0, 0.0, 0.0]);
/// let c = mesh.add_vertex([0.0, 1.0, 0.0]);
/// mesh.add_triangle([a, b, c]).unwrap();
///
/// let report = integrity::check(&mesh);
/// assert_eq!(report.boundary_edge_count(), 3);
/// assert!(report.is_manifold());
/// assert!(!report.is_fatal());
/// ```
pub fn check(mesh: &Mesh) -> IntegrityReport {
    let mut findings = Vec::new();

    // ----- Faces → vertices, and the edge relation derived from faces -----
    let mut edges: FxHashMap<VertexPair, SmallVec<[FaceHandle; 2]>> = FxHashMap::default();
    for (f, face) in mesh.faces.iter() {
        for &v in face.vertices() {
            match mesh.vertex_adj.get(v) {
                None => findings.push(Finding::InvalidVertexReference { face: f, vertex: v }),
                Some(adj) if !adj.faces.contains(&f) => {
                    findings.push(Finding::AdjacencyAsymmetry(
                        Asymmetry::FaceToVertex { face: f, vertex: v }
                    ));
                }
                Some(_) => {}
            }
        }

        if face.has_repeated_vertex() {
            let vs = face.vertices();
            let mut repeated = vs.iter()
                .enumerate()
                .filter(|(i, v)| vs[..*i].contains(v))
                .map(|(_, v)| *v)
                .collect::<Vec<_>>();
            repeated.sort();
            repeated.dedup();
            findings.push(Finding::DegenerateFace { face: f, repeated });
        }

        for pair in face.edges() {
            edges.entry(pair).or_default().push(f);
        }
    }

    // ----- Vertices → faces and vertices ----------------------------------
    for (v, adj) in mesh.vertex_adj.iter() {
        for &f in &adj.faces {
            let contains = mesh.faces.get(f).map(|face| face.contains(v)).unwrap_or(false);
            if !contains {
                findings.push(Finding::AdjacencyAsymmetry(
                    Asymmetry::VertexToFace { vertex: v, face: f }
                ));
            }
        }

        for &w in &adj.neighbors {
            let mirrored = mesh.vertex_adj.get(w).map(|a| a.neighbors.contains(&v)).unwrap_or(false);
            let is_edge = VertexPair::try_new(v, w).map(|p| edges.contains_key(&p)).unwrap_or(false);
            if !mirrored || !is_edge {
                findings.push(Finding::AdjacencyAsymmetry(
                    Asymmetry::VertexToVertex { vertex: v, other: w }
                ));
            }
        }

        if adj.faces.is_empty() && adj.neighbors.is_empty() {
            findings.push(Finding::IsolatedVertex { vertex: v });
        }
    }

    // ----- Edges ------------------------------------------------------------
    for (&edge, faces) in &edges {
        for &(v, w) in &[(edge.first(), edge.second()), (edge.second(), edge.first())] {
            let listed = mesh.vertex_adj.get(v).map(|a| a.neighbors.contains(&w)).unwrap_or(true);
            if !listed {
                findings.push(Finding::AdjacencyAsymmetry(
                    Asymmetry::VertexToVertex { vertex: v, other: w }
                ));
            }
        }

        let cached_matches = mesh.edges.get(&edge)
            .map(|cached| same_set(cached, faces))
            .unwrap_or(false);
        if !cached_matches {
            findings.push(Finding::AdjacencyAsymmetry(Asymmetry::EdgeTable { edge }));
        }

        match faces.len() {
            1 => findings.push(Finding::BoundaryEdge { edge, face: faces[0] }),
            2 => {}
            _ => findings.push(Finding::NonManifoldEdge { edge, faces: faces.to_vec() }),
        }
    }
    for edge in mesh.edges.keys().filter(|e| !edges.contains_key(e)) {
        findings.push(Finding::AdjacencyAsymmetry(Asymmetry::EdgeTable { edge: *edge }));
    }

    findings.sort();
    findings.dedup();

    let report = IntegrityReport {
        vertex_count: mesh.num_vertices(),
        face_count: mesh.num_faces(),
        edge_count: edges.len() as hsize,
        findings,
    };
    debug!(
        "integrity check: {} findings ({} fatal)",
        report.findings.len(),
        report.count(Severity::Fatal),
    );

    report
}

fn same_set(a: &[FaceHandle], b: &[FaceHandle]) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x))
}
