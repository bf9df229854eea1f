//! End-to-end scenarios on the public API.

use ringmesh::{
    prelude::*,
    Error, Mesh, RemoveMode, VertexPair,
    attr::kinds::{BoundaryVertex, TexCoord},
    integrity::{Finding, Severity},
    io::obj,
};


#[test]
fn unit_triangle() {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex([0.0, 0.0, 0.0]);
    let b = mesh.add_vertex([1.0, 0.0, 0.0]);
    let c = mesh.add_vertex([0.0, 1.0, 0.0]);
    let f = mesh.add_triangle([a, b, c]).unwrap();

    assert_eq!(mesh.num_edges(), 3);
    assert_eq!(mesh.faces_of_edge(VertexPair::new(b, a)), &[f]);

    let report = mesh.check_integrity();
    assert_eq!(report.boundary_edge_count(), 3);
    assert_eq!(report.non_manifold_edge_count(), 0);
    assert!(report.is_clean());
    assert!(report.is_manifold());
    assert!(!report.is_closed());
    assert_eq!(report.count(Severity::Info), 3);
}

#[test]
fn two_triangles_sharing_an_edge() {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex([0.0, 1.0, 0.0]);
    let b = mesh.add_vertex([0.0, 0.0, 0.0]);
    let c = mesh.add_vertex([1.0, 0.0, 0.0]);
    let d = mesh.add_vertex([1.0, 1.0, 0.0]);
    let f0 = mesh.add_triangle([a, b, c]).unwrap();
    let f1 = mesh.add_triangle([a, c, d]).unwrap();

    assert_eq!(mesh.faces_of_edge(VertexPair::new(c, a)), &[f0, f1]);
    assert_eq!(mesh.check_integrity().boundary_edge_count(), 4);
    assert_eq!(mesh.vertex(a).unwrap().degree(), 3);
    assert_eq!(mesh.face(f0).unwrap().adjacent_faces().map(|f| f.handle()).collect::<Vec<_>>(), vec![f1]);
}

#[test]
fn non_manifold_fan() {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex([0.0, 0.0, 0.0]);
    let b = mesh.add_vertex([1.0, 0.0, 0.0]);
    let others = [
        mesh.add_vertex([0.0, 1.0, 0.0]),
        mesh.add_vertex([0.0, -1.0, 0.0]),
        mesh.add_vertex([0.0, 0.0, 1.0]),
    ];
    for &o in &others {
        mesh.add_triangle([a, b, o]).unwrap();
    }

    let report = mesh.check_integrity();
    assert!(!report.is_manifold());
    assert_eq!(report.non_manifold_edge_count(), 1);
    assert!(report.findings().iter().any(|f| match f {
        Finding::NonManifoldEdge { edge, faces } => *edge == VertexPair::new(a, b) && faces.len() == 3,
        _ => false,
    }));
}

#[test]
fn isolated_vertex_has_empty_circulation_and_strict_removal_works() {
    let mut mesh = Mesh::new();
    let v = mesh.add_vertex([1.0, 2.0, 3.0]);

    assert_eq!(mesh.faces_around_vertex(v).unwrap().count(), 0);
    assert_eq!(mesh.vertices_around_vertex(v).unwrap().count(), 0);
    assert!(!mesh.is_boundary_vertex(v).unwrap());
    assert_eq!(mesh.check_integrity().isolated_vertex_count(), 1);

    let removed = mesh.remove_vertex(v, RemoveMode::Strict).unwrap();
    assert_eq!(removed.position, [1.0, 2.0, 3.0].into());
    assert!(mesh.is_empty());
    assert!(matches!(mesh.vertex(v), Err(Error::InvalidHandle { .. })));
}

#[test]
fn bool_column_shrinks_with_vertex_removal() {
    let mut mesh = Mesh::new();
    let vs = (0..4).map(|i| mesh.add_vertex([i as f32, 0.0, 0.0])).collect::<Vec<_>>();
    mesh.vertex_data_mut().attach::<bool>("selected").unwrap();
    mesh.vertex_data_mut().set("selected", vs[3], true).unwrap();

    mesh.remove_vertex(vs[1], RemoveMode::Strict).unwrap();

    let column = mesh.vertex_data().column::<bool>("selected").unwrap();
    assert_eq!(column.num_elements(), 3);
    assert_eq!(mesh.vertex_data().get::<bool>("selected", vs[3]).unwrap(), &true);
    assert_eq!(mesh.vertex_data().get::<bool>("selected", vs[0]).unwrap(), &false);
    assert!(mesh.vertex_data().get::<bool>("selected", vs[1]).is_err());
}

#[test]
fn face_with_two_distinct_vertices_is_rejected() {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex([0.0, 0.0, 0.0]);
    let b = mesh.add_vertex([1.0, 0.0, 0.0]);

    assert!(matches!(mesh.add_face(&[a, b, a]), Err(Error::InvalidTopology(_))));
    assert_eq!(mesh.num_faces(), 0);
    assert_eq!(mesh.num_edges(), 0);
    assert_eq!(mesh.vertices_around_vertex(a).unwrap().count(), 0);
}

#[test]
fn closed_tetrahedron_with_derived_data() {
    let mut mesh = Mesh::new();
    let o = mesh.add_vertex([0.0, 0.0, 0.0]);
    let x = mesh.add_vertex([1.0, 0.0, 0.0]);
    let y = mesh.add_vertex([0.0, 1.0, 0.0]);
    let z = mesh.add_vertex([0.0, 0.0, 1.0]);
    for &face in &[[o, y, x], [o, x, z], [o, z, y], [x, y, z]] {
        mesh.add_triangle(face).unwrap();
    }

    let report = mesh.check_integrity();
    assert!(report.is_closed());
    assert!(report.is_clean());
    assert_eq!(report.edge_count, 6);

    mesh.compute_boundary_vertices().unwrap();
    assert!(mesh.vertices().all(|v| !*v.get::<BoundaryVertex>().unwrap()));

    mesh.compute_smooth_vertex_normals(true).unwrap();
    assert!(!mesh.has::<ringmesh::attr::kinds::FlatVertexNormals>());
}

#[test]
fn load_export_load_keeps_counts_and_values() {
    const SRC: &str = "\
mtllib scene.mtl
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
usemtl red
f 1/1 2/2 3/3
usemtl blue
f 1/1 3/3 4/4
";

    let first = obj::Reader::new(SRC.as_bytes()).read(Default::default()).unwrap();
    let exported = obj::Writer::new(&first).write_to_memory().unwrap();
    let second = obj::Reader::new(&exported[..]).read(Default::default()).unwrap();

    assert_eq!(second.num_vertices(), 4);
    assert_eq!(second.num_faces(), 2);
    assert_eq!(second.material_table(), first.material_table());
    for v in first.vertex_handles() {
        assert_eq!(second.get::<TexCoord>(v).unwrap(), first.get::<TexCoord>(v).unwrap());
        assert_eq!(second.position(v).unwrap(), first.position(v).unwrap());
    }

    let again = obj::Writer::new(&second).write_to_memory().unwrap();
    assert_eq!(exported, again);
}
