use proptest::prelude::*;

use crate::{
    error::Error,
    handle::{FaceHandle, Handle, VertexHandle},
    integrity::Severity,
    primitive::VertexPair,
    test_utils::{grid, two_triangles, unit_triangle},
};
use super::*;


/// Checks that the face lists, the neighbor lists and the edge table agree
/// with each other in both directions.
fn assert_symmetric(mesh: &Mesh) {
    for f in mesh.face_handles() {
        for &v in mesh.vertices_of_face(f).unwrap() {
            assert!(
                mesh.faces_around_vertex(v).unwrap().any(|x| x == f),
                "{:?} is in {:?}, but doesn't list it",
                v,
                f,
            );
        }
    }

    for v in mesh.vertex_handles() {
        for f in mesh.faces_around_vertex(v).unwrap() {
            assert!(mesh.vertices_of_face(f).unwrap().contains(&v));
        }
        for w in mesh.vertices_around_vertex(v).unwrap() {
            assert!(mesh.vertices_around_vertex(w).unwrap().any(|x| x == v));
            assert!(!mesh.faces_of_edge(VertexPair::new(v, w)).is_empty());
        }
    }

    for (pair, faces) in mesh.edges() {
        assert!(!faces.is_empty());
        for &f in faces {
            assert!(mesh.face(f).unwrap().edges().any(|e| e == pair));
        }
    }

    assert!(!mesh.check_integrity().is_fatal());
}

#[test]
fn empty() {
    let mesh = Mesh::new();
    assert!(mesh.is_empty());
    assert_eq!(mesh.num_vertices(), 0);
    assert_eq!(mesh.num_faces(), 0);
    assert_eq!(mesh.num_edges(), 0);
    assert!(mesh.check_integrity().findings().is_empty());
}

#[test]
fn single_triangle() {
    let (mesh, [a, b, c], f) = unit_triangle();

    assert_eq!(mesh.num_vertices(), 3);
    assert_eq!(mesh.num_faces(), 1);
    assert_eq!(mesh.num_edges(), 3);
    assert_eq!(mesh.vertices_of_face(f).unwrap(), &[a, b, c]);
    for pair in &[VertexPair::new(a, b), VertexPair::new(b, c), VertexPair::new(c, a)] {
        assert_eq!(mesh.faces_of_edge(*pair), &[f]);
    }
    for &v in &[a, b, c] {
        assert!(mesh.is_boundary_vertex(v).unwrap());
    }

    let report = mesh.check_integrity();
    assert_eq!(report.boundary_edge_count(), 3);
    assert!(report.is_manifold());
    assert_symmetric(&mesh);
}

#[test]
fn shared_edge() {
    let (mesh, [a, b, c, d], [f0, f1]) = two_triangles();

    assert_eq!(mesh.num_edges(), 5);
    assert_eq!(mesh.faces_of_edge(VertexPair::new(c, a)), &[f0, f1]);
    assert_eq!(mesh.faces_of_edge(VertexPair::new(b, d)), &[] as &[FaceHandle]);
    assert_eq!(mesh.faces_around_face(f0).unwrap().as_slice(), &[f1]);
    assert!(mesh.are_adjacent_faces(f1, f0).unwrap());
    assert!(!mesh.are_adjacent_faces(f0, f0).unwrap());

    // Neighbors in the order the edges first appeared
    let around_a = mesh.vertices_around_vertex(a).unwrap().collect::<Vec<_>>();
    assert_eq!(around_a, vec![c, b, d]);

    let report = mesh.check_integrity();
    assert_eq!(report.boundary_edge_count(), 4);
    assert_eq!(report.non_manifold_edge_count(), 0);
    assert_symmetric(&mesh);
}

#[test]
fn add_face_errors() {
    let (mut mesh, [a, b, _], _) = unit_triangle();

    let res = mesh.add_face(&[a, b]);
    assert!(matches!(res, Err(Error::InvalidTopology(_))));
    let res = mesh.add_face(&[a, b, a, b]);
    assert!(matches!(res, Err(Error::InvalidTopology(_))));

    // Handle validation comes first
    let ghost = VertexHandle::new(17);
    let res = mesh.add_face(&[a, ghost]);
    assert!(matches!(res, Err(Error::InvalidHandle { idx: 17, .. })));

    // Nothing changed
    assert_eq!(mesh.num_faces(), 1);
    assert_eq!(mesh.num_edges(), 3);
    assert_symmetric(&mesh);
}

#[test]
fn repeated_vertex_is_allowed() {
    let (mut mesh, [a, b, c], _) = unit_triangle();
    let f = mesh.add_face(&[a, b, b, c]).unwrap();

    assert_eq!(mesh.face(f).unwrap().edges().count(), 3);
    assert_eq!(mesh.faces_of_edge(VertexPair::new(a, b)).len(), 2);
    assert_eq!(mesh.check_integrity().degenerate_face_count(), 1);
    assert_symmetric(&mesh);
}

#[test]
fn stale_handles() {
    let (mut mesh, [a, b, c], f) = unit_triangle();
    mesh.remove_face(f).unwrap();

    assert!(matches!(mesh.face(f), Err(Error::InvalidHandle { .. })));
    assert!(matches!(mesh.remove_face(f), Err(Error::InvalidHandle { .. })));
    assert!(matches!(mesh.faces_around_face(f), Err(Error::InvalidHandle { .. })));

    mesh.remove_vertex(a, RemoveMode::Strict).unwrap();
    assert!(!mesh.contains_vertex(a));
    assert!(matches!(mesh.position(a), Err(Error::InvalidHandle { .. })));
    assert!(matches!(mesh.add_triangle([a, b, c]), Err(Error::InvalidHandle { .. })));
    assert!(matches!(
        mesh.vertices_around_vertex(a).map(|it| it.count()),
        Err(Error::InvalidHandle { .. })
    ));

    // A removed handle is never reused by `add_vertex`
    let d = mesh.add_vertex([1.0, 1.0, 1.0]);
    assert_ne!(d, a);
    assert_panic!(mesh.vertices[a]);
}

#[test]
fn remove_face_updates_neighbors() {
    let (mut mesh, [a, b, c, d], [f0, _]) = two_triangles();
    mesh.remove_face(f0).unwrap();

    assert_eq!(mesh.num_faces(), 1);
    assert_eq!(mesh.num_edges(), 3);
    assert!(mesh.vertices_around_vertex(b).unwrap().next().is_none());
    // Only [a, c, d] is left: predecessor d, then successor c
    assert_eq!(mesh.vertices_around_vertex(a).unwrap().collect::<Vec<_>>(), vec![d, c]);
    assert!(mesh.vertex(b).unwrap().is_isolated());
    assert_symmetric(&mesh);
}

#[test]
fn ring_order_after_removal_matches_fresh_mesh() {
    let mut mesh = Mesh::new();
    let v = mesh.add_vertex([0.0, 0.0, 0.0]);
    let a = mesh.add_vertex([1.0, 0.0, 0.0]);
    let b = mesh.add_vertex([1.0, 1.0, 0.0]);
    let c = mesh.add_vertex([0.0, 1.0, 0.0]);
    let f0 = mesh.add_triangle([v, a, b]).unwrap();
    mesh.add_triangle([v, b, c]).unwrap();
    assert_eq!(mesh.vertices_around_vertex(v).unwrap().collect::<Vec<_>>(), vec![b, a, c]);

    mesh.remove_face(f0).unwrap();
    assert_eq!(mesh.vertices_around_vertex(v).unwrap().collect::<Vec<_>>(), vec![c, b]);
    assert_eq!(mesh.vertices_around_vertex(b).unwrap().collect::<Vec<_>>(), vec![v, c]);
    assert!(mesh.vertex(a).unwrap().is_isolated());

    let mut fresh = Mesh::new();
    let handles = mesh.vertex_handles()
        .map(|h| fresh.add_vertex(mesh.position(h).unwrap()))
        .collect::<Vec<_>>();
    for face in mesh.faces() {
        let vs = face.vertices().iter().map(|h| handles[h.idx() as usize]).collect::<Vec<_>>();
        fresh.add_face(&vs).unwrap();
    }
    for h in mesh.vertex_handles() {
        assert_eq!(
            fresh.vertices_around_vertex(h).unwrap().collect::<Vec<_>>(),
            mesh.vertices_around_vertex(h).unwrap().collect::<Vec<_>>(),
        );
    }
    assert_symmetric(&mesh);
}

#[test]
fn isolated_vertex() {
    let (mut mesh, _, _) = unit_triangle();
    let v = mesh.add_vertex([3.0, 3.0, 3.0]);

    assert_eq!(mesh.faces_around_vertex(v).unwrap().count(), 0);
    assert_eq!(mesh.vertices_around_vertex(v).unwrap().count(), 0);
    assert!(!mesh.is_boundary_vertex(v).unwrap());
    assert_eq!(mesh.check_integrity().isolated_vertex_count(), 1);

    mesh.remove_vertex(v, RemoveMode::Strict).unwrap();
    assert_eq!(mesh.num_vertices(), 3);
    assert!(mesh.check_integrity().findings().iter().all(|f| f.severity() == Severity::Info));
}

#[test]
fn strict_removal_leaves_mesh_unchanged() {
    let (mut mesh, [a, ..], _) = two_triangles();
    let before = format!("{:?}", mesh.check_integrity());

    let res = mesh.remove_vertex(a, RemoveMode::Strict);
    assert!(matches!(res, Err(Error::DanglingReference { faces: 2, .. })));
    assert!(mesh.contains_vertex(a));
    assert_eq!(mesh.num_faces(), 2);
    assert_eq!(format!("{:?}", mesh.check_integrity()), before);
}

#[test]
fn cascade_removal() {
    let mut mesh = grid(2, 2);
    let center = mesh.vertex_handles().nth(4).unwrap();

    let removed = mesh.remove_vertex(center, RemoveMode::Cascade).unwrap();
    assert_eq!(removed.position, Point3::new(1.0, 1.0, 0.0));
    assert_eq!(mesh.num_vertices(), 8);
    assert_eq!(mesh.num_faces(), 2);

    // The ring around the removed vertex is now a boundary
    let report = mesh.check_integrity();
    assert!(!report.is_fatal());
    assert_eq!(report.isolated_vertex_count(), 2);
    assert_symmetric(&mesh);
}

#[test]
fn attribute_columns_follow_elements() {
    let (mut mesh, [a, b, c, d], [f0, f1]) = two_triangles();
    mesh.vertex_data_mut().attach::<bool>("selected").unwrap();
    mesh.face_data_mut().attach::<f32>("weight").unwrap();
    mesh.face_data_mut().set("weight", f1, 2.5f32).unwrap();

    let col = mesh.vertex_data().column::<bool>("selected").unwrap();
    assert_eq!(col.num_elements(), 4);

    mesh.remove_vertex(b, RemoveMode::Cascade).unwrap();
    let col = mesh.vertex_data().column::<bool>("selected").unwrap();
    assert_eq!(col.num_elements(), 3);
    assert!(col.get(b).is_none());
    assert!(col.get(a).is_some());
    assert_eq!(mesh.face_data().column::<f32>("weight").unwrap().num_elements(), 1);
    assert!(matches!(
        mesh.face_data().get::<f32>("weight", f0),
        Err(Error::InvalidHandle { .. })
    ));

    // New elements get the default value
    let e = mesh.add_vertex([2.0, 2.0, 0.0]);
    assert_eq!(mesh.vertex_data().get::<bool>("selected", e).unwrap(), &false);
    let f = mesh.add_triangle([c, d, e]).unwrap();
    assert_eq!(mesh.face_data().get::<f32>("weight", f).unwrap(), &0.0);
}

#[test]
fn compact_remaps_everything() {
    let mut mesh = grid(2, 1);
    mesh.vertex_data_mut().attach::<f32>("tag").unwrap();
    let handles = mesh.vertex_handles().collect::<Vec<_>>();
    for &v in &handles {
        mesh.vertex_data_mut().set("tag", v, v.idx() as f32).unwrap();
    }

    mesh.remove_vertex(handles[0], RemoveMode::Cascade).unwrap();
    mesh.compact();

    assert_eq!(mesh.num_vertices(), 5);
    assert_eq!(mesh.num_faces(), 2);
    assert!(mesh.vertices.is_compact());
    assert!(mesh.faces.is_compact());

    let vs = mesh.vertex_handles().collect::<Vec<_>>();
    assert_eq!(vs, (0..5).map(VertexHandle::new).collect::<Vec<_>>());
    let tags = vs.iter()
        .map(|&v| *mesh.vertex_data().get::<f32>("tag", v).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(tags, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

    // Old faces [V1, V2, V5] and [V1, V5, V4]
    let fs = mesh.face_handles().collect::<Vec<_>>();
    assert_rotated_eq!(mesh.vertices_of_face(fs[0]).unwrap().to_vec(), vec![vs[0], vs[1], vs[4]]);
    assert_rotated_eq!(mesh.vertices_of_face(fs[1]).unwrap().to_vec(), vec![vs[0], vs[4], vs[3]]);
    assert_eq!(mesh.faces_of_edge(VertexPair::new(vs[0], vs[4])), &[fs[0], fs[1]]);
    assert_symmetric(&mesh);
}

#[test]
fn compact_is_noop_without_holes() {
    let mut mesh = grid(1, 1);
    let before = mesh.vertex_handles().collect::<Vec<_>>();
    mesh.compact();
    assert_eq!(mesh.vertex_handles().collect::<Vec<_>>(), before);
    assert_symmetric(&mesh);
}

#[test]
fn vertex_pair_with_equal_vertices_panics() {
    let v = VertexHandle::new(0);
    assert_panic!(VertexPair::new(v, v));
}


#[derive(Debug, Clone)]
enum Op {
    AddVertex,
    AddFace(Vec<usize>),
    RemoveFace(usize),
    RemoveVertex(usize, bool),
    Compact,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::AddVertex),
        4 => prop::collection::vec(0..64usize, 2..6).prop_map(Op::AddFace),
        1 => (0..64usize).prop_map(Op::RemoveFace),
        1 => (0..64usize, any::<bool>()).prop_map(|(i, c)| Op::RemoveVertex(i, c)),
        1 => Just(Op::Compact),
    ]
}

/// Picks the `i`-th live element (modulo the count).
fn pick<H: Copy>(handles: impl Iterator<Item = H>, i: usize) -> Option<H> {
    let handles = handles.collect::<Vec<_>>();
    if handles.is_empty() {
        None
    } else {
        Some(handles[i % handles.len()])
    }
}

proptest! {
    #[test]
    fn random_edits_keep_adjacency_symmetric(ops in prop::collection::vec(op(), 1..60)) {
        let mut mesh = Mesh::new();
        for op in ops {
            match op {
                Op::AddVertex => {
                    let n = mesh.num_vertices() as f32;
                    mesh.add_vertex([n, n * n, 1.0]);
                }
                Op::AddFace(idx) => {
                    let vs = idx.iter()
                        .filter_map(|&i| pick(mesh.vertex_handles(), i))
                        .collect::<Vec<_>>();
                    let before = mesh.num_faces();
                    match mesh.add_face(&vs) {
                        Ok(_) => prop_assert!(distinct_count(&vs) >= 3),
                        Err(_) => prop_assert_eq!(mesh.num_faces(), before),
                    }
                }
                Op::RemoveFace(i) => {
                    if let Some(f) = pick(mesh.face_handles(), i) {
                        mesh.remove_face(f).unwrap();
                    }
                }
                Op::RemoveVertex(i, cascade) => {
                    if let Some(v) = pick(mesh.vertex_handles(), i) {
                        let mode = if cascade { RemoveMode::Cascade } else { RemoveMode::Strict };
                        let used = mesh.faces_around_vertex(v).unwrap().len() > 0;
                        let res = mesh.remove_vertex(v, mode);
                        prop_assert_eq!(res.is_err(), used && !cascade);
                    }
                }
                Op::Compact => mesh.compact(),
            }

            assert_symmetric(&mesh);
        }
    }
}
