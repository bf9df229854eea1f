use crate::{
    Mesh,
    error::{Error, Result, Span},
    handle::{FaceHandle, Handle, VertexHandle},
    io::MeshWriter,
    test_utils::{grid, two_triangles},
};
use super::*;


fn read(src: &str) -> Result<Mesh> {
    Reader::new(src.as_bytes()).read()
}

fn parse_span(res: Result<Mesh>) -> Span {
    match res {
        Err(Error::Parse { span, .. }) => span,
        other => panic!("expected parse error, got {:?}", other.map(|m| m.num_faces())),
    }
}

const SQUARE: &str = "\
OFF
# vertices faces edges
4 2 5
0 1 0
0 0 0
1 0 0
1 1 0
3 0 1 2
3 0 2 3
";

#[test]
fn read_square() {
    let mesh = read(SQUARE).unwrap();
    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.num_faces(), 2);
    assert_eq!(mesh.num_edges(), 5);

    let (a, c) = (VertexHandle::new(0), VertexHandle::new(2));
    assert_eq!(
        mesh.vertices_of_face(FaceHandle::new(1)).unwrap(),
        &[a, c, VertexHandle::new(3)],
    );
    assert_eq!(mesh.check_integrity().boundary_edge_count(), 4);
}

#[test]
fn inline_counts_and_colors() {
    let src = "OFF 3 1 0\n0 0 0 255 0 0\n1 0 0 0 255 0\n0 1 0 0 0 255\n3 0 1 2 0.5 0.5 0.5\n";
    let mesh = read(src).unwrap();
    assert_eq!(mesh.num_vertices(), 3);
    assert_eq!(mesh.num_faces(), 1);
}

#[test]
fn errors() {
    assert_eq!(parse_span(read("")), Span::line(1));
    assert_eq!(parse_span(read("PLY\n")), Span::field(1, 0));
    assert_eq!(parse_span(read("OFF\n3\n")), Span::line(2));
    assert_eq!(parse_span(read("OFF\nthree 1 0\n")), Span::field(2, 0));
    assert_eq!(parse_span(read("OFF\n3 1 0\n0 0 0\n1 0 0\n")), Span::line(5));
    assert_eq!(parse_span(read("OFF\n3 1 0\n0 0 0\n1 0 x\n0 1 0\n")), Span::field(4, 2));
    assert_eq!(parse_span(read("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 3\n")), Span::field(6, 3));
    assert_eq!(parse_span(read("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n4 0 1 2\n")), Span::line(6));

    // Arity so large that `n + 1` would overflow
    let src = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n18446744073709551615 0 1 2\n";
    assert_eq!(parse_span(read(src)), Span::line(6));

    let res = read("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 1\n");
    assert!(matches!(res, Err(Error::MalformedFace { distinct: 2, .. })));
}

#[test]
fn write_square() {
    let (mesh, _, _) = two_triangles();
    let out = Writer::new(&mesh).write_to_memory().unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), SQUARE.replace("# vertices faces edges\n", ""));
}

#[test]
fn round_trip() {
    let mesh = grid(3, 2);
    let out = Writer::new(&mesh).write_to_memory().unwrap();
    let reloaded = Reader::new(&out[..]).read().unwrap();

    assert_eq!(reloaded.num_vertices(), mesh.num_vertices());
    assert_eq!(reloaded.num_edges(), mesh.num_edges());
    for f in mesh.face_handles() {
        assert_eq!(reloaded.vertices_of_face(f).unwrap(), mesh.vertices_of_face(f).unwrap());
    }
}
