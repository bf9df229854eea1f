//! Loading and saving through the file system.

use std::{env, fs, path::PathBuf, process};

use ringmesh::{
    Error, Mesh,
    io::{self, FileFormat},
};


/// A path in the temp directory that is unique for this test process.
fn temp_path(name: &str) -> PathBuf {
    env::temp_dir().join(format!("ringmesh-{}-{}", process::id(), name))
}

fn quad() -> Mesh {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex([0.0, 0.0, 0.0]);
    let b = mesh.add_vertex([1.0, 0.0, 0.0]);
    let c = mesh.add_vertex([1.0, 1.0, 0.0]);
    let d = mesh.add_vertex([0.0, 1.0, 0.0]);
    mesh.add_face(&[a, b, c, d]).unwrap();
    mesh
}

#[test]
fn save_and_load_both_formats() {
    let mesh = quad();

    for &name in &["quad.obj", "quad.OFF"] {
        let path = temp_path(name);
        io::save(&mesh, &path).unwrap();
        let loaded = io::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded.num_vertices(), 4);
        assert_eq!(loaded.num_faces(), 1);
        assert_eq!(loaded.num_edges(), 4);
        for v in mesh.vertex_handles() {
            assert_eq!(loaded.position(v).unwrap(), mesh.position(v).unwrap());
        }
    }
}

#[test]
fn load_as_ignores_the_extension() {
    let path = temp_path("quad.mesh");
    fs::write(&path, "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();

    assert!(io::load(&path).is_err());
    let mesh = io::load_as(&path, FileFormat::Off).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(mesh.num_faces(), 1);
}

#[test]
fn missing_file() {
    let res = io::load(temp_path("does-not-exist.obj"));
    assert!(matches!(res, Err(Error::Io(_))));
}
