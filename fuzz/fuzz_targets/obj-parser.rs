#![no_main]

use libfuzzer_sys::fuzz_target;
use ringmesh::io::obj::{Reader, ReadOptions};

fuzz_target!(|data: &[u8]| {
    // Only panics are interesting here. It's fine if the reader says "this is
    // not a valid OBJ file", so the `Result` is ignored.
    let _ = Reader::new(data).read(ReadOptions::default());
    let _ = Reader::new(data).read(ReadOptions { unify_vertices: true });
});
