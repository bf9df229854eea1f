#![no_main]

use libfuzzer_sys::fuzz_target;
use ringmesh::io::off::Reader;

fuzz_target!(|data: &[u8]| {
    // Same as the OBJ target: we only care about panics.
    let _ = Reader::new(data).read();
});
