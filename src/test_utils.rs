use std::fmt::Debug;

use crate::{
    handle::{FaceHandle, VertexHandle},
    mesh::Mesh,
};


/// Checks if the given code will trigger a panic. If it does, nothing happens
/// (except side effects of the given code). If no panic is caused by the given
/// code, this macro panics with a message.
macro_rules! assert_panic {
    ($($body:tt)*) => {{
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            $($body)*
        }));
        if let Ok(x) = res {
            panic!(
                "expected panic for '{}', but got '{:?}' ",
                stringify!($($body)*),
                x,
            );
        }
    }}
}

/// Macro version of `cmp_rotated` with nicer error message.
macro_rules! assert_rotated_eq {
    ($lhs:expr, $rhs:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        if let Err(rotated) = crate::test_utils::cmp_rotated(&lhs, &rhs) {
            panic!(
                "assert_rotated_eq failed:\n\
                    |  left: {:?} ({})\n\
                    | right: {:?} ({})\n",
                lhs,
                stringify!($lhs),
                rotated,
                stringify!($rhs),
            );
        }
    }};
}

/// Compares `actual` and `expected`. This function checks if both slices are
/// equal when treating them like a "ring". This means that if we can rotate
/// one slice so that it equals the other slice, we consider them equal.
/// `[a, b, c, d]` and `[b, c, d, a]` and `[d, a, b, c]` are all equal.
///
/// If the slices are equal, `Ok(())` is returned. Otherwise, `Err(rotated)` is
/// returned, where `rotated` is `expected` but potentially rotated by some
/// amount.
pub(crate) fn cmp_rotated<T: Debug + PartialEq + Clone>(
    actual: &[T],
    expected: &[T],
) -> Result<(), Vec<T>> {
    let mut rotated = expected.to_vec();

    if actual.len() != expected.len() {
        return Err(rotated);
    }

    if !actual.is_empty() {
        let pos = match actual.iter().position(|e| e == &expected[0]) {
            Some(pos) => pos,
            None => return Err(rotated),
        };
        rotated.rotate_right(pos);

        if actual != &rotated[..] {
            return Err(rotated);
        }
    }

    Ok(())
}


/// A single triangle `[a, b, c]` at (0, 0, 0), (1, 0, 0) and (0, 1, 0).
pub(crate) fn unit_triangle() -> (Mesh, [VertexHandle; 3], FaceHandle) {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex([0.0, 0.0, 0.0]);
    let b = mesh.add_vertex([1.0, 0.0, 0.0]);
    let c = mesh.add_vertex([0.0, 1.0, 0.0]);
    let f = mesh.add_triangle([a, b, c]).unwrap();
    (mesh, [a, b, c], f)
}

/// Two triangles sharing the edge `{a, c}`:
///
/// ```text
///    (a)---(d)
///     | \   |
///     |  \  |
///     |   \ |
///    (b)---(c)
/// ```
pub(crate) fn two_triangles() -> (Mesh, [VertexHandle; 4], [FaceHandle; 2]) {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex([0.0, 1.0, 0.0]);
    let b = mesh.add_vertex([0.0, 0.0, 0.0]);
    let c = mesh.add_vertex([1.0, 0.0, 0.0]);
    let d = mesh.add_vertex([1.0, 1.0, 0.0]);
    let f0 = mesh.add_triangle([a, b, c]).unwrap();
    let f1 = mesh.add_triangle([a, c, d]).unwrap();
    (mesh, [a, b, c, d], [f0, f1])
}

/// A flat, triangulated grid in the z = 0 plane with `w * h` unit cells.
///
/// Vertices are created row by row: vertex `y * (w + 1) + x` sits at
/// `(x, y, 0)`. Cells are created in the same order, each split along the
/// diagonal from its lower left to its upper right corner into the faces
/// `[ll, lr, ur]` and `[ll, ur, ul]` (both facing +z).
pub(crate) fn grid(w: usize, h: usize) -> Mesh {
    let mut mesh = Mesh::new();
    let mut vs = Vec::new();
    for y in 0..=h {
        for x in 0..=w {
            vs.push(mesh.add_vertex([x as f32, y as f32, 0.0]));
        }
    }

    let idx = |x: usize, y: usize| vs[y * (w + 1) + x];
    for y in 0..h {
        for x in 0..w {
            let ll = idx(x, y);
            let lr = idx(x + 1, y);
            let ul = idx(x, y + 1);
            let ur = idx(x + 1, y + 1);
            mesh.add_triangle([ll, lr, ur]).unwrap();
            mesh.add_triangle([ll, ur, ul]).unwrap();
        }
    }

    mesh
}

/// A closed tetrahedron with all faces wound counter-clockwise when seen
/// from outside.
pub(crate) fn tetrahedron() -> Mesh {
    let mut mesh = Mesh::new();
    let o = mesh.add_vertex([0.0, 0.0, 0.0]);
    let x = mesh.add_vertex([1.0, 0.0, 0.0]);
    let y = mesh.add_vertex([0.0, 1.0, 0.0]);
    let z = mesh.add_vertex([0.0, 0.0, 1.0]);

    mesh.add_triangle([o, y, x]).unwrap();
    mesh.add_triangle([o, x, z]).unwrap();
    mesh.add_triangle([o, z, y]).unwrap();
    mesh.add_triangle([x, y, z]).unwrap();
    mesh
}
