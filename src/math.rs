//! Abstractions over numerical types and position-like types.

use std::fmt::Debug;

use cgmath::{prelude::*, Point3, Vector3};
use num_traits::{Num, NumAssign, ToPrimitive};


/// Primitive numerical types, like `f64` and `u32`.
///
/// This trait is automatically implemented for all types that satisfy the
/// super-trait constraints.
pub trait PrimitiveNum: 'static + Copy + Debug + Num + PartialOrd + NumAssign + ToPrimitive {}

impl<T> PrimitiveNum for T
where
    T: 'static + Copy + Debug + Num + PartialOrd + NumAssign + ToPrimitive,
{}


/// Types that can be interpreted to represent some kind of 3D position.
///
/// This type is implemented for strongly typed "position"-types, like
/// `cgmath::Point3`, as well as for generic "weaker" types such as tuples
/// `(T, T, T)` and arrays `[T; 3]`. However, to avoid logic errors, you should
/// try to use strong types to represent points in 3D space instead of simple
/// tuples.
pub trait Pos3Like: Copy {
    /// The type of each component.
    type Scalar: PrimitiveNum;

    /// Returns the `x` component of this position.
    fn x(&self) -> &Self::Scalar;

    /// Returns the `y` component of this position.
    fn y(&self) -> &Self::Scalar;

    /// Returns the `z` component of this position.
    fn z(&self) -> &Self::Scalar;

    /// Converts this position into the `f32` point stored in a mesh.
    /// Components that can't be represented become NaN.
    fn to_point3(self) -> Point3<f32> {
        let conv = |s: &Self::Scalar| s.to_f32().unwrap_or(std::f32::NAN);
        Point3::new(conv(self.x()), conv(self.y()), conv(self.z()))
    }
}

impl<T: PrimitiveNum> Pos3Like for Point3<T> {
    type Scalar = T;
    fn x(&self) -> &Self::Scalar { &self.x }
    fn y(&self) -> &Self::Scalar { &self.y }
    fn z(&self) -> &Self::Scalar { &self.z }
}

impl<T: PrimitiveNum> Pos3Like for (T, T, T) {
    type Scalar = T;
    fn x(&self) -> &Self::Scalar { &self.0 }
    fn y(&self) -> &Self::Scalar { &self.1 }
    fn z(&self) -> &Self::Scalar { &self.2 }
}

impl<T: PrimitiveNum> Pos3Like for [T; 3] {
    type Scalar = T;
    fn x(&self) -> &Self::Scalar { &self[0] }
    fn y(&self) -> &Self::Scalar { &self[1] }
    fn z(&self) -> &Self::Scalar { &self[2] }
}


/// Normal of the triangle `(a, b, c)`: `(b - a) × (c - a)`. Not normalized;
/// its length is twice the triangle's area.
pub fn triangle_normal(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Vector3<f32> {
    (b - a).cross(c - a)
}

/// The angle (in radians) between the two vectors. Returns 0 if one of them
/// has zero length.
pub fn angle_between(u: Vector3<f32>, v: Vector3<f32>) -> f32 {
    let denom = u.magnitude() * v.magnitude();
    if denom == 0.0 {
        return 0.0;
    }

    // Clamping guards against `acos` returning NaN due to rounding
    (u.dot(v) / denom).max(-1.0).min(1.0).acos()
}

/// Normalizes the vector, unless it has zero length (in which case it's
/// returned unchanged).
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let len = v.magnitude();
    if len == 0.0 { v } else { v / len }
}
