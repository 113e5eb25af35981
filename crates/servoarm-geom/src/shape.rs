use servoarm_core::{Scalar, Vec3};

#[derive(Copy, Clone, Debug)]
pub enum Shape {
    Capsule { r: Scalar, hh: Scalar }, // half-height along local Z
    Plane { n: Vec3, d: Scalar },      // static, n.x = d, unit normal
}

impl Shape {
    /// (radius, cylinder length) of a capsule, for draw-parameter readback.
    pub fn capsule_params(&self) -> Option<(Scalar, Scalar)> {
        match *self {
            Shape::Capsule { r, hh } => Some((r, hh * 2.0)),
            Shape::Plane { .. } => None,
        }
    }
}
