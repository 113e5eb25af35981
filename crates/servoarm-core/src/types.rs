use glam::{Vec3A, Mat3A, Quat};
use crate::Scalar;

pub type Vec3 = Vec3A;
pub type Mat3 = Mat3A;

#[inline] pub fn vec3(x: Scalar, y: Scalar, z: Scalar) -> Vec3 { Vec3::new(x, y, z) }
#[inline] pub fn iso(pos: Vec3, rot: Quat) -> Isometry { Isometry { pos, rot } }
#[inline] pub fn quat_identity() -> Quat { Quat::IDENTITY }

/// Rigid transform: `apply(x) = pos + rot * x`.
#[derive(Copy, Clone, Debug)]
pub struct Isometry { pub pos: Vec3, pub rot: Quat }

impl Isometry {
    #[inline] pub fn apply(&self, p: Vec3) -> Vec3 { self.pos + self.rot * p }

    /// `a.compose(&b)` maps x through b first, then a.
    #[inline]
    pub fn compose(&self, inner: &Isometry) -> Isometry {
        Isometry { pos: self.apply(inner.pos), rot: self.rot * inner.rot }
    }

    /// Rotation by `angle` about the line through `anchor` along `axis`.
    pub fn rotation_about(anchor: Vec3, axis: Vec3, angle: Scalar) -> Isometry {
        let rot = Quat::from_axis_angle(axis.normalize().into(), angle);
        Isometry { pos: anchor - rot * anchor, rot }
    }
}

impl Default for Isometry {
    fn default() -> Self { Self { pos: Vec3::ZERO, rot: Quat::IDENTITY } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn rotation_about_fixes_its_anchor() {
        let a = vec3(0.3, -1.0, 2.0);
        let r = Isometry::rotation_about(a, vec3(0.0, 1.0, 0.0), 1.1);
        assert!((r.apply(a) - a).length() < 1.0e-6);
    }

    #[test] fn compose_matches_nested_apply() {
        let a = Isometry::rotation_about(vec3(0.0, 0.0, 1.0), vec3(0.0, 1.0, 0.0), 0.7);
        let b = Isometry::rotation_about(vec3(1.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0), -0.4);
        let p = vec3(0.2, 0.5, -0.9);
        assert!((a.compose(&b).apply(p) - a.apply(b.apply(p))).length() < 1.0e-5);
    }
}
