use servoarm_core::types::{Mat3, Vec3};
use servoarm_core::{Quat, Scalar};

#[derive(Copy, Clone, Debug)]
pub struct MassProps {
    pub mass: Scalar,
    pub inv_mass: Scalar,
    pub inertia: Mat3, // about the COM, body frame (diagonal for a Z-capsule)
}

impl MassProps {
    /// Capsule mass distribution from a TOTAL mass, axis along local Z.
    /// The cap material is folded into the cylinder term; link capsules
    /// are long and thin, so the transverse moment dominates either way.
    pub fn from_capsule_total(total: Scalar, r: Scalar, hh: Scalar) -> Self {
        let h = hh * 2.0;
        let iz = 0.5 * total * r * r;
        let ix = 0.25 * total * r * r + (1.0 / 12.0) * total * h * h;
        Self {
            mass: total,
            inv_mass: 1.0 / total,
            inertia: Mat3::from_diagonal(Vec3::new(ix, ix, iz).into()),
        }
    }

    /// Moment about a world-frame axis through the COM for a body at
    /// rotation `rot`.
    pub fn moment_about(&self, rot: Quat, axis_world: Vec3) -> Scalar {
        let local = rot.inverse() * axis_world;
        (self.inertia * local).dot(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use servoarm_core::vec3;

    #[test] fn total_mass_preserved() {
        let m = MassProps::from_capsule_total(2.0, 0.04, 0.45);
        assert!((m.mass - 2.0).abs() < 1.0e-6);
        assert!((m.inv_mass - 0.5).abs() < 1.0e-6);
    }

    #[test] fn long_capsule_transverse_dominates() {
        let m = MassProps::from_capsule_total(2.0, 0.04, 0.45);
        let axial = m.moment_about(Quat::IDENTITY, vec3(0.0, 0.0, 1.0));
        let transverse = m.moment_about(Quat::IDENTITY, vec3(1.0, 0.0, 0.0));
        assert!(axial < transverse);
        assert!(axial > 0.0);
    }
}
