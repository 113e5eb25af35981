use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use servoarm_core::{vec3, Scalar, Vec3};

pub const NUM_LINKS: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDef {
    pub name: String,
    pub pos: [Scalar; 3],    // COM, world frame
    pub length: Scalar,      // cylinder length of the capsule
    pub radius: Scalar,
    pub mass: Scalar,        // total link mass
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HingeDef {
    pub name: String,
    pub anchor: [Scalar; 3], // world frame, zero configuration
    pub axis: [Scalar; 3],
}

/// Static chain description. `hinges[i]` attaches link i+1 to link i;
/// link 0 is pinned to the world by a fixed joint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmRig {
    pub links: Vec<LinkDef>,
    pub hinges: Vec<HingeDef>,
}

impl ArmRig {
    /// The built-in 4-link arm: a squat base capsule and three thin
    /// links stacked along +Z, yaw at the waist, pitch at shoulder and
    /// elbow.
    pub fn reference() -> Self {
        Self {
            links: vec![
                LinkDef { name: "base".into(),  pos: [0.0, 0.0, 0.05], length: 0.10, radius: 0.20, mass: 9.0 },
                LinkDef { name: "link1".into(), pos: [0.0, 0.0, 0.50], length: 0.90, radius: 0.04, mass: 2.0 },
                LinkDef { name: "link2".into(), pos: [0.0, 0.0, 1.50], length: 1.00, radius: 0.04, mass: 2.0 },
                LinkDef { name: "link3".into(), pos: [0.0, 0.0, 2.50], length: 1.00, radius: 0.04, mass: 2.0 },
            ],
            hinges: vec![
                HingeDef { name: "waist".into(),    anchor: [0.0, 0.0, 0.10], axis: [0.0, 0.0, 1.0] },
                HingeDef { name: "shoulder".into(), anchor: [0.0, 0.0, 1.00], axis: [0.0, 1.0, 0.0] },
                HingeDef { name: "elbow".into(),    anchor: [0.0, 0.0, 2.00], axis: [0.0, 1.0, 0.0] },
            ],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.links.len() < 2 {
            bail!("rig needs a base and at least one driven link");
        }
        if self.hinges.len() != self.links.len() - 1 {
            bail!(
                "rig has {} links but {} hinges (expected links - 1)",
                self.links.len(),
                self.hinges.len()
            );
        }
        for l in &self.links {
            if !(l.length > 0.0 && l.radius > 0.0 && l.mass > 0.0) {
                bail!("link {}: length, radius and mass must be positive", l.name);
            }
        }
        for h in &self.hinges {
            if unpack(h.axis).length_squared() < 1.0e-12 {
                bail!("hinge {}: axis must be nonzero", h.name);
            }
        }
        Ok(())
    }
}

pub(crate) fn unpack(v: [Scalar; 3]) -> Vec3 {
    vec3(v[0], v[1], v[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn reference_rig_is_well_formed() {
        let rig = ArmRig::reference();
        assert_eq!(rig.links.len(), NUM_LINKS);
        assert_eq!(rig.hinges.len(), NUM_LINKS - 1);
        rig.validate().unwrap();
    }

    #[test] fn validate_rejects_hinge_count_mismatch() {
        let mut rig = ArmRig::reference();
        rig.hinges.pop();
        assert!(rig.validate().is_err());
    }

    #[test] fn validate_rejects_zero_axis() {
        let mut rig = ArmRig::reference();
        rig.hinges[1].axis = [0.0, 0.0, 0.0];
        assert!(rig.validate().is_err());
    }

    #[test] fn validate_rejects_massless_link() {
        let mut rig = ArmRig::reference();
        rig.links[2].mass = 0.0;
        assert!(rig.validate().is_err());
    }
}
