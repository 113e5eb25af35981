use anyhow::Result;
use servoarm_core::{iso, quat_identity, BodyId, JointId, ShapeId};
use servoarm_geom::{MassProps, Shape};
use servoarm_world::PhysicsWorld;

use crate::registry::{unpack, ArmRig};

/// Handle tables for a built chain. `joints[0]` is the fixed base
/// joint; `joints[1..]` are the hinges, index-aligned with their child
/// links.
pub struct ArmChain {
    pub bodies: Vec<BodyId>,
    pub shapes: Vec<ShapeId>,
    pub joints: Vec<JointId>,
}

impl ArmChain {
    #[inline] pub fn hinge_count(&self) -> usize { self.joints.len() - 1 }
}

/// Materialize `rig` inside `world`: every body (with its capsule mass
/// and shape) first, then the base fixed joint, then each hinge
/// child-to-parent up the chain. Joints only ever reference bodies that
/// already exist.
pub fn build<W: PhysicsWorld>(world: &mut W, rig: &ArmRig) -> Result<ArmChain> {
    rig.validate()?;

    let mut bodies = Vec::with_capacity(rig.links.len());
    let mut shapes = Vec::with_capacity(rig.links.len());
    for l in &rig.links {
        let hh = l.length * 0.5;
        let body = world.add_body(
            iso(unpack(l.pos), quat_identity()),
            MassProps::from_capsule_total(l.mass, l.radius, hh),
        );
        shapes.push(world.add_shape(body, Shape::Capsule { r: l.radius, hh }));
        bodies.push(body);
    }

    let mut joints = Vec::with_capacity(rig.links.len());
    joints.push(world.add_fixed_joint(bodies[0]));
    for (i, h) in rig.hinges.iter().enumerate() {
        let axis = unpack(h.axis).normalize();
        joints.push(world.add_hinge_joint(bodies[i + 1], bodies[i], unpack(h.anchor), axis));
    }

    Ok(ArmChain { bodies, shapes, joints })
}

#[cfg(test)]
mod tests {
    use super::*;
    use servoarm_core::vec3;
    use servoarm_world::KinematicWorld;

    #[test] fn builds_the_reference_topology() {
        let mut w = KinematicWorld::new();
        let rig = ArmRig::reference();
        let chain = build(&mut w, &rig).unwrap();

        assert_eq!(chain.bodies.len(), 4);
        assert_eq!(chain.joints.len(), 4);
        assert_eq!(chain.hinge_count(), 3);
        assert_eq!(w.fixed_body(chain.joints[0]), Some(chain.bodies[0]));
        assert!(w.fixed_body(chain.joints[1]).is_none());

        for i in 1..4 {
            let (child, parent) = w.hinge_bodies(chain.joints[i]);
            assert_eq!(child, chain.bodies[i]);
            assert_eq!(parent, chain.bodies[i - 1]);
            let anchor = w.hinge_anchor(chain.joints[i]);
            let expect = unpack(rig.hinges[i - 1].anchor);
            assert!((anchor - expect).length() < 1.0e-6);
            let axis = w.hinge_axis(chain.joints[i]);
            let expect = unpack(rig.hinges[i - 1].axis);
            assert!((axis - expect).length() < 1.0e-6);
        }
    }

    #[test] fn bodies_sit_at_their_configured_positions() {
        let mut w = KinematicWorld::new();
        let chain = build(&mut w, &ArmRig::reference()).unwrap();
        let zs = [0.05, 0.5, 1.5, 2.5];
        for (b, z) in chain.bodies.iter().zip(zs) {
            let p = w.body_pose(*b).pos;
            assert!((p - vec3(0.0, 0.0, z)).length() < 1.0e-6);
        }
    }

    #[test] fn build_rejects_a_broken_rig() {
        let mut w = KinematicWorld::new();
        let mut rig = ArmRig::reference();
        rig.links[1].radius = -1.0;
        assert!(build(&mut w, &rig).is_err());
    }
}
