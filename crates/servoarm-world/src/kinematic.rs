use servoarm_core::{
    hash_quat, hash_vec3, BodyId, Isometry, JointId, Scalar, ShapeId, StepHasher, StepStats, Vec3,
};
use servoarm_geom::{MassProps, Shape};

use crate::PhysicsWorld;

const MIN_INERTIA: Scalar = 1.0e-9;

#[derive(Copy, Clone, Debug)]
struct HingeState {
    child: BodyId,
    parent: BodyId,
    anchor: Vec3, // zero-configuration world frame
    axis: Vec3,   // unit, zero-configuration world frame
    angle: Scalar,
    vel: Scalar,
    cmd_vel: Scalar,
    cmd_f_max: Scalar,
}

#[derive(Copy, Clone, Debug)]
enum JointRec {
    Fixed { body: BodyId },
    Hinge(HingeState),
}

#[derive(Copy, Clone, Debug)]
struct ShapeRec {
    body: Option<BodyId>, // None for static geometry (the ground plane)
    shape: Shape,
}

/// Reference backend: deterministic single-axis hinge dynamics.
///
/// Each hinge carries a velocity motor with a torque cap and sees the
/// gravity torque of its whole subtree about its axis; poses follow by
/// forward kinematics down the chain. No contact response, and bodies
/// not held by a joint are not integrated — enough world for a servo
/// chain that never reaches the ground.
pub struct KinematicWorld {
    gravity: Vec3,
    pose0: Vec<Isometry>, // zero-configuration poses; `pose` is derived
    pose: Vec<Isometry>,
    mass: Vec<MassProps>,
    shapes: Vec<ShapeRec>,
    joints: Vec<JointRec>,
    tick: u64,
}

impl KinematicWorld {
    pub fn new() -> Self {
        Self {
            gravity: Vec3::ZERO,
            pose0: Vec::new(),
            pose: Vec::new(),
            mass: Vec::new(),
            shapes: Vec::new(),
            joints: Vec::new(),
            tick: 0,
        }
    }

    // Read-only helpers for tests and debuggers.
    #[inline] pub fn num_bodies(&self) -> u32 { self.pose.len() as u32 }
    #[inline] pub fn tick_index(&self) -> u64 { self.tick }

    /// The body a fixed joint pins, or None for a hinge.
    pub fn fixed_body(&self, joint: JointId) -> Option<BodyId> {
        match self.joints[joint.0 as usize] {
            JointRec::Fixed { body } => Some(body),
            JointRec::Hinge(_) => None,
        }
    }
    /// The body a shape is attached to; None for static geometry.
    pub fn body_of(&self, shape: ShapeId) -> Option<BodyId> {
        self.shapes[shape.0 as usize].body
    }
    /// (child, parent) of a hinge.
    pub fn hinge_bodies(&self, joint: JointId) -> (BodyId, BodyId) {
        let h = self.hinge(joint);
        (h.child, h.parent)
    }
    pub fn hinge_anchor(&self, joint: JointId) -> Vec3 { self.hinge(joint).anchor }
    pub fn hinge_axis(&self, joint: JointId) -> Vec3 { self.hinge(joint).axis }

    /// Pose write for scene setup. Call only outside `step` so state
    /// hashes stay stable.
    pub fn set_hinge_angle(&mut self, joint: JointId, angle: Scalar) {
        self.hinge_mut(joint).angle = angle;
        self.refresh_poses();
    }

    /// Digest of body poses and hinge state in stable id order.
    pub fn step_hash(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        h.update_bytes(&self.tick.to_le_bytes());
        for (i, p) in self.pose.iter().enumerate() {
            h.update_bytes(&(i as u32).to_le_bytes());
            hash_vec3(&mut h, &p.pos);
            hash_quat(&mut h, &p.rot);
        }
        for j in &self.joints {
            if let JointRec::Hinge(hs) = j {
                h.update_bytes(&hs.angle.to_le_bytes());
                h.update_bytes(&hs.vel.to_le_bytes());
            }
        }
        h.finalize()
    }

    fn hinge(&self, joint: JointId) -> &HingeState {
        match &self.joints[joint.0 as usize] {
            JointRec::Hinge(h) => h,
            JointRec::Fixed { .. } => panic!("joint {} is not a hinge", joint.0),
        }
    }
    fn hinge_mut(&mut self, joint: JointId) -> &mut HingeState {
        match &mut self.joints[joint.0 as usize] {
            JointRec::Hinge(h) => h,
            JointRec::Fixed { .. } => panic!("joint {} is not a hinge", joint.0),
        }
    }

    /// Accumulated transform per body, zero configuration -> current.
    /// Hinges are walked in creation order, so parents resolve before
    /// their children (the order `add_hinge_joint` requires).
    fn accums(&self) -> Vec<Isometry> {
        let mut acc = vec![Isometry::default(); self.pose0.len()];
        for j in &self.joints {
            if let JointRec::Hinge(h) = j {
                let local = Isometry::rotation_about(h.anchor, h.axis, h.angle);
                acc[h.child.0 as usize] = acc[h.parent.0 as usize].compose(&local);
            }
        }
        acc
    }

    fn refresh_poses(&mut self) {
        let acc = self.accums();
        for i in 0..self.pose.len() {
            let a = acc[i];
            self.pose[i] = Isometry {
                pos: a.apply(self.pose0[i].pos),
                rot: a.rot * self.pose0[i].rot,
            };
        }
    }

    /// All bodies at or below `root` in the hinge graph.
    fn subtree_of(&self, root: BodyId) -> Vec<u32> {
        let mut set = vec![root.0];
        let mut i = 0;
        while i < set.len() {
            let b = set[i];
            i += 1;
            for j in &self.joints {
                if let JointRec::Hinge(h) = j {
                    if h.parent.0 == b && !set.contains(&h.child.0) {
                        set.push(h.child.0);
                    }
                }
            }
        }
        set
    }
}

impl Default for KinematicWorld {
    fn default() -> Self { Self::new() }
}

impl PhysicsWorld for KinematicWorld {
    fn set_gravity(&mut self, g: Vec3) { self.gravity = g; }

    fn add_body(&mut self, pose: Isometry, mass: MassProps) -> BodyId {
        self.pose0.push(pose);
        self.pose.push(pose);
        self.mass.push(mass);
        BodyId((self.pose.len() as u32) - 1)
    }

    fn add_shape(&mut self, body: BodyId, shape: Shape) -> ShapeId {
        self.shapes.push(ShapeRec { body: Some(body), shape });
        ShapeId((self.shapes.len() as u32) - 1)
    }

    fn add_plane(&mut self, n: Vec3, d: Scalar) -> ShapeId {
        self.shapes.push(ShapeRec { body: None, shape: Shape::Plane { n: n.normalize(), d } });
        ShapeId((self.shapes.len() as u32) - 1)
    }

    fn add_fixed_joint(&mut self, body: BodyId) -> JointId {
        self.joints.push(JointRec::Fixed { body });
        JointId((self.joints.len() as u32) - 1)
    }

    fn add_hinge_joint(&mut self, child: BodyId, parent: BodyId, anchor: Vec3, axis: Vec3) -> JointId {
        self.joints.push(JointRec::Hinge(HingeState {
            child,
            parent,
            anchor,
            axis: axis.normalize(),
            angle: 0.0,
            vel: 0.0,
            cmd_vel: 0.0,
            cmd_f_max: 0.0,
        }));
        JointId((self.joints.len() as u32) - 1)
    }

    fn hinge_angle(&self, joint: JointId) -> Scalar { self.hinge(joint).angle }
    fn set_hinge_target_velocity(&mut self, joint: JointId, vel: Scalar) {
        self.hinge_mut(joint).cmd_vel = vel;
    }
    fn set_hinge_max_torque(&mut self, joint: JointId, f_max: Scalar) {
        self.hinge_mut(joint).cmd_f_max = f_max;
    }
    fn hinge_target_velocity(&self, joint: JointId) -> Scalar { self.hinge(joint).cmd_vel }
    fn hinge_max_torque(&self, joint: JointId) -> Scalar { self.hinge(joint).cmd_f_max }

    fn body_pose(&self, body: BodyId) -> Isometry { self.pose[body.0 as usize] }
    fn shape_of(&self, shape: ShapeId) -> Shape { self.shapes[shape.0 as usize].shape }

    fn step(&mut self, dt: Scalar) -> StepStats {
        let acc = self.accums();
        let mut driven = 0u32;
        let mut saturated = 0u32;

        // Integrate each hinge independently (single-axis approximation;
        // cross-joint coupling only enters through the refreshed poses).
        for ji in 0..self.joints.len() {
            let h = match self.joints[ji] {
                JointRec::Hinge(h) => h,
                JointRec::Fixed { .. } => continue,
            };
            let pa = acc[h.parent.0 as usize];
            let anchor = pa.apply(h.anchor);
            let axis = pa.rot * h.axis;

            // Effective inertia and gravity torque over the subtree.
            let mut inertia = 0.0;
            let mut tau_g = 0.0;
            for &b in &self.subtree_of(h.child) {
                let m = self.mass[b as usize];
                let p = self.pose[b as usize];
                let rvec = p.pos - anchor;
                let d2 = (rvec - axis * rvec.dot(axis)).length_squared();
                inertia += m.mass * d2 + m.moment_about(p.rot, axis);
                tau_g += m.mass * rvec.cross(self.gravity).dot(axis);
            }
            let inertia = inertia.max(MIN_INERTIA);

            // Velocity motor: spend up to cmd_f_max reaching cmd_vel
            // within this step.
            let tau_need = inertia * (h.cmd_vel - h.vel) / dt;
            let tau_motor = tau_need.clamp(-h.cmd_f_max, h.cmd_f_max);
            if tau_need.abs() > h.cmd_f_max {
                saturated += 1;
            }

            let vel = h.vel + (tau_motor + tau_g) / inertia * dt;
            if let JointRec::Hinge(hs) = &mut self.joints[ji] {
                hs.vel = vel;
                hs.angle += vel * dt;
            }
            driven += 1;
        }

        self.refresh_poses();
        self.tick = self.tick.wrapping_add(1);
        StepStats { joints_driven: driven, saturated }
    }
}
