pub mod kinematic;
pub use kinematic::KinematicWorld;

use servoarm_core::{BodyId, Isometry, JointId, Scalar, ShapeId, StepStats, Vec3};
use servoarm_geom::{MassProps, Shape};

/// What the arm expects from any physics backend.
///
/// Handle misuse and allocation failure are fatal (engine-defined); no
/// partial results are surfaced. Motor commands persist across steps
/// until overwritten.
pub trait PhysicsWorld {
    fn set_gravity(&mut self, g: Vec3);

    fn add_body(&mut self, pose: Isometry, mass: MassProps) -> BodyId;
    fn add_shape(&mut self, body: BodyId, shape: Shape) -> ShapeId;
    /// Static collision plane `n.x = d`, not bound to a body.
    fn add_plane(&mut self, n: Vec3, d: Scalar) -> ShapeId;

    /// Zero-DOF joint pinning `body` to the world at its current pose.
    fn add_fixed_joint(&mut self, body: BodyId) -> JointId;
    /// One-DOF hinge between `child` and `parent` about `axis` through
    /// `anchor`, both given in the world frame at the current
    /// configuration. A body must be jointed before its children are.
    fn add_hinge_joint(&mut self, child: BodyId, parent: BodyId, anchor: Vec3, axis: Vec3) -> JointId;

    fn hinge_angle(&self, joint: JointId) -> Scalar;
    /// Motor target angular velocity, applied by the next `step`.
    fn set_hinge_target_velocity(&mut self, joint: JointId, vel: Scalar);
    /// Max torque the motor may spend chasing its target velocity.
    fn set_hinge_max_torque(&mut self, joint: JointId, f_max: Scalar);
    fn hinge_target_velocity(&self, joint: JointId) -> Scalar;
    fn hinge_max_torque(&self, joint: JointId) -> Scalar;

    fn body_pose(&self, body: BodyId) -> Isometry;
    fn shape_of(&self, shape: ShapeId) -> Shape;

    fn step(&mut self, dt: Scalar) -> StepStats;
}
