use servoarm_core::Scalar;

/// Desired joint angles, index-aligned with the chain's joints. Index 0
/// (the fixed base joint) is unused and stays zero.
///
/// Values accumulate without clamping: a target driven far past the
/// reachable range keeps growing, and the joint chases it at whatever
/// rate the torque cap allows.
#[derive(Debug, Clone)]
pub struct JointTargets {
    theta: Vec<Scalar>,
}

impl JointTargets {
    pub fn new(n: usize) -> Self {
        Self { theta: vec![0.0; n] }
    }

    /// Add `delta` radians to target `joint`. Index 0 and out-of-range
    /// indices are ignored.
    pub fn adjust(&mut self, joint: usize, delta: Scalar) {
        if joint == 0 || joint >= self.theta.len() {
            return;
        }
        self.theta[joint] += delta;
    }

    #[inline] pub fn get(&self, joint: usize) -> Scalar { self.theta[joint] }
    #[inline] pub fn len(&self) -> usize { self.theta.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.theta.is_empty() }
}
