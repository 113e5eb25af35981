use servoarm_core::Scalar;
use servoarm_viz::{Ledger, LedgerEvent};
use servoarm_world::PhysicsWorld;

use crate::chain::ArmChain;
use crate::target::JointTargets;

#[derive(Copy, Clone, Debug)]
pub struct ServoParams {
    pub k: Scalar,     // proportional gain on angle error
    pub f_max: Scalar, // motor torque cap
}

impl Default for ServoParams {
    fn default() -> Self {
        Self { k: 10.0, f_max: 100.0 }
    }
}

/// Per-joint proportional velocity servo. Stateless between ticks: the
/// command is a pure function of the current error, one gain for every
/// hinge, no cross-joint terms.
#[derive(Copy, Clone, Debug)]
pub struct ServoCtrl {
    pub params: ServoParams,
}

impl ServoCtrl {
    pub fn new(params: ServoParams) -> Self {
        Self { params }
    }

    /// Close the loop once for every hinge. The commanded velocity
    /// `k * (target - angle)` is never clamped; `f_max` alone bounds
    /// the actuation the motor may spend chasing it.
    pub fn control_tick<W: PhysicsWorld>(
        &self,
        world: &mut W,
        chain: &ArmChain,
        targets: &JointTargets,
        ledger: &mut Ledger,
    ) {
        for j in 1..chain.joints.len() {
            let joint = chain.joints[j];
            let err = targets.get(j) - world.hinge_angle(joint);
            let vel = self.params.k * err;
            world.set_hinge_target_velocity(joint, vel);
            world.set_hinge_max_torque(joint, self.params.f_max);
            ledger.push(LedgerEvent::HingeCmd { joint: j as u32, vel, f_max: self.params.f_max });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::build;
    use crate::registry::ArmRig;
    use servoarm_world::KinematicWorld;

    fn scene() -> (KinematicWorld, ArmChain, JointTargets, Ledger) {
        let mut w = KinematicWorld::new();
        let chain = build(&mut w, &ArmRig::reference()).unwrap();
        let targets = JointTargets::new(chain.joints.len());
        (w, chain, targets, Ledger::new(64))
    }

    #[test] fn command_is_proportional_to_error() {
        let (mut w, chain, mut targets, mut ledger) = scene();
        targets.adjust(2, 0.25);
        ServoCtrl::new(ServoParams::default()).control_tick(&mut w, &chain, &targets, &mut ledger);
        assert_eq!(w.hinge_target_velocity(chain.joints[2]), 2.5);
        assert_eq!(w.hinge_target_velocity(chain.joints[1]), 0.0);
        assert_eq!(w.hinge_target_velocity(chain.joints[3]), 0.0);
    }

    #[test] fn torque_cap_is_always_the_configured_value() {
        let (mut w, chain, mut targets, mut ledger) = scene();
        targets.adjust(1, 1.0e6);
        let ctrl = ServoCtrl::new(ServoParams::default());
        for _ in 0..5 {
            ctrl.control_tick(&mut w, &chain, &targets, &mut ledger);
            for j in 1..chain.joints.len() {
                assert_eq!(w.hinge_max_torque(chain.joints[j]), 100.0);
            }
            w.step(0.01);
        }
    }

    #[test] fn velocity_command_is_not_clamped() {
        let (mut w, chain, mut targets, mut ledger) = scene();
        targets.adjust(3, 1.0e6);
        ServoCtrl::new(ServoParams::default()).control_tick(&mut w, &chain, &targets, &mut ledger);
        assert_eq!(w.hinge_target_velocity(chain.joints[3]), 1.0e7);
    }

    #[test] fn every_hinge_gets_a_ledger_entry() {
        let (mut w, chain, targets, mut ledger) = scene();
        ServoCtrl::new(ServoParams::default()).control_tick(&mut w, &chain, &targets, &mut ledger);
        let cmds = ledger.iter().filter(|e| matches!(e, LedgerEvent::HingeCmd { .. })).count();
        assert_eq!(cmds, chain.hinge_count());
    }
}
