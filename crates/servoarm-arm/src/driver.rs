use servoarm_core::Scalar;
use servoarm_viz::{DebugSettings, Ledger, LedgerEvent};
use servoarm_world::PhysicsWorld;

use crate::chain::ArmChain;
use crate::control::{ServoCtrl, ServoParams};
use crate::target::JointTargets;

/// Fixed integration step, simulated seconds.
pub const TIMESTEP: Scalar = 0.01;

/// Owns everything the loop touches: chain handles, targets, the
/// controller, and telemetry. Passed by reference into the tick path
/// and the command hook; nothing lives in globals.
pub struct SimContext {
    pub chain: ArmChain,
    pub targets: JointTargets,
    pub ctrl: ServoCtrl,
    pub ledger: Ledger,
    pub debug: DebugSettings,
    tick: u64,
}

impl SimContext {
    pub fn new(chain: ArmChain) -> Self {
        Self::with_params(chain, ServoParams::default())
    }

    pub fn with_params(chain: ArmChain, params: ServoParams) -> Self {
        let n = chain.joints.len();
        Self {
            chain,
            targets: JointTargets::new(n),
            ctrl: ServoCtrl::new(params),
            ledger: Ledger::new(4096),
            debug: DebugSettings::default(),
            tick: 0,
        }
    }

    #[inline] pub fn tick_index(&self) -> u64 { self.tick }

    /// One simulation tick: command every hinge from its current angle,
    /// then advance the world. The commands a step consumes are always
    /// the ones computed from that step's pre-integration angles.
    pub fn tick<W: PhysicsWorld>(&mut self, world: &mut W) {
        self.ctrl.control_tick(world, &self.chain, &self.targets, &mut self.ledger);
        world.step(TIMESTEP);
        self.tick += 1;
        self.ledger.push(LedgerEvent::Tick { tick: self.tick, dt: TIMESTEP });

        if self.debug.print_every != 0 && (self.tick as u32) % self.debug.print_every == 0 {
            self.print_debug_block(world);
        }
        if self.debug.json_every != 0 && (self.tick as u32) % self.debug.json_every == 0 {
            let _ = self.ledger.write_jsonl("out", self.tick);
        }
        self.ledger.clear();
    }

    fn print_debug_block<W: PhysicsWorld>(&self, world: &W) {
        println!("--- debug @ tick {} ---", self.tick);
        if self.debug.show_joints {
            let mut lines = 0usize;
            for j in 1..self.chain.joints.len() {
                let angle = world.hinge_angle(self.chain.joints[j]);
                let target = self.targets.get(j);
                println!("joint {j}  angle={angle:+.4}  target={target:+.4}  err={:+.4}", target - angle);
                lines += 1;
                if lines >= self.debug.max_lines { break; }
            }
        }
        if self.debug.show_bodies {
            let mut lines = 0usize;
            for (i, b) in self.chain.bodies.iter().enumerate() {
                let p = world.body_pose(*b).pos;
                println!("body {i:2}  pos=({:+.3},{:+.3},{:+.3})", p.x, p.y, p.z);
                lines += 1;
                if lines >= self.debug.max_lines { break; }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::build;
    use crate::registry::ArmRig;
    use servoarm_core::vec3;
    use servoarm_world::KinematicWorld;

    fn scene() -> (KinematicWorld, SimContext) {
        let mut w = KinematicWorld::new();
        let chain = build(&mut w, &ArmRig::reference()).unwrap();
        let ctx = SimContext::new(chain);
        (w, ctx)
    }

    #[test] fn at_rest_with_zero_targets_nothing_moves() {
        let (mut w, mut ctx) = scene();
        for _ in 0..50 {
            ctx.tick(&mut w);
        }
        for j in 1..ctx.chain.joints.len() {
            assert_eq!(w.hinge_angle(ctx.chain.joints[j]), 0.0);
        }
    }

    #[test] fn commands_reflect_pre_step_angles() {
        let (mut w, mut ctx) = scene();
        w.set_hinge_angle(ctx.chain.joints[2], 0.5);
        ctx.tick(&mut w);
        // 10 * (0 - 0.5), computed before the step moved the joint
        assert_eq!(w.hinge_target_velocity(ctx.chain.joints[2]), -5.0);
        assert_ne!(w.hinge_angle(ctx.chain.joints[2]), 0.5);
    }

    #[test] fn gravity_scenario_keeps_the_chain_upright() {
        let (mut w, mut ctx) = scene();
        w.set_gravity(vec3(0.0, 0.0, -9.8));
        let base0 = w.body_pose(ctx.chain.bodies[0]);
        for _ in 0..100 {
            ctx.tick(&mut w);
        }
        let base1 = w.body_pose(ctx.chain.bodies[0]);
        assert_eq!(base0.pos, base1.pos);
        for j in 1..ctx.chain.joints.len() {
            assert!(w.hinge_angle(ctx.chain.joints[j]).abs() < 1.0e-3);
        }
    }

    #[test] fn disturbed_joint_is_pulled_back_under_gravity() {
        let (mut w, mut ctx) = scene();
        w.set_gravity(vec3(0.0, 0.0, -9.8));
        w.set_hinge_angle(ctx.chain.joints[2], 0.3);
        for _ in 0..400 {
            ctx.tick(&mut w);
        }
        // steady-state error scales with gravity torque over k * inertia
        assert!(w.hinge_angle(ctx.chain.joints[2]).abs() < 0.05);
    }

    #[test] fn step_response_converges_on_the_target() {
        let (mut w, mut ctx) = scene();
        ctx.targets.adjust(3, 0.5);
        for _ in 0..600 {
            ctx.tick(&mut w);
        }
        assert!((w.hinge_angle(ctx.chain.joints[3]) - 0.5).abs() < 0.01);
    }

    #[test] fn tick_counter_advances() {
        let (mut w, mut ctx) = scene();
        ctx.tick(&mut w);
        ctx.tick(&mut w);
        assert_eq!(ctx.tick_index(), 2);
        assert_eq!(w.tick_index(), 2);
    }
}
