use servoarm_core::{Isometry, Scalar};
use servoarm_viz::LedgerEvent;
use servoarm_world::PhysicsWorld;

use crate::driver::SimContext;

/// One degree in radians: the per-keypress target increment.
pub const DEG: Scalar = core::f32::consts::PI / 180.0;

/// One-time camera placement consumed by an external viewer.
#[derive(Copy, Clone, Debug)]
pub struct Viewpoint {
    pub xyz: [f32; 3],
    pub hpr: [f32; 3], // heading, pitch, roll in degrees
}

pub fn start_view() -> Viewpoint {
    Viewpoint { xyz: [3.0, 1.3, 0.8], hpr: [-160.0, 4.5, 0.0] }
}

/// Live pose plus capsule parameters for one link, ready to draw.
#[derive(Copy, Clone, Debug)]
pub struct CapsulePose {
    pub pose: Isometry,
    pub r: Scalar,
    pub length: Scalar,
}

impl SimContext {
    /// Per-tick harness hook: advance the sim, then hand back the links
    /// as drawable capsules at their live poses.
    pub fn sim_step<W: PhysicsWorld>(&mut self, world: &mut W) -> Vec<CapsulePose> {
        self.tick(world);
        self.draw_list(world)
    }

    pub fn draw_list<W: PhysicsWorld>(&self, world: &W) -> Vec<CapsulePose> {
        self.chain
            .bodies
            .iter()
            .zip(&self.chain.shapes)
            .filter_map(|(b, s)| {
                let (r, length) = world.shape_of(*s).capsule_params()?;
                Some(CapsulePose { pose: world.body_pose(*b), r, length })
            })
            .collect()
    }

    /// Command hook: single-character target nudges, one degree per
    /// event. Unmapped characters are ignored.
    pub fn command(&mut self, cmd: char) {
        let (joint, delta) = match cmd {
            'j' => (1, DEG),
            'f' => (1, -DEG),
            'k' => (2, DEG),
            'd' => (2, -DEG),
            'l' => (3, DEG),
            's' => (3, -DEG),
            _ => return,
        };
        self.targets.adjust(joint, delta);
        self.ledger.push(LedgerEvent::TargetAdjust {
            joint: joint as u32,
            delta,
            target: self.targets.get(joint),
        });
    }
}
