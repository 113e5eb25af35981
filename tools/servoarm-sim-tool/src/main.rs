//! servoarm-sim — headless driver for the 4-link servo arm.

use anyhow::Result;
use clap::Parser;
use std::{fs, path::PathBuf};

use servoarm_arm::{build, start_view, ArmRig, SimContext};
use servoarm_core::vec3;
use servoarm_viz::DebugSettings;
use servoarm_world::{KinematicWorld, PhysicsWorld};

#[derive(Parser, Debug)]
#[command(name = "servoarm-sim", version, about = "Drive the 4-link servo arm headless")]
struct Opts {
    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 400)]
    ticks: u32,

    /// Print a debug block every N ticks (0 = never)
    #[arg(long, default_value_t = 100)]
    print_every: u32,

    /// Write the ledger as JSONL under out/ every N ticks (0 = never)
    #[arg(long, default_value_t = 0)]
    json_every: u32,

    /// Command characters fed one per tick (j/f, k/d, l/s nudge joints 1-3)
    #[arg(long, default_value = "")]
    script: String,

    /// Load the arm rig from a JSON file instead of the built-in table
    #[arg(long)]
    rig: Option<PathBuf>,

    /// Print the built-in rig as pretty JSON and exit
    #[arg(long)]
    dump_rig: bool,
}

fn main() -> Result<()> {
    let opt = Opts::parse();

    if opt.dump_rig {
        println!("{}", serde_json::to_string_pretty(&ArmRig::reference())?);
        return Ok(());
    }

    let rig: ArmRig = match &opt.rig {
        Some(p) => serde_json::from_str(&fs::read_to_string(p)?)?,
        None => ArmRig::reference(),
    };

    let mut world = KinematicWorld::new();
    world.set_gravity(vec3(0.0, 0.0, -9.8));
    world.add_plane(vec3(0.0, 0.0, 1.0), 0.0);
    let chain = build(&mut world, &rig)?;

    let mut ctx = SimContext::new(chain);
    ctx.debug = DebugSettings {
        print_every: opt.print_every,
        json_every: opt.json_every,
        show_joints: true,
        show_bodies: false,
        ..DebugSettings::default()
    };

    let view = start_view();
    println!("viewpoint xyz={:?} hpr={:?}", view.xyz, view.hpr);

    let mut script = opt.script.chars();
    for _ in 0..opt.ticks {
        if let Some(c) = script.next() {
            ctx.command(c);
        }
        ctx.tick(&mut world);
    }

    for j in 1..ctx.chain.joints.len() {
        println!(
            "joint {j}  angle={:+.4}  target={:+.4}",
            world.hinge_angle(ctx.chain.joints[j]),
            ctx.targets.get(j)
        );
    }
    println!("hash={:02x?}", world.step_hash());
    Ok(())
}
