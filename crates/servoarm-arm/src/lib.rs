//! 4-link servo arm core: static rig description, chain construction,
//! joint targets, the proportional velocity servo, and the step driver.

pub mod registry;
pub mod chain;
pub mod target;
pub mod control;
pub mod driver;
pub mod harness;

pub use registry::{ArmRig, HingeDef, LinkDef, NUM_LINKS};
pub use chain::{build, ArmChain};
pub use target::JointTargets;
pub use control::{ServoCtrl, ServoParams};
pub use driver::{SimContext, TIMESTEP};
pub use harness::{start_view, CapsulePose, Viewpoint, DEG};
