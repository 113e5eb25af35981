pub mod scalar;
pub mod ids;
pub mod types;
pub mod hash;
pub mod time;

pub use scalar::Scalar;
pub use ids::{BodyId, ShapeId, JointId};
pub use types::{Vec3, Mat3, Isometry, vec3, iso, quat_identity};
pub use hash::{StepHasher, hash_vec3, hash_quat};
pub use time::StepStats;
pub use glam::Quat;
