pub mod identity;
pub mod intervention;

pub use identity::Identity;
pub use intervention::{Chief, CrewMember, Intervention};
