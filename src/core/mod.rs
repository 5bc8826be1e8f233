pub mod config;
pub mod reconcile;
pub mod render;
pub mod sync;
