//! Remote side: where fresh interventions come from.

mod client;

pub use client::MirClient;

use crate::errors::AppResult;
use crate::models::Intervention;

/// Source of the full, current intervention list of one fireman.
pub trait Fetcher {
    fn fetch(&self, nip: &str) -> AppResult<Vec<Intervention>>;
}
