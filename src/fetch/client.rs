// src/fetch/client.rs

use super::Fetcher;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Intervention;
use std::time::Duration;
use ureq::Agent;

/// Path of the per-fireman statistics endpoint, `{nip}` appended.
const STATISTICS_PATH: &str = "/api/ecawin/statistics/fireman/";

/// Blocking client of the MIR statistics API.
pub struct MirClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl MirClient {
    /// `host` without scheme (`mir.example.ch`); the call is made over https.
    pub fn new(host: &str, token: &str, timeout: Option<Duration>) -> Self {
        let config = Agent::config_builder().timeout_global(timeout).build();
        Self {
            agent: Agent::new_with_config(config),
            base_url: format!("https://{}", host.trim_end_matches('/')),
            token: token.to_string(),
        }
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let (host, token) = cfg.remote()?;
        Ok(Self::new(
            host,
            token,
            cfg.http_timeout_secs.map(Duration::from_secs),
        ))
    }

    pub fn url_for(&self, nip: &str) -> String {
        format!("{}{STATISTICS_PATH}{nip}", self.base_url)
    }
}

impl Fetcher for MirClient {
    fn fetch(&self, nip: &str) -> AppResult<Vec<Intervention>> {
        let url = self.url_for(nip);

        let mut response = self
            .agent
            .get(url.as_str())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.token))
            .call()
            .map_err(|e| describe(&url, e))?;

        response
            .body_mut()
            .read_json::<Vec<Intervention>>()
            .map_err(|e| AppError::Fetch(format!("{url}: unexpected response body: {e}")))
    }
}

fn describe(url: &str, e: ureq::Error) -> AppError {
    match e {
        ureq::Error::StatusCode(code @ (401 | 403)) => {
            AppError::Fetch(format!("{url}: authentication rejected (HTTP {code})"))
        }
        ureq::Error::StatusCode(code) => AppError::Fetch(format!("{url}: HTTP {code}")),
        other => AppError::Fetch(format!("{url}: {other}")),
    }
}
