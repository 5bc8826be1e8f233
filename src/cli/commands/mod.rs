pub mod config;
pub mod init;
pub mod render;
pub mod sync;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// NIPs from the command line, or the configured list.
pub(crate) fn requested_nips(cli_nips: &[String], cfg: &Config) -> AppResult<Vec<String>> {
    let nips: Vec<String> = if cli_nips.is_empty() {
        cfg.firemen.clone()
    } else {
        cli_nips
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect()
    };

    if nips.is_empty() {
        return Err(AppError::Config(
            "no fireman to process (set FIREMEN_NIP, `firemen` or --nip)".into(),
        ));
    }
    Ok(nips)
}
