use super::requested_nips;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::{SyncLogic, SyncOptions};
use crate::errors::AppResult;
use crate::fetch::MirClient;

/// Handle `sync`; `None` means the bare invocation with configured values.
pub fn handle(cmd: Option<&Commands>, cfg: &Config) -> AppResult<()> {
    let (nips, quiet, on_corrupt) = match cmd {
        Some(Commands::Sync {
            nip,
            quiet,
            on_corrupt,
        }) => (nip.as_slice(), *quiet, *on_corrupt),
        _ => (&[][..], false, None),
    };

    let mut cfg = cfg.clone();
    if let Some(policy) = on_corrupt {
        cfg.on_corrupt_history = policy;
    }

    let nips = requested_nips(nips, &cfg)?;
    let tz = cfg.zone()?;
    let client = MirClient::from_config(&cfg)?;

    SyncLogic::run(&cfg, &nips, &client, &tz, SyncOptions { quiet }).into_result()?;
    Ok(())
}
