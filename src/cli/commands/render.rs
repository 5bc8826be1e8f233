use super::requested_nips;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::render::RenderLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, header, separator};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Render { nip } = cmd {
        let nips = requested_nips(nip, cfg)?;
        let root = cfg.output_root();
        let tz = cfg.zone()?;
        let mut failed = 0;

        for n in &nips {
            header(format!("Rendering report for {n}"));
            if let Err(e) = RenderLogic::render(&root, n, &tz) {
                error(format!("{n}: {e}"));
                failed += 1;
            }
            separator();
        }

        if failed > 0 {
            return Err(AppError::Incomplete(failed));
        }
    }
    Ok(())
}
