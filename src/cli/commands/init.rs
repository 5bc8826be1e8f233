use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;
use std::fs;

/// Handle the `init` command
///
/// Writes the configuration file (values from the environment are kept)
/// and creates the output directory.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Some(Commands::Init { force }) = &cli.command {
        let path = cli
            .config_file
            .clone()
            .unwrap_or_else(Config::config_file);

        ConfigLogic::init(cfg, &path, *force)?;

        let root = cfg.output_root();
        fs::create_dir_all(&root)?;
        info(format!("Output directory: {}", root.display()));
    }
    Ok(())
}
