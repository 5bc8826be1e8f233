use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Effective configuration as YAML, token masked.
    pub fn render(cfg: &Config) -> AppResult<String> {
        serde_yaml::to_string(&cfg.redacted()).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Write a configuration file with the current values, unless one exists.
    pub fn init(cfg: &Config, path: &Path, force: bool) -> AppResult<()> {
        if path.exists() && !force {
            warning(format!(
                "Configuration file {} already exists (use --force to overwrite)",
                path.display()
            ));
            return Ok(());
        }
        cfg.save(path)?;
        success(format!("Config file: {}", path.display()));
        Ok(())
    }

    /// Open `path` in the requested editor, falling back to $EDITOR / $VISUAL.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.map_or_else(|| default_editor.clone(), str::to_string);

        if run_editor(&editor_to_use, path) {
            success(format!("Configuration edited with '{editor_to_use}'"));
            return Ok(());
        }

        if editor_to_use != default_editor {
            info(format!(
                "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
            ));
            if run_editor(&default_editor, path) {
                success(format!("Configuration edited with '{default_editor}'"));
                return Ok(());
            }
        }

        Err(AppError::Config(format!(
            "unable to open {} with '{editor_to_use}'",
            path.display()
        )))
    }
}

fn run_editor(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
