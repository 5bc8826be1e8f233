use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use clap::ValueEnum;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_MIR_DOMAIN: &str = "MIR_DOMAIN";
pub const ENV_AUTH_TOKEN: &str = "AUTH_TOKEN";
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";
pub const ENV_FIREMEN_NIP: &str = "FIREMEN_NIP";
pub const ENV_ON_CORRUPT_HISTORY: &str = "ON_CORRUPT_HISTORY";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const ENV_DISPLAY_TZ: &str = "DISPLAY_TZ";

/// Dotenv file read from the working directory.
pub const DOTENV_FILE: &str = ".env";
/// Zone of the wall-clock times written in the report.
pub const DEFAULT_DISPLAY_TZ: &str = "Europe/Zurich";

/// What to do when the stored history exists but cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CorruptHistoryPolicy {
    /// Skip the fireman, leave the file untouched.
    #[default]
    Abort,
    /// Archive the unreadable file and rebuild the history from the feed.
    StartEmpty,
}

impl FromStr for CorruptHistoryPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "start-empty" | "start_empty" | "empty" => Ok(Self::StartEmpty),
            other => Err(AppError::Config(format!(
                "invalid corrupt history policy '{other}' (expected 'abort' or 'start-empty')"
            ))),
        }
    }
}

impl fmt::Display for CorruptHistoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::StartEmpty => write!(f, "start-empty"),
        }
    }
}

/// Runtime configuration, built once in `run()` and passed down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Host of the statistics service, without scheme.
    #[serde(default)]
    pub mir_domain: String,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// NIPs to synchronize, in order.
    #[serde(default)]
    pub firemen: Vec<String>,
    #[serde(default)]
    pub on_corrupt_history: CorruptHistoryPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_timeout_secs: Option<u64>,
    /// IANA zone name, e.g. `Europe/Zurich`.
    #[serde(default = "default_display_tz")]
    pub display_tz: String,
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_display_tz() -> String {
    DEFAULT_DISPLAY_TZ.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mir_domain: String::new(),
            auth_token: String::new(),
            output_dir: default_output_dir(),
            firemen: Vec::new(),
            on_corrupt_history: CorruptHistoryPolicy::default(),
            http_timeout_secs: None,
            display_tz: default_display_tz(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rfirelog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rfirelog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rfirelog.conf")
    }

    /// Config file (or defaults) overlaid with `.env` and the process
    /// environment.
    pub fn load(custom_file: Option<&Path>) -> AppResult<Self> {
        Self::from_sources(custom_file, Path::new(DOTENV_FILE), |key| {
            std::env::var(key).ok()
        })
    }

    /// Layering behind `load`: file < dotenv file < `process` lookup.
    ///
    /// Variables found through `process` always win over the dotenv file.
    pub fn from_sources<F>(
        custom_file: Option<&Path>,
        dotenv_file: &Path,
        process: F,
    ) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::from_file(custom_file)?;
        let dotenv = read_dotenv(dotenv_file)?;
        cfg.apply_env(|key| process(key).or_else(|| dotenv.get(key).cloned()))?;
        Ok(cfg)
    }

    /// Read the YAML file; a missing file yields the defaults.
    pub fn from_file(custom_file: Option<&Path>) -> AppResult<Self> {
        let path = custom_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Override fields with the variables found through `lookup`.
    ///
    /// Empty values are ignored so that an exported-but-blank variable does
    /// not wipe a value coming from the config file.
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_MIR_DOMAIN) {
            self.mir_domain = v.trim().to_string();
        }
        if let Some(v) = get(ENV_AUTH_TOKEN) {
            self.auth_token = v.trim().to_string();
        }
        if let Some(v) = get(ENV_OUTPUT_DIR) {
            self.output_dir = v.trim().to_string();
        }
        if let Some(v) = get(ENV_FIREMEN_NIP) {
            self.firemen = parse_nip_list(&v);
        }
        if let Some(v) = get(ENV_ON_CORRUPT_HISTORY) {
            self.on_corrupt_history = v.parse()?;
        }
        if let Some(v) = get(ENV_HTTP_TIMEOUT_SECS) {
            let secs = v.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("{ENV_HTTP_TIMEOUT_SECS} must be a number of seconds"))
            })?;
            self.http_timeout_secs = Some(secs);
        }
        if let Some(v) = get(ENV_DISPLAY_TZ) {
            self.display_tz = v.trim().to_string();
            self.zone()?;
        }
        Ok(())
    }

    /// Output root with `~/` expanded.
    pub fn output_root(&self) -> PathBuf {
        expand_tilde(&self.output_dir)
    }

    /// Zone used to render report times.
    pub fn zone(&self) -> AppResult<Tz> {
        self.display_tz.trim().parse::<Tz>().map_err(|e| {
            AppError::Config(format!("invalid display_tz '{}': {e}", self.display_tz))
        })
    }

    /// Host and token, or a config error naming what is missing.
    pub fn remote(&self) -> AppResult<(&str, &str)> {
        if self.mir_domain.trim().is_empty() {
            return Err(AppError::Config(format!(
                "remote host not configured (set {ENV_MIR_DOMAIN} or mir_domain)"
            )));
        }
        if self.auth_token.trim().is_empty() {
            return Err(AppError::Config(format!(
                "auth token not configured (set {ENV_AUTH_TOKEN} or auth_token)"
            )));
        }
        Ok((self.mir_domain.as_str(), self.auth_token.as_str()))
    }

    /// Copy safe to print: the token is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.auth_token.is_empty() {
            copy.auth_token = "********".to_string();
        }
        copy
    }

    /// Write the configuration file, creating its directory.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|_| AppError::ConfigSave)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }
}

/// Split a comma-separated NIP list, dropping blanks.
pub fn parse_nip_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `KEY=value` pairs of a dotenv file; a missing file yields none.
pub fn read_dotenv(path: &Path) -> AppResult<HashMap<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(AppError::Config(format!("{}: {e}", path.display()))),
    };

    iter.map(|item| item.map_err(|e| AppError::Config(format!("{}: {e}", path.display()))))
        .collect()
}
