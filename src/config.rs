use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};
use crate::global::utils::get_registries_file;
use crate::manager::DEFAULT_PROGRAM;
use crate::probe::DEFAULT_TIMEOUT;

pub const REGISTRIES_ENV: &str = "REGMIRROR_REGISTRIES";
pub const NPM_ENV: &str = "REGMIRROR_NPM";
pub const PING_TIMEOUT_ENV: &str = "REGMIRROR_PING_TIMEOUT_MS";
pub const LOG_ENV: &str = "REGMIRROR_LOG";

/// Runtime settings, resolved once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the mirrors are persisted.
    pub registries_file: PathBuf,
    /// Package manager executable queried for the active registry.
    pub npm_program: String,
    pub ping_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let registries_file = match get(REGISTRIES_ENV) {
            Some(path) => PathBuf::from(path),
            None => get_registries_file()?,
        };
        let npm_program = get(NPM_ENV).unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
        let ping_timeout = match get(PING_TIMEOUT_ENV) {
            Some(ms) => {
                let ms: u64 = ms.trim().parse()
                    .with_context(|| format!("{PING_TIMEOUT_ENV} must be a number of milliseconds, got '{ms}'"))?;
                Duration::from_millis(ms)
            }
            None => DEFAULT_TIMEOUT,
        };
        Ok(Config { registries_file, npm_program, ping_timeout })
    }
}
