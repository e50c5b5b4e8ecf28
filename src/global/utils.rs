use std::path::PathBuf;
use anyhow::{anyhow, Result};
use directories::ProjectDirs;

pub const REGISTRIES_FILE: &str = "registries.json";

/// Per-user configuration directory, e.g. `~/.config/regmirror` on Linux.
pub fn get_global_config_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "regmirror", "regmirror")
        .ok_or_else(|| anyhow!("Could not get project directories"))?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Default location of the registries file.
pub fn get_registries_file() -> Result<PathBuf> {
    Ok(get_global_config_dir()?.join(REGISTRIES_FILE))
}
