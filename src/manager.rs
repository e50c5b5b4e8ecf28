use std::process::Command;
use tracing::{debug, warn};
use crate::error::{MirrorError, Result};

#[cfg(windows)]
pub const DEFAULT_PROGRAM: &str = "npm.cmd";
#[cfg(not(windows))]
pub const DEFAULT_PROGRAM: &str = "npm";

/// The package manager that owns the "current registry" setting.
pub trait PackageManager {
    /// The registry URL currently configured, as reported by the package manager.
    fn current_registry(&self) -> Result<String>;
    /// Points the package manager at `url`.
    fn set_registry(&self, url: &str) -> Result<()>;
}

/// Talks to npm (or anything with the same `config get/set` interface) through subprocesses.
#[derive(Debug, Clone)]
pub struct NpmCli {
    program: String,
}

impl NpmCli {
    pub fn new(program: &str) -> NpmCli {
        NpmCli { program: program.to_string() }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        debug!(program = %self.program, ?args, "running package manager");
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| {
                warn!(program = %self.program, error = %e, "could not start package manager");
                MirrorError::SubprocessFailure(format!("could not run `{}`: {}", self.program, e))
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(program = %self.program, status = %output.status, "package manager failed");
            let reason = if stderr.is_empty() {
                format!("`{} {}` exited with {}", self.program, args.join(" "), output.status)
            } else {
                stderr
            };
            return Err(MirrorError::SubprocessFailure(reason));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl PackageManager for NpmCli {
    fn current_registry(&self) -> Result<String> {
        self.run(&["config", "get", "registry"])
    }

    fn set_registry(&self, url: &str) -> Result<()> {
        self.run(&["config", "set", "registry", url]).map(|_| ())
    }
}
