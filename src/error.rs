use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while managing mirrors.
///
/// None of these are fatal for the process: the CLI reports them as a short
/// message and moves on.
#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("the name '{0}' is reserved or already taken")]
    NameConflict(String),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("'{0}' is a built-in mirror and cannot be changed")]
    Protected(String),

    #[error("no mirror named '{0}'")]
    NotFound(String),

    #[error("there are no custom mirrors to edit")]
    NothingToEdit,

    #[error("there are no custom mirrors to delete")]
    NothingToDelete,

    #[error("there are no custom mirrors to rename")]
    NothingToRename,

    #[error("'{0}' is the registry currently in use, switch to another one first")]
    ActiveMirrorInUse(String),

    #[error("package manager command failed: {0}")]
    SubprocessFailure(String),

    #[error("could not access {}: {source}", path.display())]
    PersistenceError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{url} is unreachable: {reason}")]
    ProbeFailure { url: String, reason: String },

    #[error("could not set up a latency probe with a {timeout_ms} ms timeout: {reason}")]
    ProbeSetup { timeout_ms: u128, reason: String },
}

pub type Result<T> = std::result::Result<T, MirrorError>;

impl MirrorError {
    pub(crate) fn persistence<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        MirrorError::PersistenceError {
            path: path.into(),
            source,
        }
    }
}
