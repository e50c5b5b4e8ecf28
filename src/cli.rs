use clap::{Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    #[command(subcommand)]
    pub(crate) command: MirrorCommand,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum MirrorCommand {
    /// List all mirrors, marking the one currently in use with `*`
    #[clap(alias = "ls")]
    List,
    /// Switch the package manager to a mirror
    Use {
        /// Mirror to switch to. Prompts for a selection when omitted
        name: Option<String>,
    },
    /// Show the mirror currently in use, or the raw registry URL if it is unknown
    Current,
    /// Measure the response time of a mirror
    Ping {
        /// Mirror to probe. Prompts for a selection when omitted
        name: Option<String>,
    },
    /// Add a custom mirror
    Add,
    /// Delete a custom mirror. The mirror in use cannot be deleted
    #[clap(alias = "del")]
    Delete,
    /// Rename a custom mirror
    Rename,
    /// Change the URL of a custom mirror
    Edit,
}
