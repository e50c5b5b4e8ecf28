//! # regmirror core library
//!
//! The logic behind the `regmirror` tool: a small store of named npm registry
//! mirrors that can be listed, switched to, probed, added, edited, renamed and
//! deleted. The store lives in a JSON file; which registry is *active* is owned by
//! the package manager itself and is only ever queried or set through
//! [`PackageManager`].
//!
//! ## Modules Overview
//! - [`mirror`] – The `Mirror` record, the built-in set and ping URL derivation
//! - [`store`] – `RegistryStore`, the validated name → mirror map and its file
//! - [`commands`] – One function per CLI command, free of prompts and printing
//! - [`manager`] – The package manager seam and its npm subprocess implementation
//! - [`probe`] – The latency probe seam and its HTTP implementation
//! - [`config`] – Settings resolved from the environment
//! - [`error`] – `MirrorError`, shared by every module
//! - [`global`] – Per-user directories

pub mod error;
pub mod mirror;
pub mod store;
pub mod commands;
pub mod manager;
pub mod probe;
pub mod config;
pub mod global;

pub use error::*;
pub use mirror::*;
pub use store::*;
pub use manager::*;
pub use probe::*;
pub use config::*;
