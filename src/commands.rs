//! One function per CLI command, taking input that has already been collected.
//!
//! Nothing here prompts or prints; the binary does that around these calls.

use std::time::Duration;
use tracing::{info, warn};
use crate::error::{MirrorError, Result};
use crate::manager::PackageManager;
use crate::mirror::Mirror;
use crate::probe::LatencyProbe;
use crate::store::{Listing, RegistryStore};

/// What the package manager is currently pointed at.
#[derive(Debug, Clone, PartialEq)]
pub enum Active {
    /// The active registry is one of the known mirrors.
    Known(Mirror),
    /// No mirror matches, this is the raw URL the package manager reported.
    Unknown(String),
}

/// Lists every mirror. This never fails: if the package manager cannot be queried
/// the mirrors are listed with no active marker and the query error is handed back.
pub fn list(store: &RegistryStore, pm: &dyn PackageManager) -> (Listing, Option<MirrorError>) {
    match pm.current_registry() {
        Ok(current) => (store.list(&current), None),
        Err(e) => {
            warn!(error = %e, "listing without the active registry");
            let listing = Listing { entries: store.entries(), active: Vec::new() };
            (listing, Some(e))
        }
    }
}

pub fn current(store: &RegistryStore, pm: &dyn PackageManager) -> Result<Active> {
    let current = pm.current_registry()?;
    Ok(match store.find_by_registry(&current) {
        Some(mirror) => Active::Known(mirror.clone()),
        None => Active::Unknown(current.trim().to_string()),
    })
}

/// Switches the package manager to the mirror called `name`.
pub fn use_mirror(store: &RegistryStore, pm: &dyn PackageManager, name: &str) -> Result<Mirror> {
    let mirror = store.get(name)
        .ok_or_else(|| MirrorError::NotFound(name.to_string()))?;
    pm.set_registry(&mirror.registry)?;
    info!(name, registry = %mirror.registry, "switched registry");
    Ok(mirror.clone())
}

pub fn ping(store: &RegistryStore, probe: &dyn LatencyProbe, name: &str) -> Result<Duration> {
    let mirror = store.get(name)
        .ok_or_else(|| MirrorError::NotFound(name.to_string()))?;
    probe.ping(mirror.ping.trim())
}

pub fn add(store: &mut RegistryStore, name: &str, url: &str) -> Result<Mirror> {
    store.add(name, url)
}

pub fn edit(store: &mut RegistryStore, name: &str, url: &str) -> Result<Mirror> {
    store.edit(name, url)
}

pub fn rename(store: &mut RegistryStore, old_name: &str, new_name: &str) -> Result<Mirror> {
    store.rename(old_name, new_name)
}

/// Deletes `name` unless it is the registry the package manager is using right now.
pub fn delete(store: &mut RegistryStore, pm: &dyn PackageManager, name: &str) -> Result<Mirror> {
    let current = pm.current_registry()?;
    store.delete(name, &current)
}

/// Renders a listing, one line per mirror:
///
/// ```text
/// * npm--  https://registry.npmjs.org/
///   yarn-  https://registry.yarnpkg.com/
/// ```
///
/// The marker and name are padded with `-` to the longest name plus three columns.
pub fn format_listing(listing: &Listing) -> Vec<String> {
    let width = listing.entries.iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0) + 3;
    listing.entries.iter()
        .map(|mirror| {
            let marker = if listing.is_active(&mirror.name) { "* " } else { "  " };
            let label = format!("{marker}{}", mirror.name);
            let pad = width.saturating_sub(label.chars().count());
            format!("{label}{}  {}", "-".repeat(pad), mirror.registry)
        })
        .collect()
}
