use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info, warn};
use crate::error::{MirrorError, Result};
use crate::mirror::{builtin_mirrors, is_protected, Mirror};

/// The mutations that need a non-protected target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Delete,
    Rename,
}

/// A snapshot of the store, plus the names of the mirrors matching the active registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub entries: Vec<Mirror>,
    /// Every mirror whose registry is the active one. Several mirrors may share a URL.
    pub active: Vec<String>,
}

impl Listing {
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|n| n == name)
    }
}

/// All known mirrors, backed by a JSON file.
///
/// Every successful mutation rewrites the whole file. If that write fails the
/// in-memory change is kept and a [`MirrorError::PersistenceError`] is returned.
#[derive(Debug)]
pub struct RegistryStore {
    path: PathBuf,
    mirrors: BTreeMap<String, Mirror>,
}

impl RegistryStore {
    /// Loads the store from `path`.
    ///
    /// A missing file is created with the built-in mirrors; if that first write
    /// fails the seeded store is still returned and the next mutation retries it.
    /// A file that cannot be read or parsed is an error, it is never overwritten.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RegistryStore> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            info!(path = %path.display(), "registries file not found, seeding built-in mirrors");
            let store = RegistryStore::with_builtins(path);
            if let Err(e) = store.save() {
                warn!(error = %e, "could not write the seeded registries file");
            }
            return Ok(store);
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| MirrorError::persistence(&path, e))?;
        let mut mirrors: BTreeMap<String, Mirror> = serde_json::from_str(&content)
            .map_err(|e| MirrorError::persistence(&path, e.into()))?;
        for (name, mirror) in mirrors.iter_mut() {
            mirror.name = name.clone();
        }
        debug!(path = %path.display(), count = mirrors.len(), "loaded registries");
        Ok(RegistryStore { path, mirrors })
    }

    /// An in-memory store holding only the built-in mirrors. Nothing is written.
    pub fn with_builtins<P: Into<PathBuf>>(path: P) -> RegistryStore {
        let mirrors = builtin_mirrors()
            .into_iter()
            .map(|m| (m.name.clone(), m))
            .collect();
        RegistryStore { path: path.into(), mirrors }
    }

    /// Writes the whole map as JSON indented with four spaces.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| MirrorError::persistence(parent, e))?;
            }
        }
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.mirrors.serialize(&mut ser)
            .map_err(|e| MirrorError::persistence(&self.path, e.into()))?;
        fs::write(&self.path, buf)
            .map_err(|e| MirrorError::persistence(&self.path, e))?;
        debug!(path = %self.path.display(), "registries saved");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Mirror> {
        self.mirrors.get(name)
    }

    /// All mirror names, in order.
    pub fn names(&self) -> Vec<String> {
        self.mirrors.keys().cloned().collect()
    }

    /// The mirror whose registry URL equals `url`, ignoring surrounding whitespace.
    pub fn find_by_registry(&self, url: &str) -> Option<&Mirror> {
        let url = url.trim();
        self.mirrors.values().find(|m| m.registry.trim() == url)
    }

    /// Every mirror, in order.
    pub fn entries(&self) -> Vec<Mirror> {
        self.mirrors.values().cloned().collect()
    }

    /// Every mirror in order, and which of them point at the active registry `current`.
    pub fn list(&self, current: &str) -> Listing {
        let current = current.trim();
        Listing {
            entries: self.entries(),
            active: self.mirrors.values()
                .filter(|m| m.registry.trim() == current)
                .map(|m| m.name.clone())
                .collect(),
        }
    }

    /// Names that are not built-in.
    pub fn editable_names(&self) -> Vec<String> {
        self.mirrors.keys()
            .filter(|name| !is_protected(name))
            .cloned()
            .collect()
    }

    /// Like [`editable_names`](Self::editable_names), but an empty result is an error for `action`.
    pub fn editable_for(&self, action: Action) -> Result<Vec<String>> {
        let names = self.editable_names();
        if names.is_empty() {
            return Err(match action {
                Action::Edit => MirrorError::NothingToEdit,
                Action::Delete => MirrorError::NothingToDelete,
                Action::Rename => MirrorError::NothingToRename,
            });
        }
        Ok(names)
    }

    /// Validates a name for `add` or as the target of `rename`. Returns it trimmed.
    pub fn check_new_name<'a>(&self, name: &'a str) -> Result<&'a str> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MirrorError::EmptyField("name"));
        }
        if is_protected(name) || self.mirrors.contains_key(name) {
            return Err(MirrorError::NameConflict(name.to_string()));
        }
        Ok(name)
    }

    pub fn add(&mut self, name: &str, url: &str) -> Result<Mirror> {
        let name = self.check_new_name(name)?;
        let url = check_url(url)?;
        let mirror = Mirror::from_url(name, url);
        self.mirrors.insert(name.to_string(), mirror.clone());
        info!(name, url, "mirror added");
        self.save()?;
        Ok(mirror)
    }

    /// Replaces the URLs of a custom mirror.
    pub fn edit(&mut self, name: &str, url: &str) -> Result<Mirror> {
        let name = self.check_existing_custom(name)?;
        let url = check_url(url)?;
        let mirror = Mirror::from_url(&name, url);
        self.mirrors.insert(name.clone(), mirror.clone());
        info!(name = %name, url, "mirror edited");
        self.save()?;
        Ok(mirror)
    }

    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<Mirror> {
        let old_name = self.check_existing_custom(old_name)?;
        let new_name = self.check_new_name(new_name)?.to_string();
        let mut mirror = self.mirrors.remove(&old_name)
            .ok_or_else(|| MirrorError::NotFound(old_name.clone()))?;
        mirror.name = new_name.clone();
        self.mirrors.insert(new_name.clone(), mirror.clone());
        info!(from = %old_name, to = %new_name, "mirror renamed");
        self.save()?;
        Ok(mirror)
    }

    /// Removes a custom mirror. `current` is the registry URL the package manager
    /// reports as active; the mirror pointing at it cannot be deleted.
    pub fn delete(&mut self, name: &str, current: &str) -> Result<Mirror> {
        let name = self.check_existing_custom(name)?;
        if self.mirrors.get(&name).is_some_and(|m| m.registry.trim() == current.trim()) {
            return Err(MirrorError::ActiveMirrorInUse(name));
        }
        let mirror = self.mirrors.remove(&name)
            .ok_or_else(|| MirrorError::NotFound(name.clone()))?;
        info!(name = %name, "mirror deleted");
        self.save()?;
        Ok(mirror)
    }

    fn check_existing_custom(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if is_protected(name) {
            return Err(MirrorError::Protected(name.to_string()));
        }
        if !self.mirrors.contains_key(name) {
            return Err(MirrorError::NotFound(name.to_string()));
        }
        Ok(name.to_string())
    }
}

/// Rejects blank URLs. Returns the URL trimmed.
pub fn check_url(url: &str) -> Result<&str> {
    let url = url.trim();
    if url.is_empty() {
        return Err(MirrorError::EmptyField("url"));
    }
    Ok(url)
}
