use std::cell::RefCell;
use std::time::Duration;
use tempfile::TempDir;
use regmirror::commands::{self, Active};
use regmirror::error::{MirrorError, Result};
use regmirror::manager::PackageManager;
use regmirror::probe::LatencyProbe;
use regmirror::store::RegistryStore;

/// A package manager that only remembers what it was told.
struct FakeNpm {
    registry: RefCell<String>,
}

impl FakeNpm {
    fn pointing_at(url: &str) -> FakeNpm {
        FakeNpm { registry: RefCell::new(format!("{url}\n")) }
    }
}

impl PackageManager for FakeNpm {
    fn current_registry(&self) -> Result<String> {
        Ok(self.registry.borrow().clone())
    }

    fn set_registry(&self, url: &str) -> Result<()> {
        *self.registry.borrow_mut() = url.to_string();
        Ok(())
    }
}

struct BrokenNpm;

impl PackageManager for BrokenNpm {
    fn current_registry(&self) -> Result<String> {
        Err(MirrorError::SubprocessFailure("npm: command not found".to_string()))
    }

    fn set_registry(&self, _url: &str) -> Result<()> {
        Err(MirrorError::SubprocessFailure("npm: command not found".to_string()))
    }
}

struct FakeProbe {
    pinged: RefCell<Vec<String>>,
}

impl LatencyProbe for FakeProbe {
    fn ping(&self, url: &str) -> Result<Duration> {
        self.pinged.borrow_mut().push(url.to_string());
        if url.contains("offline") {
            return Err(MirrorError::ProbeFailure { url: url.to_string(), reason: "timed out".to_string() });
        }
        Ok(Duration::from_millis(42))
    }
}

fn setup_tests() -> (TempDir, RegistryStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = RegistryStore::load(temp_dir.path().join("registries.json")).unwrap();
    (temp_dir, store)
}

const NPM: &str = "https://registry.npmjs.org/";

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_add_then_list() {
        let (_dir, mut store) = setup_tests();
        let npm = FakeNpm::pointing_at(NPM);
        commands::add(&mut store, "foo", "https://foo.example/").unwrap();
        commands::add(&mut store, "bar", "https://bar.example/npm").unwrap();

        let (listing, query_error) = commands::list(&store, &npm);
        assert!(query_error.is_none());
        assert_eq!(listing.active, vec!["npm".to_string()]);
        let foo = listing.entries.iter().find(|m| m.name == "foo").unwrap();
        assert_eq!(foo.registry, "https://foo.example/");
        assert_eq!(foo.ping, "https://foo.example");
        let bar = listing.entries.iter().find(|m| m.name == "bar").unwrap();
        assert_eq!(bar.ping, "https://bar.example/npm");
    }

    #[test]
    fn test_list_marks_builtin_sharing_url_with_custom() {
        let (_dir, mut store) = setup_tests();
        let npm = FakeNpm::pointing_at(NPM);
        commands::add(&mut store, "mine", NPM).unwrap();

        let (listing, _) = commands::list(&store, &npm);
        assert!(listing.is_active("mine"));
        assert!(listing.is_active("npm"));
        let lines = commands::format_listing(&listing);
        assert_eq!(lines.iter().filter(|l| l.starts_with("* ")).count(), 2);
        assert!(lines.iter().any(|l| l.starts_with("* npm-")));
    }

    #[test]
    fn test_add_conflicts_leave_store_unchanged() {
        let (dir, mut store) = setup_tests();
        store.add("foo", "https://foo.example/").unwrap();
        let before = fs::read_to_string(dir.path().join("registries.json")).unwrap();

        for name in ["npm", "taobao", "foo"] {
            let err = store.add(name, "https://other.example/").unwrap_err();
            assert!(matches!(err, MirrorError::NameConflict(_)), "{name}: {err}");
        }
        assert_eq!(store.get("foo").unwrap().registry, "https://foo.example/");
        assert_eq!(store.names().len(), 7);
        assert_eq!(fs::read_to_string(dir.path().join("registries.json")).unwrap(), before);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let (dir, mut store) = setup_tests();
        store.add("foo", "https://foo.example/").unwrap();
        store.edit("foo", "https://mirror.example/npm/").unwrap();

        let reloaded = RegistryStore::load(dir.path().join("registries.json")).unwrap();
        let foo = reloaded.get("foo").unwrap();
        assert_eq!(foo.name, "foo");
        assert_eq!(foo.home, "https://mirror.example/npm/");
        assert_eq!(foo.registry, "https://mirror.example/npm/");
        assert_eq!(foo.ping, "https://mirror.example/npm");
    }

    #[test]
    fn test_rename_round_trip() {
        let (dir, mut store) = setup_tests();
        let path = dir.path().join("registries.json");
        store.add("foo", "https://foo.example/").unwrap();
        let original = fs::read_to_string(&path).unwrap();

        let renamed = store.rename("foo", "bar").unwrap();
        assert_eq!(renamed.name, "bar");
        assert!(store.get("foo").is_none());
        assert_eq!(store.get("bar").unwrap().registry, "https://foo.example/");

        store.rename("bar", "foo").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_rename_rules() {
        let (_dir, mut store) = setup_tests();
        store.add("foo", "https://foo.example/").unwrap();
        store.add("bar", "https://bar.example/").unwrap();

        assert!(matches!(store.rename("npm", "mine"), Err(MirrorError::Protected(_))));
        assert!(matches!(store.rename("foo", "yarn"), Err(MirrorError::NameConflict(_))));
        assert!(matches!(store.rename("foo", "bar"), Err(MirrorError::NameConflict(_))));
        assert!(matches!(store.rename("foo", "  "), Err(MirrorError::EmptyField(_))));
        assert!(matches!(store.rename("missing", "baz"), Err(MirrorError::NotFound(_))));
        assert!(store.get("foo").is_some());
    }

    #[test]
    fn test_edit_rules() {
        let (_dir, mut store) = setup_tests();
        store.add("foo", "https://foo.example/").unwrap();

        assert!(matches!(store.edit("npm", "https://x/"), Err(MirrorError::Protected(_))));
        assert!(matches!(store.edit("missing", "https://x/"), Err(MirrorError::NotFound(_))));
        assert!(matches!(store.edit("foo", " "), Err(MirrorError::EmptyField(_))));
        assert_eq!(store.get("npm").unwrap().registry, NPM);
    }

    #[test]
    fn test_delete_inactive_mirror() {
        let (dir, mut store) = setup_tests();
        let npm = FakeNpm::pointing_at(NPM);
        commands::add(&mut store, "foo", "https://foo.example/").unwrap();

        let removed = commands::delete(&mut store, &npm, "foo").unwrap();
        assert_eq!(removed.name, "foo");
        assert!(store.get("foo").is_none());
        assert_eq!(store.names().len(), 6);

        let reloaded = RegistryStore::load(dir.path().join("registries.json")).unwrap();
        assert!(reloaded.get("foo").is_none());
        assert_eq!(reloaded.names().len(), 6);
    }

    #[test]
    fn test_delete_active_mirror_is_refused() {
        let (_dir, mut store) = setup_tests();
        commands::add(&mut store, "foo", "https://foo.example/").unwrap();
        let npm = FakeNpm::pointing_at("https://foo.example/");

        let err = commands::delete(&mut store, &npm, "foo").unwrap_err();
        assert!(matches!(err, MirrorError::ActiveMirrorInUse(ref name) if name == "foo"));
        assert!(store.get("foo").is_some());
    }

    #[test]
    fn test_delete_builtin_is_refused() {
        let (_dir, mut store) = setup_tests();
        let npm = FakeNpm::pointing_at("https://foo.example/");
        assert!(matches!(commands::delete(&mut store, &npm, "yarn"), Err(MirrorError::Protected(_))));
    }

    #[test]
    fn test_use_switches_registry() {
        let (_dir, store) = setup_tests();
        let npm = FakeNpm::pointing_at(NPM);

        let mirror = commands::use_mirror(&store, &npm, "taobao").unwrap();
        assert_eq!(npm.current_registry().unwrap(), mirror.registry);
        assert_eq!(commands::current(&store, &npm).unwrap(), Active::Known(mirror));
        assert!(matches!(commands::use_mirror(&store, &npm, "nope"), Err(MirrorError::NotFound(_))));
    }

    #[test]
    fn test_current_reports_unknown_url() {
        let (_dir, store) = setup_tests();
        let npm = FakeNpm::pointing_at("https://private.example/");
        assert_eq!(
            commands::current(&store, &npm).unwrap(),
            Active::Unknown("https://private.example/".to_string())
        );
    }

    #[test]
    fn test_subprocess_failure_is_reported() {
        let (_dir, mut store) = setup_tests();
        store.add("foo", "https://foo.example/").unwrap();
        let (listing, query_error) = commands::list(&store, &BrokenNpm);
        assert!(matches!(query_error, Some(MirrorError::SubprocessFailure(_))));
        assert_eq!(listing.entries.len(), 7);
        assert!(listing.active.is_empty());
        assert!(matches!(commands::delete(&mut store, &BrokenNpm, "foo"), Err(MirrorError::SubprocessFailure(_))));
        assert!(store.get("foo").is_some());
    }

    #[test]
    fn test_ping_uses_ping_url() {
        let (_dir, mut store) = setup_tests();
        let probe = FakeProbe { pinged: RefCell::new(Vec::new()) };
        store.add("offline", "https://offline.example/").unwrap();

        let elapsed = commands::ping(&store, &probe, "npm").unwrap();
        assert_eq!(elapsed, Duration::from_millis(42));
        assert!(matches!(
            commands::ping(&store, &probe, "offline"),
            Err(MirrorError::ProbeFailure { .. })
        ));
        assert_eq!(*probe.pinged.borrow(), vec![
            "https://registry.npmjs.org".to_string(),
            "https://offline.example".to_string(),
        ]);
    }

    #[test]
    fn test_protected_names_survive_removal_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registries.json");
        fs::write(&path, r#"{ "foo": { "home": "https://foo/", "registry": "https://foo/", "ping": "https://foo" } }"#).unwrap();

        let mut store = RegistryStore::load(&path).unwrap();
        assert_eq!(store.names().len(), 1);
        assert!(matches!(store.add("npm", "https://x/"), Err(MirrorError::NameConflict(_))));
        assert_eq!(store.editable_names(), vec!["foo".to_string()]);
    }
}
