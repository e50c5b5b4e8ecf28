use serde::{Deserialize, Serialize};

/// A named registry endpoint.
///
/// The name is the key of the persisted map, so it is not written inside the record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Mirror {
    #[serde(skip)]
    pub name: String,
    /// Landing page of the mirror.
    pub home: String,
    /// The URL handed to the package manager.
    pub registry: String,
    /// The URL probed by `ping`.
    pub ping: String,
}

impl Mirror {
    /// Builds a mirror whose home and registry are both `url`.
    pub fn from_url(name: &str, url: &str) -> Mirror {
        Mirror {
            name: name.to_string(),
            home: url.to_string(),
            registry: url.to_string(),
            ping: derive_ping(url),
        }
    }

    fn builtin(name: &str, home: &str, registry: &str) -> Mirror {
        Mirror {
            name: name.to_string(),
            home: home.to_string(),
            registry: registry.to_string(),
            ping: derive_ping(registry),
        }
    }
}

/// Names that ship with the tool. They can never be added, renamed into, edited or deleted.
pub const PROTECTED_NAMES: [&str; 6] = ["npm", "yarn", "tencent", "cnpm", "taobao", "npmMirror"];

/// Returns `true` if `name` is one of the built-in mirrors.
pub fn is_protected(name: &str) -> bool {
    PROTECTED_NAMES.contains(&name)
}

/// The mirrors a fresh registries file is seeded with.
pub fn builtin_mirrors() -> Vec<Mirror> {
    vec![
        Mirror::builtin("npm", "https://www.npmjs.org", "https://registry.npmjs.org/"),
        Mirror::builtin("yarn", "https://yarnpkg.com", "https://registry.yarnpkg.com/"),
        Mirror::builtin(
            "tencent",
            "https://mirrors.cloud.tencent.com/npm/",
            "https://mirrors.cloud.tencent.com/npm/",
        ),
        Mirror::builtin("cnpm", "https://cnpmjs.org", "https://r.cnpmjs.org/"),
        Mirror::builtin("taobao", "https://npmmirror.com", "https://registry.npmmirror.com/"),
        Mirror::builtin(
            "npmMirror",
            "https://skimdb.npmjs.com/",
            "https://skimdb.npmjs.com/registry/",
        ),
    ]
}

/// Strips exactly one trailing `/` from `url`, if there is one.
///
/// `https://a/b//` becomes `https://a/b/`.
pub fn derive_ping(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}
