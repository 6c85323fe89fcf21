//! The static, ordered catalog of tracked configuration entities.
//!
//! Extending the tracked set only requires appending an entry to
//! [`CATALOG`]; path resolution, copying and reporting are driven entirely
//! by the entries found here.
use std::fmt::Write as _;

/// How an entity is copied between the live and snapshot roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A directory tree copied and fully replaced as a unit.
    DirectoryMirror,
    /// A shared directory of which only the allow-listed file names are
    /// ever read or written; every other file in it is left alone.
    SelectiveFileSet {
        /// File names (no separators) managed inside the container.
        allowed: &'static [&'static str],
    },
    /// A single, optional file.
    WholeFile,
}

impl EntityKind {
    /// Short human-readable label for usage and report output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DirectoryMirror => "directory",
            Self::SelectiveFileSet { .. } => "selected files",
            Self::WholeFile => "file",
        }
    }
}

/// A tracked configuration entity.
///
/// `relative_name` resolves identically under the live root and the
/// snapshot root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigEntity {
    /// Stable identifier used in reports.
    pub id: &'static str,
    /// Path relative to either root (`/`-separated).
    pub relative_name: &'static str,
    /// Copy semantics.
    pub kind: EntityKind,
}

/// Every tracked entity, in processing order.
pub static CATALOG: &[ConfigEntity] = &[
    ConfigEntity {
        id: "skills",
        relative_name: "skills",
        kind: EntityKind::DirectoryMirror,
    },
    // plugins/cache and plugins/marketplaces are regenerable and machine-specific
    ConfigEntity {
        id: "plugins",
        relative_name: "plugins",
        kind: EntityKind::SelectiveFileSet {
            allowed: &["installed_plugins.json", "known_marketplaces.json"],
        },
    },
    ConfigEntity {
        id: "settings",
        relative_name: "settings.json",
        kind: EntityKind::WholeFile,
    },
    ConfigEntity {
        id: "keybindings",
        relative_name: "keybindings.json",
        kind: EntityKind::WholeFile,
    },
];

/// Return the tracked entity catalog.
#[must_use]
pub const fn catalog() -> &'static [ConfigEntity] {
    CATALOG
}

/// Usage summary listing every tracked path with its copy semantics.
#[must_use]
pub fn usage_summary(entities: &[ConfigEntity]) -> String {
    let mut out = String::from("Tracked paths (relative to the live and snapshot roots):");
    for entity in entities {
        let shown = match entity.kind {
            EntityKind::DirectoryMirror => format!("{}/", entity.relative_name),
            EntityKind::SelectiveFileSet { allowed } => {
                format!("{}/{{{}}}", entity.relative_name, allowed.join(","))
            }
            EntityKind::WholeFile => entity.relative_name.to_string(),
        };
        let _ = write!(out, "\n  {shown:<58} {}", entity.kind.label());
    }
    out
}
