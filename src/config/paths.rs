//! Path resolution: concrete source/destination paths per entity.
use std::path::PathBuf;

use super::Roots;
use super::entities::ConfigEntity;
use crate::error::PathResolutionError;

/// Which way an operation copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Live root → snapshot root.
    Backup,
    /// Snapshot root → live root.
    Restore,
}

/// An entity paired with the concrete paths of one operation.
///
/// Produced per invocation; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntity {
    /// The catalog entry.
    pub entity: ConfigEntity,
    /// Path copied from.
    pub source: PathBuf,
    /// Path copied to.
    pub destination: PathBuf,
}

/// Joins catalog entries onto the roots for one direction.
#[derive(Debug)]
pub struct PathResolver<'a> {
    roots: &'a Roots,
    direction: Direction,
}

impl<'a> PathResolver<'a> {
    /// Validate `roots` for `direction`.
    ///
    /// Both roots must be absolute.  For [`Direction::Restore`] the snapshot
    /// root must also exist.  Individual entity paths are not checked.
    ///
    /// # Errors
    ///
    /// Returns an error if a root is relative, or the snapshot root is
    /// missing for a restore.
    pub fn new(roots: &'a Roots, direction: Direction) -> Result<Self, PathResolutionError> {
        for (role, path) in [("live", &roots.live), ("snapshot", &roots.snapshot)] {
            if !path.is_absolute() {
                return Err(PathResolutionError::NotAbsolute {
                    role,
                    path: path.clone(),
                });
            }
        }
        if direction == Direction::Restore && !roots.snapshot.is_dir() {
            return Err(PathResolutionError::SnapshotMissing(roots.snapshot.clone()));
        }
        Ok(Self { roots, direction })
    }

    /// Direction this resolver was built for.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Resolve `entity` to its source and destination paths.
    #[must_use]
    pub fn resolve(&self, entity: &ConfigEntity) -> ResolvedEntity {
        let live = self.roots.live.join(entity.relative_name);
        let snapshot = self.roots.snapshot.join(entity.relative_name);
        let (source, destination) = match self.direction {
            Direction::Backup => (live, snapshot),
            Direction::Restore => (snapshot, live),
        };
        ResolvedEntity {
            entity: *entity,
            source,
            destination,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::entities::{CATALOG, EntityKind};

    const SETTINGS: ConfigEntity = ConfigEntity {
        id: "settings",
        relative_name: "settings.json",
        kind: EntityKind::WholeFile,
    };

    #[test]
    fn backup_copies_live_to_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots::new(dir.path().join("live"), dir.path().join("snap"));
        let resolver = PathResolver::new(&roots, Direction::Backup).unwrap();
        let resolved = resolver.resolve(&SETTINGS);
        assert_eq!(resolved.source, dir.path().join("live/settings.json"));
        assert_eq!(resolved.destination, dir.path().join("snap/settings.json"));
    }

    #[test]
    fn restore_swaps_source_and_destination() {
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots::new(dir.path().join("live"), dir.path().to_path_buf());
        let resolver = PathResolver::new(&roots, Direction::Restore).unwrap();
        let resolved = resolver.resolve(&SETTINGS);
        assert_eq!(resolved.source, dir.path().join("settings.json"));
        assert_eq!(resolved.destination, dir.path().join("live/settings.json"));
    }

    #[test]
    fn backup_does_not_require_existing_roots() {
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots::new(dir.path().join("nope"), dir.path().join("also-nope"));
        assert!(PathResolver::new(&roots, Direction::Backup).is_ok());
    }

    #[test]
    fn restore_requires_snapshot_root() {
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots::new(dir.path().join("live"), dir.path().join("missing"));
        let err = PathResolver::new(&roots, Direction::Restore).unwrap_err();
        assert!(matches!(err, PathResolutionError::SnapshotMissing(_)));
    }

    #[test]
    fn relative_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots::new("relative/live", dir.path().to_path_buf());
        let err = PathResolver::new(&roots, Direction::Backup).unwrap_err();
        assert!(matches!(
            err,
            PathResolutionError::NotAbsolute { role: "live", .. }
        ));
    }

    #[test]
    fn every_catalog_entry_resolves_symmetrically() {
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots::new(dir.path().join("live"), dir.path().to_path_buf());
        let backup = PathResolver::new(&roots, Direction::Backup).unwrap();
        let restore = PathResolver::new(&roots, Direction::Restore).unwrap();
        for entity in CATALOG {
            let b = backup.resolve(entity);
            let r = restore.resolve(entity);
            assert_eq!(b.source, r.destination, "{}", entity.id);
            assert_eq!(b.destination, r.source, "{}", entity.id);
        }
    }

}
