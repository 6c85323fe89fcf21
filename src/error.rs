//! Domain-specific error types for the synchronization engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Root-level and precondition failures abort a run before any filesystem
//! mutation; per-entity [`CopyError`]s are downgraded to a reported outcome
//! by the backup and restore operations.  Command entry points convert the
//! fatal variants to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SyncError
//! ├── PathResolution(PathResolutionError)  a root cannot be determined
//! ├── Restore(RestoreError)                restore preconditions
//! └── PrepareRoot { .. }                   a root directory cannot be created
//!
//! CopyError                                single-entity I/O failure (never fatal)
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level fatal error for a backup or restore run.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A root directory could not be determined or validated.
    #[error("Path resolution error: {0}")]
    PathResolution(#[from] PathResolutionError),

    /// A restore precondition failed.
    #[error("Restore error: {0}")]
    Restore(#[from] RestoreError),

    /// A root directory could not be created before entity processing.
    #[error("cannot create {role} root {}: {source}", .path.display())]
    PrepareRoot {
        /// Which root was being created (`"snapshot"` or `"live"`).
        role: &'static str,
        /// Path of the root directory.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise while determining the live and snapshot roots.
#[derive(Error, Debug)]
pub enum PathResolutionError {
    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("cannot determine home directory: neither HOME nor USERPROFILE is set")]
    HomeNotSet,

    /// The running executable's location could not be determined.
    #[error("cannot determine install location: {0}")]
    InstallLocation(#[source] std::io::Error),

    /// A root path is relative.
    #[error("{role} root must be an absolute path: {}", .path.display())]
    NotAbsolute {
        /// Which root is relative (`"live"` or `"snapshot"`).
        role: &'static str,
        /// The offending path.
        path: PathBuf,
    },

    /// The snapshot root does not exist, so restore paths cannot be resolved.
    #[error("snapshot root does not exist: {}", .0.display())]
    SnapshotMissing(PathBuf),
}

/// Errors that abort a restore before any prompt or mutation.
#[derive(Error, Debug)]
pub enum RestoreError {
    /// There is no snapshot to restore from.
    #[error("no backup found at {}", .path.display())]
    SnapshotMissing {
        /// Expected location of the snapshot root.
        path: PathBuf,
    },
}

/// A single entity could not be copied.
///
/// Recorded as a `failed` outcome by the calling operation; never aborts the
/// remaining entities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{entity}: {reason}")]
pub struct CopyError {
    /// Id of the entity being copied.
    pub entity: String,
    /// Human-readable failure reason, including path context.
    pub reason: String,
}

impl CopyError {
    /// Build a copy error for `entity` from an [`anyhow::Error`] context chain.
    #[must_use]
    pub fn from_chain(entity: &str, err: &anyhow::Error) -> Self {
        Self {
            entity: entity.to_string(),
            reason: format!("{err:#}"),
        }
    }
}
