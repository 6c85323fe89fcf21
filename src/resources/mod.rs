//! Copy engine: one-directional mirroring of a single tracked entity.
//!
//! Each [`EntityKind`] has its own write policy:
//!
//! - **directory mirror**: the destination is removed, then the whole
//!   source tree is copied, so nothing stale survives;
//! - **selective file set**: only allow-listed files are copied into the
//!   destination container; nothing else in it is read, written or removed;
//! - **whole file**: the file is copied over the destination, or nothing
//!   happens if the source is absent.
pub mod fs;
pub mod listing;

use anyhow::{Context as _, Result, bail};

use crate::config::entities::EntityKind;
use crate::config::paths::ResolvedEntity;
use crate::error::CopyError;

/// Presence of an entity's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// The source exists in the shape its kind expects.
    Present,
    /// Nothing to copy from.
    Missing,
}

/// What a successful mirror wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorStats {
    /// Number of regular files written at the destination.
    pub files: usize,
}

/// Check whether `resolved` has anything to copy.
///
/// Directory mirrors and selective file sets need a source directory; a
/// whole file only needs its path to exist.
#[must_use]
pub fn source_state(resolved: &ResolvedEntity) -> SourceState {
    let present = match resolved.entity.kind {
        EntityKind::DirectoryMirror | EntityKind::SelectiveFileSet { .. } => {
            resolved.source.is_dir()
        }
        EntityKind::WholeFile => resolved.source.exists(),
    };
    if present {
        SourceState::Present
    } else {
        SourceState::Missing
    }
}

/// Mirror `resolved.source` onto `resolved.destination` per the entity kind.
///
/// # Errors
///
/// Returns a [`CopyError`] naming the entity on any I/O or permission
/// failure.  The caller decides whether that is fatal.
pub fn mirror(resolved: &ResolvedEntity) -> Result<MirrorStats, CopyError> {
    let result = match resolved.entity.kind {
        EntityKind::DirectoryMirror => mirror_directory(resolved),
        EntityKind::SelectiveFileSet { allowed } => mirror_selected(resolved, allowed),
        EntityKind::WholeFile => mirror_file(resolved),
    };
    result.map_err(|e| CopyError::from_chain(resolved.entity.id, &e))
}

fn mirror_directory(resolved: &ResolvedEntity) -> Result<MirrorStats> {
    // the whole source is read before removal: a bad source must leave the destination intact
    if !resolved.source.is_dir() {
        bail!("source is not a directory: {}", resolved.source.display());
    }
    let tree = fs::DirTree::scan(&resolved.source)?;
    fs::remove_path(&resolved.destination)?;
    let files = tree.copy_to(&resolved.destination)?;
    Ok(MirrorStats { files })
}

fn mirror_selected(resolved: &ResolvedEntity, allowed: &[&str]) -> Result<MirrorStats> {
    std::fs::create_dir_all(&resolved.destination)
        .with_context(|| format!("creating directory {}", resolved.destination.display()))?;
    let mut stats = MirrorStats::default();
    for name in allowed {
        let src = resolved.source.join(name);
        if src.is_file() {
            fs::copy_file(&src, &resolved.destination.join(name))?;
            stats.files += 1;
        }
    }
    Ok(stats)
}

fn mirror_file(resolved: &ResolvedEntity) -> Result<MirrorStats> {
    if !resolved.source.exists() {
        return Ok(MirrorStats::default());
    }
    fs::copy_file(&resolved.source, &resolved.destination)?;
    Ok(MirrorStats { files: 1 })
}
