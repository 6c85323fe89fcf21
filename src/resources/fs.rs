//! File-system helpers shared by the copy engine.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Remove whatever exists at `path`: a directory tree, a file, or a symlink
/// (including a broken one).  Symlinks are removed, never followed.
///
/// Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_path(path: &Path) -> Result<()> {
    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return Ok(());
    };
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove existing directory: {}", path.display()))
    } else {
        std::fs::remove_file(path).with_context(|| format!("remove existing: {}", path.display()))
    }
}

/// Copy a single file, creating the destination's parent directories and
/// overwriting any existing file.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or the copy fails.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    ensure_parent_dir(dst)?;
    std::fs::copy(src, dst)
        .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// A source directory tree, read in full before anything is written.
///
/// Symlinks are followed, so linked directories are materialised rather than
/// copied as links.  A symlink cycle or an unreadable entry fails the scan,
/// which lets callers validate a source before touching the destination.
#[derive(Debug)]
pub struct DirTree {
    root: PathBuf,
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

impl DirTree {
    /// Walk `src`, recording every directory and file relative to it.
    ///
    /// # Errors
    ///
    /// Returns an error if `src` cannot be read, an entry beneath it cannot
    /// be read, or a symlink loop is found.
    pub fn scan(src: &Path) -> Result<Self> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in WalkDir::new(src).min_depth(1).follow_links(true) {
            let entry = entry.with_context(|| format!("reading directory {}", src.display()))?;
            let rel = entry.path().strip_prefix(src)?.to_path_buf();
            if entry.file_type().is_dir() {
                dirs.push(rel);
            } else {
                files.push(rel);
            }
        }
        Ok(Self {
            root: src.to_path_buf(),
            dirs,
            files,
        })
    }

    /// Number of files the tree holds.
    #[must_use]
    pub const fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Recreate the tree under `dst`, returning the number of files copied.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or a file cannot be
    /// copied.
    pub fn copy_to(&self, dst: &Path) -> Result<usize> {
        std::fs::create_dir_all(dst)
            .with_context(|| format!("creating directory {}", dst.display()))?;
        for rel in &self.dirs {
            let dir = dst.join(rel);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating directory {}", dir.display()))?;
        }
        for rel in &self.files {
            let (from, to) = (self.root.join(rel), dst.join(rel));
            std::fs::copy(&from, &to)
                .with_context(|| format!("copying {} to {}", from.display(), to.display()))?;
        }
        Ok(self.file_count())
    }
}
