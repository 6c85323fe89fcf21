//! Listing of a snapshot root's top-level contents.
use anyhow::{Context as _, Result};
use std::path::Path;
use walkdir::WalkDir;

/// One top-level entry of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// File name of the entry.
    pub name: String,
    /// What the entry is.
    pub kind: ListingKind,
}

/// Shape of a [`ListingEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    /// A directory and the number of files anywhere beneath it.
    Directory {
        /// Recursive file count.
        files: usize,
    },
    /// A regular file and its size.
    File {
        /// Size in bytes.
        bytes: u64,
    },
}

/// List the top-level entries of `root`, sorted by name.
///
/// Symlinks are followed, matching how the copy engine materialises them.
///
/// # Errors
///
/// Returns an error if `root` or any entry beneath it cannot be read.
pub fn list(root: &Path) -> Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("listing {}", root.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let kind = if entry.file_type().is_dir() {
            ListingKind::Directory {
                files: count_files(entry.path())?,
            }
        } else {
            let meta = entry
                .metadata()
                .with_context(|| format!("reading metadata of {}", entry.path().display()))?;
            ListingKind::File { bytes: meta.len() }
        };
        entries.push(ListingEntry { name, kind });
    }
    Ok(entries)
}

fn count_files(dir: &Path) -> Result<usize> {
    let mut files = 0;
    for entry in WalkDir::new(dir).min_depth(1).follow_links(true) {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        if !entry.file_type().is_dir() {
            files += 1;
        }
    }
    Ok(files)
}
