//! Fixed configuration: the live/snapshot roots and the tracked entity catalog.
pub mod entities;
pub mod paths;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::PathResolutionError;

/// Environment variable overriding the live configuration root.
pub const LIVE_ROOT_ENV: &str = "CONFIG_SYNC_LIVE_ROOT";

/// Environment variable overriding the snapshot root.
pub const SNAPSHOT_ROOT_ENV: &str = "CONFIG_SYNC_SNAPSHOT_ROOT";

/// Name of the live configuration directory under the user's home.
pub const LIVE_DIR_NAME: &str = ".claude";

/// Name of the snapshot directory under the tool's install location.
pub const SNAPSHOT_DIR_NAME: &str = "claude";

/// The two directories every operation works between.
///
/// Established once at process start and passed explicitly into the
/// operations, so they can be driven against temporary directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    /// Directory consulted by the host application at runtime.
    pub live: PathBuf,
    /// Version-controlled directory holding the last captured backup.
    pub snapshot: PathBuf,
}

impl Roots {
    /// Create roots from explicit paths.
    #[must_use]
    pub fn new(live: impl Into<PathBuf>, snapshot: impl Into<PathBuf>) -> Self {
        Self {
            live: live.into(),
            snapshot: snapshot.into(),
        }
    }

    /// Detect the roots from the process environment.
    ///
    /// The live root is `$CONFIG_SYNC_LIVE_ROOT` or `~/.claude`; the snapshot
    /// root is `$CONFIG_SYNC_SNAPSHOT_ROOT` or `claude/` next to the
    /// repository the executable is installed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory or the executable location
    /// cannot be determined.
    pub fn detect() -> Result<Self, PathResolutionError> {
        Self::resolve_with(|key| std::env::var_os(key), std::env::current_exe)
    }

    /// Resolve the roots from an environment lookup and an executable path
    /// provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory or the executable location
    /// cannot be determined.
    pub fn resolve_with(
        var: impl Fn(&str) -> Option<OsString>,
        current_exe: impl FnOnce() -> std::io::Result<PathBuf>,
    ) -> Result<Self, PathResolutionError> {
        let non_empty = |key: &str| var(key).filter(|v| !v.is_empty());

        let live = match non_empty(LIVE_ROOT_ENV) {
            Some(path) => PathBuf::from(path),
            None => home_dir(&non_empty)?.join(LIVE_DIR_NAME),
        };

        let snapshot = match non_empty(SNAPSHOT_ROOT_ENV) {
            Some(path) => PathBuf::from(path),
            None => {
                let exe = current_exe().map_err(PathResolutionError::InstallLocation)?;
                let exe = dunce::canonicalize(&exe).unwrap_or(exe);
                let exe_dir = exe.parent().ok_or_else(|| {
                    PathResolutionError::InstallLocation(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("executable has no parent directory: {}", exe.display()),
                    ))
                })?;
                install_root(exe_dir).join(SNAPSHOT_DIR_NAME)
            }
        };

        Ok(Self { live, snapshot })
    }
}

fn home_dir(var: &impl Fn(&str) -> Option<OsString>) -> Result<PathBuf, PathResolutionError> {
    let home = if cfg!(target_os = "windows") {
        var("USERPROFILE").or_else(|| var("HOME"))
    } else {
        var("HOME")
    };
    home.map(PathBuf::from)
        .ok_or(PathResolutionError::HomeNotSet)
}

/// Locate the repository the executable ships in.
///
/// Walks up from `exe_dir` (e.g. `repo/bin/` or `repo/target/release/`) to
/// the first directory containing `.git`; falls back to `exe_dir` itself.
#[must_use]
pub fn install_root(exe_dir: &Path) -> PathBuf {
    exe_dir
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .unwrap_or(exe_dir)
        .to_path_buf()
}
