//! Command: capture the live configuration into the snapshot.
use anyhow::Result;

use crate::config::Roots;
use crate::config::entities::{ConfigEntity, catalog};
use crate::config::paths::{Direction, PathResolver};
use crate::error::SyncError;
use crate::logging::{Log, Logger};
use crate::report::OperationReport;
use crate::resources::listing;

/// Copy every entity from the live root into the snapshot root.
///
/// The snapshot root is created if absent.  Per-entity failures are
/// recorded in the returned report and never abort the run.
///
/// # Errors
///
/// Returns an error if a root is not absolute or the snapshot root cannot
/// be created.  Nothing is copied in that case.
pub fn execute(
    roots: &Roots,
    entities: &[ConfigEntity],
    log: &dyn Log,
) -> Result<OperationReport, SyncError> {
    let resolver = PathResolver::new(roots, Direction::Backup)?;

    log.stage(&format!(
        "Backing up {} -> {}",
        roots.live.display(),
        roots.snapshot.display()
    ));
    std::fs::create_dir_all(&roots.snapshot).map_err(|source| SyncError::PrepareRoot {
        role: "snapshot",
        path: roots.snapshot.clone(),
        source,
    })?;

    Ok(super::process_entities(&resolver, entities, log))
}

/// Run the `backup` command: capture, then print the report and the
/// resulting snapshot contents.
///
/// Entity failures are reported but do not fail the command.
///
/// # Errors
///
/// Returns an error if the roots cannot be validated or prepared.
pub fn run(roots: &Roots, log: &Logger) -> Result<()> {
    let report = execute(roots, catalog(), log)?;
    log.print_report(&report);

    match listing::list(&roots.snapshot) {
        Ok(entries) => log.print_listing(&roots.snapshot, &entries),
        Err(e) => log.warn(&format!("cannot list snapshot contents: {e:#}")),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use crate::report::Outcome;
    use std::fs;
    use std::path::Path;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn creates_snapshot_root_and_captures() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let live = dir.path().join("live");
        write(&live.join("skills/review/SKILL.md"), "# review");
        write(&live.join("settings.json"), "{}");
        let roots = Roots::new(&live, dir.path().join("repo/claude"));

        let report = execute(&roots, catalog(), &log).unwrap();

        assert_eq!(report.outcome_of("skills"), Some(&Outcome::Captured));
        assert_eq!(report.outcome_of("settings"), Some(&Outcome::Captured));
        assert_eq!(
            report.outcome_of("plugins"),
            Some(&Outcome::SkippedMissingSource)
        );
        assert_eq!(
            report.outcome_of("keybindings"),
            Some(&Outcome::SkippedMissingSource)
        );
        assert!(dir.path().join("repo/claude/skills/review/SKILL.md").is_file());
    }

    #[test]
    fn empty_live_root_still_creates_snapshot() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots::new(dir.path().join("live"), dir.path().join("snap"));

        let report = execute(&roots, catalog(), &log).unwrap();

        assert!(dir.path().join("snap").is_dir());
        assert_eq!(report.counts().skipped, catalog().len());
        assert!(!report.has_failures());
    }

    #[test]
    fn relative_root_aborts_before_copying() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let roots = Roots::new("live", "snap");
        let err = execute(&roots, catalog(), &log).unwrap_err();
        assert!(matches!(err, SyncError::PathResolution(_)));
        assert!(!Path::new("snap").exists());
    }

    #[test]
    fn unwritable_snapshot_root_is_fatal() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let roots = Roots::new(dir.path().join("live"), blocker.join("snap"));

        let err = execute(&roots, catalog(), &log).unwrap_err();
        assert!(matches!(err, SyncError::PrepareRoot { role: "snapshot", .. }));
    }

    #[test]
    fn run_succeeds_with_entity_failure() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let live = dir.path().join("live");
        fs::create_dir_all(live.join("settings.json")).unwrap();
        let roots = Roots::new(&live, dir.path().join("snap"));

        assert!(run(&roots, &log).is_ok());
    }
}
