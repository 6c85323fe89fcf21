//! Command: write the snapshot back over the live configuration.
use anyhow::Result;

use crate::config::Roots;
use crate::config::entities::{ConfigEntity, catalog};
use crate::config::paths::{Direction, PathResolver};
use crate::error::{RestoreError, SyncError};
use crate::logging::{Log, Logger};
use crate::prompt::Confirm;
use crate::report::OperationReport;

/// How a restore run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreRun {
    /// The user did not confirm; nothing was touched.
    Declined,
    /// Every entity was processed.
    Completed(OperationReport),
}

/// Text shown when asking the user to confirm a restore.
#[must_use]
pub fn confirmation_prompt(roots: &Roots) -> String {
    format!(
        "Overwrite configuration in {} with the backup from {}?",
        roots.live.display(),
        roots.snapshot.display()
    )
}

/// Copy every entity from the snapshot root back into the live root.
///
/// The snapshot root must exist; this is checked before the user is asked.
/// After an explicit yes the live root is created if absent and each entity
/// is mirrored in catalog order.  Directory mirrors discard live content the
/// snapshot does not have; selective sets and files only overwrite what they
/// track.
///
/// # Errors
///
/// Returns an error if the snapshot root does not exist, a root is not
/// absolute, or the live root cannot be created.  No file is touched in any
/// of these cases.
pub fn execute(
    roots: &Roots,
    entities: &[ConfigEntity],
    confirm: &dyn Confirm,
    log: &dyn Log,
) -> Result<RestoreRun, SyncError> {
    if !roots.snapshot.is_dir() {
        return Err(RestoreError::SnapshotMissing {
            path: roots.snapshot.clone(),
        }
        .into());
    }
    let resolver = PathResolver::new(roots, Direction::Restore)?;

    if !confirm.confirm(&confirmation_prompt(roots)) {
        log.info("restore cancelled; nothing changed");
        return Ok(RestoreRun::Declined);
    }

    log.stage(&format!(
        "Restoring {} -> {}",
        roots.snapshot.display(),
        roots.live.display()
    ));
    std::fs::create_dir_all(&roots.live).map_err(|source| SyncError::PrepareRoot {
        role: "live",
        path: roots.live.clone(),
        source,
    })?;

    Ok(RestoreRun::Completed(super::process_entities(
        &resolver, entities, log,
    )))
}

/// Run the `restore` command.
///
/// A declined confirmation is a successful no-op.
///
/// # Errors
///
/// Returns an error if the snapshot root does not exist or the roots cannot
/// be validated or prepared.
pub fn run(roots: &Roots, confirm: &dyn Confirm, log: &Logger) -> Result<()> {
    match execute(roots, catalog(), confirm, log)? {
        RestoreRun::Declined => {}
        RestoreRun::Completed(report) => log.print_report(&report),
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use crate::prompt::MockConfirm;
    use crate::report::Outcome;
    use std::fs;
    use std::path::Path;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn answering(answer: bool) -> MockConfirm {
        let mut confirm = MockConfirm::new();
        confirm.expect_confirm().times(1).return_const(answer);
        confirm
    }

    #[test]
    fn missing_snapshot_fails_before_prompting() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots::new(dir.path().join("live"), dir.path().join("missing"));
        let mut confirm = MockConfirm::new();
        confirm.expect_confirm().never();

        let err = execute(&roots, catalog(), &confirm, &log).unwrap_err();

        assert!(matches!(
            err,
            SyncError::Restore(RestoreError::SnapshotMissing { .. })
        ));
        assert!(!dir.path().join("live").exists());
    }

    #[test]
    fn decline_changes_nothing() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let snap = dir.path().join("snap");
        write(&snap.join("settings.json"), "from snapshot");
        let roots = Roots::new(dir.path().join("live"), &snap);

        let run = execute(&roots, catalog(), &answering(false), &log).unwrap();

        assert_eq!(run, RestoreRun::Declined);
        assert!(!dir.path().join("live").exists());
    }

    #[test]
    fn prompt_names_both_roots() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let snap = dir.path().join("snap");
        fs::create_dir(&snap).unwrap();
        let roots = Roots::new(dir.path().join("live"), &snap);
        let live = roots.live.display().to_string();
        let snapshot = roots.snapshot.display().to_string();

        let mut confirm = MockConfirm::new();
        confirm
            .expect_confirm()
            .withf(move |prompt| prompt.contains(&live) && prompt.contains(&snapshot))
            .times(1)
            .return_const(false);

        execute(&roots, catalog(), &confirm, &log).unwrap();
    }

    #[test]
    fn confirmed_restore_creates_live_root() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let snap = dir.path().join("snap");
        write(&snap.join("skills/a.md"), "a");
        write(&snap.join("plugins/installed_plugins.json"), "{}");
        let roots = Roots::new(dir.path().join("live"), &snap);

        let RestoreRun::Completed(report) =
            execute(&roots, catalog(), &answering(true), &log).unwrap()
        else {
            panic!("expected a completed restore");
        };

        assert_eq!(report.outcome_of("skills"), Some(&Outcome::Restored));
        assert_eq!(report.outcome_of("plugins"), Some(&Outcome::Restored));
        assert_eq!(
            report.outcome_of("settings"),
            Some(&Outcome::SkippedAbsentInSnapshot)
        );
        assert!(dir.path().join("live/skills/a.md").is_file());
        assert!(dir.path().join("live/plugins/installed_plugins.json").is_file());
    }

    #[test]
    fn restore_preserves_untracked_live_content() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let snap = dir.path().join("snap");
        let live = dir.path().join("live");
        write(&snap.join("skills/keep.md"), "keep");
        write(&snap.join("settings.json"), "new");
        write(&live.join("skills/stale.md"), "stale");
        write(&live.join("plugins/cache.bin"), "cache");
        write(&live.join("history.jsonl"), "history");
        let roots = Roots::new(&live, &snap);

        execute(&roots, catalog(), &answering(true), &log).unwrap();

        assert!(!live.join("skills/stale.md").exists());
        assert!(live.join("skills/keep.md").is_file());
        assert_eq!(fs::read_to_string(live.join("plugins/cache.bin")).unwrap(), "cache");
        assert_eq!(fs::read_to_string(live.join("history.jsonl")).unwrap(), "history");
        assert_eq!(fs::read_to_string(live.join("settings.json")).unwrap(), "new");
    }

    #[test]
    fn run_treats_decline_as_success() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let snap = dir.path().join("snap");
        fs::create_dir(&snap).unwrap();
        let roots = Roots::new(dir.path().join("live"), &snap);

        assert!(run(&roots, &answering(false), &log).is_ok());
    }

    #[test]
    fn run_fails_without_snapshot() {
        let (log, _path, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots::new(dir.path().join("live"), dir.path().join("missing"));

        let err = run(&roots, &MockConfirm::new(), &log).unwrap_err();
        assert!(err.to_string().contains("no backup found"));
    }
}
