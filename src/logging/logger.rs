//! Structured logger with report and listing rendering.
use std::path::{Path, PathBuf};

use super::subscriber::STAGE_TARGET;
use super::types::Log;
use super::utils::{format_bytes, log_file_path};
use crate::config::paths::Direction;
use crate::report::{OperationReport, Outcome};
use crate::resources::listing::{ListingEntry, ListingKind};

/// Implement the methods of [`Log`] by delegating to inherent methods of the
/// same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger writing through the global [`tracing`] subscriber.
///
/// All messages also reach the persistent log file at
/// `$XDG_CACHE_HOME/config-sync/<command>.log` (default
/// `~/.cache/config-sync/<command>.log`) via the subscriber's file layer.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`.
    ///
    /// Stores the log file path for display in the run summary.  The file
    /// itself is created by [`init_subscriber`](super::subscriber::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Create a logger that reports `log_file` as its log path.
    #[cfg(test)]
    pub(super) const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self { log_file }
    }
}

// Events go to the global dispatcher; the logger itself only carries the
// log path.
#[allow(clippy::unused_self)]
impl Logger {
    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless enabled by the
    /// filter; always written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }
}

impl Logger {
    /// Print the per-entity outcome summary of a run.
    pub fn print_report(&self, report: &OperationReport) {
        self.stage("Summary");
        for line in report_lines(report) {
            self.info(&line);
        }
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }

    /// Print the top-level contents of the snapshot root.
    pub fn print_listing(&self, root: &Path, entries: &[ListingEntry]) {
        self.stage(&format!("Snapshot contents: {}", root.display()));
        if entries.is_empty() {
            self.info("(empty)");
        }
        for line in listing_lines(entries) {
            self.info(&line);
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);
}

/// Render one line per entity followed by a totals line.
fn report_lines(report: &OperationReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .entries()
        .iter()
        .map(|entry| {
            let (icon, color) = match entry.outcome {
                Outcome::Captured | Outcome::Restored => ("✓", "\x1b[32m"),
                Outcome::SkippedMissingSource | Outcome::SkippedAbsentInSnapshot => {
                    ("○", "\x1b[33m")
                }
                Outcome::Failed(_) => ("✗", "\x1b[31m"),
            };
            let detail = match &entry.outcome {
                Outcome::Captured | Outcome::Restored => {
                    format!("{} ({})", entry.outcome, plural(entry.files, "file"))
                }
                other => other.to_string(),
            };
            format!(
                "{color}{icon} {:<12} {:<18} {detail}\x1b[0m",
                entry.entity_id, entry.relative_name
            )
        })
        .collect();

    let counts = report.counts();
    let verb = match report.direction() {
        Direction::Backup => "captured",
        Direction::Restore => "restored",
    };
    lines.push(format!(
        "{}: \x1b[32m{} {verb}\x1b[0m, \x1b[33m{} skipped\x1b[0m, \x1b[31m{} failed\x1b[0m",
        plural(report.entries().len(), "entity"),
        counts.done,
        counts.skipped,
        counts.failed
    ));
    lines
}

fn listing_lines(entries: &[ListingEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| match entry.kind {
            ListingKind::Directory { files } => {
                format!("{:<24} {}", format!("{}/", entry.name), plural(files, "file"))
            }
            ListingKind::File { bytes } => format!("{:<24} {}", entry.name, format_bytes(bytes)),
        })
        .collect()
}

fn plural(n: usize, noun: &str) -> String {
    match (n, noun) {
        (1, _) => format!("1 {noun}"),
        (_, "entity") => format!("{n} entities"),
        _ => format!("{n} {noun}s"),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use crate::logging::utils::strip_ansi;
    use std::fs;

    fn sample_report() -> OperationReport {
        let mut report = OperationReport::new(Direction::Backup);
        report.record("skills", "skills", Outcome::Captured, 3);
        report.record("settings", "settings.json", Outcome::Captured, 1);
        report.record(
            "keybindings",
            "keybindings.json",
            Outcome::SkippedMissingSource,
            0,
        );
        report.record(
            "plugins",
            "plugins",
            Outcome::Failed("permission denied".to_string()),
            0,
        );
        report
    }

    #[test]
    fn report_lines_cover_every_entity_and_totals() {
        let lines: Vec<String> = report_lines(&sample_report())
            .iter()
            .map(|l| strip_ansi(l))
            .collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("✓ skills"));
        assert!(lines[0].ends_with("captured (3 files)"));
        assert!(lines[1].ends_with("captured (1 file)"));
        assert!(lines[2].starts_with("○ keybindings"));
        assert!(lines[2].ends_with("skipped (missing source)"));
        assert!(lines[3].starts_with("✗ plugins"));
        assert!(lines[3].ends_with("failed: permission denied"));
        assert_eq!(lines[4], "4 entities: 2 captured, 1 skipped, 1 failed");
    }

    #[test]
    fn restore_totals_use_restored_verb() {
        let mut report = OperationReport::new(Direction::Restore);
        report.record("settings", "settings.json", Outcome::Restored, 1);
        let lines = report_lines(&report);
        assert_eq!(
            strip_ansi(lines.last().unwrap()),
            "1 entity: 1 restored, 0 skipped, 0 failed"
        );
    }

    #[test]
    fn listing_lines_describe_entries() {
        let lines = listing_lines(&[
            ListingEntry {
                name: "settings.json".to_string(),
                kind: ListingKind::File { bytes: 12 },
            },
            ListingEntry {
                name: "skills".to_string(),
                kind: ListingKind::Directory { files: 4 },
            },
        ]);
        assert!(lines[0].starts_with("settings.json"));
        assert!(lines[0].ends_with("12 B"));
        assert!(lines[1].starts_with("skills/"));
        assert!(lines[1].ends_with("4 files"));
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(0, "file"), "0 files");
        assert_eq!(plural(1, "file"), "1 file");
        assert_eq!(plural(2, "entity"), "2 entities");
    }

    #[test]
    fn print_report_is_written_to_file() {
        let (log, path, _tmp, _guard) = isolated_logger();
        log.print_report(&sample_report());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("==> Summary"));
        assert!(contents.contains("failed: permission denied"));
        assert!(contents.contains("log: "));
    }

    #[test]
    fn print_listing_is_written_to_file() {
        let (log, path, _tmp, _guard) = isolated_logger();
        log.print_listing(Path::new("/repo/claude"), &[]);
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Snapshot contents"));
        assert!(contents.contains("(empty)"));
    }

    #[test]
    fn log_levels_are_tagged_in_file() {
        let (log, path, _tmp, _guard) = isolated_logger();
        let marker = format!("marker-{}", std::process::id());
        log.warn(&marker);
        log.error("boom");
        log.debug("quiet");
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains(&format!("[warn] {marker}")));
        assert!(contents.contains("[error] boom"));
        assert!(contents.contains("[debug] quiet"));
    }

    #[test]
    fn log_trait_delegates_to_logger() {
        let (log, path, _tmp, _guard) = isolated_logger();
        let log_ref: &dyn Log = &log;
        log_ref.stage("via-trait");
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("==> via-trait"));
    }
}
