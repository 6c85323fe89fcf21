//! Per-entity outcome reporting for backup and restore runs.
use std::fmt;

use crate::config::paths::Direction;

/// What happened to one entity during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Copied from the live root into the snapshot.
    Captured,
    /// Copied from the snapshot into the live root.
    Restored,
    /// Backup found nothing at the live path; expected for optional entities.
    SkippedMissingSource,
    /// Restore found nothing for this entity in the snapshot.
    SkippedAbsentInSnapshot,
    /// The copy failed; the run carried on with the next entity.
    Failed(String),
}

impl Outcome {
    /// The success outcome for `direction`.
    #[must_use]
    pub const fn done(direction: Direction) -> Self {
        match direction {
            Direction::Backup => Self::Captured,
            Direction::Restore => Self::Restored,
        }
    }

    /// The "nothing to copy" outcome for `direction`.
    #[must_use]
    pub const fn skipped(direction: Direction) -> Self {
        match direction {
            Direction::Backup => Self::SkippedMissingSource,
            Direction::Restore => Self::SkippedAbsentInSnapshot,
        }
    }

    /// Whether this outcome is a skip.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::SkippedMissingSource | Self::SkippedAbsentInSnapshot
        )
    }

    /// Whether this outcome is a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Captured => write!(f, "captured"),
            Self::Restored => write!(f, "restored"),
            Self::SkippedMissingSource => write!(f, "skipped (missing source)"),
            Self::SkippedAbsentInSnapshot => write!(f, "skipped (absent in snapshot)"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// One line of an [`OperationReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Entity id from the catalog.
    pub entity_id: String,
    /// Relative path of the entity, for display.
    pub relative_name: String,
    /// What happened.
    pub outcome: Outcome,
    /// Files written; zero unless the outcome is a success.
    pub files: usize,
}

/// Ordered per-entity outcomes of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    direction: Direction,
    entries: Vec<ReportEntry>,
}

/// Totals over an [`OperationReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportCounts {
    /// Captured or restored entities.
    pub done: usize,
    /// Skipped entities.
    pub skipped: usize,
    /// Failed entities.
    pub failed: usize,
}

impl OperationReport {
    /// Start an empty report for `direction`.
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            entries: Vec::new(),
        }
    }

    /// Direction of the run this report describes.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Append an outcome, preserving catalog order.
    pub fn record(&mut self, entity_id: &str, relative_name: &str, outcome: Outcome, files: usize) {
        self.entries.push(ReportEntry {
            entity_id: entity_id.to_string(),
            relative_name: relative_name.to_string(),
            outcome,
            files,
        });
    }

    /// All entries in the order they were recorded.
    #[must_use]
    pub const fn entries(&self) -> &[ReportEntry] {
        self.entries.as_slice()
    }

    /// Outcome recorded for `entity_id`, if any.
    #[must_use]
    pub fn outcome_of(&self, entity_id: &str) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|e| e.entity_id == entity_id)
            .map(|e| &e.outcome)
    }

    /// Count outcomes by category.
    #[must_use]
    pub fn counts(&self) -> ReportCounts {
        self.entries
            .iter()
            .fold(ReportCounts::default(), |mut counts, entry| {
                if entry.outcome.is_failure() {
                    counts.failed += 1;
                } else if entry.outcome.is_skip() {
                    counts.skipped += 1;
                } else {
                    counts.done += 1;
                }
                counts
            })
    }

    /// Return `true` if any entity failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|e| e.outcome.is_failure())
    }
}
