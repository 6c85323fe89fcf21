//! Top-level subcommand orchestration (`backup`, `restore`).

pub mod backup;
pub mod restore;

use crate::config::entities::ConfigEntity;
use crate::config::paths::PathResolver;
use crate::logging::Log;
use crate::report::{OperationReport, Outcome};
use crate::resources::{self, SourceState};

/// Mirror every entity in catalog order and record its outcome.
///
/// A failing entity is logged and recorded; it never stops the remaining
/// entities from being processed.
#[must_use]
pub fn process_entities(
    resolver: &PathResolver<'_>,
    entities: &[ConfigEntity],
    log: &dyn Log,
) -> OperationReport {
    let direction = resolver.direction();
    let mut report = OperationReport::new(direction);

    for entity in entities {
        let resolved = resolver.resolve(entity);
        log.debug(&format!(
            "{}: {} -> {}",
            entity.id,
            resolved.source.display(),
            resolved.destination.display()
        ));

        if resources::source_state(&resolved) == SourceState::Missing {
            log.debug(&format!("{}: nothing to copy", entity.id));
            report.record(
                entity.id,
                entity.relative_name,
                Outcome::skipped(direction),
                0,
            );
            continue;
        }

        match resources::mirror(&resolved) {
            Ok(stats) => {
                log.info(&format!(
                    "{} {} ({})",
                    Outcome::done(direction),
                    entity.relative_name,
                    entity.kind.label()
                ));
                report.record(
                    entity.id,
                    entity.relative_name,
                    Outcome::done(direction),
                    stats.files,
                );
            }
            Err(e) => {
                log.error(&e.to_string());
                report.record(
                    entity.id,
                    entity.relative_name,
                    Outcome::Failed(e.reason),
                    0,
                );
            }
        }
    }

    report
}
