//! Logging infrastructure for structured console and file output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::{LOG_FILTER_ENV, init_subscriber};
pub use types::Log;

/// Create a Logger backed by an isolated per-thread tracing subscriber
/// writing to a [`FileLayer`](subscriber::FileLayer) in a temporary
/// directory, so that events emitted by logger methods can be read back.
///
/// Returns a [`tracing::dispatcher::DefaultGuard`] that must be kept alive
/// for the duration of the test; dropping it restores the previous
/// thread-local dispatcher.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (
    Logger,
    std::path::PathBuf,
    tempfile::TempDir,
    tracing::dispatcher::DefaultGuard,
) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("test.log");
    let file_layer =
        subscriber::FileLayer::open(&path, "test").expect("failed to create file layer");
    let log = Logger::with_log_file(Some(path.clone()));
    let subscriber =
        tracing_subscriber::registry().with(file_layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (log, path, tmp, guard)
}
