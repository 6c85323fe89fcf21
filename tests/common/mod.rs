// Shared helpers for integration tests.
//
// Provides a temporary live root and snapshot root, a fluent builder for
// populating them, and in-memory stand-ins for logging and confirmation so
// each integration test can drive the operations without a terminal.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use config_sync::config::Roots;
use config_sync::logging::Log;
use config_sync::prompt::Confirm;

/// A live root and a snapshot root inside one [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct SyncFixture {
    /// Temporary directory holding both roots.
    pub dir: tempfile::TempDir,
    /// Roots passed to the operations.
    pub roots: Roots,
}

impl SyncFixture {
    /// Create a fixture whose roots do not exist yet.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let roots = Roots::new(dir.path().join("home/.claude"), dir.path().join("repo/claude"));
        Self { dir, roots }
    }

    /// Path under the live root.
    pub fn live(&self, rel: &str) -> PathBuf {
        self.roots.live.join(rel)
    }

    /// Path under the snapshot root.
    pub fn snapshot(&self, rel: &str) -> PathBuf {
        self.roots.snapshot.join(rel)
    }

    /// Read a live file as a string.
    pub fn read_live(&self, rel: &str) -> String {
        std::fs::read_to_string(self.live(rel)).expect("read live file")
    }

    /// Read a snapshot file as a string.
    pub fn read_snapshot(&self, rel: &str) -> String {
        std::fs::read_to_string(self.snapshot(rel)).expect("read snapshot file")
    }
}

/// Fluent builder for [`SyncFixture`].
pub struct FixtureBuilder {
    fixture: SyncFixture,
}

impl FixtureBuilder {
    /// Begin building a fixture with empty, non-existent roots.
    pub fn new() -> Self {
        Self {
            fixture: SyncFixture::new(),
        }
    }

    /// Write `contents` to `rel` under the live root.
    pub fn live_file(self, rel: &str, contents: &str) -> Self {
        write(&self.fixture.live(rel), contents);
        self
    }

    /// Write `contents` to `rel` under the snapshot root.
    pub fn snapshot_file(self, rel: &str, contents: &str) -> Self {
        write(&self.fixture.snapshot(rel), contents);
        self
    }

    /// Create the snapshot root directory, even if empty.
    pub fn with_snapshot_root(self) -> Self {
        std::fs::create_dir_all(&self.fixture.roots.snapshot).expect("create snapshot root");
        self
    }

    /// A live root resembling a real installation: tracked entities plus
    /// untracked state that must never be copied.
    pub fn populated_live(self) -> Self {
        self.live_file("skills/review/SKILL.md", "# review\n")
            .live_file("skills/review/scripts/run.sh", "#!/bin/sh\n")
            .live_file("skills/commit/SKILL.md", "# commit\n")
            .live_file("plugins/installed_plugins.json", "{\"plugins\":[]}")
            .live_file("plugins/known_marketplaces.json", "{\"markets\":[]}")
            .live_file("plugins/cache/huge.bin", "cache")
            .live_file("plugins/marketplaces/official/index.json", "{}")
            .live_file("settings.json", "{\"theme\":\"dark\"}")
            .live_file("history.jsonl", "{}\n")
            .live_file("projects/abc/session.jsonl", "{}\n")
    }

    /// Finalise the fixture.
    pub fn build(self) -> SyncFixture {
        self.fixture
    }
}

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().expect("path has a parent")).expect("create parent");
    std::fs::write(path, contents).expect("write file");
}

/// Every regular file under `root`, keyed by `/`-separated relative path.
pub fn tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.expect("walk tree"))
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let rel = entry
                .path()
                .strip_prefix(root)
                .expect("entry under root")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let bytes = std::fs::read(entry.path()).expect("read file");
            (rel, bytes)
        })
        .collect()
}

/// A [`Log`] implementation that records every message in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    messages: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLog {
    fn push(&self, level: &'static str, msg: &str) {
        self.messages
            .lock()
            .expect("lock messages")
            .push((level, msg.to_string()));
    }

    /// Messages logged at `level`.
    pub fn at(&self, level: &str) -> Vec<String> {
        self.messages
            .lock()
            .expect("lock messages")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
}

/// A [`Confirm`] implementation returning a fixed answer and counting
/// how often it was asked.
#[derive(Debug)]
pub struct ScriptedConfirm {
    answer: bool,
    asked: Cell<usize>,
}

impl ScriptedConfirm {
    /// Always answer yes.
    pub const fn yes() -> Self {
        Self {
            answer: true,
            asked: Cell::new(0),
        }
    }

    /// Always answer no.
    pub const fn no() -> Self {
        Self {
            answer: false,
            asked: Cell::new(0),
        }
    }

    /// Number of prompts shown so far.
    pub const fn asked(&self) -> usize {
        self.asked.get()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.asked.set(self.asked.get() + 1);
        self.answer
    }
}
