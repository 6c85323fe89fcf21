//! Configuration backup and restore.
//!
//! Mirrors a fixed set of entries from a live agent configuration directory
//! (`~/.claude`) into a snapshot directory kept under version control, and
//! writes that snapshot back on request.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: the roots, the tracked entity catalog and path resolution
//! - **[`resources`]**: the copy engine and its filesystem primitives
//! - **[`commands`]**: the `backup` and `restore` operations
//! - **[`report`]** and **[`logging`]**: per-entity outcomes and their rendering
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod report;
pub mod resources;
