//! File I/O for trees.
//!
//! This module loads trees from JSON/YAML files or stdin, and renders and
//! saves them with atomic writes and optional backups.

pub mod loader;
pub mod saver;
