//! Support library for the zigfix CLI binary.
//!
//! Re-exports the command pipeline and logging setup so tests can drive the
//! CLI without forking a subprocess.

pub mod cli;
pub mod logging;
