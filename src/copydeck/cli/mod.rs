//! # CLI Layer
//!
//! This module is **one possible UI client** for copydeck. It is the only
//! place that knows about terminal I/O, exit codes and argument parsing.
//!
//! - `setup.rs`: clap definitions
//! - `commands.rs`: context wiring, logging setup and per-command handlers
//! - `print.rs`: terminal output
//!
//! Draft lists are read as a JSON array of drafts from a file, or from stdin
//! when the path is `-`.

mod commands;
mod print;
mod setup;

pub use commands::run;
