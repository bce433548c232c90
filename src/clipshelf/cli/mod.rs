//! # CLI
//!
//! One possible shell over the clipshelf library: the only place that knows about terminal
//! I/O, prompts and exit codes. The slide-in panel is another shell; both talk to the same
//! API.
//!
//! Running `clipshelf` with no arguments lists the history.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: context setup, logging and per-command handlers
//! - `render`: output formatting (colors, widths, relative times)

mod commands;
mod render;
pub mod setup;

pub use commands::run;
