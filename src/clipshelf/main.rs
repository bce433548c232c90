//! # Clipshelf CLI
//!
//! The binary is intentionally thin: the terminal shell lives in `cli/`, and this file only
//! invokes `cli::run()` and handles process termination. Everything it calls through
//! `clipshelf::api` is UI agnostic.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
