//! Flag-driven (non-interactive) mode.

mod context;
mod flags;
mod parse;
pub mod prompts;

use std::process::ExitCode;

pub use context::{Context, Stop};
pub use flags::{CliFlags, Mode};
pub use parse::{ParseError, parse};

/// Run CLI mode. Exit code 2 for usage errors, 1 for rejected configuration.
pub fn run(args: Vec<String>) -> ExitCode {
    let mut ctx = match Context::new(&args) {
        Ok(ctx) => ctx,
        Err(e) => {
            prompts::error(&e.to_string());
            prompts::error("Try `keyspace --help`.");
            return ExitCode::from(2);
        }
    };

    match ctx.run() {
        Ok(()) | Err(Stop::Done) => ExitCode::SUCCESS,
        Err(Stop::Failed(e)) => {
            prompts::error(&e.to_string());
            ExitCode::from(1)
        }
    }
}
