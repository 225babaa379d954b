//! Interactive TUI menus.

mod input;
mod options;
mod text;

pub use input::*;
pub use options::*;
pub use text::*;

use std::process::ExitCode;

/// Run TUI interactive mode.
pub fn run() -> ExitCode {
    gen_main_menu();
    ExitCode::SUCCESS
}
