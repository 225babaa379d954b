use std::env;
use std::process::ExitCode;

mod cli;
mod engine;
mod error;
mod exits;
mod keyspace;
mod logging;
mod pass;
mod progress;
mod rand;
mod settings;
mod sim;
mod terminal;
mod tui;

fn main() -> ExitCode {
    exits::reset_terminal();
    exits::install_handlers();
    #[cfg(target_os = "linux")]
    unsafe {
        libc::prctl(libc::PR_SET_DUMPABLE, 0)
    };
    logging::init();

    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => tui::run(),
        _ => cli::run(args),
    }
}
