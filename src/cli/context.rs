//! CLI context - bundles settings, flags, and the random source.

use copypasta::{ClipboardContext, ClipboardProvider};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use super::{CliFlags, Mode, ParseError, prompts};
use crate::error::Error;
use crate::keyspace::KeyspaceMetrics;
use crate::pass::{self, check, output};
use crate::rand::{self, EntropySource, RandomSource, urand};
use crate::settings::Settings;
use crate::sim::{self, SimConfig};
use crate::tui::print_help;

/// Why `run` returned early.
pub enum Stop {
    /// Nothing left to do (help, version, aborted prompt).
    Done,
    Failed(Error),
}

impl From<Error> for Stop {
    fn from(e: Error) -> Self {
        Stop::Failed(e)
    }
}

pub struct Context {
    pub settings: Settings,
    pub flags: CliFlags,
}

impl Context {
    pub fn new(args: &[String]) -> Result<Self, ParseError> {
        let flags = super::parse(args)?;

        let settings = if flags.saved {
            Settings::load_from_file().unwrap_or_else(|e| {
                prompts::warn(&format!("Failed to load settings: {e}"));
                Settings::default()
            })
        } else {
            Settings::default()
        };

        let mut ctx = Self { settings, flags };
        ctx.apply_flags();
        Ok(ctx)
    }

    pub fn run(&mut self) -> Result<(), Stop> {
        self.handle_info_flags()?;
        prompts::set_quiet(self.flags.quiet);

        let mut rng = rand::open(self.settings.entropy_source);
        debug!(mode = ?self.flags.mode, source = %self.settings.entropy_source, "cli run");

        match self.flags.mode {
            Mode::Generate => self.generate_output(&mut rng),
            Mode::Info => self.show_info(),
            Mode::Simulate => self.simulate(&mut rng),
            Mode::Check => self.check(),
        }
    }

    fn handle_info_flags(&self) -> Result<(), Stop> {
        if self.flags.help {
            print_help();
            return Err(Stop::Done);
        }
        if self.flags.version {
            println!("keyspace {}", env!("CARGO_PKG_VERSION"));
            return Err(Stop::Done);
        }
        Ok(())
    }

    /// Apply CLI flags on top of the starting settings.
    fn apply_flags(&mut self) {
        let flags = &self.flags;
        let settings = &mut self.settings;

        match (flags.length, flags.mode) {
            (Some(len), Mode::Simulate) => settings.sim_length = len,
            (Some(len), _) => settings.pass_length = len,
            (None, Mode::Simulate) => {
                if let Some(target) = &flags.target {
                    settings.sim_length = target.chars().count();
                }
            }
            (None, _) => {}
        }

        if let Some(num) = flags.number {
            settings.number_of_passwords = num;
        }

        if flags.no_upper {
            settings.uppercase = false;
        }
        if flags.no_lower {
            settings.lowercase = false;
        }
        if flags.no_digits {
            settings.digits = false;
        }
        if flags.no_special {
            settings.symbols = false;
        }
        if let Some(chars) = &flags.special {
            settings.special_chars = chars.chars().collect();
            settings.symbols = !flags.no_special;
        }

        if let Some(rate) = flags.rate {
            settings.attempts_per_second = rate;
        }
        if let Some(rate) = flags.sim_rate {
            settings.sim_rate = rate;
        }
        if let Some(pace) = flags.pace {
            settings.sim_pace = pace;
        }
        if let Some(ms) = flags.interval {
            settings.progress_interval_ms = ms;
        }

        if flags.urandom {
            if urand::is_available() {
                settings.entropy_source = EntropySource::Urandom;
            } else {
                prompts::urandom_unavailable();
            }
        }
    }

    fn show_info(&self) -> Result<(), Stop> {
        let spec = self.settings.charset_spec();
        let metrics = KeyspaceMetrics::compute(&self.settings.charset(), self.settings.pass_length)?;
        output::print_stats(&metrics, &spec, self.settings.attempts_per_second)?;
        Ok(())
    }

    fn check(&self) -> Result<(), Stop> {
        let password = match self.flags.check.as_deref() {
            Some("-") | None => read_password()?,
            Some(p) => Zeroizing::new(p.to_owned()),
        };
        let analysis = check::analyze(&password);
        if self.flags.quiet {
            println!("{}", output::check_summary(&analysis));
        } else {
            output::print_check(&analysis);
        }
        Ok(())
    }

    fn simulate(&self, rng: &mut Box<dyn RandomSource>) -> Result<(), Stop> {
        let config = SimConfig {
            charset: self.settings.charset(),
            length: self.settings.sim_length,
            target: self.flags.target.as_deref().map(|t| Zeroizing::new(t.to_owned())),
            sim_rate: self.settings.sim_rate,
            drive: self.settings.drive_options(),
            quiet: self.flags.quiet,
        };
        sim::run(config, rng.as_mut())?;
        Ok(())
    }

    /// Generate passwords and handle output.
    fn generate_output(&self, rng: &mut Box<dyn RandomSource>) -> Result<(), Stop> {
        let charset = self.settings.charset();
        let length = self.settings.pass_length;
        let count = self.settings.number_of_passwords.max(1);
        let passwords = pass::generate_batch(&charset, length, count, rng.as_mut())?;

        if !self.flags.clipboard || !copy_to_clipboard(&passwords, count)? {
            output::print_passwords(&passwords);
        }

        if !self.flags.quiet {
            let metrics = KeyspaceMetrics::compute(&charset, length)?;
            println!();
            output::print_stats(
                &metrics,
                &self.settings.charset_spec(),
                self.settings.attempts_per_second,
            )?;
        }
        Ok(())
    }
}

/// One line from stdin, without the line ending.
fn read_password() -> Result<Zeroizing<String>, Stop> {
    let mut line = Zeroizing::new(String::new());
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|_| Stop::Failed(Error::InvalidInput("cannot read password from stdin")))?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}

/// Returns `Ok(false)` when the clipboard is unavailable and the user chose
/// to print instead.
fn copy_to_clipboard(passwords: &str, count: usize) -> Result<bool, Stop> {
    let mut ctx = match ClipboardContext::new() {
        Ok(ctx) => ctx,
        Err(_) if prompts::clipboard_fallback_prompt() => return Ok(false),
        Err(_) => return Err(Stop::Done),
    };

    let mut contents = passwords.trim_end().to_string();
    match ctx.set_contents(contents.clone()) {
        Ok(()) => {
            if let Ok(mut readback) = ctx.get_contents() {
                readback.zeroize();
            }
            prompts::clipboard_copied(count);
        }
        Err(e) => prompts::clipboard_error(&e.to_string()),
    }
    contents.zeroize();
    Ok(true)
}
