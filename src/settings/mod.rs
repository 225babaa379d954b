//! Generator and simulator settings.

mod file;

use std::path::Path;
use std::time::Duration;

use crate::keyspace::DEFAULT_ATTEMPTS_PER_SECOND;
use crate::pass::charset::{self, Charset, CharsetSpec, SYMBOLS};
use crate::progress::{DEFAULT_BATCH, DEFAULT_INTERVAL, DriveOptions};
use crate::rand::EntropySource;

/// Simulated attack rate shown in the simulator statistics.
pub const DEFAULT_SIM_RATE: f64 = 1_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub pass_length: usize,
    pub number_of_passwords: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub special_chars: Vec<char>,
    pub attempts_per_second: f64,
    pub sim_length: usize,
    pub sim_rate: f64,
    /// Attempts per second for the live simulation. 0 runs unpaced.
    pub sim_pace: u64,
    pub progress_interval_ms: u64,
    pub entropy_source: EntropySource,
}

impl Settings {
    pub fn charset_spec(&self) -> CharsetSpec {
        CharsetSpec {
            uppercase: self.uppercase,
            lowercase: self.lowercase,
            digits: self.digits,
            symbols: self.symbols,
            special_chars: self.special_chars.clone(),
        }
    }

    pub fn charset(&self) -> Charset {
        charset::build(&self.charset_spec())
    }

    /// Host-loop options for the simulator.
    pub fn drive_options(&self) -> DriveOptions {
        DriveOptions {
            batch: DEFAULT_BATCH,
            interval: Duration::from_millis(self.progress_interval_ms),
            pace: (self.sim_pace > 0).then_some(self.sim_pace),
        }
    }

    pub fn load_from_file() -> Result<Self, std::io::Error> {
        Self::load_from(&file::default_path())
    }

    pub fn save_to_file(&self) -> Result<(), std::io::Error> {
        self.save_to(&file::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, std::io::Error> {
        let mut settings = Settings::default();
        file::load(path, &mut settings)?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        file::save(path, self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pass_length: 16,
            number_of_passwords: 1,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            special_chars: SYMBOLS.chars().collect(),
            attempts_per_second: DEFAULT_ATTEMPTS_PER_SECOND,
            sim_length: 4,
            sim_rate: DEFAULT_SIM_RATE,
            sim_pace: 0,
            progress_interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            entropy_source: EntropySource::Hardware,
        }
    }
}
