//! Settings file persistence.
//!
//! One line of comma-separated fields. Inside the special character list a
//! `|` escapes the next character, so `,` is written `|,` and `|` is `||`.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use super::Settings;

const FIELD_COUNT: usize = 13;

pub fn default_path() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".config/keyspace/settings")
}

pub fn save(path: &Path, settings: &Settings) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    let fields = [
        settings.pass_length.to_string(),
        settings.number_of_passwords.to_string(),
        settings.uppercase.to_string(),
        settings.lowercase.to_string(),
        settings.digits.to_string(),
        settings.symbols.to_string(),
        escape(&settings.special_chars),
        settings.attempts_per_second.to_string(),
        settings.sim_length.to_string(),
        settings.sim_rate.to_string(),
        settings.sim_pace.to_string(),
        settings.progress_interval_ms.to_string(),
        settings.entropy_source.to_string(),
    ];

    writeln!(file, "{}", fields.join(","))?;
    debug!(path = %path.display(), "settings saved");
    Ok(())
}

pub fn load(path: &Path, settings: &mut Settings) -> std::io::Result<()> {
    if !path.exists() {
        return save(path, settings);
    }

    let mut line = String::new();
    BufReader::new(fs::File::open(path)?).read_line(&mut line)?;

    let parts = split_escaped(line.trim_end_matches(['\r', '\n']), ',');
    if parts.len() != FIELD_COUNT {
        warn!(
            path = %path.display(),
            fields = parts.len(),
            "settings file malformed, rewriting defaults"
        );
        return save(path, settings);
    }

    parse_into(&parts[0], &mut settings.pass_length);
    parse_into(&parts[1], &mut settings.number_of_passwords);
    parse_into(&parts[2], &mut settings.uppercase);
    parse_into(&parts[3], &mut settings.lowercase);
    parse_into(&parts[4], &mut settings.digits);
    parse_into(&parts[5], &mut settings.symbols);
    settings.special_chars = parts[6].chars().collect();
    parse_into(&parts[7], &mut settings.attempts_per_second);
    parse_into(&parts[8], &mut settings.sim_length);
    parse_into(&parts[9], &mut settings.sim_rate);
    parse_into(&parts[10], &mut settings.sim_pace);
    parse_into(&parts[11], &mut settings.progress_interval_ms);
    parse_into(&parts[12], &mut settings.entropy_source);

    Ok(())
}

/// Overwrite `slot` only when `s` parses; bad fields keep their default.
fn parse_into<T: FromStr>(s: &str, slot: &mut T) {
    if let Ok(v) = s.parse() {
        *slot = v;
    }
}

fn escape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len() * 2);
    for &c in chars {
        if c == ',' || c == '|' {
            out.push('|');
        }
        out.push(c);
    }
    out
}

fn split_escaped(s: &str, delimiter: char) -> Vec<String> {
    let mut parts = vec![];
    let mut current = String::new();
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '|' {
            if let Some(next) = chars.next() {
                current.push(next);
            }
        } else if c == delimiter {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}
