use std::str::FromStr;

use thiserror::Error;

use super::{CliFlags, Mode};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid number for {flag}: {value}")]
    InvalidNumber { flag: String, value: String },
    #[error("Missing value for {0}")]
    MissingValue(String),
    #[error("Unknown argument: {0}")]
    UnknownArg(String),
}

fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, ParseError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| ParseError::MissingValue(flag.clone()))
}

fn number<T: FromStr>(args: &[String], i: &mut usize) -> Result<T, ParseError> {
    let flag = args[*i].clone();
    let raw = value(args, i)?;
    raw.replace('_', "")
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            flag,
            value: raw.to_string(),
        })
}

/// Parse `args` (including the program name at index 0).
pub fn parse(args: &[String]) -> Result<CliFlags, ParseError> {
    let mut flags = CliFlags::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => flags.help = true,
            "-v" | "--version" => flags.version = true,
            "-q" | "--quiet" => flags.quiet = true,
            "-u" | "--urandom" => flags.urandom = true,
            "-b" | "--board" => flags.clipboard = true,
            "-s" | "--saved" => flags.saved = true,
            "-d" | "--default" => flags.saved = false,
            "-i" | "--info" => flags.mode = Mode::Info,
            "-S" | "--simulate" => flags.mode = Mode::Simulate,
            "--no-upper" => flags.no_upper = true,
            "--no-lower" => flags.no_lower = true,
            "--no-digits" => flags.no_digits = true,
            "--no-special" => flags.no_special = true,
            "--special" => flags.special = Some(value(args, &mut i)?.to_string()),
            "-c" | "--check" => {
                flags.mode = Mode::Check;
                flags.check = Some(value(args, &mut i)?.to_string());
            }
            "-t" | "--target" => flags.target = Some(value(args, &mut i)?.to_string()),
            "-l" | "--length" => flags.length = Some(number(args, &mut i)?),
            "-n" | "--number" => flags.number = Some(number(args, &mut i)?),
            "--rate" => flags.rate = Some(number(args, &mut i)?),
            "--sim-rate" => flags.sim_rate = Some(number(args, &mut i)?),
            "--pace" => flags.pace = Some(number(args, &mut i)?),
            "--interval" => flags.interval = Some(number(args, &mut i)?),
            arg => return Err(ParseError::UnknownArg(arg.to_string())),
        }
        i += 1;
    }

    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("keyspace")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn no_arguments_is_generate_mode() {
        let flags = parse(&args(&[])).unwrap();
        assert_eq!(flags.mode, Mode::Generate);
    }

    #[test]
    fn simulate_flags() {
        let flags = parse(&args(&[
            "-S", "-l", "3", "--no-digits", "--no-special", "-t", "aZb", "--pace", "500",
        ]))
        .unwrap();
        assert_eq!(flags.mode, Mode::Simulate);
        assert_eq!(flags.length, Some(3));
        assert_eq!(flags.target.as_deref(), Some("aZb"));
        assert_eq!(flags.pace, Some(500));
        assert!(flags.no_digits && flags.no_special && !flags.no_upper);
    }

    #[test]
    fn rates_accept_scientific_notation_and_separators() {
        let flags = parse(&args(&["-i", "--rate", "1e12", "--sim-rate", "10_000"])).unwrap();
        assert_eq!(flags.mode, Mode::Info);
        assert_eq!(flags.rate, Some(1e12));
        assert_eq!(flags.sim_rate, Some(10_000.0));
    }

    #[test]
    fn check_takes_a_password() {
        let flags = parse(&args(&["--check", "hunter2"])).unwrap();
        assert_eq!(flags.mode, Mode::Check);
        assert_eq!(flags.check.as_deref(), Some("hunter2"));
        assert_eq!(
            parse(&args(&["-c"])).unwrap_err(),
            ParseError::MissingValue("-c".into())
        );
    }

    #[test]
    fn last_of_saved_and_default_wins() {
        assert!(parse(&args(&["-d", "-s"])).unwrap().saved);
        assert!(!parse(&args(&["-s", "-d"])).unwrap().saved);
    }

    #[test]
    fn bad_number_is_reported_with_its_flag() {
        assert_eq!(
            parse(&args(&["-l", "ten"])).unwrap_err(),
            ParseError::InvalidNumber {
                flag: "-l".into(),
                value: "ten".into()
            }
        );
    }

    #[test]
    fn missing_value_and_unknown_flag() {
        assert_eq!(
            parse(&args(&["--special"])).unwrap_err(),
            ParseError::MissingValue("--special".into())
        );
        assert_eq!(
            parse(&args(&["--hex"])).unwrap_err(),
            ParseError::UnknownArg("--hex".into())
        );
    }
}
