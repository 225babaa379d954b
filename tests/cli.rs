use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

/// Runs with an empty HOME so saved settings never leak into a test.
fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("keyspace").unwrap();
    cmd.env("HOME", home.path()).env_remove("KEYSPACE_LOG");
    cmd
}

#[test]
fn info_reports_exact_combinations() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-i", "-l", "8", "--no-special"])
        .assert()
        .success()
        .stdout(contains("218,340,105,584,896"))
        .stdout(contains("1.26 days"));
}

#[test]
fn info_past_the_cap_reports_overflow() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-i", "-l", "20"])
        .assert()
        .success()
        .stdout(contains("> 10^15"));
}

#[test]
fn quiet_generate_prints_only_passwords() {
    let home = TempDir::new().unwrap();
    let out = cmd(&home)
        .args(["-q", "-l", "12", "-n", "3", "--no-special"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(
        lines
            .iter()
            .all(|l| l.len() == 12 && l.chars().all(|c| c.is_ascii_alphanumeric()))
    );
}

#[test]
fn simulate_finds_given_target() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-S", "-q", "--no-upper", "--no-digits", "--no-special", "-t", "abc"])
        .assert()
        .success()
        .stdout(contains("found after 29 attempts"));
}

#[test]
fn simulate_target_outside_charset_exhausts() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-S", "-q", "--no-upper", "--no-lower", "--no-special", "-t", "a1"])
        .assert()
        .success()
        .stdout(contains("exhausted after 100 attempts"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("--bogus")
        .assert()
        .code(2)
        .stderr(contains("Unknown argument: --bogus"));
}

#[test]
fn zero_length_is_a_configuration_error() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-l", "0"])
        .assert()
        .code(1)
        .stderr(contains("length must be at least 1"));
}

#[test]
fn empty_charset_is_a_configuration_error() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-i", "--no-upper", "--no-lower", "--no-digits", "--no-special"])
        .assert()
        .code(1)
        .stderr(contains("charset is empty"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("-v")
        .assert()
        .success()
        .stdout(contains(concat!("keyspace ", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn saved_flag_creates_default_settings_file() {
    let home = TempDir::new().unwrap();
    cmd(&home).args(["-s", "-i"]).assert().success();
    assert!(home.path().join(".config/keyspace/settings").is_file());
}

#[test]
fn oversized_length_is_a_configuration_error() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-q", "-l", "18446744073709551615"])
        .assert()
        .code(1)
        .stderr(contains("length must be at most 4096"));
    cmd(&home)
        .args(["-S", "-q", "-l", "18446744073709551615", "--no-special"])
        .assert()
        .code(1)
        .stderr(contains("length must be at most 4096"));
}

#[test]
fn oversized_count_is_a_configuration_error() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-q", "-l", "8", "-n", "18446744073709551615"])
        .assert()
        .code(1)
        .stderr(contains("number of passwords must be at most"));
}

#[test]
fn check_reports_patterns_and_tips() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-c", "password123"])
        .assert()
        .success()
        .stdout(contains("common sequence 'password'"))
        .stdout(contains("Add uppercase letters"));
}

#[test]
fn quiet_check_reads_stdin() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-q", "-c", "-"])
        .write_stdin("abcdefgh\n")
        .assert()
        .success()
        .stdout(contains("weak 37.60 bits"));
}
