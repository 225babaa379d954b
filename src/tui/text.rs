use crate::keyspace::KeyspaceMetrics;
use crate::pass::charset;
use crate::pass::output::format_rate;
use crate::settings::Settings;
use crate::terminal::{
    BOX_WIDTH, RESET, UNDERLINE, box_bottom, box_line, box_line_center, box_opt, box_top, clear,
    flush, format_number, print_error, print_rule,
};

use super::Notice;

/// Inner width available to a `box_line`.
const LINE_WIDTH: usize = BOX_WIDTH - 4;

pub fn enter_prompt() -> &'static str {
    "Enter menu option (or press Enter to generate passwords)"
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// `['!', '@', ...]` wrapped onto as many lines as needed.
fn special_chars_lines(prefix: &str, chars: &[char]) -> Vec<String> {
    const INDENT: &str = "      ";
    if chars.is_empty() {
        return vec![format!("{prefix}[]")];
    }

    let mut lines = Vec::new();
    let mut line = format!("{prefix}[");
    for (i, c) in chars.iter().enumerate() {
        let sep = if i == 0 { "" } else { ", " };
        let close = if i + 1 == chars.len() { "]" } else { "," };
        let item = format!("'{c}'");
        if line.chars().count() + sep.len() + item.chars().count() + close.len() > LINE_WIDTH {
            line.push(',');
            lines.push(std::mem::replace(&mut line, format!("{INDENT}{item}")));
        } else {
            line.push_str(sep);
            line.push_str(&item);
        }
    }
    line.push(']');
    lines.push(line);
    lines
}

pub fn print_help() {
    box_top("Keyspace");
    box_line_center("Password generator and brute-force simulator");
    box_line("");
    box_line("MODES:");
    box_line("  1) Interactive: Run without arguments. Opens a menu to configure");
    box_line("     settings, generate passwords and run simulations.");
    box_line("  2) Client: Pass flags directly (e.g., -l 20 -n 5).");
    box_line("  3) Check: Rate a password you already use (-c).");
    box_line("");
    box_line("USAGE:");
    box_line("  keyspace [OPTIONS]");
    box_line("");
    box_line("OPTIONS:");
    box_line(" Mode:");
    box_opt("  -i, --info", "Print keyspace metrics only");
    box_opt("  -S, --simulate", "Brute-force a generated (or given) target");
    box_opt("  -c, --check <PASS>", "Rate an existing password (- reads stdin)");
    box_line("");
    box_line(" Charset:");
    box_opt("      --no-upper", "Exclude A-Z");
    box_opt("      --no-lower", "Exclude a-z");
    box_opt("      --no-digits", "Exclude 0-9");
    box_opt("      --no-special", "Exclude special characters");
    box_opt("      --special <CHARS>", "Override the special character set");
    box_line("");
    box_line(" Password:");
    box_opt("  -l, --length <N>", "Characters per password (simulation length with -S)");
    box_opt("  -n, --number <N>", "How many passwords to generate");
    box_opt("      --rate <N>", "Attempts per second for crack-time estimates (default: 1e9)");
    box_line("");
    box_line(" Simulation:");
    box_opt("  -t, --target <PASS>", "Search for this password instead of a random one");
    box_opt("      --sim-rate <N>", "Attack rate shown in the statistics (default: 1000)");
    box_opt("      --pace <N>", "Limit the live search to N attempts per second");
    box_opt("      --interval <MS>", "Progress redraw interval (default: 100)");
    box_line("");
    box_line(" Output:");
    box_opt("  -b, --board", "Copy to clipboard instead of printing");
    box_opt("  -q, --quiet", "Suppress everything except passwords and results");
    box_line("");
    box_line(" Settings:");
    box_opt("  -d, --default", "Use default settings");
    box_opt("  -s, --saved", "Use saved settings from the config file");
    box_opt("  -u, --urandom", "Use /dev/urandom instead of hardware entropy");
    box_line("");
    box_line(" Info:");
    box_opt("  -h, --help", "Display this help message");
    box_opt("  -v, --version", "Display version");
    box_line("");
    box_line("EXAMPLES:");
    box_line("  keyspace -l 20 -n 3           Three passwords, 20 characters each");
    box_line("  keyspace -i -l 8 --no-special Metrics for 8 alphanumeric characters");
    box_line("  keyspace -S -l 4 --no-special Crack a random 4-character password");
    box_line("  keyspace -S -t abc --no-upper --no-digits --no-special");
    box_line("  echo 'hunter2' | keyspace -c -  Rate a password without argv");
    box_line("");
    box_line(&format!("Set {} (e.g. debug) for diagnostics.", crate::logging::ENV_VAR));
    box_bottom();
    println!();
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::None => println!(),
        Notice::InvalidOption => print_error("Invalid input, please enter a valid menu option..."),
        Notice::NotNumber => print_error("Invalid input, please enter a number..."),
        Notice::Message(msg) => print_error(msg),
    }
    flush();
}

pub fn print_main_menu(notice: &Notice) {
    box_top("Main Menu");
    box_line("");
    box_line("  1) settings");
    box_line("  2) simulate");
    box_line("  3) check password");
    box_line("  4) clear");
    box_line("  5) help");
    box_line("  6) quit");
    box_line("");
    box_bottom();
    print_notice(notice);
}

fn print_keyspace_summary(settings: &Settings) {
    if charset::size(&settings.charset_spec()) == 0 {
        box_line("  No character classes selected");
        return;
    }
    match KeyspaceMetrics::compute(&settings.charset(), settings.pass_length) {
        Ok(metrics) => {
            box_line(&format!(
                "  {} chars, {} combinations, {:.1} bits ({})",
                metrics.charset_size,
                metrics.combinations,
                metrics.entropy_bits,
                metrics.strength().label()
            ));
        }
        Err(e) => box_line(&format!("  {e}")),
    }
}

pub fn print_settings_menu(settings: &Settings, notice: &Notice) {
    clear();
    box_top("Settings Menu");
    box_line_center("Esc/CTRL+Q: cancel | CTRL+U: clear input");
    box_line("");

    box_line(&format!("{UNDERLINE}Password{RESET}:"));
    box_line(&format!("  1) Length: {}", format_number(settings.pass_length as u128)));
    box_line(&format!(
        "  2) Number of Passwords: {}",
        format_number(settings.number_of_passwords as u128)
    ));

    box_line("");
    box_line(&format!("{UNDERLINE}Character Classes{RESET}:"));
    box_line(&format!("  3) Uppercase (A-Z): {}", on_off(settings.uppercase)));
    box_line(&format!("  4) Lowercase (a-z): {}", on_off(settings.lowercase)));
    box_line(&format!("  5) Digits (0-9): {}", on_off(settings.digits)));
    box_line(&format!("  6) Special: {}", on_off(settings.symbols)));
    for line in special_chars_lines("  7) Special Character List: ", &settings.special_chars) {
        box_line(&line);
    }

    box_line("");
    box_line(&format!("{UNDERLINE}Estimates{RESET}:"));
    box_line(&format!(
        "  8) Attempts per Second: {}",
        format_rate(settings.attempts_per_second)
    ));
    print_keyspace_summary(settings);

    box_line("");
    box_line(&format!("{UNDERLINE}Simulation{RESET}:"));
    box_line(&format!("  9) Target Length: {}", settings.sim_length));
    box_line(&format!("  10) Simulated Rate: {}/s", format_rate(settings.sim_rate)));
    let pace = match settings.sim_pace {
        0 => "unpaced".to_string(),
        n => format!("{}/s", format_number(u128::from(n))),
    };
    box_line(&format!("  11) Live Pace: {pace}"));
    box_line(&format!("  12) Progress Interval: {} ms", settings.progress_interval_ms));

    box_line("");
    box_line(&format!("{UNDERLINE}Entropy{RESET}:"));
    box_line(&format!(
        "  13) Source: {} ({})",
        settings.entropy_source,
        settings.entropy_source.describe()
    ));

    box_line("");
    print_rule();
    box_line("     r) load defaults  |  f) load saved  |  s) save  |  e) exit");
    box_bottom();
    print_notice(notice);
}
