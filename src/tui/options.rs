use std::process::exit;

use tracing::warn;
use zeroize::Zeroizing;

use crate::keyspace::KeyspaceMetrics;
use crate::pass::{self, check, output};
use crate::rand::{self, EntropySource, urand};
use crate::settings::Settings;
use crate::sim::{self, SimConfig};
use crate::terminal::{clear, print_error, reset_terminal};

use super::{
    enter_prompt, get_editable_input, get_numeric_input, print_help, print_main_menu,
    print_settings_menu,
};

/// Line printed under a menu after the last action.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    None,
    InvalidOption,
    NotNumber,
    Message(String),
}

enum Next {
    Stay,
    Leave,
}

/// Generate with the current settings and print the keyspace report.
fn generate(settings: &Settings) {
    let charset = settings.charset();
    let count = settings.number_of_passwords.max(1);
    let mut rng = rand::open(settings.entropy_source);

    let report = pass::generate_batch(&charset, settings.pass_length, count, rng.as_mut())
        .and_then(|passwords| {
            output::print_passwords(&passwords);
            println!();
            KeyspaceMetrics::compute(&charset, settings.pass_length)
        })
        .and_then(|metrics| {
            output::print_stats(
                &metrics,
                &settings.charset_spec(),
                settings.attempts_per_second,
            )
        });

    if let Err(e) = report {
        print_error(&e.to_string());
    }
    println!();
}

fn simulate(settings: &Settings) {
    let config = SimConfig {
        charset: settings.charset(),
        length: settings.sim_length,
        target: None,
        sim_rate: settings.sim_rate,
        drive: settings.drive_options(),
        quiet: false,
    };
    let mut rng = rand::open(settings.entropy_source);
    if let Err(e) = sim::run(config, rng.as_mut()) {
        print_error(&e.to_string());
        println!();
    }
    reset_terminal();
}

fn check_password() {
    let Some(password) = get_editable_input("Password to check", "").map(Zeroizing::new) else {
        clear();
        return;
    };
    clear();
    output::print_check(&check::analyze(&password));
    println!();
}

pub fn gen_main_menu() {
    reset_terminal();
    clear();

    let mut settings = Settings::load_from_file().unwrap_or_else(|e| {
        warn!(error = %e, "cannot load settings, using defaults");
        Settings::default()
    });
    let mut notice = Notice::None;

    loop {
        print_main_menu(&notice);
        notice = Notice::None;

        let Some(input) = get_editable_input(enter_prompt(), "") else {
            clear();
            continue;
        };

        match input.trim() {
            "" => {
                clear();
                generate(&settings);
                reset_terminal();
            }
            // passwords are generated by update_settings when Enter is pressed
            "1" => update_settings(&mut settings),
            "2" => {
                clear();
                simulate(&settings);
            }
            "3" => check_password(),
            "4" => clear(),
            "5" => {
                clear();
                print_help();
            }
            "6" | "q" => {
                clear();
                break;
            }
            _ => {
                clear();
                notice = Notice::InvalidOption;
            }
        }
    }
}

pub fn update_settings(settings: &mut Settings) {
    let mut notice = Notice::None;

    loop {
        print_settings_menu(settings, &notice);
        notice = Notice::None;

        let Some(choice) = get_editable_input(enter_prompt(), "") else {
            clear();
            return;
        };
        let choice = choice.trim();

        let next = match choice.parse::<u32>() {
            Ok(option) => menu_option(option, settings, &mut notice),
            Err(_) => command_option(choice, settings, &mut notice),
        };
        if let Next::Leave = next {
            return;
        }
    }
}

/// Read a whole number; `None` keeps the current value.
fn numeric<T>(prompt: &str, current: T, notice: &mut Notice) -> Option<T>
where
    T: Copy + TryFrom<u64> + TryInto<u64>,
{
    let start: u64 = current.try_into().unwrap_or(0);
    let value = get_numeric_input(prompt, start)?;
    match T::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            *notice = Notice::NotNumber;
            None
        }
    }
}

/// Read a positive rate; accepts `1e9` and `_` separators.
fn rate(prompt: &str, current: f64, notice: &mut Notice) -> Option<f64> {
    let text = get_editable_input(prompt, &current.to_string())?;
    match text.trim().replace('_', "").parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        _ => {
            *notice = Notice::Message("Invalid input, please enter a positive rate...".into());
            None
        }
    }
}

fn menu_option(option: u32, settings: &mut Settings, notice: &mut Notice) -> Next {
    match option {
        1 => {
            if let Some(len) = numeric("Enter new password length", settings.pass_length, notice)
            {
                settings.pass_length = len;
            }
        }
        2 => {
            if let Some(n) =
                numeric("Enter number of passwords", settings.number_of_passwords, notice)
            {
                settings.number_of_passwords = n;
            }
        }
        3 => settings.uppercase = !settings.uppercase,
        4 => settings.lowercase = !settings.lowercase,
        5 => settings.digits = !settings.digits,
        6 => settings.symbols = !settings.symbols,
        7 => {
            let current: String = settings.special_chars.iter().collect();
            if let Some(chars) =
                get_editable_input("Enter new special characters without spaces", &current)
            {
                settings.special_chars = chars.trim().chars().collect();
            }
        }
        8 => {
            if let Some(r) = rate("Attempts per second", settings.attempts_per_second, notice) {
                settings.attempts_per_second = r;
            }
        }
        9 => {
            if let Some(len) = numeric("Simulation target length", settings.sim_length, notice) {
                settings.sim_length = len;
            }
        }
        10 => {
            if let Some(r) = rate("Simulated attempts per second", settings.sim_rate, notice) {
                settings.sim_rate = r;
            }
        }
        11 => {
            if let Some(p) = numeric("Live pace (0 = unpaced)", settings.sim_pace, notice) {
                settings.sim_pace = p;
            }
        }
        12 => {
            if let Some(ms) =
                numeric("Progress interval (ms)", settings.progress_interval_ms, notice)
            {
                settings.progress_interval_ms = ms;
            }
        }
        13 => {
            let next = settings.entropy_source.toggled();
            if next == EntropySource::Urandom && !urand::is_available() {
                *notice = Notice::Message(format!("{} not available on this system", urand::PATH));
            } else {
                settings.entropy_source = next;
            }
        }
        _ => *notice = Notice::InvalidOption,
    }
    Next::Stay
}

fn command_option(choice: &str, settings: &mut Settings, notice: &mut Notice) -> Next {
    match choice {
        "" => {
            clear();
            generate(settings);
            Next::Leave
        }
        "help" => {
            clear();
            print_help();
            Next::Leave
        }
        "s" => {
            if let Err(e) = settings.save_to_file() {
                *notice = Notice::Message(format!("Error saving settings: {e}"));
            }
            Next::Stay
        }
        "r" => {
            *settings = Settings::default();
            Next::Stay
        }
        "f" => {
            match Settings::load_from_file() {
                Ok(saved) => *settings = saved,
                Err(e) => *notice = Notice::Message(format!("Error loading settings: {e}")),
            }
            Next::Stay
        }
        "e" => {
            clear();
            exit(0);
        }
        _ => {
            *notice = Notice::InvalidOption;
            Next::Stay
        }
    }
}
