//! Keyspace report shown next to generated passwords and by `--info`.

use std::io::Write;

use zeroize::Zeroize;

use crate::error::Result;
use crate::keyspace::{KeyspaceMetrics, entropy_meter};
use crate::pass::charset::{CharClass, CharsetSpec};
use crate::pass::check::Analysis;
use crate::terminal::{
    box_bottom, box_field, box_line, box_top, format_number, progress_bar_box,
};

/// Human form of an attempts-per-second rate.
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 && rate >= 0.0 && rate < 1e21 {
        format_number(rate as u128)
    } else {
        format!("{rate:.2e}")
    }
}

/// `3 (uppercase, lowercase, digits)`
fn class_summary(spec: &CharsetSpec) -> String {
    let names: Vec<&str> = CharClass::ALL
        .into_iter()
        .filter(|&class| spec.includes(class))
        .map(CharClass::name)
        .collect();
    format!("{} ({})", spec.class_count(), names.join(", "))
}

/// Stats box plus entropy meter.
pub fn print_stats(
    metrics: &KeyspaceMetrics,
    spec: &CharsetSpec,
    attempts_per_second: f64,
) -> Result<()> {
    let crack = metrics.crack_time(attempts_per_second)?;
    let strength = metrics.strength();

    box_top("Keyspace");
    box_field("Length:", &format_number(metrics.length as u128));
    box_field("Character classes:", &class_summary(spec));
    box_field("Charset size:", &metrics.charset_size.to_string());
    box_field("Combinations:", &metrics.combinations.to_string());
    box_field("Entropy:", &format!("{:.2} bits", metrics.entropy_bits));
    box_field("Strength:", strength.label());
    let approx = if metrics.combinations.is_overflow() { "~" } else { "" };
    box_field(
        "Time to crack:",
        &format!("{approx}{crack} (at {} guesses/s)", format_rate(attempts_per_second)),
    );
    box_bottom();

    progress_bar_box(
        entropy_meter(metrics.entropy_bits),
        &format!("{:.1} / 128 bits • {strength}", metrics.entropy_bits),
    );
    Ok(())
}

/// Report for `--check`: class mix, entropy, patterns and tips.
pub fn print_check(analysis: &Analysis) {
    let classes: Vec<&str> = analysis.classes.iter().map(|c| c.name()).collect();

    box_top("Password Check");
    box_field("Rating:", &analysis.rating.to_string());
    box_field("Length:", &format_number(analysis.length as u128));
    box_field(
        "Character classes:",
        &format!("{} ({})", classes.len(), classes.join(", ")),
    );
    box_field("Inferred charset:", &analysis.charset_size.to_string());
    box_field("Entropy:", &format!("{:.2} bits", analysis.entropy_bits));
    box_field("Strength:", analysis.strength.label());

    if !analysis.patterns.is_empty() {
        box_line("");
        box_line("Obvious patterns:");
        for pattern in &analysis.patterns {
            box_line(&format!("  - {pattern}"));
        }
    }

    box_line("");
    if analysis.tips.is_empty() {
        box_line("No suggestions.");
    } else {
        box_line("Suggestions:");
        for tip in &analysis.tips {
            box_line(&format!("  - {tip}"));
        }
    }
    box_bottom();

    progress_bar_box(
        entropy_meter(analysis.entropy_bits),
        &format!("{:.1} / 128 bits • {}", analysis.entropy_bits, analysis.strength),
    );
}

/// One line for quiet mode: `medium 52.44 bits`.
pub fn check_summary(analysis: &Analysis) -> String {
    format!("{} {:.2} bits", analysis.rating, analysis.entropy_bits)
}

/// Write passwords to stdout as-is, one per line, so output stays pipeable.
pub fn print_passwords(passwords: &str) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut buf = passwords.as_bytes().to_vec();
    if !buf.ends_with(b"\n") {
        buf.push(b'\n');
    }
    let _ = out.write_all(&buf);
    let _ = out.flush();
    buf.zeroize();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_are_grouped_or_scientific() {
        assert_eq!(format_rate(1e9), "1,000,000,000");
        assert_eq!(format_rate(1000.0), "1,000");
        assert_eq!(format_rate(2.5), "2.50e0");
        assert_eq!(format_rate(1e30), "1.00e30");
    }

    #[test]
    fn class_summary_names_selected_classes_in_order() {
        let spec = CharsetSpec {
            uppercase: false,
            symbols: false,
            ..CharsetSpec::default()
        };
        assert_eq!(class_summary(&spec), "2 (lowercase, digits)");
    }

    #[test]
    fn check_summary_is_rating_and_bits() {
        let analysis = crate::pass::check::analyze("abcdefgh");
        assert_eq!(check_summary(&analysis), "weak 37.60 bits");
    }
}
