//! Terminal output utilities.
//!
//! Box drawing, progress bars, number formatting, ANSI helpers.

use crossterm::terminal::disable_raw_mode;
use std::io::{self, Write};

// ============================================================================
// ANSI Color/Style Constants
// ============================================================================

pub const RESET: &str = "\x1b[0m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const RED: &str = "\x1b[38;5;9m";

// ============================================================================
// Terminal Control
// ============================================================================

/// Clear screen and move cursor to top-left.
pub fn clear() {
    print!("\x1b[2J\x1b[3J\x1b[H");
    flush();
}

pub fn flush() {
    let _ = io::stdout().flush();
}

pub fn hide_cursor() {
    print!("\x1b[?25l");
    flush();
}

pub fn show_cursor() {
    print!("\x1b[?25h");
    flush();
}

/// Move the cursor up `n` lines, to redraw a block in place.
pub fn cursor_up(n: usize) {
    if n > 0 {
        print!("\x1b[{n}A");
    }
}

/// Leave raw mode and drop any styling.
pub fn reset_terminal() {
    let _ = disable_raw_mode();
    print!("{RESET}");
    flush();
}

// ============================================================================
// Styled Output Helpers
// ============================================================================

pub fn print_error(msg: &str) {
    println!("{RED}{msg}{RESET}");
}

pub fn print_rule() {
    println!("├{}┤", "─".repeat(BOX_WIDTH - 2));
}

// ============================================================================
// Number Formatting
// ============================================================================

/// Group digits in threes: 1234567 -> "1,234,567".
pub fn format_number(num: u128) -> String {
    let digits = num.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ============================================================================
// Box Drawing
// ============================================================================

pub const BOX_WIDTH: usize = 74;
const INNER_WIDTH: usize = BOX_WIDTH - 4;

/// ┌─ Title ──────────┐
pub fn box_top(title: &str) {
    if title.is_empty() {
        println!("┌{}┐", "─".repeat(BOX_WIDTH - 2));
    } else {
        let head = format!("─ {title} ");
        let rest = (BOX_WIDTH - 2).saturating_sub(head.chars().count());
        println!("┌{head}{}┐", "─".repeat(rest));
    }
}

/// └──────────────────┘
pub fn box_bottom() {
    println!("└{}┘", "─".repeat(BOX_WIDTH - 2));
}

/// │ content          │
pub fn box_line(content: &str) {
    let pad = INNER_WIDTH.saturating_sub(display_width(content));
    println!("│ {content}{} │", " ".repeat(pad));
}

/// │     content      │
pub fn box_line_center(content: &str) {
    let pad = INNER_WIDTH.saturating_sub(display_width(content));
    let left = pad / 2;
    println!("│ {}{content}{} │", " ".repeat(left), " ".repeat(pad - left));
}

/// │ Label:        value │ with the value column aligned.
pub fn box_field(label: &str, value: &str) {
    box_line(&format!("{label:<22}{value}"));
}

/// Help row: flag in a fixed column, description word-wrapped beside it.
pub fn box_opt(flag: &str, desc: &str) {
    const FLAG_COL: usize = 27;
    let desc_col = INNER_WIDTH - FLAG_COL;

    let mut lines: Vec<String> = Vec::new();
    for word in desc.split_whitespace() {
        match lines.last_mut() {
            Some(current) if current.len() + 1 + word.len() <= desc_col => {
                current.push(' ');
                current.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    for (i, line) in lines.iter().enumerate() {
        let left = if i == 0 { flag } else { "" };
        box_line(&format!("{left:<width$}{line}", width = FLAG_COL));
    }
}

/// Visible width, skipping ANSI escape sequences.
fn display_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => width += 1,
        }
    }
    width
}

/// Print centered text within box width.
pub fn print_centered(text: &str) {
    let pad = BOX_WIDTH.saturating_sub(display_width(text)) / 2;
    print!("{}{text}\r\n", " ".repeat(pad));
    flush();
}

// ============================================================================
// Progress Bar
// ============================================================================

/// Number of lines [`progress_bar_box`] prints.
pub const PROGRESS_BAR_LINES: usize = 3;

/// Render a progress bar inside a box with centered text (3 lines).
/// The filled part is drawn in reverse video.
pub fn progress_bar_box(percent: f32, stats: &str) {
    let inner = BOX_WIDTH - 2;
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * inner as f32) as usize;

    let text: Vec<char> = stats.chars().take(inner).collect();
    let offset = (inner - text.len()) / 2;
    let mut content = vec![' '; inner];
    content[offset..offset + text.len()].copy_from_slice(&text);

    let edge = |fill: &str| format!("{}{}", fill.repeat(filled), "─".repeat(inner - filled));
    let [tl, ml, bl] = if filled > 0 { ["▗", "▐", "▝"] } else { ["┌", "│", "└"] };
    let [tr, mr, br] = if filled == inner { ["▖", "▌", "▘"] } else { ["┐", "│", "┘"] };

    let done: String = content[..filled].iter().collect();
    let rest: String = content[filled..].iter().collect();

    print!("\r{tl}{}{tr}\r\n", edge("▄"));
    print!("\r{ml}\x1b[7m{done}{RESET}{rest}{mr}\r\n");
    print!("\r{bl}{}{br}\r\n", edge("▀"));
    flush();
}
