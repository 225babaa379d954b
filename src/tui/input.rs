//! Single-line editors for the menus, run in raw mode.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, read};

use crate::terminal::{RawModeGuard, flush, format_number, reset_terminal};

#[derive(Debug, PartialEq, Eq)]
enum Edit {
    Continue,
    Submit,
    Cancel,
    Quit,
}

/// Edit buffer with a cursor counted in chars (0 = before the first one).
#[derive(Debug)]
struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
    digits_only: bool,
}

impl LineBuffer {
    fn new(initial: &str, digits_only: bool) -> Self {
        let chars: Vec<char> = initial
            .chars()
            .filter(|c| !digits_only || c.is_ascii_digit())
            .collect();
        Self {
            cursor: chars.len(),
            chars,
            digits_only,
        }
    }

    fn apply(&mut self, key: KeyEvent) -> Edit {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return Edit::Quit,
            KeyCode::Char('q') if ctrl => return Edit::Cancel,
            KeyCode::Char('u') if ctrl => {
                self.chars.clear();
                self.cursor = 0;
            }
            KeyCode::Esc => return Edit::Cancel,
            KeyCode::Enter => return Edit::Submit,
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.chars.remove(self.cursor);
            }
            KeyCode::Delete if self.cursor < self.chars.len() => {
                self.chars.remove(self.cursor);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.chars.len(),
            KeyCode::Char(c) if !ctrl && (!self.digits_only || c.is_ascii_digit()) => {
                self.chars.insert(self.cursor, c);
                self.cursor += 1;
            }
            _ => {}
        }
        Edit::Continue
    }

    fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// What to draw and where the cursor lands in it (0-based column).
    fn display(&self) -> (String, usize) {
        if !self.digits_only || self.chars.is_empty() {
            return (self.text(), self.cursor);
        }
        let text = self.text();
        let shown = text
            .parse::<u128>()
            .map(format_number)
            .unwrap_or_else(|_| text.clone());
        (shown, grouped_column(self.chars.len(), self.cursor))
    }
}

/// Column of a cursor sitting after `before` of `len` digits once thousands
/// separators are inserted.
fn grouped_column(len: usize, before: usize) -> usize {
    let lead = match len % 3 {
        0 => 3,
        r => r,
    };
    let commas = if before <= lead {
        0
    } else {
        1 + (before - lead - 1) / 3
    };
    before + commas
}

fn edit_line(prompt: &str, mut buffer: LineBuffer) -> Option<String> {
    let Ok(guard) = RawModeGuard::new() else {
        return Some(buffer.text());
    };

    let offset = prompt.chars().count() + 2;
    let mut drawn = 0;
    let mut redraw = |buffer: &LineBuffer| {
        let (shown, column) = buffer.display();
        print!("\r{prompt}: {}", " ".repeat(drawn));
        print!("\r{prompt}: {shown}");
        print!("\x1b[{}G", offset + column + 1);
        flush();
        drawn = shown.chars().count() + 1;
    };
    redraw(&buffer);

    let result = loop {
        match read() {
            Ok(Event::Key(key)) => match buffer.apply(key) {
                Edit::Continue => redraw(&buffer),
                Edit::Submit => break Some(buffer.text()),
                Edit::Cancel => break None,
                Edit::Quit => {
                    // process::exit skips destructors
                    drop(guard);
                    reset_terminal();
                    println!();
                    std::process::exit(0);
                }
            },
            Ok(_) => {}
            Err(_) => break Some(buffer.text()),
        }
    };

    drop(guard);
    println!();
    result
}

/// Free-text input. `None` when cancelled with Esc or Ctrl+Q.
pub fn get_editable_input(prompt: &str, initial: &str) -> Option<String> {
    edit_line(prompt, LineBuffer::new(initial, false))
}

/// Digits-only input shown with thousands separators. An empty line is 0.
pub fn get_numeric_input(prompt: &str, initial: u64) -> Option<u64> {
    let start = if initial > 0 {
        initial.to_string()
    } else {
        String::new()
    };
    let text = edit_line(prompt, LineBuffer::new(&start, true))?;
    if text.is_empty() {
        Some(0)
    } else {
        text.parse().ok()
    }
}
