//! Character set building for password generation and enumeration.

use std::collections::HashSet;
use std::fmt;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{};\\':\",./<>?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Uppercase,
    Lowercase,
    Digits,
    Symbols,
}

impl CharClass {
    /// Build order. Changing it changes every enumeration sequence.
    pub const ALL: [CharClass; 4] = [
        CharClass::Uppercase,
        CharClass::Lowercase,
        CharClass::Digits,
        CharClass::Symbols,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CharClass::Uppercase => "uppercase",
            CharClass::Lowercase => "lowercase",
            CharClass::Digits => "digits",
            CharClass::Symbols => "symbols",
        }
    }
}

/// Which classes to include, plus the symbol list standing in for `Symbols`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetSpec {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub special_chars: Vec<char>,
}

impl CharsetSpec {
    pub fn includes(&self, class: CharClass) -> bool {
        match class {
            CharClass::Uppercase => self.uppercase,
            CharClass::Lowercase => self.lowercase,
            CharClass::Digits => self.digits,
            CharClass::Symbols => self.symbols && !self.special_chars.is_empty(),
        }
    }

    /// Number of selected classes that contribute at least one character.
    pub fn class_count(&self) -> usize {
        CharClass::ALL
            .iter()
            .filter(|&&class| self.includes(class))
            .count()
    }

    fn class_chars(&self, class: CharClass) -> Vec<char> {
        match class {
            CharClass::Uppercase => UPPERCASE.chars().collect(),
            CharClass::Lowercase => LOWERCASE.chars().collect(),
            CharClass::Digits => DIGITS.chars().collect(),
            CharClass::Symbols => self.special_chars.clone(),
        }
    }
}

impl Default for CharsetSpec {
    fn default() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            special_chars: SYMBOLS.chars().collect(),
        }
    }
}

/// Ordered alphabet with no repeated characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Charset(Vec<char>);

impl Charset {
    /// Keeps the first occurrence of every character.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut seen = HashSet::new();
        Charset(chars.into_iter().filter(|c| seen.insert(*c)).collect())
    }

    pub fn chars(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn position(&self, c: char) -> Option<usize> {
        self.0.iter().position(|&x| x == c)
    }
}

impl From<&str> for Charset {
    fn from(s: &str) -> Self {
        Charset::new(s.chars())
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Build the alphabet for the selected classes, in class order.
pub fn build(spec: &CharsetSpec) -> Charset {
    Charset::new(
        CharClass::ALL
            .into_iter()
            .filter(|&class| spec.includes(class))
            .flat_map(|class| spec.class_chars(class)),
    )
}

/// Effective charset size (for entropy calculation).
pub fn size(spec: &CharsetSpec) -> usize {
    build(spec).len()
}
