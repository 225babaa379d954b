//! Strength check for a password the user already has.
//!
//! The charset is inferred from the classes the password actually uses, so
//! the entropy figure is what an attacker who guessed those classes would face.

use std::fmt;

use super::charset::{CharClass, SYMBOLS};
use crate::keyspace::{Strength, classify_strength, entropy_bits};

/// Pool size assumed for each class when inferring a charset.
const fn pool_size(class: CharClass) -> usize {
    match class {
        CharClass::Uppercase | CharClass::Lowercase => 26,
        CharClass::Digits => 10,
        CharClass::Symbols => 32,
    }
}

const COMMON_SEQUENCES: [&str; 4] = ["123", "abc", "qwerty", "password"];
const PATTERN_PENALTY: i32 = 2;

fn class_of(c: char) -> Option<CharClass> {
    match c {
        'A'..='Z' => Some(CharClass::Uppercase),
        'a'..='z' => Some(CharClass::Lowercase),
        '0'..='9' => Some(CharClass::Digits),
        c if SYMBOLS.contains(c) => Some(CharClass::Symbols),
        _ => None,
    }
}

/// Rule-of-thumb rating from length, class mix and obvious patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Weak,
    Medium,
    Strong,
}

impl Rating {
    fn from_score(score: i32) -> Self {
        match score {
            ..=2 => Rating::Weak,
            3..=4 => Rating::Medium,
            _ => Rating::Strong,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rating::Weak => "weak",
            Rating::Medium => "medium",
            Rating::Strong => "strong",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// The same character three or more times in a row.
    RepeatedRun,
    /// A well-known fragment such as "123" or "password", any case.
    CommonSequence(&'static str),
    /// Three consecutive code points, e.g. "xyz" or "456".
    Ascending,
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::RepeatedRun => f.write_str("repeated characters (e.g. 'aaa')"),
            Pattern::CommonSequence(s) => write!(f, "common sequence '{s}'"),
            Pattern::Ascending => f.write_str("ascending run (e.g. 'xyz', '456')"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub length: usize,
    pub classes: Vec<CharClass>,
    pub charset_size: usize,
    pub entropy_bits: f64,
    pub strength: Strength,
    pub score: i32,
    pub rating: Rating,
    pub patterns: Vec<Pattern>,
    pub tips: Vec<&'static str>,
}

fn has_repeated_run(chars: &[char]) -> bool {
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

fn has_ascending_run(chars: &[char]) -> bool {
    chars.windows(3).any(|w| {
        let (a, b, c) = (w[0] as u32, w[1] as u32, w[2] as u32);
        b == a + 1 && c == b + 1
    })
}

pub fn find_patterns(password: &str) -> Vec<Pattern> {
    let chars: Vec<char> = password.chars().collect();
    let lower = password.to_lowercase();

    let mut found = Vec::new();
    if has_repeated_run(&chars) {
        found.push(Pattern::RepeatedRun);
    }
    found.extend(
        COMMON_SEQUENCES
            .into_iter()
            .filter(|seq| lower.contains(seq))
            .map(Pattern::CommonSequence),
    );
    if has_ascending_run(&chars) {
        found.push(Pattern::Ascending);
    }
    found
}

fn tips(length: usize, classes: &[CharClass]) -> Vec<&'static str> {
    let mut tips = Vec::new();
    if length < 8 {
        tips.push("Use at least 8 characters");
    }
    for class in CharClass::ALL {
        if !classes.contains(&class) {
            tips.push(match class {
                CharClass::Uppercase => "Add uppercase letters",
                CharClass::Lowercase => "Add lowercase letters",
                CharClass::Digits => "Add digits",
                CharClass::Symbols => "Add special characters (!@#$%)",
            });
        }
    }
    tips
}

pub fn analyze(password: &str) -> Analysis {
    let length = password.chars().count();
    let classes: Vec<CharClass> = CharClass::ALL
        .into_iter()
        .filter(|&class| password.chars().any(|c| class_of(c) == Some(class)))
        .collect();
    let charset_size = classes.iter().map(|&c| pool_size(c)).sum();
    let entropy = entropy_bits(length, charset_size).unwrap_or(0.0);
    let patterns = find_patterns(password);

    let length_points = [8, 12, 16].iter().filter(|&&min| length >= min).count();
    let mut score = (length_points + classes.len()) as i32;
    if !patterns.is_empty() {
        score -= PATTERN_PENALTY;
    }

    Analysis {
        length,
        charset_size,
        entropy_bits: entropy,
        strength: classify_strength(entropy),
        score,
        rating: Rating::from_score(score),
        tips: tips(length, &classes),
        classes,
        patterns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_is_inferred_from_used_classes() {
        assert_eq!(analyze("abc").charset_size, 26);
        assert_eq!(analyze("aB").charset_size, 52);
        assert_eq!(analyze("aB3").charset_size, 62);
        assert_eq!(analyze("aB3!").charset_size, 94);
        assert_eq!(analyze("").charset_size, 0);
    }

    #[test]
    fn entropy_uses_the_inferred_charset() {
        let a = analyze("Tr0ub4dor&3");
        assert!((a.entropy_bits - 11.0 * 94f64.log2()).abs() < 1e-9);
        assert_eq!(a.strength, classify_strength(a.entropy_bits));
    }

    #[test]
    fn empty_password_has_no_entropy() {
        let a = analyze("");
        assert_eq!(a.entropy_bits, 0.0);
        assert_eq!(a.rating, Rating::Weak);
        assert!(a.tips.contains(&"Use at least 8 characters"));
    }

    #[test]
    fn repeated_run_needs_three() {
        assert!(find_patterns("x9aaQ").is_empty());
        assert_eq!(find_patterns("x9aaaQ"), [Pattern::RepeatedRun]);
        assert_eq!(find_patterns("##!###"), [Pattern::RepeatedRun]);
    }

    #[test]
    fn common_sequences_any_case() {
        assert_eq!(find_patterns("myQWERTYkey"), [Pattern::CommonSequence("qwerty")]);
        assert!(find_patterns("PassWord!").contains(&Pattern::CommonSequence("password")));
    }

    #[test]
    fn digit_and_letter_runs_are_both_common_and_ascending() {
        assert_eq!(
            find_patterns("z123"),
            [Pattern::CommonSequence("123"), Pattern::Ascending]
        );
        assert_eq!(
            find_patterns("Xabc"),
            [Pattern::CommonSequence("abc"), Pattern::Ascending]
        );
    }

    #[test]
    fn ascending_run_anywhere() {
        assert_eq!(find_patterns("Q!xyz"), [Pattern::Ascending]);
        assert_eq!(find_patterns("7456"), [Pattern::Ascending]);
        assert!(find_patterns("acegik").is_empty());
        assert!(find_patterns("cba").is_empty());
    }

    #[test]
    fn score_and_rating() {
        // 16+ chars (3) and all four classes (4)
        let strong = analyze("Gv7#pQ2!mZ9@kL4$");
        assert_eq!(strong.score, 7);
        assert_eq!(strong.rating, Rating::Strong);
        assert!(strong.patterns.is_empty());
        assert!(strong.tips.is_empty());

        // same mix, pattern penalty drops it two points
        let flagged = analyze("Gv7#pQ2!mZ9@k123");
        assert_eq!(flagged.score, 5);
        assert_eq!(flagged.rating, Rating::Strong);

        // 8 chars (1), lower + digit (2), pattern (-2)
        let weak = analyze("abc12345");
        assert_eq!(weak.score, 1);
        assert_eq!(weak.rating, Rating::Weak);
    }

    #[test]
    fn rating_boundaries() {
        assert_eq!(Rating::from_score(-2), Rating::Weak);
        assert_eq!(Rating::from_score(2), Rating::Weak);
        assert_eq!(Rating::from_score(3), Rating::Medium);
        assert_eq!(Rating::from_score(4), Rating::Medium);
        assert_eq!(Rating::from_score(5), Rating::Strong);
    }

    #[test]
    fn tips_name_missing_classes_in_order() {
        assert_eq!(
            analyze("lowercaseonly").tips,
            ["Add uppercase letters", "Add digits", "Add special characters (!@#$%)"]
        );
    }
}
