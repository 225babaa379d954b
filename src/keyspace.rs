//! Keyspace size, entropy and crack-time estimates.
//!
//! Everything here is a pure function of a charset size and a length. Large
//! numbers never fail: combinations above [`COMBINATION_CAP`] degrade to
//! [`Combinations::Overflow`], and search times beyond what a [`Duration`] can
//! hold become [`CrackTime::Unbounded`].

use std::fmt;
use std::time::Duration;

use crate::error::{self, Error, Result};
use crate::pass::charset::Charset;
use crate::terminal::format_number;

/// Largest keyspace reported exactly (10^15).
pub const COMBINATION_CAP: u64 = 1_000_000_000_000_000;

/// Assumed offline attack rate used by the generator report.
pub const DEFAULT_ATTEMPTS_PER_SECOND: f64 = 1e9;

// ============================================================================
// Combinations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Combinations {
    Exact(u64),
    /// Above the cap. Carries the approximate magnitude, which may be infinite.
    Overflow(f64),
}

impl Combinations {
    pub fn as_f64(self) -> f64 {
        match self {
            Combinations::Exact(n) => n as f64,
            Combinations::Overflow(approx) => approx,
        }
    }

    pub fn exact(self) -> Option<u64> {
        match self {
            Combinations::Exact(n) => Some(n),
            Combinations::Overflow(_) => None,
        }
    }

    pub fn is_overflow(self) -> bool {
        matches!(self, Combinations::Overflow(_))
    }
}

impl fmt::Display for Combinations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinations::Exact(n) => f.write_str(&format_number(u128::from(*n))),
            Combinations::Overflow(approx) if approx.is_finite() => {
                write!(f, "> 10^15 (~{approx:.2e})")
            }
            Combinations::Overflow(_) => f.write_str("> 10^15"),
        }
    }
}

/// `charset_size ^ length`, capped at [`COMBINATION_CAP`].
pub fn total_combinations(charset_size: usize, length: usize) -> Combinations {
    match charset_size {
        0 if length == 0 => return Combinations::Exact(1),
        0 => return Combinations::Exact(0),
        1 => return Combinations::Exact(1),
        _ => {}
    }

    let exact = u32::try_from(length)
        .ok()
        .and_then(|exp| (charset_size as u64).checked_pow(exp));

    match exact {
        Some(n) if n <= COMBINATION_CAP => Combinations::Exact(n),
        _ => Combinations::Overflow((charset_size as f64).powf(length as f64)),
    }
}

// ============================================================================
// Entropy
// ============================================================================

/// Password entropy in bits: `length * log2(charset_size)`.
pub fn entropy_bits(length: usize, charset_size: usize) -> Result<f64> {
    if charset_size == 0 {
        return Err(Error::InvalidInput("charset size must be positive"));
    }
    Ok(length as f64 * (charset_size as f64).log2())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn label(self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Boundary values belong to the upper bucket.
pub fn classify_strength(bits: f64) -> Strength {
    if bits.is_nan() || bits < 32.0 {
        Strength::Weak
    } else if bits < 64.0 {
        Strength::Medium
    } else if bits < 96.0 {
        Strength::Strong
    } else {
        Strength::VeryStrong
    }
}

/// Fill percentage of the entropy meter, full at 128 bits.
pub fn entropy_meter(bits: f64) -> f32 {
    ((bits / 128.0) * 100.0).clamp(0.0, 100.0) as f32
}

// ============================================================================
// Crack time
// ============================================================================

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const MONTH: f64 = 2_592_000.0;
const YEAR: f64 = 31_536_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Instant,
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
    Unbounded,
}

impl TimeUnit {
    fn of_secs(secs: f64) -> Self {
        match secs {
            s if s < 1.0 => TimeUnit::Instant,
            s if s < MINUTE => TimeUnit::Seconds,
            s if s < HOUR => TimeUnit::Minutes,
            s if s < DAY => TimeUnit::Hours,
            s if s < MONTH => TimeUnit::Days,
            s if s < YEAR => TimeUnit::Months,
            _ => TimeUnit::Years,
        }
    }

    fn scale(self) -> f64 {
        match self {
            TimeUnit::Minutes => MINUTE,
            TimeUnit::Hours => HOUR,
            TimeUnit::Days => DAY,
            TimeUnit::Months => MONTH,
            TimeUnit::Years => YEAR,
            _ => 1.0,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TimeUnit::Instant | TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Months => "months",
            TimeUnit::Years => "years",
            TimeUnit::Unbounded => "unbounded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrackTime {
    Bounded(Duration),
    Unbounded,
}

impl CrackTime {
    pub fn from_secs_f64(secs: f64) -> Self {
        if !secs.is_finite() || secs < 0.0 {
            return CrackTime::Unbounded;
        }
        Duration::try_from_secs_f64(secs)
            .map(CrackTime::Bounded)
            .unwrap_or(CrackTime::Unbounded)
    }

    pub fn as_secs_f64(&self) -> Option<f64> {
        match self {
            CrackTime::Bounded(d) => Some(d.as_secs_f64()),
            CrackTime::Unbounded => None,
        }
    }

    pub fn unit(&self) -> TimeUnit {
        match self.as_secs_f64() {
            Some(secs) => TimeUnit::of_secs(secs),
            None => TimeUnit::Unbounded,
        }
    }
}

impl fmt::Display for CrackTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(secs) = self.as_secs_f64() else {
            return f.write_str("forever");
        };
        match self.unit() {
            TimeUnit::Instant => f.write_str("less than a second"),
            TimeUnit::Seconds if secs < 2.0 => f.write_str("1 second"),
            TimeUnit::Seconds => write!(f, "{} seconds", secs.floor()),
            unit => write!(f, "{:.2} {}", secs / unit.scale(), unit.name()),
        }
    }
}

fn search_time(attempts: f64, attempts_per_second: f64) -> Result<CrackTime> {
    if !attempts_per_second.is_finite() || attempts_per_second <= 0.0 {
        return Err(Error::InvalidInput(
            "attempts per second must be positive and finite",
        ));
    }
    Ok(CrackTime::from_secs_f64(attempts / attempts_per_second))
}

/// Average time to find the password: half the keyspace at the given rate.
pub fn estimate_crack_time(
    combinations: Combinations,
    attempts_per_second: f64,
) -> Result<CrackTime> {
    search_time(combinations.as_f64() / 2.0, attempts_per_second)
}

/// Time to try every candidate at the given rate.
pub fn worst_case_time(combinations: Combinations, attempts_per_second: f64) -> Result<CrackTime> {
    search_time(combinations.as_f64(), attempts_per_second)
}

// ============================================================================
// Metrics
// ============================================================================

/// Derived once per configuration, never updated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyspaceMetrics {
    pub charset_size: usize,
    pub length: usize,
    pub combinations: Combinations,
    pub entropy_bits: f64,
}

impl KeyspaceMetrics {
    pub fn compute(charset: &Charset, length: usize) -> Result<Self> {
        error::validate(charset.len(), length)?;
        Ok(Self {
            charset_size: charset.len(),
            length,
            combinations: total_combinations(charset.len(), length),
            entropy_bits: entropy_bits(length, charset.len())?,
        })
    }

    pub fn strength(&self) -> Strength {
        classify_strength(self.entropy_bits)
    }

    pub fn crack_time(&self, attempts_per_second: f64) -> Result<CrackTime> {
        estimate_crack_time(self.combinations, attempts_per_second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigIssue;

    #[test]
    fn combinations_are_exact_up_to_the_cap() {
        assert_eq!(total_combinations(2, 3), Combinations::Exact(8));
        assert_eq!(total_combinations(26, 4), Combinations::Exact(456_976));
        assert_eq!(
            total_combinations(62, 8),
            Combinations::Exact(218_340_105_584_896)
        );
        assert_eq!(
            total_combinations(10, 15),
            Combinations::Exact(COMBINATION_CAP)
        );
    }

    #[test]
    fn combinations_overflow_past_the_cap() {
        let over = total_combinations(10, 16);
        assert!(over.is_overflow());
        assert_eq!(over.exact(), None);
        assert!(((over.as_f64() - 1e16) / 1e16).abs() < 1e-9);
        assert_eq!(over.to_string(), "> 10^15 (~1.00e16)");

        // Past u64 as well.
        assert!(total_combinations(94, 20).is_overflow());
    }

    #[test]
    fn combinations_overflow_to_infinity_keeps_the_sentinel() {
        let huge = total_combinations(94, 400);
        assert!(huge.is_overflow());
        assert!(huge.as_f64().is_infinite());
        assert_eq!(huge.to_string(), "> 10^15");
    }

    #[test]
    fn combinations_degenerate_bases() {
        assert_eq!(total_combinations(0, 5), Combinations::Exact(0));
        assert_eq!(total_combinations(1, 1_000), Combinations::Exact(1));
        assert_eq!(total_combinations(7, 0), Combinations::Exact(1));
    }

    #[test]
    fn exact_combinations_display_with_separators() {
        assert_eq!(total_combinations(10, 6).to_string(), "1,000,000");
    }

    #[test]
    fn entropy_matches_formula_and_is_monotone() {
        let bits = entropy_bits(8, 62).unwrap();
        assert!((bits - 8.0 * 62f64.log2()).abs() < 1e-12);

        let mut last = 0.0;
        for length in 1..20 {
            let bits = entropy_bits(length, 26).unwrap();
            assert!(bits > last);
            last = bits;
        }
        let mut last = 0.0;
        for size in 2..100 {
            let bits = entropy_bits(10, size).unwrap();
            assert!(bits > last);
            last = bits;
        }
    }

    #[test]
    fn entropy_rejects_empty_charset() {
        assert_eq!(
            entropy_bits(8, 0),
            Err(Error::InvalidInput("charset size must be positive"))
        );
    }

    #[test]
    fn strength_boundaries_go_to_the_upper_bucket() {
        assert_eq!(classify_strength(0.0), Strength::Weak);
        assert_eq!(classify_strength(31.999), Strength::Weak);
        assert_eq!(classify_strength(32.0), Strength::Medium);
        assert_eq!(classify_strength(63.999), Strength::Medium);
        assert_eq!(classify_strength(64.0), Strength::Strong);
        assert_eq!(classify_strength(95.5), Strength::Strong);
        assert_eq!(classify_strength(96.0), Strength::VeryStrong);
        assert_eq!(classify_strength(f64::NAN), Strength::Weak);
    }

    #[test]
    fn entropy_meter_is_clamped() {
        assert_eq!(entropy_meter(64.0), 50.0);
        assert_eq!(entropy_meter(500.0), 100.0);
        assert_eq!(entropy_meter(0.0), 0.0);
    }

    #[test]
    fn crack_time_for_62_chars_length_8_is_in_days() {
        let combos = total_combinations(62, 8);
        let time = estimate_crack_time(combos, 1e9).unwrap();
        let secs = time.as_secs_f64().unwrap();
        assert!((secs - 109_170.052_792_448).abs() < 1e-3);
        assert_eq!(time.unit(), TimeUnit::Days);
        assert_eq!(time.to_string(), "1.26 days");
    }

    #[test]
    fn crack_time_unit_thresholds() {
        let unit = |secs: f64| CrackTime::from_secs_f64(secs).unit();
        assert_eq!(unit(0.5), TimeUnit::Instant);
        assert_eq!(unit(1.0), TimeUnit::Seconds);
        assert_eq!(unit(59.9), TimeUnit::Seconds);
        assert_eq!(unit(60.0), TimeUnit::Minutes);
        assert_eq!(unit(3_600.0), TimeUnit::Hours);
        assert_eq!(unit(86_400.0), TimeUnit::Days);
        assert_eq!(unit(2_592_000.0), TimeUnit::Months);
        assert_eq!(unit(31_536_000.0), TimeUnit::Years);
    }

    #[test]
    fn crack_time_display() {
        assert_eq!(
            CrackTime::from_secs_f64(0.2).to_string(),
            "less than a second"
        );
        assert_eq!(CrackTime::from_secs_f64(1.5).to_string(), "1 second");
        assert_eq!(CrackTime::from_secs_f64(42.9).to_string(), "42 seconds");
        assert_eq!(CrackTime::from_secs_f64(90.0).to_string(), "1.50 minutes");
        assert_eq!(CrackTime::Unbounded.to_string(), "forever");
    }

    #[test]
    fn crack_time_is_unbounded_for_unrepresentable_values() {
        let inf = total_combinations(94, 400);
        assert_eq!(estimate_crack_time(inf, 1e9), Ok(CrackTime::Unbounded));

        let beyond_duration = total_combinations(94, 40);
        assert_eq!(
            estimate_crack_time(beyond_duration, 1.0).map(|t| t.unit()),
            Ok(TimeUnit::Unbounded)
        );
        assert_eq!(CrackTime::from_secs_f64(f64::NAN), CrackTime::Unbounded);
    }

    #[test]
    fn crack_time_rejects_bad_rates() {
        let combos = total_combinations(10, 4);
        assert!(estimate_crack_time(combos, 0.0).is_err());
        assert!(estimate_crack_time(combos, -5.0).is_err());
        assert!(estimate_crack_time(combos, f64::INFINITY).is_err());
    }

    #[test]
    fn worst_case_is_twice_the_average() {
        let combos = total_combinations(52, 3);
        let avg = estimate_crack_time(combos, 1_000.0).unwrap();
        let worst = worst_case_time(combos, 1_000.0).unwrap();
        let (avg, worst) = (avg.as_secs_f64().unwrap(), worst.as_secs_f64().unwrap());
        assert!((worst - 2.0 * avg).abs() < 1e-6);
    }

    #[test]
    fn metrics_validate_configuration() {
        assert_eq!(
            KeyspaceMetrics::compute(&Charset::default(), 8),
            Err(Error::InvalidConfiguration(ConfigIssue::EmptyCharset))
        );
        assert_eq!(
            KeyspaceMetrics::compute(&Charset::from("abc"), 0),
            Err(Error::InvalidConfiguration(ConfigIssue::ZeroLength))
        );
    }

    #[test]
    fn metrics_combine_the_pieces() {
        let charset = Charset::from("0123456789abcdef");
        let metrics = KeyspaceMetrics::compute(&charset, 8).unwrap();
        assert_eq!(metrics.charset_size, 16);
        assert_eq!(metrics.combinations, Combinations::Exact(1 << 32));
        assert!((metrics.entropy_bits - 32.0).abs() < 1e-12);
        assert_eq!(metrics.strength(), Strength::Medium);
    }
}
