//! Resumable brute-force enumeration over a fixed-length keyspace.
//!
//! Candidates are produced in mixed-radix order: positions are digits in base
//! `charset.len()`, the rightmost digit changes fastest, and index 0 is the
//! first charset character repeated. The engine never loops on its own; the
//! host calls [`EnumerationEngine::step`] (or [`EnumerationEngine::step_batch`])
//! until the status is terminal.

use std::time::{Duration, Instant};

use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{self, Result};
use crate::pass::charset::Charset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Found,
    Exhausted,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Found | Status::Exhausted)
    }
}

/// What a single call to `step` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    pub status: Status,
    pub attempts: u128,
    pub candidate: &'a str,
}

impl Step<'static> {
    fn idle() -> Self {
        Step {
            status: Status::Idle,
            attempts: 0,
            candidate: "",
        }
    }
}

/// The candidate at `index` (0-based), most significant character first.
pub fn candidate_at(charset: &Charset, length: usize, mut index: u128) -> String {
    if charset.is_empty() {
        return String::new();
    }
    let chars = charset.chars();

    let radix = chars.len() as u128;
    let mut out = vec![chars[0]; length];
    for slot in out.iter_mut().rev() {
        *slot = chars[(index % radix) as usize];
        index /= radix;
    }
    out.into_iter().collect()
}

/// Inverse of [`candidate_at`]. `None` if a character is outside the charset
/// or the index does not fit in a `u128`.
pub fn index_of(charset: &Charset, candidate: &str) -> Option<u128> {
    let radix = charset.len() as u128;
    candidate.chars().try_fold(0u128, |acc, c| {
        let digit = charset.position(c)? as u128;
        acc.checked_mul(radix)?.checked_add(digit)
    })
}

// =============================================================================
// Run state
// =============================================================================

struct Run {
    charset: Charset,
    /// Odometer, most significant digit first.
    digits: Vec<usize>,
    candidate: Zeroizing<String>,
    target: Zeroizing<String>,
    attempts: u128,
    total: Option<u128>,
    status: Status,
    started: Instant,
    finished: Option<Instant>,
}

impl Run {
    fn advance(&mut self) {
        self.render();
        self.attempts += 1;

        if *self.candidate == *self.target {
            self.finish(Status::Found);
        } else if !self.increment() {
            self.finish(Status::Exhausted);
        }
    }

    fn render(&mut self) {
        let chars = self.charset.chars();
        self.candidate.clear();
        self.candidate.extend(self.digits.iter().map(|&d| chars[d]));
    }

    /// Returns false when the odometer rolls over, i.e. every candidate has
    /// been produced.
    fn increment(&mut self) -> bool {
        let radix = self.charset.len();
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < radix {
                return true;
            }
            *digit = 0;
        }
        false
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        self.finished = Some(Instant::now());
        debug!(
            ?status,
            attempts = self.attempts as u64,
            elapsed_ms = self.elapsed().as_millis() as u64,
            "enumeration finished"
        );
    }

    fn elapsed(&self) -> Duration {
        self.finished
            .unwrap_or_else(Instant::now)
            .saturating_duration_since(self.started)
    }

    fn snapshot(&self) -> Step<'_> {
        Step {
            status: self.status,
            attempts: self.attempts,
            candidate: &self.candidate,
        }
    }
}

impl Drop for Run {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Drives at most one run at a time. Starting a new run discards the old one.
#[derive(Default)]
pub struct EnumerationEngine {
    run: Option<Run>,
}

impl EnumerationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh run. A target that cannot be produced from `charset` is
    /// accepted and ends in [`Status::Exhausted`].
    pub fn start(&mut self, charset: Charset, length: usize, target: &str) -> Result<()> {
        error::validate(charset.len(), length)?;

        let total = u32::try_from(length)
            .ok()
            .and_then(|exp| (charset.len() as u128).checked_pow(exp));

        debug!(
            charset_size = charset.len(),
            length,
            total = ?total,
            "enumeration started"
        );

        self.run = Some(Run {
            digits: vec![0; length],
            candidate: Zeroizing::new(String::with_capacity(length)),
            target: Zeroizing::new(target.to_owned()),
            charset,
            attempts: 0,
            total,
            status: Status::Running,
            started: Instant::now(),
            finished: None,
        });
        Ok(())
    }

    /// Try exactly one candidate. A no-op unless the run is `Running`.
    pub fn step(&mut self) -> Step<'_> {
        self.step_batch(1)
    }

    /// Try up to `limit` candidates, stopping early on a terminal status.
    pub fn step_batch(&mut self, limit: usize) -> Step<'_> {
        let Some(run) = self.run.as_mut() else {
            return Step::idle();
        };
        for _ in 0..limit {
            if run.status != Status::Running {
                break;
            }
            run.advance();
        }
        run.snapshot()
    }

    /// Return to `Idle` from any state. Counters stay readable; stepping
    /// does nothing until the next `start`.
    pub fn cancel(&mut self) {
        if let Some(run) = self.run.as_mut() {
            if run.status == Status::Running {
                run.finished = Some(Instant::now());
                debug!(attempts = run.attempts as u64, "enumeration cancelled");
            }
            run.status = Status::Idle;
        }
    }

    pub fn snapshot(&self) -> Step<'_> {
        self.run.as_ref().map_or(Step::idle(), Run::snapshot)
    }

    pub fn status(&self) -> Status {
        self.run.as_ref().map_or(Status::Idle, |run| run.status)
    }

    pub fn attempts(&self) -> u128 {
        self.run.as_ref().map_or(0, |run| run.attempts)
    }

    /// Keyspace size, when it fits in a `u128`.
    pub fn total(&self) -> Option<u128> {
        self.run.as_ref().and_then(|run| run.total)
    }

    pub fn elapsed(&self) -> Duration {
        self.run.as_ref().map_or(Duration::ZERO, Run::elapsed)
    }

    pub fn target(&self) -> Option<&str> {
        self.run.as_ref().map(|run| run.target.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigIssue, Error};

    fn run_to_end(engine: &mut EnumerationEngine, max_steps: u128) -> (Status, u128) {
        for _ in 0..max_steps {
            let step = engine.step();
            if step.status.is_terminal() {
                return (step.status, step.attempts);
            }
        }
        (engine.status(), engine.attempts())
    }

    #[test]
    fn candidate_order_for_two_chars_length_two() {
        let charset = Charset::from("AB");
        let seq: Vec<String> = (0..4).map(|i| candidate_at(&charset, 2, i)).collect();
        assert_eq!(seq, ["AA", "AB", "BA", "BB"]);
    }

    #[test]
    fn engine_walks_the_same_order_as_candidate_at() {
        let charset = Charset::from("xyz");
        let mut engine = EnumerationEngine::new();
        engine.start(charset.clone(), 3, "never").unwrap();

        for index in 0..27u128 {
            let expected = candidate_at(&charset, 3, index);
            let step = engine.step();
            assert_eq!(step.candidate, expected, "index {index}");
            assert_eq!(step.attempts, index + 1);
        }
    }

    #[test]
    fn index_of_round_trips() {
        let charset = Charset::from("abc123");
        for index in [0u128, 1, 5, 6, 77, 215] {
            let candidate = candidate_at(&charset, 3, index);
            assert_eq!(index_of(&charset, &candidate), Some(index));
        }
        for candidate in ["aaa", "c1b", "333", "3a2"] {
            let index = index_of(&charset, candidate).unwrap();
            assert_eq!(candidate_at(&charset, 3, index), candidate);
        }
    }

    #[test]
    fn index_of_rejects_foreign_characters() {
        assert_eq!(index_of(&Charset::from("AB"), "ABC"), None);
    }

    #[test]
    fn finds_target_at_its_index_plus_one() {
        let mut engine = EnumerationEngine::new();
        engine.start(Charset::from("AB"), 3, "ABA").unwrap();

        let (status, attempts) = run_to_end(&mut engine, 100);
        assert_eq!(status, Status::Found);
        assert_eq!(attempts, 3);
        assert_eq!(engine.snapshot().candidate, "ABA");
    }

    #[test]
    fn last_candidate_is_found_not_exhausted() {
        let mut engine = EnumerationEngine::new();
        engine.start(Charset::from("AB"), 3, "BBB").unwrap();

        let (status, attempts) = run_to_end(&mut engine, 100);
        assert_eq!(status, Status::Found);
        assert_eq!(attempts, 8);
    }

    #[test]
    fn foreign_target_exhausts_after_exactly_r_pow_l_steps() {
        let mut engine = EnumerationEngine::new();
        engine.start(Charset::from("AB"), 3, "ABC").unwrap();
        assert_eq!(engine.total(), Some(8));

        for n in 1..8 {
            let step = engine.step();
            assert_eq!(step.status, Status::Running);
            assert_eq!(step.attempts, n);
        }
        let step = engine.step();
        assert_eq!(step.status, Status::Exhausted);
        assert_eq!(step.attempts, 8);

        // Terminal: further steps change nothing.
        let step = engine.step();
        assert_eq!(step.status, Status::Exhausted);
        assert_eq!(step.attempts, 8);
    }

    #[test]
    fn wrong_length_target_exhausts() {
        let mut engine = EnumerationEngine::new();
        engine.start(Charset::from("01"), 4, "01").unwrap();
        assert_eq!(run_to_end(&mut engine, 1_000), (Status::Exhausted, 16));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut engine = EnumerationEngine::new();
        engine.start(Charset::from("ab"), 2, "AB").unwrap();
        assert_eq!(run_to_end(&mut engine, 100), (Status::Exhausted, 4));
    }

    #[test]
    fn start_rejects_invalid_configuration() {
        let mut engine = EnumerationEngine::new();
        assert_eq!(
            engine.start(Charset::default(), 3, "abc"),
            Err(Error::InvalidConfiguration(ConfigIssue::EmptyCharset))
        );
        assert_eq!(
            engine.start(Charset::from("abc"), 0, ""),
            Err(Error::InvalidConfiguration(ConfigIssue::ZeroLength))
        );
        assert_eq!(engine.status(), Status::Idle);
    }

    #[test]
    fn idle_engine_steps_are_no_ops() {
        let mut engine = EnumerationEngine::new();
        let step = engine.step();
        assert_eq!(step.status, Status::Idle);
        assert_eq!(step.attempts, 0);
        assert_eq!(step.candidate, "");
    }

    #[test]
    fn cancel_stops_stepping_until_restart() {
        let mut engine = EnumerationEngine::new();
        engine.start(Charset::from("abc"), 4, "cccc").unwrap();
        engine.step_batch(10);
        engine.cancel();

        assert_eq!(engine.status(), Status::Idle);
        let step = engine.step();
        assert_eq!(step.status, Status::Idle);
        assert_eq!(step.attempts, 10);

        engine.start(Charset::from("abc"), 2, "ab").unwrap();
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(engine.attempts(), 0);
        assert_eq!(run_to_end(&mut engine, 100), (Status::Found, 2));
    }

    #[test]
    fn cancel_after_terminal_returns_to_idle() {
        let mut engine = EnumerationEngine::new();
        engine.start(Charset::from("ab"), 1, "a").unwrap();
        assert_eq!(engine.step().status, Status::Found);
        engine.cancel();
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.attempts(), 1);
        assert_eq!(engine.step().status, Status::Idle);

        engine.start(Charset::from("ab"), 1, "c").unwrap();
        engine.step_batch(5);
        assert_eq!(engine.status(), Status::Exhausted);
        engine.cancel();
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.attempts(), 2);
    }

    #[test]
    fn oversized_length_is_rejected_before_allocating() {
        let mut engine = EnumerationEngine::new();
        assert_eq!(
            engine.start(Charset::from("ab"), usize::MAX, "a"),
            Err(Error::InvalidConfiguration(ConfigIssue::LengthTooLarge))
        );
        assert_eq!(engine.status(), Status::Idle);
    }

    #[test]
    fn start_supersedes_a_running_run() {
        let mut engine = EnumerationEngine::new();
        engine.start(Charset::from("ab"), 8, "bbbbbbbb").unwrap();
        engine.step_batch(20);
        engine.start(Charset::from("xy"), 1, "y").unwrap();
        assert_eq!(engine.target(), Some("y"));
        assert_eq!(engine.total(), Some(2));
        assert_eq!(run_to_end(&mut engine, 10), (Status::Found, 2));
    }

    #[test]
    fn batch_stops_at_terminal_status() {
        let mut engine = EnumerationEngine::new();
        engine.start(Charset::from("0123456789"), 3, "042").unwrap();
        let step = engine.step_batch(10_000);
        assert_eq!(step.status, Status::Found);
        assert_eq!(step.attempts, 43);
    }

    #[test]
    fn total_is_none_when_it_does_not_fit() {
        let mut engine = EnumerationEngine::new();
        engine
            .start(Charset::from("0123456789"), 40, "0")
            .unwrap();
        assert_eq!(engine.total(), None);
        assert_eq!(engine.step().status, Status::Running);
    }
}
