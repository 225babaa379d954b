//! Host loop for the enumeration engine: batching, pacing, throttled progress
//! and cooperative cancellation.

use std::thread::sleep;
use std::time::{Duration, Instant};

use zeroize::Zeroizing;

use crate::engine::{EnumerationEngine, Status};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_BATCH: usize = 4_096;

/// Ticks per second when pacing, roughly a display refresh rate.
const PACE_TICKS_PER_SEC: u64 = 60;

/// Lets an event through at most once per interval.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    pub attempts: u128,
    pub total: Option<u128>,
    pub candidate: &'a str,
    pub elapsed: Duration,
}

impl<'a> Progress<'a> {
    fn of(engine: &'a EnumerationEngine) -> Self {
        Self {
            attempts: engine.attempts(),
            total: engine.total(),
            candidate: engine.snapshot().candidate,
            elapsed: engine.elapsed(),
        }
    }

    pub fn percent(&self) -> Option<f64> {
        self.total
            .filter(|&total| total > 0)
            .map(|total| (self.attempts as f64 / total as f64 * 100.0).min(100.0))
    }

    pub fn attempts_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempts as f64 / secs
        } else {
            0.0
        }
    }
}

/// How a run ended. `status` is `Idle` when it was cancelled.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: Status,
    pub attempts: u128,
    pub elapsed: Duration,
    pub target: Zeroizing<String>,
}

impl Outcome {
    fn of(engine: &EnumerationEngine) -> Self {
        Self {
            status: engine.status(),
            attempts: engine.attempts(),
            elapsed: engine.elapsed(),
            target: Zeroizing::new(engine.target().unwrap_or_default().to_owned()),
        }
    }

    pub fn cancelled(&self) -> bool {
        self.status == Status::Idle
    }
}

/// Receives throttled progress and the final outcome of a run.
pub trait Observer {
    fn on_progress(&mut self, progress: &Progress<'_>);

    fn on_finish(&mut self, _outcome: &Outcome) {}

    /// Polled before every batch.
    fn should_cancel(&mut self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DriveOptions {
    /// Upper bound on candidates tried between observer checks.
    pub batch: usize,
    pub interval: Duration,
    /// Attempts per second. `None` runs as fast as possible.
    pub pace: Option<u64>,
}

impl Default for DriveOptions {
    fn default() -> Self {
        Self {
            batch: DEFAULT_BATCH,
            interval: DEFAULT_INTERVAL,
            pace: None,
        }
    }
}

impl DriveOptions {
    fn batch_and_tick(&self) -> (usize, Option<Duration>) {
        let batch = self.batch.max(1);
        match self.pace.filter(|&rate| rate > 0) {
            None => (batch, None),
            Some(rate) => {
                let per_tick = (rate / PACE_TICKS_PER_SEC).clamp(1, batch as u64);
                let tick = Duration::from_secs_f64(per_tick as f64 / rate as f64);
                (per_tick as usize, Some(tick))
            }
        }
    }
}

/// Step `engine` until it reaches a terminal status or the observer cancels.
/// The engine must already be started; an idle engine returns immediately.
pub fn drive<O: Observer>(
    engine: &mut EnumerationEngine,
    observer: &mut O,
    options: DriveOptions,
) -> Outcome {
    let (batch, tick) = options.batch_and_tick();
    let mut throttle = Throttle::new(options.interval);
    let mut deadline = Instant::now();

    while engine.status() == Status::Running {
        if observer.should_cancel() {
            engine.cancel();
            break;
        }

        if engine.step_batch(batch).status.is_terminal() {
            break;
        }

        if throttle.ready(Instant::now()) {
            observer.on_progress(&Progress::of(engine));
        }

        if let Some(tick) = tick {
            deadline += tick;
            let now = Instant::now();
            if deadline > now {
                sleep(deadline - now);
            }
        }
    }

    observer.on_progress(&Progress::of(engine));
    let outcome = Outcome::of(engine);
    observer.on_finish(&outcome);
    outcome
}
