//! Brute-force simulation against a self-generated target.
//!
//! The engine is driven by [`progress::drive`]; this module supplies the
//! terminal observer (live progress bar, Esc to cancel) and the reports
//! printed before and after a run.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use tracing::info;
use zeroize::Zeroizing;

use crate::engine::{EnumerationEngine, Status, candidate_at, index_of};
use crate::error::Result;
use crate::keyspace::{KeyspaceMetrics, estimate_crack_time, worst_case_time};
use crate::pass::charset::Charset;
use crate::pass::generate;
use crate::pass::output::format_rate;
use crate::progress::{self, DriveOptions, Observer, Outcome, Progress};
use crate::rand::RandomSource;
use crate::terminal::{
    PROGRESS_BAR_LINES, RawModeGuard, box_bottom, box_field, box_line, box_top, cursor_up,
    flush, format_number, hide_cursor, print_centered, progress_bar_box, show_cursor,
};

pub struct SimConfig {
    pub charset: Charset,
    pub length: usize,
    /// Fixed target; a random one is drawn when `None`.
    pub target: Option<Zeroizing<String>>,
    /// Attack rate assumed by the statistics box.
    pub sim_rate: f64,
    pub drive: DriveOptions,
    pub quiet: bool,
}

/// Longest candidate shown in the search-order line.
const ORDER_PREVIEW_MAX: usize = 16;

/// First and last candidate, or just the first when the keyspace is too big
/// to index exactly.
fn search_order(charset: &Charset, metrics: &KeyspaceMetrics) -> String {
    let first = candidate_at(charset, metrics.length, 0);
    match metrics.combinations.exact() {
        Some(total) => {
            let last = candidate_at(charset, metrics.length, u128::from(total.saturating_sub(1)));
            format!("{first} .. {last}")
        }
        None => format!("{first} .."),
    }
}

/// Average and worst-case search time at the simulated rate.
pub fn print_statistics(
    charset: &Charset,
    metrics: &KeyspaceMetrics,
    sim_rate: f64,
) -> Result<()> {
    let average = estimate_crack_time(metrics.combinations, sim_rate)?;
    let worst = worst_case_time(metrics.combinations, sim_rate)?;

    box_top("Simulation");
    box_field("Charset size:", &metrics.charset_size.to_string());
    box_field("Length:", &metrics.length.to_string());
    box_field("Combinations:", &metrics.combinations.to_string());
    if metrics.length <= ORDER_PREVIEW_MAX {
        box_field("Search order:", &search_order(charset, metrics));
    }
    box_field("Simulated rate:", &format!("{} attempts/s", format_rate(sim_rate)));
    box_field("Average time:", &average.to_string());
    box_field("Worst case:", &worst.to_string());
    box_bottom();
    Ok(())
}

/// Run one simulation to completion or cancellation.
pub fn run<R: RandomSource + ?Sized>(config: SimConfig, rng: &mut R) -> Result<Outcome> {
    let metrics = KeyspaceMetrics::compute(&config.charset, config.length)?;
    let target = match config.target {
        Some(target) => target,
        None => generate(&config.charset, config.length, rng)?,
    };

    if !config.quiet {
        print_statistics(&config.charset, &metrics, config.sim_rate)?;
        if let Some(index) = index_of(&config.charset, &target)
            .filter(|_| target.chars().count() == config.length)
        {
            print_centered(&format!(
                "Target sits at position {} of the search order",
                format_number(index + 1)
            ));
        } else {
            print_centered("Target is outside the keyspace; the search will exhaust it");
        }
        println!();
    }

    let mut engine = EnumerationEngine::new();
    engine.start(config.charset, config.length, &target)?;

    let outcome = if config.quiet {
        progress::drive(&mut engine, &mut Silent, config.drive)
    } else {
        let mut view = LiveView::new();
        progress::drive(&mut engine, &mut view, config.drive)
    };

    info!(
        status = ?outcome.status,
        attempts = outcome.attempts as u64,
        elapsed_ms = outcome.elapsed.as_millis() as u64,
        "simulation finished"
    );

    if config.quiet {
        println!("{}", summary(&outcome));
    } else {
        print_outcome(&outcome);
    }
    Ok(outcome)
}

/// One-line result, used in quiet mode.
pub fn summary(outcome: &Outcome) -> String {
    let attempts = format_number(outcome.attempts);
    let secs = outcome.elapsed.as_secs_f64();
    if outcome.cancelled() {
        return format!("cancelled after {attempts} attempts");
    }
    match outcome.status {
        Status::Found => format!("found after {attempts} attempts in {secs:.2}s"),
        _ => format!("exhausted after {attempts} attempts in {secs:.2}s"),
    }
}

fn print_outcome(outcome: &Outcome) {
    let attempts = format_number(outcome.attempts);
    let time = format!("{:.2}s", outcome.elapsed.as_secs_f64());

    match outcome.status {
        Status::Found => {
            box_top("Found");
            box_field("Password:", &outcome.target);
            box_field("Attempts:", &attempts);
            box_field("Time:", &time);
        }
        Status::Exhausted => {
            box_top("Exhausted");
            box_line("Every candidate was tried without a match.");
            box_field("Attempts:", &attempts);
            box_field("Time:", &time);
        }
        Status::Idle | Status::Running => {
            box_top("Cancelled");
            box_line(&format!("Stopped by user after {attempts} attempts ({time})"));
        }
    }
    box_bottom();
    println!();
}

// =============================================================================
// Observers
// =============================================================================

struct Silent;

impl Observer for Silent {
    fn on_progress(&mut self, _progress: &Progress<'_>) {}
}

/// Redraws a progress bar in place and listens for Esc / Ctrl+C / q.
struct LiveView {
    drawn: bool,
    keys: Option<KeyListener>,
    _raw: Option<RawModeGuard>,
}

impl LiveView {
    fn new() -> Self {
        let interactive = unsafe { libc::isatty(0) == 1 };
        let raw = interactive.then(|| RawModeGuard::new().ok()).flatten();
        let keys = raw.as_ref().map(|_| KeyListener::spawn());
        hide_cursor();
        if keys.is_some() {
            print_centered("[Esc/Ctrl+C] to cancel");
        }
        Self {
            drawn: false,
            keys,
            _raw: raw,
        }
    }
}

impl Observer for LiveView {
    fn on_progress(&mut self, progress: &Progress<'_>) {
        if self.drawn {
            cursor_up(PROGRESS_BAR_LINES + 1);
        }
        self.drawn = true;

        let percent = progress.percent().unwrap_or(0.0);
        let stats = format!(
            "{} tried • {:.1}% • {:.1}s",
            format_number(progress.attempts),
            percent,
            progress.elapsed.as_secs_f64()
        );
        progress_bar_box(percent as f32, &stats);
        print!(
            "\r\x1b[2K  Trying: {}   ({} attempts/s)\r\n",
            progress.candidate,
            format_rate(progress.attempts_per_sec().round())
        );
        flush();
    }

    fn on_finish(&mut self, _outcome: &Outcome) {
        if let Some(keys) = self.keys.take() {
            keys.stop();
        }
        self._raw = None;
        show_cursor();
        println!();
    }

    fn should_cancel(&mut self) -> bool {
        self.keys.as_ref().is_some_and(KeyListener::cancel_requested)
    }
}

struct KeyListener {
    cancel_rx: Receiver<()>,
    close_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl KeyListener {
    fn spawn() -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel();
        let (close_tx, close_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let timeout = Duration::from_millis(20);
            while let Err(TryRecvError::Empty) = close_rx.try_recv() {
                if !event::poll(timeout).unwrap_or(false) {
                    continue;
                }
                if let Ok(Event::Key(key)) = event::read() {
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl_c || matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                        let _ = cancel_tx.send(());
                        break;
                    }
                }
            }
        });

        Self {
            cancel_rx,
            close_tx,
            handle,
        }
    }

    fn cancel_requested(&self) -> bool {
        self.cancel_rx.try_recv().is_ok()
    }

    fn stop(self) {
        let _ = self.close_tx.send(());
        let _ = self.handle.join();
    }
}
