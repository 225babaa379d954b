//! Random sources for password and target generation.
//!
//! Not a CSPRNG: fine for a simulator picking its own targets, not for keys.

mod hw;
mod primes;
pub mod urand;

use std::fmt;
use std::str::FromStr;

use tracing::warn;
use zeroize::Zeroize;

use primes::PRIMES;
pub use urand::UrandomRng;

pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform-ish index in `0..n`. `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

// =============================================================================
// Source selection
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntropySource {
    #[default]
    Hardware,
    Urandom,
}

impl EntropySource {
    pub fn describe(self) -> &'static str {
        match self {
            EntropySource::Hardware => hw::source_name(),
            EntropySource::Urandom => urand::PATH,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            EntropySource::Hardware => EntropySource::Urandom,
            EntropySource::Urandom => EntropySource::Hardware,
        }
    }
}

impl fmt::Display for EntropySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntropySource::Hardware => "hardware",
            EntropySource::Urandom => "urandom",
        })
    }
}

impl FromStr for EntropySource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hardware" => Ok(EntropySource::Hardware),
            "urandom" => Ok(EntropySource::Urandom),
            _ => Err(()),
        }
    }
}

/// Open the requested source, falling back to hardware entropy when
/// `/dev/urandom` cannot be opened.
pub fn open(source: EntropySource) -> Box<dyn RandomSource> {
    match source {
        EntropySource::Hardware => Box::new(HardwareRng::new()),
        EntropySource::Urandom => match UrandomRng::open() {
            Ok(rng) => Box::new(rng),
            Err(e) => {
                warn!(error = %e, "cannot open {}, using hardware entropy", urand::PATH);
                Box::new(HardwareRng::new())
            }
        },
    }
}

// =============================================================================
// Hardware RNG
// =============================================================================

/// Cycle-counter entropy folded into a prime-multiplied state, finished with
/// SplitMix64.
pub struct HardwareRng {
    state: u64,
}

impl HardwareRng {
    pub fn new() -> Self {
        Self {
            state: hw::entropy(),
        }
    }
}

impl Default for HardwareRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for HardwareRng {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        let ent = hw::entropy();

        // Mix entropy into prime selection
        let mixed = self.state ^ ent;
        let idx = ((mixed ^ (mixed >> 32)) % PRIMES.len() as u64) as usize;

        self.state = self.state.rotate_left(17).wrapping_mul(PRIMES[idx]) ^ ent;

        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }
}

impl Drop for HardwareRng {
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

/// Replays a fixed list of values, cycling. For deterministic tests.
#[cfg(test)]
pub struct Sequence {
    values: Vec<u64>,
    pos: usize,
}

#[cfg(test)]
impl Sequence {
    pub fn new(values: &[u64]) -> Self {
        Self {
            values: values.to_vec(),
            pos: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for Sequence {
    fn next_u64(&mut self) -> u64 {
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }
}
