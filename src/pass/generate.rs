//! Password generation.

use zeroize::{Zeroize, Zeroizing};

use super::charset::Charset;
use crate::error::{self, Result};
use crate::rand::RandomSource;

/// Generate a single password, one uniform pick per position.
pub fn generate<R: RandomSource + ?Sized>(
    charset: &Charset,
    length: usize,
    rng: &mut R,
) -> Result<Zeroizing<String>> {
    error::validate(charset.len(), length)?;

    let mut pass = Zeroizing::new(String::with_capacity(length));
    fill(charset, length, rng, &mut pass);
    Ok(pass)
}

/// Generate `count` passwords, one per line.
pub fn generate_batch<R: RandomSource + ?Sized>(
    charset: &Charset,
    length: usize,
    count: usize,
    rng: &mut R,
) -> Result<Zeroizing<String>> {
    error::validate(charset.len(), length)?;
    error::validate_count(count)?;

    let capacity = length
        .checked_add(1)
        .and_then(|line| line.checked_mul(count))
        .unwrap_or(0);
    let mut out = Zeroizing::new(String::with_capacity(capacity));
    let mut buf = String::with_capacity(length);
    for _ in 0..count {
        buf.clear();
        fill(charset, length, rng, &mut buf);
        out.push_str(&buf);
        out.push('\n');
    }
    buf.zeroize();
    Ok(out)
}

#[inline]
fn fill<R: RandomSource + ?Sized>(charset: &Charset, length: usize, rng: &mut R, buf: &mut String) {
    let chars = charset.chars();
    buf.extend((0..length).map(|_| chars[rng.below(chars.len())]));
}
