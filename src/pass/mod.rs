//! Password generation, strength checks and the keyspace report.

pub mod charset;
pub mod check;
mod generate;
pub mod output;

pub use generate::{generate, generate_batch};
