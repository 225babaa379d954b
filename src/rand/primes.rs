/// Largest primes below 2^64 (2^64 - k for k = 59, 83, 95, 179, 189, 257,
/// 279, 323, 353, 363). Used as state multipliers.
pub const PRIMES: [u64; 10] = [
    u64::MAX - 58,
    u64::MAX - 82,
    u64::MAX - 94,
    u64::MAX - 178,
    u64::MAX - 188,
    u64::MAX - 256,
    u64::MAX - 278,
    u64::MAX - 322,
    u64::MAX - 352,
    u64::MAX - 362,
];
