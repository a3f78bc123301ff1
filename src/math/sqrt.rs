//! Integer square root.

/// Returns `floor(sqrt(value))` for any `u128`.
///
/// Newton iteration from an upper-bound seed; the sequence decreases
/// monotonically until it reaches the floor root.  The result always fits
/// in `u64`.
///
/// # Examples
///
/// ```
/// use cpswap_engine::math::isqrt;
///
/// assert_eq!(isqrt(0), 0);
/// assert_eq!(isqrt(99), 9);
/// assert_eq!(isqrt(100), 10);
/// assert_eq!(isqrt(10_000_000_000u128 * 10_000_000_000), 10_000_000_000);
/// ```
#[must_use]
pub const fn isqrt(value: u128) -> u128 {
    if value < 2 {
        return value;
    }
    // 2^ceil(bits/2) >= sqrt(value)
    let bits = 128 - value.leading_zeros();
    let mut x: u128 = 1 << bits.div_ceil(2);
    loop {
        let y = (x + value / x) / 2;
        if y >= x {
            return x;
        }
        x = y;
    }
}
