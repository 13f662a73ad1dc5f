//! Money representation and rounding.
//!
//! The backend deals in whole currency units, so amounts are plain `i64`
//! values rather than a decimal type. Signed because payment adjustments
//! travel the wire as negative amounts.

/// Monetary amount in whole currency units.
pub type Amount = i64;

/// Percentage of an amount, rounded half-up to the nearest whole unit.
///
/// This is the single rounding rule for the whole workspace; every
/// percent-derived discount must go through here so recomputed totals
/// stay reproducible.
pub fn percent_of(amount: Amount, percent: f64) -> Amount {
    // f64::round is half-away-from-zero, which equals half-up for the
    // non-negative inputs this is called with.
    ((amount as f64) * percent / 100.0).round() as Amount
}
