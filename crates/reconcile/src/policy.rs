//! Discount policy: flat-amount allocation and percent application.
//!
//! Both functions operate on the current entry set in place and touch
//! only selected entries.

use rentdesk_core::{Amount, percent_of};

use crate::invoice::InvoiceEntry;

/// Spread a flat discount across the selected entries, oldest due date
/// first. Each entry with a positive remaining balance absorbs
/// `min(pool, remaining)`; the walk stops once the pool is exhausted.
/// Entries the walk never reaches keep whatever discount they had.
///
/// Returns the total actually allocated, which never exceeds `amount`.
pub fn apply_flat_discount(entries: &mut [InvoiceEntry], amount: Amount) -> Amount {
    let mut pool = amount.max(0);
    let mut allocated = 0;

    let mut order: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.selected)
        .map(|(i, _)| i)
        .collect();
    order.sort_by_key(|&i| entries[i].facts.due_date);

    for i in order {
        if pool <= 0 {
            break;
        }
        let entry = &mut entries[i];
        let room = entry.remaining();
        if room <= 0 {
            continue;
        }
        let share = pool.min(room);
        entry.discount_amount = share;
        pool -= share;
        allocated += share;
    }

    allocated
}

/// Apply a percent discount to every selected entry: record the percent,
/// derive `computed_discount` from the billed amount, and recompute the
/// pay amount from the now-smaller remaining balance. Percent 0 clears
/// both discount fields. Unselected entries are untouched.
pub fn apply_percent_discount(entries: &mut [InvoiceEntry], percent: f64) {
    let percent = percent.clamp(0.0, 100.0);

    for entry in entries.iter_mut().filter(|e| e.selected) {
        if percent == 0.0 {
            entry.discount_percent = 0.0;
            entry.computed_discount = 0;
        } else {
            entry.discount_percent = percent;
            entry.computed_discount = percent_of(entry.billed(), percent);
        }
        entry.pay_amount = entry.remaining();
    }
}
