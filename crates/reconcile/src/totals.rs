//! Batch-level totals over the selected entries.

use rentdesk_core::Amount;

use crate::invoice::InvoiceEntry;

/// Footer totals for the current selection. This is the single source of
/// truth for both display and submit-button enablement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Totals {
    pub selected_count: usize,
    /// Sum of pay amounts across selected entries.
    pub pay_total: Amount,
    /// Sum of flat + percent-derived discounts. Informational: discounts
    /// shrink pay amounts upstream, so they are not subtracted again in
    /// the grand total.
    pub discount_total: Amount,
    /// Sum of late fees after waivers.
    pub late_fee_total: Amount,
    pub grand_total: Amount,
}

impl Totals {
    pub fn any_selected(&self) -> bool {
        self.selected_count > 0
    }

    /// Submit is allowed only when something is selected and there is a
    /// positive amount to pay.
    pub fn submit_enabled(&self) -> bool {
        self.any_selected() && self.pay_total > 0
    }
}

/// Recompute totals from the current entry set. Pure and idempotent: the
/// entries are not mutated and identical input always yields identical
/// output.
pub fn compute_totals(entries: &[InvoiceEntry], global_wave_late_fee: bool) -> Totals {
    let mut totals = Totals::default();

    for entry in entries.iter().filter(|e| e.selected) {
        let late_fee = if global_wave_late_fee || entry.wave_late_fee {
            0
        } else {
            entry.facts.late_fee
        };

        totals.selected_count += 1;
        totals.pay_total += entry.pay_amount;
        totals.discount_total += entry.session_discount();
        totals.late_fee_total += late_fee;
    }

    totals.grand_total = totals.pay_total + totals.late_fee_total;
    totals
}
