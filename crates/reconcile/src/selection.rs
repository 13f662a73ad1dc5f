//! Selection toggling for the batch payment grid.

use rentdesk_core::InvoiceId;

use crate::invoice::InvoiceEntry;

/// Whether the session is recording new payments or correcting already
/// recorded ones. The mode changes both selection rules and pay-amount
/// clamping.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PaymentMode {
    /// New payments: only invoices with an outstanding balance are
    /// selectable, and selecting one defaults its pay amount to that
    /// balance.
    Add,
    /// Correcting recorded payments: everything is selectable and pay
    /// amounts are preserved across toggles.
    Edit,
}

/// Select or deselect every entry.
///
/// In [`PaymentMode::Edit`] the flag is applied to all entries and pay
/// amounts are left alone. In [`PaymentMode::Add`] fully-paid entries are
/// skipped entirely; selecting sets `pay_amount` to the remaining
/// balance, deselecting zeroes it.
pub fn toggle_select_all(entries: &mut [InvoiceEntry], checked: bool, mode: PaymentMode) {
    for entry in entries.iter_mut() {
        toggle_entry(entry, checked, mode);
    }
}

/// The select-all rule applied to a single entry matched by id.
///
/// In add mode a fully-paid invoice silently ignores the toggle; an
/// unknown id is likewise a no-op (the grid only offers ids it holds).
pub fn toggle_invoice_select(
    entries: &mut [InvoiceEntry],
    invoice_id: InvoiceId,
    checked: bool,
    mode: PaymentMode,
) {
    if let Some(entry) = entries.iter_mut().find(|e| e.invoice_id() == invoice_id) {
        toggle_entry(entry, checked, mode);
    }
}

fn toggle_entry(entry: &mut InvoiceEntry, checked: bool, mode: PaymentMode) {
    match mode {
        PaymentMode::Edit => {
            entry.selected = checked;
        }
        PaymentMode::Add => {
            if entry.is_fully_paid() {
                return;
            }
            entry.selected = checked;
            entry.pay_amount = if checked { entry.remaining() } else { 0 };
        }
    }
}
