//! Single dispatch point for per-invoice field edits.

use chrono::NaiveDate;

use rentdesk_core::{Amount, DomainError, DomainResult, InvoiceId, percent_of};

use crate::invoice::InvoiceEntry;

/// A typed edit to one entry's session-local fields.
///
/// The source of truth here is one enum rather than a stringly field
/// name, so every clamp and side effect lives in exactly one `match`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    DiscountPercent(f64),
    DiscountAmount(Amount),
    PayAmount(Amount),
    WaveLateFee(bool),
    PaymentDate(Option<NaiveDate>),
    PaymentMethod(Option<String>),
    Notes(String),
}

/// Apply one edit to the entry matched by `invoice_id`.
///
/// Clamping rules:
/// - discount percent → [0, 100], with `computed_discount` rederived;
/// - discount amount → [0, billed];
/// - pay amount → [0, billed] when the row already has a recorded
///   payment, otherwise [0, remaining].
///
/// A discount edit on a selected entry recomputes `pay_amount` from the
/// new remaining balance; manual pay edits are deliberately overridden
/// by later discount edits on selected rows.
pub fn update_invoice_field(
    entries: &mut [InvoiceEntry],
    invoice_id: InvoiceId,
    edit: FieldEdit,
) -> DomainResult<()> {
    let entry = entries
        .iter_mut()
        .find(|e| e.invoice_id() == invoice_id)
        .ok_or_else(DomainError::not_found)?;

    match edit {
        FieldEdit::DiscountPercent(pct) => {
            let pct = pct.clamp(0.0, 100.0);
            entry.discount_percent = pct;
            entry.computed_discount = percent_of(entry.billed(), pct);
            resync_pay_after_discount(entry);
        }
        FieldEdit::DiscountAmount(amount) => {
            entry.discount_amount = amount.clamp(0, entry.billed());
            resync_pay_after_discount(entry);
        }
        FieldEdit::PayAmount(amount) => {
            let cap = if entry.has_recorded_payment() {
                entry.billed()
            } else {
                entry.remaining()
            };
            entry.pay_amount = amount.clamp(0, cap);
        }
        FieldEdit::WaveLateFee(waived) => {
            entry.wave_late_fee = waived;
        }
        FieldEdit::PaymentDate(date) => {
            entry.payment_date = date;
        }
        FieldEdit::PaymentMethod(method) => {
            entry.payment_method = method;
        }
        FieldEdit::Notes(notes) => {
            entry.notes = notes;
        }
    }

    Ok(())
}

fn resync_pay_after_discount(entry: &mut InvoiceEntry) {
    if entry.selected {
        entry.pay_amount = entry.remaining();
    }
}
