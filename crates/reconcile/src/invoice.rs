use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rentdesk_core::{Amount, InvoiceId, PaymentId, TenantId};

/// Server-side truth about one rent invoice, immutable for the session.
///
/// `remaining_amount` is the backend's own outstanding-balance figure
/// (billed minus paid minus previously persisted discounts). The engine
/// recomputes its working balance from `monthly_rent`/`paid_amount` and
/// the session's pending discounts via [`InvoiceEntry::remaining`]; the
/// server figure is kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFacts {
    pub invoice_id: InvoiceId,
    pub tenant_id: TenantId,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Billed amount for the period.
    pub monthly_rent: Amount,
    /// Cumulative amount already paid before this session.
    pub paid_amount: Amount,
    /// Server-computed outstanding balance.
    pub remaining_amount: Amount,
    /// Discount already persisted from prior transactions.
    pub applied_discount: Amount,
    /// Late penalty, zero when not applicable.
    pub late_fee: Amount,
    /// Present when the row already carries a recorded payment; its
    /// presence switches pay-amount clamping from remaining-balance to
    /// full-billed (correcting an existing payment).
    pub payment_id: Option<PaymentId>,
}

/// One invoice row as edited during a batch session: server facts plus
/// the session-local fields that are only persisted on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceEntry {
    pub facts: InvoiceFacts,
    pub selected: bool,
    pub wave_late_fee: bool,
    /// Flat discount entered or allocated this session, ≥ 0.
    pub discount_amount: Amount,
    /// Percent discount entered this session, within [0, 100].
    pub discount_percent: f64,
    /// Derived from `discount_percent` against the billed amount.
    pub computed_discount: Amount,
    pub pay_amount: Amount,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub notes: String,
}

impl InvoiceEntry {
    /// Build a fresh entry with every session field at its default:
    /// unselected, no waiver, discounts zeroed, nothing to pay, inputs
    /// empty.
    pub fn from_facts(facts: InvoiceFacts) -> Self {
        Self {
            facts,
            selected: false,
            wave_late_fee: false,
            discount_amount: 0,
            discount_percent: 0.0,
            computed_discount: 0,
            pay_amount: 0,
            payment_date: None,
            payment_method: None,
            notes: String::new(),
        }
    }

    pub fn invoice_id(&self) -> InvoiceId {
        self.facts.invoice_id
    }

    /// Billed amount for the period. One canonical accessor; the engine
    /// never reads the billed figure under any other name.
    pub fn billed(&self) -> Amount {
        self.facts.monthly_rent
    }

    /// Session discounts pending against this entry (flat + percent-derived).
    pub fn session_discount(&self) -> Amount {
        self.discount_amount + self.computed_discount
    }

    /// Working outstanding balance: billed minus paid minus the session's
    /// pending discounts, floored at zero.
    pub fn remaining(&self) -> Amount {
        (self.billed() - self.facts.paid_amount - self.session_discount()).max(0)
    }

    /// Whether the row already has a persisted payment (edit mode for
    /// that row).
    pub fn has_recorded_payment(&self) -> bool {
        self.facts.payment_id.is_some()
    }

    pub fn is_fully_paid(&self) -> bool {
        self.remaining() <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(billed: Amount, paid: Amount, discount: Amount) -> InvoiceFacts {
        InvoiceFacts {
            invoice_id: InvoiceId::new(),
            tenant_id: TenantId::new(),
            invoice_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            monthly_rent: billed,
            paid_amount: paid,
            remaining_amount: billed - paid - discount,
            applied_discount: discount,
            late_fee: 0,
            payment_id: None,
        }
    }

    #[test]
    fn fresh_entry_has_session_defaults() {
        let entry = InvoiceEntry::from_facts(facts(25000, 0, 0));
        assert!(!entry.selected);
        assert!(!entry.wave_late_fee);
        assert_eq!(entry.discount_amount, 0);
        assert_eq!(entry.computed_discount, 0);
        assert_eq!(entry.pay_amount, 0);
        assert_eq!(entry.payment_method, None);
        assert_eq!(entry.notes, "");
    }

    #[test]
    fn remaining_subtracts_paid_and_session_discounts() {
        let mut entry = InvoiceEntry::from_facts(facts(25000, 10000, 0));
        assert_eq!(entry.remaining(), 15000);

        entry.discount_amount = 3000;
        entry.computed_discount = 2000;
        assert_eq!(entry.remaining(), 10000);
    }

    #[test]
    fn remaining_never_goes_negative() {
        let mut entry = InvoiceEntry::from_facts(facts(1000, 900, 0));
        entry.discount_amount = 500;
        assert_eq!(entry.remaining(), 0);
    }

    #[test]
    fn recorded_payment_flag_follows_payment_id() {
        let mut f = facts(1000, 1000, 0);
        assert!(!InvoiceEntry::from_facts(f.clone()).has_recorded_payment());
        f.payment_id = Some(PaymentId::new());
        assert!(InvoiceEntry::from_facts(f).has_recorded_payment());
    }
}
