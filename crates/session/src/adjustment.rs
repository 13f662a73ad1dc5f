//! Adjustment/reversal drafts: a negative correction against one
//! invoice's recorded payments, bounded by what was actually paid.
//!
//! This flow is independent of the batch selection state; it never
//! touches other invoices.

use serde::{Deserialize, Serialize};

use rentdesk_core::{Amount, DomainError, DomainResult, InvoiceId, TenantId};

/// Sentinel payment method the backend uses to tag reversal rows.
pub const ADJUSTMENT_METHOD: &str = "Adjustment";

/// Cap for a new adjustment: the invoice's latest known total-paid
/// figure, taken from the most recent history row when available and
/// falling back to the invoice's own paid amount.
pub fn max_adjustment(latest_total_paid: Option<Amount>, invoice_paid: Amount) -> Amount {
    latest_total_paid.unwrap_or(invoice_paid).max(0)
}

/// Wire request for `CreatePaymentAdjustment`. `payment_amount` is
/// negative: the user enters a positive reduction and it is negated on
/// the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdjustmentRequest {
    pub rent_invoice_id: InvoiceId,
    pub payment_amount: Amount,
    pub tenant_id: TenantId,
    pub payment_method: String,
    pub notes: String,
}

/// User-editable adjustment form for one invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentDraft {
    invoice_id: InvoiceId,
    tenant_id: TenantId,
    max_adjustment: Amount,
    amount: Amount,
    reason: String,
}

impl AdjustmentDraft {
    pub fn new(invoice_id: InvoiceId, tenant_id: TenantId, max_adjustment: Amount) -> Self {
        Self {
            invoice_id,
            tenant_id,
            max_adjustment: max_adjustment.max(0),
            amount: 0,
            reason: String::new(),
        }
    }

    pub fn invoice_id(&self) -> InvoiceId {
        self.invoice_id
    }

    pub fn max_adjustment(&self) -> Amount {
        self.max_adjustment
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Set the reduction amount, clamped into `[0, max_adjustment]` the
    /// same way the form input clamps it.
    pub fn set_amount(&mut self, amount: Amount) {
        self.amount = amount.clamp(0, self.max_adjustment);
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
    }

    /// Validate and build the wire request. Rejects a non-positive
    /// amount or a blank reason before anything reaches the network;
    /// the over-cap case is re-checked even though `set_amount` clamps.
    pub fn validate(&self) -> DomainResult<AdjustmentRequest> {
        if self.amount <= 0 {
            return Err(DomainError::validation("adjustment amount must be positive"));
        }
        if self.amount > self.max_adjustment {
            return Err(DomainError::validation(
                "adjustment exceeds the amount previously paid",
            ));
        }
        if self.reason.trim().is_empty() {
            return Err(DomainError::validation("adjustment reason is required"));
        }

        Ok(AdjustmentRequest {
            rent_invoice_id: self.invoice_id,
            payment_amount: -self.amount,
            tenant_id: self.tenant_id,
            payment_method: ADJUSTMENT_METHOD.to_owned(),
            notes: self.reason.clone(),
        })
    }
}
