//! Request/response DTOs, one per endpoint payload.
//!
//! The canonical wire casing for responses is camelCase; every field
//! also accepts its PascalCase spelling via serde aliases, because the
//! backend has historically emitted both. A field present in neither
//! casing is a decode error, never a silent zero. Mutation payloads
//! ([`rentdesk_session::PaymentLine`], [`rentdesk_session::AdjustmentRequest`])
//! serialize PascalCase, the shape the write endpoints consume.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rentdesk_core::{Amount, InvoiceId, PaymentId, TenantId};
use rentdesk_reconcile::InvoiceFacts;
use rentdesk_session::TenantSummary;

/// One rent invoice as returned by the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
    #[serde(alias = "InvoiceId", alias = "rentInvoiceId", alias = "RentInvoiceId")]
    pub invoice_id: InvoiceId,
    #[serde(alias = "TenantId")]
    pub tenant_id: TenantId,
    #[serde(alias = "InvoiceDate")]
    pub invoice_date: NaiveDate,
    #[serde(alias = "DueDate")]
    pub due_date: NaiveDate,
    /// Billed amount for the period. The backend has called this both
    /// `monthlyRent` and `totalRent` over time; all spellings decode
    /// into the one canonical field.
    #[serde(alias = "MonthlyRent", alias = "totalRent", alias = "TotalRent")]
    pub monthly_rent: Amount,
    #[serde(alias = "PaidAmount")]
    pub paid_amount: Amount,
    #[serde(alias = "RemainingAmount")]
    pub remaining_amount: Amount,
    #[serde(default, alias = "AppliedDiscount")]
    pub applied_discount: Amount,
    #[serde(default, alias = "LateFee")]
    pub late_fee: Amount,
    #[serde(default, alias = "PaymentId")]
    pub payment_id: Option<PaymentId>,
}

impl From<InvoiceDto> for InvoiceFacts {
    fn from(dto: InvoiceDto) -> Self {
        Self {
            invoice_id: dto.invoice_id,
            tenant_id: dto.tenant_id,
            invoice_date: dto.invoice_date,
            due_date: dto.due_date,
            monthly_rent: dto.monthly_rent,
            paid_amount: dto.paid_amount,
            remaining_amount: dto.remaining_amount,
            applied_discount: dto.applied_discount,
            late_fee: dto.late_fee,
            payment_id: dto.payment_id,
        }
    }
}

/// Tenant-level summary block of `GetUnpaidInvoiceByTenant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSummaryDto {
    #[serde(alias = "MonthlyRent")]
    pub monthly_rent: Amount,
    #[serde(alias = "Pending", alias = "pendingAmount", alias = "PendingAmount")]
    pub pending: Amount,
    #[serde(alias = "PreviousBalance")]
    pub previous_balance: Amount,
    #[serde(default, alias = "TotalLateFee")]
    pub total_late_fee: Amount,
}

impl From<TenantSummaryDto> for TenantSummary {
    fn from(dto: TenantSummaryDto) -> Self {
        Self {
            monthly_rent: dto.monthly_rent,
            pending_amount: dto.pending,
            previous_balance: dto.previous_balance,
            total_late_fee: dto.total_late_fee,
        }
    }
}

/// Response of `GetUnpaidInvoiceByTenant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpaidInvoicesResponse {
    #[serde(alias = "Invoices")]
    pub invoices: Vec<InvoiceDto>,
    #[serde(alias = "Summary")]
    pub summary: TenantSummaryDto,
}

/// One tenant, as listed by `GetTenants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDto {
    #[serde(alias = "TenantId")]
    pub tenant_id: TenantId,
    #[serde(alias = "TenantName", alias = "name", alias = "Name")]
    pub tenant_name: String,
    #[serde(default, alias = "PropertyName")]
    pub property_name: Option<String>,
}

/// One recorded payment row from `GetPaymentHistoryById`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistoryRow {
    #[serde(default, alias = "PaymentId")]
    pub payment_id: Option<PaymentId>,
    #[serde(alias = "PaymentDate", alias = "date", alias = "Date")]
    pub payment_date: NaiveDate,
    #[serde(alias = "TotalRent", alias = "rent", alias = "Rent")]
    pub total_rent: Amount,
    #[serde(alias = "PaidAmount", alias = "paid", alias = "Paid")]
    pub paid_amount: Amount,
    #[serde(default, alias = "DiscountAmount")]
    pub discount_amount: Amount,
    #[serde(default, alias = "DiscountPercent")]
    pub discount_percent: f64,
    #[serde(alias = "RemainingAmount")]
    pub remaining_amount: Amount,
    #[serde(default, alias = "IsLateFeeWaived")]
    pub is_late_fee_waived: bool,
    #[serde(default, alias = "PaymentMethod")]
    pub payment_method: Option<String>,
    #[serde(default, alias = "Notes")]
    pub notes: Option<String>,
    /// Cumulative paid total as of this row; the newest row's value caps
    /// any adjustment against the invoice.
    #[serde(alias = "TotalPaid")]
    pub total_paid: Amount,
}

/// Response of `CreatePaymentAdjustment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentOutcome {
    #[serde(alias = "IsSuccess")]
    pub is_success: bool,
    #[serde(default, alias = "Message")]
    pub message: Option<String>,
    #[serde(default, alias = "ErrorMessage")]
    pub error_message: Option<String>,
}
