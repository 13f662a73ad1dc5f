//! The backend contract as a trait, so workflows can run against an
//! in-memory fake in tests.

use async_trait::async_trait;

use rentdesk_core::{InvoiceId, PaymentId, TenantId};
use rentdesk_session::{AdjustmentRequest, PaymentLine};

use crate::dto::{
    AdjustmentOutcome, InvoiceDto, PaymentHistoryRow, TenantDto, UnpaidInvoicesResponse,
};
use crate::error::ClientResult;

/// Every backend operation the reconciliation core consumes.
#[async_trait]
pub trait RentApi: Send + Sync {
    /// `GET /Rent/GetUnpaidInvoiceByTenant?tenantId=`
    async fn unpaid_invoices(&self, tenant_id: TenantId) -> ClientResult<UnpaidInvoicesResponse>;

    /// `POST /Rent/SubmitPayments` — new batch payment.
    async fn submit_payments(&self, lines: &[PaymentLine]) -> ClientResult<()>;

    /// `PUT /Rent/UpdatePayments` — correct an existing batch payment.
    async fn update_payments(&self, lines: &[PaymentLine]) -> ClientResult<()>;

    /// `DELETE /Rent/DeletePayment?paymentId=`
    async fn delete_payment(&self, payment_id: PaymentId) -> ClientResult<()>;

    /// `GET /Rent/GetPaymentHistoryById?invoiceId=`
    async fn payment_history(&self, invoice_id: InvoiceId) -> ClientResult<Vec<PaymentHistoryRow>>;

    /// `POST /Rent/CreatePaymentAdjustment`
    async fn create_adjustment(
        &self,
        request: &AdjustmentRequest,
    ) -> ClientResult<AdjustmentOutcome>;

    /// `GET /Rent/GetTenants`
    async fn tenants(&self) -> ClientResult<Vec<TenantDto>>;

    /// `GET /Rent/GetRentCollection`
    async fn rent_collection(&self) -> ClientResult<Vec<InvoiceDto>>;
}
