//! Reqwest-backed [`RentApi`] implementation.
//!
//! Requests carry the cookie-based session. A 401 triggers a
//! single-flight token refresh: the first failing call performs the
//! refresh while concurrent failures queue on the gate and replay once
//! the epoch has moved. A failed refresh surfaces
//! [`ClientError::AuthExpired`], which the caller turns into a
//! navigation to login.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::sync::Mutex;

use rentdesk_core::{InvoiceId, PaymentId, TenantId};
use rentdesk_session::{AdjustmentRequest, PaymentLine};

use crate::api::RentApi;
use crate::config::ClientConfig;
use crate::dto::{
    AdjustmentOutcome, InvoiceDto, PaymentHistoryRow, TenantDto, UnpaidInvoicesResponse,
};
use crate::error::{ClientError, ClientResult};

pub struct RentClient {
    http: reqwest::Client,
    base_url: String,
    /// Bumped once per completed refresh; callers that started before
    /// the bump retry without refreshing again.
    refresh_epoch: Mutex<u64>,
}

impl RentClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            refresh_epoch: Mutex::new(0),
        })
    }

    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request; on 401, refresh the session once and replay it.
    async fn execute<B>(&self, build: B) -> ClientResult<Response>
    where
        B: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let epoch_at_start = *self.refresh_epoch.lock().await;

        let response = build(&self.http).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return ok_or_status(response);
        }

        tracing::debug!("got 401, attempting session refresh");
        self.refresh_session(epoch_at_start).await?;

        let retried = build(&self.http).send().await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::AuthExpired);
        }
        ok_or_status(retried)
    }

    async fn refresh_session(&self, epoch_at_start: u64) -> ClientResult<()> {
        let mut epoch = self.refresh_epoch.lock().await;
        if *epoch > epoch_at_start {
            // Another call already refreshed while we waited; just replay.
            return Ok(());
        }

        let response = self
            .http
            .post(self.url("/Auth/Refresh"))
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "session refresh failed");
                ClientError::AuthExpired
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "session refresh rejected");
            return Err(ClientError::AuthExpired);
        }

        *epoch += 1;
        Ok(())
    }
}

fn ok_or_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status { status })
    }
}

#[async_trait]
impl RentApi for RentClient {
    async fn unpaid_invoices(&self, tenant_id: TenantId) -> ClientResult<UnpaidInvoicesResponse> {
        let url = self.url("/Rent/GetUnpaidInvoiceByTenant");
        let response = self
            .execute(|http| http.get(&url).query(&[("tenantId", tenant_id.to_string())]))
            .await?;
        Ok(response.json().await?)
    }

    async fn submit_payments(&self, lines: &[PaymentLine]) -> ClientResult<()> {
        let url = self.url("/Rent/SubmitPayments");
        self.execute(|http| http.post(&url).json(lines)).await?;
        Ok(())
    }

    async fn update_payments(&self, lines: &[PaymentLine]) -> ClientResult<()> {
        let url = self.url("/Rent/UpdatePayments");
        self.execute(|http| http.put(&url).json(lines)).await?;
        Ok(())
    }

    async fn delete_payment(&self, payment_id: PaymentId) -> ClientResult<()> {
        let url = self.url("/Rent/DeletePayment");
        self.execute(|http| http.delete(&url).query(&[("paymentId", payment_id.to_string())]))
            .await?;
        Ok(())
    }

    async fn payment_history(&self, invoice_id: InvoiceId) -> ClientResult<Vec<PaymentHistoryRow>> {
        let url = self.url("/Rent/GetPaymentHistoryById");
        let response = self
            .execute(|http| http.get(&url).query(&[("invoiceId", invoice_id.to_string())]))
            .await?;
        Ok(response.json().await?)
    }

    async fn create_adjustment(
        &self,
        request: &AdjustmentRequest,
    ) -> ClientResult<AdjustmentOutcome> {
        let url = self.url("/Rent/CreatePaymentAdjustment");
        let response = self.execute(|http| http.post(&url).json(request)).await?;
        Ok(response.json().await?)
    }

    async fn tenants(&self) -> ClientResult<Vec<TenantDto>> {
        let url = self.url("/Rent/GetTenants");
        let response = self.execute(|http| http.get(&url)).await?;
        Ok(response.json().await?)
    }

    async fn rent_collection(&self) -> ClientResult<Vec<InvoiceDto>> {
        let url = self.url("/Rent/GetRentCollection");
        let response = self.execute(|http| http.get(&url)).await?;
        Ok(response.json().await?)
    }
}
