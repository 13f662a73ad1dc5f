use rentdesk_client::{
    ClientError, ClientResult, InvoiceDto, PaymentHistoryRow, RentApi, UnpaidInvoicesResponse,
};
use rentdesk_core::{Amount, DomainError, InvoiceId, PaymentId, TenantId};
use rentdesk_reconcile::{InvoiceFacts, PaymentMode};
use rentdesk_session::{
    AdjustmentDraft, BatchSession, SessionOrigin, TenantSummary, max_adjustment,
};

/// Outcome of applying a tenant load: either the response populated the
/// session, or it resolved after a newer selection and was dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TenantSelection {
    Applied,
    Stale,
}

/// Handle for one in-flight tenant load. A response may only be applied
/// with the ticket of the newest load; older tickets are refused, so a
/// slow response can never overwrite a later selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    tenant_id: TenantId,
}

/// Drives the payment submission and adjustment flows against a backend.
///
/// Holds the batch session, the dashboard's rent list, and the
/// generation counter for tenant loads. All network traffic goes through
/// the injected [`RentApi`].
pub struct PaymentWorkflow<A> {
    api: A,
    session: BatchSession,
    generation: u64,
    rent_list: Vec<InvoiceDto>,
}

impl<A: RentApi> PaymentWorkflow<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            session: BatchSession::new(),
            generation: 0,
            rent_list: Vec::new(),
        }
    }

    pub fn session(&self) -> &BatchSession {
        &self.session
    }

    /// Mutable session access for edit-in-place (selection toggles,
    /// field edits, global overrides). The session enforces its own
    /// phase guards.
    pub fn session_mut(&mut self) -> &mut BatchSession {
        &mut self.session
    }

    /// Last successfully loaded rent list. Kept stale when a background
    /// reload fails.
    pub fn rent_list(&self) -> &[InvoiceDto] {
        &self.rent_list
    }

    /// Choose a tenant for the batch flow. `None` cancels and resets the
    /// session; `Some` fetches the tenant's unpaid invoices and applies
    /// them unless a newer selection has been made in the meantime.
    pub async fn select_tenant(
        &mut self,
        tenant: Option<TenantId>,
    ) -> ClientResult<TenantSelection> {
        let Some(tenant_id) = tenant else {
            self.session.reset();
            return Ok(TenantSelection::Applied);
        };

        let ticket = self.begin_tenant_load(tenant_id);
        let response = self.api.unpaid_invoices(tenant_id).await?;
        Ok(self.apply_tenant_load(ticket, response))
    }

    /// Start a tenant load, superseding any load still in flight.
    pub fn begin_tenant_load(&mut self, tenant_id: TenantId) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
            tenant_id,
        }
    }

    /// Apply a resolved tenant load. A response carrying anything but
    /// the newest ticket is discarded.
    pub fn apply_tenant_load(
        &mut self,
        ticket: LoadTicket,
        response: UnpaidInvoicesResponse,
    ) -> TenantSelection {
        if ticket.generation != self.generation {
            tracing::debug!(
                tenant = %ticket.tenant_id,
                "dropping stale invoice load superseded by a newer selection"
            );
            return TenantSelection::Stale;
        }

        let summary: TenantSummary = response.summary.into();
        let invoices: Vec<InvoiceFacts> =
            response.invoices.into_iter().map(Into::into).collect();
        self.session.load_tenant(ticket.tenant_id, invoices, summary);
        TenantSelection::Applied
    }

    /// Open a single-invoice edit session from one already-recorded row.
    pub fn open_row(&mut self, invoice: InvoiceFacts) {
        self.session.open_row(invoice, TenantSummary::default());
    }

    /// Submit the batch: create for add mode, update for edit mode.
    /// Client-side guards reject an empty or zero-amount selection
    /// before anything reaches the network. On failure the session drops
    /// back to editing with state intact for retry.
    pub async fn submit(&mut self) -> ClientResult<()> {
        let lines = self.session.begin_submit()?;
        let mode = self.session.mode();

        let result = match mode {
            PaymentMode::Add => self.api.submit_payments(&lines).await,
            PaymentMode::Edit => self.api.update_payments(&lines).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(lines = lines.len(), "batch payment recorded");
                self.session.submit_succeeded();
                self.reload_rent_list().await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "batch payment submit failed");
                self.session.submit_failed();
                Err(err)
            }
        }
    }

    /// Close the modal: discard whatever was in progress and refresh the
    /// list. The silent discard is intentional.
    pub async fn close(&mut self) {
        self.session.reset();
        self.reload_rent_list().await;
    }

    pub async fn payment_history(
        &self,
        invoice_id: InvoiceId,
    ) -> ClientResult<Vec<PaymentHistoryRow>> {
        self.api.payment_history(invoice_id).await
    }

    /// Open an adjustment form for one invoice. The cap is refreshed
    /// from the most recent history row, falling back to the invoice's
    /// recorded paid amount.
    pub async fn begin_adjustment(
        &mut self,
        invoice_id: InvoiceId,
    ) -> ClientResult<AdjustmentDraft> {
        let (tenant_id, recorded_paid) = self.known_invoice(invoice_id)?;
        let history = self.api.payment_history(invoice_id).await?;
        // The backend does not guarantee a wire ordering for history
        // rows; pick the newest by payment date.
        let latest_total_paid = history
            .iter()
            .max_by_key(|row| row.payment_date)
            .map(|row| row.total_paid);
        let cap = max_adjustment(latest_total_paid, recorded_paid);
        Ok(AdjustmentDraft::new(invoice_id, tenant_id, cap))
    }

    /// Validate and send an adjustment, then refresh the history view
    /// and the session's invoice list. Failures surface an error and
    /// leave the session untouched; this path never mutates unrelated
    /// invoices.
    pub async fn submit_adjustment(
        &mut self,
        draft: &AdjustmentDraft,
    ) -> ClientResult<Vec<PaymentHistoryRow>> {
        let request = draft.validate()?;
        let outcome = self.api.create_adjustment(&request).await?;

        if !outcome.is_success {
            let reason = outcome
                .error_message
                .or(outcome.message)
                .unwrap_or_else(|| "adjustment rejected".to_owned());
            tracing::warn!(%reason, "payment adjustment rejected");
            return Err(ClientError::Backend(reason));
        }

        let history = self.api.payment_history(draft.invoice_id()).await?;
        self.refresh_after_adjustment(draft.invoice_id()).await;
        Ok(history)
    }

    pub async fn delete_payment(&mut self, payment_id: PaymentId) -> ClientResult<()> {
        self.api.delete_payment(payment_id).await?;
        self.reload_rent_list().await;
        Ok(())
    }

    async fn reload_rent_list(&mut self) {
        match self.api.rent_collection().await {
            Ok(list) => self.rent_list = list,
            Err(err) => {
                // Background reload: keep showing stale data rather than
                // blocking the flow.
                tracing::warn!(error = %err, "rent list reload failed; keeping stale data");
            }
        }
    }

    async fn refresh_after_adjustment(&mut self, invoice_id: InvoiceId) {
        let Some(tenant_id) = self.session.tenant_id() else {
            return;
        };

        let response = match self.api.unpaid_invoices(tenant_id).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "invoice reload after adjustment failed");
                return;
            }
        };

        let summary: TenantSummary = response.summary.into();
        let invoices: Vec<InvoiceFacts> =
            response.invoices.into_iter().map(Into::into).collect();

        if self.session.origin() == Some(SessionOrigin::RowClick) {
            if let Some(facts) = invoices
                .iter()
                .find(|f| f.invoice_id == invoice_id)
                .cloned()
            {
                self.session.collapse_to_invoice(facts);
                return;
            }
            // The adjusted invoice dropped off the unpaid list; fall
            // through to a full reload.
        }

        self.session.load_tenant(tenant_id, invoices, summary);
    }

    fn known_invoice(&self, invoice_id: InvoiceId) -> ClientResult<(TenantId, Amount)> {
        if let Some(entry) = self
            .session
            .entries()
            .iter()
            .find(|e| e.invoice_id() == invoice_id)
        {
            return Ok((entry.facts.tenant_id, entry.facts.paid_amount));
        }
        if let Some(dto) = self.rent_list.iter().find(|d| d.invoice_id == invoice_id) {
            return Ok((dto.tenant_id, dto.paid_amount));
        }
        Err(DomainError::not_found().into())
    }
}
