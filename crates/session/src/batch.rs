use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rentdesk_core::{Amount, DomainError, DomainResult, InvoiceId, TenantId};
use rentdesk_reconcile::{
    FieldEdit, InvoiceEntry, InvoiceFacts, PaymentMode, Totals, apply_flat_discount,
    apply_percent_discount, compute_totals, toggle_invoice_select, toggle_select_all,
    update_invoice_field,
};

/// Where the session stands in the submit lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// No tenant chosen; the session holds nothing.
    Idle,
    /// Invoices loaded, untouched so far.
    TenantSelected,
    /// The user has started mutating selection or fields.
    Editing,
    /// A submit is in flight; further edits are rejected.
    Submitting,
}

/// How the session was opened. Drives post-adjustment behavior: a
/// row-click session collapses back to its single invoice after a
/// successful adjustment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionOrigin {
    TenantChange,
    RowClick,
}

/// Tenant-level summary figures returned alongside the unpaid invoices.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TenantSummary {
    pub monthly_rent: Amount,
    pub pending_amount: Amount,
    pub previous_balance: Amount,
    pub total_late_fee: Amount,
}

/// Batch-level values that take precedence over the per-invoice inputs.
///
/// Stored once here and resolved at read time (payload building,
/// totals), so invoices loaded after a global toggle was set cannot
/// diverge from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlobalOverrides {
    pub payment_method: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub wave_late_fee: bool,
}

/// One line of the submit payload, shaped exactly as the backend's
/// batch-payment endpoints consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentLine {
    pub tenant_id: TenantId,
    pub rent_invoice_id: InvoiceId,
    pub payment_amount: Amount,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub notes: String,
    pub discount_amount: Amount,
    pub is_late_fee_waived: bool,
}

/// The in-memory state for one tenant's payment-entry modal.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSession {
    phase: SessionPhase,
    mode: PaymentMode,
    origin: Option<SessionOrigin>,
    tenant_id: Option<TenantId>,
    entries: Vec<InvoiceEntry>,
    summary: TenantSummary,
    overrides: GlobalOverrides,
}

impl Default for BatchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchSession {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            mode: PaymentMode::Add,
            origin: None,
            tenant_id: None,
            entries: Vec::new(),
            summary: TenantSummary::default(),
            overrides: GlobalOverrides::default(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mode(&self) -> PaymentMode {
        self.mode
    }

    pub fn origin(&self) -> Option<SessionOrigin> {
        self.origin
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    pub fn entries(&self) -> &[InvoiceEntry] {
        &self.entries
    }

    pub fn summary(&self) -> &TenantSummary {
        &self.summary
    }

    pub fn overrides(&self) -> &GlobalOverrides {
        &self.overrides
    }

    /// Discard everything and return to `Idle`. Close always resets,
    /// whether or not work was in progress; the silent discard is the
    /// expected behavior of the modal.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Populate the session for a freshly chosen tenant. Every entry
    /// starts at session defaults: unselected, no waiver, discounts and
    /// pay amount zeroed, date/method/notes empty.
    pub fn load_tenant(
        &mut self,
        tenant_id: TenantId,
        invoices: Vec<InvoiceFacts>,
        summary: TenantSummary,
    ) {
        self.reset();
        self.phase = SessionPhase::TenantSelected;
        self.mode = PaymentMode::Add;
        self.origin = Some(SessionOrigin::TenantChange);
        self.tenant_id = Some(tenant_id);
        self.entries = invoices.into_iter().map(InvoiceEntry::from_facts).collect();
        self.summary = summary;
    }

    /// Seed a single-invoice edit session from one already-recorded row.
    /// The entry is force-selected but its inputs stay at defaults; the
    /// user must explicitly re-enter method, date and notes.
    pub fn open_row(&mut self, invoice: InvoiceFacts, summary: TenantSummary) {
        self.reset();
        self.phase = SessionPhase::TenantSelected;
        self.mode = PaymentMode::Edit;
        self.origin = Some(SessionOrigin::RowClick);
        self.tenant_id = Some(invoice.tenant_id);
        let mut entry = InvoiceEntry::from_facts(invoice);
        entry.selected = true;
        self.entries = vec![entry];
        self.summary = summary;
    }

    fn ensure_editable(&mut self) -> DomainResult<()> {
        match self.phase {
            SessionPhase::Idle => Err(DomainError::conflict("no tenant selected")),
            SessionPhase::Submitting => Err(DomainError::conflict("submit in progress")),
            SessionPhase::TenantSelected | SessionPhase::Editing => {
                self.phase = SessionPhase::Editing;
                Ok(())
            }
        }
    }

    pub fn select_all(&mut self, checked: bool) -> DomainResult<()> {
        self.ensure_editable()?;
        toggle_select_all(&mut self.entries, checked, self.mode);
        Ok(())
    }

    pub fn select_invoice(&mut self, invoice_id: InvoiceId, checked: bool) -> DomainResult<()> {
        self.ensure_editable()?;
        toggle_invoice_select(&mut self.entries, invoice_id, checked, self.mode);
        Ok(())
    }

    pub fn edit_field(&mut self, invoice_id: InvoiceId, edit: FieldEdit) -> DomainResult<()> {
        self.ensure_editable()?;
        update_invoice_field(&mut self.entries, invoice_id, edit)
    }

    /// Spread a flat discount across the selected entries (oldest due
    /// first). Returns the amount actually allocated.
    pub fn apply_global_discount_amount(&mut self, amount: Amount) -> DomainResult<Amount> {
        self.ensure_editable()?;
        Ok(apply_flat_discount(&mut self.entries, amount))
    }

    pub fn apply_global_discount_percent(&mut self, percent: f64) -> DomainResult<()> {
        self.ensure_editable()?;
        apply_percent_discount(&mut self.entries, percent);
        Ok(())
    }

    pub fn set_global_wave_late_fee(&mut self, waived: bool) -> DomainResult<()> {
        self.ensure_editable()?;
        self.overrides.wave_late_fee = waived;
        Ok(())
    }

    pub fn set_global_payment_method(&mut self, method: Option<String>) -> DomainResult<()> {
        self.ensure_editable()?;
        self.overrides.payment_method = method;
        Ok(())
    }

    pub fn set_global_payment_date(&mut self, date: Option<NaiveDate>) -> DomainResult<()> {
        self.ensure_editable()?;
        self.overrides.payment_date = date;
        Ok(())
    }

    pub fn set_global_notes(&mut self, notes: Option<String>) -> DomainResult<()> {
        self.ensure_editable()?;
        self.overrides.notes = notes;
        Ok(())
    }

    /// Footer totals for the current selection.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.entries, self.overrides.wave_late_fee)
    }

    /// Effective per-entry values: the global override wins when set,
    /// otherwise the entry's own input applies.
    pub fn effective_payment_method<'a>(&'a self, entry: &'a InvoiceEntry) -> Option<&'a str> {
        self.overrides
            .payment_method
            .as_deref()
            .or(entry.payment_method.as_deref())
    }

    pub fn effective_payment_date(&self, entry: &InvoiceEntry) -> Option<NaiveDate> {
        self.overrides.payment_date.or(entry.payment_date)
    }

    pub fn effective_notes<'a>(&'a self, entry: &'a InvoiceEntry) -> &'a str {
        self.overrides.notes.as_deref().unwrap_or(&entry.notes)
    }

    pub fn effective_waiver(&self, entry: &InvoiceEntry) -> bool {
        self.overrides.wave_late_fee || entry.wave_late_fee
    }

    /// Guarded transition into `Submitting`: rejects an empty or
    /// zero-amount selection before anything reaches the network, and
    /// builds one payment line per selected entry.
    pub fn begin_submit(&mut self) -> DomainResult<Vec<PaymentLine>> {
        match self.phase {
            SessionPhase::Idle => return Err(DomainError::conflict("no tenant selected")),
            SessionPhase::Submitting => return Err(DomainError::conflict("submit in progress")),
            SessionPhase::TenantSelected | SessionPhase::Editing => {}
        }

        let totals = self.totals();
        if !totals.any_selected() {
            return Err(DomainError::validation("no invoices selected"));
        }
        if totals.pay_total <= 0 {
            return Err(DomainError::validation("nothing to pay"));
        }

        let tenant_id = self
            .tenant_id
            .ok_or_else(|| DomainError::invariant("session has entries but no tenant"))?;

        let lines = self
            .entries
            .iter()
            .filter(|e| e.selected)
            .map(|entry| PaymentLine {
                tenant_id,
                rent_invoice_id: entry.invoice_id(),
                payment_amount: entry.pay_amount,
                payment_date: self.effective_payment_date(entry),
                payment_method: self.effective_payment_method(entry).map(str::to_owned),
                notes: self.effective_notes(entry).to_owned(),
                discount_amount: entry.session_discount(),
                is_late_fee_waived: self.effective_waiver(entry),
            })
            .collect();

        self.phase = SessionPhase::Submitting;
        Ok(lines)
    }

    /// Successful submit: the session is done, discard it.
    pub fn submit_succeeded(&mut self) {
        self.reset();
    }

    /// Failed submit: drop back to `Editing` so the user can retry with
    /// state intact.
    pub fn submit_failed(&mut self) {
        if self.phase == SessionPhase::Submitting {
            self.phase = SessionPhase::Editing;
        }
    }

    /// Collapse a row-click session down to the single, now-refreshed
    /// invoice after a successful adjustment.
    pub fn collapse_to_invoice(&mut self, invoice: InvoiceFacts) {
        let summary = self.summary;
        self.open_row(invoice, summary);
        self.phase = SessionPhase::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(billed: Amount, paid: Amount) -> InvoiceFacts {
        InvoiceFacts {
            invoice_id: InvoiceId::new(),
            tenant_id: TenantId::new(),
            invoice_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            monthly_rent: billed,
            paid_amount: paid,
            remaining_amount: billed - paid,
            applied_discount: 0,
            late_fee: 0,
            payment_id: None,
        }
    }

    fn loaded_session(invoices: Vec<InvoiceFacts>) -> (BatchSession, TenantId) {
        let tenant_id = invoices
            .first()
            .map(|f| f.tenant_id)
            .unwrap_or_else(TenantId::new);
        let mut session = BatchSession::new();
        session.load_tenant(tenant_id, invoices, TenantSummary::default());
        (session, tenant_id)
    }

    #[test]
    fn new_session_is_idle_and_empty() {
        let session = BatchSession::new();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.entries().is_empty());
        assert_eq!(session.tenant_id(), None);
    }

    #[test]
    fn load_tenant_defaults_every_entry() {
        let (session, tenant_id) = loaded_session(vec![facts(1000, 0), facts(2000, 500)]);

        assert_eq!(session.phase(), SessionPhase::TenantSelected);
        assert_eq!(session.mode(), PaymentMode::Add);
        assert_eq!(session.origin(), Some(SessionOrigin::TenantChange));
        assert_eq!(session.tenant_id(), Some(tenant_id));
        for entry in session.entries() {
            assert!(!entry.selected);
            assert_eq!(entry.pay_amount, 0);
            assert_eq!(entry.payment_method, None);
        }
    }

    #[test]
    fn open_row_forces_selection_but_not_inputs() {
        let mut f = facts(1000, 1000);
        f.payment_id = Some(rentdesk_core::PaymentId::new());
        let mut session = BatchSession::new();
        session.open_row(f, TenantSummary::default());

        assert_eq!(session.mode(), PaymentMode::Edit);
        assert_eq!(session.origin(), Some(SessionOrigin::RowClick));
        assert_eq!(session.entries().len(), 1);
        let entry = &session.entries()[0];
        assert!(entry.selected);
        assert_eq!(entry.pay_amount, 0);
        assert_eq!(entry.payment_method, None);
        assert_eq!(entry.payment_date, None);
    }

    #[test]
    fn mutating_an_idle_session_is_a_conflict() {
        let mut session = BatchSession::new();
        let err = session.select_all(true).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn first_mutation_moves_to_editing() {
        let (mut session, _) = loaded_session(vec![facts(1000, 0)]);
        session.select_all(true).unwrap();
        assert_eq!(session.phase(), SessionPhase::Editing);
    }

    #[test]
    fn begin_submit_rejects_empty_selection_before_any_network_call() {
        let (mut session, _) = loaded_session(vec![facts(1000, 0)]);
        let err = session.begin_submit().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        // Still editable, not stuck in Submitting.
        session.select_all(true).unwrap();
    }

    #[test]
    fn begin_submit_rejects_zero_pay_total() {
        let (mut session, _) = loaded_session(vec![facts(1000, 0)]);
        session.select_all(true).unwrap();
        let id = session.entries()[0].invoice_id();
        session.edit_field(id, FieldEdit::PayAmount(0)).unwrap();

        let err = session.begin_submit().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn begin_submit_builds_one_line_per_selected_entry() {
        let (mut session, tenant_id) = loaded_session(vec![facts(1000, 0), facts(2000, 0)]);
        session.select_all(true).unwrap();
        let first_id = session.entries()[0].invoice_id();
        session
            .edit_field(first_id, FieldEdit::DiscountAmount(100))
            .unwrap();

        let lines = session.begin_submit().unwrap();

        assert_eq!(session.phase(), SessionPhase::Submitting);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].tenant_id, tenant_id);
        assert_eq!(lines[0].rent_invoice_id, first_id);
        assert_eq!(lines[0].payment_amount, 900); // resynced by the discount edit
        assert_eq!(lines[0].discount_amount, 100);
        assert_eq!(lines[1].payment_amount, 2000);
        assert_eq!(lines[1].discount_amount, 0);
    }

    #[test]
    fn global_overrides_win_in_payload_and_totals() {
        let mut f = facts(1000, 0);
        f.late_fee = 150;
        let (mut session, _) = loaded_session(vec![f]);
        session.select_all(true).unwrap();
        let id = session.entries()[0].invoice_id();
        session
            .edit_field(id, FieldEdit::PaymentMethod(Some("Cash".into())))
            .unwrap();
        session
            .set_global_payment_method(Some("Bank Transfer".into()))
            .unwrap();
        session.set_global_wave_late_fee(true).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        session.set_global_payment_date(Some(date)).unwrap();

        assert_eq!(session.totals().late_fee_total, 0);

        let lines = session.begin_submit().unwrap();
        assert_eq!(lines[0].payment_method.as_deref(), Some("Bank Transfer"));
        assert_eq!(lines[0].payment_date, Some(date));
        assert!(lines[0].is_late_fee_waived);
    }

    #[test]
    fn per_entry_values_apply_when_no_override_is_set() {
        let (mut session, _) = loaded_session(vec![facts(1000, 0)]);
        session.select_all(true).unwrap();
        let id = session.entries()[0].invoice_id();
        session
            .edit_field(id, FieldEdit::PaymentMethod(Some("Cash".into())))
            .unwrap();
        session
            .edit_field(id, FieldEdit::Notes("June rent".into()))
            .unwrap();

        let lines = session.begin_submit().unwrap();
        assert_eq!(lines[0].payment_method.as_deref(), Some("Cash"));
        assert_eq!(lines[0].notes, "June rent");
    }

    #[test]
    fn submit_failure_returns_to_editing_with_state_intact() {
        let (mut session, _) = loaded_session(vec![facts(1000, 0)]);
        session.select_all(true).unwrap();
        session.begin_submit().unwrap();

        session.submit_failed();

        assert_eq!(session.phase(), SessionPhase::Editing);
        assert!(session.entries()[0].selected);
        assert_eq!(session.entries()[0].pay_amount, 1000);
    }

    #[test]
    fn submit_success_discards_the_session() {
        let (mut session, _) = loaded_session(vec![facts(1000, 0)]);
        session.select_all(true).unwrap();
        session.begin_submit().unwrap();

        session.submit_succeeded();

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.entries().is_empty());
    }

    #[test]
    fn edits_are_rejected_while_submitting() {
        let (mut session, _) = loaded_session(vec![facts(1000, 0)]);
        session.select_all(true).unwrap();
        session.begin_submit().unwrap();

        let err = session.select_all(false).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn collapse_keeps_edit_mode_on_the_refreshed_invoice() {
        let mut f = facts(1000, 400);
        f.payment_id = Some(rentdesk_core::PaymentId::new());
        let mut session = BatchSession::new();
        session.open_row(f.clone(), TenantSummary::default());

        let mut refreshed = f;
        refreshed.paid_amount = 300; // after the reversal
        session.collapse_to_invoice(refreshed.clone());

        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.entries()[0].facts.paid_amount, 300);
        assert_eq!(session.mode(), PaymentMode::Edit);
        assert_eq!(session.phase(), SessionPhase::Editing);
    }

    #[test]
    fn payment_line_serializes_pascal_case() {
        let line = PaymentLine {
            tenant_id: TenantId::new(),
            rent_invoice_id: InvoiceId::new(),
            payment_amount: 500,
            payment_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            payment_method: Some("Cash".into()),
            notes: "x".into(),
            discount_amount: 50,
            is_late_fee_waived: true,
        };

        let value = serde_json::to_value(&line).unwrap();
        for key in [
            "TenantId",
            "RentInvoiceId",
            "PaymentAmount",
            "PaymentDate",
            "PaymentMethod",
            "Notes",
            "DiscountAmount",
            "IsLateFeeWaived",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["PaymentAmount"], 500);
    }
}
