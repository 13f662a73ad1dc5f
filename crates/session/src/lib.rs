//! `rentdesk-session` — batch payment session state machine.
//!
//! The session is the ephemeral, in-memory state behind one tenant's
//! payment-entry modal: which invoices are loaded, what the user has
//! edited, and where the submit lifecycle stands. It is created empty,
//! populated when a tenant is chosen, mutated freely, and discarded on
//! close or successful submit — never partially persisted.

pub mod adjustment;
pub mod batch;

pub use adjustment::{ADJUSTMENT_METHOD, AdjustmentDraft, AdjustmentRequest, max_adjustment};
pub use batch::{
    BatchSession, GlobalOverrides, PaymentLine, SessionOrigin, SessionPhase, TenantSummary,
};
