//! `rentdesk-workflow` — orchestration over the session and the backend.
//!
//! Two flows share one orchestrator: the batch payment submission flow
//! (tenant selection → edit-in-place → submit → reload) and the
//! adjustment/reversal flow against one invoice's payment history. All
//! backend traffic goes through the [`rentdesk_client::RentApi`] seam,
//! so everything here is testable against an in-memory fake.

pub mod orchestrator;

pub use orchestrator::{LoadTicket, PaymentWorkflow, TenantSelection};
