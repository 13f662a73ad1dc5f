//! `rentdesk-reconcile` — pure rent payment reconciliation engine.
//!
//! Everything in this crate is deterministic and IO-free: invoice records
//! with their remaining-balance rule, discount/waiver policy, selection
//! toggling, the single field-update dispatch point, and totals
//! aggregation. Session lifecycle and network concerns live elsewhere.

pub mod field;
pub mod invoice;
pub mod policy;
pub mod selection;
pub mod totals;

pub use field::{FieldEdit, update_invoice_field};
pub use invoice::{InvoiceEntry, InvoiceFacts};
pub use policy::{apply_flat_discount, apply_percent_discount};
pub use selection::{PaymentMode, toggle_invoice_select, toggle_select_all};
pub use totals::{Totals, compute_totals};
