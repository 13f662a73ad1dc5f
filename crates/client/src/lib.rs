//! `rentdesk-client` — typed REST collaborator for the rent backend.
//!
//! One DTO per endpoint payload, a [`RentApi`] trait so workflows can be
//! tested against an in-memory fake, and a [`RentClient`] that carries
//! the cookie session and the single-flight 401 refresh-and-retry.

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod http;

pub use api::RentApi;
pub use config::ClientConfig;
pub use dto::{
    AdjustmentOutcome, InvoiceDto, PaymentHistoryRow, TenantDto, TenantSummaryDto,
    UnpaidInvoicesResponse,
};
pub use error::{ClientError, ClientResult};
pub use http::RentClient;
