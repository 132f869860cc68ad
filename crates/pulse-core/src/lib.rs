//! Pulse Core Library
//!
//! Shared functionality for the Pulse business dashboard:
//! - Demo login and bearer-token sessions
//! - Client registry and signed expense ledger
//! - Simulated invoice extraction with anomaly rules
//! - Finance statistics (ROI, profitability series, waste alerts)
//! - Agent actions, scheduled alert jobs and the keyword assistant

pub mod agents;
pub mod assistant;
pub mod auth;
pub mod error;
pub mod export;
pub mod insights;
pub mod invoice;
pub mod models;
pub mod schedule;
pub mod stats;
pub mod store;

pub use agents::{AgentEffect, AgentType, LedgerAdjustment};
pub use assistant::{Intent, Persona};
pub use auth::{SessionPolicy, SessionTable};
pub use error::{Error, Result};
pub use insights::build_insights;
pub use invoice::{InvoiceEntropy, InvoiceUpload, MockEntropy, RngEntropy, SimulatedInvoice};
pub use schedule::AlertJob;
pub use stats::compute_stats;
pub use store::Store;
