//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod agents;
pub mod alerts;
pub mod assistant;
pub mod auth;
pub mod clients;
pub mod expenses;
pub mod finance;
pub mod health;
pub mod invoices;

// Re-export all handlers for use in router
pub use agents::*;
pub use alerts::*;
pub use assistant::*;
pub use auth::*;
pub use clients::*;
pub use expenses::*;
pub use finance::*;
pub use health::*;
pub use invoices::*;
