//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `assistant` - One-shot assistant questions
//! - `schedule` - Scheduled alert preview
//! - `serve` - Web server command
//! - `simulate` - Local invoice simulation

pub mod assistant;
pub mod schedule;
pub mod serve;
pub mod simulate;

// Re-export command functions for main.rs
pub use assistant::*;
pub use schedule::*;
pub use serve::*;
pub use simulate::*;
