//! In-memory application state
//!
//! This module is organized by domain:
//! - `clients` - Client registry
//! - `expenses` - Ledger, invoice ingestion and derived statistics
//! - `alerts` - Notification list
//! - `agents` - Agent actions that touch both the ledger and alerts
//!
//! Every mutation takes the write lock exactly once, so compound changes
//! are never observed half-applied.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, warn};

use crate::auth::{self, SessionPolicy, SessionTable};
use crate::error::{Error, Result};
use crate::invoice::{InvoiceEntropy, RngEntropy};
use crate::models::{AlertItem, ClientRecord, ExpenseItem, User};

mod agents;
mod alerts;
mod clients;
mod expenses;

#[cfg(test)]
mod tests;

pub(crate) struct StoreInner {
    users: Vec<User>,
    sessions: SessionTable,
    clients: Vec<ClientRecord>,
    expenses: Vec<ExpenseItem>,
    /// Newest first
    alerts: Vec<AlertItem>,
    entropy: Box<dyn InvoiceEntropy>,
}

/// Shared handle to the dashboard state
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<StoreInner>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Empty store with the default session policy and OS-seeded entropy
    pub fn new() -> Self {
        Self::with_parts(SessionPolicy::default(), Box::new(RngEntropy::from_entropy()))
    }

    /// Empty store with a specific entropy source
    pub fn with_entropy(entropy: impl InvoiceEntropy + 'static) -> Self {
        Self::with_parts(SessionPolicy::default(), Box::new(entropy))
    }

    pub fn with_parts(policy: SessionPolicy, entropy: Box<dyn InvoiceEntropy>) -> Self {
        let inner = StoreInner {
            users: vec![auth::demo_user()],
            sessions: SessionTable::new(policy),
            clients: Vec::new(),
            expenses: Vec::new(),
            alerts: Vec::new(),
            entropy,
        };
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| Error::Poisoned)
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|_| Error::Poisoned)
    }

    // ========== Sessions ==========

    /// Check credentials and mint a bearer token
    pub fn login(&self, email: &str, password: &str) -> Result<(String, User)> {
        if !auth::credentials_match(email, password) {
            warn!("Rejected login attempt");
            return Err(Error::InvalidCredentials);
        }

        let mut inner = self.write()?;
        let user = inner
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("user {}", email)))?;

        let token = uuid::Uuid::new_v4().to_string();
        inner.sessions.insert(&token, &user.id, Utc::now());
        debug!(user = %user.id, sessions = inner.sessions.len(), "Session created");

        Ok((token, user))
    }

    /// Resolve a bearer token to its user
    pub fn authenticate(&self, token: &str) -> Result<User> {
        let inner = self.read()?;
        let user_id = inner
            .sessions
            .lookup(token, Utc::now())
            .ok_or_else(|| Error::Unauthorized("Invalid token".to_string()))?;
        inner
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| Error::Unauthorized("Invalid token".to_string()))
    }

    /// Number of live sessions (expired entries may still be counted until the next login)
    pub fn session_count(&self) -> Result<usize> {
        Ok(self.read()?.sessions.len())
    }
}
