//! Demo credentials and the bearer-token session table
//!
//! There is exactly one account. Tokens are random UUIDs handed to the
//! caller; the table only keeps their SHA-256 digests.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::models::User;

pub const DEMO_USER_ID: &str = "u1";
pub const DEMO_EMAIL: &str = "admin@demo.com";
pub const DEMO_PASSWORD: &str = "12345";
pub const DEMO_NAME: &str = "Admin";

/// Default cap on live sessions
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// The seeded demo account
pub fn demo_user() -> User {
    User {
        id: DEMO_USER_ID.to_string(),
        email: DEMO_EMAIL.to_string(),
        name: DEMO_NAME.to_string(),
    }
}

/// Check a credential pair against the demo account
pub fn credentials_match(email: &str, password: &str) -> bool {
    let email_ok: bool = email.as_bytes().ct_eq(DEMO_EMAIL.as_bytes()).into();
    let password_ok: bool = password.as_bytes().ct_eq(DEMO_PASSWORD.as_bytes()).into();
    email_ok & password_ok
}

/// Hex SHA-256 digest of a bearer token
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Lifetime rules for sessions
///
/// `ttl: None` means a session lives until the process exits. The table
/// never holds more than `max_sessions` entries; the oldest is evicted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub ttl: Option<Duration>,
    pub max_sessions: usize,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            ttl: None,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

#[derive(Debug, Clone)]
struct SessionEntry {
    user_id: String,
    created_at: DateTime<Utc>,
}

impl SessionEntry {
    fn is_expired(&self, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
        ttl.map(|ttl| now - self.created_at > ttl).unwrap_or(false)
    }
}

/// Token → user mapping
#[derive(Debug, Default)]
pub struct SessionTable {
    policy: SessionPolicy,
    entries: HashMap<String, SessionEntry>,
}

impl SessionTable {
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a token for a user, pruning expired entries and evicting the
    /// oldest sessions if the table is full
    pub fn insert(&mut self, token: &str, user_id: &str, now: DateTime<Utc>) {
        self.prune_expired(now);

        let max = self.policy.max_sessions.max(1);
        while self.entries.len() >= max {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                }
                None => break,
            }
        }

        self.entries.insert(
            token_digest(token),
            SessionEntry {
                user_id: user_id.to_string(),
                created_at: now,
            },
        );
    }

    /// Resolve a token to its user id, if the session is live
    pub fn lookup(&self, token: &str, now: DateTime<Utc>) -> Option<&str> {
        self.entries
            .get(&token_digest(token))
            .filter(|entry| !entry.is_expired(self.policy.ttl, now))
            .map(|entry| entry.user_id.as_str())
    }

    /// Drop expired sessions, returning how many were removed
    pub fn prune_expired(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = self.policy.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl, now));
        before - self.entries.len()
    }
}
