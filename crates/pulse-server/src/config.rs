//! Server configuration
//!
//! Settings are layered: built-in defaults, then an optional `pulse.toml`,
//! then environment variables. CLI flags are applied last by the caller.
//!
//! Recognized environment variables:
//! - `PULSE_DEMO_MODE`: open mutating endpoints without a session ("1"/"true")
//! - `PULSE_ALLOWED_ORIGINS`: comma-separated CORS origins
//! - `PULSE_SESSION_TTL_HOURS`: session lifetime, 0 for no expiry
//! - `PULSE_MAX_SESSIONS`: cap on live sessions
//! - `PULSE_WEEKLY_CRON` / `PULSE_MONTHLY_CRON`: alert job schedules
//! - `PING_MESSAGE`: body of `GET /api/ping`

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, warn};

use pulse_core::auth::SessionPolicy;
use pulse_core::schedule::{self, AlertJob, MONTHLY_ROI_CRON, WEEKLY_ROI_CRON};

pub const DEFAULT_PING_MESSAGE: &str = "ping";

const CONFIG_FILE_NAME: &str = "pulse.toml";

/// Alert job settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub enabled: bool,
    pub weekly: String,
    pub monthly: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            weekly: WEEKLY_ROI_CRON.to_string(),
            monthly: MONTHLY_ROI_CRON.to_string(),
        }
    }
}

impl ScheduleConfig {
    /// Parse the configured expressions into jobs
    pub fn jobs(&self) -> pulse_core::Result<Vec<AlertJob>> {
        schedule::roi_jobs(&self.weekly, &self.monthly)
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Open mutating endpoints to callers without a session
    pub demo_mode: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    pub session_policy: SessionPolicy,
    pub ping_message: String,
    pub schedule: ScheduleConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            demo_mode: false,
            allowed_origins: vec![],
            session_policy: SessionPolicy::default(),
            ping_message: DEFAULT_PING_MESSAGE.to_string(),
            schedule: ScheduleConfig::default(),
        }
    }
}

/// On-disk layout of `pulse.toml`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    demo_mode: Option<bool>,
    allowed_origins: Option<Vec<String>>,
    ping_message: Option<String>,
    sessions: FileSessions,
    schedule: FileSchedule,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSessions {
    ttl_hours: Option<u64>,
    max_sessions: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSchedule {
    enabled: Option<bool>,
    weekly: Option<String>,
    monthly: Option<String>,
}

/// Default config file location (`<config dir>/pulse/pulse.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pulse").join(CONFIG_FILE_NAME))
}

fn ttl_from_hours(hours: u64) -> Option<chrono::Duration> {
    if hours == 0 {
        None
    } else {
        i64::try_from(hours).ok().map(chrono::Duration::hours)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    /// Build the configuration from defaults, a config file and the process environment
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used only if the file is present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };
        if let Some(file) = file {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read config file {}", file.display()))?;
            config.apply_toml(&text)
                .with_context(|| format!("Invalid config file {}", file.display()))?;
            info!("Loaded configuration from {}", file.display());
        }

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Overlay settings from TOML text
    pub fn apply_toml(&mut self, text: &str) -> anyhow::Result<()> {
        let file: FileConfig = toml::from_str(text)?;

        if let Some(demo) = file.demo_mode {
            self.demo_mode = demo;
        }
        if let Some(origins) = file.allowed_origins {
            self.allowed_origins = origins;
        }
        if let Some(message) = file.ping_message {
            self.ping_message = message;
        }
        if let Some(hours) = file.sessions.ttl_hours {
            self.session_policy.ttl = ttl_from_hours(hours);
        }
        if let Some(max) = file.sessions.max_sessions {
            self.session_policy.max_sessions = max;
        }
        if let Some(enabled) = file.schedule.enabled {
            self.schedule.enabled = enabled;
        }
        if let Some(weekly) = file.schedule.weekly {
            self.schedule.weekly = weekly;
        }
        if let Some(monthly) = file.schedule.monthly {
            self.schedule.monthly = monthly;
        }
        Ok(())
    }

    /// Overlay settings from environment variables
    ///
    /// Takes a lookup function so tests never touch the process environment.
    /// Unparseable values are logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("PULSE_DEMO_MODE") {
            match parse_bool(&value) {
                Some(demo) => self.demo_mode = demo,
                None => warn!("Ignoring invalid PULSE_DEMO_MODE: {}", value),
            }
        }

        if let Some(value) = lookup("PULSE_ALLOWED_ORIGINS") {
            self.allowed_origins = value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(value) = lookup("PULSE_SESSION_TTL_HOURS") {
            match value.trim().parse::<u64>() {
                Ok(hours) => self.session_policy.ttl = ttl_from_hours(hours),
                Err(_) => warn!("Ignoring invalid PULSE_SESSION_TTL_HOURS: {}", value),
            }
        }

        if let Some(value) = lookup("PULSE_MAX_SESSIONS") {
            match value.trim().parse::<usize>() {
                Ok(max) => self.session_policy.max_sessions = max,
                Err(_) => warn!("Ignoring invalid PULSE_MAX_SESSIONS: {}", value),
            }
        }

        if let Some(value) = lookup("PULSE_WEEKLY_CRON") {
            self.schedule.weekly = value;
        }
        if let Some(value) = lookup("PULSE_MONTHLY_CRON") {
            self.schedule.monthly = value;
        }

        if let Some(value) = lookup("PING_MESSAGE") {
            self.ping_message = value;
        }
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.session_policy.max_sessions == 0 {
            anyhow::bail!("max_sessions must be at least 1");
        }
        self.schedule
            .jobs()
            .context("Invalid alert schedule expression")?;
        Ok(())
    }
}
