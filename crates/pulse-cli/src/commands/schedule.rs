//! Scheduled alert preview

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use pulse_core::schedule::next_firings;
use pulse_server::{ScheduleConfig, ServerConfig};

/// The next `count` alerts the server would raise after `after`
pub fn upcoming_alerts(
    schedule: &ScheduleConfig,
    after: DateTime<Utc>,
    count: usize,
) -> Result<Vec<(DateTime<Utc>, String)>> {
    let jobs = schedule.jobs().context("Invalid alert schedule")?;
    Ok(next_firings(&jobs, after, count)
        .into_iter()
        .map(|(at, job)| (at, job.title.clone()))
        .collect())
}

pub fn cmd_schedule(config_path: Option<&Path>, count: usize) -> Result<()> {
    let config = ServerConfig::load(config_path)?;
    if !config.schedule.enabled {
        println!("Alert scheduler is disabled in the configuration.");
        return Ok(());
    }

    println!("📅 Next {} scheduled alerts (UTC):", count);
    for (at, title) in upcoming_alerts(&config.schedule, Utc::now(), count)? {
        println!("   {}  {}", at.format("%a %Y-%m-%d %H:%M"), title);
    }

    Ok(())
}
