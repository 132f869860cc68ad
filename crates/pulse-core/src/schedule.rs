//! Calendar jobs that raise alerts
//!
//! Expressions use the `cron` crate's seconds-first syntax and are evaluated
//! in UTC.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use cron::Schedule;

use crate::error::Result;

/// Mondays at 09:00
pub const WEEKLY_ROI_CRON: &str = "0 0 9 * * Mon";

/// First of the month at 08:00
pub const MONTHLY_ROI_CRON: &str = "0 0 8 1 * *";

pub const WEEKLY_ROI_TITLE: &str = "Weekly ROI Analysis Complete";
pub const MONTHLY_ROI_TITLE: &str = "Monthly ROI Report Ready";

/// A named schedule that raises one alert per firing
#[derive(Debug, Clone)]
pub struct AlertJob {
    pub name: String,
    pub title: String,
    pub expression: String,
    schedule: Schedule,
}

impl AlertJob {
    pub fn new(name: &str, expression: &str, title: &str) -> Result<Self> {
        let schedule = Schedule::from_str(expression)?;
        Ok(Self {
            name: name.to_string(),
            title: title.to_string(),
            expression: expression.to_string(),
            schedule,
        })
    }

    /// First firing strictly after `after`
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&after).next()
    }
}

/// The weekly and monthly ROI jobs with the given expressions
pub fn roi_jobs(weekly: &str, monthly: &str) -> Result<Vec<AlertJob>> {
    Ok(vec![
        AlertJob::new("weekly-roi", weekly, WEEKLY_ROI_TITLE)?,
        AlertJob::new("monthly-roi", monthly, MONTHLY_ROI_TITLE)?,
    ])
}

pub fn default_jobs() -> Result<Vec<AlertJob>> {
    roi_jobs(WEEKLY_ROI_CRON, MONTHLY_ROI_CRON)
}

/// Earliest upcoming instant across all jobs, with every job due then
pub fn next_firing(jobs: &[AlertJob], after: DateTime<Utc>) -> Option<(DateTime<Utc>, Vec<&AlertJob>)> {
    let at = jobs.iter().filter_map(|job| job.next_after(after)).min()?;
    let due = jobs
        .iter()
        .filter(|job| job.next_after(after) == Some(at))
        .collect();
    Some((at, due))
}

/// The next `count` firings in chronological order
pub fn next_firings(
    jobs: &[AlertJob],
    after: DateTime<Utc>,
    count: usize,
) -> Vec<(DateTime<Utc>, &AlertJob)> {
    let mut firings = Vec::with_capacity(count);
    let mut cursor = after;
    while firings.len() < count {
        let Some((at, due)) = next_firing(jobs, cursor) else {
            break;
        };
        for job in due {
            if firings.len() < count {
                firings.push((at, job));
            }
        }
        cursor = at;
    }
    firings
}
