//! Background alert scheduler
//!
//! A single producer task sleeps until the earliest upcoming firing across
//! all jobs and sends one [`AlertEvent`] per due job. A single consumer task
//! applies events to the store, so scheduled alerts enter the alert list in
//! firing order. Both tasks stop once the channel closes.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use pulse_core::schedule::{next_firing, AlertJob};
use pulse_core::Store;

/// Buffered events between the scheduler and the store
const EVENT_BUFFER: usize = 16;

/// One firing of a scheduled job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEvent {
    pub job: String,
    pub title: String,
    pub fired_at: DateTime<Utc>,
}

/// How long to sleep before `at`, zero if it has already passed
fn sleep_duration(at: DateTime<Utc>, now: DateTime<Utc>) -> std::time::Duration {
    (at - now).to_std().unwrap_or(std::time::Duration::ZERO)
}

/// Produce events for `jobs` until the receiver is dropped
pub async fn run_scheduler(jobs: Vec<AlertJob>, tx: mpsc::Sender<AlertEvent>) {
    // Firings at or before the cursor have already been sent
    let mut cursor = Utc::now();

    loop {
        let Some((at, due)) = next_firing(&jobs, cursor) else {
            warn!("No upcoming firings; alert scheduler exiting");
            return;
        };
        debug!(at = %at, jobs = due.len(), "Next scheduled alert");

        tokio::time::sleep(sleep_duration(at, Utc::now())).await;

        for job in due {
            let event = AlertEvent {
                job: job.name.clone(),
                title: job.title.clone(),
                fired_at: at,
            };
            if tx.send(event).await.is_err() {
                info!("Alert channel closed; scheduler stopping");
                return;
            }
        }
        cursor = at;
    }
}

/// Apply scheduled events to the store until every sender is dropped
pub async fn run_alert_consumer(store: Store, mut rx: mpsc::Receiver<AlertEvent>) {
    while let Some(event) = rx.recv().await {
        match store.push_alert(&event.title) {
            Ok(alert) => info!(job = %event.job, id = %alert.id, "Scheduled alert raised"),
            Err(e) => error!(job = %event.job, "Failed to raise scheduled alert: {}", e),
        }
    }
}

/// Start the scheduler and its consumer as background tasks
pub fn start_alert_scheduler(store: Store, jobs: Vec<AlertJob>) {
    for job in &jobs {
        info!("Scheduling '{}' ({}): {}", job.name, job.expression, job.title);
    }

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    tokio::spawn(run_scheduler(jobs, tx));
    tokio::spawn(run_alert_consumer(store, rx));
}
