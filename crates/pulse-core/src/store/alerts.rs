//! Alert operations

use chrono::Utc;
use tracing::debug;

use super::Store;
use crate::error::Result;
use crate::models::AlertItem;

fn new_alert(title: &str) -> AlertItem {
    AlertItem {
        id: uuid::Uuid::new_v4().to_string(),
        title: title.to_string(),
        created_at: Utc::now(),
        read: false,
    }
}

impl Store {
    /// All alerts, newest first
    pub fn list_alerts(&self) -> Result<Vec<AlertItem>> {
        Ok(self.read()?.alerts.clone())
    }

    /// Raise an alert at the front of the list
    pub fn push_alert(&self, title: &str) -> Result<AlertItem> {
        let mut inner = self.write()?;
        let alert = Store::prepend_alert_locked(&mut inner.alerts, title);
        debug!(id = %alert.id, title = %alert.title, "Alert raised");
        Ok(alert)
    }

    /// Mark an alert as read, returning whether it existed
    pub fn mark_alert_read(&self, id: &str) -> Result<bool> {
        let mut inner = self.write()?;
        match inner.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.read = true;
                Ok(true)
            }
            None => {
                debug!(id, "Mark-read for unknown alert");
                Ok(false)
            }
        }
    }

    pub(crate) fn prepend_alert_locked(alerts: &mut Vec<AlertItem>, title: &str) -> AlertItem {
        let alert = new_alert(title);
        alerts.insert(0, alert.clone());
        alert
    }
}
