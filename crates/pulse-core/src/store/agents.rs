//! Agent activation

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use super::Store;
use crate::agents::AgentType;
use crate::error::Result;
use crate::models::{AgentActionResponse, ExpenseItem, ExpenseSource};
use crate::stats::{compute_stats, gross_spend};

pub const SYSTEM_CLIENT_ID: &str = "system";
pub const SYSTEM_CLIENT_NAME: &str = "System";

impl Store {
    /// Run an agent against the current ledger
    pub fn activate_agent(&self, agent: AgentType) -> Result<AgentActionResponse> {
        self.activate_agent_on(agent, Utc::now().date_naive())
    }

    /// Same as [`Store::activate_agent`] with an explicit current date
    ///
    /// The savings entry, the alert and the returned stats all come from a
    /// single write lock.
    pub fn activate_agent_on(
        &self,
        agent: AgentType,
        today: NaiveDate,
    ) -> Result<AgentActionResponse> {
        let mut guard = self.write()?;
        let inner = &mut *guard;

        let effect = agent.plan(gross_spend(&inner.expenses));

        if let Some(adjustment) = effect.adjustment {
            let entry = ExpenseItem {
                id: uuid::Uuid::new_v4().to_string(),
                client_id: SYSTEM_CLIENT_ID.to_string(),
                client_name: SYSTEM_CLIENT_NAME.to_string(),
                project: adjustment.project.to_string(),
                amount: adjustment.amount,
                date: today,
                source: ExpenseSource::Agent,
                invoice_data: None,
            };
            debug!(id = %entry.id, amount = entry.amount, "Agent savings recorded");
            inner.expenses.push(entry);
        }

        Store::prepend_alert_locked(&mut inner.alerts, effect.alert_title);
        info!(agent = %agent, "Agent activated");

        Ok(AgentActionResponse {
            success: true,
            message: effect.message,
            updated_stats: compute_stats(&inner.expenses, today),
        })
    }
}
