//! Client registry operations

use chrono::Utc;
use tracing::debug;

use super::Store;
use crate::error::{Error, Result};
use crate::models::{ClientRecord, NewClient};

impl Store {
    /// All clients in creation order
    pub fn list_clients(&self) -> Result<Vec<ClientRecord>> {
        Ok(self.read()?.clients.clone())
    }

    /// Register a client
    ///
    /// Only the name is validated. Duplicates are allowed.
    pub fn add_client(&self, client: NewClient) -> Result<ClientRecord> {
        if client.client_name.trim().is_empty() {
            return Err(Error::InvalidData("clientName is required".to_string()));
        }

        let record = ClientRecord {
            id: uuid::Uuid::new_v4().to_string(),
            client_name: client.client_name,
            company: client.company,
            contact: client.contact,
            finance_category: client.finance_category,
            created_at: Utc::now(),
        };

        let mut inner = self.write()?;
        inner.clients.push(record.clone());
        debug!(id = %record.id, name = %record.client_name, "Client added");

        Ok(record)
    }
}
