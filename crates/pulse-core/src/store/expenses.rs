//! Ledger operations

use chrono::{NaiveDate, Utc};
use tracing::debug;

use super::Store;
use crate::error::Result;
use crate::export::expenses_to_csv;
use crate::invoice::{simulate_invoice, InvoiceUpload, SimulatedInvoice};
use crate::models::{ExpenseItem, FinanceStats};
use crate::stats::compute_stats;

impl Store {
    /// All ledger entries in creation order
    pub fn list_expenses(&self) -> Result<Vec<ExpenseItem>> {
        Ok(self.read()?.expenses.clone())
    }

    /// Simulate extraction of an uploaded invoice and append it to the ledger
    pub fn ingest_invoice(&self, upload: &InvoiceUpload) -> Result<SimulatedInvoice> {
        self.ingest_invoice_on(upload, Utc::now().date_naive())
    }

    /// Same as [`Store::ingest_invoice`] with an explicit current date
    pub fn ingest_invoice_on(
        &self,
        upload: &InvoiceUpload,
        today: NaiveDate,
    ) -> Result<SimulatedInvoice> {
        let mut guard = self.write()?;
        let inner = &mut *guard;

        let simulated = simulate_invoice(
            upload,
            &inner.clients,
            &inner.expenses,
            today,
            inner.entropy.as_mut(),
        );
        inner.expenses.push(simulated.expense.clone());

        debug!(
            id = %simulated.expense.id,
            client = %simulated.expense.client_name,
            total = simulated.total_amount,
            anomalies = simulated.extracted.anomalies.as_ref().map_or(0, Vec::len),
            "Invoice ingested"
        );

        Ok(simulated)
    }

    pub fn finance_stats(&self) -> Result<FinanceStats> {
        self.finance_stats_on(Utc::now().date_naive())
    }

    pub fn finance_stats_on(&self, today: NaiveDate) -> Result<FinanceStats> {
        Ok(compute_stats(&self.read()?.expenses, today))
    }

    /// The ledger as CSV
    pub fn export_csv(&self) -> Result<String> {
        expenses_to_csv(&self.read()?.expenses)
    }
}
