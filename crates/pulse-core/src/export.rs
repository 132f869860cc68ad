//! CSV export of the expense ledger

use crate::error::{Error, Result};
use crate::models::ExpenseItem;

const HEADER: [&str; 9] = [
    "id",
    "client_id",
    "client_name",
    "project",
    "amount",
    "date",
    "source",
    "invoice_number",
    "payment_status",
];

/// Render the ledger as CSV, one row per entry in ledger order
pub fn expenses_to_csv(expenses: &[ExpenseItem]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for expense in expenses {
        let invoice = expense.invoice_data.as_ref();
        let amount = expense.amount.to_string();
        let date = expense.date.to_string();
        writer.write_record([
            expense.id.as_str(),
            expense.client_id.as_str(),
            expense.client_name.as_str(),
            expense.project.as_str(),
            amount.as_str(),
            date.as_str(),
            expense.source.as_str(),
            invoice
                .and_then(|i| i.invoice_number.as_deref())
                .unwrap_or(""),
            invoice
                .and_then(|i| i.payment_status)
                .map(|s| s.as_str())
                .unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}
