//! Simulated invoice extraction
//!
//! Uploaded files are never parsed. The invoice amount is derived from the
//! upload size plus jitter, and dates/payment status come from an
//! [`InvoiceEntropy`] source so tests can pin them down.
//!
//! Anomaly rules are evaluated independently:
//! - overdue for more than 30 days
//! - total above the high-value threshold
//! - a recent ledger entry for the same client with a near-identical amount

mod entropy;
mod mock;

pub use entropy::{RngEntropy, MAX_AMOUNT_JITTER, MAX_DATE_OFFSET_DAYS};
pub use mock::MockEntropy;

use chrono::{Duration, NaiveDate};
use num_format::{Locale, ToFormattedString};

use crate::models::{
    ClientRecord, ExpenseItem, ExpenseSource, ExtractedInvoice, InvoiceCategory, ParsedExpense,
    PaymentStatus, UploadInvoiceResponse,
};

/// GST rate applied to every invoice, in whole percent
pub const TAX_RATE_PERCENT: i64 = 18;

/// Totals above this are flagged for manual verification
pub const HIGH_VALUE_THRESHOLD: i64 = 50_000;

/// Overdue invoices older than this are flagged
pub const OVERDUE_ACTION_DAYS: u32 = 30;

/// Ledger entries closer than this to the new total count as duplicates
pub const DUPLICATE_TOLERANCE: i64 = 100;

/// Window (days) in which a matching entry counts as a duplicate
pub const DUPLICATE_WINDOW_DAYS: i64 = 7;

pub const DEFAULT_CLIENT_NAME: &str = "Unknown";
pub const DEFAULT_PROJECT: &str = "General";
pub const UNKNOWN_CLIENT_ID: &str = "unknown";

pub const HIGH_VALUE_ANOMALY: &str = "High invoice amount detected - verify before processing";
pub const DUPLICATE_ANOMALY: &str = "Potential duplicate invoice detected";

/// Source of randomness for the simulated OCR step
pub trait InvoiceEntropy: Send + Sync {
    /// Amount jitter in `[0, MAX_AMOUNT_JITTER)`
    fn amount_jitter(&mut self) -> f64;

    /// Days before today the invoice was issued, in `[0, 30)`
    fn invoice_age_days(&mut self) -> i64;

    /// Days after today the invoice is due, in `[0, 30)`
    fn days_until_due(&mut self) -> i64;

    fn payment_status(&mut self) -> PaymentStatus;

    /// Days the invoice has been outstanding for the given status
    fn days_pending(&mut self, status: PaymentStatus) -> u32;

    /// Six uppercase alphanumerics for the invoice number
    fn invoice_suffix(&mut self) -> String;
}

/// An uploaded invoice as seen by the simulator
#[derive(Debug, Clone, Default)]
pub struct InvoiceUpload {
    pub client_name: Option<String>,
    pub project: Option<String>,
    /// Byte length of the uploaded file (0 when no file was sent)
    pub content_len: usize,
}

impl InvoiceUpload {
    pub fn new(client_name: &str, project: &str, content_len: usize) -> Self {
        Self {
            client_name: Some(client_name.to_string()),
            project: Some(project.to_string()),
            content_len,
        }
    }

    fn resolved_client_name(&self) -> String {
        non_blank(self.client_name.as_deref()).unwrap_or(DEFAULT_CLIENT_NAME).to_string()
    }

    fn resolved_project(&self) -> String {
        non_blank(self.project.as_deref()).unwrap_or(DEFAULT_PROJECT).to_string()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Result of simulating one invoice
#[derive(Debug, Clone)]
pub struct SimulatedInvoice {
    pub total_amount: i64,
    pub extracted: ExtractedInvoice,
    pub expense: ExpenseItem,
}

impl SimulatedInvoice {
    pub fn to_response(&self) -> UploadInvoiceResponse {
        UploadInvoiceResponse {
            ok: true,
            total_amount: self.total_amount,
            extracted: self.extracted.clone(),
            parsed: ParsedExpense::from(&self.expense),
        }
    }
}

/// Pre-tax amount derived from the upload size and jitter
pub fn base_amount(content_len: usize, jitter: f64) -> i64 {
    ((content_len % 1500) as f64 + 500.0 + jitter).round() as i64
}

/// Tax owed on a pre-tax amount
pub fn tax_for(base: i64) -> i64 {
    (base as f64 * TAX_RATE_PERCENT as f64 / 100.0).round() as i64
}

/// Format an amount with Indian digit grouping (1,23,456)
pub fn format_inr(amount: i64) -> String {
    amount.to_formatted_string(&Locale::en_IN)
}

/// Whether `existing` looks like the same invoice uploaded again
fn is_recent_duplicate(
    existing: &ExpenseItem,
    client_name: &str,
    total: i64,
    today: NaiveDate,
) -> bool {
    existing.client_name == client_name
        && (existing.amount - total).abs() < DUPLICATE_TOLERANCE
        && existing.date > today - Duration::days(DUPLICATE_WINDOW_DAYS)
}

/// Evaluate the anomaly rules for a new invoice
pub fn detect_anomalies(
    status: PaymentStatus,
    days_pending: u32,
    total: i64,
    client_name: &str,
    ledger: &[ExpenseItem],
    today: NaiveDate,
) -> Vec<String> {
    let mut anomalies = Vec::new();

    if status == PaymentStatus::Overdue && days_pending > OVERDUE_ACTION_DAYS {
        anomalies.push(format!(
            "Invoice overdue by {} days - immediate action required",
            days_pending
        ));
    }

    if total > HIGH_VALUE_THRESHOLD {
        anomalies.push(HIGH_VALUE_ANOMALY.to_string());
    }

    if ledger
        .iter()
        .any(|e| is_recent_duplicate(e, client_name, total, today))
    {
        anomalies.push(DUPLICATE_ANOMALY.to_string());
    }

    anomalies
}

fn invoice_summary(
    client_name: &str,
    project: &str,
    total: i64,
    status: PaymentStatus,
    days_pending: u32,
    invoice_date: NaiveDate,
) -> String {
    let since = if days_pending > 0 {
        format!(" since {}", invoice_date)
    } else {
        String::new()
    };
    format!(
        "{}'s invoice for {} shows ₹{} total with {}% GST, payment {}{}",
        client_name,
        project,
        format_inr(total),
        TAX_RATE_PERCENT,
        status,
        since
    )
}

/// Simulate extraction of an uploaded invoice against the current ledger
///
/// The returned expense is not stored; the caller appends it.
pub fn simulate_invoice(
    upload: &InvoiceUpload,
    clients: &[ClientRecord],
    ledger: &[ExpenseItem],
    today: NaiveDate,
    entropy: &mut dyn InvoiceEntropy,
) -> SimulatedInvoice {
    let client_name = upload.resolved_client_name();
    let project = upload.resolved_project();

    let base = base_amount(upload.content_len, entropy.amount_jitter());
    let taxes = tax_for(base);
    let total = base + taxes;

    let invoice_date = today - Duration::days(entropy.invoice_age_days());
    let due_date = today + Duration::days(entropy.days_until_due());

    let status = entropy.payment_status();
    let days_pending = match status {
        PaymentStatus::Paid | PaymentStatus::Cancelled => 0,
        _ => entropy.days_pending(status),
    };

    let anomalies = detect_anomalies(status, days_pending, total, &client_name, ledger, today);

    let client_id = clients
        .iter()
        .find(|c| c.client_name == client_name)
        .or_else(|| clients.first())
        .map(|c| c.id.clone())
        .unwrap_or_else(|| UNKNOWN_CLIENT_ID.to_string());

    let extracted = ExtractedInvoice {
        invoice_number: Some(format!("INV-{}", entropy.invoice_suffix())),
        invoice_date: Some(invoice_date),
        due_date: Some(due_date),
        client_name: client_name.clone(),
        vendor_name: None,
        project: project.clone(),
        amount: base,
        taxes: Some(taxes),
        tax_rate: Some(TAX_RATE_PERCENT),
        payment_status: Some(status),
        days_pending: Some(days_pending),
        category: Some(InvoiceCategory::Expense),
        summary: Some(invoice_summary(
            &client_name,
            &project,
            total,
            status,
            days_pending,
            invoice_date,
        )),
        anomalies: if anomalies.is_empty() {
            None
        } else {
            Some(anomalies)
        },
    };

    let expense = ExpenseItem {
        id: uuid::Uuid::new_v4().to_string(),
        client_id,
        client_name,
        project,
        amount: total,
        date: invoice_date,
        source: ExpenseSource::Upload,
        invoice_data: Some(extracted.clone()),
    };

    SimulatedInvoice {
        total_amount: total,
        extracted,
        expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn ledger_entry(client: &str, amount: i64, date: NaiveDate) -> ExpenseItem {
        ExpenseItem {
            id: "existing".to_string(),
            client_id: "c1".to_string(),
            client_name: client.to_string(),
            project: "General".to_string(),
            amount,
            date,
            source: ExpenseSource::Upload,
            invoice_data: None,
        }
    }

    fn client(id: &str, name: &str) -> ClientRecord {
        ClientRecord {
            id: id.to_string(),
            client_name: name.to_string(),
            company: "Co".to_string(),
            contact: "x@example.com".to_string(),
            finance_category: "IT".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_base_amount_from_length_and_jitter() {
        assert_eq!(base_amount(0, 0.0), 500);
        assert_eq!(base_amount(1499, 0.0), 1999);
        // Length wraps every 1500 bytes
        assert_eq!(base_amount(1500, 0.0), 500);
        assert_eq!(base_amount(100, 250.4), 850);
        assert_eq!(base_amount(100, 250.5), 851);
    }

    #[test]
    fn test_total_is_base_plus_rounded_tax() {
        let mut entropy = RngEntropy::seeded(99);
        for len in [0usize, 17, 900, 4096, 123_456] {
            let sim = simulate_invoice(
                &InvoiceUpload::new("Acme", "Audit", len),
                &[],
                &[],
                today(),
                &mut entropy,
            );
            let base = sim.extracted.amount;
            // Half-up integer rounding of base * 18%
            assert_eq!(sim.total_amount, base + (base * 18 + 50) / 100);
            assert_eq!(sim.expense.amount, sim.total_amount);
        }
    }

    #[test]
    fn test_tax_rounding() {
        assert_eq!(tax_for(500), 90);
        // 0.18 * 1003 = 180.54
        assert_eq!(tax_for(1003), 181);
        // 0.18 * 1002 = 180.36
        assert_eq!(tax_for(1002), 180);
    }

    #[test]
    fn test_defaults_for_blank_fields() {
        let upload = InvoiceUpload {
            client_name: Some("   ".to_string()),
            project: None,
            content_len: 10,
        };
        let sim = simulate_invoice(&upload, &[], &[], today(), &mut MockEntropy::new());

        assert_eq!(sim.expense.client_name, DEFAULT_CLIENT_NAME);
        assert_eq!(sim.expense.project, DEFAULT_PROJECT);
        assert_eq!(sim.expense.client_id, UNKNOWN_CLIENT_ID);
    }

    #[test]
    fn test_client_resolution_falls_back_to_first() {
        let clients = vec![client("c1", "First"), client("c2", "Acme")];

        let matched = simulate_invoice(
            &InvoiceUpload::new("Acme", "P", 0),
            &clients,
            &[],
            today(),
            &mut MockEntropy::new(),
        );
        assert_eq!(matched.expense.client_id, "c2");

        let unmatched = simulate_invoice(
            &InvoiceUpload::new("Nobody", "P", 0),
            &clients,
            &[],
            today(),
            &mut MockEntropy::new(),
        );
        assert_eq!(unmatched.expense.client_id, "c1");
        assert_eq!(unmatched.expense.client_name, "Nobody");
    }

    #[test]
    fn test_dates_follow_entropy() {
        let mut entropy = MockEntropy::new().with_invoice_age(10);
        entropy.days_until_due = 5;
        let sim = simulate_invoice(
            &InvoiceUpload::new("Acme", "P", 0),
            &[],
            &[],
            today(),
            &mut entropy,
        );

        assert_eq!(sim.extracted.invoice_date, NaiveDate::from_ymd_opt(2024, 6, 5));
        assert_eq!(sim.extracted.due_date, NaiveDate::from_ymd_opt(2024, 6, 20));
        assert_eq!(sim.expense.date, NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
    }

    #[test]
    fn test_paid_invoice_never_pending() {
        let mut entropy = MockEntropy::new().with_status(PaymentStatus::Paid, 40);
        let sim = simulate_invoice(
            &InvoiceUpload::new("Acme", "P", 0),
            &[],
            &[],
            today(),
            &mut entropy,
        );
        assert_eq!(sim.extracted.days_pending, Some(0));
        assert!(sim.extracted.anomalies.is_none());
    }

    #[test]
    fn test_overdue_anomaly_requires_more_than_30_days() {
        let at_limit = detect_anomalies(PaymentStatus::Overdue, 30, 1000, "Acme", &[], today());
        assert!(at_limit.is_empty());

        let over = detect_anomalies(PaymentStatus::Overdue, 31, 1000, "Acme", &[], today());
        assert_eq!(
            over,
            vec!["Invoice overdue by 31 days - immediate action required".to_string()]
        );

        // Pending invoices are never flagged, however long
        assert!(detect_anomalies(PaymentStatus::Pending, 60, 1000, "Acme", &[], today()).is_empty());
    }

    #[test]
    fn test_high_value_anomaly() {
        assert!(detect_anomalies(PaymentStatus::Paid, 0, 50_000, "Acme", &[], today()).is_empty());
        assert_eq!(
            detect_anomalies(PaymentStatus::Paid, 0, 50_001, "Acme", &[], today()),
            vec![HIGH_VALUE_ANOMALY.to_string()]
        );
    }

    #[test]
    fn test_duplicate_anomaly_rules() {
        let recent = today() - Duration::days(3);
        let check = |entry: ExpenseItem, total: i64| {
            detect_anomalies(PaymentStatus::Paid, 0, total, "Acme", &[entry], today())
                .contains(&DUPLICATE_ANOMALY.to_string())
        };

        assert!(check(ledger_entry("Acme", 1000, recent), 1099));
        assert!(check(ledger_entry("Acme", 1000, recent), 901));
        // Tolerance is strict
        assert!(!check(ledger_entry("Acme", 1000, recent), 1100));
        // Different client
        assert!(!check(ledger_entry("Other", 1000, recent), 1000));
        // Window: six days ago counts, seven does not
        assert!(check(ledger_entry("Acme", 1000, today() - Duration::days(6)), 1000));
        assert!(!check(ledger_entry("Acme", 1000, today() - Duration::days(7)), 1000));
    }

    #[test]
    fn test_anomalies_accumulate() {
        let ledger = vec![ledger_entry("Acme", 60_000, today())];
        let anomalies =
            detect_anomalies(PaymentStatus::Overdue, 45, 60_050, "Acme", &ledger, today());
        assert_eq!(anomalies.len(), 3);
    }

    #[test]
    fn test_summary_text() {
        let mut entropy = MockEntropy::new()
            .with_jitter(113_700.0)
            .with_status(PaymentStatus::Pending, 12)
            .with_invoice_age(2);
        let sim = simulate_invoice(
            &InvoiceUpload::new("Acme", "Cloud", 0),
            &[],
            &[],
            today(),
            &mut entropy,
        );

        // base 114200, tax 20556, total 134756
        assert_eq!(sim.total_amount, 134_756);
        assert_eq!(
            sim.extracted.summary.as_deref(),
            Some("Acme's invoice for Cloud shows ₹1,34,756 total with 18% GST, payment pending since 2024-06-13")
        );
        assert_eq!(sim.extracted.invoice_number.as_deref(), Some("INV-TEST01"));
    }

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(590), "590");
        assert_eq!(format_inr(1_234), "1,234");
        assert_eq!(format_inr(123_456), "1,23,456");
        assert_eq!(format_inr(12_345_678), "1,23,45,678");
    }
}
