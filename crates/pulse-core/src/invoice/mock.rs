//! Scripted entropy for testing
//!
//! Returns the same configured values on every call so tests can pin the
//! amount, dates and payment status of a simulated invoice.

use crate::models::PaymentStatus;

use super::InvoiceEntropy;

#[derive(Debug, Clone)]
pub struct MockEntropy {
    pub jitter: f64,
    pub invoice_age_days: i64,
    pub days_until_due: i64,
    pub status: PaymentStatus,
    pub days_pending: u32,
    pub suffix: String,
}

impl Default for MockEntropy {
    fn default() -> Self {
        Self {
            jitter: 0.0,
            invoice_age_days: 0,
            days_until_due: 14,
            status: PaymentStatus::Paid,
            days_pending: 0,
            suffix: "TEST01".to_string(),
        }
    }
}

impl MockEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_status(mut self, status: PaymentStatus, days_pending: u32) -> Self {
        self.status = status;
        self.days_pending = days_pending;
        self
    }

    pub fn with_invoice_age(mut self, days: i64) -> Self {
        self.invoice_age_days = days;
        self
    }
}

impl InvoiceEntropy for MockEntropy {
    fn amount_jitter(&mut self) -> f64 {
        self.jitter
    }

    fn invoice_age_days(&mut self) -> i64 {
        self.invoice_age_days
    }

    fn days_until_due(&mut self) -> i64 {
        self.days_until_due
    }

    fn payment_status(&mut self) -> PaymentStatus {
        self.status
    }

    fn days_pending(&mut self, _status: PaymentStatus) -> u32 {
        self.days_pending
    }

    fn invoice_suffix(&mut self) -> String {
        self.suffix.clone()
    }
}
