//! Random sources for invoice simulation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::PaymentStatus;

use super::InvoiceEntropy;

const INVOICE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Upper bound (exclusive) on the amount jitter
pub const MAX_AMOUNT_JITTER: f64 = 3000.0;

/// Upper bound (exclusive) on invoice age and due-date offsets, in days
pub const MAX_DATE_OFFSET_DAYS: i64 = 30;

/// Entropy backed by any `rand` generator
pub struct RngEntropy<R> {
    rng: R,
}

impl<R: Rng> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngEntropy<StdRng> {
    /// OS-seeded generator for production use
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator for tests and reproducible simulations
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send + Sync> InvoiceEntropy for RngEntropy<R> {
    fn amount_jitter(&mut self) -> f64 {
        self.rng.gen_range(0.0..MAX_AMOUNT_JITTER)
    }

    fn invoice_age_days(&mut self) -> i64 {
        self.rng.gen_range(0..MAX_DATE_OFFSET_DAYS)
    }

    fn days_until_due(&mut self) -> i64 {
        self.rng.gen_range(0..MAX_DATE_OFFSET_DAYS)
    }

    fn payment_status(&mut self) -> PaymentStatus {
        match self.rng.gen_range(0..3) {
            0 => PaymentStatus::Paid,
            1 => PaymentStatus::Pending,
            _ => PaymentStatus::Overdue,
        }
    }

    fn days_pending(&mut self, status: PaymentStatus) -> u32 {
        match status {
            PaymentStatus::Pending => self.rng.gen_range(5..35),
            PaymentStatus::Overdue => self.rng.gen_range(10..70),
            PaymentStatus::Paid | PaymentStatus::Cancelled => 0,
        }
    }

    fn invoice_suffix(&mut self) -> String {
        (0..6)
            .map(|_| INVOICE_CHARSET[self.rng.gen_range(0..INVOICE_CHARSET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_entropy_is_reproducible() {
        let mut a = RngEntropy::seeded(7);
        let mut b = RngEntropy::seeded(7);
        for _ in 0..10 {
            assert_eq!(a.amount_jitter(), b.amount_jitter());
            assert_eq!(a.invoice_suffix(), b.invoice_suffix());
        }
    }

    #[test]
    fn test_values_stay_in_range() {
        let mut entropy = RngEntropy::seeded(42);
        for _ in 0..500 {
            let jitter = entropy.amount_jitter();
            assert!((0.0..MAX_AMOUNT_JITTER).contains(&jitter));
            assert!((0..30).contains(&entropy.invoice_age_days()));
            assert!((0..30).contains(&entropy.days_until_due()));
            assert!((5..35).contains(&entropy.days_pending(PaymentStatus::Pending)));
            assert!((10..70).contains(&entropy.days_pending(PaymentStatus::Overdue)));
            assert_eq!(entropy.days_pending(PaymentStatus::Paid), 0);

            let suffix = entropy.invoice_suffix();
            assert_eq!(suffix.len(), 6);
            assert!(suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }
}
