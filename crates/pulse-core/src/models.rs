//! Domain models for Pulse
//!
//! Every type here is part of the JSON wire contract consumed by the
//! dashboard client, so field names serialize in camelCase.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Users & Clients
// ============================================================================

/// A dashboard user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// A registered client of the business
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: String,
    pub client_name: String,
    pub company: String,
    pub contact: String,
    pub finance_category: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewClient {
    pub client_name: String,
    pub company: String,
    pub contact: String,
    pub finance_category: String,
}

// ============================================================================
// Ledger
// ============================================================================

/// Where a ledger entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseSource {
    /// Simulated extraction from an uploaded invoice
    Upload,
    /// Savings adjustment recorded by an agent action
    Agent,
    System,
}

impl ExpenseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Agent => "agent",
            Self::System => "system",
        }
    }
}

/// Payment state of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accounting bucket for an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceCategory {
    Revenue,
    Expense,
    Tax,
    Outstanding,
}

/// Invoice details produced by the (simulated) OCR step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedInvoice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    pub project: String,
    /// Pre-tax amount
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes: Option<i64>,
    /// Tax rate in whole percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_pending: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<InvoiceCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomalies: Option<Vec<String>>,
}

/// A signed ledger entry
///
/// Positive amounts are spend; agent savings are recorded as negative
/// amounts in the same list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub project: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub source: ExpenseSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_data: Option<ExtractedInvoice>,
}

/// The ledger view of an uploaded invoice, returned alongside the extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedExpense {
    pub client_id: String,
    pub client_name: String,
    pub project: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub source: ExpenseSource,
}

impl From<&ExpenseItem> for ParsedExpense {
    fn from(item: &ExpenseItem) -> Self {
        Self {
            client_id: item.client_id.clone(),
            client_name: item.client_name.clone(),
            project: item.project.clone(),
            amount: item.amount,
            date: item.date,
            source: item.source,
        }
    }
}

// ============================================================================
// Alerts & Stats
// ============================================================================

/// A notification shown in the dashboard bell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertItem {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

/// Severity levels shared by waste alerts and insight cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A flagged cost inefficiency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteAlert {
    pub id: String,
    pub message: String,
    pub severity: Severity,
}

/// One point of the monthly profitability series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: i64,
}

/// Aggregate finance statistics, recomputed from the ledger on every read
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceStats {
    pub roi_percent: i64,
    pub profitability_series: Vec<SeriesPoint>,
    pub waste_alerts: Vec<WasteAlert>,
}

/// A dashboard insight derived from finance stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub action: String,
}

// ============================================================================
// API payloads
// ============================================================================

/// Login request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body (also used for failures)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginResponse {
    pub fn success(token: String, user: User) -> Self {
        Self {
            ok: true,
            token: Some(token),
            user: Some(user),
            error: None,
        }
    }

    pub fn failure(error: &str) -> Self {
        Self {
            ok: false,
            token: None,
            user: None,
            error: Some(error.to_string()),
        }
    }
}

/// Response for an invoice upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadInvoiceResponse {
    pub ok: bool,
    pub total_amount: i64,
    pub extracted: ExtractedInvoice,
    pub parsed: ParsedExpense,
}

/// Response for an agent activation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentActionResponse {
    pub success: bool,
    pub message: String,
    pub updated_stats: FinanceStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_serializes_camel_case() {
        let item = ExpenseItem {
            id: "e1".to_string(),
            client_id: "c1".to_string(),
            client_name: "Acme".to_string(),
            project: "Migration".to_string(),
            amount: -100,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            source: ExpenseSource::Agent,
            invoice_data: None,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["clientId"], "c1");
        assert_eq!(json["clientName"], "Acme");
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["source"], "agent");
        assert!(json.get("invoiceData").is_none());
    }

    #[test]
    fn test_new_client_tolerates_missing_fields() {
        let client: NewClient = serde_json::from_str(r#"{"clientName":"Acme"}"#).unwrap();
        assert_eq!(client.client_name, "Acme");
        assert!(client.company.is_empty());
    }

    #[test]
    fn test_login_failure_omits_token() {
        let json = serde_json::to_value(LoginResponse::failure("Invalid credentials")).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "Invalid credentials");
        assert!(json.get("token").is_none());
    }
}
