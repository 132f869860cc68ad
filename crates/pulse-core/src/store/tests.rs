//! Store tests

use super::*;
use crate::agents::AgentType;
use crate::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use crate::invoice::{InvoiceUpload, MockEntropy, DUPLICATE_ANOMALY};
use crate::models::{ExpenseSource, NewClient, PaymentStatus};
use crate::stats::{DEFAULT_ROI, WASTE_MESSAGE};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn new_client(name: &str) -> NewClient {
    NewClient {
        client_name: name.to_string(),
        company: format!("{} Pvt Ltd", name),
        contact: "ops@example.com".to_string(),
        finance_category: "IT".to_string(),
    }
}

#[test]
fn test_new_store_is_empty() {
    let store = Store::with_entropy(MockEntropy::new());
    assert!(store.list_clients().unwrap().is_empty());
    assert!(store.list_expenses().unwrap().is_empty());
    assert!(store.list_alerts().unwrap().is_empty());
    assert_eq!(store.session_count().unwrap(), 0);

    let stats = store.finance_stats_on(today()).unwrap();
    assert_eq!(stats.roi_percent, DEFAULT_ROI);
}

#[test]
fn test_login_and_authenticate() {
    let store = Store::new();
    let (token, user) = store.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
    assert!(!token.is_empty());
    assert_eq!(user.id, "u1");

    assert_eq!(store.authenticate(&token).unwrap().email, DEMO_EMAIL);
    assert!(matches!(
        store.authenticate("not-a-token"),
        Err(Error::Unauthorized(_))
    ));
}

#[test]
fn test_login_rejects_bad_password() {
    let store = Store::new();
    assert!(matches!(
        store.login(DEMO_EMAIL, "wrong"),
        Err(Error::InvalidCredentials)
    ));
    assert_eq!(store.session_count().unwrap(), 0);
}

#[test]
fn test_each_login_gets_a_fresh_token() {
    let store = Store::new();
    let (a, _) = store.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
    let (b, _) = store.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
    assert_ne!(a, b);
    assert!(store.authenticate(&a).is_ok());
    assert!(store.authenticate(&b).is_ok());
}

#[test]
fn test_session_cap_evicts_oldest() {
    let store = Store::with_parts(
        SessionPolicy {
            ttl: None,
            max_sessions: 1,
        },
        Box::new(MockEntropy::new()),
    );
    let (first, _) = store.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
    let (second, _) = store.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();

    assert_eq!(store.session_count().unwrap(), 1);
    assert!(store.authenticate(&first).is_err());
    assert!(store.authenticate(&second).is_ok());
}

#[test]
fn test_add_client_appends_in_order() {
    let store = Store::new();
    let a = store.add_client(new_client("Acme")).unwrap();
    store.add_client(new_client("Globex")).unwrap();
    // Duplicates are allowed
    store.add_client(new_client("Acme")).unwrap();

    let clients = store.list_clients().unwrap();
    assert_eq!(clients.len(), 3);
    assert_eq!(clients[0].id, a.id);
    assert_eq!(clients[1].client_name, "Globex");
    assert_ne!(clients[0].id, clients[2].id);
}

#[test]
fn test_add_client_requires_name() {
    let store = Store::new();
    let result = store.add_client(new_client("   "));
    assert!(matches!(result, Err(Error::InvalidData(_))));
    assert!(store.list_clients().unwrap().is_empty());
}

#[test]
fn test_ingest_appends_to_ledger() {
    let store = Store::with_entropy(MockEntropy::new());
    let client = store.add_client(new_client("Acme")).unwrap();

    let sim = store
        .ingest_invoice_on(&InvoiceUpload::new("Acme", "Audit", 100), today())
        .unwrap();
    assert_eq!(sim.total_amount, 708); // 600 + 108

    let ledger = store.list_expenses().unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].client_id, client.id);
    assert_eq!(ledger[0].source, ExpenseSource::Upload);
    assert_eq!(ledger[0].amount, 708);
}

#[test]
fn test_second_identical_upload_flagged_as_duplicate() {
    let store = Store::with_entropy(MockEntropy::new());
    let upload = InvoiceUpload::new("Acme", "Audit", 100);

    let first = store.ingest_invoice_on(&upload, today()).unwrap();
    assert!(first.extracted.anomalies.is_none());

    let second = store.ingest_invoice_on(&upload, today()).unwrap();
    assert_eq!(
        second.extracted.anomalies,
        Some(vec![DUPLICATE_ANOMALY.to_string()])
    );
}

#[test]
fn test_license_optimizer_compounds() {
    let store = Store::with_entropy(MockEntropy::new());

    for _ in 0..3 {
        let response = store.activate_agent_on(AgentType::LicenseOptimizer, today()).unwrap();
        assert!(response.success);
        assert_eq!(response.message, "5 Unused Licenses Found and Removed");
    }

    let ledger = store.list_expenses().unwrap();
    assert_eq!(ledger.len(), 3);
    assert!(ledger.iter().all(|e| e.amount == -100 && e.source == ExpenseSource::Agent));
    assert!(ledger.iter().all(|e| e.client_id == "system" && e.date == today()));
    assert_eq!(store.list_alerts().unwrap().len(), 3);
}

#[test]
fn test_cloud_guard_uses_gross_spend() {
    let store = Store::with_entropy(MockEntropy::new().with_jitter(9500.0));
    // base 10000, total 11800
    store
        .ingest_invoice_on(&InvoiceUpload::new("Acme", "Cloud", 0), today())
        .unwrap();
    store.activate_agent_on(AgentType::LicenseOptimizer, today()).unwrap();

    store.activate_agent_on(AgentType::CloudSpendGuard, today()).unwrap();
    let ledger = store.list_expenses().unwrap();
    // 8% of 11800; the -100 saving does not reduce the base
    assert_eq!(ledger[2].amount, -944);
    assert_eq!(ledger[2].project, "Cloud Spend Reduction");
}

#[test]
fn test_sales_assistant_only_alerts() {
    let store = Store::with_entropy(MockEntropy::new());
    let response = store
        .activate_agent_on(AgentType::SalesPitchAssistant, today())
        .unwrap();

    assert_eq!(response.message, "3 New Upsell Opportunities Generated");
    assert!(store.list_expenses().unwrap().is_empty());
    let alerts = store.list_alerts().unwrap();
    assert_eq!(alerts[0].title, "Upsell Opportunities Ready");
}

#[test]
fn test_agent_response_carries_fresh_stats() {
    let store = Store::with_entropy(
        MockEntropy::new()
            .with_jitter(3000.0)
            .with_status(PaymentStatus::Pending, 10),
    );
    store
        .ingest_invoice_on(&InvoiceUpload::new("Acme", "Cloud", 0), today())
        .unwrap();

    let before = store.finance_stats_on(today()).unwrap();
    assert_eq!(before.waste_alerts.len(), 1);
    assert_eq!(before.waste_alerts[0].message, WASTE_MESSAGE);

    let response = store.activate_agent_on(AgentType::LicenseOptimizer, today()).unwrap();
    let after = store.finance_stats_on(today()).unwrap();
    assert_eq!(response.updated_stats.roi_percent, after.roi_percent);
    assert_eq!(
        response.updated_stats.profitability_series,
        after.profitability_series
    );
}

#[test]
fn test_alerts_newest_first_and_mark_read() {
    let store = Store::new();
    let older = store.push_alert("Weekly ROI Analysis Complete").unwrap();
    let newer = store.push_alert("Monthly ROI Report Ready").unwrap();

    let alerts = store.list_alerts().unwrap();
    assert_eq!(alerts[0].id, newer.id);
    assert_eq!(alerts[1].id, older.id);
    assert!(alerts.iter().all(|a| !a.read));

    assert!(store.mark_alert_read(&older.id).unwrap());
    assert!(!store.mark_alert_read("missing").unwrap());

    let alerts = store.list_alerts().unwrap();
    assert!(!alerts[0].read);
    assert!(alerts[1].read);
}

#[test]
fn test_export_csv_has_row_per_entry() {
    let store = Store::with_entropy(MockEntropy::new());
    store
        .ingest_invoice_on(&InvoiceUpload::new("Acme", "Audit", 0), today())
        .unwrap();
    store.activate_agent_on(AgentType::LicenseOptimizer, today()).unwrap();

    let csv = store.export_csv().unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with(",upload,INV-TEST01,paid"));
    assert!(lines[2].contains(",License Cleanup,-100,2024-06-15,agent,"));
}

#[test]
fn test_clones_share_state() {
    let store = Store::new();
    let handle = store.clone();
    handle.push_alert("Shared").unwrap();
    assert_eq!(store.list_alerts().unwrap().len(), 1);
}

#[test]
fn test_poisoned_store_reports_poisoned() {
    let store = Store::new();
    let (token, _) = store.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();

    let handle = store.clone();
    let _ = std::thread::spawn(move || {
        let _guard = handle.write().unwrap();
        panic!("panic while holding the store lock");
    })
    .join();

    assert!(matches!(store.authenticate(&token), Err(Error::Poisoned)));
    assert!(matches!(store.list_alerts(), Err(Error::Poisoned)));
}
