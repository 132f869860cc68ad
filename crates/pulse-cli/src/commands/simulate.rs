//! Invoice simulation command

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use pulse_core::invoice::{format_inr, InvoiceUpload, RngEntropy};
use pulse_core::models::UploadInvoiceResponse;
use pulse_core::Store;

/// Run one invoice through the simulator against an empty ledger
pub fn simulate_file(
    file: Option<&Path>,
    client: Option<&str>,
    project: Option<&str>,
    seed: Option<u64>,
) -> Result<UploadInvoiceResponse> {
    let content_len = match file {
        Some(path) => {
            let metadata = std::fs::metadata(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            usize::try_from(metadata.len()).context("File too large")?
        }
        None => 0,
    };
    debug!(content_len, seeded = seed.is_some(), "Simulating invoice");

    let entropy = match seed {
        Some(seed) => RngEntropy::seeded(seed),
        None => RngEntropy::from_entropy(),
    };
    let store = Store::with_entropy(entropy);

    let upload = InvoiceUpload {
        client_name: client.map(str::to_string),
        project: project.map(str::to_string),
        content_len,
    };
    let simulated = store.ingest_invoice(&upload)?;
    Ok(simulated.to_response())
}

pub fn cmd_simulate(
    file: Option<&Path>,
    client: Option<&str>,
    project: Option<&str>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let response = simulate_file(file, client, project, seed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let extracted = &response.extracted;
    println!(
        "🧾 {}",
        extracted.invoice_number.as_deref().unwrap_or("(no number)")
    );
    println!("   Client:  {}", extracted.client_name);
    println!("   Project: {}", extracted.project);
    println!(
        "   Amount:  ₹{} + ₹{} GST = ₹{}",
        format_inr(extracted.amount),
        format_inr(extracted.taxes.unwrap_or(0)),
        format_inr(response.total_amount)
    );
    if let Some(status) = extracted.payment_status {
        println!(
            "   Status:  {} ({} days pending)",
            status,
            extracted.days_pending.unwrap_or(0)
        );
    }
    if let Some(summary) = &extracted.summary {
        println!();
        println!("   {}", summary);
    }
    if let Some(anomalies) = &extracted.anomalies {
        println!();
        for anomaly in anomalies {
            println!("   ⚠️  {}", anomaly);
        }
    }

    Ok(())
}
