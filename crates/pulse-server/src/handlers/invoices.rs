//! Invoice upload handler

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use pulse_core::invoice::InvoiceUpload;
use pulse_core::models::UploadInvoiceResponse;

use crate::{AppError, AppState, MAX_UPLOAD_SIZE};

/// Whether a declared upload content type is accepted
///
/// PDFs, images and untyped binaries are accepted.
pub fn is_accepted_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    essence == "application/pdf"
        || essence == "application/octet-stream"
        || essence.starts_with("image/")
}

fn blank_to_none(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// POST /api/upload-invoice - Simulate extraction of an uploaded invoice
///
/// Expects multipart form with:
/// - file: PDF or image (optional, max 5MB; a missing file counts as empty)
/// - clientName: client the invoice belongs to (optional, defaults to "Unknown")
/// - project: project name (optional, defaults to "General")
pub async fn upload_invoice(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadInvoiceResponse>, AppError> {
    let mut upload = InvoiceUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(&format!("Failed to read form field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                if let Some(content_type) = field.content_type() {
                    if !is_accepted_content_type(content_type) {
                        return Err(AppError::bad_request(&format!(
                            "Unsupported file type: {}",
                            content_type
                        )));
                    }
                }

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::bad_request("Failed to read file data"))?;

                if bytes.len() > MAX_UPLOAD_SIZE {
                    return Err(AppError::bad_request(&format!(
                        "File too large. Maximum size is {} MB",
                        MAX_UPLOAD_SIZE / 1024 / 1024
                    )));
                }

                upload.content_len = bytes.len();
            }
            "clientName" => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| AppError::bad_request("Failed to read clientName"))?;
                upload.client_name = blank_to_none(value);
            }
            "project" => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| AppError::bad_request("Failed to read project"))?;
                upload.project = blank_to_none(value);
            }
            _ => {}
        }
    }

    let simulated = state.store.ingest_invoice(&upload)?;
    info!(
        "Invoice {} ingested: {} total for {}",
        simulated.extracted.invoice_number.as_deref().unwrap_or("-"),
        simulated.total_amount,
        simulated.expense.client_name
    );

    Ok(Json(simulated.to_response()))
}
