use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use studio_core::calculations::common::format_inr_range;
use studio_core::validation::estimate::sanitize;
use studio_core::validation::phone::validate_phone_lead;
use studio_core::{
    ContactPayload, EstimatePayload, InquiryForm, PhoneLeadPayload, SubmissionOutcome,
};
use tracing::{error, info};

use super::error::ApiError;
use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub min_cost: u64,
    pub max_cost: u64,
    /// Human-readable range, e.g. `₹29,25,000 – ₹35,75,000`.
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct PhoneLeadResponse {
    pub success: bool,
    pub e164: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn submit_quick_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    submit_contact(&state, InquiryForm::Quick, payload?.0).await
}

pub async fn submit_project_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    submit_contact(&state, InquiryForm::Project, payload?.0).await
}

async fn submit_contact(
    state: &AppState,
    form: InquiryForm,
    payload: ContactPayload,
) -> Result<Json<SuccessResponse>, ApiError> {
    // The pipeline has already logged storage and notification failures.
    match state.pipeline.submit(form, &payload).await {
        SubmissionOutcome::Accepted(_) => Ok(Json(SuccessResponse { success: true })),
        SubmissionOutcome::Rejected(errors) => Err(errors.into()),
        SubmissionOutcome::Failed(_) => Err(ApiError::Internal),
    }
}

pub async fn estimate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EstimatePayload>, JsonRejection>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let request = sanitize(&payload?.0)?;
    let result = state.estimator.estimate(&request);

    Ok(Json(EstimateResponse {
        min_cost: result.min_cost,
        max_cost: result.max_cost,
        display: format_inr_range(result.min_cost, result.max_cost),
    }))
}

pub async fn capture_phone_lead(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PhoneLeadPayload>, JsonRejection>,
) -> Result<Json<PhoneLeadResponse>, ApiError> {
    let lead = validate_phone_lead(&payload?.0)?;

    let stored = state
        .repository
        .create_phone_lead(lead)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to store phone lead");
            ApiError::Internal
        })?;

    info!(id = stored.id, country = %stored.country, "phone lead captured");
    Ok(Json(PhoneLeadResponse {
        success: true,
        e164: stored.e164,
    }))
}
