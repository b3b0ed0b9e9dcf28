//! HTTP request handlers for the pricing simulator API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{PricingSource, ValidationIssue, calculate_quote, validate_charges, validate_thermal_modifiers};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::Quote;

use super::request::{SimulationRequest, ValidationRequest, ValidationResponse};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/simulate", post(simulate_handler))
        .route("/validate", post(validate_handler))
        .with_state(state)
}

/// Handler for POST /simulate endpoint.
///
/// Prices a scenario against a configured rate card or inline charges and
/// returns the quote.
async fn simulate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing simulation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match simulate(&request, state.config()) {
        Ok(quote) => {
            info!(
                correlation_id = %correlation_id,
                rate_card_id = quote.rate_card_id.as_deref().unwrap_or("inline"),
                line_items = quote.line_items.len(),
                subtotal = %quote.subtotal,
                total = %quote.total,
                duration_us = quote.audit_trace.duration_us,
                "Simulation completed successfully"
            );
            json_response(StatusCode::OK, quote)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Simulation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Handler for POST /validate endpoint.
///
/// Reports every authoring issue in the submitted charges and modifiers.
/// Invalid charges are a normal outcome here, so the status is always 200
/// once the body parses.
async fn validate_handler(payload: Result<Json<ValidationRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let mut issues = validate_charges(&request.charges);
    if let Err(error) = validate_thermal_modifiers(&request.thermal_modifiers) {
        issues.push(ValidationIssue::new("thermal_modifiers", &error));
    }

    info!(
        correlation_id = %correlation_id,
        charges = request.charges.len(),
        issues = issues.len(),
        "Validation completed"
    );
    json_response(StatusCode::OK, ValidationResponse::from(issues))
}

/// Resolves the pricing source for a request and calculates the quote.
fn simulate(request: &SimulationRequest, config: &ConfigLoader) -> EngineResult<Quote> {
    match (&request.rate_card_id, &request.charges) {
        (Some(_), Some(_)) => Err(EngineError::InvalidRequest {
            message: "rate_card_id and charges cannot both be provided".to_string(),
        }),
        (Some(id), None) => {
            let card = match request.on_date {
                Some(date) => config.get_effective_rate_card(id, date)?,
                None => config.get_rate_card(id)?,
            };
            Ok(calculate_quote(PricingSource::from(card), request.scenario, &request.thermal))
        }
        (None, _) => {
            let charges = request.inline_charges()?;
            let source = PricingSource {
                rate_card_id: None,
                charges: &charges,
                thermal_modifiers: &request.thermal_modifiers,
                default_thermal_profile: request.thermal_profile.as_deref(),
            };
            Ok(calculate_quote(source, request.scenario, &request.thermal))
        }
    }
}

/// Converts a JSON extraction failure into a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, error)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}
