//! HTTP request handlers for the Shift Planner API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::ShiftPattern;
use crate::scheduling::{PlanRequest, apply_plan, preview_plan, validate};
use crate::store::ShiftQuery;

use super::request::{ClosedDatesQuery, PatternRequest, ShiftPlanRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/patterns/validate", post(validate_handler))
        .route("/patterns/preview", post(preview_handler))
        .route("/patterns/apply", post(apply_handler))
        .route("/shifts", get(list_shifts_handler))
        .route("/venues/:venue_id/closed-dates", get(closed_dates_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON body rejection to an API error, logging it under the
/// request's correlation id.
fn json_rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
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
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection_response(rejection: QueryRejection, correlation_id: Uuid) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    ApiErrorResponse::bad_request(ApiError::invalid_query(body_text)).into_response()
}

/// Handler for POST /patterns/validate.
///
/// Always answers 200 with the validation report so forms can render
/// per-field errors.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PatternRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let pattern: ShiftPattern = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let report = validate(&pattern, state.policy());
    info!(
        correlation_id = %correlation_id,
        valid = report.valid,
        issues = report.errors.len(),
        "Validated shift pattern"
    );
    json_ok(report)
}

/// Handler for POST /patterns/preview.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftPlanRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing plan preview request");

    let request: PlanRequest = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    match preview_plan(&request, state.closures(), state.policy()).await {
        Ok(result) => json_ok(result),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Plan preview failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /patterns/apply.
async fn apply_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftPlanRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing plan apply request");

    let request: PlanRequest = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match apply_plan(&request, state.store(), state.closures(), state.policy()).await {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                team_member_id = %request.team_member_id,
                venue_id = %request.venue_id,
                inserted = result.totals.inserted,
                duration_us = start_time.elapsed().as_micros(),
                "Plan applied successfully"
            );
            json_ok(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                retryable = err.is_retryable(),
                "Plan apply failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /shifts.
async fn list_shifts_handler(
    State(state): State<AppState>,
    query: Result<Query<ShiftQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(rejection, correlation_id),
    };

    match state.store().list_shifts(&query).await {
        Ok(shifts) => {
            info!(
                correlation_id = %correlation_id,
                count = shifts.len(),
                "Listed shifts"
            );
            json_ok(shifts)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Listing shifts failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /venues/{venue_id}/closed-dates.
async fn closed_dates_handler(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
    query: Result<Query<ClosedDatesQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let ClosedDatesQuery { from, to } = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(rejection, correlation_id),
    };
    if from > to {
        return ApiErrorResponse::bad_request(ApiError::validation_error(format!(
            "from {} must be on or before to {}",
            from, to
        )))
        .into_response();
    }

    match state.closures().closed_dates(&venue_id, from, to).await {
        Ok(dates) => json_ok(dates.into_iter().collect::<Vec<NaiveDate>>()),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                venue_id = %venue_id,
                error = %err,
                "Closure lookup failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::PlanResult;
    use crate::scheduling::ValidationReport;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::in_memory(config)
    }

    fn plan_body(days: &[i32], start_time: &str, end_time: &str) -> String {
        serde_json::json!({
            "team_member_id": "tm_1",
            "venue_id": "venue_city",
            "pattern": {
                "days": days,
                "start_time": start_time,
                "end_time": end_time,
                "start_date": "2025-01-06",
                "end_date": "2025-01-19"
            }
        })
        .to_string()
    }

    async fn post(router: Router, uri: &str, body: String) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_validate_returns_report_for_invalid_pattern() {
        let router = create_router(create_test_state());
        let body = serde_json::json!({
            "days": [],
            "start_time": "18:00",
            "end_time": "10:00",
            "start_date": "2025-01-06",
            "end_date": "2025-01-19"
        })
        .to_string();

        let (status, bytes) = post(router, "/patterns/validate", body).await;
        assert_eq!(status, StatusCode::OK);

        let report: ValidationReport = serde_json::from_slice(&bytes).unwrap();
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
    }

    #[tokio::test]
    async fn test_preview_returns_plan_without_writing() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let (status, bytes) = post(router, "/patterns/preview", plan_body(&[1, 3, 5], "10:00", "18:00")).await;
        assert_eq!(status, StatusCode::OK);

        let result: PlanResult = serde_json::from_slice(&bytes).unwrap();
        assert!(result.dry_run);
        assert_eq!(result.shifts.len(), 6);

        let stored = state.store().list_shifts(&ShiftQuery::default()).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_apply_invalid_pattern_returns_422() {
        let router = create_router(create_test_state());

        let (status, bytes) = post(router, "/patterns/apply", plan_body(&[1], "18:00", "10:00")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.issues[0].field, "start_time");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let (status, bytes) = post(router, "/patterns/apply", "{invalid json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_closed_dates_rejects_inverted_range() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/venues/venue_city/closed-dates?from=2025-02-01&to=2025-01-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_shifts_rejects_bad_date() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/shifts?from=yesterday")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_QUERY");
    }
}
