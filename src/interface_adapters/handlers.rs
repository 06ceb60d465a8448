use crate::domain::{GatewayError, HealthReport, PatchPrompt, Plan, Refinement};
use crate::interface_adapters::protocol::{
    ErrorResponse, PlanRequest, QuickEditRequest, RefineRequest,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{
    GeneratePlanUseCase, HealthCheckUseCase, QuickEditUseCase, RefinePromptUseCase,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

// Handler for configuration readiness; never calls upstream.
#[tracing::instrument(name = "health", skip_all)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthReport>) {
    let use_case = HealthCheckUseCase {
        provider: state.completion.clone(),
    };
    let report = use_case.execute();

    let status = if report.ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

#[tracing::instrument(name = "generate_plan", skip_all)]
pub async fn generate_plan(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Plan>, Response> {
    let body: PlanRequest = parse_body(payload)?;

    let use_case = GeneratePlanUseCase {
        provider: state.completion.clone(),
    };
    let plan = use_case.execute(body).await.map_err(map_gateway_error)?;

    tracing::info!(steps = plan.checklist.len(), "plan generated.");
    Ok(Json(plan))
}

#[tracing::instrument(name = "refine_prompt", skip_all)]
pub async fn refine_prompt(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Refinement>, Response> {
    let body: RefineRequest = parse_body(payload)?;

    let use_case = RefinePromptUseCase {
        provider: state.completion.clone(),
    };
    let refinement = use_case.execute(body).await.map_err(map_gateway_error)?;

    tracing::info!(
        reasons = refinement.reasons_for_changes.len(),
        checks = refinement.additional_checks.len(),
        "prompt refined."
    );
    Ok(Json(refinement))
}

#[tracing::instrument(name = "quick_edit", skip_all)]
pub async fn quick_edit(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PatchPrompt>, Response> {
    let body: QuickEditRequest = parse_body(payload)?;

    let use_case = QuickEditUseCase {
        provider: state.completion.clone(),
    };
    let patch = use_case.execute(body).await.map_err(map_gateway_error)?;

    tracing::info!("quick edit prompt produced.");
    Ok(Json(patch))
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, code: &'static str, message: String) -> Response {
    (status, Json(ErrorResponse { code, message })).into_response()
}

// Maps the gateway taxonomy to HTTP statuses.
fn map_gateway_error(err: GatewayError) -> Response {
    let status = match &err {
        GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
        GatewayError::KeyInvalid => StatusCode::UNAUTHORIZED,
        GatewayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        GatewayError::Server => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::warn!(code = err.code(), %status, "request failed.");
    error_response(status, err.code(), err.to_string())
}

// Oversized bodies keep the transport's 413; every other body problem is a bad request.
fn reject_body(rejection: JsonRejection) -> Response {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("request body over limit.");
        return rejection.into_response();
    }
    map_gateway_error(GatewayError::BadRequest(format!(
        "invalid JSON body: {}",
        rejection.body_text()
    )))
}

// Derived struct deserializers also accept arrays, so the object check comes first.
fn parse_body<T>(payload: Result<Json<Value>, JsonRejection>) -> Result<T, Response>
where
    T: DeserializeOwned,
{
    let Json(value) = payload.map_err(reject_body)?;
    if !value.is_object() {
        return Err(map_gateway_error(GatewayError::BadRequest(
            "request body must be a JSON object".to_string(),
        )));
    }
    serde_json::from_value(value).map_err(|err| {
        map_gateway_error(GatewayError::BadRequest(format!("invalid JSON body: {err}")))
    })
}
