// src/api/handlers/execute.rs
use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::error_response;
use crate::api::AppState;
use crate::exec::{self, ExecutionMode, RunResult};
use crate::models::ErrorResponse;
use crate::suggest;

#[derive(Deserialize)]
pub struct ExecuteRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub mode: ExecutionMode,
}

#[derive(Serialize)]
pub struct ExecuteResponse {
    pub success: bool,
    pub id: String,
    pub result: RunResult,
    /// Advisory only: attached when the run failed, never part of the
    /// execution result itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

pub async fn execute_code(
    state: web::Data<AppState>,
    req: web::Json<ExecuteRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    if req.code.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new("Code is required")));
    }

    let run_id = Uuid::new_v4().to_string();
    log::info!("run {}: executing {} bytes of code", run_id, req.code.len());

    let result = state.executor.execute_in_mode(&req.code, req.mode).await;

    let suggestions = if result.is_failure() {
        let error_text = result.error.clone().unwrap_or_default();
        match suggest::error_fixes(state.llm.as_ref(), &req.code, &error_text).await {
            Ok(fixes) => Some(fixes),
            Err(e) => {
                // collaborator failures degrade; they never fail the run
                log::warn!("run {}: suggestion provider failed: {}", run_id, e);
                Some(vec![format!("Suggestions unavailable: {}", e)])
            }
        }
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(ExecuteResponse {
        success: true,
        id: run_id,
        result,
        suggestions,
    }))
}

#[derive(Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub code: String,
}

pub async fn validate_code(req: web::Json<ValidateRequest>) -> Result<HttpResponse> {
    let req = req.into_inner();
    match exec::validate(&req.code) {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "result": result }))),
        Err(e) => {
            log::error!("validator failed: {}", e);
            Ok(error_response(&e))
        }
    }
}
