// src/api/handlers/suggest.rs
use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use serde_json::json;

use super::error_response;
use crate::api::AppState;
use crate::models::ErrorResponse;
use crate::suggest;

#[derive(Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub code: String,
}

pub async fn get_suggestions(
    state: web::Data<AppState>,
    req: web::Json<SuggestRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    if req.code.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new("Code is required")));
    }

    match suggest::code_suggestions(state.llm.as_ref(), &req.code, &req.context).await {
        Ok(suggestions) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "suggestions": suggestions })))
        }
        Err(e) => {
            log::error!("suggestion request failed: {}", e);
            Ok(error_response(&e))
        }
    }
}

pub async fn analyze_code(
    state: web::Data<AppState>,
    req: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    if req.code.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new("Code is required")));
    }

    match suggest::analyze(state.llm.as_ref(), &req.code).await {
        Ok(analysis) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "analysis": analysis,
            "summary": "Code analysis completed"
        }))),
        Err(e) => {
            log::error!("analysis request failed: {}", e);
            Ok(error_response(&e))
        }
    }
}
