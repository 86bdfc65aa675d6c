// src/api/handlers/files.rs
use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use serde_json::json;

use super::error_response;
use crate::api::AppState;
use crate::models::ErrorResponse;

#[derive(Deserialize)]
pub struct SaveFileRequest {
    pub path: String,
    #[serde(default)]
    pub content: String,
}

pub async fn list_files(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.workspace.list_files() {
        Ok(files) => Ok(HttpResponse::Ok().json(json!({ "success": true, "files": files }))),
        Err(e) => {
            log::error!("failed to list workspace files: {}", e);
            Ok(error_response(&e))
        }
    }
}

pub async fn save_file(
    state: web::Data<AppState>,
    req: web::Json<SaveFileRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    if req.path.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new("File path is required")));
    }

    match state.workspace.save_file(&req.path, &req.content) {
        Ok(()) => Ok(HttpResponse::Ok()
            .json(json!({ "success": true, "message": "File saved successfully" }))),
        Err(e) => {
            log::warn!("failed to save {}: {}", req.path, e);
            Ok(error_response(&e))
        }
    }
}

pub async fn get_file(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let rel = path.into_inner();
    match state.workspace.read_file(&rel) {
        Ok(content) => Ok(HttpResponse::Ok().json(json!({ "success": true, "content": content }))),
        Err(e) => {
            log::warn!("failed to read {}: {}", rel, e);
            Ok(error_response(&e))
        }
    }
}

pub async fn delete_file(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let rel = path.into_inner();
    match state.workspace.delete_file(&rel) {
        Ok(()) => Ok(HttpResponse::Ok()
            .json(json!({ "success": true, "message": "File deleted successfully" }))),
        Err(e) => {
            log::warn!("failed to delete {}: {}", rel, e);
            Ok(error_response(&e))
        }
    }
}
