// src/api/handlers/mod.rs
mod execute;
mod files;
mod health;
mod suggest;

pub use execute::{execute_code, validate_code};
pub use files::{delete_file, get_file, list_files, save_file};
pub use health::health_check;
pub use suggest::{analyze_code, get_suggestions};

use actix_web::HttpResponse;

use crate::errors::AppError;
use crate::models::ErrorResponse;

/// Map a domain error onto the API's status conventions: 400 for caller
/// mistakes, 404 for missing files, 500 otherwise.
pub(crate) fn error_response(err: &AppError) -> HttpResponse {
    let body = ErrorResponse::new(err.to_string());
    match err {
        AppError::FileNotFound(_) => HttpResponse::NotFound().json(body),
        AppError::PathOutsideWorkspace(_)
        | AppError::ExtensionNotAllowed(_)
        | AppError::NotAFile(_)
        | AppError::Config(_) => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}
