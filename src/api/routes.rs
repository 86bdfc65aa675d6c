// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health_check))
            .route("/files", web::get().to(handlers::list_files))
            .route("/files", web::post().to(handlers::save_file))
            .route("/files/{path:.*}", web::get().to(handlers::get_file))
            .route("/files/{path:.*}", web::delete().to(handlers::delete_file))
            .route("/execute", web::post().to(handlers::execute_code))
            .route("/validate", web::post().to(handlers::validate_code))
            .route("/suggest", web::post().to(handlers::get_suggestions))
            .route("/analyze", web::post().to(handlers::analyze_code)),
    );
}
