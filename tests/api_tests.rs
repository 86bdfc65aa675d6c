// tests/api_tests.rs
use actix_web::{test, web, App};

use sandpad::api::{configure_routes, AppState};
use sandpad::config::AppConfig;

fn python_available() -> bool {
    std::process::Command::new("python3")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// The TempDir must outlive the state, so both are handed back together.
fn test_state() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.workspace_dir = dir.path().to_string_lossy().into_owned();
    let state = AppState::new(config).unwrap();
    (dir, state)
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let (_dir, state) = test_state();
    let app = test_app!(state);
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_rt::test]
async fn test_validate_endpoint_flags_syntax_error() {
    let (_dir, state) = test_state();
    let app = test_app!(state);
    let req = test::TestRequest::post()
        .uri("/api/validate")
        .set_json(serde_json::json!({ "code": "def f(:\n  pass" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["result"]["valid"], false);
    assert_eq!(body["result"]["line"], 1);
}

#[actix_rt::test]
async fn test_validate_endpoint_accepts_valid_code() {
    let (_dir, state) = test_state();
    let app = test_app!(state);
    let req = test::TestRequest::post()
        .uri("/api/validate")
        .set_json(serde_json::json!({ "code": "print('ok')" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["result"]["valid"], true);
}

#[actix_rt::test]
async fn test_execute_endpoint_requires_code() {
    let (_dir, state) = test_state();
    let app = test_app!(state);
    let req = test::TestRequest::post()
        .uri("/api/execute")
        .set_json(serde_json::json!({ "code": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_execute_endpoint_runs_code() {
    if !python_available() {
        return;
    }
    let (_dir, state) = test_state();
    let app = test_app!(state);
    let req = test::TestRequest::post()
        .uri("/api/execute")
        .set_json(serde_json::json!({ "code": "print('hi')" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["result"]["error_kind"], "none");
    assert_eq!(body["result"]["exit_code"], 0);
    assert!(body["result"]["stdout"].as_str().unwrap().contains("hi"));
    // successful runs carry no suggestions
    assert!(body.get("suggestions").is_none());
}

#[actix_rt::test]
async fn test_file_endpoints_roundtrip() {
    let (_dir, state) = test_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/files")
        .set_json(serde_json::json!({ "path": "demo.py", "content": "print(1)\n" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);

    let req = test::TestRequest::get().uri("/api/files").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = body["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"demo.py"));

    let req = test::TestRequest::get().uri("/api/files/demo.py").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["content"], "print(1)\n");

    let req = test::TestRequest::delete()
        .uri("/api/files/demo.py")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/files/demo.py").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_file_endpoint_rejects_bad_extension() {
    let (_dir, state) = test_state();
    let app = test_app!(state);
    let req = test::TestRequest::post()
        .uri("/api/files")
        .set_json(serde_json::json!({ "path": "payload.exe", "content": "MZ" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
