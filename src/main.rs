use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use rust_embed::RustEmbed;
use std::borrow::Cow;

use sandpad::api::{configure_routes, AppState};
use sandpad::banner;
use sandpad::config::AppConfig;

#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Print the startup banner
    banner::print_banner();

    // Load .env file when present; environment variables win either way
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  No .env file loaded: {}", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::load().expect("Failed to load application configuration");

    let state = AppState::new(config.clone()).expect("Failed to initialize application state");

    println!("🚀 Starting sandpad...");
    println!("📁 Workspace: {}", state.workspace.root().display());
    println!("🤖 Ollama API: {}", config.ollama.api_base);
    println!("🤖 Model: {}", config.ollama.model);
    println!("🐍 Interpreter: {}", config.python_bin);
    println!("🌐 Server will be available at: http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
            .route("/{_:.*}", web::get().to(static_file_handler))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

async fn static_file_handler(req: HttpRequest) -> impl Responder {
    let path = if req.path() == "/" {
        "index.html"
    } else {
        // trim leading '/'
        &req.path()[1..]
    };

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(Cow::into_owned(content.data))
        }
        None => HttpResponse::NotFound().body("404 Not Found"),
    }
}
