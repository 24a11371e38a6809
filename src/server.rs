/// HTTP server exposing the dashboard as JSON, plus the WebSocket endpoint
use actix_web::{middleware, web, App, Error, HttpRequest, HttpResponse, HttpServer};
use actix_web_actors::ws;
use log::info;
use std::sync::Arc;

use crate::dataset::Dataset;
use crate::pipeline::compute;
use crate::selection::{FacetOptions, FilterSelection};
use crate::websocket::{AppState, DashboardWebSocket};

/// WebSocket endpoint handler
async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let socket = DashboardWebSocket::new(Arc::clone(&state.dataset));
    ws::start(socket, &req, stream)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "rows": state.dataset.len(),
    }))
}

async fn options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(FacetOptions::from_dataset(&state.dataset))
}

/// Dashboard for the default all-values selection
async fn default_dashboard(state: web::Data<AppState>) -> HttpResponse {
    let selection = FilterSelection::all(&state.dataset);
    HttpResponse::Ok().json(compute(&state.dataset, &selection))
}

/// Dashboard for a selection posted as JSON
async fn filtered_dashboard(
    state: web::Data<AppState>,
    selection: web::Json<FilterSelection>,
) -> HttpResponse {
    HttpResponse::Ok().json(compute(&state.dataset, &selection))
}

/// Register every route on an app; shared by `run_server` and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(ws_index))
        .route("/health", web::get().to(health_check))
        .route("/api/options", web::get().to(options))
        .route("/api/dashboard", web::get().to(default_dashboard))
        .route("/api/dashboard", web::post().to(filtered_dashboard));
}

/// Start the HTTP server over a loaded dataset
pub async fn run_server(host: &str, port: u16, dataset: Arc<Dataset>) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(dataset));

    info!("Trendboard server serving '{}' ({} rows)", state.dataset.name(), state.dataset.len());
    info!("WebSocket: ws://{}:{}/ws", host, port);
    info!("Dashboard: http://{}:{}/api/dashboard", host, port);
    info!("Health check: http://{}:{}/health", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            // CORS for development
            .wrap(
                actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
