//! HTTP API server for the dashboard UI.
//!
//! Exposes the turn API and the data read/write APIs as REST endpoints. The
//! single agent session sits behind a mutex, which also enforces the
//! one-in-flight-turn rule.

use super::build_store;
use crate::agent::{AgentSession, ToolExecutor};
use crate::cli::Output;
use crate::config::Settings;
use crate::store::{Doctor, HospitalStore, Patient};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    session: Mutex<AgentSession>,
    store: Arc<dyn HospitalStore>,
}

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    let store = build_store(&settings);
    let executor = ToolExecutor::new(Arc::clone(&store));
    let session = AgentSession::new(executor, &settings.agent);

    let state = Arc::new(AppState {
        session: Mutex::new(session),
        store,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/reset", post(reset))
        .route("/patients", get(list_patients))
        .route("/doctors", get(list_doctors).post(add_doctor))
        .route("/stats", get(stats))
        .layer(cors)
        .with_state(state);

    let host = host.unwrap_or(settings.server.host);
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Medika API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Chat turn", "POST /chat");
    Output::kv("Reset session", "POST /reset");
    Output::kv("List patients", "GET  /patients");
    Output::kv("List doctors", "GET  /doctors");
    Output::kv("Add doctor", "POST /doctors");
    Output::kv("Dashboard stats", "GET  /stats");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Deserialize)]
struct AddDoctorRequest {
    name: String,
    specialty: String,
    schedule: String,
}

#[derive(Serialize)]
struct PatientListResponse {
    patients: Vec<Patient>,
    total: usize,
}

#[derive(Serialize)]
struct DoctorListResponse {
    doctors: Vec<Doctor>,
    total: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    match session.submit(&req.message).await {
        Ok(turn) => Json(turn).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn reset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    match session.reset() {
        Ok(()) => Json(serde_json::json!({ "status": "ok" })).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn list_patients(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_patients().await {
        Ok(patients) => Json(PatientListResponse {
            total: patients.len(),
            patients,
        })
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn list_doctors(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_doctors().await {
        Ok(doctors) => Json(DoctorListResponse {
            total: doctors.len(),
            doctors,
        })
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn add_doctor(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddDoctorRequest>,
) -> impl IntoResponse {
    match state
        .store
        .add_doctor(&req.name, &req.specialty, &req.schedule)
        .await
    {
        Ok(doctor) => (StatusCode::CREATED, Json(doctor)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.dashboard_stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}
