use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::broadcast};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use tracing::{error, info};

use crate::{
    city::Structure,
    engine::Engine,
    model::SimulationInput,
    neo::NeoRecord,
    orchestrator::ImpactorIdentity,
    report::SimulationReport,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<Mutex<Engine>>,
    broadcaster: broadcast::Sender<String>,
    candidates: Arc<Vec<NeoRecord>>,
}

pub struct WebServerConfig {
    pub engine: Engine,
    pub candidates: Vec<NeoRecord>,
    pub host: String,
    pub port: u16,
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        engine,
        candidates,
        host,
        port,
    } = config;

    let (tx, _) = broadcast::channel::<String>(512);
    let scenario_name = engine.scenario_name().to_string();
    let state = AppState {
        engine: Arc::new(Mutex::new(engine)),
        broadcaster: tx,
        candidates: Arc::new(candidates),
    };

    let router = router(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;
    info!(%addr, scenario = %scenario_name, "simulation API listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/simulate", post(simulate))
        .route("/api/state", get(latest_state))
        .route("/api/structures", get(structures))
        .route("/api/candidates", get(candidates))
        .route("/api/events", get(stream_events))
        .with_state(state)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down simulation API");
}

#[derive(Debug, Deserialize)]
struct SimulateRequest {
    diameter_m: f64,
    velocity_km_s: f64,
    angle_deg: f64,
    name: Option<String>,
    #[serde(default)]
    synthetic: bool,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

async fn simulate(
    State(state): State<AppState>,
    Json(request): Json<SimulateRequest>,
) -> Response {
    let input =
        match SimulationInput::new(request.diameter_m, request.velocity_km_s, request.angle_deg) {
            Ok(input) => input,
            Err(err) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        };
    let impactor = match request.name {
        Some(name) => ImpactorIdentity {
            name,
            synthetic: request.synthetic,
        },
        None => ImpactorIdentity::custom(),
    };

    // Runs write report files; keep them off the async workers.
    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || -> Result<SimulationReport> {
        let mut engine = engine
            .lock()
            .map_err(|_| anyhow::anyhow!("engine lock poisoned"))?;
        engine.run(&input, &impactor)
    })
    .await;

    match result {
        Ok(Ok(report)) => {
            if let Ok(payload) = serde_json::to_string(&report) {
                let _ = state.broadcaster.send(payload);
            }
            Json(report).into_response()
        }
        Ok(Err(err)) => {
            error!(error = %err, "simulation run failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}"))
        }
        Err(err) => {
            error!(error = %err, "simulation task panicked");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

async fn latest_state(State(state): State<AppState>) -> Json<Option<SimulationReport>> {
    let latest = state
        .engine
        .lock()
        .ok()
        .and_then(|engine| engine.latest().cloned());
    Json(latest)
}

async fn structures(State(state): State<AppState>) -> Json<Vec<Structure>> {
    let structures = state
        .engine
        .lock()
        .map(|engine| engine.city().structures().to_vec())
        .unwrap_or_default();
    Json(structures)
}

async fn candidates(State(state): State<AppState>) -> Json<Vec<NeoRecord>> {
    Json(state.candidates.as_ref().clone())
}

async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(payload) => Some(Ok(Event::default().data(payload))),
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}
