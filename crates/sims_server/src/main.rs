//! HTTP API over a decoded neighborhood snapshot.
//!
//! The snapshot is built completely before the listener starts serving and
//! is never mutated afterwards, so every handler reads a consistent model.
//!
//! Endpoints:
//! - `GET /api/sims` - all playable sims
//! - `GET /api/sims/{id}/compatibility` - ranked conversation partners
//! - `GET /api/sims/{id}/portrait` - portrait image (BMP)
//! - `GET /api/families` - all real households
//! - `GET /health` - liveness

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde_json::{Value as JsonValue, json};
use sims_core::Neighborhood;
use sims_core::compatibility::rank_compatibility;
use sims_core::model::{Family, Sim};
use sims_core::neighborhood::UNASSIGNED_FAMILY_ID;
use sims_render::{compatibility_to_json, family_of, family_to_json, sim_to_json};
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// UserData directory holding Neighborhood.iff and Characters/.
    #[arg(long, value_name = "DIR", default_value = "UserData")]
    userdata: PathBuf,
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

/// Immutable snapshot shared by all handlers. Sims and families are already
/// filtered down to playable households: the unassigned family holds NPCs
/// (maid, thief, repairman) that are not meaningful conversation partners.
struct AppState {
    sims: Vec<Sim>,
    families: Vec<Family>,
    portraits: BTreeMap<i16, Vec<u8>>,
}

impl AppState {
    fn from_neighborhood(neighborhood: &Neighborhood) -> Self {
        let portraits = neighborhood.portraits_by_sim_id();
        let sims: Vec<Sim> = neighborhood
            .sims
            .iter()
            .filter(|sim| sim.family_id != UNASSIGNED_FAMILY_ID)
            .cloned()
            .collect();
        let families: Vec<Family> = neighborhood
            .families
            .iter()
            .filter(|family| i32::from(family.chunk_id) != UNASSIGNED_FAMILY_ID)
            .cloned()
            .collect();

        Self {
            sims,
            families,
            portraits,
        }
    }

    fn sim_by_id(&self, id: i16) -> Option<&Sim> {
        self.sims.iter().find(|sim| sim.id == id)
    }

    fn sim_json(&self, sim: &Sim) -> JsonValue {
        sim_to_json(sim, family_of(&self.families, sim))
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let neighborhood = Neighborhood::load(&cli.userdata).unwrap_or_else(|e| {
        log::error!("failed to load {}: {e}", cli.userdata.display());
        process::exit(1);
    });
    let state = Arc::new(AppState::from_neighborhood(&neighborhood));
    log::info!(
        "loaded {} sims, {} families, {} portraits",
        state.sims.len(),
        state.families.len(),
        state.portraits.len()
    );

    let app = Router::new()
        .route("/api/sims", get(get_sims))
        .route("/api/sims/:sim_id/compatibility", get(get_compatibility))
        .route("/api/sims/:sim_id/portrait", get(get_portrait))
        .route("/api/families", get(get_families))
        .route("/health", get(health_check))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], cli.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("failed to bind {addr}: {e}");
            process::exit(1);
        }
    };
    log::info!("serving on http://{addr}");

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("server error: {e}");
        process::exit(1);
    }
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_sims(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sims: Vec<JsonValue> = state.sims.iter().map(|sim| state.sim_json(sim)).collect();
    Json(json!({ "sims": sims }))
}

async fn get_compatibility(
    State(state): State<Arc<AppState>>,
    Path(sim_id): Path<i16>,
) -> Response {
    let Some(sim) = state.sim_by_id(sim_id) else {
        return not_found(format!("Sim with id {sim_id} not found"));
    };

    let rankings: Vec<JsonValue> = rank_compatibility(sim, &state.sims)
        .iter()
        .map(|ranking| {
            let candidate = state
                .sim_by_id(ranking.sim_id)
                .map(|other| state.sim_json(other))
                .unwrap_or(JsonValue::Null);
            compatibility_to_json(ranking, candidate)
        })
        .collect();

    Json(json!({ "sim_id": sim_id, "rankings": rankings })).into_response()
}

async fn get_portrait(State(state): State<Arc<AppState>>, Path(sim_id): Path<i16>) -> Response {
    match state.portraits.get(&sim_id) {
        Some(bytes) => ([(header::CONTENT_TYPE, "image/bmp")], bytes.clone()).into_response(),
        None => not_found("No portrait available".to_string()),
    }
}

async fn get_families(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let families: Vec<JsonValue> = state.families.iter().map(family_to_json).collect();
    Json(json!({ "families": families }))
}

fn not_found(detail: String) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
}
