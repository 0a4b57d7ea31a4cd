use crate::server::state::BackendState;
use chrono::Local;
use log::info;
use serde_json::json;
use std::sync::{Arc, PoisonError, RwLock};
use warp::{http::StatusCode, Filter};

pub type SharedState = Arc<RwLock<BackendState>>;

/// The REST surface consumed by the dashboard, plus `/api/health`.
pub fn routes(
    state: SharedState,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    let statistics = warp::path!("api" / "statistics")
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: SharedState| {
            let guard = state.read().unwrap_or_else(PoisonError::into_inner);
            warp::reply::json(&guard.statistics())
        });

    let classifications = warp::path!("api" / "classifications")
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: SharedState| {
            let guard = state.read().unwrap_or_else(PoisonError::into_inner);
            warp::reply::json(&guard.recent())
        });

    let status = warp::path!("api" / "system" / "status")
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: SharedState| {
            let guard = state.read().unwrap_or_else(PoisonError::into_inner);
            warp::reply::json(&guard.status())
        });

    let system_info = warp::path!("api" / "system_info")
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: SharedState| {
            let guard = state.read().unwrap_or_else(PoisonError::into_inner);
            warp::reply::json(&guard.system_info())
        });

    let classify_now = warp::path!("api" / "classify_now")
        .and(warp::get().or(warp::post()).unify())
        .and(state_filter)
        .map(|state: SharedState| {
            let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
            let response = guard.classify(Local::now().naive_local());
            let code = match &response.result {
                Some(result) if response.success => {
                    info!(
                        "classified {} ({:.1}%)",
                        result.system_class,
                        result.confidence * 100.0
                    );
                    StatusCode::OK
                }
                _ => {
                    info!("classification failed: {:?}", response.error);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            warp::reply::with_status(warp::reply::json(&response), code)
        });

    let health = warp::path!("api" / "health").and(warp::get()).map(|| {
        warp::reply::json(&json!({
            "status": "healthy",
            "timestamp": Local::now().to_rfc3339(),
        }))
    });

    statistics
        .or(classifications)
        .or(status)
        .or(system_info)
        .or(classify_now)
        .or(health)
        .with(warp::log("simulator"))
}
