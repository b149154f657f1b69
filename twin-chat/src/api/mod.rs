use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::sync::Mutex;
use warp::{Filter, Rejection, Reply};

use crate::agents::greeter::GreeterAgent;
use crate::agents::responder::ResponderAgent;
use crate::agents::retriever::RetrieverAgent;
use crate::error::{handle_rejection, ApiError};
use crate::metrics::Metrics;
use crate::middleware;
use crate::profile::ProfileSource;

mod chat;

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub profile: ProfileSource,
    pub retriever: Arc<RetrieverAgent>,
    pub greeter: Arc<GreeterAgent>,
    pub responder: Arc<ResponderAgent>,
    pub rng: Arc<Mutex<StdRng>>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(profile: ProfileSource, responder: ResponderAgent, rng: StdRng, metrics: Metrics) -> Self {
        Self {
            profile,
            retriever: Arc::new(RetrieverAgent::default()),
            greeter: Arc::new(GreeterAgent::new()),
            responder: Arc::new(responder),
            rng: Arc::new(Mutex::new(rng)),
            metrics,
        }
    }
}

pub fn routes(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let api = warp::path("api");

    api
        .and(warp::path("chat"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::bytes())
        .and(with_state(state))
        .and_then(chat::handle_chat)
}

/// API routes plus health and metrics, with error recovery, logging and CORS.
pub fn service(
    state: AppState,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({"status": "healthy"})));

    let metrics = warp::path("metrics")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handle_metrics);

    health
        .or(metrics)
        .or(routes(state))
        .recover(handle_rejection)
        .with(warp::log("api"))
        .with(middleware::cors())
}

async fn handle_metrics(state: AppState) -> Result<impl Reply, Rejection> {
    let (buffer, content_type) = state
        .metrics
        .render()
        .map_err(|e| warp::reject::custom(ApiError::InternalError(e.to_string())))?;

    Ok(warp::reply::with_header(buffer, "Content-Type", content_type))
}

fn with_state(
    state: AppState,
) -> impl Filter<Extract = (AppState,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}
