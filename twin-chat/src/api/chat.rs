use bytes::Bytes;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;
use warp::{Rejection, Reply};

use super::AppState;
use crate::error::ApiError;
use crate::models::{ChatRequest, ChatResponse};

pub const PROFILE_UNAVAILABLE_REPLY: &str = "I'm sorry, I couldn't load my profile data. Please make sure the digitaltwin.json file is properly configured.";

pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub async fn handle_chat(
    body: Bytes,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    // Parsed here rather than by a warp body filter, so that a missing
    // content length or a non-JSON content type still gets a JSON error.
    let request = parse_request(&body).map_err(|e| {
        state.metrics.record("invalid");
        warp::reject::custom(e)
    })?;

    let message = match request.message {
        Some(Value::String(message)) if !message.is_empty() => message,
        _ => {
            state.metrics.record("invalid");
            return Err(warp::reject::custom(ApiError::InvalidInput));
        }
    };

    let request_id = Uuid::new_v4();
    info!("Processing chat [{}]: {}", request_id, message);

    // 1. Greetings never touch the profile or the completion service
    if state.greeter.is_greeting(&message) {
        let reply = {
            let mut rng = state.rng.lock().await;
            state.greeter.reply(&mut *rng)
        };
        state.metrics.record("greeting");
        return Ok(respond_with(reply));
    }

    // 2. Profile
    let documents = state.profile.load().await;
    if documents.is_empty() {
        warn!("Chat [{}]: profile data unavailable", request_id);
        state.metrics.record("no_profile");
        return Ok(respond_with(PROFILE_UNAVAILABLE_REPLY));
    }

    // 3. Retrieval + answer
    let context = state.retriever.build_context(&message, &documents);
    let outcome = if state.responder.is_offline() { "offline" } else { "completion" };

    match state.responder.respond(&message, &request.history, &context).await {
        Ok(response) => {
            state.metrics.record(outcome);
            Ok(respond_with(response))
        }
        Err(e) => {
            error!("Chat API error [{}]: {}", request_id, e);
            state.metrics.record("error");
            Err(warp::reject::custom(ApiError::from(e)))
        }
    }
}

fn parse_request(body: &[u8]) -> Result<ChatRequest, ApiError> {
    if body.len() > MAX_BODY_BYTES {
        return Err(ApiError::PayloadTooLarge { limit: MAX_BODY_BYTES });
    }
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

fn respond_with(response: impl Into<String>) -> warp::reply::Json {
    warp::reply::json(&ChatResponse { response: response.into() })
}
