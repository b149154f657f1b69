use thiserror::Error;
use warp::{reject::Reject, Reply, Rejection};

use crate::llm::LlmError;
use crate::models::ErrorBody;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Message is required")]
    InvalidInput,

    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Completion service error: {0}")]
    UpstreamFailure(#[from] LlmError),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl Reject for ApiError {}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    let (code, body) = if let Some(api_err) = err.find::<ApiError>() {
        match api_err {
            ApiError::InvalidInput => (400, ErrorBody {
                error: api_err.to_string(),
                details: None,
            }),
            ApiError::MalformedBody(details) => (400, ErrorBody {
                error: "Invalid request body".to_string(),
                details: Some(details.clone()),
            }),
            ApiError::PayloadTooLarge { .. } => (413, ErrorBody {
                error: "Invalid request body".to_string(),
                details: Some(api_err.to_string()),
            }),
            ApiError::UpstreamFailure(_) => (500, ErrorBody {
                error: "Failed to process chat message".to_string(),
                details: Some(api_err.to_string()),
            }),
            ApiError::InternalError(_) => (500, ErrorBody {
                error: "Internal server error".to_string(),
                details: Some(api_err.to_string()),
            }),
        }
    } else {
        return Err(err);
    };

    let json = warp::reply::json(&body);
    let status = warp::http::StatusCode::from_u16(code)
        .unwrap_or(warp::http::StatusCode::INTERNAL_SERVER_ERROR);

    Ok(warp::reply::with_status(json, status))
}
