use warp::Filter;

/// Headers a browser `fetch` to the chat endpoint may send.
const CHAT_REQUEST_HEADERS: [&str; 3] = ["content-type", "accept", "x-requested-with"];

/// Seconds a browser may cache the preflight answer.
const PREFLIGHT_MAX_AGE: u32 = 600;

/// The chat page is served from its own origin, so every route allows
/// cross-origin reads and the JSON POST preflight.
pub fn cors() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_headers(CHAT_REQUEST_HEADERS)
        .allow_methods(["GET", "POST"])
        .max_age(PREFLIGHT_MAX_AGE)
}
