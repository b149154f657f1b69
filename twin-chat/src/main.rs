use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

mod agents;
mod api;
mod config;
mod error;
mod llm;
mod metrics;
mod middleware;
mod models;
mod profile;

use agents::responder::{CompletionSettings, ResponderAgent};
use llm::{CompletionClient, GroqClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level))
        )
        .json()
        .init();

    info!("Starting CatheTwin chat service");

    // Completion client (absent key = offline templated replies)
    let client: Option<Arc<dyn CompletionClient>> = match &config.groq_api_key {
        Some(key) => {
            info!("Completion service: {} via {}", config.groq_model, config.groq_base_url);
            Some(Arc::new(GroqClient::new(&config.groq_base_url, key)) as Arc<dyn CompletionClient>)
        }
        None => {
            warn!("GROQ_API_KEY not set, answering from profile templates only");
            None
        }
    };

    let settings = CompletionSettings {
        model: config.groq_model.clone(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };

    let profile = profile::ProfileSource::from_config(config.profile_path.as_deref());
    info!("Profile candidates: {:?}", profile.candidates());

    let state = api::AppState::new(
        profile,
        ResponderAgent::new(client, settings),
        StdRng::from_entropy(),
        metrics::Metrics::new()?,
    );

    let routes = api::service(state);

    // Start server
    let addr = ([0, 0, 0, 0], config.port);
    info!("Server listening on {}", addr.1);

    warp::serve(routes)
        .run(addr)
        .await;

    Ok(())
}
