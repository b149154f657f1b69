use serde::Deserialize;
use anyhow::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub profile_path: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::load(config::Environment::default().try_parsing(true))
    }

    /// Layers `source` over the built-in defaults.
    pub fn load<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let mut config: Config = config::Config::builder()
            .set_default("port", 8080)?
            .set_default("groq_base_url", "https://api.groq.com/openai/v1")?
            .set_default("groq_model", "llama-3.1-8b-instant")?
            .set_default("temperature", 0.7)?
            .set_default("max_tokens", 500)?
            .set_default("log_level", "info")?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        // An empty key means "not configured", same as an absent one.
        config.groq_api_key = config.groq_api_key.filter(|key| !key.trim().is_empty());
        config.profile_path = config.profile_path.filter(|path| !path.trim().is_empty());

        Ok(config)
    }
}
