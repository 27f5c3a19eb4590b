//! Environment-driven configuration, loaded once at startup.

pub const DEFAULT_MODEL: &str = "text-davinci-003";
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/completions";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub port: u16,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// `OPENAI_API_KEY` is required; its absence is a fatal configuration
    /// error. `OPENAI_MODEL`, `OPENAI_API_URL` and `PORT` fall back to
    /// defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("Missing required environment variable: OPENAI_API_KEY"))?;

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_url =
            std::env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self { api_key, model, api_url, port })
    }
}
