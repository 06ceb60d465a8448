use std::{env, fmt, net::IpAddr};
use url::Url;

pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

// Immutable runtime configuration, read once at startup and passed down explicitly.
#[derive(Clone)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    pub api_key: Option<String>,
    pub model: String,
    pub openai_base_url: String,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    // Empty values count as unset so `OPENAI_API_KEY=` behaves like a missing key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = var("HOST")
            .and_then(|value| value.parse().ok())
            .unwrap_or(IpAddr::from([127, 0, 0, 1]));
        let port = var("PORT")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let openai_base_url = match var("OPENAI_BASE_URL") {
            Some(raw) => parse_base_url(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "invalid OPENAI_BASE_URL; using default.");
                DEFAULT_OPENAI_BASE_URL.to_string()
            }),
            None => DEFAULT_OPENAI_BASE_URL.to_string(),
        };

        Self {
            host,
            port,
            api_key: var("OPENAI_API_KEY"),
            model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url,
        }
    }
}

// Only absolute http(s) URLs are accepted as the upstream base.
fn parse_base_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| raw.trim_end_matches('/').to_string())
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("openai_base_url", &self.openai_base_url)
            .finish()
    }
}
