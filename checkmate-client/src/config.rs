//! Client configuration

/// Development default when no environment override is present
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding the API host
const BASE_URL_ENV: &str = "CHECKMATE_API_URL";

/// Client configuration for connecting to the CheckMate backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Receipt-parse timeout in seconds; OCR parsing is slow, so this is
    /// much longer than the general timeout
    pub parse_timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            parse_timeout: 120,
        }
    }

    /// Resolve the base URL from `CHECKMATE_API_URL` (via `.env` when
    /// present) with a development default
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the receipt-parse timeout
    pub fn with_parse_timeout(mut self, seconds: u64) -> Self {
        self.parse_timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
