use std::time::Duration;

/// Default regional endpoint of the speech service.
pub const DEFAULT_ENDPOINT: &str = "https://eastus2.api.cognitive.microsoft.com";

/// Batch avatar synthesis API version the payload shape is written against.
pub const DEFAULT_API_VERSION: &str = "2024-04-15-preview";

/// Header carrying a subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Delay between two background status queries for the same job.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Upper bound on a single vendor HTTP call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How requests to the vendor are authorized.
#[derive(Clone, PartialEq, Eq)]
pub enum SpeechCredential {
    /// Static resource key sent as `Ocp-Apim-Subscription-Key`.
    SubscriptionKey(String),
    /// Pre-issued token sent as `Authorization: Bearer <token>`.
    BearerToken(String),
}

impl SpeechCredential {
    /// Header name and value to attach to every vendor request.
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Self::SubscriptionKey(key) => (SUBSCRIPTION_KEY_HEADER, key.clone()),
            Self::BearerToken(token) => ("Authorization", format!("Bearer {token}")),
        }
    }
}

// Keep secrets out of logs.
impl std::fmt::Debug for SpeechCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubscriptionKey(_) => f.write_str("SubscriptionKey(***)"),
            Self::BearerToken(_) => f.write_str("BearerToken(***)"),
        }
    }
}

/// Vendor connection settings.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Base URL, e.g. `https://eastus2.api.cognitive.microsoft.com`.
    pub endpoint: String,
    pub credential: SpeechCredential,
    pub api_version: String,
    /// Timeout applied to each outbound request.
    pub request_timeout: Duration,
    /// Sleep between background status queries.
    pub poll_interval: Duration,
}

impl SpeechConfig {
    /// Config for `endpoint` with default API version and timings.
    pub fn new(endpoint: impl Into<String>, credential: SpeechCredential) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential,
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                                       |
    /// |-----------------------|-----------------------------------------------|
    /// | `SPEECH_ENDPOINT`     | `https://eastus2.api.cognitive.microsoft.com` |
    /// | `SUBSCRIPTION_KEY`    | required unless a bearer token is set         |
    /// | `SPEECH_BEARER_TOKEN` | unset                                         |
    /// | `SPEECH_API_VERSION`  | `2024-04-15-preview`                          |
    /// | `VENDOR_TIMEOUT_SECS` | `30`                                          |
    /// | `POLL_INTERVAL_SECS`  | `5`                                           |
    pub fn from_env() -> Self {
        let endpoint = std::env::var("SPEECH_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());

        let credential = match std::env::var("SPEECH_BEARER_TOKEN") {
            Ok(token) if !token.is_empty() => SpeechCredential::BearerToken(token),
            _ => SpeechCredential::SubscriptionKey(
                std::env::var("SUBSCRIPTION_KEY")
                    .expect("SUBSCRIPTION_KEY must be set when SPEECH_BEARER_TOKEN is not"),
            ),
        };

        let api_version =
            std::env::var("SPEECH_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.into());

        let request_timeout_secs: u64 = std::env::var("VENDOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("VENDOR_TIMEOUT_SECS must be a valid u64");

        let poll_interval_secs: u64 = std::env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("POLL_INTERVAL_SECS must be a valid u64");

        Self {
            endpoint,
            credential,
            api_version,
            request_timeout: Duration::from_secs(request_timeout_secs),
            poll_interval: Duration::from_secs(poll_interval_secs),
        }
    }

    /// URL of the batch synthesis resource named `job_id`.
    pub fn job_url(&self, job_id: &str) -> String {
        format!(
            "{}/avatar/batchsyntheses/{}?api-version={}",
            self.endpoint.trim_end_matches('/'),
            job_id,
            self.api_version,
        )
    }
}
