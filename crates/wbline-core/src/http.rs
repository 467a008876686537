//! Blocking HTTP facade over a shared async client.
//!
//! Uses async reqwest internally with tokio::time::timeout for the
//! per-attempt deadline, but presents a sync interface so pipeline code
//! stays sequential.

use std::sync::LazyLock;
use std::time::Duration;

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error from a single HTTP request attempt
#[derive(Debug)]
pub enum HttpError {
    /// HTTP error with optional status code
    Http {
        status: Option<u16>,
        message: String,
    },
    /// The whole attempt (connect, status check, body read) exceeded its deadline
    Timeout(Duration),
    /// Response body did not have the expected shape
    Decode(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Timeout(d) => write!(f, "request timed out after {}s", d.as_secs()),
            Self::Decode(message) => write!(f, "malformed payload: {message}"),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Create HTTP error from reqwest error
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

/// Shared tokio runtime for HTTP operations.
static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// HTTP GET returning the response body as text.
///
/// A single `deadline` covers the whole attempt; exceeding it yields
/// [`HttpError::Timeout`], and a non-2xx status yields [`HttpError::Http`]
/// with the status code.
pub fn get_text(url: &str, deadline: Duration) -> Result<String, HttpError> {
    SHARED_RUNTIME.handle().block_on(async {
        let attempt = async {
            SHARED_CLIENT
                .get(url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| HttpError::from_reqwest(&e))?
                .text()
                .await
                .map_err(|e| HttpError::from_reqwest(&e))
        };

        match tokio::time::timeout(deadline, attempt).await {
            Ok(result) => result,
            Err(_) => Err(HttpError::Timeout(deadline)),
        }
    })
}
