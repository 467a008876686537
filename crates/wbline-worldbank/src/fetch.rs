//! Indicator fetching with bounded retry

use wbline_core::http::{self, HttpError};
use wbline_core::retry::RetryPolicy;

use crate::api;
use crate::config::Config;
use crate::transform::{self, IndicatorRow};

/// All retry attempts exhausted for one indicator.
///
/// Carries the indicator code and the last underlying cause so a failed
/// run names what broke.
#[derive(Debug)]
pub struct FetchError {
    pub indicator: String,
    pub attempts: u32,
    pub source: HttpError,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to fetch {} after {} attempt(s): {}",
            self.indicator, self.attempts, self.source
        )
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Fetch one indicator series and flatten it into rows.
///
/// A single attempt covers the GET, the envelope parse, and the flatten;
/// any attempt failure (network, timeout, non-2xx, malformed payload) is
/// retried with linear backoff until `config.max_retries` attempts are
/// exhausted.
pub fn fetch_indicator(config: &Config, code: &str) -> Result<Vec<IndicatorRow>, FetchError> {
    let url = api::indicator_url(&config.base_url, code, config.per_page);
    let policy = RetryPolicy {
        max_attempts: config.max_retries.max(1),
        ..RetryPolicy::default()
    };

    policy
        .run(code, |_attempt| {
            let body = http::get_text(&url, config.request_timeout)?;
            let (page_info, observations) =
                api::parse_envelope(&body).map_err(|e| HttpError::Decode(e.to_string()))?;

            if page_info.pages > 1 {
                log::warn!(
                    "{code}: API reports {} pages ({} observations total), only page {} was fetched",
                    page_info.pages,
                    page_info.total,
                    page_info.page
                );
            }

            Ok(transform::flatten(observations.unwrap_or_default()))
        })
        .map_err(|source| FetchError {
            indicator: code.to_string(),
            attempts: policy.max_attempts,
            source,
        })
}
