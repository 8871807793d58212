use thiserror::Error;

/// Failure taxonomy for the fetch/normalize pipeline.
///
/// `Transport` and `Status` on the combined OpenWeather endpoint trigger the
/// split-pair fallback inside the source; everywhere else they surface to the
/// user as a network/API error line.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Geocoding produced no candidate for the requested city. Surfaced
    /// directly, no fallback is attempted.
    #[error("no match found for '{0}'")]
    NotFound(String),

    /// Network-level failure: timeout, connection refused, body read error.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("{endpoint} responded with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// A 2xx body that does not match the expected payload shape.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl WeatherError {
    pub fn transport(endpoint: &'static str, source: reqwest::Error) -> Self {
        WeatherError::Transport { endpoint, source }
    }

    pub fn status(endpoint: &'static str, status: reqwest::StatusCode, body: &str) -> Self {
        WeatherError::Status { endpoint, status, body: truncate_body(body) }
    }

    pub fn decode(endpoint: &'static str, source: serde_json::Error) -> Self {
        WeatherError::Decode { endpoint, source }
    }

    /// True for failures the CLI reports as "Network/API error".
    pub fn is_network(&self) -> bool {
        matches!(self, WeatherError::Transport { .. } | WeatherError::Status { .. })
    }
}

/// Keep error messages readable when an endpoint returns a large body.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
