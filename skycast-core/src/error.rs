use thiserror::Error;

/// Failures of a single weather fetch. Each call is one attempt: no retries,
/// no caching.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connectivity problem before a response arrived.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expect.
    #[error("could not decode weather response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Upstream answered with a non-2xx status. Covers "city not found" as
    /// well; we do not distinguish it from other upstream rejections.
    #[error("weather service returned {status}: {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Failures reported by the platform location tracker.
///
/// The two denial variants are the possible outcomes of a permission prompt;
/// the rest are provider failures outside the permission flow.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location permission permanently denied")]
    PermissionDeniedPermanently,

    #[error("location service unavailable")]
    ServiceUnavailable,

    #[error("location error: {0}")]
    Other(String),
}
