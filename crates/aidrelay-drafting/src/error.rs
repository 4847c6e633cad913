use thiserror::Error;

/// Errors from the donation platform's REST API.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("platform API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to deserialize {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from one alert's drafting attempt. Either way the alert's ledger
/// mark is rolled back so the next cycle retries it.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("no administrator or organization account available to own the draft")]
    NoEligibleCreator,

    #[error(transparent)]
    Platform(#[from] PlatformError),
}
