use thiserror::Error;

/// Everything that can go wrong while resolving a city.
///
/// Variants carry owned strings rather than transport errors so an outcome
/// can be cloned and sent back from a spawned lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The search term was empty; no request was made.
    #[error("Enter city name")]
    UserInput,

    /// The provider answered with a non-success status. The message is the
    /// provider's own text, shown to the user as-is.
    #[error("{message}")]
    Provider { message: String },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The geocoder found nothing at the coordinate.
    #[error("No location details found")]
    NoResults,

    /// The response arrived but did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedParse(String),
}

impl LookupError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider { message: message.into() }
    }

    /// `NoResults` resolves to absent details; every other error ends the
    /// lookup that raised it.
    pub fn is_fatal_to_search(&self) -> bool {
        !matches!(self, Self::NoResults)
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::UnexpectedParse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::UnexpectedParse(err.to_string())
    }
}
