use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApifyError>;

#[derive(Debug, Error)]
pub enum ApifyError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("Network error talking to Apify: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Apify API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A response arrived but its body did not match the expected shape.
    #[error("Unexpected Apify response body: {0}")]
    Decode(String),

    #[error("Actor run {run_id} ended as {status}")]
    RunFailed { run_id: String, status: String },
}

impl ApifyError {
    /// HTTP status for API rejections, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApifyError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The token was missing, invalid or lacked permission for the actor.
    pub fn is_auth(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<reqwest::Error> for ApifyError {
    fn from(err: reqwest::Error) -> Self {
        // `Response::json` reports body mismatches as reqwest errors too.
        if err.is_decode() {
            ApifyError::Decode(err.to_string())
        } else {
            ApifyError::Network(err)
        }
    }
}

impl From<serde_json::Error> for ApifyError {
    fn from(err: serde_json::Error) -> Self {
        ApifyError::Decode(err.to_string())
    }
}
