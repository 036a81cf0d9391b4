use thiserror::Error;

/// Everything that can go wrong between reading the state code and
/// printing the report. None of these are recovered from.
#[derive(Debug, Error)]
pub enum VaccineError {
    /// The supplied state code is not one of the 51 known codes.
    #[error("Unknown state code '{0}'. Expected a two-letter uppercase code such as MA, NH or WA.")]
    InvalidInput(String),

    /// The request could not be sent or its body could not be read.
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("Request to {url} failed with status {status}: {body}")]
    Status { url: String, status: u16, body: String },

    /// The body was not valid JSON or did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Malformed response JSON")]
    Json(#[from] serde_json::Error),
}

impl VaccineError {
    /// True for transport-level failures and non-2xx responses.
    pub fn is_network(&self) -> bool {
        matches!(self, VaccineError::Transport { .. } | VaccineError::Status { .. })
    }

    /// True when the payload was unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, VaccineError::MalformedResponse(_) | VaccineError::Json(_))
    }
}

pub type Result<T, E = VaccineError> = std::result::Result<T, E>;
