use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("http request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("control service answered {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("api key is not configured")]
    MissingCredential,

    #[error("api key is not a valid header value")]
    InvalidCredential,

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid cloud config: {0}")]
    InvalidConfig(String),
}
