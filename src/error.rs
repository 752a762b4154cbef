use reqwest::StatusCode;
use thiserror::Error;

/// Failures while exchanging account credentials for a session credential.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("login rejected with status code {status}: {body:?}")]
    Status { status: StatusCode, body: String },

    #[error("malformed login response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("login response is missing {0}")]
    MissingCredential(&'static str),

    #[error("expected exactly one Token header in login response, got {0}")]
    TokenHeader(usize),

    #[error("Token header in login response is not valid UTF-8")]
    InvalidTokenHeader,
}

/// Failures while posting the rendered message to the destination channel.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("post request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("post rejected with status code {status}: {body:?}")]
    Status { status: StatusCode, body: String },
}

/// Anything that can fail during a single notification delivery.
///
/// All variants are terminal for the current invocation. The caller decides
/// whether to re-invoke delivery for the batch later.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("template expansion failed: {0}")]
    Template(#[source] anyhow::Error),

    #[error("cannot deliver an empty alert batch")]
    EmptyBatch,
}
