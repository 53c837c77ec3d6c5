//! Error type shared by every stage of the pipeline.
//!
//! Nothing in the pipeline catches or retries these: the first error a stage
//! returns travels unchanged up to `main` and ends the run.

use thiserror::Error;

/// Everything that can abort a run.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure talking to the search provider or the model.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered, but not with a success status.
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The remote service answered 2xx with a body we could not use.
    #[error("malformed response from {service}: {reason}")]
    MalformedResponse {
        service: &'static str,
        reason: String,
    },

    /// A credential or endpoint was not present in the environment when a
    /// client needed it.
    #[error("missing configuration value: {0}")]
    MissingCredential(&'static str),

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
