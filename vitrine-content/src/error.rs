use thiserror::Error;

/// Errors produced by the content query layer.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("http transport failure: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode query response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("query rejected with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("query returned no result")]
    MissingResult,

    #[error("invalid content configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ContentError>;
