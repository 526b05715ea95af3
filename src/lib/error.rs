use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    #[error("Failed to reach feature server: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },
    #[error("Feature server answered with HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Feature server response is not a feature collection: {0}")]
    MalformedPayload(String),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize preview: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("No zoning district services known for {county}, {state}")]
    NoSearchResults { state: String, county: String },
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
}
