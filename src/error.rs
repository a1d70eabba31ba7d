use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No API key for the scraping proxy. Set the {} environment variable.", crate::API_KEY_VAR)]
    MissingApiKey,
    #[error("Request for {url} failed with status {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Page count has to be at least 1.")]
    InvalidPageCount,
    #[error("Couldn't build a selector from: {0}")]
    InvalidSelector(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
}
