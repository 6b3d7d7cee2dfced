use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Why an album page produced no record.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AlbumError {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("no title meta tag")]
    MissingTitle,

    #[error("title {0:?} is not \"<title>, by <artist>\"")]
    MalformedTitle(String),

    #[error("no datePublished meta tag")]
    MissingDate,

    #[error("unparseable release date {0:?}")]
    BadDate(String),
}

impl From<FetchError> for AlbumError {
    fn from(e: FetchError) -> Self {
        AlbumError::Fetch(e.to_string())
    }
}
