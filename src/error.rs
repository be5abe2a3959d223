#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error("Request error")]
    Http(#[from] reqwest::Error),
    #[error("Io error")]
    Io(#[from] std::io::Error),
    #[error("Pdf extraction error")]
    Pdf(#[from] pdf_extract::OutputError),
    #[error("Serialization error")]
    Json(#[from] serde_json::Error),
    #[error("Invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("No login form found at {0}")]
    NoLoginForm(String),
}
