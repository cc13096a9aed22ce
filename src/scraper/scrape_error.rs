use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ScrapeError {
    Network(String),
    Http { status: u16, url: String },
    Interrupted,
}

impl ScrapeError {
    /// Session-level failures abort the whole batch. Everything else is
    /// scoped to the single page being visited.
    pub fn is_session_lost(&self) -> bool {
        matches!(self, ScrapeError::Network(_) | ScrapeError::Interrupted)
    }

    pub fn from_request(err: reqwest::Error, url: &str) -> Self {
        match err.status() {
            Some(status) => ScrapeError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            },
            None => ScrapeError::Network(err.to_string()),
        }
    }
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::Network(msg) => write!(f, "Network error: {msg}"),
            ScrapeError::Http { status, url } => write!(f, "HTTP {status} for {url}"),
            ScrapeError::Interrupted => write!(f, "Crawl interrupted by user"),
        }
    }
}

impl Error for ScrapeError {}
