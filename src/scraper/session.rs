use crate::scraper::ScrapeError;
use rand::Rng;
use reqwest::blocking::Client;
use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Page retrieval seam. The walker and the orchestrator only ever see this
/// trait, so tests can drive them with canned HTML instead of a live site.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError>;

    /// Bounded randomized delay between navigations. Rate limiting, not
    /// correctness; fakes override it to nothing.
    fn pause(&self, lo: u64, hi: u64) {
        polite_pause(lo, hi);
    }
}

/// The one browser-like resource of a batch: a blocking HTTP client with a
/// fixed user agent and a bounded per-request timeout. All navigation in a
/// run goes through a single session, serially.
pub struct HttpSession {
    client: Client,
}

impl HttpSession {
    pub fn new(download_delay_secs: u64) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(download_delay_secs))
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpSession {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScrapeError::from_request(e, url))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.text().map_err(|e| ScrapeError::Network(e.to_string()))
    }
}

/// Sleep for a pseudo-random number of seconds in `[lo, hi)`, so request
/// timing stays irregular between navigations.
pub fn polite_pause(lo: u64, hi: u64) {
    let secs = rand::thread_rng().gen_range(lo..hi);
    std::thread::sleep(Duration::from_secs(secs));
}
