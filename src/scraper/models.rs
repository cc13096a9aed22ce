use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;

/// One scraped rental listing, exactly as captured from its detail page.
/// `None` marks a field whose source element was absent, which is routine
/// (optional amenities, expired posts) and distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    pub source_url: String,
    pub listing_id: Option<String>,
    pub city: Option<String>,
    pub price: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub sqft: Option<String>,
    pub description: Option<String>,
    pub attributes: Option<String>,
    pub date_posted: Option<String>,
    /// Derived from the description during capture cleaning; `None` until
    /// then, and for records whose description never loaded.
    pub kitchen: Option<bool>,
    pub date_of_webcrawler: NaiveDate,
}

impl ListingRecord {
    /// Placeholder for a listing that disappeared or stopped responding
    /// before it could be read. Keeps the batch aligned with its URL list.
    pub fn unavailable(url: &str, crawled_on: NaiveDate) -> Self {
        ListingRecord {
            source_url: url.to_string(),
            listing_id: None,
            city: None,
            price: None,
            bedrooms: None,
            bathrooms: None,
            sqft: None,
            description: None,
            attributes: None,
            date_posted: None,
            kitchen: None,
            date_of_webcrawler: crawled_on,
        }
    }
}

/// Dump the raw batch as pretty JSON for eyeballing a run.
pub fn save_records_debug(records: &[ListingRecord], filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

/// The unit of work for one invocation: search parameters in, collected
/// URLs and records out. Discarded once its records are persisted.
pub struct CrawlBatch {
    pub region: String,
    pub subregion: String,
    pub min_price: u32,
    pub max_price: u32,
    pub start_url: String,
    pub listing_urls: Vec<String>,
    pub records: Vec<ListingRecord>,
}
