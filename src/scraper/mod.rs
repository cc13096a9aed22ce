mod listing;
mod models;
mod orchestrator;
mod page;
mod scrape_error;
mod session;
mod walker;

pub use listing::parse_listing;
pub use models::{save_records_debug, CrawlBatch, ListingRecord};
pub use orchestrator::crawl_listings;
pub use page::PageShape;
pub use scrape_error::ScrapeError;
pub use session::{HttpSession, PageFetcher};
pub use walker::collect_listing_urls;
