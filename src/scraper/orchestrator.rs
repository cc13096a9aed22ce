use crate::scraper::listing::parse_listing;
use crate::scraper::models::ListingRecord;
use crate::scraper::session::PageFetcher;
use crate::scraper::ScrapeError;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};

/// Visit every collected detail URL in order and parse a record per page.
///
/// Failure handling is two-tier: a listing that is gone or unreadable gets
/// an all-missing record (only `source_url` kept) and the batch moves on; a
/// lost session (transport failure, or the cancel flag flipping) stops the
/// loop and whatever was accumulated is returned for the downstream stages.
/// Partial batches are always worth flushing.
pub fn crawl_listings(
    fetcher: &impl PageFetcher,
    listing_urls: &[String],
    crawled_on: NaiveDate,
    cancel: &AtomicBool,
) -> Vec<ListingRecord> {
    let mut records: Vec<ListingRecord> = Vec::with_capacity(listing_urls.len());

    for (i, url) in listing_urls.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            eprintln!(
                "🛑 {}; keeping the {} records scraped so far",
                ScrapeError::Interrupted,
                records.len()
            );
            break;
        }

        match fetcher.fetch(url) {
            Ok(html) => {
                records.push(parse_listing(&html, url, crawled_on));
            }
            Err(e) if e.is_session_lost() => {
                eprintln!("❌ Session lost ({e}); keeping the {} records scraped so far", records.len());
                break;
            }
            Err(e) => {
                // Expired or removed listing. Record the slot and move on.
                eprintln!("⚠️ Listing unavailable ({e}): {url}");
                records.push(ListingRecord::unavailable(url, crawled_on));
            }
        }

        let remaining = listing_urls.len() - i - 1;
        eprintln!("🧮 {} listings crawled over, {remaining} more left", records.len());

        if remaining > 0 {
            fetcher.pause(2, 5);
        }
    }

    records
}
