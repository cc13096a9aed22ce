use crate::scraper::models::ListingRecord;
use crate::scraper::page::{self, PageShape};
use chrono::NaiveDate;
use scraper::Html;

/// Read every tracked field off a listing detail page. Each field is an
/// independent lookup and any subset may come back missing; as long as the
/// page itself loaded, a record is always produced.
///
/// Bedrooms and bathrooms share one source element (the `3BR / 2Ba` bubble);
/// both capture the full bubble text and the normalizer splits them apart.
pub fn parse_listing(html: &str, url: &str, crawled_on: NaiveDate) -> ListingRecord {
    let doc = Html::parse_document(html);
    let loc = PageShape::detect(&doc).locators();

    ListingRecord {
        source_url: url.to_string(),
        listing_id: page::extract(&doc, loc.listing_id),
        city: page::extract(&doc, loc.city),
        price: page::extract(&doc, loc.price),
        bedrooms: page::extract(&doc, loc.beds_baths),
        bathrooms: page::extract(&doc, loc.beds_baths),
        sqft: page::extract(&doc, loc.sqft),
        description: page::extract(&doc, loc.description),
        attributes: page::extract_last(&doc, loc.attributes),
        date_posted: page::extract_attr(&doc, loc.date_posted, "datetime"),
        kitchen: None,
        date_of_webcrawler: crawled_on,
    }
}
