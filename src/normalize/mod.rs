mod clean;
pub mod indicators;

pub use clean::clean_records;

use crate::scraper::ListingRecord;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// A listing after typing and indicator expansion, ready for the store.
/// `indicators` is positionally parallel to `indicators::INDICATOR_RULES`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedListing {
    pub listing_id: String,
    pub region: String,
    pub sub_region: String,
    pub city: Option<String>,
    pub price: i64,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<f64>,
    pub sqft: Option<i64>,
    pub kitchen: bool,
    pub attributes: Option<String>,
    pub date_of_webcrawler: NaiveDate,
    pub date_posted: Option<NaiveDateTime>,
    pub indicators: Vec<bool>,
}

impl NormalizedListing {
    /// Name-based indicator lookup, mainly for tests and spot checks.
    pub fn indicator(&self, name: &str) -> Option<bool> {
        indicators::rule_index(name).map(|i| self.indicators[i])
    }
}

/// Turn capture-cleaned records into typed rows. Price is the analysis
/// target, so a record whose price is missing or unusable is dropped
/// outright, as is one with no listing id to key on; every other field
/// degrades to NULL/false instead. The batch is then deduplicated by
/// listing id, keeping the last occurrence seen.
pub fn normalize(
    records: &[ListingRecord],
    region: &str,
    sub_region: &str,
) -> Vec<NormalizedListing> {
    let mut rows: Vec<NormalizedListing> = Vec::with_capacity(records.len());

    for rec in records {
        let Some(listing_id) = rec.listing_id.as_deref().filter(|id| !id.is_empty()) else {
            continue;
        };
        let Some(price) = parse_price(rec.price.as_deref()) else {
            continue;
        };

        rows.push(NormalizedListing {
            listing_id: listing_id.to_string(),
            region: region.to_string(),
            sub_region: sub_region.to_string(),
            city: rec.city.clone(),
            price,
            bedrooms: parse_bedrooms(rec.bedrooms.as_deref(), rec.description.as_deref()),
            bathrooms: parse_bathrooms(rec.bathrooms.as_deref()),
            sqft: parse_sqft(rec.sqft.as_deref()),
            kitchen: rec.kitchen.unwrap_or(false),
            attributes: rec.attributes.clone(),
            date_of_webcrawler: rec.date_of_webcrawler,
            date_posted: parse_date_posted(rec.date_posted.as_deref()),
            indicators: indicators::expand(rec.attributes.as_deref(), rec.description.as_deref()),
        });
    }

    dedup_keep_last(rows)
}

/// Currency text to a positive integer. Commas and any stray dollar sign
/// are stripped first; text carrying a sqft marker is a mis-posted listing,
/// not a price.
fn parse_price(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if raw.contains("ft2") {
        return None;
    }
    let digits = raw.replace(['$', ','], "");
    match digits.parse::<i64>() {
        Ok(price) if price > 0 => Some(price),
        _ => None,
    }
}

/// Bedroom count. A trailing `+` is an open-ended claim and stays missing
/// rather than being guessed; a studio mention in the description stands in
/// for an explicit zero when the count itself is unparseable.
fn parse_bedrooms(raw: Option<&str>, description: Option<&str>) -> Option<i64> {
    if let Some(s) = raw {
        let s = s.trim();
        if s.contains('+') {
            return None;
        }
        if let Ok(n) = s.parse::<i64>() {
            return Some(n);
        }
    }
    if mentions_studio(description) {
        return Some(0);
    }
    None
}

fn mentions_studio(description: Option<&str>) -> bool {
    description
        .map(|d| d.to_lowercase().contains("studio"))
        .unwrap_or(false)
}

/// Bathroom count. `shared`/`split` both mean one usable bathroom; a
/// trailing `+` stays missing.
fn parse_bathrooms(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim().to_lowercase();
    if s.contains("shared") || s.contains("split") {
        return Some(1.0);
    }
    if s.contains('+') {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Square footage from the capture-cleaned token, discarding any non-digit
/// remainder. Nothing numeric left means missing, never zero.
fn parse_sqft(raw: Option<&str>) -> Option<i64> {
    let digits: String = raw?.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok()
}

/// Posting timestamps arrive as `YYYY-MM-DD HH:MM:SS` with an optional
/// trailing zone offset; the local wall-clock part is what gets stored.
fn parse_date_posted(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?.trim();
    let head = raw.get(..19)?;
    NaiveDateTime::parse_from_str(head, "%Y-%m-%d %H:%M:%S").ok()
}

/// Within a batch the last record seen for a listing id supersedes earlier
/// ones; order is otherwise preserved.
fn dedup_keep_last(rows: Vec<NormalizedListing>) -> Vec<NormalizedListing> {
    let mut last_index: HashMap<String, usize> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        last_index.insert(row.listing_id.clone(), i);
    }
    rows.into_iter()
        .enumerate()
        .filter(|(i, row)| last_index[&row.listing_id] == *i)
        .map(|(_, row)| row)
        .collect()
}
