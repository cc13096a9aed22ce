use crate::scraper::ListingRecord;

/// Capture-time cleaning: string-level fixes applied to every record before
/// the batch snapshot is written. Typing happens later, in `normalize`.
pub fn clean_records(records: Vec<ListingRecord>) -> Vec<ListingRecord> {
    records.into_iter().map(clean_record).collect()
}

fn clean_record(mut rec: ListingRecord) -> ListingRecord {
    rec.listing_id = rec.listing_id.as_deref().map(clean_listing_id);
    rec.city = rec.city.as_deref().map(clean_city);
    rec.price = rec.price.as_deref().map(|p| p.replace('$', ""));
    rec.sqft = rec.sqft.as_deref().and_then(clean_sqft);
    rec.bedrooms = rec.bedrooms.as_deref().and_then(clean_bedrooms);
    rec.bathrooms = rec.bathrooms.as_deref().and_then(clean_bathrooms);
    rec.date_posted = rec.date_posted.as_deref().map(|d| d.replace('T', " "));
    rec.kitchen = rec.description.as_deref().map(has_kitchen);
    rec
}

fn clean_listing_id(raw: &str) -> String {
    raw.trim().trim_start_matches("post id: ").to_string()
}

/// Title-case each word and drop the parentheses the site wraps around
/// neighborhood names.
fn clean_city(raw: &str) -> String {
    raw.replace(['(', ')'], "")
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Keep the token immediately before the `ft` unit marker. Text with no
/// marker is not square-footage data at all, so it stays missing.
fn clean_sqft(raw: &str) -> Option<String> {
    let (before, _) = raw.split_once("ft")?;
    before.split_whitespace().last().map(str::to_string)
}

/// Bedrooms come from the shared `NBR / MBa` bubble: the part before the
/// slash, with the `BR` suffix stripped.
fn clean_bedrooms(raw: &str) -> Option<String> {
    if !raw.contains("BR") {
        return None;
    }
    let first = raw.trim().split('/').next()?.trim();
    let (head, _) = first.rsplit_once("BR")?;
    Some(head.trim().to_string())
}

/// Bathrooms are the bubble part after the slash, with the `Ba` suffix
/// stripped. Values like `shared` or `2.5` pass through as-is for typing.
fn clean_bathrooms(raw: &str) -> Option<String> {
    if !raw.contains("Ba") {
        return None;
    }
    let second = raw.trim().split('/').nth(1)?.trim();
    let (head, _) = second.rsplit_once("Ba")?;
    Some(head.trim().to_string())
}

/// A listing has a kitchen when the description says so and does not say
/// `no kitchen` (the negative phrase contains the positive one).
fn has_kitchen(description: &str) -> bool {
    let lower = description.to_lowercase();
    lower.contains("kitchen") && !lower.contains("no kitchen")
}
