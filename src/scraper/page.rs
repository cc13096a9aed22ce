use scraper::{ElementRef, Html, Selector};

/// The site has shipped two generations of markup and scraped history spans
/// both, so every page is classified once and read through the locator table
/// for its era.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageShape {
    Legacy,
    Current,
}

/// CSS locators for one markup era. The selectors themselves are an external
/// contract owned by the site; only the table structure is ours.
pub struct LocatorTable {
    pub listing_links: &'static str,
    pub next_page: &'static str,
    pub listing_id: &'static str,
    pub price: &'static str,
    pub city: &'static str,
    pub beds_baths: &'static str,
    pub sqft: &'static str,
    pub description: &'static str,
    pub attributes: &'static str,
    pub date_posted: &'static str,
}

const LEGACY_LOCATORS: LocatorTable = LocatorTable {
    listing_links: "ul.rows li.result-row a.result-title",
    next_page: "a.button.next",
    listing_id: "p.postinginfo",
    price: "span.price",
    city: "span.postingtitletext small",
    beds_baths: "span.shared-line-bubble",
    sqft: "span.housing",
    description: "#postingbody",
    attributes: "p.attrgroup",
    date_posted: "time.date.timeago",
};

const CURRENT_LOCATORS: LocatorTable = LocatorTable {
    listing_links: "ol.cl-static-search-results li.cl-static-search-result a",
    next_page: "a.cl-next-page",
    listing_id: "p.postinginfo",
    price: "span.price",
    city: "h1.postingtitle span.area",
    beds_baths: "span.shared-line-bubble",
    sqft: "span.housing",
    description: "#postingbody",
    attributes: "p.attrgroup",
    date_posted: "time.date.timeago",
};

// Elements that only exist in the newer markup, for results and detail
// pages respectively.
const CURRENT_MARKERS: &str =
    "ol.cl-static-search-results, #search-results-page-1, h1.postingtitle span.area";

impl PageShape {
    pub fn detect(doc: &Html) -> PageShape {
        match Selector::parse(CURRENT_MARKERS) {
            Ok(sel) if doc.select(&sel).next().is_some() => PageShape::Current,
            _ => PageShape::Legacy,
        }
    }

    pub fn locators(&self) -> &'static LocatorTable {
        match self {
            PageShape::Legacy => &LEGACY_LOCATORS,
            PageShape::Current => &CURRENT_LOCATORS,
        }
    }
}

fn element_text(el: &ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Text of the first element matching `locator`, or `None` when the element
/// is absent. Absence is the expected case for many fields and is never an
/// error here; a locator that fails to parse collapses the same way.
pub fn extract(doc: &Html, locator: &str) -> Option<String> {
    let sel = Selector::parse(locator).ok()?;
    let el = doc.select(&sel).next()?;
    non_empty(element_text(&el))
}

/// Text of the *last* matching element. Attribute groups repeat per listing
/// and the amenity tags always sit in the final group.
pub fn extract_last(doc: &Html, locator: &str) -> Option<String> {
    let sel = Selector::parse(locator).ok()?;
    let el = doc.select(&sel).last()?;
    non_empty(element_text(&el))
}

/// A named attribute of the first matching element. Used where the precise
/// value lives in an attribute while the rendered text only carries a
/// relative description ("3 days ago").
pub fn extract_attr(doc: &Html, locator: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(locator).ok()?;
    let el = doc.select(&sel).next()?;
    el.value()
        .attr(attr)
        .map(str::to_string)
        .and_then(non_empty)
}

/// A named attribute of every matching element, in document order.
pub fn extract_attr_all(doc: &Html, locator: &str, attr: &str) -> Vec<String> {
    let Ok(sel) = Selector::parse(locator) else {
        return Vec::new();
    };
    doc.select(&sel)
        .filter_map(|el| el.value().attr(attr))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
