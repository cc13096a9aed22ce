use crate::scraper::{PageFetcher, ScrapeError};
use std::collections::HashMap;

/// Canned response for one URL of a fake crawl session.
pub enum FakePage {
    Html(String),
    /// Listing-level failure: the post is gone.
    Gone,
    /// Session-level failure: the transport is lost.
    Dead,
}

pub struct FakeSession {
    pages: HashMap<String, FakePage>,
}

impl FakeSession {
    pub fn new(pages: Vec<(String, FakePage)>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
        }
    }
}

impl PageFetcher for FakeSession {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        match self.pages.get(url) {
            Some(FakePage::Html(body)) => Ok(body.clone()),
            Some(FakePage::Gone) => Err(ScrapeError::Http {
                status: 404,
                url: url.to_string(),
            }),
            Some(FakePage::Dead) | None => {
                Err(ScrapeError::Network("connection reset by peer".to_string()))
            }
        }
    }

    fn pause(&self, _lo: u64, _hi: u64) {}
}

pub fn detail_urls(n: usize, offset: usize) -> Vec<String> {
    (offset..offset + n)
        .map(|i| format!("https://sfbay.craigslist.org/pen/apa/d/listing/74000{i:05}.html"))
        .collect()
}

/// A legacy-era results page listing `links`, with an optional next control.
pub fn results_page(links: &[String], next_href: Option<&str>) -> String {
    let items: String = links
        .iter()
        .map(|href| {
            format!(r#"<li class="result-row"><a class="result-title" href="{href}">listing</a></li>"#)
        })
        .collect();
    let next = next_href
        .map(|href| format!(r#"<a class="button next" href="{href}">next &gt;</a>"#))
        .unwrap_or_default();
    format!(r#"<html><body><ul class="rows">{items}</ul>{next}</body></html>"#)
}

/// A legacy-era detail page with every tracked field present.
pub fn legacy_detail_page(id: &str, price: &str, city: &str, posted: &str) -> String {
    format!(
        r#"<html><body><section>
        <h1><span class="postingtitletext">{price} / 2br <small>({city})</small></span></h1>
        <span class="price">{price}</span>
        <span class="shared-line-bubble">2BR / 1Ba</span>
        <span class="housing">2br - 1040ft2</span>
        <section id="postingbody">Sunny unit with full kitchen and dishwasher.</section>
        <p class="attrgroup">2BR / 1Ba</p>
        <p class="attrgroup">apartment - cats are OK - purrr - w/d in unit - no smoking</p>
        <p class="postinginfo">post id: {id}</p>
        <time class="date timeago" datetime="{posted}">a while ago</time>
        </section></body></html>"#
    )
}

/// A current-era detail page; the city moved into the title's area span.
pub fn current_detail_page(id: &str, price: &str, city: &str, posted: &str) -> String {
    format!(
        r#"<html><body><section>
        <h1 class="postingtitle"><span class="price">{price}</span> <span class="area">({city})</span></h1>
        <span class="shared-line-bubble">1BR / shared Ba</span>
        <span class="housing">1br - 560ft2</span>
        <section id="postingbody">Cozy townhouse room, no kitchen access.</section>
        <p class="attrgroup">1BR / shared Ba</p>
        <p class="attrgroup">townhouse - dogs are OK - wooof - laundry on site</p>
        <p class="postinginfo">post id: {id}</p>
        <time class="date timeago" datetime="{posted}">a while ago</time>
        </section></body></html>"#
    )
}
