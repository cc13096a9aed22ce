use crate::scraper::page::{self, PageShape};
use crate::scraper::session::PageFetcher;
use crate::scraper::ScrapeError;
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// Walk the search-result pages from `start_url` and return every listing
/// detail URL in first-seen order, with exact-string duplicates removed.
///
/// The walk ends on the first of: no next-page control on the current page;
/// an advance that does not change the page (the resolved next URL equals
/// the current one, or fetching it fails); or a page contributing zero
/// unseen links, which means the link structure is repeating rather than
/// paginating. Whichever page is being read when that happens is still
/// collected in full, so the accumulator never loses a final page.
pub fn collect_listing_urls(
    fetcher: &impl PageFetcher,
    start_url: &str,
) -> Result<Vec<String>, ScrapeError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut listing_urls: Vec<String> = Vec::new();

    // Not being able to load the very first results page means there is no
    // batch to run at all.
    let mut current_url = start_url.to_string();
    let mut html = fetcher.fetch(&current_url)?;
    let mut pages = 0usize;

    loop {
        pages += 1;
        let doc = Html::parse_document(&html);
        let loc = PageShape::detect(&doc).locators();

        let mut fresh = 0usize;
        for href in page::extract_attr_all(&doc, loc.listing_links, "href") {
            let href = resolve_href(&current_url, &href);
            if seen.insert(href.clone()) {
                listing_urls.push(href);
                fresh += 1;
            }
        }

        eprintln!(
            "📄 Results page {pages}: {fresh} new listing urls ({} total)",
            listing_urls.len()
        );

        // Every link on this page was already collected: the site is
        // handing back repeated content, treat it as the last page.
        if fresh == 0 && pages > 1 {
            eprintln!("🔁 No unseen listings on page {pages}, stopping");
            break;
        }

        let next_url = match page::extract_attr(&doc, loc.next_page, "href") {
            Some(href) => resolve_href(&current_url, &href),
            None => {
                eprintln!("🏁 Last page reached");
                break;
            }
        };

        if next_url == current_url {
            eprintln!("🏁 Next-page control no longer advances, stopping");
            break;
        }

        fetcher.pause(1, 3);

        match fetcher.fetch(&next_url) {
            Ok(body) => {
                current_url = next_url;
                html = body;
            }
            Err(e) => {
                // Terminal, not fatal: the URLs collected so far still get
                // crawled, and a dead connection will surface there.
                eprintln!("⚠️ Advance to {next_url} failed ({e}), stopping");
                break;
            }
        }
    }

    eprintln!(
        "🧮 Collected {} rental listing urls across {pages} pages",
        listing_urls.len()
    );

    Ok(listing_urls)
}

/// Resolve a possibly relative href against the page it appeared on. Hrefs
/// that fail to resolve are kept verbatim so the dedup set still sees them.
fn resolve_href(base: &str, href: &str) -> String {
    match Url::parse(base).and_then(|b| b.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}
