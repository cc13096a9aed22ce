use crate::config::Config;
use crate::db::Database;
use crate::scraper::{CrawlBatch, HttpSession};
use chrono::Utc;
use std::sync::atomic::AtomicBool;
use std::time::{SystemTime, UNIX_EPOCH};

mod config;
mod db;
mod errors;
mod normalize;
mod regions;
mod scraper;
mod snapshots;

#[cfg(test)]
mod tests;

fn main() {
    let config = Config::from_env();

    match regions::region_by_code(&config.region) {
        Some(region) => println!("🔎 Target region: {} ({})", region.name, region.code),
        None => eprintln!(
            "⚠️ Region '{}' is not in the catalog; crawling it anyway",
            config.region
        ),
    }
    if config.region == "sfbay" {
        match regions::sfbay_subregion_name(&config.subregion) {
            Some(name) => println!("🔎 Subregion: {name}"),
            None => eprintln!("⚠️ '{}' is not a known sfbay subregion", config.subregion),
        }
    }

    // 1. Open the destination store and apply the schema
    let db = Database::new(config.db_path.clone());
    if let Err(e) = db::rentals::init_db(&db) {
        eprintln!("❌ Database initialization failed: {e}");
        std::process::exit(1);
    }

    // 2. Record the run
    let run_id = db
        .with_conn(|conn| {
            db::runs::start_crawl_run(conn, &config.region, &config.subregion, now_unix())
        })
        .unwrap_or(0);

    // 3. One HTTP session drives the whole batch, serially
    let session = match HttpSession::new(config.download_delay_secs) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ Could not build HTTP session: {e}");
            std::process::exit(1);
        }
    };

    let start_url = regions::search_url(
        &config.region,
        &config.subregion,
        &config.category,
        config.min_price,
        config.max_price,
        config.rent_period,
        &config.sale_date,
    );
    println!("🔎 Crawling rental listings from:\n{start_url}");

    let crawled_on = Utc::now().date_naive();
    let cancel = AtomicBool::new(false);

    // 4. Walk the result pages, then visit each listing
    let listing_urls = match scraper::collect_listing_urls(&session, &start_url) {
        Ok(urls) => urls,
        Err(e) => {
            eprintln!("❌ Could not read the first results page: {e}");
            finish_run(&db, run_id, 0, 0, 0, false, Some(e.to_string()));
            std::process::exit(1);
        }
    };

    let records = scraper::crawl_listings(&session, &listing_urls, crawled_on, &cancel);
    let records = normalize::clean_records(records);

    let batch = CrawlBatch {
        region: config.region.clone(),
        subregion: config.subregion.clone(),
        min_price: config.min_price,
        max_price: config.max_price,
        start_url,
        listing_urls,
        records,
    };

    #[cfg(debug_assertions)]
    {
        if let Err(e) = scraper::save_records_debug(&batch.records, "records_debug.json") {
            eprintln!("⚠️ Could not write records_debug.json: {e}");
        }
    }

    // 5. Snapshot the batch before anything else can go wrong
    match snapshots::export_batch_csv(&batch, &config.snapshot_dir, crawled_on) {
        Ok(path) => println!("📦 Snapshot written to {}", path.display()),
        Err(e) => eprintln!("⚠️ Snapshot failed ({e}); continuing with the DB load"),
    }

    // 6. Normalize and load whatever is newer than the store's marker
    let rows = normalize::normalize(&batch.records, &config.region, &config.subregion);
    println!("🧮 {} of {} records survived normalization", rows.len(), batch.records.len());

    let inserted = match db::rentals::latest_date_posted(&db, &config.region)
        .and_then(|last_seen| db::rentals::insert_listings(&db, &rows, last_seen))
    {
        Ok(n) => n,
        Err(e) => {
            eprintln!("❌ Could not load the batch into the store: {e}");
            finish_run(
                &db,
                run_id,
                batch.listing_urls.len(),
                batch.records.len(),
                0,
                false,
                Some(e.to_string()),
            );
            std::process::exit(1);
        }
    };
    println!("✅ {inserted} new rows inserted into the rentals table");

    // 7. Recency sanity check on what the store now holds
    if let Ok(dates) = db::rentals::most_recent_date_posted(&db, 5) {
        println!("Most recent date_posted values stored: {dates:?}");
    }

    finish_run(
        &db,
        run_id,
        batch.listing_urls.len(),
        batch.records.len(),
        inserted,
        true,
        None,
    );
    println!(
        "Crawl batch complete for {}/{} (${}-${}): {} urls, {} records, {} inserted.",
        batch.region,
        batch.subregion,
        batch.min_price,
        batch.max_price,
        batch.listing_urls.len(),
        batch.records.len(),
        inserted
    );
    println!("Search started from {}", batch.start_url);
}

fn finish_run(
    db: &Database,
    run_id: i64,
    urls: usize,
    visited: usize,
    inserted: usize,
    success: bool,
    error: Option<String>,
) {
    let _ = db.with_conn(|conn| {
        db::runs::end_crawl_run(conn, run_id, now_unix(), urls, visited, inserted, success, error)
    });
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
