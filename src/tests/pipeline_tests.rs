use crate::db::{rentals, Database};
use crate::normalize::{clean_records, normalize};
use crate::scraper::{collect_listing_urls, crawl_listings, CrawlBatch};
use crate::snapshots;
use crate::tests::fixtures::*;
use chrono::NaiveDate;
use std::sync::atomic::AtomicBool;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fresh temp-file database with the production schema applied.
fn make_db(tag: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "rental_scrape_{tag}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path.to_string_lossy().into_owned());
    rentals::init_db(&db).expect("Failed to initialize DB");
    db
}

fn crawl_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
}

/// Crawl a small two-listing fake site end to end, up to normalized rows.
fn crawl_fake_site() -> Vec<crate::normalize::NormalizedListing> {
    let start = "https://sfbay.craigslist.org/search/pen/apa?min_price=1";
    let urls = detail_urls(2, 0);

    let session = FakeSession::new(vec![
        (
            start.to_string(),
            FakePage::Html(results_page(&urls, None)),
        ),
        (
            urls[0].clone(),
            FakePage::Html(legacy_detail_page(
                "7512340001",
                "$2,500",
                "mountain view",
                "2024-03-01T10:30:00-0800",
            )),
        ),
        (
            urls[1].clone(),
            FakePage::Html(current_detail_page(
                "7512340002",
                "$1,800",
                "palo alto",
                "2024-03-01T11:45:00-0800",
            )),
        ),
    ]);

    let cancel = AtomicBool::new(false);
    let listing_urls = collect_listing_urls(&session, start).unwrap();
    let records = crawl_listings(&session, &listing_urls, crawl_date(), &cancel);
    let records = clean_records(records);
    normalize(&records, "sfbay", "pen")
}

#[test]
fn pipeline_produces_typed_rows_from_both_page_eras() {
    let rows = crawl_fake_site();
    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    assert_eq!(first.listing_id, "7512340001");
    assert_eq!(first.price, 2500);
    assert_eq!(first.city.as_deref(), Some("Mountain View"));
    assert_eq!(first.bedrooms, Some(2));
    assert_eq!(first.bathrooms, Some(1.0));
    assert_eq!(first.sqft, Some(1040));
    assert!(first.kitchen);
    assert_eq!(first.indicator("cats_ok"), Some(true));
    assert_eq!(first.indicator("apt"), Some(true));

    let second = &rows[1];
    assert_eq!(second.listing_id, "7512340002");
    assert_eq!(second.price, 1800);
    assert_eq!(second.city.as_deref(), Some("Palo Alto"));
    // shared bathroom counts as one
    assert_eq!(second.bathrooms, Some(1.0));
    assert!(!second.kitchen);
    // compound rule: a townhouse is not a single-family house
    assert_eq!(second.indicator("townhouse"), Some(true));
    assert_eq!(second.indicator("single_fam"), Some(false));
}

#[test]
fn sinking_the_same_batch_twice_inserts_nothing_new() {
    let db = make_db("idempotence");
    let rows = crawl_fake_site();

    // first run: empty store, no marker, everything goes in
    let marker = rentals::latest_date_posted(&db, "sfbay").unwrap();
    assert_eq!(marker, None);
    let inserted = rentals::insert_listings(&db, &rows, marker).unwrap();
    assert_eq!(inserted, 2);

    // second run of the very same batch: the marker filters everything out
    let marker = rentals::latest_date_posted(&db, "sfbay").unwrap();
    assert!(marker.is_some());
    let inserted = rentals::insert_listings(&db, &rows, marker).unwrap();
    assert_eq!(inserted, 0);
}

#[test]
fn marker_admits_only_strictly_newer_rows() {
    let db = make_db("marker");
    let rows = crawl_fake_site();
    rentals::insert_listings(&db, &rows, None).unwrap();

    // a later batch re-observes listing 2 and finds one genuinely new post
    let mut newer = crawl_fake_site();
    for row in &mut newer {
        if row.listing_id == "7512340002" {
            row.listing_id = "7512349999".to_string();
            row.date_posted = Some(
                NaiveDate::from_ymd_opt(2024, 3, 2)
                    .unwrap()
                    .and_hms_opt(8, 0, 0)
                    .unwrap(),
            );
        }
    }

    let marker = rentals::latest_date_posted(&db, "sfbay").unwrap();
    let inserted = rentals::insert_listings(&db, &newer, marker).unwrap();
    assert_eq!(inserted, 1);
}

#[test]
fn duplicate_key_skips_the_row_but_not_the_batch() {
    let db = make_db("dup_key");
    let rows = crawl_fake_site();

    // preload only the first listing
    rentals::insert_listings(&db, &rows[..1], None).unwrap();

    // inserting both without a marker hits the primary key on the first;
    // the second must still land
    let inserted = rentals::insert_listings(&db, &rows, None).unwrap();
    assert_eq!(inserted, 1);
}

#[test]
fn snapshot_writes_the_fixed_column_set_with_nan_sentinels() {
    let start = "https://sfbay.craigslist.org/search/pen/apa?min_price=1";
    let urls = detail_urls(2, 0);
    let session = FakeSession::new(vec![
        (
            urls[0].clone(),
            FakePage::Html(legacy_detail_page(
                "7512340001",
                "$2,500",
                "mountain view",
                "2024-03-01T10:30:00-0800",
            )),
        ),
        (urls[1].clone(), FakePage::Gone),
    ]);

    let cancel = AtomicBool::new(false);
    let records = crawl_listings(&session, &urls, crawl_date(), &cancel);
    let records = clean_records(records);

    let batch = CrawlBatch {
        region: "sfbay".to_string(),
        subregion: "pen".to_string(),
        min_price: 1,
        max_price: 9000,
        start_url: start.to_string(),
        listing_urls: urls,
        records,
    };

    let out_dir = std::env::temp_dir().join(format!(
        "rental_scrape_snap_{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let path = snapshots::export_batch_csv(&batch, &out_dir, crawl_date()).unwrap();

    assert!(path.ends_with("sfbay/pen/rental_sfbay_pen_03_02_2024.csv"));

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        snapshots::CSV_COLUMNS.join(",")
    );

    let good_row = lines.next().unwrap();
    assert!(good_row.contains("7512340001"));
    assert!(good_row.contains("2500") || good_row.contains("\"2,500\""));

    // the gone listing keeps its URL and nothing else
    let gone_row = lines.next().unwrap();
    assert!(gone_row.contains(&batch.listing_urls[1]));
    assert!(gone_row.contains("nan"));
    assert_eq!(lines.next(), None);

    std::fs::remove_dir_all(&out_dir).ok();
}
