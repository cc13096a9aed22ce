use crate::errors::PipelineError;
use crate::scraper::CrawlBatch;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot column order is a stable on-disk contract; downstream imports
/// key on these exact names.
pub const CSV_COLUMNS: [&str; 14] = [
    "listing_urls",
    "ids",
    "sqft",
    "cities",
    "prices",
    "bedrooms",
    "bathrooms",
    "attr_vars",
    "listing_descrip",
    "date_of_webcrawler",
    "kitchen",
    "date_posted",
    "region",
    "sub_region",
];

/// Write one CSV file for the batch under `{out_dir}/{region}/{subregion}/`,
/// creating the directories as needed. Missing fields are written as the
/// `nan` sentinel, and no index column is emitted. Returns the file path.
pub fn export_batch_csv(
    batch: &CrawlBatch,
    out_dir: &Path,
    crawled_on: NaiveDate,
) -> Result<PathBuf, PipelineError> {
    let dir = out_dir.join(&batch.region).join(&batch.subregion);
    fs::create_dir_all(&dir).map_err(|e| PipelineError::IoError(e.to_string()))?;

    let file_name = format!(
        "rental_{}_{}_{}.csv",
        batch.region,
        batch.subregion,
        crawled_on.format("%m_%d_%Y")
    );
    let path = dir.join(file_name);

    let mut wtr =
        csv::Writer::from_path(&path).map_err(|e| PipelineError::CsvError(e.to_string()))?;

    wtr.write_record(CSV_COLUMNS)
        .map_err(|e| PipelineError::CsvError(e.to_string()))?;

    for rec in &batch.records {
        let row = [
            rec.source_url.clone(),
            field(&rec.listing_id),
            field(&rec.sqft),
            field(&rec.city),
            field(&rec.price),
            field(&rec.bedrooms),
            field(&rec.bathrooms),
            field(&rec.attributes),
            field(&rec.description),
            rec.date_of_webcrawler.format("%Y-%m-%d").to_string(),
            flag_field(rec.kitchen),
            field(&rec.date_posted),
            batch.region.clone(),
            batch.subregion.clone(),
        ];
        wtr.write_record(&row)
            .map_err(|e| PipelineError::CsvError(e.to_string()))?;
    }

    wtr.flush()
        .map_err(|e| PipelineError::CsvError(e.to_string()))?;

    Ok(path)
}

fn field(v: &Option<String>) -> String {
    v.clone().unwrap_or_else(|| "nan".to_string())
}

fn flag_field(v: Option<bool>) -> String {
    match v {
        Some(true) => "1".to_string(),
        Some(false) => "0".to_string(),
        None => "nan".to_string(),
    }
}
