use crate::db::connection::Database;
use crate::errors::PipelineError;
use crate::normalize::indicators::INDICATOR_RULES;
use crate::normalize::NormalizedListing;
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter};

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

const FIXED_COLUMNS: [&str; 12] = [
    "listing_id",
    "region",
    "sub_region",
    "city",
    "price",
    "bedrooms",
    "bathrooms",
    "sqft",
    "kitchen",
    "attr_vars",
    "date_of_webcrawler",
    "date_posted",
];

pub fn init_db(db: &Database) -> Result<(), PipelineError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| PipelineError::DbError(format!("Failed to apply schema: {e}")))
    })
}

/// The incremental-ingestion marker: the newest `date_posted` already stored
/// for a region. `None` means the region has never been ingested and the
/// next sink call takes everything.
pub fn latest_date_posted(
    db: &Database,
    region: &str,
) -> Result<Option<NaiveDateTime>, PipelineError> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT MAX(date_posted) FROM rentals WHERE region = ?1",
            params![region],
            |row| row.get::<_, Option<NaiveDateTime>>(0),
        )
        .map_err(|e| PipelineError::DbError(e.to_string()))
    })
}

/// Insert normalized rows, keeping only those strictly newer than
/// `last_seen`. Inserts are per-row: a constraint violation (typically a
/// listing id already stored) is reported and skipped, and the rest of the
/// batch carries on. Returns the number of rows actually inserted.
pub fn insert_listings(
    db: &Database,
    rows: &[NormalizedListing],
    last_seen: Option<NaiveDateTime>,
) -> Result<usize, PipelineError> {
    db.with_conn(|conn| {
        let sql = insert_sql();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        let mut inserted = 0usize;
        for row in rows {
            if let Some(marker) = last_seen {
                // Unknown posting age counts as already-seen once a marker
                // exists; only a first run imports undated rows.
                match row.date_posted {
                    Some(posted) if posted > marker => {}
                    _ => continue,
                }
            }

            match stmt.execute(params_from_iter(row_values(row))) {
                Ok(_) => inserted += 1,
                Err(e) => {
                    eprintln!("⚠️ Skipping listing {}: {e}", row.listing_id);
                }
            }
        }

        Ok(inserted)
    })
}

/// The most recent posting dates stored, as a post-ingest sanity check.
pub fn most_recent_date_posted(db: &Database, limit: usize) -> Result<Vec<String>, PipelineError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                "SELECT date_posted FROM rentals
                 WHERE date_posted IS NOT NULL
                 ORDER BY date_posted DESC LIMIT ?1",
            )
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        let dates = stmt
            .query_map(params![limit as i64], |row| row.get::<_, String>(0))
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for d in dates {
            out.push(d.map_err(|e| PipelineError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

/// The insert statement is assembled from the fixed columns plus the
/// indicator table, so the declarative rule list stays the single source of
/// truth for the indicator column set.
fn insert_sql() -> String {
    let mut columns: Vec<&str> = FIXED_COLUMNS.to_vec();
    columns.extend(INDICATOR_RULES.iter().map(|r| r.name));

    let placeholders = (1..=columns.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO rentals ({}) VALUES ({})",
        columns.join(", "),
        placeholders
    )
}

fn row_values(row: &NormalizedListing) -> Vec<Value> {
    let mut values = vec![
        Value::Text(row.listing_id.clone()),
        Value::Text(row.region.clone()),
        Value::Text(row.sub_region.clone()),
        text_or_null(&row.city),
        Value::Integer(row.price),
        int_or_null(row.bedrooms),
        real_or_null(row.bathrooms),
        int_or_null(row.sqft),
        Value::Integer(row.kitchen as i64),
        text_or_null(&row.attributes),
        Value::Text(row.date_of_webcrawler.format("%Y-%m-%d").to_string()),
        match row.date_posted {
            Some(dt) => Value::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Value::Null,
        },
    ];
    values.extend(row.indicators.iter().map(|&flag| Value::Integer(flag as i64)));
    values
}

fn text_or_null(v: &Option<String>) -> Value {
    match v {
        Some(s) => Value::Text(s.clone()),
        None => Value::Null,
    }
}

fn int_or_null(v: Option<i64>) -> Value {
    match v {
        Some(n) => Value::Integer(n),
        None => Value::Null,
    }
}

fn real_or_null(v: Option<f64>) -> Value {
    match v {
        Some(x) => Value::Real(x),
        None => Value::Null,
    }
}
