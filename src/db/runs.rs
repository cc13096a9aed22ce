use crate::errors::PipelineError;
use rusqlite::{params, Connection};

pub fn start_crawl_run(
    conn: &Connection,
    region: &str,
    sub_region: &str,
    started_at: i64,
) -> Result<i64, PipelineError> {
    conn.execute(
        "INSERT INTO crawl_runs (region, sub_region, started_at, success) VALUES (?, ?, ?, 0)",
        params![region, sub_region, started_at],
    )
    .map_err(|e| PipelineError::DbError(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

pub fn end_crawl_run(
    conn: &Connection,
    run_id: i64,
    finished_at: i64,
    urls_collected: usize,
    listings_visited: usize,
    rows_inserted: usize,
    success: bool,
    error: Option<String>,
) -> Result<(), PipelineError> {
    conn.execute(
        "UPDATE crawl_runs SET finished_at = ?, urls_collected = ?, listings_visited = ?, rows_inserted = ?, success = ?, error_message = ? WHERE id = ?",
        params![finished_at, urls_collected, listings_visited, rows_inserted, success, error, run_id],
    ).map_err(|e| PipelineError::DbError(e.to_string()))?;
    Ok(())
}
