use std::env;
use std::path::PathBuf;

/// Batch parameters, read from the environment with workable defaults.
/// There is deliberately no CLI framework here; one run = one set of env
/// vars.
pub struct Config {
    pub region: String,
    pub subregion: String,
    pub category: String,
    pub min_price: u32,
    pub max_price: u32,
    pub rent_period: u32,
    pub sale_date: String,
    pub db_path: String,
    pub snapshot_dir: PathBuf,
    /// Upper bound, in seconds, on how long any single page request may
    /// take before it is treated as failed.
    pub download_delay_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            region: env_or("CL_REGION", "sfbay"),
            subregion: env_or("CL_SUBREGION", "pen"),
            category: env_or("CL_CATEGORY", "apa"),
            min_price: env_parse("CL_MIN_PRICE", 1),
            max_price: env_parse("CL_MAX_PRICE", 9000),
            rent_period: env_parse("CL_RENT_PERIOD", 3),
            sale_date: env_or("CL_SALE_DATE", "all+dates"),
            db_path: env_or("CL_DB_PATH", "rentals.sqlite3"),
            snapshot_dir: PathBuf::from(env_or("CL_SNAPSHOT_DIR", "scraped_data")),
            download_delay_secs: env_parse("CL_DOWNLOAD_DELAY", 50),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
