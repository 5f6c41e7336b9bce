use std::path::PathBuf;
use std::time::Duration;

use crate::aggregate::{AggregateOptions, EventTypePolicy};
use crate::pickup::PickupPolicy;

pub const DEFAULT_SERVER_URL: &str = "https://tplapp.onrender.com/";
pub const DEFAULT_OUTPUT_DIR: &str = "data";
// Free-tier hosting can take a while to wake up.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const MAX_HTTP_TIMEOUT_SECS: u64 = 3600;

pub const STATS_JSON_FILE: &str = "tpl_stats_summary.json";
pub const STATS_CSV_FILE: &str = "tpl_stats_summary.csv";
pub const GAMES_JSON_FILE: &str = "tpl_game_info.json";

pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_url: String,
    pub output_dir: PathBuf,
    pub write_json: bool,
    pub write_csv: bool,
    pub write_games: bool,
    pub http_timeout: Duration,
    pub aggregate: AggregateOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            write_json: true,
            write_csv: false,
            write_games: true,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            aggregate: AggregateOptions::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_url = get("TPL_SERVER_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.server_url);
        let output_dir = get("TPL_OUTPUT_DIR")
            .map(|v| PathBuf::from(v.trim()))
            .unwrap_or(defaults.output_dir);

        let (write_json, write_csv) = match get("TPL_OUTPUT_FORMATS") {
            Some(raw) => parse_formats(&raw).unwrap_or_else(|| {
                log::warn!("ignoring TPL_OUTPUT_FORMATS={raw:?}, expected json and/or csv");
                (defaults.write_json, defaults.write_csv)
            }),
            None => (defaults.write_json, defaults.write_csv),
        };

        let write_games = parse_var(&get, "TPL_WRITE_GAMES", parse_bool);
        let http_timeout = parse_var(&get, "TPL_HTTP_TIMEOUT_SECS", parse_timeout_secs);
        let event_types = parse_var(&get, "TPL_EVENT_TYPES", EventTypePolicy::parse);
        let pickup = parse_var(&get, "TPL_PICKUP", PickupPolicy::parse);

        Self {
            server_url,
            output_dir,
            write_json,
            write_csv,
            write_games: write_games.unwrap_or(defaults.write_games),
            http_timeout: http_timeout.unwrap_or(defaults.http_timeout),
            aggregate: AggregateOptions {
                event_types: event_types.unwrap_or(defaults.aggregate.event_types),
                pickup: pickup.unwrap_or(defaults.aggregate.pickup),
            },
        }
    }

    pub fn stats_json_path(&self) -> PathBuf {
        self.output_dir.join(STATS_JSON_FILE)
    }

    pub fn stats_csv_path(&self) -> PathBuf {
        self.output_dir.join(STATS_CSV_FILE)
    }

    pub fn games_json_path(&self) -> PathBuf {
        self.output_dir.join(GAMES_JSON_FILE)
    }
}

fn parse_var<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = get(key)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        log::warn!("ignoring unparseable {key}={raw:?}, using default");
    }
    parsed
}

// Larger values overflow the deadline arithmetic inside the blocking client.
fn parse_timeout_secs(raw: &str) -> Option<Duration> {
    let secs = raw.trim().parse::<u64>().ok()?;
    let clamped = secs.clamp(1, MAX_HTTP_TIMEOUT_SECS);
    if clamped != secs {
        log::warn!("TPL_HTTP_TIMEOUT_SECS={secs} out of range, using {clamped}");
    }
    Some(Duration::from_secs(clamped))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_formats(raw: &str) -> Option<(bool, bool)> {
    let mut json = false;
    let mut csv = false;
    for part in raw.split(',').map(|p| p.trim().to_ascii_lowercase()) {
        match part.as_str() {
            "json" => json = true,
            "csv" => csv = true,
            "" => {}
            _ => return None,
        }
    }
    (json || csv).then_some((json, csv))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config_from(&[
            ("TPL_SERVER_URL", " http://localhost:3000 "),
            ("TPL_OUTPUT_DIR", "out"),
            ("TPL_OUTPUT_FORMATS", "csv, JSON"),
            ("TPL_WRITE_GAMES", "no"),
            ("TPL_HTTP_TIMEOUT_SECS", "0"),
            ("TPL_EVENT_TYPES", "lenient"),
            ("TPL_PICKUP", "per-game"),
        ]);
        assert_eq!(cfg.server_url, "http://localhost:3000");
        let csv_path = PathBuf::from("out").join(STATS_CSV_FILE);
        assert_eq!(cfg.stats_csv_path(), csv_path);
        assert!(cfg.write_json && cfg.write_csv);
        assert!(!cfg.write_games);
        assert_eq!(cfg.http_timeout, Duration::from_secs(1));
        assert_eq!(cfg.aggregate.event_types, EventTypePolicy::Lenient);
        assert_eq!(cfg.aggregate.pickup, PickupPolicy::SameGame);
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = config_from(&[
            ("TPL_OUTPUT_FORMATS", "xlsx"),
            ("TPL_HTTP_TIMEOUT_SECS", "soon"),
            ("TPL_PICKUP", "maybe"),
            ("TPL_EVENT_TYPES", "   "),
        ]);
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn huge_timeout_is_clamped() {
        let cfg = config_from(&[("TPL_HTTP_TIMEOUT_SECS", "18446744073709551615")]);
        assert_eq!(cfg.http_timeout, Duration::from_secs(MAX_HTTP_TIMEOUT_SECS));

        let cfg = config_from(&[("TPL_HTTP_TIMEOUT_SECS", "99999999999999999999")]);
        assert_eq!(cfg.http_timeout, Config::default().http_timeout);
    }
}
