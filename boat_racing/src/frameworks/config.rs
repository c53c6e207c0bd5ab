use crate::domain::{ConfigError, SpeedTuning};
use std::{
    env, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use toml::{Table, Value};
use tracing::warn;

// Runtime constants (not gameplay tuning).

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const WORLD_BROADCAST_CAPACITY: usize = 128;

const DEFAULT_CONFIG_HEADER: &str = "# Ice racing boat tuning. Speeds are blocks per tick, factors are per-tick multipliers.\n\n";

pub fn config_path() -> PathBuf {
    env::var("BOAT_RACING_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

pub fn tick_interval() -> Duration {
    let millis = env::var("BOAT_RACING_TICK_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(50);
    Duration::from_millis(millis)
}

pub fn demo_ticks() -> u64 {
    env::var("BOAT_RACING_DEMO_TICKS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(400)
}

/// Writes the default settings file unless one already exists.
///
/// Returns `true` when a file was written.
pub fn save_default_config(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(&SpeedTuning::default())?;
    fs::write(path, format!("{DEFAULT_CONFIG_HEADER}{body}"))?;
    Ok(true)
}

/// Reads tuning from a settings file. Keys that are missing or hold a value of
/// the wrong type keep their defaults; a missing file yields the full defaults.
pub fn load_tuning(path: &Path) -> Result<SpeedTuning, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => parse_tuning(&text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(SpeedTuning::default()),
        Err(e) => Err(e.into()),
    }
}

/// Only text that is not TOML at all is an error.
pub fn parse_tuning(text: &str) -> Result<SpeedTuning, ConfigError> {
    let table: Table = toml::from_str(text)?;
    let defaults = SpeedTuning::default();

    Ok(SpeedTuning {
        max_ice_speed: number(&table, "max-ice-speed", defaults.max_ice_speed),
        max_off_ice_speed: number(&table, "max-off-ice-speed", defaults.max_off_ice_speed),
        acceleration: number(&table, "acceleration-amount", defaults.acceleration),
        deceleration_factor: number(&table, "deceleration-factor", defaults.deceleration_factor),
        momentum_loss_factor: number(
            &table,
            "momentum-loss-factor",
            defaults.momentum_loss_factor,
        ),
        brake_factor: number(&table, "brake-factor", defaults.brake_factor),
        debug: flag(&table, "debug", defaults.debug),
    })
}

// Integers are accepted where a float is expected.
fn number(table: &Table, key: &str, default: f64) -> f64 {
    match table.get(key) {
        None => default,
        Some(value) => value
            .as_float()
            .or_else(|| value.as_integer().map(|i| i as f64))
            .unwrap_or_else(|| rejected(key, value, default)),
    }
}

fn flag(table: &Table, key: &str, default: bool) -> bool {
    match table.get(key) {
        None => default,
        Some(value) => value
            .as_bool()
            .unwrap_or_else(|| rejected(key, value, default)),
    }
}

fn rejected<T: std::fmt::Debug>(key: &str, value: &Value, default: T) -> T {
    warn!(key, %value, ?default, "invalid config value, using default");
    default
}
