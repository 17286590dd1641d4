/// Client settings with env overrides (ORRERY_* variables)
use std::env;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const DEFAULT_FOLLOW_DISTANCE: f64 = 3.0;
pub const DEFAULT_MOUSE_ELEVATION_COEF: f64 = 0.0015;
pub const DEFAULT_FOLLOW_PITCH_DEG: f64 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub follow_distance: f64,
    pub mouse_elevation_coef: f64,
    pub follow_pitch_deg: f64,
    /// EnvFilter directive used when RUST_LOG is unset
    pub log_filter: String,
    pub log_file: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            follow_distance: DEFAULT_FOLLOW_DISTANCE,
            mouse_elevation_coef: DEFAULT_MOUSE_ELEVATION_COEF,
            follow_pitch_deg: DEFAULT_FOLLOW_PITCH_DEG,
            log_filter: "info".to_string(),
            log_file: "logs/orrery.log".to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each ORRERY_* key
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("ORRERY_FOLLOW_DISTANCE") {
            cfg.follow_distance = parse_positive("ORRERY_FOLLOW_DISTANCE", &v)?;
        }
        if let Some(v) = lookup("ORRERY_MOUSE_ELEVATION_COEF") {
            cfg.mouse_elevation_coef = parse_finite("ORRERY_MOUSE_ELEVATION_COEF", &v)?;
        }
        if let Some(v) = lookup("ORRERY_FOLLOW_PITCH_DEG") {
            cfg.follow_pitch_deg = parse_finite("ORRERY_FOLLOW_PITCH_DEG", &v)?;
        }
        if let Some(v) = lookup("ORRERY_LOG") {
            cfg.log_filter = v;
        }
        // RUST_LOG_FILE kept for compatibility with existing launch scripts
        if let Some(v) = lookup("ORRERY_LOG_FILE").or_else(|| lookup("RUST_LOG_FILE")) {
            cfg.log_file = v;
        }

        Ok(cfg)
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| Error::Config {
        key,
        value: value.to_string(),
    })
}

fn parse_finite(key: &'static str, value: &str) -> Result<f64> {
    let v: f64 = parse(key, value)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(Error::Config { key, value: value.to_string() })
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<f64> {
    let v = parse_finite(key, value)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(Error::Config { key, value: value.to_string() })
    }
}
