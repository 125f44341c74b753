//! Field settings
//!
//! Persisted in LocalStorage; individual values can be overridden from the
//! page's query string (`?balls=50&seed=7`).

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::storage;
use crate::sim::FieldConfig;

/// User-adjustable configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of balls
    pub ball_count: usize,
    /// Ball radius range (pixels)
    pub radius_min: f32,
    pub radius_max: f32,
    /// Fall speed range (pixels per frame)
    pub speed_min: f32,
    pub speed_max: f32,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_count: BALL_COUNT,
            radius_min: RADIUS_MIN,
            radius_max: RADIUS_MAX,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "ball_drop_settings";

    /// Field configuration with ranges repaired
    pub fn field_config(&self) -> FieldConfig {
        FieldConfig {
            count: self.ball_count,
            radius_min: self.radius_min,
            radius_max: self.radius_max,
            speed_min: self.speed_min,
            speed_max: self.speed_max,
        }
        .sanitized()
    }

    /// Seed to use for this session
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Override fields from a URL query string, with or without the leading `?`.
    ///
    /// Recognized keys: `balls`, `rmin`, `rmax`, `smin`, `smax`, `seed`.
    /// Returns the number of values applied.
    pub fn apply_query(&mut self, query: &str) -> usize {
        let mut applied = 0;
        for pair in query.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let ok = match key {
                "balls" => match value.parse::<usize>() {
                    Ok(v) if v <= MAX_BALL_COUNT => {
                        self.ball_count = v;
                        true
                    }
                    _ => false,
                },
                "rmin" => value.parse().map(|v| self.radius_min = v).is_ok(),
                "rmax" => value.parse().map(|v| self.radius_max = v).is_ok(),
                "smin" => value.parse().map(|v| self.speed_min = v).is_ok(),
                "smax" => value.parse().map(|v| self.speed_max = v).is_ok(),
                "seed" => value.parse().map(|v| self.seed = Some(v)).is_ok(),
                _ => {
                    log::warn!("Unknown setting in query: {}", key);
                    continue;
                }
            };
            if ok {
                applied += 1;
            } else {
                log::warn!("Bad value for {}: {:?}", key, value);
            }
        }
        applied
    }

    /// Load settings from LocalStorage (defaults if absent or unreadable)
    pub fn load() -> Self {
        match storage::load(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        if storage::save(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}
