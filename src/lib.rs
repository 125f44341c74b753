//! Ball Drop - falling balls you can pick up and move around
//!
//! Core modules:
//! - `sim`: Particle field, drag state, per-frame physics (no platform deps)
//! - `renderer`: Drawing surface abstraction and WebGPU backend
//! - `render_loop`: Per-frame clear/update/draw driver
//! - `settings`: Field configuration, persisted in LocalStorage
//! - `history`: Search history log (independent of the simulation)
//! - `platform`: Browser/native storage differences

pub mod history;
pub mod platform;
pub mod render_loop;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use history::SearchHistory;
pub use render_loop::RenderLoop;
pub use settings::Settings;

/// Default configuration constants
pub mod consts {
    /// Number of balls created at startup
    pub const BALL_COUNT: usize = 30;
    /// Upper bound on configured ball count
    pub const MAX_BALL_COUNT: usize = 2000;

    /// Ball radius range (pixels)
    pub const RADIUS_MIN: f32 = 5.0;
    pub const RADIUS_MAX: f32 = 25.0;

    /// Fall speed range (pixels per frame, no timestep scaling)
    pub const SPEED_MIN: f32 = 1.0;
    pub const SPEED_MAX: f32 = 4.0;

    /// Search history cap
    pub const MAX_HISTORY: usize = 20;
}

/// Current wall-clock time in milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current wall-clock time in milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
