//! Simulation context
//!
//! Owns everything with state for one session: the surface size, the
//! field, and the drag controller.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::field::{FieldConfig, ParticleField};
use super::pointer::PointerController;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed the field was created from
    pub seed: u64,
    /// Surface size in surface-local pixels (fixed for the session)
    pub size: Vec2,
    pub field: ParticleField,
    pub pointer: PointerController,
    /// Frames simulated so far
    pub frame: u64,
}

impl SimState {
    /// Create a session with a freshly populated field
    pub fn new(config: &FieldConfig, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let field = ParticleField::create(config, width, height, &mut rng);
        Self::with_field(field, width, height, seed)
    }

    /// Create a session around an existing field
    pub fn with_field(field: ParticleField, width: f32, height: f32, seed: u64) -> Self {
        Self {
            seed,
            size: Vec2::new(width, height),
            field,
            pointer: PointerController::new(),
            frame: 0,
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// The floor particles settle on
    pub fn height(&self) -> f32 {
        self.size.y
    }
}
