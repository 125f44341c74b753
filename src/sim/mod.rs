//! Deterministic simulation module
//!
//! Everything with state lives here. No platform code; drawing only goes
//! through `renderer::DrawSurface`:
//! - Seeded RNG only
//! - One update per frame, no timestep
//! - Particle identity is its index in the field

pub mod field;
pub mod particle;
pub mod pointer;
pub mod state;
pub mod tick;

pub use field::{FieldConfig, ParticleField};
pub use particle::{Color, Particle};
pub use pointer::{DragState, PointerController};
pub use state::SimState;
pub use tick::{PointerEvent, handle_pointer, tick};
