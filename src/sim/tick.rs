//! Per-frame simulation update and pointer input dispatch

use glam::Vec2;

use super::state::SimState;
use crate::renderer::DrawSurface;

/// A pointer event in surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}

impl PointerEvent {
    /// Map a DOM Pointer Events `type` to an event. Only the primary pointer
    /// drives the drag, so secondary touches and pens give `None`.
    pub fn from_dom(kind: &str, point: Vec2, is_primary: bool) -> Option<Self> {
        if !is_primary {
            return None;
        }
        match kind {
            "pointerdown" => Some(Self::Down(point)),
            "pointermove" => Some(Self::Move(point)),
            "pointerup" | "pointercancel" => Some(Self::Up),
            _ => None,
        }
    }
}

/// Apply one pointer event to the drag state
pub fn handle_pointer(state: &mut SimState, event: PointerEvent) {
    match event {
        PointerEvent::Down(point) => state.pointer.on_pointer_down(point, &state.field),
        PointerEvent::Move(point) => state.pointer.on_pointer_move(point, &mut state.field),
        PointerEvent::Up => state.pointer.on_pointer_up(),
    }
}

/// Advance the physics by one frame and draw the field. The held ball is
/// skipped by the physics.
///
/// Returns the number of balls that settled on this frame.
pub fn tick<S: DrawSurface + ?Sized>(state: &mut SimState, surface: &mut S) -> usize {
    let floor = state.height();
    let held = state.pointer.target();
    state.frame += 1;
    state.field.update_all(floor, held, surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use crate::sim::{Color, Particle, ParticleField};

    fn state_with(particles: Vec<Particle>) -> SimState {
        SimState::with_field(ParticleField::from_particles(particles), 800.0, 600.0, 0)
    }

    fn step(state: &mut SimState) -> usize {
        let mut batch = VertexBatch::new(800.0, 600.0);
        tick(state, &mut batch)
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut state = state_with(Vec::new());
        step(&mut state);
        step(&mut state);
        assert_eq!(state.frame, 2);
    }

    #[test]
    fn test_held_ball_does_not_fall() {
        let mut state = state_with(vec![Particle::new(
            Vec2::new(400.0, 100.0),
            10.0,
            Color::from_hue(30.0),
            5.0,
        )]);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(400.0, 100.0)));
        for _ in 0..10 {
            step(&mut state);
        }
        assert_eq!(state.field.particles()[0].pos.y, 100.0);
        assert!(state.field.particles()[0].is_falling());

        // Released mid-air, resumes falling next frame
        handle_pointer(&mut state, PointerEvent::Up);
        step(&mut state);
        assert_eq!(state.field.particles()[0].pos.y, 105.0);
    }

    #[test]
    fn test_falling_ball_dropped_below_floor_settles_next_frame() {
        let mut state = state_with(vec![Particle::new(
            Vec2::new(400.0, 100.0),
            10.0,
            Color::from_hue(30.0),
            5.0,
        )]);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(400.0, 100.0)));
        handle_pointer(&mut state, PointerEvent::Move(Vec2::new(400.0, 750.0)));
        handle_pointer(&mut state, PointerEvent::Up);
        assert_eq!(state.field.particles()[0].pos.y, 750.0);

        assert_eq!(step(&mut state), 1);
        assert_eq!(state.field.particles()[0].pos.y, 590.0);
        assert!(!state.field.particles()[0].is_falling());
    }

    #[test]
    fn test_settled_ball_released_mid_air_stays_put() {
        let mut state = state_with(vec![Particle::new(
            Vec2::new(400.0, 590.0),
            10.0,
            Color::from_hue(30.0),
            5.0,
        )]);
        step(&mut state);
        assert!(!state.field.particles()[0].is_falling());

        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(400.0, 590.0)));
        handle_pointer(&mut state, PointerEvent::Move(Vec2::new(400.0, 200.0)));
        handle_pointer(&mut state, PointerEvent::Up);
        for _ in 0..50 {
            step(&mut state);
        }
        assert_eq!(state.field.particles()[0].pos, Vec2::new(400.0, 200.0));
    }

    #[test]
    fn test_secondary_pointer_release_keeps_drag() {
        let mut state = state_with(vec![Particle::new(
            Vec2::new(400.0, 100.0),
            10.0,
            Color::from_hue(30.0),
            5.0,
        )]);
        let grab = PointerEvent::from_dom("pointerdown", Vec2::new(400.0, 100.0), true);
        assert_eq!(grab, Some(PointerEvent::Down(Vec2::new(400.0, 100.0))));
        handle_pointer(&mut state, grab.unwrap());

        // A second finger lifting must not drop the ball
        for kind in ["pointerup", "pointercancel"] {
            assert_eq!(PointerEvent::from_dom(kind, Vec2::ZERO, false), None);
        }
        assert!(state.pointer.is_dragging());

        let release = PointerEvent::from_dom("pointercancel", Vec2::ZERO, true);
        assert_eq!(release, Some(PointerEvent::Up));
        handle_pointer(&mut state, release.unwrap());
        assert!(!state.pointer.is_dragging());
        assert_eq!(PointerEvent::from_dom("click", Vec2::ZERO, true), None);
    }

    #[test]
    fn test_pointer_events_on_empty_field() {
        let mut state = state_with(Vec::new());
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(1.0, 1.0)));
        handle_pointer(&mut state, PointerEvent::Move(Vec2::new(2.0, 2.0)));
        handle_pointer(&mut state, PointerEvent::Up);
        handle_pointer(&mut state, PointerEvent::Up);
        assert!(!state.pointer.is_dragging());
    }
}
