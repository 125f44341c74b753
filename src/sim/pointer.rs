//! Pointer drag state machine
//!
//! `Idle -> Dragging` on a pointer-down over a ball, `Dragging -> Idle` on
//! pointer-up wherever the pointer is. The controller never owns a ball: it
//! holds the ball's index into the field.

use glam::Vec2;

use super::field::ParticleField;

/// Current drag state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Index of the held ball in the field
        target: usize,
        /// Pointer minus ball centre at grab time, constant for the drag
        grab_offset: Vec2,
    },
}

/// Translates pointer events into ball positions
#[derive(Debug, Clone, Default)]
pub struct PointerController {
    state: DragState,
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Index of the ball being dragged, if any
    pub fn target(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { target, .. } => Some(target),
            DragState::Idle => None,
        }
    }

    /// Pick up the topmost ball under `point`. No-op over empty space.
    ///
    /// The ball's falling flag is left alone: a ball grabbed mid-fall keeps
    /// falling from wherever it is released.
    pub fn on_pointer_down(&mut self, point: Vec2, field: &ParticleField) {
        let Some(target) = field.hit_test(point) else {
            return;
        };
        let Some(particle) = field.get(target) else {
            return;
        };

        let grab_offset = point - particle.pos;
        log::debug!("Grabbed ball {} (offset {:?})", target, grab_offset);
        self.state = DragState::Dragging {
            target,
            grab_offset,
        };
    }

    /// Move the held ball so the grab point follows the pointer. No bounds
    /// clamping: the ball may leave the surface.
    pub fn on_pointer_move(&mut self, point: Vec2, field: &mut ParticleField) {
        if let DragState::Dragging {
            target,
            grab_offset,
        } = self.state
        {
            if let Some(particle) = field.get_mut(target) {
                particle.pos = point - grab_offset;
            }
        }
    }

    /// Release, wherever the pointer is. Idempotent.
    pub fn on_pointer_up(&mut self) {
        if let Some(target) = self.target() {
            log::debug!("Released ball {}", target);
        }
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Color, Particle};

    fn field() -> ParticleField {
        ParticleField::from_particles(vec![
            Particle::new(Vec2::new(100.0, 100.0), 20.0, Color::from_hue(0.0), 2.0),
            Particle::new(Vec2::new(300.0, 590.0), 10.0, Color::from_hue(90.0), 2.0),
        ])
    }

    #[test]
    fn test_down_over_ball_starts_drag() {
        let field = field();
        let mut pointer = PointerController::new();
        pointer.on_pointer_down(Vec2::new(105.0, 95.0), &field);
        assert_eq!(
            pointer.state(),
            DragState::Dragging {
                target: 0,
                grab_offset: Vec2::new(5.0, -5.0),
            }
        );
    }

    #[test]
    fn test_down_over_empty_space_is_noop() {
        let field = field();
        let mut pointer = PointerController::new();
        pointer.on_pointer_down(Vec2::new(500.0, 500.0), &field);
        assert_eq!(pointer.state(), DragState::Idle);

        let empty = ParticleField::default();
        pointer.on_pointer_down(Vec2::new(100.0, 100.0), &empty);
        assert!(!pointer.is_dragging());
    }

    #[test]
    fn test_move_keeps_grab_offset() {
        let mut field = field();
        let mut pointer = PointerController::new();
        pointer.on_pointer_down(Vec2::new(105.0, 95.0), &field);
        pointer.on_pointer_move(Vec2::new(205.0, 45.0), &mut field);
        assert_eq!(field.particles()[0].pos, Vec2::new(200.0, 50.0));
    }

    #[test]
    fn test_move_while_idle_is_noop() {
        let mut field = field();
        let mut pointer = PointerController::new();
        pointer.on_pointer_move(Vec2::new(0.0, 0.0), &mut field);
        assert_eq!(field.particles()[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_drag_overrides_floor_and_bounds() {
        let mut field = field();
        // Settle ball 1 on the floor
        field.step(600.0, None);
        assert!(!field.particles()[1].is_falling());
        let centre = field.particles()[1].pos;

        let mut pointer = PointerController::new();
        pointer.on_pointer_down(centre, &field);
        let p = Vec2::new(-50.0, 900.0);
        pointer.on_pointer_move(p, &mut field);

        assert_eq!(field.particles()[1].pos, p);
        // Flag untouched by the drag
        assert!(!field.particles()[1].is_falling());
    }

    #[test]
    fn test_release_is_idempotent() {
        let field = field();
        let mut pointer = PointerController::new();
        pointer.on_pointer_down(Vec2::new(100.0, 100.0), &field);
        pointer.on_pointer_up();
        assert_eq!(pointer.state(), DragState::Idle);
        pointer.on_pointer_up();
        assert_eq!(pointer.state(), DragState::Idle);
        assert_eq!(pointer.target(), None);
    }
}
