//! The particle field: a fixed set of balls created once per session

use glam::Vec2;
use rand::Rng;

use super::particle::{Color, Particle};
use crate::consts::*;
use crate::renderer::DrawSurface;

/// Parameters for populating a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub radius_min: f32,
    pub radius_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: BALL_COUNT,
            radius_min: RADIUS_MIN,
            radius_max: RADIUS_MAX,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
        }
    }
}

impl FieldConfig {
    /// Repair a config so every sampling range is finite, ordered and
    /// positive, and the count is at most `MAX_BALL_COUNT`
    pub fn sanitized(&self) -> Self {
        let (radius_min, radius_max) =
            positive_range(self.radius_min, self.radius_max, RADIUS_MIN, RADIUS_MAX);
        let (speed_min, speed_max) =
            positive_range(self.speed_min, self.speed_max, SPEED_MIN, SPEED_MAX);
        Self {
            count: self.count.min(MAX_BALL_COUNT),
            radius_min,
            radius_max,
            speed_min,
            speed_max,
        }
    }
}

fn positive_range(lo: f32, hi: f32, default_lo: f32, default_hi: f32) -> (f32, f32) {
    if !(lo.is_finite() && hi.is_finite()) {
        return (default_lo, default_hi);
    }
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if lo <= 0.0 {
        // Keep whatever positive part of the range is left
        if hi <= 0.0 {
            return (default_lo, default_hi);
        }
        return (hi.min(default_lo), hi);
    }
    (lo, hi)
}

/// Uniform sample from [lo, hi]; empty or inverted ranges collapse to their midpoint
fn sample<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        (lo + hi) * 0.5
    }
}

/// Ordered collection of particles. Identity is the index, which never changes.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Populate a field for a `width` x `height` surface.
    ///
    /// Each ball starts fully inside the surface horizontally, anywhere
    /// vertically, falling. Overlap is allowed.
    pub fn create<R: Rng>(
        config: &FieldConfig,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Self {
        let config = config.sanitized();
        let mut particles = Vec::with_capacity(config.count);

        for _ in 0..config.count {
            let radius = sample(rng, config.radius_min, config.radius_max);
            let x = sample(rng, radius, width - radius);
            let y = sample(rng, 0.0, height.max(0.0));
            let fall_speed = sample(rng, config.speed_min, config.speed_max);
            let color = Color::from_hue(rng.random_range(0.0..360.0));
            particles.push(Particle::new(Vec2::new(x, y), radius, color, fall_speed));
        }

        log::debug!(
            "Created field of {} balls on {}x{} surface",
            particles.len(),
            width,
            height
        );
        Self { particles }
    }

    /// Build a field from explicit particles (index order is draw order)
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    /// Number of particles that have settled on the floor
    pub fn resting_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_falling()).count()
    }

    /// Advance every falling particle one frame, except `held` (the drag
    /// target, whose position belongs to the pointer). Returns how many
    /// particles settled on this frame.
    pub fn step(&mut self, floor: f32, held: Option<usize>) -> usize {
        let mut settled = 0;
        for (i, particle) in self.particles.iter_mut().enumerate() {
            if Some(i) == held {
                continue;
            }
            if particle.step(floor) {
                log::debug!("Ball {} settled at y={}", i, particle.pos.y);
                settled += 1;
            }
        }
        settled
    }

    /// Draw back-to-front in index order
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            surface.fill_disc(particle.pos, particle.radius, particle.color());
        }
    }

    /// One frame of physics followed by drawing
    pub fn update_all<S: DrawSurface + ?Sized>(
        &mut self,
        floor: f32,
        held: Option<usize>,
        surface: &mut S,
    ) -> usize {
        let settled = self.step(floor, held);
        self.draw(surface);
        settled
    }

    /// Topmost particle (last in draw order) whose disc strictly contains `point`
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        self.particles.iter().rposition(|p| p.contains(point))
    }
}
