//! Particle (ball) entity and its display colour

use glam::Vec2;

/// Display colour: a hue at full saturation and 50% lightness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Hue in degrees, [0, 360)
    pub hue: f32,
}

impl Color {
    pub fn from_hue(hue: f32) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
        }
    }

    /// Convert to RGBA (sRGB, opaque)
    pub fn rgba(&self) -> [f32; 4] {
        // hsl(h, 100%, 50%): chroma is 1 and the lightness offset is 0
        let h = self.hue / 60.0;
        let x = 1.0 - ((h % 2.0) - 1.0).abs();
        let (r, g, b) = match h as u32 {
            0 => (1.0, x, 0.0),
            1 => (x, 1.0, 0.0),
            2 => (0.0, 1.0, x),
            3 => (0.0, x, 1.0),
            4 => (x, 0.0, 1.0),
            _ => (1.0, 0.0, x),
        };
        [r, g, b, 1.0]
    }
}

/// A falling ball
#[derive(Debug, Clone)]
pub struct Particle {
    /// Centre, in surface-local pixels (y grows downward)
    pub pos: Vec2,
    pub radius: f32,
    color: Color,
    fall_speed: f32,
    falling: bool,
}

impl Particle {
    /// New particle, falling
    pub fn new(pos: Vec2, radius: f32, color: Color, fall_speed: f32) -> Self {
        Self {
            pos,
            radius,
            color,
            fall_speed,
            falling: true,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Pixels moved per frame while falling
    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    /// Advance one frame. Returns true if the particle settled on this frame.
    ///
    /// Once settled a particle never falls again through physics alone.
    pub fn step(&mut self, floor: f32) -> bool {
        if !self.falling {
            return false;
        }

        self.pos.y += self.fall_speed;
        if self.pos.y + self.radius > floor {
            self.pos.y = floor - self.radius;
            self.falling = false;
            return true;
        }
        false
    }

    /// Strictly inside the disc (points on the rim do not count)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(y: f32) -> Particle {
        Particle::new(Vec2::new(400.0, y), 10.0, Color::from_hue(0.0), 5.0)
    }

    #[test]
    fn test_step_falls_by_speed() {
        let mut p = ball(-50.0);
        assert!(!p.step(600.0));
        assert_eq!(p.pos.y, -45.0);
        assert!(p.is_falling());
    }

    #[test]
    fn test_step_clamps_to_floor() {
        let mut p = ball(588.0);
        assert!(p.step(600.0));
        assert_eq!(p.pos.y, 590.0);
        assert!(!p.is_falling());

        // Settled particles stay put
        assert!(!p.step(600.0));
        assert_eq!(p.pos.y, 590.0);
    }

    #[test]
    fn test_step_exact_floor_contact_keeps_falling() {
        // y + r == floor is not past the floor
        let mut p = ball(585.0);
        assert!(!p.step(600.0));
        assert_eq!(p.pos.y, 590.0);
        assert!(p.is_falling());
    }

    #[test]
    fn test_contains_is_strict() {
        let p = ball(100.0);
        assert!(p.contains(Vec2::new(400.0, 100.0)));
        assert!(p.contains(Vec2::new(409.9, 100.0)));
        assert!(!p.contains(Vec2::new(410.0, 100.0)));
    }

    #[test]
    fn test_color_primaries() {
        assert_eq!(Color::from_hue(0.0).rgba(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(Color::from_hue(120.0).rgba(), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(Color::from_hue(240.0).rgba(), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(Color::from_hue(60.0).rgba(), [1.0, 1.0, 0.0, 1.0]);
        // Wraps
        assert_eq!(Color::from_hue(360.0).hue, 0.0);
    }
}
