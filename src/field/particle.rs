//! A single ambient particle

use glam::Vec2;
use rand::Rng;

use crate::color::Rgba;
use crate::config::FieldConfig;

/// A drifting mote of the background field
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

impl Particle {
    /// Spawn at a uniformly random position inside `bounds`
    pub fn random(rng: &mut impl Rng, bounds: Vec2, config: &FieldConfig) -> Self {
        let pos = Vec2::new(
            wrap_axis(rng.random::<f32>() * bounds.x, bounds.x),
            wrap_axis(rng.random::<f32>() * bounds.y, bounds.y),
        );
        let vel = Vec2::new(
            symmetric(rng, config.max_speed),
            symmetric(rng, config.max_speed),
        );
        let radius = lerp(config.min_radius, config.max_radius, rng.random());
        let alpha = lerp(config.alpha_min, config.alpha_max, rng.random());

        Self {
            pos,
            vel,
            radius,
            color: config.color.with_alpha(alpha),
        }
    }

    /// Move one frame, re-entering from the opposite edge when leaving `bounds`
    pub fn advance(&mut self, bounds: Vec2) {
        self.pos += self.vel;
        self.pos.x = wrap_axis(self.pos.x, bounds.x);
        self.pos.y = wrap_axis(self.pos.y, bounds.y);
    }
}

/// Toroidal wrap of one coordinate into `[0, extent)`
///
/// Leaving past the far edge re-enters near 0, leaving past 0 re-enters near
/// `extent`. Degenerate extents pin the coordinate to 0.
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if !(extent > 0.0) || !extent.is_finite() || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

fn symmetric(rng: &mut impl Rng, bound: f32) -> f32 {
    (rng.random::<f32>() * 2.0 - 1.0) * bound
}

fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t
}
