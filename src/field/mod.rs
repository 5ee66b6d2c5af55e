//! Ambient particle field
//!
//! A canvas-sized population of independent motes that drift with constant
//! velocity and wrap around the canvas edges. The population is sized from the
//! viewport width and regenerated wholesale on every resize.

pub mod particle;

pub use particle::{Particle, wrap_axis};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::color::Rgba;
use crate::config::FieldConfig;

/// 2D drawing target for the field (a canvas in the browser)
pub trait Surface {
    /// Drawing buffer size in pixels
    fn size(&self) -> (f32, f32);
    fn set_size(&mut self, width: f32, height: f32);
    fn clear(&mut self, width: f32, height: f32);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &Rgba);
}

/// Particle count for a viewport: `min(floor(width * density), max)`
pub fn particle_count(width: f32, config: &FieldConfig) -> usize {
    let scaled = (width * config.density).floor();
    if !(scaled > 0.0) {
        return 0;
    }
    // Float to int casts saturate
    (scaled as usize).min(config.max_particles)
}

/// The ambient field: owns every particle and the RNG that spawns them
pub struct ParticleField {
    config: FieldConfig,
    bounds: Vec2,
    particles: Vec<Particle>,
    rng: Pcg32,
    frames: u64,
}

impl ParticleField {
    /// Create an empty field; call [`initialize`](Self::initialize) to populate
    pub fn new(config: FieldConfig, seed: u64) -> Self {
        Self {
            config,
            bounds: Vec2::ZERO,
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            frames: 0,
        }
    }

    /// Replace the whole population for a canvas of the given size
    pub fn initialize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(sanitize(width), sanitize(height));
        let count = particle_count(self.bounds.x, &self.config);

        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::random(&mut self.rng, self.bounds, &self.config);
            self.particles.push(particle);
        }

        log::debug!(
            "Particle field {}x{}: {} particles",
            self.bounds.x,
            self.bounds.y,
            count
        );
    }

    /// Resize the surface to the viewport and regenerate the population
    ///
    /// Previous particles are discarded, not rescaled.
    pub fn resize(&mut self, surface: &mut impl Surface, width: f32, height: f32) {
        surface.set_size(width, height);
        self.initialize(width, height);
    }

    /// Advance every particle one frame
    pub fn tick(&mut self) {
        let bounds = self.bounds;
        for particle in self.particles.iter_mut() {
            particle.advance(bounds);
        }
        self.frames += 1;
    }

    /// Clear the surface and draw every particle as a filled circle
    pub fn render(&self, surface: &mut impl Surface) {
        surface.clear(self.bounds.x, self.bounds.y);
        for p in &self.particles {
            surface.fill_circle(p.pos.x, p.pos.y, p.radius, &p.color);
        }
    }

    /// Tick then render; one animation frame
    pub fn frame(&mut self, surface: &mut impl Surface) {
        self.tick();
        self.render(surface);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Frames ticked since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

fn sanitize(extent: f32) -> f32 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::testing::{DrawCall, RecordingSurface};
    use proptest::prelude::*;

    #[test]
    fn test_count_scales_with_width() {
        let config = FieldConfig::default();
        assert_eq!(particle_count(0.0, &config), 0);
        assert_eq!(particle_count(9.0, &config), 0);
        assert_eq!(particle_count(375.0, &config), 37);
        assert_eq!(particle_count(999.0, &config), 99);
        assert_eq!(particle_count(1000.0, &config), 100);
        assert_eq!(particle_count(3840.0, &config), 100);
        assert_eq!(particle_count(-50.0, &config), 0);
        assert_eq!(particle_count(f32::NAN, &config), 0);
    }

    #[test]
    fn test_midnight_preset_is_denser() {
        let config = Preset::Midnight.field();
        assert_eq!(particle_count(800.0, &config), 120);
        assert_eq!(particle_count(3840.0, &config), 150);
    }

    #[test]
    fn test_initialize_populates() {
        let mut field = ParticleField::new(FieldConfig::default(), 42);
        assert!(field.particles().is_empty());

        field.initialize(800.0, 600.0);
        assert_eq!(field.particles().len(), 80);
        assert_eq!(field.bounds(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_same_seed_same_field() {
        let mut a = ParticleField::new(FieldConfig::default(), 9);
        let mut b = ParticleField::new(FieldConfig::default(), 9);
        a.initialize(500.0, 500.0);
        b.initialize(500.0, 500.0);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_tick_moves_by_velocity() {
        let mut field = ParticleField::new(FieldConfig::default(), 1);
        field.initialize(400.0, 300.0);
        // Pin one particle mid-canvas so no wrap happens
        field.particles[0].pos = Vec2::new(200.0, 150.0);
        field.particles[0].vel = Vec2::new(0.2, -0.1);

        field.tick();
        let p = &field.particles()[0];
        assert!((p.pos.x - 200.2).abs() < 1e-4);
        assert!((p.pos.y - 149.9).abs() < 1e-4);
        assert_eq!(field.frames(), 1);
    }

    #[test]
    fn test_tick_wraps_each_axis() {
        let mut field = ParticleField::new(FieldConfig::default(), 1);
        field.initialize(100.0, 50.0);
        field.particles.truncate(2);
        field.particles[0].pos = Vec2::new(99.9, 10.0);
        field.particles[0].vel = Vec2::new(0.25, 0.0);
        field.particles[1].pos = Vec2::new(10.0, 0.05);
        field.particles[1].vel = Vec2::new(0.0, -0.25);

        field.tick();
        let right = &field.particles()[0];
        assert!(right.pos.x < 1.0, "re-entered at left edge: {}", right.pos.x);
        assert_eq!(right.pos.y, 10.0);
        let top = &field.particles()[1];
        assert!(top.pos.y > 49.0, "re-entered at bottom edge: {}", top.pos.y);
        assert_eq!(top.pos.x, 10.0);
    }

    #[test]
    fn test_resize_regenerates() {
        let mut surface = RecordingSurface::new(1200.0, 800.0);
        let mut field = ParticleField::new(FieldConfig::default(), 3);
        field.initialize(1200.0, 800.0);
        let before = field.particles().to_vec();

        field.resize(&mut surface, 500.0, 400.0);
        assert_eq!(surface.size(), (500.0, 400.0));
        assert_eq!(field.particles().len(), 50);
        assert_ne!(field.particles(), &before[..50]);
        for p in field.particles() {
            assert!(p.pos.x < 500.0 && p.pos.y < 400.0);
        }
    }

    #[test]
    fn test_render_clears_then_draws_all() {
        let mut surface = RecordingSurface::new(300.0, 200.0);
        let mut field = ParticleField::new(FieldConfig::default(), 5);
        field.initialize(300.0, 200.0);

        field.frame(&mut surface);
        assert_eq!(surface.calls.len(), 31);
        assert_eq!(surface.calls[0], DrawCall::Clear(300.0, 200.0));
        for (call, p) in surface.calls[1..].iter().zip(field.particles()) {
            assert_eq!(
                *call,
                DrawCall::Circle {
                    x: p.pos.x,
                    y: p.pos.y,
                    radius: p.radius,
                    color: p.color,
                }
            );
        }
    }

    #[test]
    fn test_zero_height_does_not_panic() {
        let mut field = ParticleField::new(FieldConfig::default(), 11);
        field.initialize(1000.0, 0.0);
        assert_eq!(field.particles().len(), 100);
        for _ in 0..10 {
            field.tick();
        }
        assert!(field.particles().iter().all(|p| p.pos.y == 0.0));
    }

    proptest! {
        #[test]
        fn prop_particles_stay_in_bounds(
            seed in any::<u64>(),
            width in 1.0f32..2000.0,
            height in 1.0f32..2000.0,
            ticks in 0usize..400,
        ) {
            let mut field = ParticleField::new(FieldConfig::default(), seed);
            field.initialize(width, height);
            for _ in 0..ticks {
                field.tick();
            }
            for p in field.particles() {
                prop_assert!(p.pos.x >= 0.0 && p.pos.x < width);
                prop_assert!(p.pos.y >= 0.0 && p.pos.y < height);
            }
        }

        #[test]
        fn prop_count_matches_width(width in 0.0f32..5000.0) {
            let mut field = ParticleField::new(FieldConfig::default(), 0);
            field.initialize(width, 100.0);
            let expected = ((width * 0.1).floor() as usize).min(100);
            prop_assert_eq!(field.particles().len(), expected);
        }
    }
}
