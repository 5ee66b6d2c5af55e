//! Confetti finale
//!
//! Fire-and-forget: every animation frame for the configured duration, one
//! burst is launched from the left edge angled right and a mirrored one from
//! the right edge. Overlapping `fire()` calls simply layer their bursts.

use std::rc::Rc;

use serde::Serialize;

use crate::color::Rgba;
use crate::config::CelebrationConfig;
use crate::schedule::Scheduler;

/// Anything that can set off the celebration
pub trait Trigger {
    fn fire(&self);
}

/// Renders one confetti burst (the page's `confetti()` in the browser)
pub trait BurstRenderer {
    fn burst(&self, burst: &Burst);
}

/// Launch point in viewport fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Origin {
    pub x: f32,
    /// Renderer default (mid-height) when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// Options for a single burst, serialized as the renderer's option object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Burst {
    pub particle_count: u32,
    /// Degrees, 90 is straight up
    pub angle: f32,
    pub spread: f32,
    pub origin: Origin,
    /// `#RRGGBB`
    pub colors: Vec<String>,
}

impl Burst {
    /// The left/right pair emitted each frame
    pub fn pair(config: &CelebrationConfig) -> [Burst; 2] {
        let colors: Vec<String> = config.colors.iter().map(Rgba::to_hex).collect();
        let side = |x: f32, angle: f32| Burst {
            particle_count: config.particle_count,
            angle,
            spread: config.spread,
            origin: Origin { x, y: None },
            colors: colors.clone(),
        };
        [side(0.0, config.angle), side(1.0, 180.0 - config.angle)]
    }
}

/// The timed confetti effect
pub struct Celebration {
    bursts: Rc<[Burst; 2]>,
    duration_ms: f64,
    renderer: Rc<dyn BurstRenderer>,
    scheduler: Rc<dyn Scheduler>,
}

impl Celebration {
    pub fn new(
        config: &CelebrationConfig,
        renderer: Rc<dyn BurstRenderer>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            bursts: Rc::new(Burst::pair(config)),
            duration_ms: config.duration().as_secs_f64() * 1000.0,
            renderer,
            scheduler,
        }
    }
}

impl Trigger for Celebration {
    /// Emit the first pair now, then one pair per frame until the duration ends
    fn fire(&self) {
        let end = self.scheduler.now_ms() + self.duration_ms;
        log::info!("Celebration! ({} ms)", self.duration_ms);
        emit_frame(
            self.bursts.clone(),
            self.renderer.clone(),
            self.scheduler.clone(),
            end,
        );
    }
}

fn emit_frame(
    bursts: Rc<[Burst; 2]>,
    renderer: Rc<dyn BurstRenderer>,
    scheduler: Rc<dyn Scheduler>,
    end: f64,
) {
    for burst in bursts.iter() {
        renderer.burst(burst);
    }

    if scheduler.now_ms() < end {
        let next = scheduler.clone();
        scheduler.next_frame(Box::new(move |_| emit_frame(bursts, renderer, next, end)));
    }
}
