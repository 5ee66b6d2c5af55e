//! Page configuration and presets
//!
//! Defaults come from a [`Preset`]; a page may override any part by embedding
//! a JSON block (`<script type="application/json" id="briefing-config">`).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::BriefingError;

/// Visual preset: palette and particle density/opacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Dark navy motes on a cream page
    #[default]
    #[serde(alias = "light")]
    Cream,
    /// Gold motes on a dark page, denser and brighter
    #[serde(alias = "dark")]
    Midnight,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Cream => "cream",
            Preset::Midnight => "midnight",
        }
    }

    /// Ambient field parameters for this preset
    pub fn field(&self) -> FieldConfig {
        match self {
            Preset::Cream => FieldConfig::default(),
            Preset::Midnight => FieldConfig {
                density: 0.15,
                max_particles: 150,
                color: Rgba::rgb(212, 175, 55),
                alpha_min: 0.2,
                alpha_max: 0.7,
                ..FieldConfig::default()
            },
        }
    }

    /// Confetti parameters for this preset
    pub fn celebration(&self) -> CelebrationConfig {
        match self {
            Preset::Cream => CelebrationConfig::default(),
            Preset::Midnight => CelebrationConfig {
                colors: vec![
                    Rgba::rgb(212, 175, 55),
                    Rgba::rgb(245, 230, 200),
                    Rgba::rgb(255, 255, 255),
                ],
                ..CelebrationConfig::default()
            },
        }
    }
}

/// Hard cap on ambient particles, whatever the page config asks for
pub const MAX_FIELD_PARTICLES: usize = 2000;

/// Ambient particle field parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Particles per pixel of viewport width
    pub density: f32,
    /// Upper bound on particle count (bounds cost on wide screens)
    pub max_particles: usize,
    /// Per-axis speed bound, pixels per frame
    pub max_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Particle hue; alpha is randomized per particle
    pub color: Rgba,
    pub alpha_min: f32,
    pub alpha_max: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: 0.1,
            max_particles: 100,
            max_speed: 0.25,
            min_radius: 0.5,
            max_radius: 2.5,
            color: Rgba::rgb(26, 37, 58),
            alpha_min: 0.1,
            alpha_max: 0.4,
        }
    }
}

impl FieldConfig {
    /// Clamp values that would break drawing or blow up the population
    pub fn sanitized(self) -> Self {
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        let defaults = Self::default();

        let min_radius = finite_or(self.min_radius, defaults.min_radius).max(0.0);
        let max_radius = finite_or(self.max_radius, defaults.max_radius).max(min_radius);
        let alpha_min = finite_or(self.alpha_min, defaults.alpha_min).clamp(0.0, 1.0);
        let alpha_max = finite_or(self.alpha_max, defaults.alpha_max).clamp(alpha_min, 1.0);

        Self {
            density: finite_or(self.density, defaults.density).max(0.0),
            max_particles: self.max_particles.min(MAX_FIELD_PARTICLES),
            max_speed: finite_or(self.max_speed, defaults.max_speed).abs(),
            min_radius,
            max_radius,
            alpha_min,
            alpha_max,
            ..self
        }
    }
}

/// Confetti burst parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    /// Total emission time
    pub duration_ms: u32,
    /// Particles per burst (two bursts per frame)
    pub particle_count: u32,
    /// Launch angle of the left burst in degrees; the right burst mirrors it
    pub angle: f32,
    pub spread: f32,
    #[serde(with = "hex_palette")]
    pub colors: Vec<Rgba>,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            particle_count: 7,
            angle: 60.0,
            spread: 55.0,
            colors: vec![
                Rgba::rgb(212, 175, 55),
                Rgba::rgb(26, 37, 58),
                Rgba::rgb(255, 255, 255),
            ],
        }
    }
}

impl CelebrationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }
}

/// Animation sequencing delays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Delay before the incoming card is activated (overlapping cross-fade)
    pub card_overlap_ms: u32,
    /// Delay before the incoming stage is shown (sequential cross-fade)
    pub stage_fade_ms: u32,
    /// Fade-out time of the message panel before it is hidden
    pub reveal_fade_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            card_overlap_ms: 300,
            stage_fade_ms: 600,
            reveal_fade_ms: 500,
        }
    }
}

impl Timing {
    /// All delays zero
    pub fn instant() -> Self {
        Self {
            card_overlap_ms: 0,
            stage_fade_ms: 0,
            reveal_fade_ms: 0,
        }
    }

    pub fn card_overlap(&self) -> Duration {
        Duration::from_millis(u64::from(self.card_overlap_ms))
    }

    pub fn stage_fade(&self) -> Duration {
        Duration::from_millis(u64::from(self.stage_fade_ms))
    }

    pub fn reveal_fade(&self) -> Duration {
        Duration::from_millis(u64::from(self.reveal_fade_ms))
    }
}

/// Text of the briefing advance button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Shown while more cards remain
    pub advance: String,
    /// Shown on the last card
    pub complete: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            advance: "Next Directive >>".to_string(),
            complete: "Complete Mission >>".to_string(),
        }
    }
}

/// Complete page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preset: Preset,
    /// Overrides the preset's field parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldConfig>,
    /// Overrides the preset's confetti parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebration: Option<CelebrationConfig>,
    pub timing: Timing,
    pub labels: Labels,
    /// Visible fraction at which `.reveal-on-scroll` elements fade in
    pub scroll_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            field: None,
            celebration: None,
            timing: Timing::default(),
            labels: Labels::default(),
            scroll_threshold: 0.15,
        }
    }
}

impl Config {
    /// Create config from a preset (no overrides)
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Parse page config; `field`/`celebration` objects patch the chosen preset
    pub fn from_json(json: &str) -> Result<Self, BriefingError> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;

        let preset: Preset = match value.get("preset") {
            Some(p) => serde_json::from_value(p.clone())?,
            None => Preset::default(),
        };
        for (key, base) in [
            ("field", serde_json::to_value(preset.field())?),
            ("celebration", serde_json::to_value(preset.celebration())?),
        ] {
            if let Some(patch) = value.get_mut(key).filter(|v| v.is_object()) {
                let mut merged = base;
                merge_json(&mut merged, patch.take());
                *patch = merged;
            }
        }

        let mut config: Self = serde_json::from_value(value)?;
        config.field = config.field.map(FieldConfig::sanitized);
        Ok(config)
    }

    /// Effective field parameters
    pub fn field(&self) -> FieldConfig {
        self.field.clone().unwrap_or_else(|| self.preset.field())
    }

    /// Effective confetti parameters
    pub fn celebration(&self) -> CelebrationConfig {
        self.celebration
            .clone()
            .unwrap_or_else(|| self.preset.celebration())
    }

    /// Load overrides from the page's config block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(document: &web_sys::Document) -> Self {
        let Some(el) = document.get_element_by_id(crate::consts::CONFIG_ID) else {
            log::info!("No page config, using {} preset", Preset::default().as_str());
            return Self::default();
        };

        let json = el.text_content().unwrap_or_default();
        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded page config ({} preset)", config.preset.as_str());
                config
            }
            Err(e) => {
                log::warn!("Ignoring page config: {e}");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

/// Recursively overlay `patch` onto `base`; non-object values replace
fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                merge_json(base.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (base, patch) => *base = patch,
    }
}

/// Palettes are written as `#RRGGBB` strings in page config
mod hex_palette {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::color::Rgba;

    pub fn serialize<S: Serializer>(colors: &[Rgba], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(colors.iter().map(Rgba::to_hex))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Rgba>, D::Error> {
        Vec::<String>::deserialize(d)?
            .iter()
            .map(|hex| {
                Rgba::from_hex(hex).ok_or_else(|| D::Error::custom(format!("bad color {hex:?}")))
            })
            .collect()
    }
}
