//! Mission Briefing - an interactive single-page briefing in WebAssembly
//!
//! Core modules:
//! - `field`: Ambient particle field (spawn, wraparound tick, render)
//! - `sequencer`: Intro → briefing cards → celebration stage machine
//! - `reveal`: Hidden message panel toggle
//! - `celebration`: Timed confetti bursts
//! - `schedule`: Timers, animation frames and loop handles
//! - `dom`: Element handle abstraction
//! - `platform`: Browser bindings (wasm32 only)
//! - `config`: Presets and page-embedded overrides

pub mod celebration;
pub mod color;
pub mod config;
pub mod dom;
pub mod error;
pub mod field;
pub mod platform;
pub mod reveal;
pub mod schedule;
pub mod sequencer;

#[cfg(test)]
pub(crate) mod testing;

pub use celebration::{Burst, BurstRenderer, Celebration, Trigger};
pub use color::Rgba;
pub use config::{Config, Preset, Timing};
pub use error::BriefingError;
pub use field::{ParticleField, Surface};
pub use reveal::{RevealPanel, RevealState};
pub use schedule::{LoopHandle, ManualScheduler, Scheduler, start_loop};
pub use sequencer::{CardState, SequencerElements, Stage, StageSequencer};

/// Page contract: element ids, selectors and state classes
pub mod consts {
    /// Canvas hosting the ambient particle field
    pub const CANVAS_ID: &str = "particle-canvas";

    /// Stage sections
    pub const STAGE_INTRO_ID: &str = "stage-intro";
    pub const STAGE_BRIEFING_ID: &str = "stage-briefing";
    pub const STAGE_CELEBRATION_ID: &str = "stage-celebration";

    /// Stage controls
    pub const START_BUTTON_ID: &str = "start-mission-btn";
    pub const NEXT_BUTTON_ID: &str = "next-card-btn";
    pub const REPLAY_BUTTON_ID: &str = "replay-btn";

    /// Briefing cards, in document order
    pub const CARD_SELECTOR: &str = ".mission-card";

    /// Hidden message panel and its controls
    pub const REVEAL_BUTTON_ID: &str = "reveal-btn";
    pub const REVEAL_PANEL_ID: &str = "secret-message";
    pub const REVEAL_CLOSE_ID: &str = "close-message-btn";

    /// Elements faded in when scrolled into view
    pub const SCROLL_REVEAL_SELECTOR: &str = ".reveal-on-scroll";

    /// `<script type="application/json">` block with config overrides
    pub const CONFIG_ID: &str = "briefing-config";

    /// State classes
    pub const ACTIVE_CLASS: &str = "active";
    pub const EXIT_CLASS: &str = "exit";
    pub const VISIBLE_CLASS: &str = "visible";
    pub const CLOSING_CLASS: &str = "closing";
}
