//! Error types for mounting the briefing page

use thiserror::Error;

/// Errors raised while wiring components to the page
///
/// Missing buttons and sections are not errors; components treat them as
/// absent features. Only the drawing surface is a hard requirement, and only
/// for the particle field.
#[derive(Error, Debug)]
pub enum BriefingError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    /// The particle field cannot run without its canvas
    #[error("drawing surface #{0} not found")]
    MissingSurface(String),

    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    #[error("2d rendering context unavailable")]
    NoRenderingContext,

    /// Page config block could not be parsed
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
