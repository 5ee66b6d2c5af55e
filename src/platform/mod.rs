//! Platform abstraction layer
//!
//! Browser implementations of the component seams:
//! - [`Scheduler`](crate::Scheduler) over `setTimeout` / `requestAnimationFrame`
//! - [`Surface`](crate::Surface) over a canvas 2D context
//! - [`BurstRenderer`](crate::BurstRenderer) over the page's `confetti()` global
//! - Scroll reveal over `IntersectionObserver`
//!
//! Native builds use [`ManualScheduler`](crate::ManualScheduler) instead.

#[cfg(target_arch = "wasm32")]
pub mod web;
