//! Browser bindings (wasm32 only)

use std::cell::Cell;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::celebration::{Burst, BurstRenderer};
use crate::color::Rgba;
use crate::consts::VISIBLE_CLASS;
use crate::error::BriefingError;
use crate::field::Surface;
use crate::schedule::Scheduler;

pub fn window() -> Result<Window, BriefingError> {
    web_sys::window().ok_or(BriefingError::NoWindow)
}

pub fn document() -> Result<Document, BriefingError> {
    window()?.document().ok_or(BriefingError::NoDocument)
}

/// Viewport size in CSS pixels
pub fn viewport_size(window: &Window) -> (f32, f32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// All elements matching `selector`, in document order
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("Bad selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attach a click handler for the page's lifetime
pub fn on_click(element: &Element, mut handler: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
    let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Attach a window resize handler for the page's lifetime
pub fn on_resize(window: &Window, mut handler: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| handler());
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// `setTimeout` / `requestAnimationFrame` scheduler
pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let scheduled = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                timeout,
            );
        if let Err(e) = scheduled {
            log::warn!("setTimeout failed: {e:?}");
        }
    }

    fn next_frame(&self, task: Box<dyn FnOnce(f64)>) {
        let callback = Closure::once_into_js(move |time: f64| task(time));
        if let Err(e) = self.window.request_animation_frame(callback.unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {e:?}");
        }
    }
}

/// Canvas 2D drawing surface
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up the canvas by id; missing or unusable canvas is fatal for the field
    pub fn from_document(document: &Document, id: &str) -> Result<Self, BriefingError> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(id)
            .ok_or_else(|| BriefingError::MissingSurface(id.to_string()))?
            .dyn_into()
            .map_err(|_| BriefingError::NotACanvas(id.to_string()))?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(BriefingError::NoRenderingContext)?
            .dyn_into()
            .map_err(|_| BriefingError::NoRenderingContext)?;

        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &Rgba) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            f64::from(x),
            f64::from(y),
            f64::from(radius),
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }
}

/// Calls the page's global `confetti(options)` function
#[derive(Default)]
pub struct ConfettiRenderer {
    warned: Cell<bool>,
}

impl ConfettiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn warn_once(&self, msg: &str) {
        if !self.warned.replace(true) {
            log::warn!("{msg}");
        }
    }
}

impl BurstRenderer for ConfettiRenderer {
    fn burst(&self, burst: &Burst) {
        let confetti = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("confetti"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        let Some(confetti) = confetti else {
            self.warn_once("confetti() not loaded, skipping celebration");
            return;
        };

        let options = serde_json::to_string(burst)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok());
        let Some(options) = options else {
            self.warn_once("Could not encode confetti options");
            return;
        };

        if let Err(e) = confetti.call1(&JsValue::NULL, &options) {
            self.warn_once(&format!("confetti() threw: {e:?}"));
        }
    }
}

/// Add the visible class to each element the first time it scrolls into view
pub fn observe_scroll_reveal(elements: &[Element], threshold: f64) {
    if elements.is_empty() {
        return;
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1(VISIBLE_CLASS);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            for el in elements {
                observer.observe(el);
            }
            log::debug!("Observing {} scroll-reveal elements", elements.len());
        }
        Err(e) => log::warn!("IntersectionObserver unavailable: {e:?}"),
    }
    callback.forget();
}
