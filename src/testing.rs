//! Test doubles shared by the component tests

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::celebration::{Burst, BurstRenderer, Trigger};
use crate::color::Rgba;
use crate::dom::Element;
use crate::field::Surface;

#[derive(Debug, Default)]
struct FakeElementState {
    classes: BTreeSet<String>,
    text: String,
}

/// In-memory element; clones share state like DOM handles do
#[derive(Debug, Clone, Default)]
pub struct FakeElement(Rc<RefCell<FakeElementState>>);

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(classes: &[&str]) -> Self {
        let el = Self::new();
        for class in classes {
            el.add_class(class);
        }
        el
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.iter().cloned().collect()
    }
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }
}

/// Counts `fire()` calls
#[derive(Debug, Default)]
pub struct CountingTrigger {
    fired: Cell<usize>,
}

impl CountingTrigger {
    pub fn count(&self) -> usize {
        self.fired.get()
    }
}

impl Trigger for CountingTrigger {
    fn fire(&self) {
        self.fired.set(self.fired.get() + 1);
    }
}

/// Records every burst it is asked to render
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub bursts: RefCell<Vec<Burst>>,
}

impl BurstRenderer for RecordingRenderer {
    fn burst(&self, burst: &Burst) {
        self.bursts.borrow_mut().push(burst.clone());
    }
}

/// Drawing call captured by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(f32, f32),
    Circle { x: f32, y: f32, radius: f32, color: Rgba },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.calls.push(DrawCall::Clear(width, height));
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &Rgba) {
        self.calls.push(DrawCall::Circle {
            x,
            y,
            radius,
            color: *color,
        });
    }
}
