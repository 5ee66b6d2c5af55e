//! Element handle abstraction
//!
//! Components receive element handles instead of looking them up, so they run
//! against the live DOM in the browser and against fakes in tests.

/// A page element that can carry state classes and text
///
/// Handles are cheap to clone and may be moved into delayed tasks.
pub trait Element: Clone + 'static {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn set_text(&self, text: &str);
}

#[cfg(target_arch = "wasm32")]
impl Element for web_sys::Element {
    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}
