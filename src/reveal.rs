//! Hidden message panel
//!
//! Independent of the stage sequencer. Revealing sets off the celebration;
//! dismissing fades the panel out before hiding it.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::celebration::Trigger;
use crate::consts::{CLOSING_CLASS, VISIBLE_CLASS};
use crate::dom::Element;
use crate::schedule::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Visible,
    /// Fading out; becomes `Hidden` when the fade delay elapses
    Closing,
}

pub struct RevealPanel<E: Element> {
    panel: Option<E>,
    state: Rc<Cell<RevealState>>,
    fade: Duration,
    scheduler: Rc<dyn Scheduler>,
    celebration: Rc<dyn Trigger>,
}

impl<E: Element> RevealPanel<E> {
    pub fn new(
        panel: Option<E>,
        fade: Duration,
        scheduler: Rc<dyn Scheduler>,
        celebration: Rc<dyn Trigger>,
    ) -> Self {
        Self {
            panel,
            state: Rc::new(Cell::new(RevealState::Hidden)),
            fade,
            scheduler,
            celebration,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state.get()
    }

    /// Shown, including while fading out
    pub fn is_visible(&self) -> bool {
        self.state.get() != RevealState::Hidden
    }

    /// Celebrate and show the panel
    pub fn reveal(&self) {
        let Some(panel) = &self.panel else {
            return;
        };
        self.celebration.fire();
        panel.remove_class(CLOSING_CLASS);
        panel.add_class(VISIBLE_CLASS);
        self.state.set(RevealState::Visible);
        log::info!("Message revealed");
    }

    /// Start the fade-out; the panel hides once the fade delay elapses
    pub fn dismiss(&self) {
        let Some(panel) = &self.panel else {
            return;
        };
        if self.state.get() != RevealState::Visible {
            return;
        }
        panel.add_class(CLOSING_CLASS);
        self.state.set(RevealState::Closing);

        let panel = panel.clone();
        let state = self.state.clone();
        self.scheduler.after(
            self.fade,
            Box::new(move || {
                // Re-revealed during the fade
                if state.get() != RevealState::Closing {
                    return;
                }
                panel.remove_class(VISIBLE_CLASS);
                panel.remove_class(CLOSING_CLASS);
                state.set(RevealState::Hidden);
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualScheduler;
    use crate::testing::{CountingTrigger, FakeElement};

    type Fixture = (
        FakeElement,
        Rc<ManualScheduler>,
        Rc<CountingTrigger>,
        RevealPanel<FakeElement>,
    );

    fn setup(fade_ms: u64) -> Fixture {
        let panel = FakeElement::new();
        let sched = Rc::new(ManualScheduler::new());
        let trigger = Rc::new(CountingTrigger::default());
        let reveal = RevealPanel::new(
            Some(panel.clone()),
            Duration::from_millis(fade_ms),
            sched.clone(),
            trigger.clone(),
        );
        (panel, sched, trigger, reveal)
    }

    #[test]
    fn test_reveal_is_immediate() {
        let (panel, _sched, trigger, reveal) = setup(500);
        assert!(!reveal.is_visible());

        reveal.reveal();
        assert!(reveal.is_visible());
        assert_eq!(reveal.state(), RevealState::Visible);
        assert!(panel.has_class(VISIBLE_CLASS));
        assert_eq!(trigger.count(), 1);
    }

    #[test]
    fn test_dismiss_waits_for_fade() {
        let (panel, sched, _trigger, reveal) = setup(500);
        reveal.reveal();

        reveal.dismiss();
        assert!(reveal.is_visible());
        assert_eq!(reveal.state(), RevealState::Closing);
        assert!(panel.has_class(CLOSING_CLASS));

        sched.advance(Duration::from_millis(499));
        assert!(reveal.is_visible());

        sched.advance(Duration::from_millis(1));
        assert!(!reveal.is_visible());
        assert!(panel.classes().is_empty());
    }

    #[test]
    fn test_reveal_during_fade_wins() {
        let (panel, sched, trigger, reveal) = setup(500);
        reveal.reveal();
        reveal.dismiss();
        sched.advance(Duration::from_millis(200));

        reveal.reveal();
        sched.advance(Duration::from_millis(500));
        assert_eq!(reveal.state(), RevealState::Visible);
        assert_eq!(panel.classes(), vec![VISIBLE_CLASS.to_string()]);
        assert_eq!(trigger.count(), 2);
    }

    #[test]
    fn test_dismiss_when_hidden_is_noop() {
        let (panel, sched, _trigger, reveal) = setup(500);
        reveal.dismiss();
        assert_eq!(sched.pending_timers(), 0);
        assert!(panel.classes().is_empty());
    }

    #[test]
    fn test_missing_panel_is_noop() {
        let sched = Rc::new(ManualScheduler::new());
        let trigger = Rc::new(CountingTrigger::default());
        let reveal: RevealPanel<FakeElement> =
            RevealPanel::new(None, Duration::ZERO, sched.clone(), trigger.clone());

        reveal.reveal();
        reveal.dismiss();
        assert!(!reveal.is_visible());
        assert_eq!(trigger.count(), 0);
        assert_eq!(sched.pending_timers(), 0);
    }
}
