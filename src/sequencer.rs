//! Stage sequencer: intro → briefing cards → celebration → intro
//!
//! Stage changes hide the outgoing section immediately and show the incoming
//! one after the stage-fade delay (sequential cross-fade). Card changes mark
//! the outgoing card as exiting immediately and activate the next card after
//! the shorter card-overlap delay, so the two animate together.
//!
//! Every element is optional. A missing button or section turns that part of
//! the page into a no-op rather than an error.

use std::rc::Rc;
use std::time::Duration;

use crate::celebration::Trigger;
use crate::config::{Labels, Timing};
use crate::consts::{ACTIVE_CLASS, EXIT_CLASS};
use crate::dom::Element;
use crate::schedule::Scheduler;

/// Top-level page mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Intro,
    Briefing,
    Celebration,
}

/// Visibility of one briefing card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Inactive,
    Active,
    Exiting,
}

/// Page elements the sequencer drives
pub struct SequencerElements<E> {
    pub intro: Option<E>,
    pub briefing: Option<E>,
    pub celebration: Option<E>,
    /// Advances the briefing; its text shows the derived label
    pub next_button: Option<E>,
    /// Briefing cards in display order
    pub cards: Vec<E>,
}

impl<E> Default for SequencerElements<E> {
    fn default() -> Self {
        Self {
            intro: None,
            briefing: None,
            celebration: None,
            next_button: None,
            cards: Vec::new(),
        }
    }
}

/// The briefing state machine
pub struct StageSequencer<E: Element> {
    elements: SequencerElements<E>,
    stage: Stage,
    card_index: usize,
    card_overlap: Duration,
    stage_fade: Duration,
    labels: Labels,
    scheduler: Rc<dyn Scheduler>,
    celebration: Rc<dyn Trigger>,
}

impl<E: Element> StageSequencer<E> {
    /// Start in `Intro` with card 0 active and the label derived
    pub fn new(
        elements: SequencerElements<E>,
        timing: &Timing,
        labels: Labels,
        scheduler: Rc<dyn Scheduler>,
        celebration: Rc<dyn Trigger>,
    ) -> Self {
        let sequencer = Self {
            elements,
            stage: Stage::Intro,
            card_index: 0,
            card_overlap: timing.card_overlap(),
            stage_fade: timing.stage_fade(),
            labels,
            scheduler,
            celebration,
        };
        sequencer.reset_cards();
        sequencer.sync_button_label();
        sequencer
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn card_index(&self) -> usize {
        self.card_index
    }

    pub fn card_count(&self) -> usize {
        self.elements.cards.len()
    }

    /// Advance button text for the current card
    pub fn button_label(&self) -> &str {
        if self.card_index >= self.last_index() {
            &self.labels.complete
        } else {
            &self.labels.advance
        }
    }

    /// Visibility of card `index`, read from its classes
    pub fn card_state(&self, index: usize) -> Option<CardState> {
        let card = self.elements.cards.get(index)?;
        Some(if card.has_class(ACTIVE_CLASS) {
            CardState::Active
        } else if card.has_class(EXIT_CLASS) {
            CardState::Exiting
        } else {
            CardState::Inactive
        })
    }

    /// Start clicked: `Intro` → `Briefing` at card 0
    pub fn start(&mut self) {
        if self.stage != Stage::Intro {
            log::debug!("start ignored in {:?}", self.stage);
            return;
        }
        self.stage = Stage::Briefing;
        self.switch_stage(self.elements.intro.as_ref(), self.elements.briefing.as_ref());
        log::info!("Briefing started ({} cards)", self.card_count());
    }

    /// Next clicked: advance one card, or finish the briefing from the last card
    pub fn next(&mut self) {
        if self.stage != Stage::Briefing {
            log::debug!("next ignored in {:?}", self.stage);
            return;
        }

        if self.card_index < self.last_index() {
            let outgoing = &self.elements.cards[self.card_index];
            outgoing.remove_class(ACTIVE_CLASS);
            outgoing.add_class(EXIT_CLASS);

            self.card_index += 1;

            let incoming = self.elements.cards[self.card_index].clone();
            self.scheduler.after(
                self.card_overlap,
                Box::new(move || incoming.add_class(ACTIVE_CLASS)),
            );

            self.sync_button_label();
            log::debug!("Card {}/{}", self.card_index + 1, self.card_count());
        } else {
            self.stage = Stage::Celebration;
            self.switch_stage(
                self.elements.briefing.as_ref(),
                self.elements.celebration.as_ref(),
            );
            self.celebration.fire();
            log::info!("Briefing complete");
        }
    }

    /// Replay clicked: reset cards and label, `Celebration` → `Intro`
    pub fn replay(&mut self) {
        if self.stage != Stage::Celebration {
            log::debug!("replay ignored in {:?}", self.stage);
            return;
        }
        self.reset_cards();
        self.card_index = 0;
        self.sync_button_label();

        self.stage = Stage::Intro;
        self.switch_stage(
            self.elements.celebration.as_ref(),
            self.elements.intro.as_ref(),
        );
        log::info!("Replay");
    }

    fn last_index(&self) -> usize {
        self.elements.cards.len().saturating_sub(1)
    }

    /// Card 0 active, every other card inactive
    fn reset_cards(&self) {
        for (i, card) in self.elements.cards.iter().enumerate() {
            card.remove_class(ACTIVE_CLASS);
            card.remove_class(EXIT_CLASS);
            if i == 0 {
                card.add_class(ACTIVE_CLASS);
            }
        }
    }

    fn sync_button_label(&self) {
        if let Some(button) = &self.elements.next_button {
            button.set_text(self.button_label());
        }
    }

    fn switch_stage(&self, from: Option<&E>, to: Option<&E>) {
        if let Some(from) = from {
            from.remove_class(ACTIVE_CLASS);
        }
        if let Some(to) = to {
            let to = to.clone();
            self.scheduler
                .after(self.stage_fade, Box::new(move || to.add_class(ACTIVE_CLASS)));
        }
    }
}
