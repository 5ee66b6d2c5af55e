//! Mission Briefing entry point
//!
//! Mounts every component onto the page and starts the ambient loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_sys::{Document, Window};

    use mission_briefing::consts::*;
    use mission_briefing::platform::web::{self, BrowserScheduler, CanvasSurface, ConfettiRenderer};
    use mission_briefing::{
        BriefingError, Celebration, Config, LoopHandle, ParticleField, RevealPanel, Scheduler,
        SequencerElements, StageSequencer, Trigger, start_loop,
    };

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Mission Briefing starting...");

        let (window, document) = match web::window().and_then(|w| Ok((w, web::document()?))) {
            Ok(pair) => pair,
            Err(e) => {
                log::error!("Cannot mount: {e}");
                return;
            }
        };

        let config = Config::load(&document);
        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new(window.clone()));
        let celebration: Rc<dyn Trigger> = Rc::new(Celebration::new(
            &config.celebration(),
            Rc::new(ConfettiRenderer::new()),
            scheduler.clone(),
        ));

        // The field is the only component with a hard requirement
        match mount_field(&window, &document, &config, scheduler.clone()) {
            Ok(_handle) => log::info!("Particle field running"),
            Err(e) => log::error!("Particle field disabled: {e}"),
        }

        mount_sequencer(&document, &config, scheduler.clone(), celebration.clone());
        mount_reveal(&document, &config, scheduler, celebration);

        let scroll_targets = web::query_all(&document, SCROLL_REVEAL_SELECTOR);
        web::observe_scroll_reveal(&scroll_targets, config.scroll_threshold);

        log::info!("Mission Briefing ready!");
    }

    fn mount_field(
        window: &Window,
        document: &Document,
        config: &Config,
        scheduler: Rc<dyn Scheduler>,
    ) -> Result<LoopHandle, BriefingError> {
        let surface = CanvasSurface::from_document(document, CANVAS_ID)?;
        let surface = Rc::new(RefCell::new(surface));

        let seed = js_sys::Date::now() as u64;
        let field = Rc::new(RefCell::new(ParticleField::new(config.field(), seed)));
        let (width, height) = web::viewport_size(window);
        field
            .borrow_mut()
            .resize(&mut *surface.borrow_mut(), width, height);
        log::info!(
            "Particle field seeded ({} particles, seed {})",
            field.borrow().particles().len(),
            seed
        );

        {
            let field = field.clone();
            let surface = surface.clone();
            let resize_window = window.clone();
            web::on_resize(window, move || {
                let (width, height) = web::viewport_size(&resize_window);
                field
                    .borrow_mut()
                    .resize(&mut *surface.borrow_mut(), width, height);
            });
        }

        Ok(start_loop(scheduler, move |_time| {
            field.borrow_mut().frame(&mut *surface.borrow_mut());
        }))
    }

    fn mount_sequencer(
        document: &Document,
        config: &Config,
        scheduler: Rc<dyn Scheduler>,
        celebration: Rc<dyn Trigger>,
    ) {
        let elements = SequencerElements {
            intro: document.get_element_by_id(STAGE_INTRO_ID),
            briefing: document.get_element_by_id(STAGE_BRIEFING_ID),
            celebration: document.get_element_by_id(STAGE_CELEBRATION_ID),
            next_button: document.get_element_by_id(NEXT_BUTTON_ID),
            cards: web::query_all(document, CARD_SELECTOR),
        };
        if elements.intro.is_none() && elements.cards.is_empty() {
            log::info!("No briefing on this page");
            return;
        }

        let sequencer = Rc::new(RefCell::new(StageSequencer::new(
            elements,
            &config.timing,
            config.labels.clone(),
            scheduler,
            celebration,
        )));

        if let Some(btn) = document.get_element_by_id(START_BUTTON_ID) {
            let sequencer = sequencer.clone();
            web::on_click(&btn, move || sequencer.borrow_mut().start());
        }
        if let Some(btn) = document.get_element_by_id(NEXT_BUTTON_ID) {
            let sequencer = sequencer.clone();
            web::on_click(&btn, move || sequencer.borrow_mut().next());
        }
        if let Some(btn) = document.get_element_by_id(REPLAY_BUTTON_ID) {
            web::on_click(&btn, move || sequencer.borrow_mut().replay());
        }
    }

    fn mount_reveal(
        document: &Document,
        config: &Config,
        scheduler: Rc<dyn Scheduler>,
        celebration: Rc<dyn Trigger>,
    ) {
        let Some(panel) = document.get_element_by_id(REVEAL_PANEL_ID) else {
            return;
        };

        let reveal = Rc::new(RevealPanel::new(
            Some(panel),
            config.timing.reveal_fade(),
            scheduler,
            celebration,
        ));

        if let Some(btn) = document.get_element_by_id(REVEAL_BUTTON_ID) {
            let reveal = reveal.clone();
            web::on_click(&btn, move || reveal.reveal());
        }
        if let Some(btn) = document.get_element_by_id(REVEAL_CLOSE_ID) {
            web::on_click(&btn, move || reveal.dismiss());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mission Briefing (native) starting...");
    log::info!("The page runs in the browser - serve index.html with `trunk serve`");

    println!("\nRunning headless particle field...");
    headless_field_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the field through ten seconds of frames on a virtual clock
#[cfg(not(target_arch = "wasm32"))]
fn headless_field_run() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use mission_briefing::{Config, ManualScheduler, ParticleField, start_loop};

    let config = Config::load();
    let (width, height) = (1280.0, 720.0);
    let field = Rc::new(RefCell::new(ParticleField::new(config.field(), 42)));
    field.borrow_mut().initialize(width, height);

    let scheduler = Rc::new(ManualScheduler::new());
    let ticking = field.clone();
    let handle = start_loop(scheduler.clone(), move |_| ticking.borrow_mut().tick());
    for _ in 0..600 {
        scheduler.run_frame(1000.0 / 60.0);
    }
    handle.stop();

    let field = field.borrow();
    let in_bounds = field
        .particles()
        .iter()
        .all(|p| (0.0..width).contains(&p.pos.x) && (0.0..height).contains(&p.pos.y));
    log::info!(
        "{} particles after {} frames, all in bounds: {}",
        field.particles().len(),
        field.frames(),
        in_bounds
    );
    assert!(in_bounds, "particles escaped the canvas");
    println!("✓ Particle field stayed in bounds");
}
