//! Timers and animation frames
//!
//! Everything time-related goes through [`Scheduler`]. In the browser it maps to
//! `setTimeout` and `requestAnimationFrame`; [`ManualScheduler`] drives a
//! virtual clock for tests and headless runs.
//!
//! Scheduled work cannot be cancelled. Per-frame loops are the exception: they
//! run through [`start_loop`], whose [`LoopHandle`] stops the chain.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Source of time, delays and animation frames (single-threaded)
pub trait Scheduler {
    /// Current wall-clock time in milliseconds
    fn now_ms(&self) -> f64;

    /// Run `task` once after `delay`
    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>);

    /// Run `task` on the next animation frame with the frame timestamp (ms)
    fn next_frame(&self, task: Box<dyn FnOnce(f64)>);
}

/// Handle to a running per-frame loop
#[derive(Debug, Clone)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl LoopHandle {
    /// Stop the loop; the step will not run again
    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Call `step` on every animation frame until the returned handle is stopped
pub fn start_loop<F>(scheduler: Rc<dyn Scheduler>, step: F) -> LoopHandle
where
    F: FnMut(f64) + 'static,
{
    let running = Rc::new(Cell::new(true));
    request_step(scheduler, running.clone(), Rc::new(RefCell::new(step)));
    LoopHandle { running }
}

fn request_step<F>(scheduler: Rc<dyn Scheduler>, running: Rc<Cell<bool>>, step: Rc<RefCell<F>>)
where
    F: FnMut(f64) + 'static,
{
    let next = scheduler.clone();
    scheduler.next_frame(Box::new(move |time| {
        if !running.get() {
            return;
        }
        (step.borrow_mut())(time);
        request_step(next, running, step);
    }));
}

struct PendingTimer {
    due: f64,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

/// Deterministic scheduler with a virtual clock
///
/// Nothing runs until the clock is moved with [`advance`](Self::advance) or
/// [`run_frame`](Self::run_frame).
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<f64>,
    seq: Cell<u64>,
    timers: RefCell<Vec<PendingTimer>>,
    frames: RefCell<Vec<Box<dyn FnOnce(f64)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward, firing due timers in (due time, insertion) order
    ///
    /// Timers scheduled by a firing timer also run if they fall due within
    /// the advanced window.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by.as_secs_f64() * 1000.0;

        while let Some(timer) = self.pop_due(target) {
            self.now.set(timer.due);
            (timer.task)();
        }

        self.now.set(target);
    }

    /// Advance by one frame interval, then run frame callbacks queued so far
    ///
    /// Callbacks requested while the frame runs wait for the next frame.
    pub fn run_frame(&self, frame_ms: f64) {
        self.advance(Duration::from_secs_f64(frame_ms.max(0.0) / 1000.0));

        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        let now = self.now.get();
        for task in frames {
            task(now);
        }
    }

    /// Timers not yet fired
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Frame callbacks waiting for the next frame
    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    fn pop_due(&self, target: f64) -> Option<PendingTimer> {
        let mut timers = self.timers.borrow_mut();
        let idx = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        Some(timers.remove(idx))
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().push(PendingTimer {
            due: self.now.get() + delay.as_secs_f64() * 1000.0,
            seq,
            task,
        });
    }

    fn next_frame(&self, task: Box<dyn FnOnce(f64)>) {
        self.frames.borrow_mut().push(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_due_order() {
        let sched = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (name, ms) in [("slow", 600), ("fast", 300), ("tie", 300)] {
            let log = log.clone();
            sched.after(
                Duration::from_millis(ms),
                Box::new(move || log.borrow_mut().push(name)),
            );
        }

        sched.advance(Duration::from_millis(299));
        assert!(log.borrow().is_empty());

        sched.advance(Duration::from_millis(1));
        assert_eq!(*log.borrow(), vec!["fast", "tie"]);

        sched.advance(Duration::from_millis(1000));
        assert_eq!(*log.borrow(), vec!["fast", "tie", "slow"]);
        assert_eq!(sched.pending_timers(), 0);
        assert_eq!(sched.now_ms(), 1300.0);
    }

    #[test]
    fn test_nested_timer_within_window_fires() {
        let sched = Rc::new(ManualScheduler::new());
        let fired_at = Rc::new(Cell::new(0.0));

        let inner_sched = sched.clone();
        let inner_fired = fired_at.clone();
        sched.after(
            Duration::from_millis(100),
            Box::new(move || {
                let clock = inner_sched.clone();
                inner_sched.after(
                    Duration::from_millis(50),
                    Box::new(move || inner_fired.set(clock.now_ms())),
                );
            }),
        );

        sched.advance(Duration::from_millis(200));
        assert_eq!(fired_at.get(), 150.0);
    }

    #[test]
    fn test_zero_delay_waits_for_advance() {
        let sched = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        sched.after(Duration::ZERO, Box::new(move || f.set(true)));

        assert!(!fired.get());
        sched.advance(Duration::ZERO);
        assert!(fired.get());
    }

    #[test]
    fn test_loop_runs_until_stopped() {
        let sched = Rc::new(ManualScheduler::new());
        let steps = Rc::new(RefCell::new(Vec::new()));

        let s = steps.clone();
        let handle = start_loop(sched.clone(), move |time| s.borrow_mut().push(time));
        assert!(handle.is_running());
        assert_eq!(sched.pending_frames(), 1);

        for _ in 0..3 {
            sched.run_frame(16.0);
        }
        assert_eq!(*steps.borrow(), vec![16.0, 32.0, 48.0]);

        handle.stop();
        sched.run_frame(16.0);
        sched.run_frame(16.0);
        assert_eq!(steps.borrow().len(), 3);
        assert!(!handle.is_running());
        assert_eq!(sched.pending_frames(), 0);
    }
}
