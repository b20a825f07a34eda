//! Frame-driven game loop
//!
//! Single-threaded and cooperative: input handlers only queue commands, and
//! the loop applies them at the top of each frame before yielding to the
//! engine. The loop owns its stop flag, so hosts and tests can end it without
//! tearing down a display.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::engine::{Engine, FrameSource, ShotOutcome};
use crate::input::InputCommand;
use crate::sim::{FireEvent, Session};

/// Cloneable handle that ends the loop after the current frame
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Commands queued by input handlers between frames
#[derive(Debug, Clone, Default)]
pub struct InputQueue(Rc<RefCell<VecDeque<InputCommand>>>);

impl InputQueue {
    pub fn push(&self, command: InputCommand) {
        self.0.borrow_mut().push_back(command);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    fn drain(&self) -> Vec<InputCommand> {
        self.0.borrow_mut().drain(..).collect()
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Shot dispatched this frame
    pub fired: Option<FireEvent>,
    /// Shot the engine finished this frame
    pub outcome: Option<ShotOutcome>,
}

#[derive(Debug, Default)]
pub struct GameLoop {
    stop: StopHandle,
    input: InputQueue,
    frames: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn input_queue(&self) -> InputQueue {
        self.input.clone()
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Apply queued input, then advance the engine one step
    pub fn frame<E: Engine + ?Sized>(
        &mut self,
        session: &mut Session,
        engine: &mut E,
        timestamp: f64,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        for command in self.input.drain() {
            if let Some(event) = session.apply(command, engine) {
                report.fired = Some(event);
            }
        }

        if let Some(outcome) = engine.step(timestamp) {
            if let Some(columns) = session.resolve(outcome) {
                engine.reshape(session.battlefield(), columns);
            }
            report.outcome = Some(outcome);
        }

        self.frames += 1;
        report
    }

    /// Run frames until stopped or the frame source ends
    ///
    /// Returns the number of frames run by this call.
    pub fn run<E, F>(&mut self, session: &mut Session, engine: &mut E, frames: &mut F) -> u64
    where
        E: Engine + ?Sized,
        F: FrameSource + ?Sized,
    {
        let first = self.frames;
        while !self.stop.is_stopped() {
            let Some(timestamp) = frames.next_frame() else {
                log::info!("Frame source ended");
                break;
            };
            self.frame(session, engine, timestamp);
        }
        let ran = self.frames - first;
        log::info!("Game loop exited after {} frames", ran);
        ran
    }
}
