//! Input model: drag events, drag sources, and the pointer gesture recognizer.
//!
//! The controller consumes [`DragEvent`]s, which carry cumulative horizontal
//! displacement since the gesture started. Where those come from is the
//! host's business: a [`DragSource`] can be a scripted sequence (tests, the
//! CLI) or the output of [`PanRecognizer`], which turns raw pointer
//! down/move/up into pans and backdrop taps.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::VecDeque;

use crate::hit::HitPart;
use crate::machine::Event;

/// One step of a horizontal drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// The pan activated.
    Start,
    /// The pointer moved; `dx` is cumulative since the pointer went down.
    Move { dx: f64 },
    /// The pointer lifted; terminal.
    End { dx: f64 },
    /// The platform aborted the gesture; terminal.
    Cancel,
}

impl DragEvent {
    /// Whether this event ends the gesture.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::End { .. } | Self::Cancel)
    }
}

impl From<DragEvent> for Event {
    fn from(event: DragEvent) -> Self {
        match event {
            DragEvent::Start => Event::DragStart,
            DragEvent::Move { dx } => Event::DragMove { dx },
            DragEvent::End { dx } => Event::DragEnd { dx },
            DragEvent::Cancel => Event::DragCancel,
        }
    }
}

/// Anything that can feed drag events to the controller.
pub trait DragSource {
    /// Next pending event, or `None` when nothing is queued.
    fn next_event(&mut self) -> Option<DragEvent>;
}

/// A pre-recorded drag, replayed in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDrag {
    events: VecDeque<DragEvent>,
}

impl ScriptedDrag {
    #[must_use]
    pub fn new(events: impl IntoIterator<Item = DragEvent>) -> Self {
        Self { events: events.into_iter().collect() }
    }

    /// A straight horizontal swipe to `dx`, reported in `steps` equal moves,
    /// then released.
    #[must_use]
    pub fn swipe(dx: f64, steps: u32) -> Self {
        let steps = steps.max(1);
        let moves = (1..=steps).map(|i| DragEvent::Move { dx: dx * f64::from(i) / f64::from(steps) });
        Self::new(std::iter::once(DragEvent::Start).chain(moves).chain(std::iter::once(DragEvent::End { dx })))
    }
}

impl DragSource for ScriptedDrag {
    fn next_event(&mut self) -> Option<DragEvent> {
        self.events.pop_front()
    }
}

/// What the recognizer reports to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Drag(DragEvent),
    BackdropTap,
}

impl From<Gesture> for Event {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::Drag(drag) => drag.into(),
            Gesture::BackdropTap => Event::BackdropTap,
        }
    }
}

/// Internal state of the pointer recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No pointer is down, or the press landed on nothing of ours.
    #[default]
    Idle,
    /// Pressed on the panel; waiting for horizontal travel to pass the slop.
    Armed {
        /// Screen x where the pointer went down.
        start_x: f64,
    },
    /// Pan active; every move is reported.
    Panning {
        /// Screen x where the pointer went down.
        start_x: f64,
    },
    /// Pressed on the backdrop; a release over the backdrop is a tap.
    PressingBackdrop,
}

/// Turns raw pointer events into [`Gesture`]s.
#[derive(Debug, Clone)]
pub struct PanRecognizer {
    state: InputState,
    activation_slop: f64,
}

impl PanRecognizer {
    #[must_use]
    pub fn new(activation_slop: f64) -> Self {
        Self { state: InputState::Idle, activation_slop }
    }

    #[must_use]
    pub fn state(&self) -> InputState {
        self.state
    }

    /// Pointer pressed at screen `x`, over `hit`.
    pub fn pointer_down(&mut self, x: f64, hit: Option<HitPart>) -> Vec<Gesture> {
        if self.state != InputState::Idle {
            tracing::trace!("second pointer ignored");
            return Vec::new();
        }
        self.state = match hit {
            Some(HitPart::Panel) => InputState::Armed { start_x: x },
            Some(HitPart::Backdrop) => InputState::PressingBackdrop,
            None => InputState::Idle,
        };
        Vec::new()
    }

    /// Pointer moved to screen `x`.
    pub fn pointer_move(&mut self, x: f64) -> Vec<Gesture> {
        match self.state {
            InputState::Armed { start_x } => {
                let dx = x - start_x;
                if dx.abs() <= self.activation_slop {
                    return Vec::new();
                }
                self.state = InputState::Panning { start_x };
                vec![Gesture::Drag(DragEvent::Start), Gesture::Drag(DragEvent::Move { dx })]
            }
            InputState::Panning { start_x } => vec![Gesture::Drag(DragEvent::Move { dx: x - start_x })],
            InputState::Idle | InputState::PressingBackdrop => Vec::new(),
        }
    }

    /// Pointer released at screen `x`, over `hit`.
    pub fn pointer_up(&mut self, x: f64, hit: Option<HitPart>) -> Vec<Gesture> {
        let previous = std::mem::take(&mut self.state);
        match previous {
            InputState::Panning { start_x } => vec![Gesture::Drag(DragEvent::End { dx: x - start_x })],
            InputState::PressingBackdrop if hit == Some(HitPart::Backdrop) => vec![Gesture::BackdropTap],
            InputState::PressingBackdrop | InputState::Armed { .. } | InputState::Idle => Vec::new(),
        }
    }

    /// The platform took the pointer away (scroll takeover, system gesture).
    pub fn pointer_cancel(&mut self) -> Vec<Gesture> {
        match std::mem::take(&mut self.state) {
            InputState::Panning { .. } => vec![Gesture::Drag(DragEvent::Cancel)],
            InputState::Armed { .. } | InputState::PressingBackdrop | InputState::Idle => Vec::new(),
        }
    }
}
