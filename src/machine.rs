//! Panel state machine: a pure `(state, event) -> (state, effects)` function.
//!
//! ```text
//! Closed --directive(open)--> Open --directive(closed)--> Closed
//! Open --drag start--> Dragging --release(dx > threshold)--> Closed (+close request)
//!                       Dragging --release(dx <= threshold)--> Open
//!                       Dragging --platform cancel-------------> Open
//! ```
//!
//! Nothing here touches the animator or the clock. The controller applies the
//! returned [`Effect`]s, which keeps every rule testable in isolation.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use serde::Serialize;

/// Where the panel is headed, or whether the pointer currently owns it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Resting at, or springing toward, fully open.
    Open,
    /// Resting at, or springing toward, fully closed.
    #[default]
    Closed,
    /// The pointer owns the offset.
    Dragging {
        /// Cumulative horizontal displacement since the drag started.
        dx: f64,
    },
}

/// Full machine state: the visual phase plus the owner's last directive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct PanelState {
    pub phase: Phase,
    /// Last directive received from the owner. Only directives change it.
    pub commanded_open: bool,
}

impl PanelState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// The backdrop exists exactly while the owner says the panel is open.
    #[must_use]
    pub fn backdrop_visible(&self) -> bool {
        self.commanded_open
    }
}

/// Inputs to the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The owner set `is_open`.
    Directive { open: bool },
    /// A horizontal drag began on the panel.
    DragStart,
    /// The drag moved; `dx` is cumulative since the start.
    DragMove { dx: f64 },
    /// The pointer was released after a drag.
    DragEnd { dx: f64 },
    /// The platform aborted the gesture before release.
    DragCancel,
    /// The backdrop was tapped.
    BackdropTap,
}

/// Side effects requested by a transition, applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Stop whatever animation is running.
    CancelAnimation,
    /// Spring the offset toward `target`, starting from the current offset.
    AnimateTo { target: f64 },
    /// Set the offset directly (pointer tracking).
    Track { offset: f64 },
    /// Ask the owner to close the panel.
    RequestClose,
}

/// Panel geometry the machine needs to make decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Panel width `W`.
    pub width: f64,
    /// Drag distance beyond which a release dismisses the panel.
    pub close_threshold: f64,
}

impl Geometry {
    /// Offset of the fully open panel.
    pub const OPEN: f64 = 0.0;

    /// Offset of the fully closed panel.
    #[must_use]
    pub fn closed(&self) -> f64 {
        -self.width
    }

    /// Resting offset for a directive.
    #[must_use]
    pub fn rest_for(&self, open: bool) -> f64 {
        if open { Self::OPEN } else { self.closed() }
    }

    /// Clamp any offset into `[-W, 0]`.
    #[must_use]
    pub fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(self.closed(), Self::OPEN)
    }

    /// Offset shown while dragging with cumulative displacement `dx`.
    ///
    /// Only rightward travel moves the panel; leftward travel is held at the
    /// open boundary, so the panel can never be pulled past fully open.
    #[must_use]
    pub fn tracked_offset(&self, dx: f64) -> f64 {
        if dx > 0.0 { self.clamp(-self.width + dx) } else { Self::OPEN }
    }

    /// Whether releasing at `dx` dismisses the panel.
    #[must_use]
    pub fn commits_close(&self, dx: f64) -> bool {
        dx > self.close_threshold
    }
}

/// Apply one event. Ignored events return the state unchanged with no effects.
#[must_use]
pub fn transition(state: PanelState, event: Event, geometry: &Geometry) -> (PanelState, Vec<Effect>) {
    match event {
        Event::Directive { open } => on_directive(state, open, geometry),

        Event::DragStart => match state.phase {
            Phase::Open => {
                let next = PanelState { phase: Phase::Dragging { dx: 0.0 }, ..state };
                (next, vec![Effect::CancelAnimation])
            }
            Phase::Closed | Phase::Dragging { .. } => ignore(state, "drag start while not open"),
        },

        Event::DragMove { dx } => match state.phase {
            Phase::Dragging { .. } => {
                let next = PanelState { phase: Phase::Dragging { dx }, ..state };
                (next, vec![Effect::Track { offset: geometry.tracked_offset(dx) }])
            }
            Phase::Open | Phase::Closed => ignore(state, "drag move without active drag"),
        },

        Event::DragEnd { dx } => match state.phase {
            Phase::Dragging { .. } if geometry.commits_close(dx) => {
                tracing::debug!(dx, threshold = geometry.close_threshold, "drag committed close");
                let next = PanelState { phase: Phase::Closed, ..state };
                (next, vec![Effect::AnimateTo { target: geometry.closed() }, Effect::RequestClose])
            }
            Phase::Dragging { .. } => {
                tracing::debug!(dx, threshold = geometry.close_threshold, "drag released below threshold");
                spring_open(state)
            }
            Phase::Open | Phase::Closed => ignore(state, "drag end without active drag"),
        },

        Event::DragCancel => match state.phase {
            Phase::Dragging { .. } => {
                tracing::debug!("drag cancelled by platform");
                spring_open(state)
            }
            Phase::Open | Phase::Closed => ignore(state, "drag cancel without active drag"),
        },

        Event::BackdropTap => {
            if state.backdrop_visible() {
                tracing::debug!("backdrop tapped");
                (state, vec![Effect::RequestClose])
            } else {
                ignore(state, "backdrop tap while closed")
            }
        }
    }
}

fn on_directive(state: PanelState, open: bool, geometry: &Geometry) -> (PanelState, Vec<Effect>) {
    if state.commanded_open == open {
        return ignore(state, "repeated directive");
    }

    let target_phase = if open { Phase::Open } else { Phase::Closed };
    let next = PanelState { phase: target_phase, commanded_open: open };

    // Already heading there, e.g. the owner confirming a drag dismissal.
    if state.phase == target_phase {
        tracing::debug!(open, "directive recorded, panel already in place");
        return (next, Vec::new());
    }

    tracing::debug!(open, "directive changed");
    (next, vec![Effect::AnimateTo { target: geometry.rest_for(open) }])
}

fn spring_open(state: PanelState) -> (PanelState, Vec<Effect>) {
    let next = PanelState { phase: Phase::Open, ..state };
    (next, vec![Effect::AnimateTo { target: Geometry::OPEN }])
}

fn ignore(state: PanelState, reason: &'static str) -> (PanelState, Vec<Effect>) {
    tracing::trace!(reason, "event ignored");
    (state, Vec::new())
}
