#![allow(clippy::float_cmp)]

use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::animator::{Sample, SpringParams};
use crate::input::ScriptedDrag;
use crate::render::PanelContent;

// =============================================================
// Helpers
// =============================================================

const W: f64 = 300.0;
const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 1_000;

fn core() -> SliderCore {
    SliderCore::new(SliderConfig::new(W).unwrap()).unwrap()
}

fn open_core() -> SliderCore {
    let mut c = core();
    c.set_open(true);
    settle(&mut c);
    c
}

/// Tick until the animation stops, asserting the offset invariant every frame.
fn settle<A: Animator>(core: &mut SliderCore<A>) -> usize {
    for frame in 0..MAX_FRAMES {
        if !core.is_animating() {
            return frame;
        }
        core.tick(FRAME);
        let offset = core.offset();
        assert!((-W..=0.0).contains(&offset), "offset {offset} out of range at frame {frame}");
    }
    panic!("slider did not settle within {MAX_FRAMES} frames");
}

fn closes(actions: &[Action]) -> usize {
    actions.iter().filter(|a| **a == Action::CloseRequested).count()
}

fn counting_slider() -> (Slider, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let slider = Slider::new(SliderConfig::new(W).unwrap())
        .unwrap()
        .with_on_close(move || counter.set(counter.get() + 1));
    (slider, calls)
}

/// Animator that records calls and never moves on its own.
#[derive(Default)]
struct RecordingAnimator {
    running: Option<f64>,
    starts: Vec<(f64, f64)>,
    cancels: usize,
}

impl Animator for RecordingAnimator {
    fn animate(&mut self, from: f64, to: f64, _params: SpringParams) {
        self.starts.push((from, to));
        self.running = Some(to);
    }

    fn cancel(&mut self) {
        self.cancels += 1;
        self.running = None;
    }

    fn step(&mut self, _dt: Duration) -> Option<Sample> {
        self.running.take().map(|to| Sample { value: to, settled: true })
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }

    fn target(&self) -> Option<f64> {
        self.running
    }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn starts_closed_at_minus_width() {
    let c = core();
    assert_eq!(c.offset(), -W);
    assert!(!c.is_open());
    assert!(!c.is_animating());
    assert!(!c.backdrop_visible());
    assert_eq!(c.phase(), Phase::Closed);
}

#[test]
fn refuses_invalid_width() {
    let bad = SliderConfig { width: 0.0, ..SliderConfig::new(W).unwrap() };
    assert!(matches!(SliderCore::new(bad), Err(ConfigError::InvalidWidth(_))));
    assert!(Slider::new(bad).is_err());
}

#[test]
fn geometry_reflects_config() {
    let c = core();
    assert_eq!(c.geometry().width, W);
    assert!((c.geometry().close_threshold - 100.0).abs() < 1e-9);
    assert_eq!(c.config().width, W);
}

// =============================================================
// Directives
// =============================================================

#[test]
fn open_directive_settles_at_zero() {
    let mut c = core();
    let actions = c.set_open(true);
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert!(c.is_animating());
    settle(&mut c);
    assert_eq!(c.offset(), 0.0);
    assert!(c.backdrop_visible());
}

#[test]
fn close_directive_settles_at_minus_width() {
    let mut c = open_core();
    c.set_open(false);
    settle(&mut c);
    assert_eq!(c.offset(), -W);
    assert!(!c.backdrop_visible());
}

#[test]
fn programmatic_directives_never_request_close() {
    let mut c = core();
    let mut actions = c.set_open(true);
    actions.extend(c.set_open(false));
    actions.extend(c.set_open(true));
    assert_eq!(closes(&actions), 0);
}

#[test]
fn repeated_directive_does_not_restart_animation() {
    let mut c = SliderCore::with_animator(SliderConfig::new(W).unwrap(), RecordingAnimator::default()).unwrap();
    c.set_open(true);
    let actions = c.set_open(true);
    assert!(actions.is_empty());
    assert_eq!(c.animator.starts, vec![(-W, 0.0)]);
}

#[test]
fn repeated_directive_mid_flight_keeps_trajectory() {
    let mut a = core();
    let mut b = core();
    a.set_open(true);
    b.set_open(true);
    a.tick(FRAME);
    b.tick(FRAME);
    b.set_open(true);
    a.tick(FRAME);
    b.tick(FRAME);
    assert_eq!(a.offset(), b.offset());
}

#[test]
fn rapid_toggle_settles_on_last_directive() {
    let mut c = core();
    let mut actions = c.set_open(false);
    actions.extend(c.set_open(true));
    c.tick(FRAME);
    actions.extend(c.set_open(false));
    c.tick(FRAME);
    assert!(c.is_animating());
    settle(&mut c);
    assert_eq!(c.offset(), -W);
    assert_eq!(closes(&actions), 0);
}

#[test]
fn retarget_mid_flight_starts_from_current_offset() {
    let mut c = SliderCore::with_animator(SliderConfig::new(W).unwrap(), RecordingAnimator::default()).unwrap();
    c.set_open(true);
    c.offset = -120.0;
    c.set_open(false);
    assert_eq!(c.animator.starts, vec![(-W, 0.0), (-120.0, -W)]);
}

#[test]
fn retarget_mid_flight_has_no_jump() {
    let mut c = core();
    c.set_open(true);
    for _ in 0..5 {
        c.tick(FRAME);
    }
    let before = c.offset();
    c.set_open(false);
    assert_eq!(c.offset(), before);
    c.tick(FRAME);
    assert!((c.offset() - before).abs() < 50.0);
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_tracks_offset_live() {
    let mut c = open_core();
    c.on_drag(DragEvent::Start);
    assert!(c.is_dragging());
    let actions = c.on_drag(DragEvent::Move { dx: 50.0 });
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(c.offset(), -250.0);
    c.on_drag(DragEvent::Move { dx: 120.0 });
    assert_eq!(c.offset(), -180.0);
}

#[test]
fn leftward_drag_stays_at_open_boundary() {
    let mut c = open_core();
    c.on_drag(DragEvent::Start);
    for dx in [-1.0, -50.0, -500.0] {
        c.on_drag(DragEvent::Move { dx });
        assert_eq!(c.offset(), 0.0);
    }
}

#[test]
fn drag_start_cancels_in_flight_animation() {
    let mut c = core();
    c.set_open(true);
    c.tick(FRAME);
    assert!(c.is_animating());
    c.on_drag(DragEvent::Start);
    assert!(!c.is_animating());
}

#[test]
fn drag_start_hands_offset_to_pointer() {
    let mut c = SliderCore::with_animator(SliderConfig::new(W).unwrap(), RecordingAnimator::default()).unwrap();
    c.set_open(true);
    c.on_drag(DragEvent::Start);
    assert_eq!(c.animator.cancels, 1);
    c.on_drag(DragEvent::Move { dx: 30.0 });
    assert_eq!(c.offset(), -270.0);
    assert_eq!(c.animator.starts.len(), 1, "tracking never starts a spring");
}

#[test]
fn short_drag_springs_back_without_close() {
    let (mut slider, calls) = counting_slider();
    slider.set_open(true);
    settle(&mut slider.core);

    let actions = slider.pump(&mut ScriptedDrag::swipe(50.0, 5));
    assert_eq!(closes(&actions), 0);
    settle(&mut slider.core);
    assert_eq!(slider.offset(), 0.0);
    assert_eq!(calls.get(), 0);
    assert!(slider.is_open());
}

#[test]
fn long_drag_closes_and_calls_back_once() {
    let (mut slider, calls) = counting_slider();
    slider.set_open(true);
    settle(&mut slider.core);

    let actions = slider.pump(&mut ScriptedDrag::swipe(150.0, 5));
    assert_eq!(closes(&actions), 1);
    assert_eq!(calls.get(), 1);
    settle(&mut slider.core);
    assert_eq!(slider.offset(), -W);
    assert_eq!(calls.get(), 1);
    assert!(slider.is_open(), "the owner flips the flag, not the slider");
}

#[test]
fn owner_confirming_dismissal_does_not_reanimate() {
    let (mut slider, calls) = counting_slider();
    slider.set_open(true);
    settle(&mut slider.core);
    slider.pump(&mut ScriptedDrag::swipe(200.0, 4));
    settle(&mut slider.core);

    let actions = slider.set_open(false);
    assert_eq!(actions, vec![Action::RenderNeeded], "backdrop must be repainted away");
    assert!(!slider.core.backdrop_visible());
    assert!(!slider.is_animating());
    assert_eq!(slider.offset(), -W);
    assert_eq!(calls.get(), 1);
}

#[test]
fn directive_flipping_only_the_backdrop_requests_render() {
    let mut c = core();
    c.set_open(true);
    settle(&mut c);
    c.pump(&mut ScriptedDrag::swipe(200.0, 4));
    settle(&mut c);
    assert!(c.backdrop_visible());

    let actions = c.set_open(false);
    assert!(actions.contains(&Action::RenderNeeded));
    assert!(!c.backdrop_visible());
    assert!(c.scene::<()>(None).backdrop.is_none());

    // Repeats change nothing and stay silent.
    assert!(c.set_open(false).is_empty());
}

#[test]
fn drag_while_closed_is_ignored() {
    let mut c = core();
    let actions = c.pump(&mut ScriptedDrag::swipe(200.0, 4));
    assert!(actions.is_empty());
    assert_eq!(c.offset(), -W);
}

#[test]
fn platform_cancel_springs_back() {
    let mut c = open_core();
    c.on_drag(DragEvent::Start);
    c.on_drag(DragEvent::Move { dx: 250.0 });
    let actions = c.on_drag(DragEvent::Cancel);
    assert_eq!(closes(&actions), 0);
    settle(&mut c);
    assert_eq!(c.offset(), 0.0);
}

#[test]
fn directive_mid_drag_takes_over() {
    let mut c = open_core();
    c.on_drag(DragEvent::Start);
    c.on_drag(DragEvent::Move { dx: 60.0 });
    c.set_open(false);
    assert!(!c.is_dragging());
    let actions = c.on_drag(DragEvent::End { dx: 200.0 });
    assert_eq!(closes(&actions), 0);
    settle(&mut c);
    assert_eq!(c.offset(), -W);
}

// =============================================================
// Backdrop
// =============================================================

#[test]
fn backdrop_tap_requests_close_without_mutating() {
    let (mut slider, calls) = counting_slider();
    slider.set_open(true);
    settle(&mut slider.core);

    let actions = slider.on_backdrop_tap();
    assert_eq!(actions, vec![Action::CloseRequested]);
    assert_eq!(calls.get(), 1);
    assert!(slider.is_open());
    assert_eq!(slider.offset(), 0.0);
    assert!(!slider.is_animating());
}

#[test]
fn backdrop_tap_when_closed_does_nothing() {
    let (mut slider, calls) = counting_slider();
    assert!(slider.on_backdrop_tap().is_empty());
    assert_eq!(calls.get(), 0);
}

#[test]
fn gesture_tap_routes_to_backdrop() {
    let mut c = open_core();
    assert_eq!(c.on_gesture(Gesture::BackdropTap), vec![Action::CloseRequested]);
}

#[test]
fn slider_without_callback_still_reports_close() {
    let mut slider = Slider::new(SliderConfig::new(W).unwrap()).unwrap();
    slider.set_open(true);
    assert_eq!(slider.on_backdrop_tap(), vec![Action::CloseRequested]);
}

#[test]
fn callback_can_be_cleared() {
    let (mut slider, calls) = counting_slider();
    slider.set_on_close(None);
    slider.set_open(true);
    slider.on_backdrop_tap();
    assert_eq!(calls.get(), 0);
}

// =============================================================
// Scene
// =============================================================

#[test]
fn scene_tracks_offset_and_backdrop() {
    let mut c = core();
    let closed = c.scene::<()>(None);
    assert_eq!(closed.panel.translate_x, -W);
    assert!(closed.backdrop.is_none());

    c.set_open(true);
    settle(&mut c);
    let open = c.scene::<()>(None);
    assert_eq!(open.panel.translate_x, 0.0);
    assert_eq!(open.backdrop.map(|b| b.left), Some(W));
}

#[test]
fn scene_falls_back_to_placeholder() {
    let c = core();
    assert!(matches!(c.scene::<&str>(None).content, PanelContent::Placeholder(_)));
    let menu = "Menu";
    assert!(matches!(c.scene(Some(&menu)).content, PanelContent::Provided(_)));
}

// =============================================================
// Scenario W = 300
// =============================================================

#[test]
fn scenario_width_300() {
    let (mut slider, calls) = counting_slider();
    slider.set_open(true);
    settle(&mut slider.core);

    slider.pump(&mut ScriptedDrag::swipe(50.0, 1));
    settle(&mut slider.core);
    assert_eq!(slider.offset(), 0.0);
    assert_eq!(calls.get(), 0);

    slider.pump(&mut ScriptedDrag::swipe(150.0, 1));
    settle(&mut slider.core);
    assert_eq!(slider.offset(), -300.0);
    assert_eq!(calls.get(), 1);

    slider.set_open(false);
    slider.set_open(true);
    slider.tick(FRAME);
    slider.set_open(false);
    settle(&mut slider.core);
    assert_eq!(slider.offset(), -300.0);
    assert_eq!(calls.get(), 1);
}
