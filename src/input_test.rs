use super::*;

fn drags(gestures: &[Gesture]) -> Vec<DragEvent> {
    gestures
        .iter()
        .filter_map(|g| match g {
            Gesture::Drag(d) => Some(*d),
            Gesture::BackdropTap => None,
        })
        .collect()
}

// =============================================================
// DragEvent
// =============================================================

#[test]
fn terminal_events() {
    assert!(DragEvent::End { dx: 1.0 }.is_terminal());
    assert!(DragEvent::Cancel.is_terminal());
    assert!(!DragEvent::Start.is_terminal());
    assert!(!DragEvent::Move { dx: 1.0 }.is_terminal());
}

#[test]
fn drag_events_map_to_machine_events() {
    assert_eq!(Event::from(DragEvent::Start), Event::DragStart);
    assert_eq!(Event::from(DragEvent::Move { dx: 5.0 }), Event::DragMove { dx: 5.0 });
    assert_eq!(Event::from(DragEvent::End { dx: 7.0 }), Event::DragEnd { dx: 7.0 });
    assert_eq!(Event::from(DragEvent::Cancel), Event::DragCancel);
    assert_eq!(Event::from(Gesture::BackdropTap), Event::BackdropTap);
}

// =============================================================
// ScriptedDrag
// =============================================================

#[test]
fn scripted_drag_replays_in_order() {
    let mut src = ScriptedDrag::new([DragEvent::Start, DragEvent::Move { dx: 3.0 }, DragEvent::Cancel]);
    assert_eq!(src.next_event(), Some(DragEvent::Start));
    assert_eq!(src.next_event(), Some(DragEvent::Move { dx: 3.0 }));
    assert_eq!(src.next_event(), Some(DragEvent::Cancel));
    assert_eq!(src.next_event(), None);
}

#[test]
fn swipe_starts_moves_and_releases() {
    let mut src = ScriptedDrag::swipe(90.0, 3);
    assert_eq!(src.next_event(), Some(DragEvent::Start));
    assert_eq!(src.next_event(), Some(DragEvent::Move { dx: 30.0 }));
    assert_eq!(src.next_event(), Some(DragEvent::Move { dx: 60.0 }));
    assert_eq!(src.next_event(), Some(DragEvent::Move { dx: 90.0 }));
    assert_eq!(src.next_event(), Some(DragEvent::End { dx: 90.0 }));
    assert_eq!(src.next_event(), None);
}

#[test]
fn swipe_with_zero_steps_still_moves_once() {
    let mut src = ScriptedDrag::swipe(10.0, 0);
    let events: Vec<DragEvent> = std::iter::from_fn(|| src.next_event()).collect();
    assert_eq!(events, vec![DragEvent::Start, DragEvent::Move { dx: 10.0 }, DragEvent::End { dx: 10.0 }]);
}

// =============================================================
// PanRecognizer
// =============================================================

#[test]
fn recognizer_starts_idle() {
    let r = PanRecognizer::new(10.0);
    assert_eq!(r.state(), InputState::Idle);
}

#[test]
fn press_on_panel_arms() {
    let mut r = PanRecognizer::new(10.0);
    assert!(r.pointer_down(100.0, Some(HitPart::Panel)).is_empty());
    assert_eq!(r.state(), InputState::Armed { start_x: 100.0 });
}

#[test]
fn press_on_nothing_stays_idle() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(100.0, None);
    assert_eq!(r.state(), InputState::Idle);
}

#[test]
fn movement_within_slop_does_not_start_pan() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(100.0, Some(HitPart::Panel));
    assert!(r.pointer_move(108.0).is_empty());
    assert!(r.pointer_move(92.0).is_empty());
    assert_eq!(r.state(), InputState::Armed { start_x: 100.0 });
}

#[test]
fn crossing_slop_starts_pan_with_full_displacement() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(100.0, Some(HitPart::Panel));
    let out = r.pointer_move(115.0);
    assert_eq!(drags(&out), vec![DragEvent::Start, DragEvent::Move { dx: 15.0 }]);
    assert_eq!(r.state(), InputState::Panning { start_x: 100.0 });
}

#[test]
fn leftward_travel_also_activates() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(100.0, Some(HitPart::Panel));
    let out = r.pointer_move(80.0);
    assert_eq!(drags(&out), vec![DragEvent::Start, DragEvent::Move { dx: -20.0 }]);
}

#[test]
fn moves_while_panning_are_cumulative() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(100.0, Some(HitPart::Panel));
    r.pointer_move(120.0);
    assert_eq!(drags(&r.pointer_move(180.0)), vec![DragEvent::Move { dx: 80.0 }]);
    assert_eq!(drags(&r.pointer_move(150.0)), vec![DragEvent::Move { dx: 50.0 }]);
}

#[test]
fn release_after_pan_ends_drag() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(100.0, Some(HitPart::Panel));
    r.pointer_move(150.0);
    let out = r.pointer_up(260.0, None);
    assert_eq!(drags(&out), vec![DragEvent::End { dx: 160.0 }]);
    assert_eq!(r.state(), InputState::Idle);
}

#[test]
fn tap_on_panel_produces_nothing() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(100.0, Some(HitPart::Panel));
    assert!(r.pointer_up(102.0, Some(HitPart::Panel)).is_empty());
    assert_eq!(r.state(), InputState::Idle);
}

#[test]
fn backdrop_press_and_release_is_tap() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(350.0, Some(HitPart::Backdrop));
    assert_eq!(r.state(), InputState::PressingBackdrop);
    assert!(r.pointer_move(360.0).is_empty());
    assert_eq!(r.pointer_up(360.0, Some(HitPart::Backdrop)), vec![Gesture::BackdropTap]);
}

#[test]
fn backdrop_press_released_elsewhere_is_not_tap() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(350.0, Some(HitPart::Backdrop));
    assert!(r.pointer_up(100.0, Some(HitPart::Panel)).is_empty());
}

#[test]
fn second_pointer_ignored_during_pan() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(100.0, Some(HitPart::Panel));
    r.pointer_move(130.0);
    assert!(r.pointer_down(400.0, Some(HitPart::Backdrop)).is_empty());
    assert_eq!(r.state(), InputState::Panning { start_x: 100.0 });
}

#[test]
fn cancel_during_pan_cancels_drag() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(100.0, Some(HitPart::Panel));
    r.pointer_move(130.0);
    assert_eq!(drags(&r.pointer_cancel()), vec![DragEvent::Cancel]);
    assert_eq!(r.state(), InputState::Idle);
}

#[test]
fn cancel_while_armed_is_silent() {
    let mut r = PanRecognizer::new(10.0);
    r.pointer_down(100.0, Some(HitPart::Panel));
    assert!(r.pointer_cancel().is_empty());
    assert_eq!(r.state(), InputState::Idle);
}

#[test]
fn zero_slop_activates_on_first_movement() {
    let mut r = PanRecognizer::new(0.0);
    r.pointer_down(100.0, Some(HitPart::Panel));
    assert_eq!(drags(&r.pointer_move(101.0)), vec![DragEvent::Start, DragEvent::Move { dx: 1.0 }]);
}
