//! Pointer hit-testing against the panel and its backdrop.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::render::{BackdropLayer, PanelLayer};

/// Which part of the slider was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Panel,
    Backdrop,
}

/// Test which layer (if any) is under screen `x`, checking the panel first.
///
/// The panel is stacked above the backdrop. The backdrop spans from its left
/// edge to `viewport_width`. Both layers cover the full height, so only the
/// horizontal coordinate matters.
#[must_use]
pub fn hit_test(x: f64, panel: &PanelLayer, backdrop: Option<&BackdropLayer>, viewport_width: f64) -> Option<HitPart> {
    if panel.contains(x) {
        return Some(HitPart::Panel);
    }
    match backdrop {
        Some(layer) if x >= layer.left && x < viewport_width => Some(HitPart::Backdrop),
        _ => None,
    }
}
