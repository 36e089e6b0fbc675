//! Framework-neutral description of what the slider should look like.
//!
//! A [`Scene`] is rebuilt from controller state whenever the host needs to
//! draw. The web binding maps it onto DOM styles; other hosts can map it onto
//! whatever retained or immediate-mode tree they use.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::EMPTY_PLACEHOLDER;

/// The sliding panel, anchored at the left screen edge before translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayer {
    /// Horizontal translation in CSS pixels; the current offset.
    pub translate_x: f64,
    pub width: f64,
}

impl PanelLayer {
    /// Left edge on screen.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.translate_x
    }

    /// Right edge on screen.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.translate_x + self.width
    }

    /// Whether screen `x` falls inside the panel's footprint.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.left() && x < self.right()
    }
}

/// Transparent, hit-testable region covering everything right of the open
/// panel's footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropLayer {
    /// Left edge on screen; the panel width.
    pub left: f64,
}

/// What goes inside the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelContent<'a, C> {
    /// Owner-supplied content.
    Provided(&'a C),
    /// Nothing supplied; show a placeholder so the layout stays stable.
    Placeholder(&'static str),
}

impl<'a, C> PanelContent<'a, C> {
    #[must_use]
    pub fn from_option(content: Option<&'a C>) -> Self {
        content.map_or(Self::Placeholder(EMPTY_PLACEHOLDER), Self::Provided)
    }
}

/// Everything a host needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene<'a, C> {
    pub panel: PanelLayer,
    /// Present only while the owner says the panel is open.
    pub backdrop: Option<BackdropLayer>,
    pub content: PanelContent<'a, C>,
}

/// Build a scene from raw controller values.
#[must_use]
pub fn scene<C>(offset: f64, width: f64, backdrop_visible: bool, content: Option<&C>) -> Scene<'_, C> {
    Scene {
        panel: PanelLayer { translate_x: offset, width },
        backdrop: backdrop_visible.then_some(BackdropLayer { left: width }),
        content: PanelContent::from_option(content),
    }
}

/// CSS `transform` value for a horizontal translation.
#[must_use]
pub fn transform_css(translate_x: f64) -> String {
    format!("translateX({translate_x}px)")
}
