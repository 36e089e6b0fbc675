//! Shared numeric constants for the slider crate.

// ── Geometry ────────────────────────────────────────────────────

/// Panel width as a fraction of the screen width when sized from the screen.
pub const SCREEN_WIDTH_FRACTION: f64 = 0.75;

/// Fraction of the panel width a drag must exceed to count as a dismissal.
pub const CLOSE_THRESHOLD_FRACTION: f64 = 1.0 / 3.0;

/// Horizontal travel in pixels before a pointer press becomes a pan.
pub const ACTIVATION_SLOP_PX: f64 = 10.0;

// ── Spring ──────────────────────────────────────────────────────

/// Damping coefficient of the panel spring.
pub const SPRING_DAMPING: f64 = 25.0;

/// Stiffness of the panel spring.
pub const SPRING_STIFFNESS: f64 = 200.0;

/// Mass attached to the panel spring.
pub const SPRING_MASS: f64 = 1.0;

/// Distance from the target, in pixels, below which the spring may settle.
pub const REST_DISPLACEMENT: f64 = 0.01;

/// Speed, in pixels per second, below which the spring may settle.
pub const REST_SPEED: f64 = 2.0;

/// Fixed integration step for the spring, in seconds.
pub const SPRING_STEP_SECS: f64 = 0.001;

// ── Content ─────────────────────────────────────────────────────

/// Text shown inside the panel when the owner supplies no content.
pub const EMPTY_PLACEHOLDER: &str = "Empty";
