//! Animated sky behind the clock: a sun/moon on a day/night arc plus a
//! particle field chosen from the current weather.
//!
//! [`SkyState`] owns everything the scene needs between frames. It is built
//! when the display mounts and dropped with it; nothing here is global.

pub mod celestial;
pub mod controller;
pub mod particles;
pub mod render;
pub mod surface;

use crate::domain::weather::SkyCategory;

pub use celestial::{BodyKind, CelestialBody, compute_position, compute_position_at_hour};
pub use controller::SkyTransition;
pub use particles::{Particle, ParticleField};
pub use render::{SceneRenderer, SkyPalette};
pub use surface::{CommandLog, DrawCommand, Rgba, Surface};

/// Drawable size in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Non-finite or negative dimensions collapse to zero.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_dimension(width),
            height: sanitize_dimension(height),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

fn sanitize_dimension(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Debug)]
pub struct SkyState {
    viewport: Viewport,
    field: ParticleField,
    active_category: Option<SkyCategory>,
    body: Option<CelestialBody>,
    renderer: SceneRenderer,
}

impl Default for SkyState {
    fn default() -> Self {
        Self::new()
    }
}

impl SkyState {
    pub fn new() -> Self {
        Self::with_field(ParticleField::new())
    }

    /// Deterministic particle randomness, for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_field(ParticleField::seeded(seed))
    }

    fn with_field(field: ParticleField) -> Self {
        Self {
            viewport: Viewport::default(),
            field,
            active_category: None,
            body: None,
            renderer: SceneRenderer::default(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[must_use]
    pub fn active_category(&self) -> Option<SkyCategory> {
        self.active_category
    }

    /// Last computed sun/moon, `None` until the first frame or resize.
    #[must_use]
    pub fn celestial_body(&self) -> Option<CelestialBody> {
        self.body
    }
}
