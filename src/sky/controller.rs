use chrono::Timelike;
use log::{debug, trace};

use crate::domain::weather::{ParticleSpec, SkyCategory, classify, particle_spec};
use crate::sky::{CelestialBody, SkyState, Viewport, compute_position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyTransition {
    /// Same category as before, the running field was left alone.
    Unchanged(SkyCategory),
    Reset {
        category: SkyCategory,
        spec: ParticleSpec,
    },
}

impl SkyTransition {
    #[must_use]
    pub fn category(self) -> SkyCategory {
        match self {
            SkyTransition::Unchanged(category) | SkyTransition::Reset { category, .. } => category,
        }
    }

    #[must_use]
    pub fn is_reset(self) -> bool {
        matches!(self, SkyTransition::Reset { .. })
    }
}

impl SkyState {
    /// Feed a freshly fetched weather code. The particle field is only
    /// rebuilt when the visual category actually changes.
    pub fn on_weather_update(&mut self, code: i32) -> SkyTransition {
        let category = classify(code);
        if self.active_category == Some(category) {
            trace!("weather code {code} keeps sky at {}", category.as_str());
            return SkyTransition::Unchanged(category);
        }

        let spec = particle_spec(category);
        debug!(
            "sky {} -> {} (code {code}): {} {:?} particles",
            self.active_category.map_or("none", SkyCategory::as_str),
            category.as_str(),
            spec.count,
            spec.kind
        );
        self.field.reset(spec.kind, spec.count, self.viewport);
        self.active_category = Some(category);
        SkyTransition::Reset { category, spec }
    }

    /// Adopt a new drawable size and place the sun/moon for it right away.
    /// Live particles keep their positions; only later spawns see the new
    /// bounds.
    pub fn on_viewport_resize<T: Timelike>(
        &mut self,
        width: f32,
        height: f32,
        now: &T,
    ) -> CelestialBody {
        self.viewport = Viewport::new(width, height);
        trace!(
            "sky viewport resized to {}x{}",
            self.viewport.width, self.viewport.height
        );
        let body = compute_position(now, self.viewport);
        self.body = Some(body);
        body
    }
}
