use std::time::Duration;

use chrono::Timelike;

use crate::sky::{
    BodyKind, CelestialBody, Particle, SkyState, Surface, Viewport, compute_position,
    surface::Rgba,
};

const HALO_FRACTION: f32 = 0.18;
const MIN_HALO_RADIUS: f32 = 8.0;
const DISC_FRACTION: f32 = 0.25;
const RAIN_STROKE: f32 = 1.0;
const SNOW_STROKE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPalette {
    pub sun_halo: Rgba,
    pub sun_disc: Rgba,
    pub moon_halo: Rgba,
    pub moon_disc: Rgba,
    pub rain: Rgba,
    pub snow: Rgba,
    pub dust: Rgba,
    pub cloud: Rgba,
}

impl Default for SkyPalette {
    fn default() -> Self {
        Self {
            sun_halo: Rgba::new(252, 226, 136, 0.45),
            sun_disc: Rgba::new(255, 240, 190, 1.0),
            moon_halo: Rgba::new(200, 210, 235, 0.3),
            moon_disc: Rgba::new(230, 235, 245, 1.0),
            rain: Rgba::new(174, 194, 224, 0.3),
            snow: Rgba::new(255, 255, 255, 0.8),
            dust: Rgba::new(255, 255, 255, 0.5),
            cloud: Rgba::new(200, 205, 215, 0.1),
        }
    }
}

impl SkyPalette {
    #[must_use]
    pub fn halo(&self, kind: BodyKind) -> Rgba {
        match kind {
            BodyKind::Sun => self.sun_halo,
            BodyKind::Moon => self.moon_halo,
        }
    }

    #[must_use]
    pub fn disc(&self, kind: BodyKind) -> Rgba {
        match kind {
            BodyKind::Sun => self.sun_disc,
            BodyKind::Moon => self.moon_disc,
        }
    }
}

/// Issues the drawing commands for one frame of the sky.
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    palette: SkyPalette,
}

impl SceneRenderer {
    /// Soft halo first, then the solid disc on top of it.
    pub fn draw_body<S: Surface + ?Sized>(
        &self,
        body: CelestialBody,
        viewport: Viewport,
        surface: &mut S,
    ) {
        if !body.visible {
            return;
        }
        let halo_radius =
            (viewport.width.min(viewport.height) * HALO_FRACTION).max(MIN_HALO_RADIUS);
        let halo = self.palette.halo(body.kind);
        surface.radial_glow(body.x, body.y, halo_radius, halo, halo.with_alpha(0.0));
        surface.fill_circle(
            body.x,
            body.y,
            halo_radius * DISC_FRACTION,
            self.palette.disc(body.kind),
        );
    }

    pub fn draw_particle<S: Surface + ?Sized>(&self, particle: &Particle, surface: &mut S) {
        match *particle {
            Particle::Rain { x, y, length, .. } => {
                surface.stroke_line((x, y), (x, y + length), RAIN_STROKE, self.palette.rain);
            }
            Particle::Snow { x, y, length, .. } => {
                surface.stroke_line((x, y), (x, y + length), SNOW_STROKE, self.palette.snow);
            }
            Particle::Dust {
                x,
                y,
                radius,
                alpha,
                ..
            } => surface.fill_circle(x, y, radius, self.palette.dust.with_alpha(alpha)),
            Particle::Cloud {
                x,
                y,
                radius,
                alpha,
                ..
            } => surface.fill_circle(x, y, radius, self.palette.cloud.with_alpha(alpha)),
        }
    }
}

impl SkyState {
    /// Paint one frame: clear, celestial glow, then advance and draw every
    /// particle in field order. A zero-area viewport skips the frame and
    /// returns `false`; the next call tries again.
    pub fn render_frame<S: Surface + ?Sized, T: Timelike>(
        &mut self,
        now: &T,
        dt: Duration,
        surface: &mut S,
    ) -> bool {
        if self.viewport.is_empty() {
            return false;
        }

        surface.clear();

        let body = compute_position(now, self.viewport);
        self.body = Some(body);
        self.renderer.draw_body(body, self.viewport, surface);

        self.field.step_all(dt, self.viewport);
        for particle in self.field.particles() {
            self.renderer.draw_particle(particle, surface);
        }
        true
    }
}
