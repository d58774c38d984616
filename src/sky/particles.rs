use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::domain::weather::ParticleKind;
use crate::sky::Viewport;

/// Frame deltas are expressed in 60 Hz frames so speeds read as px/frame.
const FRAMES_PER_SEC: f32 = 60.0;
const MAX_STEP_SECS: f32 = 0.25;
const DUST_ALPHA_JITTER: f32 = 0.02;
/// Clouds only ever occupy the upper part of the sky.
pub const CLOUD_BAND: f32 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub enum Particle {
    Dust {
        x: f32,
        y: f32,
        speed: f32,
        radius: f32,
        alpha: f32,
    },
    Rain {
        x: f32,
        y: f32,
        speed: f32,
        length: f32,
    },
    Snow {
        x: f32,
        y: f32,
        speed: f32,
        length: f32,
    },
    Cloud {
        x: f32,
        y: f32,
        speed: f32,
        radius: f32,
        alpha: f32,
    },
}

impl Particle {
    #[must_use]
    pub fn kind(&self) -> ParticleKind {
        match self {
            Particle::Dust { .. } => ParticleKind::Dust,
            Particle::Rain { .. } => ParticleKind::Rain,
            Particle::Snow { .. } => ParticleKind::Snow,
            Particle::Cloud { .. } => ParticleKind::Cloud,
        }
    }

    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        match self {
            Particle::Dust { x, y, .. }
            | Particle::Rain { x, y, .. }
            | Particle::Snow { x, y, .. }
            | Particle::Cloud { x, y, .. } => (*x, *y),
        }
    }

    /// How far past a canvas edge the particle may sit before it recycles.
    #[must_use]
    pub fn extent(&self) -> f32 {
        match self {
            Particle::Dust { radius, .. } | Particle::Cloud { radius, .. } => *radius,
            Particle::Rain { length, .. } | Particle::Snow { length, .. } => *length,
        }
    }
}

#[derive(Debug)]
pub struct ParticleField {
    kind: Option<ParticleKind>,
    particles: Vec<Particle>,
    generation: u64,
    rng: StdRng,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleField {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            kind: None,
            particles: Vec::new(),
            generation: 0,
            rng,
        }
    }

    #[must_use]
    pub fn kind(&self) -> Option<ParticleKind> {
        self.kind
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Bumped on every reset; unchanged while the same particles live on.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the whole field with `count` freshly randomised particles.
    pub fn reset(&mut self, kind: ParticleKind, count: usize, viewport: Viewport) {
        let rng = &mut self.rng;
        self.particles = (0..count).map(|_| spawn(kind, viewport, rng)).collect();
        self.kind = Some(kind);
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn step_all(&mut self, dt: Duration, viewport: Viewport) {
        let step = dt.as_secs_f32().clamp(0.0, MAX_STEP_SECS) * FRAMES_PER_SEC;
        for particle in &mut self.particles {
            advance(particle, step, viewport, &mut self.rng);
        }
    }
}

fn spawn(kind: ParticleKind, viewport: Viewport, rng: &mut StdRng) -> Particle {
    let x = uniform(rng, viewport.width);
    match kind {
        ParticleKind::Dust => Particle::Dust {
            x,
            y: uniform(rng, viewport.height),
            speed: rng.random_range(0.1..0.6),
            radius: rng.random_range(0.5..2.0),
            alpha: rng.random_range(0.2..0.8),
        },
        ParticleKind::Rain => Particle::Rain {
            x,
            y: uniform(rng, viewport.height),
            speed: rng.random_range(10.0..25.0),
            length: rng.random_range(10.0..30.0),
        },
        ParticleKind::Snow => Particle::Snow {
            x,
            y: uniform(rng, viewport.height),
            speed: rng.random_range(1.0..3.0),
            length: rng.random_range(2.0..6.0),
        },
        ParticleKind::Cloud => Particle::Cloud {
            x,
            y: uniform(rng, viewport.height * CLOUD_BAND),
            speed: rng.random_range(0.1..0.4),
            radius: rng.random_range(30.0..80.0),
            alpha: rng.random_range(0.04..0.12),
        },
    }
}

fn advance(particle: &mut Particle, step: f32, viewport: Viewport, rng: &mut StdRng) {
    match particle {
        Particle::Rain {
            x,
            y,
            speed,
            length,
        }
        | Particle::Snow {
            x,
            y,
            speed,
            length,
        } => {
            *y += *speed * step;
            if *y > viewport.height {
                *y = -*length;
                *x = uniform(rng, viewport.width);
            }
        }
        Particle::Dust {
            x,
            y,
            speed,
            radius,
            alpha,
        } => {
            if step <= 0.0 {
                return;
            }
            *y -= *speed * step;
            let jitter = rng.random_range(-DUST_ALPHA_JITTER..=DUST_ALPHA_JITTER);
            *alpha = (*alpha + jitter).clamp(0.0, 1.0);
            if *y < -*radius {
                *y = viewport.height + *radius;
                *x = uniform(rng, viewport.width);
            }
        }
        Particle::Cloud {
            x, y, speed, radius, ..
        } => {
            *x -= *speed * step;
            if *x < -*radius {
                *x = viewport.width + *radius;
                *y = uniform(rng, viewport.height * CLOUD_BAND);
            }
        }
    }
}

fn uniform(rng: &mut StdRng, max: f32) -> f32 {
    if max > 0.0 {
        rng.random_range(0.0..max)
    } else {
        0.0
    }
}
