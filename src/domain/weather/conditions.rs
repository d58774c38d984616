use serde::{Deserialize, Serialize};

/// Coarse visual bucket a WMO weather code falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkyCategory {
    Clear,
    Cloud,
    Fog,
    Rain,
    Snow,
    Thunder,
}

impl SkyCategory {
    pub const ALL: [SkyCategory; 6] = [
        SkyCategory::Clear,
        SkyCategory::Cloud,
        SkyCategory::Fog,
        SkyCategory::Rain,
        SkyCategory::Snow,
        SkyCategory::Thunder,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SkyCategory::Clear => "clear",
            SkyCategory::Cloud => "cloud",
            SkyCategory::Fog => "fog",
            SkyCategory::Rain => "rain",
            SkyCategory::Snow => "snow",
            SkyCategory::Thunder => "thunder",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    Dust,
    Rain,
    Snow,
    Cloud,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleSpec {
    pub kind: ParticleKind,
    pub count: usize,
}

/// Particle type and density for every category. Thunder has no lightning
/// particle of its own and borrows the rain stream.
const PARTICLE_TABLE: &[(SkyCategory, ParticleKind, usize)] = &[
    (SkyCategory::Clear, ParticleKind::Dust, 50),
    (SkyCategory::Cloud, ParticleKind::Cloud, 15),
    (SkyCategory::Fog, ParticleKind::Cloud, 25),
    (SkyCategory::Rain, ParticleKind::Rain, 800),
    (SkyCategory::Snow, ParticleKind::Snow, 300),
    (SkyCategory::Thunder, ParticleKind::Rain, 800),
];

/// Classify a WMO code. Ranges are checked in order and anything unmapped,
/// negative codes included, lands on [`SkyCategory::Cloud`].
#[must_use]
pub fn classify(code: i32) -> SkyCategory {
    match code {
        0..=1 => SkyCategory::Clear,
        2..=3 => SkyCategory::Cloud,
        45 | 48 => SkyCategory::Fog,
        51..=67 => SkyCategory::Rain,
        71..=77 => SkyCategory::Snow,
        80..=82 => SkyCategory::Rain,
        85..=86 => SkyCategory::Snow,
        95.. => SkyCategory::Thunder,
        _ => SkyCategory::Cloud,
    }
}

#[must_use]
pub fn particle_spec(category: SkyCategory) -> ParticleSpec {
    PARTICLE_TABLE
        .iter()
        .find_map(|(candidate, kind, count)| {
            (*candidate == category).then_some(ParticleSpec {
                kind: *kind,
                count: *count,
            })
        })
        .unwrap_or(ParticleSpec {
            kind: ParticleKind::Cloud,
            count: 15,
        })
}

#[must_use]
pub fn weather_label(code: i32) -> &'static str {
    WEATHER_LABELS
        .iter()
        .find_map(|(candidate, label)| (*candidate == code).then_some(*label))
        .unwrap_or("Unknown")
}

const WEATHER_LABELS: &[(i32, &str)] = &[
    (0, "Clear Sky"),
    (1, "Clear"),
    (2, "Partly Cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Fog"),
    (51, "Drizzle"),
    (53, "Drizzle"),
    (55, "Drizzle"),
    (61, "Rain"),
    (63, "Rain"),
    (65, "Heavy Rain"),
    (71, "Snow"),
    (73, "Snow"),
    (75, "Snow"),
    (80, "Showers"),
    (81, "Showers"),
    (82, "Violent Showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm"),
];

#[must_use]
pub fn weather_icon(code: i32, is_day: bool) -> &'static str {
    match code {
        0 | 1 => {
            if is_day {
                "☀"
            } else {
                "☾"
            }
        }
        51..=99 => "☂",
        _ => "☁",
    }
}
