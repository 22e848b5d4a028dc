//! Day/night cycle and weather tables.
//!
//! Everything here is pure: the per-tick weather state machine lives in
//! `systems::weather` and only consults these tables.

use serde::{Deserialize, Serialize};

/// Length of one full day/night cycle in simulated seconds.
pub const DAY_LENGTH_SECS: f64 = 240.0;
/// Fraction of the cycle that counts as daytime (168 s day, 72 s night).
pub const DAY_FRACTION: f64 = 0.7;
/// Cadence of weather rolls while no event is active.
pub const WEATHER_ROLL_INTERVAL_SECS: f64 = 30.0;

pub fn is_day(elapsed_secs: f64) -> bool {
    elapsed_secs.rem_euclid(DAY_LENGTH_SECS) < DAY_LENGTH_SECS * DAY_FRACTION
}

/// Progress through the current day or night segment, 0..=100.
pub fn phase_percent(elapsed_secs: f64) -> f64 {
    let position = elapsed_secs.rem_euclid(DAY_LENGTH_SECS);
    let day_secs = DAY_LENGTH_SECS * DAY_FRACTION;
    if position < day_secs {
        position / day_secs * 100.0
    } else {
        (position - day_secs) / (DAY_LENGTH_SECS - day_secs) * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    None,
    Clouds,
    Sunny,
    Rain,
    Frost,
    Wind,
}

/// The single active weather event. `kind == None` means clear skies and
/// a pending roll countdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherEvent {
    pub kind: WeatherKind,
    pub duration_secs: f64,
    pub remaining_secs: f64,
}

impl WeatherEvent {
    pub fn clear() -> Self {
        Self {
            kind: WeatherKind::None,
            duration_secs: 0.0,
            remaining_secs: 0.0,
        }
    }

    pub fn begin(kind: WeatherKind) -> Self {
        let duration = duration_secs(kind);
        Self {
            kind,
            duration_secs: duration,
            remaining_secs: duration,
        }
    }

    pub fn is_active(&self) -> bool {
        self.kind != WeatherKind::None
    }
}

pub fn duration_secs(kind: WeatherKind) -> f64 {
    match kind {
        WeatherKind::Frost => 30.0,
        WeatherKind::None => 0.0,
        _ => 25.0,
    }
}

/// Map a uniform roll in [0, 1) to a weather kind. Sunny spells can only
/// start during the day; the night table redistributes its band.
pub fn draw(roll: f64, day: bool) -> WeatherKind {
    if day {
        match roll {
            r if r < 0.18 => WeatherKind::Clouds,
            r if r < 0.36 => WeatherKind::Sunny,
            r if r < 0.54 => WeatherKind::Rain,
            r if r < 0.68 => WeatherKind::Wind,
            r if r < 0.78 => WeatherKind::Frost,
            _ => WeatherKind::None,
        }
    } else {
        match roll {
            r if r < 0.225 => WeatherKind::Clouds,
            r if r < 0.45 => WeatherKind::Rain,
            r if r < 0.65 => WeatherKind::Wind,
            r if r < 0.8 => WeatherKind::Frost,
            _ => WeatherKind::None,
        }
    }
}

/// Per-resource multiplier vector, also used for the day/night table.
#[derive(Debug, Clone, Copy)]
pub struct Multipliers {
    pub sun: f64,
    pub water: f64,
    pub wind: f64,
    pub coins: f64,
}

pub fn weather_multipliers(kind: WeatherKind) -> Multipliers {
    match kind {
        WeatherKind::None => Multipliers {
            sun: 1.0,
            water: 1.0,
            wind: 1.0,
            coins: 1.0,
        },
        WeatherKind::Clouds => Multipliers {
            sun: 0.0,
            water: 1.0,
            wind: 1.0,
            coins: 1.0,
        },
        WeatherKind::Sunny => Multipliers {
            sun: 2.0,
            water: 1.0,
            wind: 1.0,
            coins: 1.0,
        },
        WeatherKind::Rain => Multipliers {
            sun: 1.0,
            water: 2.0,
            wind: 1.0,
            coins: 1.0,
        },
        WeatherKind::Wind => Multipliers {
            sun: 0.5,
            water: 0.7,
            wind: 2.0,
            coins: 1.0,
        },
        // Frost is a hard stop on all production, coins included.
        WeatherKind::Frost => Multipliers {
            sun: 0.0,
            water: 0.0,
            wind: 0.0,
            coins: 0.0,
        },
    }
}

pub fn day_night_multipliers(day: bool) -> Multipliers {
    if day {
        Multipliers {
            sun: 2.0,
            water: 1.0,
            wind: 1.0,
            coins: 1.0,
        }
    } else {
        Multipliers {
            sun: 0.0,
            water: 1.0,
            wind: 1.2,
            coins: 1.0,
        }
    }
}
