//! Named modulation profiles: closed sum type with settings resolved once
//! per encode/decode call rather than dispatched per-sample.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    AfskBell,
    AfskFifth,
    GfskFifth,
    Mfsk,
}

/// Registry order used by [`crate::decoder::scan`] when no profile hint is
/// given.
pub const PROFILE_NAMES: [Profile; 4] =
    [Profile::AfskBell, Profile::AfskFifth, Profile::GfskFifth, Profile::Mfsk];

pub const DEFAULT_PROFILE: Profile = Profile::AfskBell;

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::AfskBell => "afsk-bell",
            Profile::AfskFifth => "afsk-fifth",
            Profile::GfskFifth => "gfsk-fifth",
            Profile::Mfsk => "mfsk",
        }
    }

    pub fn from_str(value: &str) -> Option<Profile> {
        match value {
            "afsk-bell" => Some(Profile::AfskBell),
            "afsk-fifth" => Some(Profile::AfskFifth),
            "gfsk-fifth" => Some(Profile::GfskFifth),
            "mfsk" => Some(Profile::Mfsk),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulation {
    Afsk,
    Gfsk,
    Mfsk,
}

/// Numeric parameter bundle for a profile. See `getProfileSettings` in the
/// original Python implementation for the source of these exact values.
#[derive(Debug, Clone)]
pub struct ProfileSettings {
    pub modulation: Modulation,
    pub baud: f64,
    pub mark_freq: f64,
    pub space_freq: f64,
    pub preamble_ms: f64,
    pub fade_ms: f64,
    pub lead_in_tone_ms: f64,
    pub lead_in_gap_ms: f64,
    pub tail_tone_ms: f64,
    pub tail_gap_ms: f64,
    pub bt: Option<f64>,
    pub span_symbols: Option<u32>,
    pub tones: Option<Vec<f64>>,
    pub bits_per_symbol: Option<u32>,
}

pub fn settings(profile: Profile) -> ProfileSettings {
    match profile {
        Profile::AfskBell => ProfileSettings {
            modulation: Modulation::Afsk,
            baud: 1200.0,
            mark_freq: 1200.0,
            space_freq: 2200.0,
            preamble_ms: 500.0,
            fade_ms: 10.0,
            lead_in_tone_ms: 150.0,
            lead_in_gap_ms: 0.0,
            tail_tone_ms: 150.0,
            tail_gap_ms: 0.0,
            bt: None,
            span_symbols: None,
            tones: None,
            bits_per_symbol: None,
        },
        Profile::AfskFifth => ProfileSettings {
            modulation: Modulation::Afsk,
            baud: 1200.0,
            mark_freq: 880.0,
            space_freq: 1320.0,
            preamble_ms: 250.0,
            fade_ms: 20.0,
            lead_in_tone_ms: 150.0,
            lead_in_gap_ms: 0.0,
            tail_tone_ms: 150.0,
            tail_gap_ms: 0.0,
            bt: None,
            span_symbols: None,
            tones: None,
            bits_per_symbol: None,
        },
        Profile::GfskFifth => ProfileSettings {
            modulation: Modulation::Gfsk,
            baud: 1200.0,
            mark_freq: 880.0,
            space_freq: 1320.0,
            preamble_ms: 250.0,
            fade_ms: 20.0,
            lead_in_tone_ms: 150.0,
            lead_in_gap_ms: 0.0,
            tail_tone_ms: 150.0,
            tail_gap_ms: 0.0,
            bt: Some(1.0),
            span_symbols: Some(4),
            tones: None,
            bits_per_symbol: None,
        },
        Profile::Mfsk => ProfileSettings {
            modulation: Modulation::Mfsk,
            baud: 600.0,
            mark_freq: 900.0,
            space_freq: 1200.0,
            preamble_ms: 300.0,
            fade_ms: 20.0,
            lead_in_tone_ms: 150.0,
            lead_in_gap_ms: 0.0,
            tail_tone_ms: 150.0,
            tail_gap_ms: 0.0,
            bt: None,
            span_symbols: None,
            tones: Some(vec![600.0, 900.0, 1200.0, 1500.0]),
            bits_per_symbol: Some(2),
        },
    }
}

const PROFILE_SHIFT: u8 = 2;
const PROFILE_MASK: u8 = 0b1100;

pub fn profile_flag(profile: Profile) -> u8 {
    let value = match profile {
        Profile::AfskBell => 0,
        Profile::Mfsk => 1,
        Profile::AfskFifth => 2,
        Profile::GfskFifth => 3,
    };
    value << PROFILE_SHIFT
}

pub fn profile_from_flags(flags: u8) -> Option<Profile> {
    match (flags & PROFILE_MASK) >> PROFILE_SHIFT {
        0 => Some(Profile::AfskBell),
        1 => Some(Profile::Mfsk),
        2 => Some(Profile::AfskFifth),
        3 => Some(Profile::GfskFifth),
        _ => None,
    }
}

pub fn normalize(value: Option<&str>, fallback: Profile) -> Profile {
    match value {
        Some(s) => Profile::from_str(s).unwrap_or(fallback),
        None => fallback,
    }
}
