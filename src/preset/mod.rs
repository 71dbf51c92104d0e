//! Animated presets
//!
//! Every preset lives in [`PresetSlot`] so no heap allocation is needed.
//! Each variant owns its animation state; the tunable parameter values and
//! palette choice are owned by [`DisplayState`](crate::state::DisplayState)
//! and handed in through [`PresetContext`] on every frame.

mod dots;
mod heat;
mod rainbow;
mod twinkle;
mod waves;

pub use dots::{BeatPreset, ConfettiPreset, JugglePreset, SinelonPreset};
use embassy_time::Instant;
pub use heat::{HeatDirection, HeatMapPreset};
pub use rainbow::{PridePreset, RainbowPreset, SolidRainbowPreset};
use serde::{Deserialize, Serialize};
pub use twinkle::{TwinkleFoxPreset, TwinklesPreset};
pub use waves::ColourWavesPreset;

use crate::color::{Palette, Rgb};

/// Number of entries in the preset registry
pub const PRESET_COUNT: usize = 13;

/// Most tunable parameters any preset has
pub const MAX_PARAMS: usize = 3;

/// Current parameter values for every preset, indexed by preset id
pub type PresetParams = [[u8; MAX_PARAMS]; PRESET_COUNT];

/// Palette selection for every preset (`None` for presets without one)
pub type PresetPalettes = [Option<u8>; PRESET_COUNT];

const PRESET_ID_PRIDE: u8 = 0;
const PRESET_ID_RAINBOW: u8 = 1;
const PRESET_ID_RAINBOW_GLITTER: u8 = 2;
const PRESET_ID_SOLID_RAINBOW: u8 = 3;
const PRESET_ID_COLOUR_WAVES: u8 = 4;
const PRESET_ID_CONFETTI: u8 = 5;
const PRESET_ID_SINELON: u8 = 6;
const PRESET_ID_BEAT: u8 = 7;
const PRESET_ID_JUGGLE: u8 = 8;
const PRESET_ID_FIRE: u8 = 9;
const PRESET_ID_WATER: u8 = 10;
const PRESET_ID_TWINKLES: u8 = 11;
const PRESET_ID_TWINKLE_FOX: u8 = 12;

/// Everything a preset may read while rendering one frame
#[derive(Debug, Clone, Copy)]
pub struct PresetContext<'a> {
    pub now: Instant,
    /// Shared hue that drifts slowly for all presets
    pub hue: u8,
    /// Current values of the preset's parameters, in registry order
    pub params: &'a [u8],
    pub palette: &'a Palette,
}

impl PresetContext<'_> {
    /// Parameter `index`, or `fallback` when the preset has fewer parameters
    pub fn param(&self, index: usize, fallback: u8) -> u8 {
        self.params.get(index).copied().unwrap_or(fallback)
    }

    pub fn now_ms(&self) -> u64 {
        self.now.as_millis()
    }
}

pub trait Preset {
    /// Render a single frame in place
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>);

    /// Reset animation state
    fn reset(&mut self) {}
}

/// Tunable parameter of a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

impl ParamSpec {
    const fn new(name: &'static str, min: u8, max: u8, default: u8) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    /// Clamp a raw client value into `[min, max]`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamp(&self, value: i32) -> u8 {
        value.clamp(i32::from(self.min), i32::from(self.max)) as u8
    }
}

/// Static registry entry
#[derive(Debug, Clone, Copy)]
pub struct PresetDescriptor {
    pub id: PresetId,
    pub name: &'static str,
    pub params: &'static [ParamSpec],
    /// Default palette, `None` when the preset does not use palettes
    pub palette: Option<u8>,
}

const SINELON_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("Speed", 1, 100, 36),
    ParamSpec::new("Fade", 1, 255, 20),
];
const BEAT_PARAMS: &[ParamSpec] = &[ParamSpec::new("Beats/minute", 30, 255, 120)];
const FIRE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("Cooling", 20, 100, 90),
    ParamSpec::new("Sparking", 50, 200, 150),
];
const WATER_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("Cooling", 20, 100, 80),
    ParamSpec::new("Sparking", 50, 200, 100),
];
const TWINKLE_FOX_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("Twinkle speed", 0, 8, 4),
    ParamSpec::new("Twinkle density", 1, 8, 5),
];

const fn descriptor(
    id: PresetId,
    name: &'static str,
    params: &'static [ParamSpec],
    palette: Option<u8>,
) -> PresetDescriptor {
    PresetDescriptor {
        id,
        name,
        params,
        palette,
    }
}

/// The preset registry, in client index order
pub static PRESETS: [PresetDescriptor; PRESET_COUNT] = [
    descriptor(PresetId::Pride, "Pride", &[], None),
    descriptor(PresetId::Rainbow, "Rainbow", &[], None),
    descriptor(PresetId::RainbowGlitter, "Rainbow with glitter", &[], None),
    descriptor(PresetId::SolidRainbow, "Solid rainbow", &[], None),
    descriptor(PresetId::ColourWaves, "Colour Waves", &[], Some(0)),
    descriptor(PresetId::Confetti, "Confetti", &[], Some(0)),
    descriptor(PresetId::Sinelon, "Sinelon", SINELON_PARAMS, Some(0)),
    descriptor(PresetId::Beat, "Beat", BEAT_PARAMS, Some(0)),
    descriptor(PresetId::Juggle, "Juggle", &[], None),
    descriptor(PresetId::Fire, "Fire", FIRE_PARAMS, None),
    descriptor(PresetId::Water, "Water", WATER_PARAMS, None),
    descriptor(PresetId::Twinkles, "Twinkles", &[], Some(8)),
    descriptor(PresetId::TwinkleFox, "TwinkleFox", TWINKLE_FOX_PARAMS, Some(10)),
];

/// Parameter values every preset starts with
pub fn default_params() -> PresetParams {
    let mut params = [[0; MAX_PARAMS]; PRESET_COUNT];
    for (values, preset) in params.iter_mut().zip(PRESETS.iter()) {
        for (value, spec) in values.iter_mut().zip(preset.params) {
            *value = spec.default;
        }
    }
    params
}

/// Palette binding every preset starts with
pub fn default_palettes() -> PresetPalettes {
    PRESETS.map(|preset| preset.palette)
}

/// Known presets that can be selected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum PresetId {
    #[default]
    Pride = PRESET_ID_PRIDE,
    Rainbow = PRESET_ID_RAINBOW,
    RainbowGlitter = PRESET_ID_RAINBOW_GLITTER,
    SolidRainbow = PRESET_ID_SOLID_RAINBOW,
    ColourWaves = PRESET_ID_COLOUR_WAVES,
    Confetti = PRESET_ID_CONFETTI,
    Sinelon = PRESET_ID_SINELON,
    Beat = PRESET_ID_BEAT,
    Juggle = PRESET_ID_JUGGLE,
    Fire = PRESET_ID_FIRE,
    Water = PRESET_ID_WATER,
    Twinkles = PRESET_ID_TWINKLES,
    TwinkleFox = PRESET_ID_TWINKLE_FOX,
}

impl PresetId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PRESET_ID_PRIDE => Self::Pride,
            PRESET_ID_RAINBOW => Self::Rainbow,
            PRESET_ID_RAINBOW_GLITTER => Self::RainbowGlitter,
            PRESET_ID_SOLID_RAINBOW => Self::SolidRainbow,
            PRESET_ID_COLOUR_WAVES => Self::ColourWaves,
            PRESET_ID_CONFETTI => Self::Confetti,
            PRESET_ID_SINELON => Self::Sinelon,
            PRESET_ID_BEAT => Self::Beat,
            PRESET_ID_JUGGLE => Self::Juggle,
            PRESET_ID_FIRE => Self::Fire,
            PRESET_ID_WATER => Self::Water,
            PRESET_ID_TWINKLES => Self::Twinkles,
            PRESET_ID_TWINKLE_FOX => Self::TwinkleFox,
            _ => return None,
        })
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub fn descriptor(self) -> &'static PresetDescriptor {
        &PRESETS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn to_slot<const N: usize>(self) -> PresetSlot<N> {
        match self {
            Self::Pride => PresetSlot::Pride(PridePreset::new()),
            Self::Rainbow => PresetSlot::Rainbow(RainbowPreset::new()),
            Self::RainbowGlitter => PresetSlot::RainbowGlitter(RainbowPreset::with_glitter()),
            Self::SolidRainbow => PresetSlot::SolidRainbow(SolidRainbowPreset),
            Self::ColourWaves => PresetSlot::ColourWaves(ColourWavesPreset::new()),
            Self::Confetti => PresetSlot::Confetti(ConfettiPreset::new()),
            Self::Sinelon => PresetSlot::Sinelon(SinelonPreset::new()),
            Self::Beat => PresetSlot::Beat(BeatPreset),
            Self::Juggle => PresetSlot::Juggle(JugglePreset::new()),
            Self::Fire => PresetSlot::Fire(HeatMapPreset::fire()),
            Self::Water => PresetSlot::Water(HeatMapPreset::water()),
            Self::Twinkles => PresetSlot::Twinkles(TwinklesPreset::new()),
            Self::TwinkleFox => PresetSlot::TwinkleFox(TwinkleFoxPreset),
        }
    }
}

/// Preset slot - enum containing all possible presets
#[derive(Debug, Clone)]
pub enum PresetSlot<const N: usize> {
    Pride(PridePreset),
    Rainbow(RainbowPreset),
    RainbowGlitter(RainbowPreset),
    SolidRainbow(SolidRainbowPreset),
    ColourWaves(ColourWavesPreset),
    Confetti(ConfettiPreset),
    Sinelon(SinelonPreset),
    Beat(BeatPreset),
    Juggle(JugglePreset),
    Fire(HeatMapPreset<N>),
    Water(HeatMapPreset<N>),
    Twinkles(TwinklesPreset<N>),
    TwinkleFox(TwinkleFoxPreset),
}

impl<const N: usize> Default for PresetSlot<N> {
    fn default() -> Self {
        PresetId::default().to_slot()
    }
}

impl<const N: usize> PresetSlot<N> {
    /// Render the current preset
    pub fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        match self {
            Self::Pride(preset) => preset.render(leds, ctx),
            Self::Rainbow(preset) | Self::RainbowGlitter(preset) => preset.render(leds, ctx),
            Self::SolidRainbow(preset) => preset.render(leds, ctx),
            Self::ColourWaves(preset) => preset.render(leds, ctx),
            Self::Confetti(preset) => preset.render(leds, ctx),
            Self::Sinelon(preset) => preset.render(leds, ctx),
            Self::Beat(preset) => preset.render(leds, ctx),
            Self::Juggle(preset) => preset.render(leds, ctx),
            Self::Fire(preset) | Self::Water(preset) => preset.render(leds, ctx),
            Self::Twinkles(preset) => preset.render(leds, ctx),
            Self::TwinkleFox(preset) => preset.render(leds, ctx),
        }
    }

    /// Reset the preset state
    pub fn reset(&mut self) {
        match self {
            Self::Pride(preset) => Preset::reset(preset),
            Self::Rainbow(preset) | Self::RainbowGlitter(preset) => Preset::reset(preset),
            Self::SolidRainbow(preset) => Preset::reset(preset),
            Self::ColourWaves(preset) => Preset::reset(preset),
            Self::Confetti(preset) => Preset::reset(preset),
            Self::Sinelon(preset) => Preset::reset(preset),
            Self::Beat(preset) => Preset::reset(preset),
            Self::Juggle(preset) => Preset::reset(preset),
            Self::Fire(preset) | Self::Water(preset) => Preset::reset(preset),
            Self::Twinkles(preset) => Preset::reset(preset),
            Self::TwinkleFox(preset) => Preset::reset(preset),
        }
    }

    /// Get the preset ID for external observation
    pub fn id(&self) -> PresetId {
        match self {
            Self::Pride(_) => PresetId::Pride,
            Self::Rainbow(_) => PresetId::Rainbow,
            Self::RainbowGlitter(_) => PresetId::RainbowGlitter,
            Self::SolidRainbow(_) => PresetId::SolidRainbow,
            Self::ColourWaves(_) => PresetId::ColourWaves,
            Self::Confetti(_) => PresetId::Confetti,
            Self::Sinelon(_) => PresetId::Sinelon,
            Self::Beat(_) => PresetId::Beat,
            Self::Juggle(_) => PresetId::Juggle,
            Self::Fire(_) => PresetId::Fire,
            Self::Water(_) => PresetId::Water,
            Self::Twinkles(_) => PresetId::Twinkles,
            Self::TwinkleFox(_) => PresetId::TwinkleFox,
        }
    }
}
