//! Display state owned by the engine
//!
//! All client-visible settings live in [`DisplayState`]. Commands mutate it,
//! the renderer reads it, and the config store persists it.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::{
    color::{PALETTE_COUNT, Rgb},
    preset::{
        MAX_PARAMS, PRESETS, PresetId, PresetPalettes, PresetParams, default_palettes,
        default_params,
    },
};

/// Colours available in fixed mode
pub const MAX_COLOURS: usize = 5;

/// Named fixed-colour slots
pub const MAX_FIXED_PRESETS: usize = 8;

pub const DEFAULT_BRIGHTNESS: u8 = 36;
pub const DEFAULT_SWITCH_DELAY_SECS: u8 = 3;
pub const DEFAULT_ROW_INTERVAL_MS: u32 = 20;
pub const DEFAULT_BITMAP_PATH: &str = "/bmp/pixelstick.bmp";
pub const DEFAULT_AP_SSID: &str = "PixelStick";
pub const DEFAULT_AP_PASSWORD: &str = "pixelstick";
pub const DEFAULT_FIXED_PRESET_NAME: &str = "Empty";

/// Longest file path the device stores
pub const MAX_PATH_LEN: usize = 31;

pub type FilePath = String<MAX_PATH_LEN>;
pub type PresetName = String<15>;

/// Copy as much of `text` as fits, cutting on a character boundary
pub fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

const MODE_FIXED: u8 = 0;
const MODE_PRESET: u8 = 1;
const MODE_BITMAP: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum DisplayMode {
    #[default]
    Fixed = MODE_FIXED,
    Preset = MODE_PRESET,
    Bitmap = MODE_BITMAP,
}

impl DisplayMode {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_FIXED => Self::Fixed,
            MODE_PRESET => Self::Preset,
            MODE_BITMAP => Self::Bitmap,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }
}

/// How fixed mode lays its colours out along the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedLayout {
    /// Number of leading entries of `colours` in use, 1 to [`MAX_COLOURS`]
    pub colours_used: u8,
    pub gradient: bool,
    pub interleave: bool,
    #[serde(with = "rgb_array")]
    pub colours: [Rgb; MAX_COLOURS],
}

impl Default for FixedLayout {
    fn default() -> Self {
        Self {
            colours_used: 1,
            gradient: false,
            interleave: false,
            colours: [Rgb::default(); MAX_COLOURS],
        }
    }
}

impl FixedLayout {
    /// The colours in use, never empty
    pub fn active_colours(&self) -> &[Rgb] {
        &self.colours[..self.used()]
    }

    pub fn used(&self) -> usize {
        usize::from(self.colours_used).clamp(1, MAX_COLOURS)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn sanitize(&mut self) {
        self.colours_used = self.used() as u8;
    }
}

mod rgb_array {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::MAX_COLOURS;
    use crate::color::Rgb;

    pub(super) fn serialize<S: Serializer>(
        colours: &[Rgb; MAX_COLOURS],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        colours.map(|c| [c.r, c.g, c.b]).serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[Rgb; MAX_COLOURS], D::Error> {
        let raw = <[[u8; 3]; MAX_COLOURS]>::deserialize(deserializer)?;
        Ok(raw.map(|[r, g, b]| Rgb { r, g, b }))
    }
}

/// Named snapshot of a fixed layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPreset {
    pub name: PresetName,
    pub layout: FixedLayout,
}

impl Default for FixedPreset {
    fn default() -> Self {
        Self {
            name: truncated(DEFAULT_FIXED_PRESET_NAME),
            layout: FixedLayout::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPresetBank {
    pub slots: [FixedPreset; MAX_FIXED_PRESETS],
}

impl Default for FixedPresetBank {
    fn default() -> Self {
        Self {
            slots: core::array::from_fn(|_| FixedPreset::default()),
        }
    }
}

impl FixedPresetBank {
    pub fn get(&self, slot: usize) -> Option<&FixedPreset> {
        self.slots.get(slot)
    }

    /// Store `layout` under `name`; returns `false` for an unknown slot
    pub fn save(&mut self, slot: usize, name: &str, layout: &FixedLayout) -> bool {
        let Some(preset) = self.slots.get_mut(slot) else {
            return false;
        };
        preset.name = truncated(name);
        preset.layout = *layout;
        true
    }

    /// Restore layout invariants after loading a bank from outside
    pub fn sanitize(&mut self) {
        for preset in &mut self.slots {
            preset.layout.sanitize();
        }
    }
}

/// Soft access point the device falls back to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPoint {
    pub ssid: String<31>,
    pub password: String<15>,
}

impl Default for AccessPoint {
    fn default() -> Self {
        Self {
            ssid: truncated(DEFAULT_AP_SSID),
            password: truncated(DEFAULT_AP_PASSWORD),
        }
    }
}

/// Network the device joins as a client
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub ssid: String<31>,
    pub password: String<63>,
}

impl Credentials {
    /// Parse `ssid:password`; a missing colon leaves the password empty
    pub fn parse(text: &str) -> Self {
        let (ssid, password) = text.split_once(':').unwrap_or((text, ""));
        Self {
            ssid: truncated(ssid),
            password: truncated(password),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub leds_on: bool,
    pub mode: DisplayMode,
    pub brightness: u8,
    pub switch_delay_secs: u8,
    pub row_interval_ms: u32,
    pub layout: FixedLayout,
    pub preset: PresetId,
    pub params: PresetParams,
    pub palettes: PresetPalettes,
    pub bitmap_path: FilePath,
    pub access_point: AccessPoint,
    /// Play the bitmap again after each pass while looping is on
    #[serde(skip)]
    pub repeat_bitmap: bool,
    #[serde(skip)]
    pub looping_bitmap: bool,
    /// Settings changed since the last save
    #[serde(skip)]
    pub pending_changes: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            leds_on: false,
            mode: DisplayMode::Fixed,
            brightness: DEFAULT_BRIGHTNESS,
            switch_delay_secs: DEFAULT_SWITCH_DELAY_SECS,
            row_interval_ms: DEFAULT_ROW_INTERVAL_MS,
            layout: FixedLayout::default(),
            preset: PresetId::default(),
            params: default_params(),
            palettes: default_palettes(),
            bitmap_path: truncated(DEFAULT_BITMAP_PATH),
            access_point: AccessPoint::default(),
            repeat_bitmap: false,
            looping_bitmap: false,
            pending_changes: false,
        }
    }
}

impl DisplayState {
    /// Parameter values of `preset`, one per registry parameter
    pub fn params_of(&self, preset: PresetId) -> &[u8] {
        let count = preset.descriptor().params.len().min(MAX_PARAMS);
        &self.params[preset.index()][..count]
    }

    /// Palette selected for `preset`
    pub fn palette_of(&self, preset: PresetId) -> Option<u8> {
        self.palettes[preset.index()]
    }

    /// Copy that is safe to persist: LEDs always come back off after boot
    pub fn snapshot(&self) -> Self {
        Self {
            leds_on: false,
            ..self.clone()
        }
    }

    /// Restore invariants after loading data from outside
    pub fn sanitize(&mut self) {
        self.layout.sanitize();
        for (preset, (values, palette)) in PRESETS
            .iter()
            .zip(self.params.iter_mut().zip(self.palettes.iter_mut()))
        {
            for (value, spec) in values.iter_mut().zip(preset.params) {
                *value = spec.clamp(i32::from(*value));
            }
            *palette = match (preset.palette, *palette) {
                (None, _) => None,
                (Some(_), Some(index)) if usize::from(index) < PALETTE_COUNT => Some(index),
                (default, _) => default,
            };
        }
    }
}
