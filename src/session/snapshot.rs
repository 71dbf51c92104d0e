//! JSON views a client loads when it connects
//!
//! Keys match the ones the web client reads, so the structs below are
//! named after the wire format rather than the engine types they borrow.

use serde::{Serialize, Serializer};

use super::{MAX_RESPONSE_LEN, Response};
use crate::{
    color::{PALETTES, Rgb},
    preset::{PRESETS, ParamSpec},
    state::{DisplayState, FixedPreset, FixedPresetBank, MAX_COLOURS},
};

fn rgb_triples(colours: &[Rgb; MAX_COLOURS]) -> [[u8; 3]; MAX_COLOURS] {
    colours.map(|c| [c.r, c.g, c.b])
}

/// Display state together with the preset and palette registries
#[derive(Serialize)]
pub struct ConfigView<'a> {
    ledson: bool,
    mode: u8,
    brightness: u8,
    delay: u8,
    coloursused: u8,
    gradient: bool,
    interleave: bool,
    colours: [[u8; 3]; MAX_COLOURS],
    presetidx: u8,
    presets: PresetList<'a>,
    palettes: PaletteNames,
    rowtime: u32,
    bmpfile: &'a str,
    apssid: &'a str,
    appw: &'a str,
}

impl<'a> ConfigView<'a> {
    pub fn new(state: &'a DisplayState) -> Self {
        Self {
            ledson: state.leds_on,
            mode: state.mode.as_raw(),
            brightness: state.brightness,
            delay: state.switch_delay_secs,
            coloursused: state.layout.colours_used,
            gradient: state.layout.gradient,
            interleave: state.layout.interleave,
            colours: rgb_triples(&state.layout.colours),
            presetidx: state.preset.as_raw(),
            presets: PresetList(state),
            palettes: PaletteNames,
            rowtime: state.row_interval_ms,
            bmpfile: &state.bitmap_path,
            apssid: &state.access_point.ssid,
            appw: &state.access_point.password,
        }
    }
}

/// Every registry preset with its current parameter values
struct PresetList<'a>(&'a DisplayState);

impl Serialize for PresetList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let state = self.0;
        serializer.collect_seq(PRESETS.iter().map(|preset| PresetEntry {
            name: preset.name,
            parms: ParamList {
                specs: preset.params,
                values: state.params_of(preset.id),
            },
            paletteidx: state.palette_of(preset.id),
        }))
    }
}

#[derive(Serialize)]
struct PresetEntry<'a> {
    name: &'static str,
    #[serde(skip_serializing_if = "ParamList::is_empty")]
    parms: ParamList<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paletteidx: Option<u8>,
}

struct ParamList<'a> {
    specs: &'static [ParamSpec],
    values: &'a [u8],
}

impl ParamList<'_> {
    fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Serialize for ParamList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.specs.iter().zip(self.values).map(|(spec, &value)| {
            ParamEntry {
                name: spec.name,
                values: [spec.min, spec.max, value],
            }
        }))
    }
}

/// `values` holds min, max and current value in that order
#[derive(Serialize)]
struct ParamEntry {
    name: &'static str,
    values: [u8; 3],
}

struct PaletteNames;

impl Serialize for PaletteNames {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(PALETTES.iter().map(|palette| palette.name))
    }
}

/// The named fixed-colour slots
pub struct FixedPresetsView<'a>(pub &'a FixedPresetBank);

impl Serialize for FixedPresetsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.slots.iter().map(FixedPresetEntry::new))
    }
}

#[derive(Serialize)]
struct FixedPresetEntry<'a> {
    name: &'a str,
    coloursused: u8,
    gradient: bool,
    interleave: bool,
    colours: [[u8; 3]; MAX_COLOURS],
}

impl<'a> FixedPresetEntry<'a> {
    fn new(preset: &'a FixedPreset) -> Self {
        Self {
            name: &preset.name,
            coloursused: preset.layout.colours_used,
            gradient: preset.layout.gradient,
            interleave: preset.layout.interleave,
            colours: rgb_triples(&preset.layout.colours),
        }
    }
}

/// Append `value` as compact JSON, `false` when it does not fit
pub fn write_json<T: Serialize>(value: &T, out: &mut Response) -> bool {
    let mut buffer = [0u8; MAX_RESPONSE_LEN];
    let room = out.capacity() - out.len();
    let Ok(len) = serde_json_core::to_slice(value, &mut buffer[..room]) else {
        return false;
    };
    core::str::from_utf8(&buffer[..len]).is_ok_and(|json| out.push_str(json).is_ok())
}
