//! 16-entry colour palettes and palette lookup
//!
//! Lookups blend linearly between neighbouring entries, so an index walks
//! smoothly through the palette and wraps from the last entry to the first.

use super::{Rgb, fill_gradient_stops, rgb_from_u32};
use crate::math8::{blend8, scale8};

pub type Palette = [Rgb; 16];

pub const PALETTE_COUNT: usize = 18;

/// A palette together with the name shown to clients
#[derive(Debug, Clone, Copy)]
pub struct NamedPalette {
    pub name: &'static str,
    pub colors: Palette,
}

macro_rules! hex_palette {
    ($($color:expr),* $(,)?) => {
        [
            $(rgb_from_u32($color)),*
        ]
    };
}

const FAIRY: u32 = 0xFFE42D;
const FAIRY_HALF: u32 = (FAIRY & 0xFEFEFE) / 2;
const FAIRY_QUARTER: u32 = (FAIRY & 0xFCFCFC) / 4;

const C9_RED: u32 = 0xB80400;
const C9_ORANGE: u32 = 0x902C02;
const C9_GREEN: u32 = 0x046002;
const C9_BLUE: u32 = 0x070758;
const C9_WHITE: u32 = 0x606820;

const ICE_1: u32 = 0x0C1040;
const ICE_2: u32 = 0x182080;
const ICE_3: u32 = 0x5080C0;

const HOLLY_GREEN: u32 = 0x00580C;
const HOLLY_RED: u32 = 0xB00402;

const RED: u32 = 0xFF0000;
const BLUE: u32 = 0x0000FF;
const GREEN: u32 = 0x008000;
const GRAY: u32 = 0x808080;
const WHITE: u32 = 0xFFFFFF;

const WARM: u32 = 0xE1A024;
const WARM_DIM: u32 = 0x705012;

/// Every palette, in client index order
#[allow(clippy::unreadable_literal)]
pub static PALETTES: [NamedPalette; PALETTE_COUNT] = [
    NamedPalette {
        name: "Rainbow",
        colors: hex_palette![
            0xFF0000, 0xD52A00, 0xAB5500, 0xAB7F00, 0xABAB00, 0x56D500, 0x00FF00, 0x00D52A,
            0x00AB55, 0x0056AA, 0x0000FF, 0x2A00D5, 0x5500AB, 0x7F0081, 0xAB0055, 0xD5002B,
        ],
    },
    NamedPalette {
        name: "Rainbow Stripe",
        colors: hex_palette![
            0xFF0000, 0x000000, 0xAB5500, 0x000000, 0xABAB00, 0x000000, 0x00FF00, 0x000000,
            0x00AB55, 0x000000, 0x0000FF, 0x000000, 0x5500AB, 0x000000, 0xAB0055, 0x000000,
        ],
    },
    NamedPalette {
        name: "Cloud",
        colors: hex_palette![
            0x0000FF, 0x00008B, 0x00008B, 0x00008B, 0x00008B, 0x00008B, 0x00008B, 0x00008B,
            0x0000FF, 0x00008B, 0x87CEEB, 0x87CEEB, 0xADD8E6, 0xFFFFFF, 0xADD8E6, 0x87CEEB,
        ],
    },
    NamedPalette {
        name: "Lava",
        colors: hex_palette![
            0x000000, 0x800000, 0x000000, 0x800000, 0x8B0000, 0x8B0000, 0x800000, 0x8B0000,
            0x8B0000, 0x8B0000, 0xFF0000, 0xFFA500, 0xFFFFFF, 0xFFA500, 0xFF0000, 0x8B0000,
        ],
    },
    NamedPalette {
        name: "Ocean",
        colors: hex_palette![
            0x191970, 0x00008B, 0x191970, 0x000080, 0x00008B, 0x0000CD, 0x2E8B57, 0x008080,
            0x5F9EA0, 0x0000FF, 0x008B8B, 0x6495ED, 0x7FFFD4, 0x2E8B57, 0x00FFFF, 0x87CEFA,
        ],
    },
    NamedPalette {
        name: "Forest",
        colors: hex_palette![
            0x006400, 0x006400, 0x556B2F, 0x006400, 0x008000, 0x228B22, 0x6B8E23, 0x008000,
            0x2E8B57, 0x66CDAA, 0x32CD32, 0x9ACD32, 0x90EE90, 0x7CFC00, 0x66CDAA, 0x228B22,
        ],
    },
    NamedPalette {
        name: "Party",
        colors: hex_palette![
            0x5500AB, 0x84007C, 0xB5004B, 0xE5001B, 0xE81700, 0xB84700, 0xAB7700, 0xABAB00,
            0xAB5500, 0xDD2200, 0xF2000E, 0xC2003E, 0x8F0071, 0x5F00A1, 0x2F00D0, 0x0007F9,
        ],
    },
    NamedPalette {
        name: "Heat",
        colors: hex_palette![
            0x000000, 0x330000, 0x660000, 0x990000, 0xCC0000, 0xFF0000, 0xFF3300, 0xFF6600,
            0xFF9900, 0xFFCC00, 0xFFFF00, 0xFFFF33, 0xFFFF66, 0xFFFF99, 0xFFFFCC, 0xFFFFFF,
        ],
    },
    NamedPalette {
        name: "Snow",
        colors: hex_palette![
            WHITE, WHITE, WHITE, WHITE, 0x555555, 0x555555, 0x555555, 0x555555,
            0x555555, 0x555555, 0x555555, 0x555555, 0x555555, 0x555555, 0x555555, 0x555555,
        ],
    },
    NamedPalette {
        name: "Incandescent",
        colors: hex_palette![
            WARM, WARM, WARM, WARM, WARM_DIM, WARM_DIM, WARM, WARM,
            WARM, WARM, WARM_DIM, WARM_DIM, WARM, WARM, WARM, WARM,
        ],
    },
    NamedPalette {
        name: "RedGreenWhite",
        colors: hex_palette![
            RED, RED, RED, RED, RED, RED, RED, RED,
            RED, RED, GRAY, GRAY, GREEN, GREEN, GREEN, GREEN,
        ],
    },
    NamedPalette {
        name: "Holly",
        colors: hex_palette![
            HOLLY_GREEN, HOLLY_GREEN, HOLLY_GREEN, HOLLY_GREEN,
            HOLLY_GREEN, HOLLY_GREEN, HOLLY_GREEN, HOLLY_GREEN,
            HOLLY_GREEN, HOLLY_GREEN, HOLLY_GREEN, HOLLY_GREEN,
            HOLLY_GREEN, HOLLY_GREEN, HOLLY_GREEN, HOLLY_RED,
        ],
    },
    NamedPalette {
        name: "RedWhite",
        colors: hex_palette![
            RED, RED, RED, RED, GRAY, GRAY, GRAY, GRAY,
            RED, RED, RED, RED, GRAY, GRAY, GRAY, GRAY,
        ],
    },
    NamedPalette {
        name: "BlueWhite",
        colors: hex_palette![
            BLUE, BLUE, BLUE, BLUE, BLUE, BLUE, BLUE, BLUE,
            BLUE, BLUE, BLUE, BLUE, BLUE, GRAY, GRAY, GRAY,
        ],
    },
    NamedPalette {
        name: "FairyLight",
        colors: hex_palette![
            FAIRY, FAIRY, FAIRY, FAIRY, FAIRY_HALF, FAIRY_HALF, FAIRY, FAIRY,
            FAIRY_QUARTER, FAIRY_QUARTER, FAIRY, FAIRY, FAIRY, FAIRY, FAIRY, FAIRY,
        ],
    },
    NamedPalette {
        name: "Snow2",
        colors: hex_palette![
            0x304048, 0x304048, 0x304048, 0x304048, 0x304048, 0x304048, 0x304048, 0x304048,
            0x304048, 0x304048, 0x304048, 0x304048, 0x304048, 0x304048, 0x304048, 0xE0F0FF,
        ],
    },
    NamedPalette {
        name: "RetroC9",
        colors: hex_palette![
            C9_RED, C9_ORANGE, C9_RED, C9_ORANGE, C9_ORANGE, C9_RED, C9_ORANGE, C9_RED,
            C9_GREEN, C9_GREEN, C9_GREEN, C9_GREEN, C9_BLUE, C9_BLUE, C9_BLUE, C9_WHITE,
        ],
    },
    NamedPalette {
        name: "Ice",
        colors: hex_palette![
            ICE_1, ICE_1, ICE_1, ICE_1, ICE_1, ICE_1, ICE_1, ICE_1,
            ICE_1, ICE_1, ICE_1, ICE_1, ICE_2, ICE_2, ICE_2, ICE_3,
        ],
    },
];

/// Palette by client index, falling back to the first palette
pub fn palette(index: u8) -> &'static Palette {
    PALETTES
        .get(usize::from(index))
        .map_or(&PALETTES[0].colors, |named| &named.colors)
}

/// Look up `index` in a palette and scale the result by `brightness`
///
/// The high nibble picks the entry and the low nibble blends towards the
/// next one.
pub fn color_from_palette(palette: &Palette, index: u8, brightness: u8) -> Rgb {
    let hi = usize::from(index >> 4);
    let lo = index & 0x0F;
    let entry = palette[hi];
    let mut color = if lo == 0 {
        entry
    } else {
        let next = palette[(hi + 1) % palette.len()];
        let amount = lo << 4;
        Rgb {
            r: blend8(entry.r, next.r, amount),
            g: blend8(entry.g, next.g, amount),
            b: blend8(entry.b, next.b, amount),
        }
    };
    if brightness != 255 {
        color.r = scale8(color.r, brightness);
        color.g = scale8(color.g, brightness);
        color.b = scale8(color.b, brightness);
    }
    color
}

/// Like [`color_from_palette`] but without blending between entries
pub fn color_from_palette_flat(palette: &Palette, index: u8, brightness: u8) -> Rgb {
    color_from_palette(palette, index & 0xF0, brightness)
}

/// Spread a handful of colour stops evenly over a 16-entry palette
pub fn palette_from_stops(stops: &[Rgb]) -> Palette {
    let mut colors = [Rgb::default(); 16];
    fill_gradient_stops(&mut colors, stops);
    colors
}
