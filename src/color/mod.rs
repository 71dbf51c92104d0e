mod gradient;
mod palette;
mod utils;

pub use gradient::{fill_gradient_rgb, fill_gradient_stops};
pub use palette::{
    NamedPalette, PALETTE_COUNT, PALETTES, Palette, color_from_palette, color_from_palette_flat,
    palette, palette_from_stops,
};
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{
    add_colors, blend_colors, fade_to_black_by, fill_rainbow, fill_solid, hsv2rgb, rgb_from_u32,
};

pub type Rgb = RGB8;
pub type Hsv = HSV;
