use super::{Preset, PresetContext};
use crate::{
    color::{Rgb, blend_colors, color_from_palette},
    math8::{beatsin88, scale8, sin16},
};

/// Palette colour waves with a constantly varying rhythm
#[derive(Debug, Clone, Default)]
pub struct ColourWavesPreset {
    pseudotime: u16,
    last_ms: u16,
    hue16: u16,
}

impl ColourWavesPreset {
    pub const fn new() -> Self {
        Self {
            pseudotime: 0,
            last_ms: 0,
            hue16: 0,
        }
    }
}

impl Preset for ColourWavesPreset {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        let ms = ctx.now_ms();
        let bright_depth = beatsin88(341, 96, 224, ms) as u8;
        let theta_step = beatsin88(203, 25 * 256, 40 * 256, ms);
        let ms_multiplier = beatsin88(147, 23, 60, ms);
        let hue_step = beatsin88(113, 300, 1500, ms);

        let now16 = ms as u16;
        let delta = now16.wrapping_sub(self.last_ms);
        self.last_ms = now16;
        self.pseudotime = self
            .pseudotime
            .wrapping_add(delta.wrapping_mul(ms_multiplier));
        let mut hue16 = self.hue16;
        self.hue16 = self
            .hue16
            .wrapping_add(delta.wrapping_mul(beatsin88(400, 5, 9, ms)));

        let mut theta = self.pseudotime;
        let len = leds.len();
        for i in 0..len {
            hue16 = hue16.wrapping_add(hue_step);
            // Triangle wave over the hue so the palette is walked back and forth
            let h16_128 = hue16 >> 7;
            let hue8 = if h16_128 & 0x100 == 0 {
                (h16_128 >> 1) as u8
            } else {
                255 - (h16_128 >> 1) as u8
            };

            theta = theta.wrapping_add(theta_step);
            let b16 = (i32::from(sin16(theta)) + 32768) as u32;
            let bri16 = (b16 * b16) >> 16;
            let bri8 = ((bri16 * u32::from(bright_depth)) >> 16) as u8;

            let color = color_from_palette(
                ctx.palette,
                scale8(hue8, 240),
                bri8.wrapping_add(255 - bright_depth),
            );
            let pixel = &mut leds[len - 1 - i];
            *pixel = blend_colors(*pixel, color, 128);
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
