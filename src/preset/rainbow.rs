//! Hue-cycling presets that ignore palettes

use super::{Preset, PresetContext};
use crate::{
    color::{Hsv, Rgb, add_colors, blend_colors, fill_rainbow, fill_solid, hsv2rgb},
    math8::{Random, beatsin88, sin16},
};

const GLITTER_CHANCE: u8 = 80;
const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Ever-changing rainbows with widely varying saturation and brightness
#[derive(Debug, Clone, Default)]
pub struct PridePreset {
    pseudotime: u16,
    last_ms: u16,
    hue16: u16,
}

impl PridePreset {
    pub const fn new() -> Self {
        Self {
            pseudotime: 0,
            last_ms: 0,
            hue16: 0,
        }
    }
}

impl Preset for PridePreset {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        let ms = ctx.now_ms();
        let sat8 = beatsin88(87, 220, 250, ms) as u8;
        let bright_depth = beatsin88(341, 96, 224, ms) as u8;
        let theta_step = beatsin88(203, 25 * 256, 40 * 256, ms);
        let ms_multiplier = beatsin88(147, 23, 60, ms);
        let hue_step = beatsin88(113, 1, 3000, ms);

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
            theta = theta.wrapping_add(theta_step);
            let b16 = (i32::from(sin16(theta)) + 32768) as u32;
            let bri16 = (b16 * b16) >> 16;
            let bri8 = ((bri16 * u32::from(bright_depth)) >> 16) as u8;

            let color = hsv2rgb(Hsv {
                hue: (hue16 >> 8) as u8,
                sat: sat8,
                val: bri8.wrapping_add(255 - bright_depth),
            });
            let pixel = &mut leds[len - 1 - i];
            *pixel = blend_colors(*pixel, color, 64);
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Classic rainbow spread over the strip, optionally with white sparkles
#[derive(Debug, Clone)]
pub struct RainbowPreset {
    glitter: Option<Random>,
}

impl RainbowPreset {
    pub const fn new() -> Self {
        Self { glitter: None }
    }

    pub const fn with_glitter() -> Self {
        Self {
            glitter: Some(Random::new(1337)),
        }
    }
}

impl Preset for RainbowPreset {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        if leds.is_empty() {
            return;
        }
        let delta = (255 / leds.len()) as u8;
        fill_rainbow(leds, ctx.hue, delta);

        if let Some(rng) = &mut self.glitter
            && rng.next8() < GLITTER_CHANCE
        {
            let pos = usize::from(rng.below16(leds.len() as u16));
            leds[pos] = add_colors(leds[pos], WHITE);
        }
    }
}

/// Whole strip in the shared hue
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidRainbowPreset;

impl Preset for SolidRainbowPreset {
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        let color = hsv2rgb(Hsv {
            hue: ctx.hue,
            sat: 255,
            val: 255,
        });
        fill_solid(leds, color);
    }
}
