//! Twinkling palette lights

use super::{Preset, PresetContext};
use crate::{
    color::{Palette, Rgb, add_colors, color_from_palette_flat},
    math8::{Random, attack_decay_wave8, qsub8, scale8, sin8},
};

const STARTING_BRIGHTNESS: u8 = 64;
const FADE_IN_SPEED: u8 = 32;
const FADE_OUT_SPEED: u8 = 20;
const DENSITY: u8 = 255;

/// Random pixels fade in from a dim palette colour, peak, then fade out
#[derive(Debug, Clone)]
pub struct TwinklesPreset<const N: usize> {
    rising: [bool; N],
    rng: Random,
}

impl<const N: usize> TwinklesPreset<N> {
    pub fn new() -> Self {
        Self {
            rising: [false; N],
            rng: Random::new(2024),
        }
    }
}

impl<const N: usize> Default for TwinklesPreset<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn scaled(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

impl<const N: usize> Preset for TwinklesPreset<N> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        let len = leds.len().min(N);
        if len == 0 {
            return;
        }

        for (led, rising) in leds[..len].iter_mut().zip(&mut self.rising[..len]) {
            if *rising {
                *led = add_colors(*led, scaled(*led, FADE_IN_SPEED));
                if led.r == 255 || led.g == 255 || led.b == 255 {
                    *rising = false;
                }
            } else {
                *led = scaled(*led, 255 - FADE_OUT_SPEED);
            }
        }

        if self.rng.next8() < DENSITY {
            let pos = usize::from(self.rng.below16(len.min(usize::from(u16::MAX)) as u16));
            if leds[pos] == Rgb::default() {
                let index = self.rng.next8();
                leds[pos] = color_from_palette_flat(ctx.palette, index, STARTING_BRIGHTNESS);
                self.rising[pos] = true;
            }
        }
    }

    fn reset(&mut self) {
        self.rising = [false; N];
    }
}

/// Deterministic twinkles where every pixel has its own clock
///
/// Each pixel's phase, speed and colour come from a fixed pseudo-random
/// sequence re-seeded every frame, so no per-pixel state is stored.
/// Parameters are twinkle speed (0-8) and density (1-8).
#[derive(Debug, Clone, Copy, Default)]
pub struct TwinkleFoxPreset;

impl TwinkleFoxPreset {
    const SEED: u16 = 11337;

    const fn next(prng: u16) -> u16 {
        prng.wrapping_mul(2053).wrapping_add(1384)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn twinkle(ms: u32, salt: u8, speed: u8, density: u8, palette: &Palette) -> Rgb {
        let ticks = ms >> (8 - u32::from(speed.min(8)));
        let fast_cycle = ticks as u8;
        let mut slow_cycle = ((ticks >> 8) as u16).wrapping_add(u16::from(salt));
        slow_cycle = slow_cycle.wrapping_add(u16::from(sin8(slow_cycle as u8)));
        slow_cycle = Self::next(slow_cycle);
        let slow_cycle8 = (slow_cycle as u8).wrapping_add((slow_cycle >> 8) as u8);

        if (slow_cycle8 & 0x0E) / 2 >= density {
            return Rgb::default();
        }
        let bright = attack_decay_wave8(fast_cycle);
        if bright == 0 {
            return Rgb::default();
        }

        let hue = slow_cycle8.wrapping_sub(salt);
        let mut color = color_from_palette_flat(palette, hue, bright);
        // Cool like an incandescent bulb while fading out
        if fast_cycle >= 128 {
            let cooling = (fast_cycle - 128) >> 4;
            color.g = qsub8(color.g, cooling);
            color.b = qsub8(color.b, cooling * 2);
        }
        color
    }
}

impl Preset for TwinkleFoxPreset {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        let speed = ctx.param(0, 4);
        let density = ctx.param(1, 5);
        let clock = ctx.now_ms() as u32;
        let mut prng = Self::SEED;

        for led in leds {
            prng = Self::next(prng);
            let clock_offset = prng;
            prng = Self::next(prng);
            // Speed multiplier in eighths, 8/8 to 23/8
            let multiplier = (((prng & 0xFF) >> 4) + (prng & 0x0F)) & 0x0F;
            let multiplier = u32::from(multiplier + 8);
            let my_clock = (clock.wrapping_mul(multiplier) >> 3).wrapping_add(u32::from(clock_offset));
            let salt = (prng >> 8) as u8;
            *led = Self::twinkle(my_clock, salt, speed, density, ctx.palette);
        }
    }
}
