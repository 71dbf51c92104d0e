//! Moving dots and speckles

use super::{Preset, PresetContext};
use crate::{
    color::{Hsv, Rgb, add_colors, color_from_palette, fade_to_black_by, hsv2rgb},
    math8::{Random, beatsin8, beatsin16},
};

/// Highest LED index as a `u16` waveform bound
#[allow(clippy::cast_possible_truncation)]
fn last_index(leds: &[Rgb]) -> u16 {
    leds.len().saturating_sub(1).min(usize::from(u16::MAX)) as u16
}

/// Random palette speckles that blink in and fade smoothly
#[derive(Debug, Clone)]
pub struct ConfettiPreset {
    rng: Random,
}

impl ConfettiPreset {
    pub const fn new() -> Self {
        Self {
            rng: Random::new(4242),
        }
    }
}

impl Preset for ConfettiPreset {
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        if leds.is_empty() {
            return;
        }
        fade_to_black_by(leds, 10);
        let pos = usize::from(self.rng.below16(last_index(leds).saturating_add(1)));
        let index = ctx.hue.wrapping_add(self.rng.below8(64));
        leds[pos] = add_colors(leds[pos], color_from_palette(ctx.palette, index, 255));
    }
}

/// A dot sweeping back and forth with a fading trail
///
/// The segment between the previous and current position is filled so
/// fast sweeps leave no gaps.
#[derive(Debug, Clone, Default)]
pub struct SinelonPreset {
    prev: usize,
}

impl SinelonPreset {
    pub const fn new() -> Self {
        Self { prev: 0 }
    }
}

impl Preset for SinelonPreset {
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        if leds.is_empty() {
            return;
        }
        let speed = ctx.param(0, 36);
        let fade = ctx.param(1, 20);
        fade_to_black_by(leds, fade);

        let pos = usize::from(beatsin16(
            u16::from(speed),
            0,
            last_index(leds),
            ctx.now_ms(),
        ));
        let color = color_from_palette(ctx.palette, ctx.hue, 255);
        let prev = self.prev.min(leds.len() - 1);
        let (from, to) = if pos < prev { (pos, prev) } else { (prev, pos) };
        for led in &mut leds[from..=to] {
            *led = color;
        }
        self.prev = pos;
    }

    fn reset(&mut self) {
        self.prev = 0;
    }
}

/// Palette stripes pulsing at a set number of beats per minute
#[derive(Debug, Clone, Copy, Default)]
pub struct BeatPreset;

impl Preset for BeatPreset {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        let bpm = ctx.param(0, 120);
        let beat = beatsin8(bpm, 64, 255, ctx.now_ms());
        for (i, led) in leds.iter_mut().enumerate() {
            let i = i as u8;
            let index = ctx.hue.wrapping_add(i.wrapping_mul(2));
            let brightness = beat.wrapping_sub(ctx.hue).wrapping_add(i.wrapping_mul(10));
            *led = color_from_palette(ctx.palette, index, brightness);
        }
    }
}

/// Coloured dots weaving in and out of sync with each other
///
/// The choreography changes every ten seconds over a thirty second loop.
#[derive(Debug, Clone)]
pub struct JugglePreset {
    dots: u8,
    fade_rate: u8,
    hue_step: u8,
    base_hue: u8,
    base_beat: u8,
    last_second: Option<u8>,
    rng: Random,
}

impl JugglePreset {
    pub const fn new() -> Self {
        Self {
            dots: 4,
            fade_rate: 2,
            hue_step: 255 / 4 - 1,
            base_hue: 0,
            base_beat: 5,
            last_second: None,
            rng: Random::new(777),
        }
    }

    fn choreograph(&mut self, second: u8) {
        match second {
            0 => {
                self.dots = 1;
                self.base_beat = 20;
                self.hue_step = 16;
                self.fade_rate = 2;
                self.base_hue = 0;
            }
            10 => {
                self.dots = 4;
                self.base_beat = 10;
                self.hue_step = 16;
                self.fade_rate = 8;
                self.base_hue = 128;
            }
            20 => {
                self.dots = 8;
                self.base_beat = 3;
                self.hue_step = 0;
                self.fade_rate = 8;
                self.base_hue = self.rng.next8();
            }
            _ => {}
        }
    }
}

impl Preset for JugglePreset {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        if leds.is_empty() {
            return;
        }
        let ms = ctx.now_ms();
        let second = ((ms / 1000) % 30) as u8;
        if self.last_second != Some(second) {
            self.last_second = Some(second);
            self.choreograph(second);
        }

        fade_to_black_by(leds, self.fade_rate);
        let mut hue = self.base_hue;
        for i in 0..self.dots {
            let bpm = u16::from(self.base_beat) + u16::from(i) + u16::from(self.dots);
            let pos = usize::from(beatsin16(bpm, 0, last_index(leds), ms));
            let color = hsv2rgb(Hsv {
                hue: ctx.hue.wrapping_add(hue),
                sat: 255,
                val: 255,
            });
            leds[pos] = add_colors(leds[pos], color);
            hue = hue.wrapping_add(self.hue_step);
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
