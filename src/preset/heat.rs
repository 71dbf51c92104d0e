//! Heat-map simulations (fire rising, water falling)

use super::{Preset, PresetContext};
use crate::{
    color::{Palette, Rgb, color_from_palette, fill_solid, palette_from_stops, rgb_from_u32},
    math8::{Random, qadd8, qsub8, scale8},
};

/// Sparks are only ignited within this many cells of the source
const SPARK_ZONE: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatDirection {
    /// Heat source at the first LED
    Up,
    /// Heat source at the last LED
    Down,
}

/// One-dimensional heat diffusion mapped through a palette
///
/// Parameters are cooling and sparking, in that order.
#[derive(Debug, Clone)]
pub struct HeatMapPreset<const N: usize> {
    heat: [u8; N],
    palette: Palette,
    direction: HeatDirection,
    rng: Random,
}

impl<const N: usize> HeatMapPreset<N> {
    pub fn new(palette: Palette, direction: HeatDirection) -> Self {
        Self {
            heat: [0; N],
            palette,
            direction,
            rng: Random::new(31337),
        }
    }

    /// Black, red, yellow, white; burning down from the far end
    pub fn fire() -> Self {
        Self::new(
            palette_from_stops(&[
                rgb_from_u32(0x00_0000),
                rgb_from_u32(0xFF_0000),
                rgb_from_u32(0xFF_FF00),
                rgb_from_u32(0xFF_FFFF),
            ]),
            HeatDirection::Down,
        )
    }

    /// Black, blue, aqua, white; rising from the first LED
    pub fn water() -> Self {
        Self::new(
            palette_from_stops(&[
                rgb_from_u32(0x00_0000),
                rgb_from_u32(0x00_00FF),
                rgb_from_u32(0x00_FFFF),
                rgb_from_u32(0xFF_FFFF),
            ]),
            HeatDirection::Up,
        )
    }

    pub fn heat(&self) -> &[u8] {
        &self.heat
    }
}

impl<const N: usize> Preset for HeatMapPreset<N> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, leds: &mut [Rgb], ctx: &PresetContext<'_>) {
        fill_solid(leds, Rgb::default());
        let len = leds.len().min(N);
        if len == 0 {
            return;
        }
        let cooling = ctx.param(0, 80);
        let sparking = ctx.param(1, 120);
        self.rng.add_entropy(ctx.now_ms() as u16);

        // Cool every cell a little
        let cool_limit = (usize::from(cooling) * 10 / len + 2).min(255) as u8;
        for cell in &mut self.heat[..len] {
            *cell = qsub8(*cell, self.rng.range8(0, cool_limit));
        }

        // Heat drifts away from the source and diffuses
        for k in (2..len).rev() {
            let sum = u16::from(self.heat[k - 1]) + 2 * u16::from(self.heat[k - 2]);
            self.heat[k] = (sum / 3) as u8;
        }

        // Ignite new sparks near the source
        if self.rng.next8() < sparking {
            let y = usize::from(self.rng.below8(SPARK_ZONE));
            if y < len {
                self.heat[y] = qadd8(self.heat[y], self.rng.range8(160, 255));
            }
        }

        for (j, &cell) in self.heat[..len].iter().enumerate() {
            let color = color_from_palette(&self.palette, scale8(cell, 190), 255);
            let target = match self.direction {
                HeatDirection::Up => j,
                HeatDirection::Down => len - 1 - j,
            };
            leds[target] = color;
        }
    }

    fn reset(&mut self) {
        self.heat = [0; N];
    }
}
