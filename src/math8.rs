//! 8- and 16-bit integer helpers for animation maths
//!
//! Waveforms take the current time in milliseconds explicitly so presets
//! stay deterministic under an injected clock.

use core::f32::consts::TAU;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scale a 16-bit value by a 16-bit factor (0-65535 = 0.0-1.0)
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale16(value: u16, scale: u16) -> u16 {
    ((value as u32 * (1 + scale as u32)) >> 16) as u16
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Saturating add
#[inline]
pub const fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Saturating subtract
#[inline]
pub const fn qsub8(a: u8, b: u8) -> u8 {
    a.saturating_sub(b)
}

/// Sine of a 16-bit angle (a full turn is 65536), result in -32767..=32767
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn sin16(theta: u16) -> i16 {
    let radians = f32::from(theta) / 65536.0 * TAU;
    (libm::sinf(radians) * 32767.0) as i16
}

/// Sine of an 8-bit angle, shifted into 0..=255 (128 at angle 0)
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sin8(theta: u8) -> u8 {
    let wide = i32::from(sin16(u16::from(theta) << 8)) + 32768;
    (wide >> 8) as u8
}

/// Sawtooth that wraps `bpm88` (Q8.8 beats per minute) times per minute
#[allow(clippy::cast_possible_truncation)]
pub const fn beat88(bpm88: u16, now_ms: u64) -> u16 {
    ((now_ms.wrapping_mul(bpm88 as u64).wrapping_mul(280)) >> 16) as u16
}

/// Sawtooth at `bpm` beats per minute; values below 256 are whole beats
pub const fn beat16(bpm: u16, now_ms: u64) -> u16 {
    let bpm88 = if bpm < 256 { bpm << 8 } else { bpm };
    beat88(bpm88, now_ms)
}

/// Sine wave between `low` and `high` at `bpm88` (Q8.8) beats per minute
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn beatsin88(bpm88: u16, low: u16, high: u16, now_ms: u64) -> u16 {
    let beat = beat88(bpm88, now_ms);
    let wave = (i32::from(sin16(beat)) + 32768) as u16;
    low.wrapping_add(scale16(wave, high.wrapping_sub(low)))
}

/// Sine wave between `low` and `high` at `bpm` beats per minute
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn beatsin16(bpm: u16, low: u16, high: u16, now_ms: u64) -> u16 {
    let beat = beat16(bpm, now_ms);
    let wave = (i32::from(sin16(beat)) + 32768) as u16;
    low.wrapping_add(scale16(wave, high.wrapping_sub(low)))
}

/// 8-bit variant of [`beatsin16`]
#[allow(clippy::cast_possible_truncation)]
pub fn beatsin8(bpm: u8, low: u8, high: u8, now_ms: u64) -> u8 {
    let beat = beat16(u16::from(bpm), now_ms);
    let wave = sin8((beat >> 8) as u8);
    low.wrapping_add(scale8(wave, high.wrapping_sub(low)))
}

/// Triangle-ish envelope: fast attack over the first third, slow decay
#[allow(clippy::cast_possible_truncation)]
pub const fn attack_decay_wave8(i: u8) -> u8 {
    if i < 86 {
        i * 3
    } else {
        let i = i - 86;
        255 - (i + i / 2)
    }
}

/// Small linear-congruential random source
///
/// Each animation owns one so presets never share a random stream.
#[derive(Debug, Clone)]
pub struct Random {
    seed: u16,
}

impl Random {
    pub const fn new(seed: u16) -> Self {
        Self { seed }
    }

    /// Next raw 16-bit value
    pub const fn next16(&mut self) -> u16 {
        self.seed = self.seed.wrapping_mul(2053).wrapping_add(13849);
        self.seed
    }

    /// Next 8-bit value, folding both halves of the state
    #[allow(clippy::cast_possible_truncation)]
    pub const fn next8(&mut self) -> u8 {
        let value = self.next16();
        (value as u8).wrapping_add((value >> 8) as u8)
    }

    /// Value in `0..limit` (0 when `limit` is 0)
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    pub const fn below8(&mut self, limit: u8) -> u8 {
        ((self.next8() as u16 * limit as u16) >> 8) as u8
    }

    /// Value in `min..limit`
    pub const fn range8(&mut self, min: u8, limit: u8) -> u8 {
        min.wrapping_add(self.below8(limit.wrapping_sub(min)))
    }

    /// Value in `0..limit` (0 when `limit` is 0)
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    pub const fn below16(&mut self, limit: u16) -> u16 {
        ((self.next16() as u32 * limit as u32) >> 16) as u16
    }

    /// Stir extra entropy into the state
    pub const fn add_entropy(&mut self, entropy: u16) {
        self.seed = self.seed.wrapping_add(entropy);
    }
}
