//! Fixed-colour layouts

use crate::{
    color::{Rgb, fill_gradient_stops},
    state::FixedLayout,
};

/// Compose a fixed-mode frame
pub fn render_fixed(leds: &mut [Rgb], layout: &FixedLayout) {
    let colours = layout.active_colours();
    if layout.interleave {
        interleaved(leds, colours);
    } else if layout.gradient {
        fill_gradient_stops(leds, colours);
    } else {
        banded(leds, colours);
    }
}

/// Contiguous bands of equal length; the last band takes the remainder
pub fn banded(leds: &mut [Rgb], colours: &[Rgb]) {
    let Some(last) = colours.len().checked_sub(1) else {
        return;
    };
    let band_len = (leds.len() / colours.len()).max(1);
    for (i, led) in leds.iter_mut().enumerate() {
        *led = colours[(i / band_len).min(last)];
    }
}

/// Repeat the colours LED by LED
pub fn interleaved(leds: &mut [Rgb], colours: &[Rgb]) {
    if colours.is_empty() {
        return;
    }
    for (led, colour) in leds.iter_mut().zip(colours.iter().cycle()) {
        *led = *colour;
    }
}
