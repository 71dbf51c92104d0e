use crate::color::Rgb;

/// Linear RGB gradient from `start_color` at `start_pos` to `end_color` at
/// `end_pos`, both ends inclusive
///
/// Every channel moves monotonically between the two end colors and both
/// end colors are hit exactly.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn fill_gradient_rgb(
    leds: &mut [Rgb],
    start_pos: usize,
    start_color: Rgb,
    end_pos: usize,
    end_color: Rgb,
) {
    if leds.is_empty() {
        return;
    }

    // Ensure proper ordering
    let (start_pos, end_pos, start_color, end_color) = if end_pos < start_pos {
        (end_pos, start_pos, end_color, start_color)
    } else {
        (start_pos, end_pos, start_color, end_color)
    };

    let span = (end_pos - start_pos) as i32;
    let channel = |from: u8, to: u8, step: i32| -> u8 {
        if span == 0 {
            return to;
        }
        let from = i32::from(from);
        let to = i32::from(to);
        (from + (to - from) * step / span) as u8
    };

    let last = end_pos.min(leds.len() - 1);
    for (pos, led) in leds
        .iter_mut()
        .enumerate()
        .take(last + 1)
        .skip(start_pos)
    {
        let step = (pos - start_pos) as i32;
        *led = Rgb {
            r: channel(start_color.r, end_color.r, step),
            g: channel(start_color.g, end_color.g, step),
            b: channel(start_color.b, end_color.b, step),
        };
    }
}

/// Multi-stop gradient across the whole strip
///
/// Stop `k` of `n` sits at LED `k * (len - 1) / (n - 1)`, so the first stop
/// lands on the first LED and the last stop on the last LED.
pub fn fill_gradient_stops(leds: &mut [Rgb], stops: &[Rgb]) {
    match stops {
        [] => {}
        [only] => {
            for led in leds.iter_mut() {
                *led = *only;
            }
        }
        _ => {
            let last = leds.len().saturating_sub(1);
            let segments = stops.len() - 1;
            for (k, pair) in stops.windows(2).enumerate() {
                let start = k * last / segments;
                let end = (k + 1) * last / segments;
                fill_gradient_rgb(leds, start, pair[0], end, pair[1]);
            }
        }
    }
}
