#[cfg(test)]
mod tests {
    use myrtio_pixelstick::{
        Rgb,
        color::{
            PALETTE_COUNT, PALETTES, add_colors, blend_colors, color_from_palette,
            color_from_palette_flat, fade_to_black_by, fill_gradient_rgb, fill_gradient_stops,
            fill_solid, palette, palette_from_stops, rgb_from_u32,
        },
        gamma::{GAMMA8, correct, gamma8},
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[test]
    fn test_blend_colors() {
        // Blend 0% (all first color)
        let result = blend_colors(RED, BLUE, 0);
        assert_eq!(result, RED);

        // Blend 100% (all second color)
        let result = blend_colors(RED, BLUE, 255);
        assert_eq!(result, BLUE);

        // Blend 50%
        let result = blend_colors(RED, BLUE, 128);
        assert_eq!(result.r, 127);
        assert_eq!(result.b, 128);

        let result = blend_colors(BLACK, WHITE, 128);
        assert_eq!(result, Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_add_colors_saturates() {
        let sum = add_colors(Rgb::new(200, 10, 0), Rgb::new(100, 20, 0));
        assert_eq!(sum, Rgb::new(255, 30, 0));
    }

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(rgb_from_u32(0x12_34_56), Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(rgb_from_u32(0xFF_FF_FF), WHITE);
    }

    #[test]
    fn test_fade_to_black_by() {
        let mut leds = [WHITE; 4];
        fade_to_black_by(&mut leds, 0);
        assert_eq!(leds, [WHITE; 4]);

        fade_to_black_by(&mut leds, 128);
        assert!(leds.iter().all(|led| led.r < 255 && led.r > 100));

        fade_to_black_by(&mut leds, 255);
        assert_eq!(leds, [BLACK; 4]);
    }

    #[test]
    fn test_gradient_hits_both_ends() {
        let mut leds = [BLACK; 5];
        fill_gradient_rgb(&mut leds, 0, BLACK, 4, Rgb::new(200, 100, 0));

        assert_eq!(leds[0], BLACK);
        assert_eq!(leds[2], Rgb::new(100, 50, 0));
        assert_eq!(leds[4], Rgb::new(200, 100, 0));
        assert!(leds.windows(2).all(|pair| pair[0].r <= pair[1].r));
    }

    #[test]
    fn test_gradient_with_swapped_ends() {
        let mut leds = [BLACK; 5];
        fill_gradient_rgb(&mut leds, 4, RED, 0, BLUE);

        assert_eq!(leds[0], BLUE);
        assert_eq!(leds[4], RED);
        assert!(leds.windows(2).all(|pair| pair[0].b >= pair[1].b));
    }

    #[test]
    fn test_gradient_stops_land_on_positions() {
        let mut leds = [BLACK; 9];
        fill_gradient_stops(&mut leds, &[RED, GREEN, BLUE]);

        assert_eq!(leds[0], RED);
        assert_eq!(leds[4], GREEN);
        assert_eq!(leds[8], BLUE);
        assert!(leds[1..4].iter().all(|led| led.b == 0));
        assert!(leds[5..8].iter().all(|led| led.r == 0));
    }

    #[test]
    fn test_single_stop_fills_solid() {
        let mut leds = [BLACK; 6];
        fill_gradient_stops(&mut leds, &[GREEN]);
        assert_eq!(leds, [GREEN; 6]);

        let mut expected = [BLACK; 6];
        fill_solid(&mut expected, GREEN);
        assert_eq!(leds, expected);
    }

    #[test]
    fn test_palette_lookup() {
        let rainbow = palette(0);

        assert_eq!(color_from_palette(rainbow, 0x00, 255), RED);
        assert_eq!(color_from_palette(rainbow, 0x10, 255), rgb_from_u32(0xD5_2A_00));

        // Halfway between the first two entries
        let between = color_from_palette(rainbow, 0x08, 255);
        assert!(between.r < 255 && between.r > 0xD5);
        assert!(between.g > 0 && between.g < 0x2A);

        // Dimmed lookup
        assert_eq!(color_from_palette(rainbow, 0x00, 128).r, 128);
    }

    #[test]
    fn test_palette_lookup_wraps() {
        let rainbow = palette(0);
        let last = rainbow[15];
        let wrapped = color_from_palette(rainbow, 0xF8, 255);

        assert!(wrapped.r > last.r);
        assert!(wrapped.b < last.b);
    }

    #[test]
    fn test_flat_lookup_skips_blending() {
        let rainbow = palette(0);
        assert_eq!(color_from_palette_flat(rainbow, 0x1F, 255), rainbow[1]);
    }

    #[test]
    fn test_palette_registry() {
        assert_eq!(PALETTES.len(), PALETTE_COUNT);
        assert_eq!(PALETTES[0].name, "Rainbow");
        assert_eq!(PALETTES[PALETTE_COUNT - 1].name, "Ice");

        for (i, a) in PALETTES.iter().enumerate() {
            for b in &PALETTES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }

        // Unknown index falls back to the first palette
        assert_eq!(palette(200), palette(0));
    }

    #[test]
    fn test_palette_from_stops() {
        let colors = palette_from_stops(&[BLACK, WHITE]);
        assert_eq!(colors[0], BLACK);
        assert_eq!(colors[15], WHITE);
        assert!(colors.windows(2).all(|pair| pair[0].r <= pair[1].r));
    }

    #[test]
    fn test_gamma_table() {
        assert_eq!(GAMMA8[0], 0);
        assert_eq!(gamma8(27), 0);
        assert_eq!(gamma8(28), 1);
        assert_eq!(gamma8(255), 255);
        assert!(GAMMA8.windows(2).all(|pair| pair[0] <= pair[1]));

        assert_eq!(correct(Rgb::new(255, 28, 0)), Rgb::new(255, 1, 0));
    }
}
