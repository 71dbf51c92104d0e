#[cfg(test)]
mod tests {
    use myrtio_pixelstick::{
        Instant, PresetId, PresetSlot, Rgb,
        color::{PALETTE_COUNT, palette, palette_from_stops},
        preset::{
            HeatDirection, HeatMapPreset, JugglePreset, MAX_PARAMS, PRESET_COUNT, PRESETS,
            Preset, PresetContext, SinelonPreset, TwinkleFoxPreset, TwinklesPreset,
            default_palettes, default_params,
        },
    };

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    fn context<'a>(ms: u64, hue: u8, params: &'a [u8]) -> PresetContext<'a> {
        PresetContext {
            now: Instant::from_millis(ms),
            hue,
            params,
            palette: palette(0),
        }
    }

    fn lit(leds: &[Rgb]) -> usize {
        leds.iter().filter(|led| **led != BLACK).count()
    }

    #[test]
    fn test_registry_order() {
        assert_eq!(PRESETS.len(), PRESET_COUNT);
        for (index, preset) in PRESETS.iter().enumerate() {
            assert_eq!(preset.id.index(), index);
            assert_eq!(PresetId::from_raw(index as u8), Some(preset.id));
            assert!(preset.params.len() <= MAX_PARAMS);
            if let Some(palette) = preset.palette {
                assert!(usize::from(palette) < PALETTE_COUNT);
            }
        }
        assert_eq!(PresetId::from_raw(PRESET_COUNT as u8), None);
        assert_eq!(PresetId::Pride.name(), "Pride");
        assert_eq!(PresetId::TwinkleFox.name(), "TwinkleFox");
    }

    #[test]
    fn test_default_values_within_limits() {
        let params = default_params();
        for preset in &PRESETS {
            for (spec, value) in preset.params.iter().zip(params[preset.id.index()]) {
                assert!(spec.min <= value && value <= spec.max, "{}", spec.name);
                assert_eq!(value, spec.default);
            }
        }
        assert_eq!(default_palettes()[PresetId::Twinkles.index()], Some(8));
        assert_eq!(default_palettes()[PresetId::Fire.index()], None);
    }

    #[test]
    fn test_param_clamp() {
        let speed = PresetId::Sinelon.descriptor().params[0];
        assert_eq!(speed.clamp(-5), 1);
        assert_eq!(speed.clamp(50), 50);
        assert_eq!(speed.clamp(1000), 100);
    }

    #[test]
    fn test_slot_ids() {
        for preset in &PRESETS {
            let slot: PresetSlot<16> = preset.id.to_slot();
            assert_eq!(slot.id(), preset.id);
        }
        assert_eq!(PresetSlot::<16>::default().id(), PresetId::Pride);
    }

    #[test]
    fn test_every_preset_renders() {
        let params = default_params();
        for preset in &PRESETS {
            let mut slot: PresetSlot<30> = preset.id.to_slot();
            let values = &params[preset.id.index()][..preset.params.len()];

            for len in [0, 1, 30, 45] {
                let mut leds = vec![BLACK; len];
                for frame in 0..50u64 {
                    let ctx = context(frame * 20, frame as u8, values);
                    slot.render(&mut leds, &ctx);
                }
                slot.reset();
            }

            // Clock far past any 16-bit wrap
            let mut leds = [BLACK; 30];
            let ctx = context(u64::from(u32::MAX) + 12_345, 200, values);
            slot.render(&mut leds, &ctx);
        }
    }

    #[test]
    fn test_presets_light_the_strip() {
        let params = default_params();
        for preset in &PRESETS {
            let mut slot: PresetSlot<30> = preset.id.to_slot();
            let values = &params[preset.id.index()][..preset.params.len()];
            let mut seen = 0;
            let mut leds = [BLACK; 30];
            for frame in 0..200u64 {
                slot.render(&mut leds, &context(frame * 20, frame as u8, values));
                seen = seen.max(lit(&leds));
            }
            assert!(seen > 0, "{} never lit", preset.name);
        }
    }

    #[test]
    fn test_solid_rainbow_is_uniform() {
        let mut slot: PresetSlot<8> = PresetId::SolidRainbow.to_slot();
        let mut leds = [BLACK; 8];
        slot.render(&mut leds, &context(0, 96, &[]));
        assert!(leds.iter().all(|led| *led == leds[0]));
        assert_ne!(leds[0], BLACK);
    }

    #[test]
    fn test_rainbow_spreads_hues() {
        let mut slot: PresetSlot<8> = PresetId::Rainbow.to_slot();
        let mut leds = [BLACK; 8];
        slot.render(&mut leds, &context(0, 0, &[]));
        assert_ne!(leds[0], leds[4]);
    }

    #[test]
    fn test_sinelon_sweeps_whole_strip() {
        let mut sinelon = SinelonPreset::new();
        let mut leds = [BLACK; 30];
        let mut visited = [false; 30];

        // Full fade leaves only the swept segment lit
        for frame in 0..300u64 {
            sinelon.render(&mut leds, &context(frame * 10, 0, &[36, 255]));
            for (seen, led) in visited.iter_mut().zip(&leds) {
                *seen |= *led != BLACK;
            }
        }
        assert!(visited.iter().all(|seen| *seen));
    }

    #[test]
    fn test_juggle_starts_with_one_dot() {
        let mut juggle = JugglePreset::new();
        let mut leds = [BLACK; 30];
        juggle.render(&mut leds, &context(0, 0, &[]));
        assert_eq!(lit(&leds), 1);
    }

    #[test]
    fn test_heat_direction_mirrors() {
        let heat_palette = palette_from_stops(&[BLACK, WHITE]);
        let mut up = HeatMapPreset::<20>::new(heat_palette, HeatDirection::Up);
        let mut down = HeatMapPreset::<20>::new(heat_palette, HeatDirection::Down);
        let mut up_leds = [BLACK; 20];
        let mut down_leds = [BLACK; 20];

        for frame in 0..40u64 {
            let ctx = context(frame * 20, 0, &[40, 200]);
            up.render(&mut up_leds, &ctx);
            down.render(&mut down_leds, &ctx);
        }

        assert_eq!(up.heat(), down.heat());
        down_leds.reverse();
        assert_eq!(up_leds, down_leds);
        assert!(up.heat().iter().any(|cell| *cell > 0));
    }

    #[test]
    fn test_heat_never_draws_past_capacity() {
        let mut fire = HeatMapPreset::<8>::fire();
        let mut leds = [WHITE; 12];
        for frame in 0..30u64 {
            fire.render(&mut leds, &context(frame * 20, 0, &[20, 200]));
        }
        assert_eq!(leds[8..], [BLACK; 4]);

        fire.reset();
        assert!(fire.heat().iter().all(|cell| *cell == 0));
    }

    #[test]
    fn test_twinkles_start_one_pixel_at_a_time() {
        let mut twinkles = TwinklesPreset::<30>::new();
        let mut leds = [BLACK; 30];
        twinkles.render(&mut leds, &context(0, 0, &[]));
        assert!(lit(&leds) <= 1);

        for frame in 1..100u64 {
            twinkles.render(&mut leds, &context(frame * 20, 0, &[]));
        }
        assert!(lit(&leds) > 1);
    }

    #[test]
    fn test_twinkle_fox_is_stateless() {
        let mut a = TwinkleFoxPreset;
        let mut b = TwinkleFoxPreset;
        let mut leds_a = [BLACK; 30];
        let mut leds_b = [WHITE; 30];

        a.render(&mut leds_a, &context(1_000, 0, &[4, 5]));
        b.render(&mut leds_b, &context(5_000, 0, &[4, 5]));
        b.render(&mut leds_b, &context(1_000, 0, &[4, 5]));
        assert_eq!(leds_a, leds_b);
    }

    #[test]
    fn test_twinkle_fox_density() {
        let mut fox = TwinkleFoxPreset;
        let mut sparse = 0;
        let mut dense = 0;
        let mut leds = [BLACK; 60];
        for frame in 0..50u64 {
            fox.render(&mut leds, &context(frame * 97, 0, &[4, 1]));
            sparse += lit(&leds);
            fox.render(&mut leds, &context(frame * 97, 0, &[4, 8]));
            dense += lit(&leds);
        }
        assert!(dense > sparse);
    }
}
