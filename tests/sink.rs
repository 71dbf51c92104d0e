#[cfg(test)]
mod tests {
    use myrtio_pixelstick::{LedSink, Rgb, SmartLedsSink};
    use smart_leds::SmartLedsWrite;

    /// Strip driver that keeps the last written colours
    #[derive(Default)]
    struct FakeStrip {
        written: Vec<Rgb>,
        fail: bool,
    }

    impl SmartLedsWrite for FakeStrip {
        type Error = &'static str;
        type Color = Rgb;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            if self.fail {
                return Err("bus error");
            }
            self.written = iterator.into_iter().map(Into::into).collect();
            Ok(())
        }
    }

    #[test]
    fn test_show_applies_brightness() {
        let mut sink = SmartLedsSink::new(FakeStrip::default(), 3);
        let frame = [Rgb::new(255, 128, 0); 3];

        sink.show(&frame);
        assert_eq!(sink.into_inner().written, frame);

        let mut sink = SmartLedsSink::new(FakeStrip::default(), 3);
        sink.set_brightness(0);
        sink.show(&frame);
        assert_eq!(sink.into_inner().written, [Rgb::default(); 3]);
    }

    #[test]
    fn test_dimmed_frame() {
        let mut sink = SmartLedsSink::new(FakeStrip::default(), 2);
        sink.set_brightness(128);
        sink.show(&[Rgb::new(255, 255, 255), Rgb::new(100, 0, 0)]);

        let written = sink.into_inner().written;
        assert!(written[0].r < 255 && written[0].r > 100);
        assert!(written[1].r < 100);
    }

    #[test]
    fn test_clear_blanks_whole_strip() {
        let mut sink = SmartLedsSink::new(FakeStrip::default(), 5);
        sink.clear();
        assert_eq!(sink.into_inner().written, [Rgb::default(); 5]);
    }

    #[test]
    fn test_write_errors_are_swallowed() {
        let strip = FakeStrip {
            fail: true,
            ..FakeStrip::default()
        };
        let mut sink = SmartLedsSink::new(strip, 2);
        sink.show(&[Rgb::new(1, 2, 3); 2]);
        sink.clear();
        assert!(sink.into_inner().written.is_empty());
    }
}
