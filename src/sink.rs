//! [`LedSink`] adapter for `smart-leds` drivers

use core::fmt::Debug;

use smart_leds::{SmartLedsWrite, brightness};

use crate::{LedSink, color::Rgb, logging::log};

/// Drives any [`SmartLedsWrite`] strip, applying brightness on the way out
pub struct SmartLedsSink<W> {
    writer: W,
    brightness: u8,
    len: usize,
}

impl<W> SmartLedsSink<W>
where
    W: SmartLedsWrite<Color = Rgb>,
    W::Error: Debug,
{
    /// `len` is the number of LEDs blanked by [`LedSink::clear`]
    pub const fn new(writer: W, len: usize) -> Self {
        Self {
            writer,
            brightness: u8::MAX,
            len,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> LedSink for SmartLedsSink<W>
where
    W: SmartLedsWrite<Color = Rgb>,
    W::Error: Debug,
{
    fn set_brightness(&mut self, value: u8) {
        self.brightness = value;
    }

    fn show(&mut self, frame: &[Rgb]) {
        if let Err(err) = self
            .writer
            .write(brightness(frame.iter().copied(), self.brightness))
        {
            log!("LED write failed: {:?}", err);
        }
    }

    fn clear(&mut self) {
        if let Err(err) = self
            .writer
            .write(core::iter::repeat_n(Rgb::default(), self.len))
        {
            log!("LED clear failed: {:?}", err);
        }
    }
}
