//! Startup status sweep
//!
//! Before normal rendering starts, a single dot runs up the strip in a
//! colour that shows how the network came up, then back down in black.

use embassy_time::{Duration, Instant};

use crate::{LedSink, color::Rgb, timer::IntervalTimer};

/// Time between sweep steps
pub const SWEEP_STEP: Duration = Duration::from_millis(8);

/// Network state after boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    /// No network came up
    Failed,
    /// Joined an existing network
    Client,
    /// Serving our own access point
    #[default]
    AccessPoint,
}

impl LinkStatus {
    pub const fn colour(self) -> Rgb {
        match self {
            Self::Failed => Rgb { r: 255, g: 0, b: 0 },
            Self::Client => Rgb { r: 0, g: 0, b: 255 },
            Self::AccessPoint => Rgb { r: 0, g: 255, b: 0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStep {
    /// Not time for the next step yet
    Idle,
    Drawn,
    /// The dot is back at the start; the sweep is over
    Finished,
}

#[derive(Debug, Clone)]
pub struct StatusSweep {
    colour: Rgb,
    position: usize,
    rising: bool,
    timer: IntervalTimer,
}

impl StatusSweep {
    pub const fn new(link: LinkStatus, step: Duration) -> Self {
        Self {
            colour: link.colour(),
            position: 0,
            rising: true,
            timer: IntervalTimer::new(step),
        }
    }

    pub fn step<S: LedSink>(&mut self, frame: &mut [Rgb], sink: &mut S, now: Instant) -> SweepStep {
        if !self.timer.poll(now) {
            return SweepStep::Idle;
        }
        let Some(last) = frame.len().checked_sub(1) else {
            return SweepStep::Finished;
        };

        let position = self.position.min(last);
        frame[position] = if self.rising {
            self.colour
        } else {
            Rgb::default()
        };
        sink.show(frame);

        if self.rising {
            if position == last {
                self.rising = false;
            } else {
                self.position = position + 1;
            }
        } else if position == 0 {
            return SweepStep::Finished;
        } else {
            self.position = position - 1;
        }
        SweepStep::Drawn
    }
}
