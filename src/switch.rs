//! Debounced user switch
//!
//! The switch is sampled once per tick. A level change only counts after it
//! has been held for longer than the debounce window, and the resulting
//! edge state is reported for exactly one poll.

use embassy_time::{Duration, Instant};

/// Default debounce window
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchState {
    #[default]
    Off,
    On,
    /// Released state was just left; reported once
    ChangedToOn,
    /// Pressed state was just left; reported once
    ChangedToOff,
}

impl SwitchState {
    /// Steady level this state belongs to
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On | Self::ChangedToOn)
    }

    pub const fn is_edge(self) -> bool {
        matches!(self, Self::ChangedToOn | Self::ChangedToOff)
    }
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    state: SwitchState,
    /// Last time the raw level agreed with the steady state
    stable_since: Option<Instant>,
    window: Duration,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}

impl Debouncer {
    pub const fn new(window: Duration) -> Self {
        Self {
            state: SwitchState::Off,
            stable_since: None,
            window,
        }
    }

    pub const fn state(&self) -> SwitchState {
        self.state
    }

    /// Sample the raw level and advance the state machine
    pub fn poll(&mut self, pressed: bool, now: Instant) -> SwitchState {
        self.state = match self.state {
            SwitchState::ChangedToOn => SwitchState::On,
            SwitchState::ChangedToOff => SwitchState::Off,
            steady => {
                let since = *self.stable_since.get_or_insert(now);
                if pressed == steady.is_on() {
                    self.stable_since = Some(now);
                    steady
                } else if now.saturating_duration_since(since) > self.window {
                    if pressed {
                        SwitchState::ChangedToOn
                    } else {
                        SwitchState::ChangedToOff
                    }
                } else {
                    steady
                }
            }
        };
        if self.state.is_edge() {
            self.stable_since = Some(now);
        }
        self.state
    }
}
