use embassy_time::{Duration, Instant};

use crate::{
    LedSink,
    bitmap::{BitmapInfo, BitmapPlayer, PlayerEvent},
    color::{Rgb, palette},
    layout::render_fixed,
    preset::{PresetContext, PresetId, PresetSlot},
    state::{DisplayMode, DisplayState},
    storage::FileSystem,
    timer::IntervalTimer,
};

/// How often the shared preset hue advances
pub const HUE_INTERVAL: Duration = Duration::from_millis(40);

/// What a rendered frame showed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendered {
    Fixed,
    Preset(PresetId),
    Bitmap(PlayerEvent),
}

/// Mode renderer - composes one frame for the current display mode
///
/// Owns the frame buffer, the active preset's animation state and the
/// bitmap player.
pub struct ModeRenderer<FS: FileSystem, const N: usize> {
    frame: [Rgb; N],
    slot: PresetSlot<N>,
    /// The previous frame came from a preset
    showing_preset: bool,
    hue: u8,
    hue_timer: IntervalTimer,
    player: BitmapPlayer<FS>,
}

impl<FS: FileSystem, const N: usize> Default for ModeRenderer<FS, N> {
    fn default() -> Self {
        Self::new(HUE_INTERVAL)
    }
}

impl<FS: FileSystem, const N: usize> ModeRenderer<FS, N> {
    pub fn new(hue_interval: Duration) -> Self {
        Self {
            frame: [Rgb::default(); N],
            slot: PresetSlot::default(),
            showing_preset: false,
            hue: 0,
            hue_timer: IntervalTimer::new(hue_interval),
            player: BitmapPlayer::new(),
        }
    }

    pub fn frame(&self) -> &[Rgb] {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut [Rgb] {
        &mut self.frame
    }

    pub fn slot(&self) -> &PresetSlot<N> {
        &self.slot
    }

    pub const fn hue(&self) -> u8 {
        self.hue
    }

    pub fn player(&self) -> &BitmapPlayer<FS> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut BitmapPlayer<FS> {
        &mut self.player
    }

    /// Render and show one frame for `state.mode`
    pub fn render<S: LedSink>(
        &mut self,
        state: &DisplayState,
        bitmap: &BitmapInfo,
        fs: &mut FS,
        sink: &mut S,
        now: Instant,
    ) -> Rendered {
        let resumed = !core::mem::replace(
            &mut self.showing_preset,
            state.mode == DisplayMode::Preset,
        );
        match state.mode {
            DisplayMode::Fixed => {
                render_fixed(&mut self.frame, &state.layout);
                sink.set_brightness(state.brightness);
                sink.show(&self.frame);
                Rendered::Fixed
            }
            DisplayMode::Preset => {
                self.render_preset(state, resumed, now);
                sink.set_brightness(state.brightness);
                sink.show(&self.frame);
                Rendered::Preset(state.preset)
            }
            DisplayMode::Bitmap => Rendered::Bitmap(self.player.play_frame(
                fs,
                bitmap,
                state.looping_bitmap,
                state.brightness,
                &mut self.frame,
                sink,
            )),
        }
    }

    fn render_preset(&mut self, state: &DisplayState, resumed: bool, now: Instant) {
        if self.slot.id() != state.preset {
            self.slot = state.preset.to_slot();
        } else if resumed {
            // Coming back from another mode starts the animation over
            self.slot.reset();
        }
        if self.hue_timer.poll(now) {
            self.hue = self.hue.wrapping_add(1);
        }

        let ctx = PresetContext {
            now,
            hue: self.hue,
            params: state.params_of(state.preset),
            palette: palette(state.palette_of(state.preset).unwrap_or(0)),
        };
        self.slot.render(&mut self.frame, &ctx);
    }
}
