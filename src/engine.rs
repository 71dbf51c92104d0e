//! Cooperative scheduler tying the switch, the command channel and the
//! renderer together
//!
//! The engine owns all mutable state. Call [`Engine::tick`] as often as
//! possible with the current switch level and time; it never blocks.

use embassy_time::{Duration, Instant};

use crate::{
    LedSink,
    bitmap::BitmapInfo,
    channel::{Outgoing, Recipient, ReplySender, RequestReceiver},
    command::{CommandContext, Reply},
    logging::log,
    renderer::{HUE_INTERVAL, ModeRenderer, Rendered},
    session::{self, Response},
    startup::{LinkStatus, SWEEP_STEP, StatusSweep, SweepStep},
    state::{DEFAULT_BRIGHTNESS, DisplayMode, DisplayState, FixedPresetBank, truncated},
    storage::{ConfigStore, FileSystem},
    switch::{DEBOUNCE_WINDOW, Debouncer, SwitchState},
    timer::IntervalTimer,
};

/// Runtime tunables of the engine
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub debounce: Duration,
    pub hue_interval: Duration,
    /// Run the status sweep before normal rendering
    pub startup_sweep: bool,
    pub sweep_step: Duration,
    pub link: LinkStatus,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_WINDOW,
            hue_interval: HUE_INTERVAL,
            startup_sweep: true,
            sweep_step: SWEEP_STEP,
            link: LinkStatus::default(),
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub switch: SwitchState,
    /// Set when a frame was rendered
    pub rendered: Option<Rendered>,
}

pub struct Engine<'a, FS: FileSystem, CS: ConfigStore, S: LedSink, const N: usize> {
    state: DisplayState,
    fixed_presets: FixedPresetBank,
    bitmap: BitmapInfo,
    renderer: ModeRenderer<FS, N>,
    switch: Debouncer,
    sweep: Option<StatusSweep>,
    /// Set while rendering waits out the switch delay
    delay_started: Option<Instant>,
    frame_timer: IntervalTimer,
    syncing: bool,
    fs: FS,
    store: CS,
    sink: S,
    requests: Option<RequestReceiver<'a>>,
    replies: Option<ReplySender<'a>>,
}

impl<'a, FS: FileSystem, CS: ConfigStore, S: LedSink, const N: usize> Engine<'a, FS, CS, S, N> {
    /// Load settings from `store` and blank the strip
    ///
    /// Defaults are written back when the store holds no settings yet.
    pub fn new(fs: FS, mut store: CS, mut sink: S, config: EngineConfig) -> Self {
        let state = match store.load_settings() {
            Ok(Some(state)) => state,
            Ok(None) => {
                let state = DisplayState::default();
                if let Err(err) = store.save_settings(&state) {
                    log!("Saving default settings failed: {}", err);
                }
                state
            }
            Err(err) => {
                log!("Loading settings failed: {}", err);
                DisplayState::default()
            }
        };
        let fixed_presets = match store.load_fixed_presets() {
            Ok(Some(bank)) => bank,
            Ok(None) => {
                let bank = FixedPresetBank::default();
                if let Err(err) = store.save_fixed_presets(&bank) {
                    log!("Saving default fixed presets failed: {}", err);
                }
                bank
            }
            Err(err) => {
                log!("Loading fixed presets failed: {}", err);
                FixedPresetBank::default()
            }
        };

        sink.set_brightness(DEFAULT_BRIGHTNESS);
        sink.clear();

        let bitmap = BitmapInfo::unreadable(&state.bitmap_path);
        let mut engine = Self {
            state,
            fixed_presets,
            bitmap,
            renderer: ModeRenderer::new(config.hue_interval),
            switch: Debouncer::new(config.debounce),
            sweep: config
                .startup_sweep
                .then(|| StatusSweep::new(config.link, config.sweep_step)),
            delay_started: None,
            frame_timer: IntervalTimer::new(Duration::from_millis(0)),
            syncing: false,
            fs,
            store,
            sink,
            requests: None,
            replies: None,
        };
        if engine.sweep.is_none() {
            engine.load_bitmap_info();
        }
        engine
    }

    /// Attach the queues used by network tasks
    #[must_use]
    pub fn with_channels(mut self, requests: RequestReceiver<'a>, replies: ReplySender<'a>) -> Self {
        self.requests = Some(requests);
        self.replies = Some(replies);
        self
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn fixed_presets(&self) -> &FixedPresetBank {
        &self.fixed_presets
    }

    pub fn bitmap(&self) -> &BitmapInfo {
        &self.bitmap
    }

    pub fn renderer(&self) -> &ModeRenderer<FS, N> {
        &self.renderer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn fs_mut(&mut self) -> &mut FS {
        &mut self.fs
    }

    pub fn store(&self) -> &CS {
        &self.store
    }

    pub const fn is_syncing(&self) -> bool {
        self.syncing
    }

    pub const fn is_starting_up(&self) -> bool {
        self.sweep.is_some()
    }

    /// Rendering is held back by the switch delay
    pub const fn is_delayed(&self) -> bool {
        self.delay_started.is_some()
    }

    fn context(&mut self) -> CommandContext<'_, FS, CS, S> {
        CommandContext {
            state: &mut self.state,
            fixed_presets: &mut self.fixed_presets,
            bitmap: &mut self.bitmap,
            player: self.renderer.player_mut(),
            fs: &mut self.fs,
            store: &mut self.store,
            sink: &mut self.sink,
            syncing: &mut self.syncing,
            strip_len: N,
        }
    }

    /// Run one display command
    pub fn apply(&mut self, command: &str) -> Reply {
        self.context().apply(command)
    }

    /// Answer one client message
    pub fn handle_request(&mut self, text: &str) -> Response {
        session::respond(&mut self.context(), text)
    }

    /// One pass of the scheduler
    pub fn tick(&mut self, pressed: bool, now: Instant) -> TickReport {
        let switch = self.switch.poll(pressed, now);
        if switch == SwitchState::ChangedToOn {
            self.on_switch_pressed(now);
        }
        self.drain_requests();

        let rendered = self.render_if_due(now);
        TickReport { switch, rendered }
    }

    fn render_if_due(&mut self, now: Instant) -> Option<Rendered> {
        if let Some(sweep) = &mut self.sweep {
            let step = sweep.step(self.renderer.frame_mut(), &mut self.sink, now);
            if step == SweepStep::Finished {
                self.sweep = None;
                // Lets the switch draw the saved bitmap before any client connects
                self.load_bitmap_info();
            }
            return None;
        }

        if !self.state.leds_on {
            return None;
        }

        if let Some(started) = self.delay_started {
            let delay = Duration::from_secs(u64::from(self.state.switch_delay_secs));
            if now.saturating_duration_since(started) > delay {
                self.delay_started = None;
            } else {
                return None;
            }
        }

        self.frame_timer
            .set_interval(Duration::from_millis(u64::from(self.state.row_interval_ms)));
        if !self.frame_timer.poll(now) {
            return None;
        }

        Some(self.renderer.render(
            &self.state,
            &self.bitmap,
            &mut self.fs,
            &mut self.sink,
            now,
        ))
    }

    fn on_switch_pressed(&mut self, now: Instant) {
        let bitmap_mode = self.state.mode == DisplayMode::Bitmap;
        let turning_off = self.state.leds_on && !bitmap_mode;
        if turning_off {
            // A quick second press gets the full delay again
            self.delay_started = None;
        }

        let (command, notice) = if turning_off { ("0", "U0") } else { ("1", "U1") };
        self.apply(command);
        self.broadcast(notice);

        if bitmap_mode {
            self.renderer.player_mut().request_draw();
            if self.state.repeat_bitmap {
                self.state.looping_bitmap = !self.state.looping_bitmap;
            }
        }

        let stopping_loop =
            bitmap_mode && self.state.repeat_bitmap && !self.state.looping_bitmap;
        if self.delay_started.is_none() && !turning_off && !stopping_loop {
            self.delay_started = Some(now);
        }
    }

    fn drain_requests(&mut self) {
        let Some(requests) = self.requests else {
            return;
        };
        while let Ok(request) = requests.try_receive() {
            let text = self.handle_request(&request.text);
            self.send(Outgoing {
                to: Recipient::Client(request.client),
                text,
            });
        }
    }

    fn broadcast(&mut self, text: &str) {
        self.send(Outgoing {
            to: Recipient::All,
            text: truncated(text),
        });
    }

    fn send(&mut self, message: Outgoing) {
        if let Some(replies) = self.replies
            && replies.try_send(message).is_err()
        {
            log!("Reply queue full, message dropped");
        }
    }

    /// Read the header of the configured bitmap without touching settings
    fn load_bitmap_info(&mut self) {
        let path = self.state.bitmap_path.clone();
        self.bitmap = BitmapInfo::read(&mut self.fs, &path, N);
    }
}
