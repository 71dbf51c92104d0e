#![no_std]

mod logging;

pub mod bitmap;
pub mod channel;
pub mod color;
pub mod command;
pub mod engine;
pub mod gamma;
pub mod layout;
pub mod math8;
pub mod preset;
pub mod renderer;
pub mod session;
pub mod sink;
pub mod startup;
pub mod state;
pub mod storage;
pub mod switch;
pub mod timer;

pub use bitmap::{BitmapInfo, BitmapPlayer, BitmapStatus, BitmapStream, RowStatus};
pub use channel::{
    Outgoing, Recipient, ReplyChannel, ReplyReceiver, ReplySender, Request, RequestChannel,
    RequestReceiver, RequestSender,
};
pub use color::{Hsv, Rgb};
pub use command::{Command, CommandContext, CommandError, Reply};
pub use embassy_time::{Duration, Instant};
pub use engine::{Engine, EngineConfig, TickReport};
pub use preset::{PresetId, PresetSlot};
pub use renderer::{ModeRenderer, Rendered};
pub use session::Response;
pub use sink::SmartLedsSink;
pub use startup::LinkStatus;
pub use state::{DisplayMode, DisplayState, FixedLayout, FixedPreset, FixedPresetBank};
pub use storage::{BlobKey, BlobStore, ConfigStore, FileSystem, FsError, PostcardStore, StoreError};
pub use switch::{Debouncer, SwitchState};

/// Write-only LED strip
///
/// Implement this trait to support different hardware platforms.
/// [`SmartLedsSink`] covers any `smart-leds` driver.
pub trait LedSink {
    /// Global brightness applied to subsequent frames
    fn set_brightness(&mut self, brightness: u8);

    /// Write colors to the LED strip
    fn show(&mut self, frame: &[Rgb]);

    /// Switch every LED off
    fn clear(&mut self);
}
