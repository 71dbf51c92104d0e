use super::{BitmapInfo, BitmapStream, RowStatus};
use crate::{LedSink, color::Rgb, logging::log, storage::FileSystem};

/// What a bitmap frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// No draw requested
    Idle,
    /// A row was shown
    Row,
    /// The last row was shown and playback starts over
    Looped,
    /// Playback ended and the stream was released
    Finished,
    /// The bitmap could not be opened or read
    Failed,
}

/// Plays a bitmap one row per frame
pub struct BitmapPlayer<FS: FileSystem> {
    stream: Option<BitmapStream<FS::File>>,
    draw_requested: bool,
}

impl<FS: FileSystem> Default for BitmapPlayer<FS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<FS: FileSystem> BitmapPlayer<FS> {
    pub const fn new() -> Self {
        Self {
            stream: None,
            draw_requested: false,
        }
    }

    pub const fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    pub const fn draw_requested(&self) -> bool {
        self.draw_requested
    }

    /// Start (or keep) drawing on the next bitmap frame
    pub const fn request_draw(&mut self) {
        self.draw_requested = true;
    }

    /// Release the file; the strip is cleared if a bitmap was showing
    pub fn close<S: LedSink>(&mut self, sink: &mut S) {
        if self.stream.take().is_some() {
            sink.clear();
        }
    }

    /// Drop the draw request and release the file
    pub fn stop<S: LedSink>(&mut self, sink: &mut S) {
        self.draw_requested = false;
        self.close(sink);
    }

    /// Show the next row when a draw is requested
    ///
    /// `frame` is the whole strip; rows are written into its start and the
    /// rest stays dark.
    pub fn play_frame<S: LedSink>(
        &mut self,
        fs: &mut FS,
        info: &BitmapInfo,
        looping: bool,
        brightness: u8,
        frame: &mut [Rgb],
        sink: &mut S,
    ) -> PlayerEvent {
        if !self.draw_requested {
            return PlayerEvent::Idle;
        }

        if self.stream.is_none() {
            match BitmapStream::open(fs, info) {
                Ok(stream) => {
                    frame.fill(Rgb::default());
                    sink.clear();
                    self.stream = Some(stream);
                }
                Err(err) => {
                    log!("Bitmap: cannot play {}: {}", info.path, err);
                    return PlayerEvent::Failed;
                }
            }
        }
        let Some(stream) = self.stream.as_mut() else {
            return PlayerEvent::Idle;
        };

        match stream.next_row(frame) {
            Ok(RowStatus::Row) => {
                sink.set_brightness(brightness);
                sink.show(frame);
                PlayerEvent::Row
            }
            Ok(status) => {
                if status == RowStatus::LastRow {
                    sink.set_brightness(brightness);
                    sink.show(frame);
                }
                if looping {
                    stream.rewind();
                    PlayerEvent::Looped
                } else {
                    self.stop(sink);
                    PlayerEvent::Finished
                }
            }
            Err(err) => {
                log!("Bitmap: {} stopped: {}", info.path, err);
                self.stop(sink);
                PlayerEvent::Failed
            }
        }
    }
}
