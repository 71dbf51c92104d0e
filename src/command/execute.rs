use core::fmt::{self, Write};

use super::{ColourChannel, Command, CommandError, Reply};
use crate::{
    LedSink,
    bitmap::{BitmapInfo, BitmapPlayer, BitmapStatus},
    color::PALETTE_COUNT,
    logging::log,
    preset::PresetId,
    state::{
        Credentials, DisplayMode, DisplayState, FixedPresetBank, MAX_COLOURS, MAX_PATH_LEN,
        truncated,
    },
    storage::{ConfigStore, FileSystem},
};

/// Everything a command may touch
///
/// Built by the engine for the duration of one command; commands are the
/// only writers of the display state.
pub struct CommandContext<'a, FS: FileSystem, CS: ConfigStore, S: LedSink> {
    pub state: &'a mut DisplayState,
    pub fixed_presets: &'a mut FixedPresetBank,
    pub bitmap: &'a mut BitmapInfo,
    pub player: &'a mut BitmapPlayer<FS>,
    pub fs: &'a mut FS,
    pub store: &'a mut CS,
    pub sink: &'a mut S,
    /// A client is loading its initial view
    pub syncing: &'a mut bool,
    /// Number of LEDs, the widest bitmap that can be shown
    pub strip_len: usize,
}

fn reply(text: &str) -> Reply {
    truncated(text)
}

/// Reply carrying the value actually stored
fn reply_with(args: fmt::Arguments<'_>) -> Reply {
    let mut out = Reply::new();
    let _ = out.write_fmt(args);
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_u8(value: i32) -> u8 {
    value.clamp(0, i32::from(u8::MAX)) as u8
}

impl<FS: FileSystem, CS: ConfigStore, S: LedSink> CommandContext<'_, FS, CS, S> {
    /// Parse and run a command, returning the reply for the client
    pub fn apply(&mut self, text: &str) -> Reply {
        match Command::parse(text) {
            Ok(command) => match self.execute(command, text) {
                Ok(reply) => reply,
                Err(err) => self.error_reply(text, err),
            },
            Err(err) => self.error_reply(text, err),
        }
    }

    fn error_reply(&self, text: &str, err: CommandError) -> Reply {
        log!("Command {:?} rejected: {}", text, err);
        let mut out = Reply::new();
        let _ = write!(out, "{}", err);
        out
    }

    /// Run a parsed command; `text` is the original command for echoing
    pub fn execute(&mut self, command: Command<'_>, text: &str) -> Result<Reply, CommandError> {
        let echo = reply(text);
        let out = match command {
            Command::LedsOff => {
                self.state.leds_on = false;
                self.player.stop(self.sink);
                self.sink.clear();
                reply("0")
            }
            Command::LedsOn => {
                self.state.leds_on = true;
                reply("1")
            }
            Command::AccessPoint { ssid, password } => {
                self.state.access_point.ssid = truncated(ssid);
                self.state.access_point.password = truncated(password);
                echo
            }
            Command::Colour {
                channel,
                slot,
                value,
            } => {
                let colour = self
                    .state
                    .layout
                    .colours
                    .get_mut(usize::from(slot))
                    .ok_or(CommandError::Invalid("colour slot"))?;
                let value = clamp_u8(value);
                match channel {
                    ColourChannel::Red => colour.r = value,
                    ColourChannel::Green => colour.g = value,
                    ColourChannel::Blue => colour.b = value,
                }
                reply_with(format_args!("{}{}{}", channel.key(), slot, value))
            }
            Command::SaveCredentials(text) => {
                match self.store.save_credentials(&Credentials::parse(text)) {
                    Ok(()) => reply("C"),
                    Err(err) => {
                        log!("Saving credentials failed: {}", err);
                        reply("?Error saving credentials")
                    }
                }
            }
            Command::Draw { looping } => {
                self.state.leds_on = true;
                self.state.looping_bitmap = looping;
                self.player.request_draw();
                reply("D")
            }
            Command::Repeat(repeat) => {
                self.state.repeat_bitmap = repeat;
                echo
            }
            Command::SelectFile(path) => {
                if path.len() > MAX_PATH_LEN {
                    return Err(CommandError::Invalid("file path"));
                }
                return Ok(self.select_file(path));
            }
            Command::ApplyFixedPreset(slot) => {
                let preset = self
                    .fixed_presets
                    .get(usize::from(slot))
                    .ok_or(CommandError::Invalid("fixed preset"))?;
                self.state.layout = preset.layout;
                echo
            }
            Command::Brightness(value) => {
                self.state.brightness = clamp_u8(value);
                reply_with(format_args!("I{}", self.state.brightness))
            }
            Command::ColoursUsed(count) => {
                if !(1..=MAX_COLOURS).contains(&usize::from(count)) {
                    return Err(CommandError::Invalid("colour count"));
                }
                self.state.layout.colours_used = count;
                echo
            }
            Command::Gradient(gradient) => {
                self.state.layout.gradient = gradient;
                echo
            }
            Command::SwitchDelay(value) => {
                self.state.switch_delay_secs = clamp_u8(value);
                reply_with(format_args!("L{}", self.state.switch_delay_secs))
            }
            Command::Mode(raw) => {
                let mode = DisplayMode::from_raw(raw).ok_or(CommandError::Invalid("mode"))?;
                self.player.close(self.sink);
                self.state.mode = mode;
                echo
            }
            Command::Interleave(interleave) => {
                self.state.layout.interleave = interleave;
                echo
            }
            Command::SaveFixedPreset { slot, name } => {
                if !self
                    .fixed_presets
                    .save(usize::from(slot), name, &self.state.layout)
                {
                    return Err(CommandError::Invalid("fixed preset"));
                }
                if let Err(err) = self.store.save_fixed_presets(self.fixed_presets) {
                    log!("Saving fixed presets failed: {}", err);
                }
                echo
            }
            Command::Preset(index) => {
                let preset = u8::try_from(index)
                    .ok()
                    .and_then(PresetId::from_raw)
                    .ok_or(CommandError::Invalid("preset"))?;
                self.state.preset = preset;
                reply_with(format_args!("P{}", preset.as_raw()))
            }
            Command::Palette(index) => {
                let palette = u8::try_from(index)
                    .ok()
                    .filter(|index| usize::from(*index) < PALETTE_COUNT)
                    .ok_or(CommandError::Invalid("palette"))?;
                let active = self.state.preset.index();
                if self.state.palettes[active].is_none() {
                    return Err(CommandError::Invalid("palette"));
                }
                self.state.palettes[active] = Some(palette);
                reply_with(format_args!("Q{}", palette))
            }
            Command::Save => {
                match self.store.save_settings(self.state) {
                    Ok(()) => self.state.pending_changes = false,
                    Err(err) => log!("Saving settings failed: {}", err),
                }
                reply("S")
            }
            Command::RowInterval(value) => {
                self.state.row_interval_ms = value.max(0).unsigned_abs();
                reply_with(format_args!("T{}", self.state.row_interval_ms))
            }
            Command::Param { index, value } => {
                let preset = self.state.preset;
                let spec = preset
                    .descriptor()
                    .params
                    .get(usize::from(index))
                    .ok_or(CommandError::Invalid("parameter"))?;
                let value = spec.clamp(value);
                self.state.params[preset.index()][usize::from(index)] = value;
                reply_with(format_args!("U{}{}", index, value))
            }
            Command::Delete(path) => self.delete_file(path),
        };

        if command.changes_settings() {
            self.state.pending_changes = true;
        }
        Ok(out)
    }

    fn select_file(&mut self, path: &str) -> Reply {
        self.player.close(self.sink);
        let info = BitmapInfo::read(self.fs, path, self.strip_len);
        let mut out = Reply::new();
        if info.status.is_valid() {
            let _ = write!(out, "F{}:{}", info.width, info.height);
            if !*self.syncing {
                self.state.pending_changes = true;
            }
        } else {
            let _ = write!(out, "?Bitmap file error: {}", info.status);
        }
        if !info.status.contains(BitmapStatus::OPEN_ERROR) {
            self.state.bitmap_path = info.path.clone();
        }
        *self.bitmap = info;
        out
    }

    fn delete_file(&mut self, path: &str) -> Reply {
        self.player.close(self.sink);
        match self.fs.remove(path) {
            Ok(()) => {
                if self.bitmap.path.as_str() == path {
                    self.bitmap.status = BitmapStatus::OPEN_ERROR;
                }
                reply("X")
            }
            Err(err) => {
                log!("Deleting {} failed: {}", path, err);
                reply("?Error deleting file")
            }
        }
    }
}
