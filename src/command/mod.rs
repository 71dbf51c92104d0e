//! Single-letter text command protocol
//!
//! The first character selects the command and the rest is its payload.
//! Numbers are parsed leniently, like C `atoi`: leading digits count and
//! anything after them is ignored.

mod execute;

use core::fmt;

pub use execute::CommandContext;
use heapless::String;

/// Longest reply to a command
pub const MAX_REPLY_LEN: usize = 64;

pub type Reply = String<MAX_REPLY_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourChannel {
    Red,
    Green,
    Blue,
}

impl ColourChannel {
    /// Command letter selecting the channel
    pub const fn key(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `0`
    LedsOff,
    /// `1`
    LedsOn,
    /// `A<ssid>:<password>`
    AccessPoint { ssid: &'a str, password: &'a str },
    /// `R`, `G` or `B` followed by `<slot digit><value>`
    Colour {
        channel: ColourChannel,
        slot: u8,
        value: i32,
    },
    /// `C<ssid>:<password>`
    SaveCredentials(&'a str),
    /// `D<0|1>`, draw the bitmap with the looping flag
    Draw { looping: bool },
    /// `E<0|1>`
    Repeat(bool),
    /// `F<path>`
    SelectFile(&'a str),
    /// `H<slot>`
    ApplyFixedPreset(u8),
    /// `I<value>`
    Brightness(i32),
    /// `J<digit>`
    ColoursUsed(u8),
    /// `K<0|1>`
    Gradient(bool),
    /// `L<seconds>`
    SwitchDelay(i32),
    /// `M<digit>`
    Mode(u8),
    /// `N<0|1>`
    Interleave(bool),
    /// `O<slot><name>`
    SaveFixedPreset { slot: u8, name: &'a str },
    /// `P<index>`
    Preset(i32),
    /// `Q<index>`, palette of the active preset
    Palette(i32),
    /// `S`
    Save,
    /// `T<ms>`
    RowInterval(i32),
    /// `U<param digit><value>`
    Param { index: u8, value: i32 },
    /// `X<path>`
    Delete(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    Unknown,
    /// Payload is missing or does not name an existing item
    Invalid(&'static str),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("?Unknown command"),
            Self::Invalid(field) => write!(f, "?Invalid {}", field),
        }
    }
}

/// Leading decimal integer of `text`, 0 when there is none
///
/// Accepts leading whitespace and a sign; saturates instead of overflowing.
pub fn parse_int(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i32 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i32::from(byte - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }
    if negative { -value } else { value }
}

/// Value of the first character when it is a decimal digit
fn digit(text: &str, field: &'static str) -> Result<u8, CommandError> {
    match text.as_bytes().first() {
        Some(byte) if byte.is_ascii_digit() => Ok(byte - b'0'),
        _ => Err(CommandError::Invalid(field)),
    }
}

fn flag(text: &str, field: &'static str) -> Result<bool, CommandError> {
    digit(text, field).map(|value| value != 0)
}

fn pair<'a>(text: &'a str, field: &'static str) -> Result<(&'a str, &'a str), CommandError> {
    text.split_once(':').ok_or(CommandError::Invalid(field))
}

impl<'a> Command<'a> {
    pub fn parse(text: &'a str) -> Result<Self, CommandError> {
        let mut chars = text.chars();
        let Some(key) = chars.next() else {
            return Err(CommandError::Unknown);
        };
        let payload = chars.as_str();
        // Payload after a leading digit; the digit itself is ASCII
        let tail = payload.get(1..).unwrap_or("");

        Ok(match key {
            '0' => Self::LedsOff,
            '1' => Self::LedsOn,
            'A' => {
                let (ssid, password) = pair(payload, "access point")?;
                Self::AccessPoint { ssid, password }
            }
            'R' | 'G' | 'B' => Self::Colour {
                channel: match key {
                    'R' => ColourChannel::Red,
                    'G' => ColourChannel::Green,
                    _ => ColourChannel::Blue,
                },
                slot: digit(payload, "colour slot")?,
                value: parse_int(tail),
            },
            'C' => Self::SaveCredentials(payload),
            'D' => Self::Draw {
                looping: flag(payload, "looping flag")?,
            },
            'E' => Self::Repeat(flag(payload, "repeat flag")?),
            'F' => Self::SelectFile(payload),
            'H' => Self::ApplyFixedPreset(digit(payload, "fixed preset")?),
            'I' => Self::Brightness(parse_int(payload)),
            'J' => Self::ColoursUsed(digit(payload, "colour count")?),
            'K' => Self::Gradient(flag(payload, "gradient flag")?),
            'L' => Self::SwitchDelay(parse_int(payload)),
            'M' => Self::Mode(digit(payload, "mode")?),
            'N' => Self::Interleave(flag(payload, "interleave flag")?),
            'O' => Self::SaveFixedPreset {
                slot: digit(payload, "fixed preset")?,
                name: tail,
            },
            'P' => Self::Preset(parse_int(payload)),
            'Q' => Self::Palette(parse_int(payload)),
            'S' => Self::Save,
            'T' => Self::RowInterval(parse_int(payload)),
            'U' => Self::Param {
                index: digit(payload, "parameter")?,
                value: parse_int(tail),
            },
            'X' => Self::Delete(payload),
            _ => return Err(CommandError::Unknown),
        })
    }

    /// Whether the command changes settings that `S` would persist
    pub const fn changes_settings(&self) -> bool {
        !matches!(
            self,
            Self::LedsOff
                | Self::LedsOn
                | Self::SaveCredentials(_)
                | Self::Draw { .. }
                | Self::Repeat(_)
                | Self::SaveFixedPreset { .. }
                | Self::Save
                | Self::Delete(_)
        )
    }
}
