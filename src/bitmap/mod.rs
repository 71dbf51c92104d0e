//! Streaming 24-bit BMP playback
//!
//! A bitmap is shown one row per frame, so only the header and a single row
//! are ever held in memory. [`BitmapInfo`] parses the header once,
//! [`BitmapStream`] walks the rows and [`BitmapPlayer`] ties the stream to
//! the LED strip.

mod player;
mod stream;

use core::{
    fmt,
    ops::{BitOr, BitOrAssign},
};

use embedded_io::Read;
pub use player::{BitmapPlayer, PlayerEvent};
pub use stream::{BitmapStream, RowStatus, StreamError};

use crate::{
    logging::log,
    state::{FilePath, MAX_PATH_LEN, truncated},
    storage::FileSystem,
};

/// `"BM"` read as a little-endian `u16`
pub const BMP_SIGNATURE: u16 = 0x4D42;

/// Size of the only DIB header variant supported
pub const DIB_HEADER_SIZE: u32 = 40;

/// Header bytes following the signature that are needed for playback
const HEADER_REST_LEN: usize = 32;

/// Combinable validity flags of a bitmap file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitmapStatus(u8);

impl BitmapStatus {
    pub const VALID: Self = Self(0x00);
    pub const BAD_PLANES: Self = Self(0x01);
    pub const BAD_BIT_DEPTH: Self = Self(0x02);
    pub const BAD_COMPRESSION: Self = Self(0x04);
    pub const BAD_SIGNATURE: Self = Self(0x08);
    pub const OPEN_ERROR: Self = Self(0x10);
    /// Wider than the LED strip
    pub const TOO_WIDE: Self = Self(0x20);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl BitOr for BitmapStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for BitmapStatus {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Prints the raw flag value, as sent to clients
impl fmt::Display for BitmapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Header fields of a bitmap file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitmapInfo {
    pub path: FilePath,
    pub file_size: u32,
    /// Byte offset of the first (bottom) pixel row
    pub image_offset: u32,
    pub width: u16,
    pub height: u16,
    pub planes: u16,
    pub bit_depth: u16,
    pub compression: u32,
    pub status: BitmapStatus,
}

fn le_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

impl BitmapInfo {
    /// Info for a file that could not be read
    pub fn unreadable(path: &str) -> Self {
        Self {
            path: truncated(path),
            status: BitmapStatus::OPEN_ERROR,
            ..Self::default()
        }
    }

    /// Parse the header of `path`
    ///
    /// Never fails: problems are reported through [`BitmapInfo::status`].
    /// Paths longer than [`MAX_PATH_LEN`] count as unreadable.
    /// The file is closed again before returning.
    pub fn read<FS: FileSystem>(fs: &mut FS, path: &str, max_width: usize) -> Self {
        let mut info = Self {
            path: truncated(path),
            ..Self::default()
        };
        if path.len() > MAX_PATH_LEN {
            log!("Bitmap: path too long: {}", path);
            info.status = BitmapStatus::OPEN_ERROR;
            return info;
        }

        let mut file = match fs.open(path) {
            Ok(file) => file,
            Err(err) => {
                log!("Bitmap: error opening {}: {}", path, err);
                info.status = BitmapStatus::OPEN_ERROR;
                return info;
            }
        };

        let mut signature = [0u8; 2];
        if file.read_exact(&mut signature).is_err() {
            log!("Bitmap: short read in {}", path);
            info.status = BitmapStatus::OPEN_ERROR;
            return info;
        }
        if u16::from_le_bytes(signature) != BMP_SIGNATURE {
            log!("Bitmap: invalid signature in {}", path);
            info.status = BitmapStatus::BAD_SIGNATURE;
            return info;
        }

        // File offsets 2..34: size, reserved, data offset, DIB size,
        // width, height, planes, bit depth, compression
        let mut header = [0u8; HEADER_REST_LEN];
        if file.read_exact(&mut header).is_err() {
            log!("Bitmap: truncated header in {}", path);
            info.status = BitmapStatus::OPEN_ERROR;
            return info;
        }
        drop(file);

        info.file_size = le_u32(&header, 0);
        info.image_offset = le_u32(&header, 8);
        let dib_size = le_u32(&header, 12);
        if dib_size != DIB_HEADER_SIZE {
            log!("Bitmap: unexpected DIB header size {}", dib_size);
        }
        // Negative height marks a top-down image; rows are played in file order either way
        info.width = magnitude(le_u32(&header, 16));
        info.height = magnitude(le_u32(&header, 20));
        info.planes = le_u16(&header, 24);
        info.bit_depth = le_u16(&header, 26);
        info.compression = le_u32(&header, 28);

        if info.planes != 1 {
            info.status |= BitmapStatus::BAD_PLANES;
        }
        if info.bit_depth != 24 {
            info.status |= BitmapStatus::BAD_BIT_DEPTH;
        }
        if info.compression != 0 {
            info.status |= BitmapStatus::BAD_COMPRESSION;
        }
        if usize::from(info.width) > max_width {
            info.status |= BitmapStatus::TOO_WIDE;
        }
        info
    }

    /// Bytes per stored row, padded to a multiple of four
    pub const fn row_stride(&self) -> u32 {
        (self.width as u32 * 3 + 3) & !3
    }

    /// Offset just past the last row
    pub const fn image_end(&self) -> u64 {
        self.image_offset as u64 + self.height as u64 * self.row_stride() as u64
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn magnitude(raw: u32) -> u16 {
    (raw as i32).unsigned_abs() as u16
}
