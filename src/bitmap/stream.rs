use core::fmt;

use embedded_io::{Read, Seek, SeekFrom};

use super::{BitmapInfo, BitmapStatus};
use crate::{
    color::Rgb,
    gamma::correct,
    storage::{FileSystem, FsError},
};

/// Pixels decoded per read call
const CHUNK_PIXELS: usize = 16;
const CHUNK_LEN: usize = CHUNK_PIXELS * 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// A row was decoded and more follow
    Row,
    /// The final row was decoded
    LastRow,
    /// Nothing left to decode
    EndOfImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// The header did not pass validation
    Invalid(BitmapStatus),
    Open(FsError),
    Seek,
    Read,
    /// Output row is narrower than the image
    RowTooShort,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(status) => write!(f, "invalid bitmap (status {})", status),
            Self::Open(err) => write!(f, "open failed: {}", err),
            Self::Seek => f.write_str("seek failed"),
            Self::Read => f.write_str("read failed"),
            Self::RowTooShort => f.write_str("row buffer narrower than image"),
        }
    }
}

/// Row-by-row reader over an open bitmap file
///
/// Rows come out in file order (bottom row first for ordinary BMPs).
pub struct BitmapStream<F> {
    file: F,
    width: u16,
    row_stride: u32,
    image_start: u64,
    image_end: u64,
    /// Offset of the next row to decode
    offset: u64,
    /// Where the file cursor is known to be, `None` after an error
    position: Option<u64>,
}

impl<F: Read + Seek> BitmapStream<F> {
    /// Open the file described by a valid `info`
    pub fn open<FS>(fs: &mut FS, info: &BitmapInfo) -> Result<Self, StreamError>
    where
        FS: FileSystem<File = F>,
    {
        if !info.status.is_valid() {
            return Err(StreamError::Invalid(info.status));
        }
        let file = fs.open(&info.path).map_err(StreamError::Open)?;
        Ok(Self::new(file, info))
    }

    /// Wrap an already open file
    pub fn new(file: F, info: &BitmapInfo) -> Self {
        let image_start = u64::from(info.image_offset);
        Self {
            file,
            width: info.width,
            row_stride: info.row_stride(),
            image_start,
            image_end: info.image_end(),
            offset: image_start,
            position: None,
        }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Decode the next row into `row[..width]`, gamma corrected
    pub fn next_row(&mut self, row: &mut [Rgb]) -> Result<RowStatus, StreamError> {
        if self.offset >= self.image_end {
            return Ok(RowStatus::EndOfImage);
        }
        let width = usize::from(self.width);
        let Some(row) = row.get_mut(..width) else {
            return Err(StreamError::RowTooShort);
        };

        // Skip the seek when the previous row ended exactly here
        if self.position != Some(self.offset) {
            if self.file.seek(SeekFrom::Start(self.offset)).is_err() {
                self.position = None;
                return Err(StreamError::Seek);
            }
            self.position = Some(self.offset);
        }

        let mut chunk = [0u8; CHUNK_LEN];
        for pixels in row.chunks_mut(CHUNK_PIXELS) {
            let bytes = &mut chunk[..pixels.len() * 3];
            if self.file.read_exact(bytes).is_err() {
                self.position = None;
                return Err(StreamError::Read);
            }
            for (pixel, bgr) in pixels.iter_mut().zip(bytes.chunks_exact(3)) {
                *pixel = correct(Rgb {
                    r: bgr[2],
                    g: bgr[1],
                    b: bgr[0],
                });
            }
        }

        self.position = Some(self.offset + width as u64 * 3);
        self.offset += u64::from(self.row_stride);
        if self.offset >= self.image_end {
            Ok(RowStatus::LastRow)
        } else {
            Ok(RowStatus::Row)
        }
    }

    /// Start again from the first row
    pub const fn rewind(&mut self) {
        self.offset = self.image_start;
    }
}
