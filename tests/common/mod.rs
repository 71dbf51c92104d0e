//! In-memory collaborators shared by the integration tests
#![allow(dead_code)]

use std::{cell::Cell, collections::BTreeMap, rc::Rc, string::String, vec::Vec};

use embedded_io::{ErrorKind, ErrorType, Read, Seek, SeekFrom};
use myrtio_pixelstick::{
    BlobKey, BlobStore, FileSystem, FsError, LedSink, Rgb, StoreError, gamma::correct,
};

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

/// File system kept in a map from path to contents
#[derive(Default)]
pub struct MemFs {
    pub files: BTreeMap<String, Vec<u8>>,
    pub opens: Rc<Cell<usize>>,
    pub seeks: Rc<Cell<usize>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, data: Vec<u8>) -> Self {
        self.files.insert(path.into(), data);
        self
    }
}

pub struct MemFile {
    data: Vec<u8>,
    pos: usize,
    seeks: Rc<Cell<usize>>,
}

impl ErrorType for MemFile {
    type Error = ErrorKind;
}

impl Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let rest = self.data.get(self.pos..).unwrap_or(&[]);
        let len = rest.len().min(buf.len());
        buf[..len].copy_from_slice(&rest[..len]);
        self.pos += len;
        Ok(len)
    }
}

impl Seek for MemFile {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
        self.seeks.set(self.seeks.get() + 1);
        let target = match pos {
            SeekFrom::Start(offset) => offset as i64,
            SeekFrom::Current(delta) => self.pos as i64 + delta,
            SeekFrom::End(delta) => self.data.len() as i64 + delta,
        };
        if target < 0 {
            return Err(ErrorKind::InvalidInput);
        }
        self.pos = target as usize;
        Ok(target as u64)
    }
}

impl FileSystem for MemFs {
    type File = MemFile;

    fn open(&mut self, path: &str) -> Result<MemFile, FsError> {
        let data = self.files.get(path).ok_or(FsError::NotFound)?.clone();
        self.opens.set(self.opens.get() + 1);
        Ok(MemFile {
            data,
            pos: 0,
            seeks: self.seeks.clone(),
        })
    }

    fn remove(&mut self, path: &str) -> Result<(), FsError> {
        self.files.remove(path).map(|_| ()).ok_or(FsError::NotFound)
    }

    fn list<F: FnMut(&str)>(&mut self, dir: &str, mut visit: F) -> Result<(), FsError> {
        let prefix = format!("{dir}/");
        for path in self.files.keys() {
            if let Some(name) = path.strip_prefix(&prefix)
                && !name.contains('/')
            {
                visit(name);
            }
        }
        Ok(())
    }
}

/// LED sink that remembers everything written to it
#[derive(Default)]
pub struct RecordingSink {
    pub brightness: u8,
    pub frames: Vec<Vec<Rgb>>,
    pub clears: usize,
}

impl RecordingSink {
    pub fn last_frame(&self) -> Option<&[Rgb]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl LedSink for RecordingSink {
    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn show(&mut self, frame: &[Rgb]) {
        self.frames.push(frame.to_vec());
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

/// Blob store backed by a vector of records
#[derive(Debug, Clone, Default)]
pub struct MemBlobStore {
    pub records: Vec<(BlobKey, Vec<u8>)>,
    pub fail_writes: bool,
    pub writes: usize,
}

impl BlobStore for MemBlobStore {
    fn read(&mut self, key: BlobKey, buf: &mut [u8]) -> Result<Option<usize>, StoreError> {
        let Some((_, data)) = self.records.iter().find(|(k, _)| *k == key) else {
            return Ok(None);
        };
        let target = buf.get_mut(..data.len()).ok_or(StoreError::TooLarge)?;
        target.copy_from_slice(data);
        Ok(Some(data.len()))
    }

    fn write(&mut self, key: BlobKey, data: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Backend);
        }
        self.writes += 1;
        self.records.retain(|(k, _)| *k != key);
        self.records.push((key, data.to_vec()));
        Ok(())
    }
}

/// Encode a 24-bit uncompressed BMP; `pixel(row, col)` with row 0 stored first
pub fn encode_bmp(width: u16, height: u16, pixel: impl Fn(usize, usize) -> Rgb) -> Vec<u8> {
    let width_px = usize::from(width);
    let stride = (width_px * 3 + 3) & !3;
    let image_size = stride * usize::from(height);
    let offset: u32 = 54;

    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + image_size as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&i32::from(width).to_le_bytes());
    out.extend_from_slice(&i32::from(height).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&[0; 16]);

    for row in 0..usize::from(height) {
        for col in 0..width_px {
            let color = pixel(row, col);
            out.extend_from_slice(&[color.b, color.g, color.r]);
        }
        out.resize(out.len() + stride - width_px * 3, 0);
    }
    out
}

/// Overwrite a little-endian `u16` header field
pub fn patch_u16(bytes: &mut [u8], at: usize, value: u16) {
    bytes[at..at + 2].copy_from_slice(&value.to_le_bytes());
}

/// Overwrite a little-endian `u32` header field
pub fn patch_u32(bytes: &mut [u8], at: usize, value: u32) {
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// Deterministic test colour for a pixel
pub fn test_pixel(row: usize, col: usize) -> Rgb {
    Rgb {
        r: (row * 40 + col * 7) as u8,
        g: (200 - row * 10) as u8,
        b: (col * 50 + 3) as u8,
    }
}

/// What the strip should show for `color` after gamma correction
pub fn gamma(color: Rgb) -> Rgb {
    correct(color)
}
