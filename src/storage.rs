//! File system and configuration store seams
//!
//! The engine never touches a storage medium directly. Bitmaps are read
//! through [`FileSystem`] and settings go through [`ConfigStore`]; the
//! [`PostcardStore`] adapter turns any raw key/blob backend into a config
//! store.

use core::fmt;

use embedded_io::{Read, Seek};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    logging::log,
    state::{Credentials, DisplayState, FixedPresetBank},
};

/// Largest serialized record the postcard store handles
pub const MAX_RECORD_SIZE: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    NotFound,
    Io,
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("file not found"),
            Self::Io => f.write_str("file system error"),
        }
    }
}

/// Minimal file system used for bitmap playback
pub trait FileSystem {
    type File: Read + Seek;

    /// Open an existing file for reading
    fn open(&mut self, path: &str) -> Result<Self::File, FsError>;

    fn remove(&mut self, path: &str) -> Result<(), FsError>;

    /// Call `visit` with the name of every entry directly inside `dir`
    fn list<F: FnMut(&str)>(&mut self, dir: &str, visit: F) -> Result<(), FsError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The backend failed to read or write
    Backend,
    /// A value did not fit the record buffer
    TooLarge,
    /// Stored bytes could not be decoded
    Corrupted,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend => f.write_str("storage backend error"),
            Self::TooLarge => f.write_str("record too large"),
            Self::Corrupted => f.write_str("stored record corrupted"),
        }
    }
}

/// Persistent settings, fixed presets and client credentials
pub trait ConfigStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load_settings(&mut self) -> Result<Option<DisplayState>, StoreError>;
    fn save_settings(&mut self, state: &DisplayState) -> Result<(), StoreError>;

    fn load_fixed_presets(&mut self) -> Result<Option<FixedPresetBank>, StoreError>;
    fn save_fixed_presets(&mut self, bank: &FixedPresetBank) -> Result<(), StoreError>;

    fn load_credentials(&mut self) -> Result<Option<Credentials>, StoreError>;
    fn save_credentials(&mut self, credentials: &Credentials) -> Result<(), StoreError>;
}

/// Record slots of a [`BlobStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKey {
    Settings,
    FixedPresets,
    Credentials,
}

impl BlobKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::FixedPresets => "fixed_presets",
            Self::Credentials => "credentials",
        }
    }
}

/// Raw byte storage addressed by [`BlobKey`]
pub trait BlobStore {
    /// Copy the record into `buf` and return its length, `None` when absent
    fn read(&mut self, key: BlobKey, buf: &mut [u8]) -> Result<Option<usize>, StoreError>;

    /// Replace the record
    fn write(&mut self, key: BlobKey, data: &[u8]) -> Result<(), StoreError>;
}

/// [`ConfigStore`] that encodes records with `postcard`
pub struct PostcardStore<B: BlobStore> {
    backend: B,
}

impl<B: BlobStore> PostcardStore<B> {
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    fn load<T: DeserializeOwned>(&mut self, key: BlobKey) -> Result<Option<T>, StoreError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let Some(len) = self.backend.read(key, &mut buffer)? else {
            log!("Store: no {} record", key.as_str());
            return Ok(None);
        };
        let payload = buffer.get(..len).ok_or(StoreError::Corrupted)?;
        let value = postcard::from_bytes(payload).map_err(|_| {
            log!("Store: failed to decode {} record", key.as_str());
            StoreError::Corrupted
        })?;
        Ok(Some(value))
    }

    fn save<T: Serialize>(&mut self, key: BlobKey, value: &T) -> Result<(), StoreError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let payload = postcard::to_slice(value, &mut buffer).map_err(|_| {
            log!(
                "Store: {} record exceeds {} bytes",
                key.as_str(),
                MAX_RECORD_SIZE
            );
            StoreError::TooLarge
        })?;
        self.backend.write(key, payload)?;
        log!("Store: saved {} bytes of {}", payload.len(), key.as_str());
        Ok(())
    }
}

impl<B: BlobStore> ConfigStore for PostcardStore<B> {
    fn load_settings(&mut self) -> Result<Option<DisplayState>, StoreError> {
        let state: Option<DisplayState> = self.load(BlobKey::Settings)?;
        Ok(state.map(|mut state| {
            state.sanitize();
            state
        }))
    }

    fn save_settings(&mut self, state: &DisplayState) -> Result<(), StoreError> {
        self.save(BlobKey::Settings, &state.snapshot())
    }

    fn load_fixed_presets(&mut self) -> Result<Option<FixedPresetBank>, StoreError> {
        let bank: Option<FixedPresetBank> = self.load(BlobKey::FixedPresets)?;
        Ok(bank.map(|mut bank| {
            bank.sanitize();
            bank
        }))
    }

    fn save_fixed_presets(&mut self, bank: &FixedPresetBank) -> Result<(), StoreError> {
        self.save(BlobKey::FixedPresets, bank)
    }

    fn load_credentials(&mut self) -> Result<Option<Credentials>, StoreError> {
        self.load(BlobKey::Credentials)
    }

    fn save_credentials(&mut self, credentials: &Credentials) -> Result<(), StoreError> {
        self.save(BlobKey::Credentials, credentials)
    }
}
