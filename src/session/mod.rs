//! Client request envelope
//!
//! Network messages carry a one-letter request type in front of the
//! payload. `U` wraps a display command; the others manage the client
//! session.

pub mod snapshot;

use core::fmt::Write;

use heapless::String;
pub use snapshot::{ConfigView, FixedPresetsView};

use crate::{
    LedSink,
    command::CommandContext,
    logging::log,
    storage::{ConfigStore, FileSystem},
};

/// Longest response sent back to a client, sized for the config snapshot
pub const MAX_RESPONSE_LEN: usize = 2048;

/// Directory scanned for bitmaps
pub const BITMAP_DIR: &str = "/bmp";

pub type Response = String<MAX_RESPONSE_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequest<'a> {
    /// `U<command>`
    Update(&'a str),
    /// `B`, list bitmap files
    ListBitmaps,
    /// `C`, a client starts loading its initial view and gets the config
    BeginSync,
    /// `F`, list the fixed-colour slots
    FixedPresets,
    /// `I`, the client finished loading
    EndSync,
    Invalid(&'a str),
}

impl<'a> SessionRequest<'a> {
    pub fn parse(text: &'a str) -> Self {
        let mut chars = text.chars();
        match chars.next() {
            Some('U') => Self::Update(chars.as_str()),
            Some('B') => Self::ListBitmaps,
            Some('C') => Self::BeginSync,
            Some('F') => Self::FixedPresets,
            Some('I') => Self::EndSync,
            _ => Self::Invalid(text),
        }
    }
}

/// Answer one client message
pub fn respond<FS, CS, S>(ctx: &mut CommandContext<'_, FS, CS, S>, text: &str) -> Response
where
    FS: FileSystem,
    CS: ConfigStore,
    S: LedSink,
{
    let mut out = Response::new();
    match SessionRequest::parse(text) {
        SessionRequest::Update(command) => {
            let reply = ctx.apply(command);
            let _ = write!(out, "U{}", reply);
        }
        SessionRequest::ListBitmaps => {
            let _ = out.push('B');
            list_bitmaps(ctx.fs, &mut out);
        }
        SessionRequest::BeginSync => {
            *ctx.syncing = true;
            let _ = out.push('C');
            if !snapshot::write_json(&ConfigView::new(ctx.state), &mut out) {
                return too_large("config");
            }
        }
        SessionRequest::FixedPresets => {
            let _ = out.push('F');
            if !snapshot::write_json(&FixedPresetsView(ctx.fixed_presets), &mut out) {
                return too_large("fixed presets");
            }
        }
        SessionRequest::EndSync => {
            *ctx.syncing = false;
            let pending = if ctx.state.pending_changes { '1' } else { '0' };
            let _ = write!(out, "I{}", pending);
        }
        SessionRequest::Invalid(text) => {
            log!("Invalid request: {}", text);
            let _ = write!(out, "XInvalid request: {}", text);
        }
    }
    out
}

fn too_large(what: &str) -> Response {
    log!("Sync: {} does not fit a response", what);
    let mut out = Response::new();
    let _ = write!(out, "X{} too large", what);
    out
}

/// Append the `.bmp` files of [`BITMAP_DIR`], colon separated
///
/// Names that no longer fit are dropped.
pub fn list_bitmaps<FS: FileSystem>(fs: &mut FS, out: &mut Response) {
    let start = out.len();
    let listed = fs.list(BITMAP_DIR, |name| {
        if !name.ends_with(".bmp") {
            return;
        }
        let needed = name.len() + usize::from(out.len() > start);
        if out.capacity() - out.len() < needed {
            return;
        }
        if out.len() > start {
            let _ = out.push(':');
        }
        let _ = out.push_str(name);
    });
    if let Err(err) = listed {
        log!("Listing {} failed: {}", BITMAP_DIR, err);
    }
}
