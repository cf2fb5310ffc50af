use std::path::Path;

use crate::error::AnubisError;
use crate::jector::{AnyJector, AudioJector, RasterJector};
use crate::media::{
    JectorOptions, RasterOptions, WaveOptions, DEFAULT_EOF_MARKER, DEFAULT_LSB_DEPTH,
};
use crate::result::Result;

/// The kind of carrier a jector works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JectorType {
    /// PNG or JPEG images, the output is always PNG
    Raster,
    /// PCM WAV audio
    Audio,
}

impl JectorType {
    /// Picks the jector type by file extension, case insensitive
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or(AnubisError::UnsupportedMedia)?;

        match ext.as_str() {
            "png" | "jpg" | "jpeg" => Ok(Self::Raster),
            "wav" | "wave" => Ok(Self::Audio),
            _ => Err(AnubisError::UnsupportedMedia),
        }
    }
}

/// Fluent configuration of a jector.
///
/// The depth is only validated by [`JectorBuilder::build`], the last value set wins.
///
/// ```rust
/// use anubis_core::{Jector, JectorBuilder, JectorType};
///
/// let jector = JectorBuilder::new(JectorType::Audio)
///     .with_lsb_depth(4)
///     .with_eof_marker("--END--")
///     .with_required_success()
///     .build()
///     .expect("depth 4 is valid");
///
/// assert_eq!(jector.options().eof_marker(), b"--END--");
/// assert!(JectorBuilder::default().build().is_err(), "no type, no jector");
/// ```
#[derive(Debug, Clone)]
pub struct JectorBuilder {
    kind: Option<JectorType>,
    lsb_depth: u8,
    eof_marker: Vec<u8>,
    ensure_success: bool,
    raster: RasterOptions,
    wave: WaveOptions,
}

impl Default for JectorBuilder {
    fn default() -> Self {
        Self {
            kind: None,
            lsb_depth: DEFAULT_LSB_DEPTH,
            eof_marker: DEFAULT_EOF_MARKER.to_vec(),
            ensure_success: false,
            raster: RasterOptions::default(),
            wave: WaveOptions::default(),
        }
    }
}

impl JectorBuilder {
    pub fn new(kind: JectorType) -> Self {
        Self::default().with_type(kind)
    }

    pub fn with_type(mut self, kind: JectorType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the type only if none is set yet
    pub fn or_type(mut self, kind: JectorType) -> Self {
        self.kind.get_or_insert(kind);
        self
    }

    pub fn kind(&self) -> Option<JectorType> {
        self.kind
    }

    pub fn with_lsb_depth(mut self, lsb_depth: u8) -> Self {
        self.lsb_depth = lsb_depth;
        self
    }

    /// An empty marker disables the EOF protocol, eject then returns the full capacity
    pub fn with_eof_marker(mut self, eof_marker: impl AsRef<[u8]>) -> Self {
        self.eof_marker = eof_marker.as_ref().to_vec();
        self
    }

    pub fn without_eof_marker(self) -> Self {
        self.with_eof_marker(b"")
    }

    /// Oversized messages and a missing EOF marker become errors
    pub fn with_required_success(mut self) -> Self {
        self.ensure_success = true;
        self
    }

    pub fn with_alpha_channel(mut self) -> Self {
        self.raster.use_alpha = true;
        self
    }

    pub fn with_strict_validation(mut self) -> Self {
        self.wave.strict_validation = true;
        self
    }

    pub fn build(self) -> Result<AnyJector> {
        let kind = self.kind.ok_or(AnubisError::MissingJectorType)?;
        let options = JectorOptions::new(self.lsb_depth, self.eof_marker, self.ensure_success)?;

        Ok(match kind {
            JectorType::Raster => RasterJector::new(options, self.raster).into(),
            JectorType::Audio => AudioJector::new(options, self.wave).into(),
        })
    }
}
