use crate::error::AnubisError;
use crate::result::Result;

/// The marker appended to every payload unless configured otherwise
pub const DEFAULT_EOF_MARKER: &[u8] = b"#$%-";

/// Default number of low order bits used per slot
pub const DEFAULT_LSB_DEPTH: u8 = 2;

/// Options shared by every jector, immutable during one inject or eject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JectorOptions {
    lsb_depth: u8,
    eof_marker: Vec<u8>,
    ensure_success: bool,
}

impl Default for JectorOptions {
    fn default() -> Self {
        Self {
            lsb_depth: DEFAULT_LSB_DEPTH,
            eof_marker: DEFAULT_EOF_MARKER.to_vec(),
            ensure_success: false,
        }
    }
}

impl JectorOptions {
    pub fn new(
        lsb_depth: u8,
        eof_marker: impl Into<Vec<u8>>,
        ensure_success: bool,
    ) -> Result<Self> {
        Ok(Self {
            lsb_depth: validate_lsb_depth(lsb_depth)?,
            eof_marker: eof_marker.into(),
            ensure_success,
        })
    }

    /// Number of low order bits written to, or read from, every slot.
    /// Increasing it raises the capacity but also the noise in the carrier.
    pub fn lsb_depth(&self) -> u8 {
        self.lsb_depth
    }

    /// Empty when the EOF protocol is disabled.
    pub fn eof_marker(&self) -> &[u8] {
        &self.eof_marker
    }

    /// When set, an oversized message fails before anything is written and a
    /// missing EOF marker fails the eject.
    pub fn ensure_success(&self) -> bool {
        self.ensure_success
    }
}

fn validate_lsb_depth(lsb_depth: u8) -> Result<u8> {
    if (1..=8).contains(&lsb_depth) {
        Ok(lsb_depth)
    } else {
        Err(AnubisError::InvalidConfiguration { lsb_depth })
    }
}

/// Options for image carriers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterOptions {
    /// If true the alpha channel carries data as well, which raises the
    /// capacity by a third but can leave visible artifacts in transparent areas.
    pub use_alpha: bool,
}

/// Options for WAV audio carriers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaveOptions {
    /// Rejects headers whose stored byte rate or block align disagree with
    /// the values derived from the format.
    pub strict_validation: bool,
}
