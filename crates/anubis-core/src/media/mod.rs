pub mod audio;
pub mod codec_options;
pub mod image;

use std::io::Write;

pub use codec_options::{
    JectorOptions, RasterOptions, WaveOptions, DEFAULT_EOF_MARKER, DEFAULT_LSB_DEPTH,
};

use crate::result::Result;

/// Tells a carrier whether to keep handing out slots during a rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotFlow {
    Continue,
    Stop,
}

/// A decoded media file seen as an ordered sequence of slots.
///
/// A slot is one channel of one sample, a color channel of a pixel or one
/// channel of an audio frame, given as its raw bytes in the carrier's native
/// byte order. Both [`Carrier::rewrite`] and [`Carrier::scan`] visit slots in
/// exactly the same order, that order is the only thing inject and eject agree on.
pub trait Carrier: Sized {
    /// Number of slots a full pass visits
    fn slot_count(&self) -> u64;

    /// Number of message bits the carrier accepts at `lsb_depth` bits per slot
    fn capacity(&self, lsb_depth: u8) -> u64;

    /// Hands every slot mutably to `visit` until it answers [`SlotFlow::Stop`],
    /// then writes the whole carrier to `destination`. Slots never visited are
    /// written unchanged.
    fn rewrite(
        self,
        destination: &mut dyn Write,
        visit: &mut dyn FnMut(&mut [u8]) -> Result<SlotFlow>,
    ) -> Result<()>;

    /// Hands every slot to `visit`, always to the very end.
    fn scan(self, visit: &mut dyn FnMut(&[u8]) -> Result<()>) -> Result<()>;
}
