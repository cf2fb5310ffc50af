//! Inject and eject over one carrier type.
//!
//! A transfer runs in phases: decoding builds the carrier from the source,
//! transferring walks its slots once, finalizing writes the result. The phases
//! are only visible in the debug log.

use std::io::{Read, Write};

use enum_dispatch::enum_dispatch;
use log::{debug, warn};

use crate::bit_packer::{pack_slot, to_bits, unpack_slot, BitBuffer};
use crate::eof::find_and_truncate;
use crate::error::AnubisError;
use crate::media::audio::AudioCarrier;
use crate::media::image::RasterCarrier;
use crate::media::{Carrier, JectorOptions, RasterOptions, SlotFlow, WaveOptions};
use crate::progress::{ProgressTracker, TransferObserver};
use crate::result::Result;

/// Hides a payload in a carrier, or recovers it.
///
/// A jector holds only its configuration and can be used for any number of
/// sequential calls.
#[enum_dispatch]
pub trait Jector {
    fn options(&self) -> &JectorOptions;

    /// Number of message bits the carrier in `source` can take, EOF marker included
    fn capacity(&self, source: &mut dyn Read) -> Result<u64>;

    /// Writes the carrier from `source` with `payload` hidden in it to `destination`.
    ///
    /// After a failure or a cancellation `destination` may hold partial data and
    /// has to be discarded, with the exception of
    /// [`AnubisError::InsufficientCapacity`] raised before the transfer starts.
    fn inject(
        &self,
        source: &mut dyn Read,
        destination: &mut dyn Write,
        payload: &[u8],
        observer: &mut dyn TransferObserver,
    ) -> Result<()>;

    /// Writes the payload recovered from the carrier in `source` to `destination`.
    fn eject(
        &self,
        source: &mut dyn Read,
        destination: &mut dyn Write,
        observer: &mut dyn TransferObserver,
    ) -> Result<()>;

    /// [`Jector::inject`] from and into memory, without observer
    fn inject_to_vec(&self, carrier: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.inject(&mut &carrier[..], &mut output, payload, &mut ())?;
        Ok(output)
    }

    /// [`Jector::eject`] from and into memory, without observer
    fn eject_to_vec(&self, carrier: &[u8]) -> Result<Vec<u8>> {
        let mut payload = Vec::new();
        self.eject(&mut &carrier[..], &mut payload, &mut ())?;
        Ok(payload)
    }
}

/// Any jector the builder can produce
#[enum_dispatch(Jector)]
#[derive(Debug, Clone)]
pub enum AnyJector {
    RasterJector,
    AudioJector,
}

/// Jector for images, writes PNG
#[derive(Debug, Clone)]
pub struct RasterJector {
    options: JectorOptions,
    raster: RasterOptions,
}

impl RasterJector {
    pub fn new(options: JectorOptions, raster: RasterOptions) -> Self {
        Self { options, raster }
    }

    pub fn raster_options(&self) -> &RasterOptions {
        &self.raster
    }
}

impl Jector for RasterJector {
    fn options(&self) -> &JectorOptions {
        &self.options
    }

    fn capacity(&self, source: &mut dyn Read) -> Result<u64> {
        let carrier = RasterCarrier::decode(source, &self.raster)?;
        Ok(carrier.capacity(self.options.lsb_depth()))
    }

    fn inject(
        &self,
        source: &mut dyn Read,
        destination: &mut dyn Write,
        payload: &[u8],
        observer: &mut dyn TransferObserver,
    ) -> Result<()> {
        debug!("inject: decoding image carrier");
        let carrier = RasterCarrier::decode(source, &self.raster);
        logged("inject", carrier.and_then(|carrier| {
            inject_into(carrier, &self.options, destination, payload, observer)
        }))
    }

    fn eject(
        &self,
        source: &mut dyn Read,
        destination: &mut dyn Write,
        observer: &mut dyn TransferObserver,
    ) -> Result<()> {
        debug!("eject: decoding image carrier");
        let carrier = RasterCarrier::decode(source, &self.raster);
        logged("eject", carrier.and_then(|carrier| {
            eject_from(carrier, &self.options, destination, observer)
        }))
    }
}

/// Jector for PCM WAV audio, writes WAV with the input's sample format
#[derive(Debug, Clone)]
pub struct AudioJector {
    options: JectorOptions,
    wave: WaveOptions,
}

impl AudioJector {
    pub fn new(options: JectorOptions, wave: WaveOptions) -> Self {
        Self { options, wave }
    }

    pub fn wave_options(&self) -> &WaveOptions {
        &self.wave
    }
}

impl Jector for AudioJector {
    fn options(&self) -> &JectorOptions {
        &self.options
    }

    fn capacity(&self, source: &mut dyn Read) -> Result<u64> {
        let carrier = AudioCarrier::decode(source, &self.wave)?;
        Ok(carrier.capacity(self.options.lsb_depth()))
    }

    fn inject(
        &self,
        source: &mut dyn Read,
        destination: &mut dyn Write,
        payload: &[u8],
        observer: &mut dyn TransferObserver,
    ) -> Result<()> {
        debug!("inject: decoding wav carrier");
        let carrier = AudioCarrier::decode(source, &self.wave);
        logged("inject", carrier.and_then(|carrier| {
            inject_into(carrier, &self.options, destination, payload, observer)
        }))
    }

    fn eject(
        &self,
        source: &mut dyn Read,
        destination: &mut dyn Write,
        observer: &mut dyn TransferObserver,
    ) -> Result<()> {
        debug!("eject: decoding wav carrier");
        let carrier = AudioCarrier::decode(source, &self.wave);
        logged("eject", carrier.and_then(|carrier| {
            eject_from(carrier, &self.options, destination, observer)
        }))
    }
}

fn inject_into<C: Carrier>(
    carrier: C,
    options: &JectorOptions,
    destination: &mut dyn Write,
    payload: &[u8],
    observer: &mut dyn TransferObserver,
) -> Result<()> {
    let depth = options.lsb_depth();
    let bits = to_bits(payload, options.eof_marker());
    let required = bits.len() as u64;
    let available = carrier.capacity(depth);

    if required > available {
        if options.ensure_success() {
            return Err(AnubisError::InsufficientCapacity {
                required,
                available,
            });
        }
        warn!("message needs {required} bits, the carrier holds {available}, the rest is dropped");
    }

    debug!("inject: transferring {required} bits at depth {depth}, capacity {available} bits");
    let mut tracker = ProgressTracker::new(observer, required);
    let mut offset = 0;
    carrier.rewrite(destination, &mut |slot| {
        if tracker.is_cancelled() {
            return Err(AnubisError::Cancelled);
        }
        let consumed = pack_slot(slot, &bits, offset, depth);
        if consumed > 0 {
            offset += consumed;
            tracker.advance_to(offset as u64);
        }

        Ok(if offset < bits.len() {
            SlotFlow::Continue
        } else {
            SlotFlow::Stop
        })
    })?;

    debug!("inject: finalized after {offset} bits");
    let written = offset as u64;
    if written < required {
        if options.ensure_success() {
            return Err(AnubisError::InsufficientCapacity {
                required,
                available: written,
            });
        }
        warn!("carrier ran out of slots, only {written} of {required} bits were hidden");
    }
    tracker.finish();

    Ok(())
}

fn eject_from<C: Carrier>(
    carrier: C,
    options: &JectorOptions,
    destination: &mut dyn Write,
    observer: &mut dyn TransferObserver,
) -> Result<()> {
    let depth = options.lsb_depth();
    let slots = carrier.slot_count();
    let mut bits = BitBuffer::with_capacity(slots * u64::from(depth));

    debug!("eject: transferring {slots} slots at depth {depth}");
    let mut tracker = ProgressTracker::new(observer, slots);
    let mut done = 0;
    carrier.scan(&mut |slot| {
        if tracker.is_cancelled() {
            return Err(AnubisError::Cancelled);
        }
        bits.extend(unpack_slot(slot, depth))?;
        done += 1;
        tracker.advance_to(done);
        Ok(())
    })?;

    debug!("eject: finalizing {} recovered bits", bits.len());
    let payload = find_and_truncate(
        bits.into_bytes()?,
        options.eof_marker(),
        options.ensure_success(),
    )?;
    destination
        .write_all(&payload)
        .and_then(|_| destination.flush())
        .map_err(|source| AnubisError::WriteError { source })?;
    tracker.finish();

    Ok(())
}

fn logged(operation: &str, result: Result<()>) -> Result<()> {
    match &result {
        Ok(()) => debug!("{operation}: done"),
        Err(AnubisError::Cancelled) => debug!("{operation}: cancelled"),
        Err(e) => debug!("{operation}: failed, {e}"),
    }
    result
}
