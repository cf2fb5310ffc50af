//! Bit level packing shared by every carrier.
//!
//! A message is flattened least significant bit first, byte by byte. Each
//! carrier slot then receives up to `depth` of those bits in its own low order
//! bits, where the slot's raw bytes are treated as one bit sequence that starts
//! at bit 0 of byte 0.

use std::io::Read;

use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, LittleEndian};

use crate::result::Result;

/// Flattens `payload` followed by `marker` into one bit sequence, LSB first.
///
/// An empty `marker` is simply omitted.
pub fn to_bits(payload: &[u8], marker: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity((payload.len() + marker.len()) << 3);
    let mut reader = BitReader::endian(payload.chain(marker), LittleEndian);
    while let Ok(bit) = reader.read_bit() {
        bits.push(bit);
    }

    bits
}

/// Overwrites bit `i` of `value` with `bits[offset + i]` for every `i < depth`
/// that still has a message bit left. Bits without a message bit, and all bits
/// at or above `depth`, keep their original value.
///
/// Returns the number of message bits consumed.
pub fn pack_slot(value: &mut [u8], bits: &[bool], offset: usize, depth: u8) -> usize {
    let mut consumed = 0;
    for i in 0..depth as usize {
        let Some(&bit) = bits.get(offset + i) else {
            break;
        };
        let Some(byte) = value.get_mut(i >> 3) else {
            break;
        };
        let mask = 1 << (i & 7);
        *byte = if bit { *byte | mask } else { *byte & !mask };
        consumed += 1;
    }

    consumed
}

/// Yields bits `[0, depth)` of `value` in the order used by [`pack_slot`].
pub fn unpack_slot(value: &[u8], depth: u8) -> impl Iterator<Item = bool> + '_ {
    (0..depth as usize).map(move |i| {
        value
            .get(i >> 3)
            .map_or(false, |byte| (byte >> (i & 7)) & 1 == 1)
    })
}

/// Regroups bits into bytes, 8 at a time. A trailing partial byte is padded
/// with zero bits.
pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Result<Vec<u8>> {
    let mut buffer = BitBuffer::default();
    buffer.extend(bits)?;
    buffer.into_bytes()
}

/// Growable bit sink used while ejecting, packs bits straight into bytes.
pub struct BitBuffer {
    writer: BitWriter<Vec<u8>, LittleEndian>,
    len: u64,
}

impl Default for BitBuffer {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl BitBuffer {
    pub fn with_capacity(bits: u64) -> Self {
        let bytes = usize::try_from(bits.div_ceil(8)).unwrap_or_default();
        Self {
            writer: BitWriter::endian(Vec::with_capacity(bytes), LittleEndian),
            len: 0,
        }
    }

    pub fn push(&mut self, bit: bool) -> Result<()> {
        self.writer.write_bit(bit)?;
        self.len += 1;
        Ok(())
    }

    pub fn extend<I: IntoIterator<Item = bool>>(&mut self, bits: I) -> Result<()> {
        for bit in bits {
            self.push(bit)?;
        }
        Ok(())
    }

    /// number of bits pushed so far
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        if !self.writer.byte_aligned() {
            self.writer.byte_align()?;
        }
        Ok(self.writer.into_writer())
    }
}
