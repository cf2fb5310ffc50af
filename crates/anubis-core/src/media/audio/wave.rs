//! RIFF/WAVE container reading and writing.
//!
//! Input headers are parsed strictly and fail fast. Output headers are never
//! built from scratch, they are duplicated from an input header and always
//! written in canonical form: a 16 byte `fmt ` chunk directly followed by the
//! `data` chunk, any `LIST` chunk of the input is dropped. An extensible
//! input format is written with its sub-format as the plain format code.

use std::io::{self, Read, Write};
use std::slice::{ChunksExact, ChunksExactMut};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::trace;

use crate::error::AnubisError;
use crate::media::WaveOptions;
use crate::result::Result;

const RIFF: &[u8; 4] = b"RIFF";
const WAVE: &[u8; 4] = b"WAVE";
const FMT: &[u8; 4] = b"fmt ";
const LIST: &[u8; 4] = b"LIST";
const DATA: &[u8; 4] = b"data";

/// size of the fmt chunk body up to and including `bits_per_sample`
const PCM_FMT_CHUNK_SIZE: u32 = 16;

const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// fmt chunk body of WAVE_FORMAT_EXTENSIBLE: the PCM part, `cbSize`, valid
/// bits, channel mask and the 16 byte sub-format GUID
const EXTENSIBLE_FMT_CHUNK_SIZE: u32 = 40;

/// extension bytes read up to and including the sub-format code, the first
/// two bytes of the GUID
const EXTENSIBLE_PREFIX_SIZE: u32 = 2 + 2 + 4 + 2;

/// RIFF chunk size of a canonical header minus the data: "WAVE", fmt chunk, data chunk header
const CANONICAL_RIFF_OVERHEAD: u32 = 4 + (8 + PCM_FMT_CHUNK_SIZE) + 8;

/// Sample format of a WAV file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveFormat {
    audio_format: u16,
    num_channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
}

impl WaveFormat {
    /// 1 means PCM
    pub fn audio_format(&self) -> u16 {
        self.audio_format
    }

    pub fn num_channels(&self) -> u16 {
        self.num_channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    pub fn byte_rate(&self) -> u32 {
        (u64::from(self.sample_rate) * u64::from(self.num_channels)
            * u64::from(self.bits_per_sample)
            / 8) as u32
    }

    /// bytes of one frame across all channels
    pub fn block_align(&self) -> u16 {
        (u32::from(self.num_channels) * u32::from(self.bits_per_sample) / 8) as u16
    }

    pub fn bytes_per_channel(&self) -> usize {
        usize::from(self.bits_per_sample / 8)
    }
}

/// The header fields of a RIFF/WAVE file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveHeader {
    chunk_size: u32,
    fmt_chunk_size: u32,
    format: WaveFormat,
    sub_format: Option<u16>,
    list_chunk_size: Option<u32>,
    data_chunk_size: u32,
}

impl WaveHeader {
    /// Parses the header up to the first byte of sample data.
    ///
    /// With `strict_validation` the stored byte rate and block align must match
    /// the values derived from the format.
    pub fn read_from<R: Read + ?Sized>(reader: &mut R, strict_validation: bool) -> Result<Self> {
        expect_tag(reader, RIFF)?;
        let chunk_size = read_u32(reader, "missing RIFF chunk size")?;
        expect_tag(reader, WAVE)?;
        expect_tag(reader, FMT)?;

        let fmt_chunk_size = read_u32(reader, "missing fmt chunk size")?;
        if fmt_chunk_size < PCM_FMT_CHUNK_SIZE {
            return Err(AnubisError::CorruptContainer("fmt chunk is too small"));
        }
        let format = WaveFormat {
            audio_format: read_u16(reader, "missing audio format")?,
            num_channels: read_u16(reader, "missing channel count")?,
            sample_rate: read_u32(reader, "missing sample rate")?,
            bits_per_sample: 0,
        };
        let byte_rate = read_u32(reader, "missing byte rate")?;
        let block_align = read_u16(reader, "missing block align")?;
        let format = WaveFormat {
            bits_per_sample: read_u16(reader, "missing bits per sample")?,
            ..format
        };

        if strict_validation
            && (byte_rate != format.byte_rate() || block_align != format.block_align())
        {
            return Err(AnubisError::CorruptContainer(
                "byte rate or block align disagree with the sample format",
            ));
        }
        if format.num_channels == 0 || format.bytes_per_channel() == 0 {
            return Err(AnubisError::CorruptContainer(
                "no channels or less than 8 bits per sample",
            ));
        }

        let mut extension = fmt_chunk_size - PCM_FMT_CHUNK_SIZE;
        let mut sub_format = None;
        if format.audio_format == WAVE_FORMAT_EXTENSIBLE {
            if fmt_chunk_size < EXTENSIBLE_FMT_CHUNK_SIZE {
                return Err(AnubisError::CorruptContainer(
                    "fmt chunk is too small for an extensible format",
                ));
            }
            let _cb_size = read_u16(reader, "missing fmt extension size")?;
            let _valid_bits = read_u16(reader, "missing valid bits per sample")?;
            let _channel_mask = read_u32(reader, "missing channel mask")?;
            sub_format = Some(read_u16(reader, "missing sub-format")?);
            extension -= EXTENSIBLE_PREFIX_SIZE;
        }
        skip(reader, u64::from(extension), "truncated fmt chunk extension")?;

        let mut list_chunk_size = None;
        let mut tag = read_tag(reader)?;
        if &tag == LIST {
            let size = read_u32(reader, "missing LIST chunk size")?;
            skip(reader, u64::from(size), "truncated LIST chunk")?;
            list_chunk_size = Some(size);
            tag = read_tag(reader)?;
        }
        if &tag != DATA {
            return Err(unrecognized(&tag));
        }
        let data_chunk_size = read_u32(reader, "missing data chunk size")?;

        trace!(
            "wav header: {format:?}, sub-format {sub_format:?}, fmt size {fmt_chunk_size}, \
             list size {list_chunk_size:?}, data size {data_chunk_size}"
        );

        Ok(Self {
            chunk_size,
            fmt_chunk_size,
            format,
            sub_format,
            list_chunk_size,
            data_chunk_size,
        })
    }

    /// A header for an output container with the same format, normalized to
    /// the canonical layout.
    ///
    /// The data size is cut to whole channels, which is what a [`WaveReader`]
    /// hands out. A source that ends before its declared data size still
    /// yields a header that declares more data than the frames that follow.
    pub fn duplicate(&self) -> Self {
        let bytes_per_channel = self.format.bytes_per_channel() as u32;
        let data_chunk_size = self.data_chunk_size - self.data_chunk_size % bytes_per_channel;

        Self {
            chunk_size: CANONICAL_RIFF_OVERHEAD.saturating_add(data_chunk_size),
            fmt_chunk_size: PCM_FMT_CHUNK_SIZE,
            format: WaveFormat {
                audio_format: self.sub_format.unwrap_or(self.format.audio_format),
                ..self.format
            },
            sub_format: None,
            list_chunk_size: None,
            data_chunk_size,
        }
    }

    /// Writes the canonical form of this header, see [`WaveHeader::duplicate`].
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        let header = self.duplicate();
        let format = &header.format;

        writer.write_all(RIFF)?;
        writer.write_u32::<LittleEndian>(header.chunk_size)?;
        writer.write_all(WAVE)?;

        writer.write_all(FMT)?;
        writer.write_u32::<LittleEndian>(header.fmt_chunk_size)?;
        writer.write_u16::<LittleEndian>(format.audio_format)?;
        writer.write_u16::<LittleEndian>(format.num_channels)?;
        writer.write_u32::<LittleEndian>(format.sample_rate)?;
        writer.write_u32::<LittleEndian>(format.byte_rate())?;
        writer.write_u16::<LittleEndian>(format.block_align())?;
        writer.write_u16::<LittleEndian>(format.bits_per_sample)?;

        writer.write_all(DATA)?;
        writer.write_u32::<LittleEndian>(header.data_chunk_size)
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    pub fn fmt_chunk_size(&self) -> u32 {
        self.fmt_chunk_size
    }

    pub fn format(&self) -> &WaveFormat {
        &self.format
    }

    /// format code from the GUID of a WAVE_FORMAT_EXTENSIBLE header
    pub fn sub_format(&self) -> Option<u16> {
        self.sub_format
    }

    /// size of the skipped `LIST` chunk, if the input had one
    pub fn list_chunk_size(&self) -> Option<u32> {
        self.list_chunk_size
    }

    pub fn data_chunk_size(&self) -> u32 {
        self.data_chunk_size
    }

    /// Number of per channel sample groups the data chunk declares
    pub fn channel_sample_count(&self) -> u64 {
        u64::from(self.data_chunk_size) / self.format.bytes_per_channel() as u64
    }
}

/// One frame: a raw byte group per channel, in channel order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    bytes_per_channel: usize,
}

impl Frame {
    /// fewer than the format's channels only for a short trailing frame
    pub fn channel_count(&self) -> usize {
        self.data.len() / self.bytes_per_channel
    }

    pub fn channels(&self) -> ChunksExact<'_, u8> {
        self.data.chunks_exact(self.bytes_per_channel)
    }

    pub fn channels_mut(&mut self) -> ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(self.bytes_per_channel)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Forward only frame cursor over a WAV stream, bounded by the data chunk size
pub struct WaveReader<R> {
    header: WaveHeader,
    samples: io::Take<R>,
}

impl<R: Read> WaveReader<R> {
    pub fn new(mut inner: R, options: &WaveOptions) -> Result<Self> {
        let header = WaveHeader::read_from(&mut inner, options.strict_validation)?;
        let samples = inner.take(u64::from(header.data_chunk_size));

        Ok(Self { header, samples })
    }

    pub fn header(&self) -> &WaveHeader {
        &self.header
    }

    /// Reads the next frame.
    ///
    /// A trailing frame that holds at least one full channel is returned short,
    /// an incomplete channel at the very end is dropped.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        let bytes_per_channel = self.header.format.bytes_per_channel();
        let mut data = vec![0; bytes_per_channel * usize::from(self.header.format.num_channels)];
        let read = read_up_to(&mut self.samples, &mut data)?;

        let channels = read / bytes_per_channel;
        if channels == 0 {
            return Ok(None);
        }
        data.truncate(channels * bytes_per_channel);

        Ok(Some(Frame {
            data,
            bytes_per_channel,
        }))
    }
}

impl<R: Read> Iterator for WaveReader<R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

/// Writes frames into a new WAV stream that shares the format of a source header
pub struct WaveWriter<W: Write> {
    header: WaveHeader,
    inner: W,
    header_written: bool,
}

impl<W: Write> WaveWriter<W> {
    pub fn new(inner: W, source: &WaveHeader) -> Self {
        Self {
            header: source.duplicate(),
            inner,
            header_written: false,
        }
    }

    pub fn header(&self) -> &WaveHeader {
        &self.header
    }

    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.ensure_header()?;
        self.inner
            .write_all(frame.as_bytes())
            .map_err(|source| AnubisError::WriteError { source })
    }

    /// Flushes and hands back the inner writer, a header is written even without frames
    pub fn finish(mut self) -> Result<W> {
        self.ensure_header()?;
        self.inner
            .flush()
            .map_err(|source| AnubisError::WriteError { source })?;

        Ok(self.inner)
    }

    fn ensure_header(&mut self) -> Result<()> {
        if !self.header_written {
            self.header
                .write_to(&mut self.inner)
                .map_err(|source| AnubisError::WriteError { source })?;
            self.header_written = true;
        }
        Ok(())
    }
}

fn unrecognized(tag: &[u8; 4]) -> AnubisError {
    AnubisError::UnrecognizedContainer(String::from_utf8_lossy(tag).into_owned())
}

/// maps a short read to a corrupt container, anything else stays a read error
fn short_read(what: &'static str) -> impl FnOnce(io::Error) -> AnubisError {
    move |source| match source.kind() {
        io::ErrorKind::UnexpectedEof => AnubisError::CorruptContainer(what),
        _ => AnubisError::ReadError { source },
    }
}

fn read_tag<R: Read + ?Sized>(reader: &mut R) -> Result<[u8; 4]> {
    let mut tag = [0; 4];
    reader
        .read_exact(&mut tag)
        .map_err(short_read("truncated chunk tag"))?;
    Ok(tag)
}

fn expect_tag<R: Read + ?Sized>(reader: &mut R, expected: &[u8; 4]) -> Result<()> {
    let tag = read_tag(reader)?;
    if &tag == expected {
        Ok(())
    } else {
        Err(unrecognized(&tag))
    }
}

fn read_u16<R: Read + ?Sized>(reader: &mut R, what: &'static str) -> Result<u16> {
    reader.read_u16::<LittleEndian>().map_err(short_read(what))
}

fn read_u32<R: Read + ?Sized>(reader: &mut R, what: &'static str) -> Result<u32> {
    reader.read_u32::<LittleEndian>().map_err(short_read(what))
}

fn skip<R: Read + ?Sized>(reader: &mut R, len: u64, what: &'static str) -> Result<()> {
    let skipped = io::copy(&mut Read::take(&mut *reader, len), &mut io::sink())
        .map_err(|source| AnubisError::ReadError { source })?;
    if skipped < len {
        return Err(AnubisError::CorruptContainer(what));
    }
    Ok(())
}

fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(AnubisError::ReadError { source }),
        }
    }
    Ok(filled)
}
