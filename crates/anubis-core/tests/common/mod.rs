#![allow(dead_code)]

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};
use image::{DynamicImage, ImageBuffer, ImageFormat, RgbaImage};

/// noisy but deterministic image, every channel value differs from its neighbours
pub fn prepare_carrier_image(width: u32, height: u32) -> RgbaImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        let i = (x * 31 + y * 17) as u8;
        image::Rgba([i, i.wrapping_mul(3), i.wrapping_add(101), 255 - (i >> 2)])
    })
}

pub fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    let encoded = match format {
        // no alpha in JPEG
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .write_to(&mut out, format),
        _ => image.write_to(&mut out, format),
    };
    encoded.expect("Failed to encode carrier image");
    out.into_inner()
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode(&prepare_carrier_image(width, height), ImageFormat::Png)
}

pub fn decode(png: &[u8]) -> RgbaImage {
    image::load_from_memory(png)
        .expect("Output is no image")
        .to_rgba8()
}

pub fn spec(channels: u16, bits_per_sample: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate: 8_000,
        bits_per_sample,
        sample_format: SampleFormat::Int,
    }
}

/// Writes `frames` frames of a saw tooth with `hound`
pub fn wav(spec: WavSpec, frames: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    let amplitude = 1i32 << (spec.bits_per_sample - 2);
    let mut writer = WavWriter::new(&mut out, spec).expect("Failed to start wav");
    for frame in 0..frames {
        for channel in 0..spec.channels {
            let sample = (frame as i32 * 37 + i32::from(channel) * 11) % amplitude - amplitude / 2;
            let written = match spec.bits_per_sample {
                8 => writer.write_sample(sample as i8),
                16 => writer.write_sample(sample as i16),
                _ => writer.write_sample(sample),
            };
            written.expect("Failed to write sample");
        }
    }
    writer.finalize().expect("Failed to finalize wav");
    out.into_inner()
}

/// Offset of the first sample byte of a canonical WAV file
pub const CANONICAL_HEADER_LEN: usize = 44;
