use std::io::{Cursor, Read, Write};

use image::{ImageFormat, RgbaImage};
use log::error;

use super::channels::ChannelOrder;
use crate::error::AnubisError;
use crate::media::{Carrier, RasterOptions, SlotFlow};
use crate::result::Result;

/// Image carrier, based on `RgbaImage` by `image` crate
///
/// Every pixel offers 3 slots (red, green, blue) or 4 slots (alpha, red, green,
/// blue) when the alpha channel is used. The mutated image is always written
/// as PNG, a lossy format would destroy the hidden bits.
///
/// ## Example of usage
/// ```rust
/// use anubis_core::media::{Carrier, RasterOptions};
/// use anubis_core::media::image::RasterCarrier;
///
/// let image = image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
/// let carrier = RasterCarrier::from_image(image, &RasterOptions { use_alpha: true });
///
/// assert_eq!(carrier.slot_count(), 64);
/// assert_eq!(carrier.capacity(2), 128);
/// ```
#[derive(Debug)]
pub struct RasterCarrier {
    image: RgbaImage,
    order: ChannelOrder,
}

impl RasterCarrier {
    /// Decodes any image format known to the `image` crate
    pub fn decode(source: &mut dyn Read, options: &RasterOptions) -> Result<Self> {
        let mut bytes = Vec::new();
        source
            .read_to_end(&mut bytes)
            .map_err(|source| AnubisError::ReadError { source })?;
        let image = image::load_from_memory(&bytes)
            .map_err(|e| {
                error!("Error decoding image: {e}");
                AnubisError::InvalidImageMedia
            })?
            .to_rgba8();

        Ok(Self::from_image(image, options))
    }

    pub fn from_image(image: RgbaImage, options: &RasterOptions) -> Self {
        Self {
            image,
            order: ChannelOrder::new(options.use_alpha),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn pixel_count(&self) -> usize {
        self.image.width() as usize * self.image.height() as usize
    }

    fn encode(&self, destination: &mut dyn Write) -> Result<()> {
        let mut png = Cursor::new(Vec::new());
        self.image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| {
                error!("Error saving image: {e}");
                AnubisError::ImageEncodingError
            })?;

        destination
            .write_all(png.get_ref())
            .and_then(|_| destination.flush())
            .map_err(|source| AnubisError::WriteError { source })
    }
}

impl Carrier for RasterCarrier {
    fn slot_count(&self) -> u64 {
        (self.order.len() * self.pixel_count()) as u64
    }

    fn capacity(&self, lsb_depth: u8) -> u64 {
        self.slot_count() * u64::from(lsb_depth)
    }

    fn rewrite(
        mut self,
        destination: &mut dyn Write,
        visit: &mut dyn FnMut(&mut [u8]) -> Result<SlotFlow>,
    ) -> Result<()> {
        let offsets = self.order.offsets(self.pixel_count());
        let buf: &mut [u8] = &mut self.image;
        for offset in offsets {
            if visit(std::slice::from_mut(&mut buf[offset]))? == SlotFlow::Stop {
                break;
            }
        }

        self.encode(destination)
    }

    fn scan(self, visit: &mut dyn FnMut(&[u8]) -> Result<()>) -> Result<()> {
        let buf: &[u8] = &self.image;
        for offset in self.order.offsets(self.pixel_count()) {
            visit(std::slice::from_ref(&buf[offset]))?;
        }

        Ok(())
    }
}
