mod channels;
pub mod raster;

pub use raster::RasterCarrier;
