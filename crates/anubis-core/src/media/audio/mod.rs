mod carrier;
pub mod wave;

pub use carrier::AudioCarrier;
pub use wave::{Frame, WaveFormat, WaveHeader, WaveReader, WaveWriter};
