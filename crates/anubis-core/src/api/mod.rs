//! File based entry points, `prepare()` a call, configure it, `execute()` it.

pub mod eject;
pub mod inject;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::builder::{JectorBuilder, JectorType};
use crate::error::AnubisError;
use crate::jector::{AnyJector, Jector};
use crate::result::Result;

/// Number of message bits the carrier file can take, EOF marker included.
///
/// Without a type in `options` the type follows the file extension.
pub fn capacity(carrier: impl AsRef<Path>, options: JectorBuilder) -> Result<u64> {
    let carrier = carrier.as_ref();
    let jector = build_for(carrier, options)?;

    jector.capacity(&mut open(carrier)?)
}

fn build_for(carrier: &Path, options: JectorBuilder) -> Result<AnyJector> {
    let options = match options.kind() {
        Some(_) => options,
        None => options.with_type(JectorType::from_path(carrier)?),
    };
    options.build()
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| AnubisError::ReadError { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{prepare_png, RawWav};
    use image::RgbaImage;
    use tempfile::tempdir;

    #[test]
    fn should_report_the_capacity_by_extension() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let png = temp_dir.path().join("carrier.png");
        let wav = temp_dir.path().join("carrier.wav");
        std::fs::write(&png, prepare_png(&RgbaImage::new(10, 10))).unwrap();
        std::fs::write(&wav, RawWav::pcm16_stereo(10).to_bytes()).unwrap();

        assert_eq!(capacity(&png, JectorBuilder::default()).unwrap(), 100 * 3 * 2);
        assert_eq!(
            capacity(&wav, JectorBuilder::default().with_lsb_depth(1)).unwrap(),
            40 * 2
        );
    }

    #[test]
    fn should_prefer_an_explicit_type_over_the_extension() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("carrier.bin");
        std::fs::write(&carrier, prepare_png(&RgbaImage::new(2, 2))).unwrap();

        assert!(matches!(
            capacity(&carrier, JectorBuilder::default()),
            Err(AnubisError::UnsupportedMedia)
        ));
        assert_eq!(
            capacity(&carrier, JectorBuilder::new(JectorType::Raster)).unwrap(),
            2 * 2 * 3 * 2
        );
    }
}
