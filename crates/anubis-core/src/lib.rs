//! # Anubis Core API
//!
//! Hides a payload in the least significant bits of a carrier and recovers it
//! again. Carriers are images (PNG in, PNG out, JPEG in) and PCM WAV audio.
//!
//! A [`JectorBuilder`] produces an [`AnyJector`], that is a [`Jector`] for one
//! carrier type. Both sides of a transfer need the same LSB depth and EOF marker.
//!
//! # Usage Examples
//!
//! ## Hide and recover data in memory
//!
//! ```rust
//! use std::io::Cursor;
//! use anubis_core::{Jector, JectorBuilder, JectorType};
//!
//! let mut carrier = Cursor::new(Vec::new());
//! image::RgbaImage::from_pixel(16, 16, image::Rgba([200, 100, 50, 255]))
//!     .write_to(&mut carrier, image::ImageFormat::Png)
//!     .expect("Failed to encode carrier");
//!
//! let jector = JectorBuilder::new(JectorType::Raster)
//!     .with_lsb_depth(1)
//!     .with_required_success()
//!     .build()?;
//!
//! let secret = jector.inject_to_vec(carrier.get_ref(), b"Hello, World!")?;
//! assert_eq!(jector.eject_to_vec(&secret)?, b"Hello, World!");
//! # Ok::<(), anubis_core::AnubisError>(())
//! ```
//!
//! ## Hide a file inside a WAV file
//!
//! ```rust,no_run
//! anubis_core::api::inject::prepare()
//!     .with_payload_file("Cargo.toml")
//!     .with_carrier("carrier-audio.wav")
//!     .with_output("audio-with-a-file-inside.wav")
//!     .execute()
//!     .expect("Failed to hide file in audio");
//! ```

#![warn(
    // clippy::unwrap_used,
    // clippy::expect_used,
// clippy::cast_lossless,
// clippy::cognitive_complexity,
// clippy::get_unwrap,
// clippy::inefficient_to_string,
// clippy::match_bool,
// clippy::missing_panics_doc,
// clippy::redundant_closure,
    clippy::redundant_else,
// clippy::redundant_pub_crate,
// clippy::use_self,
)]

pub mod api;
pub mod bit_packer;
pub mod builder;
pub mod eof;
pub mod error;
pub mod jector;
pub mod media;
pub mod progress;
pub mod result;

pub use crate::builder::{JectorBuilder, JectorType};
pub use crate::error::AnubisError;
pub use crate::jector::{AnyJector, AudioJector, Jector, RasterJector};
pub use crate::media::{JectorOptions, RasterOptions, WaveOptions};
pub use crate::progress::{CancellationToken, Monitor, TransferObserver};
pub use crate::result::Result;
