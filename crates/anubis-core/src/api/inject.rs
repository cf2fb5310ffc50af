use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use super::{build_for, open};
use crate::builder::{JectorBuilder, JectorType};
use crate::error::AnubisError;
use crate::jector::Jector;
use crate::progress::TransferObserver;
use crate::result::Result;

pub fn prepare<'o>() -> InjectApi<'o> {
    InjectApi::default()
}

#[derive(Debug)]
enum Payload {
    Bytes(Vec<u8>),
    File(PathBuf),
}

#[derive(Default)]
pub struct InjectApi<'o> {
    carrier: Option<PathBuf>,
    output: Option<PathBuf>,
    payload: Option<Payload>,
    options: JectorBuilder,
    observer: Option<&'o mut dyn TransferObserver>,
}

impl<'o> InjectApi<'o> {
    /// Jector configuration, without a type the carrier's extension decides
    pub fn with_options(mut self, options: JectorBuilder) -> Self {
        self.options = options;
        self
    }

    /// This is the media file that will carry the payload
    pub fn with_carrier<A: AsRef<Path>>(mut self, carrier: A) -> Self {
        self.carrier = Some(carrier.as_ref().to_path_buf());
        self
    }

    /// Images are always written as PNG, whatever the extension
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Hides the UTF-8 bytes of `message`, replaces any payload set before
    pub fn with_message(self, message: &str) -> Self {
        self.with_payload(message.as_bytes())
    }

    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(Payload::Bytes(payload.into()));
        self
    }

    /// Hides the content of `data_file`, it is read on execute
    pub fn with_payload_file<A: AsRef<Path>>(mut self, data_file: A) -> Self {
        self.payload = Some(Payload::File(data_file.as_ref().to_path_buf()));
        self
    }

    pub fn with_observer(mut self, observer: &'o mut dyn TransferObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Execute the inject process and blocks until it is finished.
    ///
    /// The output file is only written when the whole transfer succeeded.
    pub fn execute(self) -> Result<()> {
        let Some(carrier) = self.carrier else {
            return Err(AnubisError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(AnubisError::TargetNotSet);
        };
        let payload = match self.payload {
            Some(Payload::Bytes(bytes)) => bytes,
            Some(Payload::File(path)) => {
                fs::read(path).map_err(|source| AnubisError::ReadError { source })?
            }
            None => return Err(AnubisError::MissingPayload),
        };

        let jector = build_for(&carrier, self.options)?;
        if matches!(JectorType::from_path(&output), Ok(JectorType::Raster))
            && !is_png_extension(&output)
        {
            warn!("{} will contain PNG data", output.display());
        }

        let mut secret = Vec::new();
        let mut ignore = ();
        let observer: &mut dyn TransferObserver = match self.observer {
            Some(observer) => observer,
            None => &mut ignore,
        };
        jector.inject(&mut open(&carrier)?, &mut secret, &payload, observer)?;

        fs::write(&output, secret).map_err(|source| AnubisError::WriteError { source })
    }
}

fn is_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::CancellationToken;
    use crate::test_utils::{prepare_4x6_linear_growing_colors, prepare_png};
    use tempfile::tempdir;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("carrier.png");
        let secret = temp_dir.path().join("image-with-secret.png");
        fs::write(&carrier, prepare_png(&prepare_4x6_linear_growing_colors())).unwrap();

        crate::api::inject::prepare()
            .with_message("Hi")
            .with_carrier(&carrier)
            .with_output(&secret)
            .execute()
            .expect("Failed to hide message in image");

        let recovered = crate::JectorBuilder::new(JectorType::Raster)
            .build()
            .unwrap()
            .eject_to_vec(&fs::read(&secret).unwrap())
            .unwrap();
        assert_eq!(recovered, b"Hi");
    }

    #[test]
    fn should_insist_on_carrier_output_and_payload() {
        assert!(matches!(
            prepare().with_output("out.png").with_message("x").execute(),
            Err(AnubisError::CarrierNotSet)
        ));
        assert!(matches!(
            prepare().with_carrier("in.png").with_message("x").execute(),
            Err(AnubisError::TargetNotSet)
        ));
        assert!(matches!(
            prepare().with_carrier("in.png").with_output("out.png").execute(),
            Err(AnubisError::MissingPayload)
        ));
    }

    #[test]
    fn should_leave_no_output_behind_when_cancelled() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("carrier.png");
        let secret = temp_dir.path().join("never-written.png");
        fs::write(&carrier, prepare_png(&prepare_4x6_linear_growing_colors())).unwrap();
        let mut token = CancellationToken::new();
        token.cancel();

        let result = prepare()
            .with_message("Hi")
            .with_carrier(&carrier)
            .with_output(&secret)
            .with_observer(&mut token)
            .execute();

        assert!(matches!(result, Err(AnubisError::Cancelled)));
        assert!(!secret.exists());
    }
}
