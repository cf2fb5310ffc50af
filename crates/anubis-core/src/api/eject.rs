use std::fs;
use std::path::{Path, PathBuf};

use super::{build_for, open};
use crate::builder::JectorBuilder;
use crate::error::AnubisError;
use crate::jector::Jector;
use crate::progress::TransferObserver;
use crate::result::Result;

pub fn prepare<'o>() -> EjectApi<'o> {
    EjectApi::default()
}

#[derive(Default)]
pub struct EjectApi<'o> {
    secret_media: Option<PathBuf>,
    destination_file: Option<PathBuf>,
    options: JectorBuilder,
    observer: Option<&'o mut dyn TransferObserver>,
}

impl<'o> EjectApi<'o> {
    /// Must match the options used for injecting, a type is optional
    pub fn with_options(mut self, options: JectorBuilder) -> Self {
        self.options = options;
        self
    }

    /// This is the media file that contains the data to be ejected
    pub fn from_secret_file(mut self, secret_media: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_media.as_ref().to_path_buf());
        self
    }

    /// The recovered payload replaces any content of this file
    pub fn into_file(mut self, destination_file: impl AsRef<Path>) -> Self {
        self.destination_file = Some(destination_file.as_ref().to_path_buf());
        self
    }

    pub fn with_observer(mut self, observer: &'o mut dyn TransferObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Execute the eject process and blocks until it is finished
    pub fn execute(self) -> Result<()> {
        let Some(secret_media) = self.secret_media else {
            return Err(AnubisError::CarrierNotSet);
        };
        let Some(destination_file) = self.destination_file else {
            return Err(AnubisError::TargetNotSet);
        };

        let jector = build_for(&secret_media, self.options)?;
        let mut payload = Vec::new();
        let mut ignore = ();
        let observer: &mut dyn TransferObserver = match self.observer {
            Some(observer) => observer,
            None => &mut ignore,
        };
        jector.eject(&mut open(&secret_media)?, &mut payload, observer)?;

        fs::write(destination_file, payload).map_err(|source| AnubisError::WriteError { source })
    }
}
