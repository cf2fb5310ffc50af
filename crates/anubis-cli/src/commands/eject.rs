use std::path::PathBuf;

use anubis_core::JectorBuilder;
use clap::Args;

use crate::progress::TransferProgress;
use crate::CliResult;

/// Ejects data hidden in PNG images and WAV audio files
#[derive(Args, Debug)]
pub struct EjectArgs {
    /// Source media that contains secret data
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Raw data will be stored as binary file, an existing file is overwritten
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output file",
        required = true
    )]
    pub output_file: PathBuf,
}

impl EjectArgs {
    pub fn run(self, options: JectorBuilder, show_progress: bool) -> CliResult<()> {
        let mut progress = TransferProgress::new("ejecting", show_progress);
        let result = anubis_core::api::eject::prepare()
            .with_options(options)
            .from_secret_file(&self.media)
            .into_file(&self.output_file)
            .with_observer(&mut progress)
            .execute();

        progress.finish(result.is_ok());
        result
    }
}
