use std::path::PathBuf;

use anubis_core::JectorBuilder;
use clap::Args;

use crate::progress::TransferProgress;
use crate::CliResult;

/// Hides data in PNG images and WAV audio files
#[derive(Args, Debug)]
pub struct InjectArgs {
    /// Media file such as PNG image or WAV audio file, used readonly.
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// Final media will be stored as file, images are always written as PNG
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output media file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// File to hide in the media
    #[arg(
        short = 'd',
        long = "data",
        value_name = "data file",
        required_unless_present = "message",
        conflicts_with = "message"
    )]
    pub data_file: Option<PathBuf>,

    /// A text message that will be hidden
    #[arg(
        short,
        long,
        value_name = "text message",
        required_unless_present = "data_file"
    )]
    pub message: Option<String>,
}

impl InjectArgs {
    pub fn run(self, options: JectorBuilder, show_progress: bool) -> CliResult<()> {
        let mut progress = TransferProgress::new("injecting", show_progress);
        let api = anubis_core::api::inject::prepare()
            .with_options(options)
            .with_carrier(&self.media)
            .with_output(&self.write_to_file);
        let api = match (self.message, self.data_file) {
            (Some(message), _) => api.with_message(&message),
            (None, Some(data_file)) => api.with_payload_file(data_file),
            (None, None) => api,
        };

        let result = api.with_observer(&mut progress).execute();
        progress.finish(result.is_ok());
        result
    }
}
