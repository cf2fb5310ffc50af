use std::path::PathBuf;

use anubis_core::JectorBuilder;
use clap::Args;

use crate::CliResult;

/// Shows how much data fits into a PNG image or WAV audio file
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Media file such as PNG image or WAV audio file
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, options: JectorBuilder) -> CliResult<()> {
        let bits = anubis_core::api::capacity(&self.media, options)?;
        println!(
            "{}: {bits} bits, {} bytes including the end of file marker",
            self.media.display(),
            bits / 8
        );

        Ok(())
    }
}
