use anubis_core::media::DEFAULT_LSB_DEPTH;
use anubis_core::JectorBuilder;
use clap::{Parser, Subcommand};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Number of low order bits used in every color channel or audio sample
    #[arg(
        long,
        global = true,
        value_name = "bits",
        default_value_t = DEFAULT_LSB_DEPTH,
        value_parser = clap::value_parser!(u8).range(1..=8)
    )]
    pub lsb_depth: u8,

    /// End of file marker appended to the hidden data
    #[arg(long = "eof", global = true, value_name = "marker", conflicts_with = "no_eof")]
    pub eof: Option<String>,

    /// Inject and eject without end of file marker, eject returns the whole capacity
    #[arg(long, global = true)]
    pub no_eof: bool,

    /// Fail if the data does not fit, or if no end of file marker is found
    #[arg(long, global = true)]
    pub ensure_success: bool,

    /// Images only: use the alpha channel as well
    #[arg(long, global = true)]
    pub use_alpha: bool,

    /// Audio only: reject WAV headers with an inconsistent byte rate or block align
    #[arg(long, global = true)]
    pub strict: bool,

    /// Do not show a progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    /// The jector type is left to the carrier's file extension
    pub fn jector_options(&self) -> JectorBuilder {
        let mut options = JectorBuilder::default().with_lsb_depth(self.lsb_depth);
        if let Some(eof) = &self.eof {
            options = options.with_eof_marker(eof);
        }
        if self.no_eof {
            options = options.without_eof_marker();
        }
        if self.ensure_success {
            options = options.with_required_success();
        }
        if self.use_alpha {
            options = options.with_alpha_channel();
        }
        if self.strict {
            options = options.with_strict_validation();
        }
        options
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inject(inject::InjectArgs),
    Eject(eject::EjectArgs),
    Capacity(capacity::CapacityArgs),
}
