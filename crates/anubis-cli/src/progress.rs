use anubis_core::TransferObserver;
use indicatif::{ProgressBar, ProgressStyle};

/// steps of the bar, matches the reporting resolution of a transfer
const STEPS: u64 = 1000;

/// Drives an `indicatif` progress bar from a running transfer
pub struct TransferProgress {
    bar: ProgressBar,
}

impl TransferProgress {
    pub fn new(message: &'static str, enable: bool) -> Self {
        if !enable {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(STEPS);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")
        {
            bar.set_style(style.progress_chars("█▓▒░ "));
        }
        bar.set_message(message);
        Self { bar }
    }

    pub fn finish(&self, success: bool) {
        if success {
            self.bar.finish_with_message("done");
        } else {
            self.bar.abandon();
        }
    }
}

impl TransferObserver for TransferProgress {
    fn on_progress(&mut self, fraction: f32) {
        self.bar.set_position((fraction * STEPS as f32) as u64);
    }
}
