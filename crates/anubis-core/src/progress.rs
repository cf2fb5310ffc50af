//! Progress reporting and cooperative cancellation for a transfer.
//!
//! A transfer runs as one synchronous pass. Callers that want it in the
//! background wrap the whole call in a thread and keep a [`CancellationToken`]
//! clone to stop it; the token is checked once per carrier slot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Observes a running inject or eject.
pub trait TransferObserver {
    /// `fraction` is in `[0, 1]` and never decreases during one transfer
    fn on_progress(&mut self, _fraction: f32) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Observer that ignores progress and never cancels.
impl TransferObserver for () {}

/// Shared flag to stop a running transfer from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl TransferObserver for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}

/// Closure based observer.
///
/// ```rust
/// use anubis_core::progress::{CancellationToken, Monitor, TransferObserver};
///
/// let token = CancellationToken::new();
/// let mut last = 0.0;
/// let mut monitor = Monitor::new()
///     .on_progress(|f| last = f)
///     .with_cancellation(token.clone());
///
/// TransferObserver::on_progress(&mut monitor, 0.5);
/// token.cancel();
/// assert!(monitor.is_cancelled());
/// drop(monitor);
/// assert_eq!(last, 0.5);
/// ```
#[derive(Default)]
pub struct Monitor<'a> {
    progress: Option<Box<dyn FnMut(f32) + Send + 'a>>,
    token: Option<CancellationToken>,
}

impl<'a> Monitor<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_progress<F: FnMut(f32) + Send + 'a>(mut self, f: F) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }
}

impl TransferObserver for Monitor<'_> {
    fn on_progress(&mut self, fraction: f32) {
        if let Some(progress) = self.progress.as_mut() {
            progress(fraction);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// reports in steps of 1/1000 at most
const RESOLUTION: f32 = 1000.0;

/// Throttles and clamps what a transfer reports to its observer.
pub(crate) struct ProgressTracker<'o> {
    observer: &'o mut dyn TransferObserver,
    total: u64,
    reported: u32,
}

impl<'o> ProgressTracker<'o> {
    pub fn new(observer: &'o mut dyn TransferObserver, total: u64) -> Self {
        Self {
            observer,
            total,
            reported: 0,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.observer.is_cancelled()
    }

    pub fn advance_to(&mut self, done: u64) {
        if self.total == 0 {
            return;
        }
        let fraction = (done as f64 / self.total as f64).min(1.0) as f32;
        let step = (fraction * RESOLUTION) as u32;
        if step > self.reported {
            self.reported = step;
            self.observer.on_progress(fraction);
        }
    }

    /// the last report of every successful transfer
    pub fn finish(self) {
        self.observer.on_progress(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<f32>);

    impl TransferObserver for Recorder {
        fn on_progress(&mut self, fraction: f32) {
            self.0.push(fraction);
        }
    }

    #[test]
    fn should_throttle_to_the_resolution() {
        let mut recorder = Recorder::default();
        let mut tracker = ProgressTracker::new(&mut recorder, 1_000_000);
        for done in 0..=2_000 {
            tracker.advance_to(done);
        }
        tracker.finish();

        assert_eq!(recorder.0.len(), 3, "two steps of 1/1000 and the final 1.0");
        assert_eq!(recorder.0.last(), Some(&1.0));
    }

    #[test]
    fn should_never_report_backwards_or_beyond_one() {
        let mut recorder = Recorder::default();
        let mut tracker = ProgressTracker::new(&mut recorder, 10);
        tracker.advance_to(5);
        tracker.advance_to(3);
        tracker.advance_to(50);
        tracker.finish();

        assert!(recorder.0.windows(2).all(|w| w[0] <= w[1]));
        assert!(recorder.0.iter().all(|f| (0.0..=1.0).contains(f)));
    }

    #[test]
    fn should_report_completion_for_an_empty_transfer() {
        let mut recorder = Recorder::default();
        ProgressTracker::new(&mut recorder, 0).finish();

        assert_eq!(recorder.0, [1.0]);
    }

    #[test]
    fn cancellation_token_clones_share_the_flag() {
        let token = CancellationToken::new();
        let observer = Monitor::new().with_cancellation(token.clone());
        assert!(!observer.is_cancelled());

        token.cancel();
        assert!(observer.is_cancelled());
    }
}
