//! Progress display of one batch.
//!
//! A [`ProgressDisplay`] lives for the duration of one batch. Its batch bar
//! advances by one every time a URL is settled; each transfer attempt gets
//! its own bar, dropped once the attempt ends.

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

pub(crate) struct ProgressDisplay {
    multi: MultiProgress,
    batch: ProgressBar,
    style: StyleOptions,
}

impl ProgressDisplay {
    /// Create the display for a batch of `urls` URLs.
    pub(crate) fn new(style: StyleOptions, urls: usize) -> Self {
        let multi = match style.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };
        let batch = multi.add(style.batch_bar(urls as u64));
        batch.tick();

        Self {
            multi,
            batch,
            style,
        }
    }

    /// Bar of one transfer attempt; `size` is 0 when the length is unknown.
    pub(crate) fn transfer_bar(&self, size: u64, label: &str) -> ProgressBar {
        self.multi.add(self.style.transfer_bar(size, label))
    }

    /// Takes the bar of an ended attempt off the screen, whatever its outcome.
    pub(crate) fn finish_transfer(&self, pb: ProgressBar) {
        pb.finish_and_clear();
        self.multi.remove(&pb);
    }

    /// One more URL is downloaded or out of attempts.
    pub(crate) fn settle_url(&self) {
        self.batch.inc(1);
    }

    pub(crate) fn finish(&self) {
        if self.style.clears_batch() {
            self.batch.finish_and_clear();
        } else {
            self.batch.finish();
        }
    }
}
