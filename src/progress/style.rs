//! Look of the batch progress display.
//!
//! A batch draws at most two kinds of bars: one batch bar counting the URLs
//! that are settled (downloaded or out of attempts), and one transfer bar per
//! running attempt, counting bytes and labelled with the destination file.
//!
//! # Examples
//!
//! ```rust
//! use lanefetch::progress::StyleOptions;
//!
//! // Only the batch bar, cleared once the batch is over.
//! let quiet = StyleOptions::default().transfer_template(None).clear_batch(true);
//! assert!(quiet.is_enabled());
//!
//! assert!(!StyleOptions::hidden().is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

/// Batch bar: `00:00:04 ██████████▓░░░░░░░░░ 11/20 settled`
const BATCH_TEMPLATE: &str = "{elapsed_precise:.dim} {bar:40.cyan/blue} {pos}/{len} settled";
/// Transfer bar: `  x.bin   ━━━━━━━╸───── 1.20 MiB/2.00 MiB 3.10 MiB/s`
const TRANSFER_TEMPLATE: &str =
    "  {msg:<24} {bar:30.green/black} {bytes:>10}/{total_bytes:<10} {bytes_per_sec:>12}";
const BATCH_CHARS: &str = "█▓░";
const TRANSFER_CHARS: &str = "━╸─";

/// Which bars a batch draws, and with which `indicatif` templates.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    batch: Option<String>,
    transfer: Option<String>,
    clear_batch: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            batch: Some(BATCH_TEMPLATE.to_string()),
            transfer: Some(TRANSFER_TEMPLATE.to_string()),
            clear_batch: false,
        }
    }
}

impl StyleOptions {
    /// Draws nothing at all.
    pub fn hidden() -> Self {
        Self {
            batch: None,
            transfer: None,
            clear_batch: true,
        }
    }

    /// Sets the template of the batch bar; `None` hides it.
    ///
    /// `{pos}` and `{len}` are the settled and total URL counts.
    pub fn batch_template(mut self, template: Option<String>) -> Self {
        self.batch = template;
        self
    }

    /// Sets the template of the transfer bars; `None` hides them.
    ///
    /// `{msg}` is the destination file name.
    pub fn transfer_template(mut self, template: Option<String>) -> Self {
        self.transfer = template;
        self
    }

    /// Clears the batch bar once the batch is over instead of leaving it on screen.
    pub fn clear_batch(mut self, clear: bool) -> Self {
        self.clear_batch = clear;
        self
    }

    /// Returns `false` if no bar is drawn.
    pub fn is_enabled(&self) -> bool {
        self.batch.is_some() || self.transfer.is_some()
    }

    pub(crate) fn clears_batch(&self) -> bool {
        self.clear_batch
    }

    pub(crate) fn batch_bar(&self, urls: u64) -> ProgressBar {
        bar(self.batch.as_deref(), BATCH_CHARS, urls)
    }

    pub(crate) fn transfer_bar(&self, bytes: u64, label: &str) -> ProgressBar {
        let pb = bar(self.transfer.as_deref(), TRANSFER_CHARS, bytes);
        pb.set_message(label.to_string());
        pb
    }
}

/// Hidden without a template; an unusable template falls back to the plain bar.
fn bar(template: Option<&str>, chars: &str, len: u64) -> ProgressBar {
    let template = match template {
        Some(template) => template,
        None => return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden()),
    };
    let style = ProgressStyle::with_template(template)
        .unwrap_or_else(|e| {
            debug!("Ignoring invalid progress template {:?}: {}", template, e);
            ProgressStyle::default_bar()
        })
        .progress_chars(chars);
    ProgressBar::new(len).with_style(style)
}
