//! Download progress with CI fallback

use super::context::UiContext;
use indicatif::{ProgressBar, ProgressBarIter, ProgressDrawTarget, ProgressStyle};
use std::io::Read;

/// Byte progress for an archive download.
///
/// Draws an indicatif bar on stderr in interactive terminals and stays
/// hidden in CI, where the log line emitted before the download suffices.
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    /// Create a progress indicator for a body of `total` bytes, if known
    pub fn new(ctx: &UiContext, total: Option<u64>) -> Self {
        if !ctx.use_fancy_output() {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("  {spinner:.cyan} {bar:30.cyan/dim} {bytes}/{total_bytes} {bytes_per_sec:.dim}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("━╸─"),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .template("  {spinner:.cyan} {bytes} {bytes_per_sec:.dim}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_draw_target(ProgressDrawTarget::stderr());

        Self { bar }
    }

    /// Wrap a reader so bytes read through it advance the bar
    pub fn wrap_read<R: Read>(&self, reader: R) -> ProgressBarIter<R> {
        self.bar.wrap_read(reader)
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
