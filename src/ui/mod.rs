//! Terminal output helpers
//!
//! Plain, prefix-tagged output in CI and non-interactive shells; colors and
//! progress bars only when a human is watching.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{key_value, remark, section, step_ok, step_ok_detail, step_warn_hint};
pub use progress::DownloadProgress;
