use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A steady spinner when `tui` is set, otherwise a hidden bar that ignores updates.
pub(crate) fn spinner(tui: bool, msg: String) -> ProgressBar {
    if !tui {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner().with_message(msg);
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.magenta} {msg} [{elapsed_precise:.magenta}]")
    {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Clears `pb` and leaves a one-line summary behind.
pub(crate) fn finish(tui: bool, pb: ProgressBar, msg: String) {
    pb.finish_and_clear();
    if tui {
        println!("{msg}");
    }
}
