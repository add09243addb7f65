//! Progress bar for gathering runs.

use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};

/// Returns the bar shown while identifiers are processed.
///
/// Hidden when `quiet` is set or stderr is not a terminal.
pub(crate) fn gather_progress_bar(quiet: bool) -> ProgressBar {
    if quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::gather_progress_bar;

    #[test]
    fn test_quiet_progress_bar_is_hidden() {
        assert!(gather_progress_bar(true).is_hidden());
    }
}
