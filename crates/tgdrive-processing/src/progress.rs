//! Progress reporting helpers
//!
//! Pure functions for percentages, bars and byte sizes, plus the throttle
//! that decides when a new percentage is worth a status edit.

use tgdrive_core::constants::PROGRESS_BAR_WIDTH;

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;

/// Integer percentage of `done` over `total`, truncated and capped at 100.
///
/// A `total` of 0 counts as complete.
pub fn download_progress(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = u128::from(done) * 100 / u128::from(total);
    percent.min(100) as u8
}

/// Integer percentage of a provider-reported fraction, truncated.
pub fn upload_progress(fraction: f64) -> u8 {
    if fraction.is_nan() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * 100.0).floor() as u8
}

/// Render `[████░░░░] 37%` with `floor(width * progress / 100)` filled cells.
pub fn render_bar(progress: u8, width: usize) -> String {
    let progress = progress.min(100);
    let filled = width * usize::from(progress) / 100;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        progress
    )
}

/// [`render_bar`] at the default width.
pub fn progress_bar(progress: u8) -> String {
    render_bar(progress, PROGRESS_BAR_WIDTH)
}

/// Human-readable size using binary units: `0B`, `1.00KB`, `2.50MB`, `1.00GB`.
pub fn humanize_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.2}GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2}KB", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Decides whether a progress value should be pushed to the user.
///
/// A value is pushed iff it is at least `step` points above the last pushed
/// value. Nothing has been pushed initially (the last value starts at -1).
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    step: i64,
    last_pushed: i64,
}

impl ProgressThrottle {
    pub fn new(step: i64) -> Self {
        Self {
            step,
            last_pushed: -1,
        }
    }

    /// Record `progress` as pushed and return true if it crosses the threshold.
    pub fn should_push(&mut self, progress: u8) -> bool {
        let progress = i64::from(progress);
        if progress - self.last_pushed >= self.step {
            self.last_pushed = progress;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub fn last_pushed(&self) -> Option<u8> {
        u8::try_from(self.last_pushed).ok()
    }
}
