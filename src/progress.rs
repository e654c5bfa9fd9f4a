//! Terminal progress for a playlist run.
//!
//! Interactive runs draw a bar over the request list and a spinner while
//! connecting. Log-only runs (cron, CI) hide both and print a plain
//! `[Resolving] n/total` line every few requests instead.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::models::AlbumRequest;

/// Requests between progress lines in log-only mode.
const LOG_EVERY: u64 = 10;

const BAR_TEMPLATE: &str = "[{elapsed_precise}] [{bar:40.green/white}] {pos}/{len} albums {wide_msg}";
const SPINNER_TEMPLATE: &str = "{spinner} {msg} [{elapsed}]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressMode {
    #[default]
    Bars,
    LogOnly,
}

impl ProgressMode {
    pub fn from_log_only(log_only: bool) -> Self {
        if log_only {
            ProgressMode::LogOnly
        } else {
            ProgressMode::Bars
        }
    }

    /// Spinner for the connect/token phase.
    pub fn spinner(self, msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        match self {
            ProgressMode::LogOnly => pb.set_draw_target(ProgressDrawTarget::hidden()),
            ProgressMode::Bars => {
                if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
                    pb.set_style(style);
                }
                pb.enable_steady_tick(Duration::from_millis(120));
            }
        }
        pb.set_message(msg.to_string());
        pb
    }
}

/// Progress over one request list, advanced once per request.
pub struct RequestProgress {
    bar: ProgressBar,
    mode: ProgressMode,
    total: u64,
}

impl RequestProgress {
    pub fn new(mode: ProgressMode, total: usize) -> Self {
        let total = total as u64;
        let bar = ProgressBar::new(total);
        match mode {
            ProgressMode::LogOnly => bar.set_draw_target(ProgressDrawTarget::hidden()),
            ProgressMode::Bars => {
                if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
                    bar.set_style(style.progress_chars("=> "));
                }
            }
        }
        Self { bar, mode, total }
    }

    /// No bar and no progress lines.
    pub fn hidden(total: usize) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            mode: ProgressMode::Bars,
            total: total as u64,
        }
    }

    pub fn start(&self, request: &AlbumRequest) {
        self.bar
            .set_message(format!("{} - {}", request.artist, request.album));
    }

    pub fn advance(&self) {
        self.bar.inc(1);
        if self.mode == ProgressMode::LogOnly {
            if let Some(line) = progress_line(self.bar.position(), self.total) {
                eprintln!("{}", line);
            }
        }
    }

    pub fn finish(&self, processed: usize) {
        self.bar
            .finish_with_message(format!("Processed {} requests", processed));
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

/// Log-only progress line, emitted every `LOG_EVERY` requests and on the last one.
pub fn progress_line(done: u64, total: u64) -> Option<String> {
    if total == 0 || done == 0 || (done % LOG_EVERY != 0 && done != total) {
        return None;
    }
    let pct = 100.0 * done as f64 / total as f64;
    Some(format!("[Resolving] {}/{} ({:.0}%)", done, total, pct))
}

/// "4.2s" under a minute, "3m 07s" above.
pub fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}
