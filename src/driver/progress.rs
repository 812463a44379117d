use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tokio::sync::oneshot;
use tracing::info;

const TICK: Duration = Duration::from_millis(250);
const BAR_WIDTH: u64 = 30;
/// Non-interactive runs log once per this many percent.
const LOG_STEP_PERCENT: u64 = 10;

/// Reports timed-phase progress from the shared completion counter: a bar
/// on stderr when it is a terminal, log lines otherwise.
pub(super) struct ProgressReporter {
    stop: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<()>,
}

impl ProgressReporter {
    pub(super) fn spawn(completed: Arc<AtomicU64>, total: u64, no_color: bool) -> Self {
        let (stop, mut stop_rx) = oneshot::channel();
        let interactive = std::io::stderr().is_terminal();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK);
            let mut logged_step: u64 = 0;
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let done = completed.load(Ordering::Relaxed);
                        if interactive {
                            if render_bar(done, total, no_color).is_err() {
                                break;
                            }
                        } else {
                            logged_step = log_step(done, total, logged_step);
                        }
                    }
                }
            }
            let done = completed.load(Ordering::Relaxed);
            if interactive {
                if render_bar(done, total, no_color).is_ok() {
                    drop(finish_line());
                }
            } else {
                log_step(done, total, logged_step);
            }
        });
        Self { stop, handle }
    }

    pub(super) async fn finish(self) {
        drop(self.stop.send(()));
        drop(self.handle.await);
    }
}

fn percent(done: u64, total: u64) -> u64 {
    done.saturating_mul(100).checked_div(total).unwrap_or(100).min(100)
}

fn log_step(done: u64, total: u64, logged_step: u64) -> u64 {
    let step = percent(done, total)
        .checked_div(LOG_STEP_PERCENT)
        .unwrap_or(0);
    if step > logged_step {
        info!("Progress: {}/{} ({}%)", done, total, percent(done, total));
    }
    step.max(logged_step)
}

fn render_bar(done: u64, total: u64, no_color: bool) -> Result<(), std::io::Error> {
    let (bar, counts) = bar_segments(done, total);
    let mut out = std::io::stderr();
    queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    if no_color {
        queue!(out, Print(&bar), Print(&counts))?;
    } else {
        queue!(
            out,
            Print(&bar),
            SetForegroundColor(Color::Cyan),
            Print(&counts),
            ResetColor
        )?;
    }
    out.flush()
}

fn bar_segments(done: u64, total: u64) -> (String, String) {
    let done = done.min(total);
    let filled = done
        .saturating_mul(BAR_WIDTH)
        .checked_div(total)
        .unwrap_or(BAR_WIDTH)
        .min(BAR_WIDTH);
    let filled = usize::try_from(filled).unwrap_or(0);
    let width = usize::try_from(BAR_WIDTH).unwrap_or(0);
    let bar = format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    let counts = format!(" {}/{} ({}%)", done, total, percent(done, total));
    (bar, counts)
}

fn finish_line() -> Result<(), std::io::Error> {
    let mut out = std::io::stderr();
    out.write_all(b"\n")?;
    out.flush()
}
