//! Progress reporting for file downloads.

use std::io::Write;

/// Number of cells in the progress bar.
pub const BAR_WIDTH: usize = 50;

const MIB: f64 = 1024.0 * 1024.0;

/// Progress information for one download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    /// Bytes written so far
    pub done: u64,
    /// Size the page declared for the file
    pub total: u64,
}

impl TransferProgress {
    pub fn new(done: u64, total: u64) -> Self {
        Self { done, total }
    }

    /// Filled cells, clamped to the bar width.
    ///
    /// Servers sometimes send more than the declared size; a declared size of
    /// zero shows a full bar as soon as anything arrives.
    pub fn filled_cells(&self) -> usize {
        if self.total == 0 {
            return if self.done > 0 { BAR_WIDTH } else { 0 };
        }
        let cells = (BAR_WIDTH as u128 * self.done as u128) / self.total as u128;
        cells.min(BAR_WIDTH as u128) as usize
    }
}

impl std::fmt::Display for TransferProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filled = self.filled_cells();
        write!(
            f,
            "[{}{}] {:.2}MB/{:.2}MB",
            "=".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            self.done as f64 / MIB,
            self.total as f64 / MIB
        )
    }
}

/// Redraws a single progress line on stdout.
#[derive(Debug, Default)]
pub struct ProgressLine {
    drawn: bool,
}

impl ProgressLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, progress: &TransferProgress) {
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "\r{}", progress);
        let _ = stdout.flush();
        self.drawn = true;
    }

    /// End the line so the next output starts on a fresh one.
    pub fn finish(&mut self) {
        if std::mem::take(&mut self.drawn) {
            println!();
        }
    }
}
