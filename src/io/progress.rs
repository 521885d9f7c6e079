//! Terminal progress display driven by solver events

use crate::algorithm::events::SolverEvent;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single bar counting collapsed cells of the current attempt
///
/// A contradiction rewinds the bar and the message shows the attempt count.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a bar for a grid of `cells` cells
    pub fn new(cells: usize) -> Self {
        let bar = ProgressBar::new(cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_message("attempt 1");
        Self { bar }
    }

    /// Event callback suitable for `WaveFunction::subscribe`
    pub fn observer(&self) -> impl FnMut(&SolverEvent) + 'static {
        let bar = self.bar.clone();
        let mut attempt = 1usize;
        move |event| match event {
            SolverEvent::CellCollapsed { .. } => bar.inc(1),
            SolverEvent::ContradictionDetected { .. } => {
                attempt += 1;
                bar.set_position(0);
                bar.set_message(format!("attempt {attempt}"));
            }
            SolverEvent::Finished { seed } => {
                bar.set_message(format!("seed {seed}"));
            }
            SolverEvent::CellConstrained { .. } => {}
        }
    }

    /// Cells collapsed so far in the current attempt
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Current status message
    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
