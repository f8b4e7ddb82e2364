use indicatif::{ProgressBar, ProgressStyle};
use sampler::SlotObserver;

/// Terminal progress bar over sampler slots.
pub struct ProgressBarObserver {
    bar: ProgressBar,
}

impl ProgressBarObserver {
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl Default for ProgressBarObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotObserver for ProgressBarObserver {
    fn on_start(&mut self, total: usize) {
        self.bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{msg} [{elapsed_precise}] {wide_bar} {pos}/{len} ({per_sec}, eta {eta})",
        ) {
            self.bar.set_style(style);
        }
        self.bar.set_message("negatives");
    }

    fn on_slot(&mut self, _slot: usize, _draws: u32) {
        self.bar.inc(1);
    }

    fn on_finish(&mut self) {
        self.bar.finish();
    }
}
