use tracing::info;

/// Receives slot-by-slot progress from the negative sampler.
pub trait SlotObserver {
    fn on_start(&mut self, _total: usize) {}

    /// `slot` was filled after `draws` attempts.
    fn on_slot(&mut self, slot: usize, draws: u32);

    fn on_finish(&mut self) {}
}

pub struct NoopObserver;

impl SlotObserver for NoopObserver {
    fn on_slot(&mut self, _slot: usize, _draws: u32) {}
}

impl<F> SlotObserver for F
where
    F: FnMut(usize, u32),
{
    fn on_slot(&mut self, slot: usize, draws: u32) {
        self(slot, draws)
    }
}

/// Emits an info line every `every` slots.
pub struct LogObserver {
    every: usize,
    total: usize,
    draws: u64,
}

impl LogObserver {
    pub fn new(every: usize) -> Self {
        Self {
            every,
            total: 0,
            draws: 0,
        }
    }
}

impl SlotObserver for LogObserver {
    fn on_start(&mut self, total: usize) {
        self.total = total;
        self.draws = 0;
    }

    fn on_slot(&mut self, slot: usize, draws: u32) {
        self.draws += u64::from(draws);
        let done = slot + 1;
        if self.every > 0 && done % self.every == 0 {
            info!(done, total = self.total, draws = self.draws, "Sampling negatives");
        }
    }

    fn on_finish(&mut self) {
        info!(total = self.total, draws = self.draws, "Negative sampling finished");
    }
}
