use serde::{Deserialize, Serialize};

/// Per-run rejection-sampling counters.
///
/// One entry per accepted slot is kept in `draws_per_slot` so the snapshot can
/// report tail latencies in draws rather than only the mean.
#[derive(Debug, Clone, Default)]
pub struct SamplingMetrics {
    draws_per_slot: Vec<u32>,
    total_draws: u64,
    edge_rejections: u64,
    self_pair_rejections: u64,
    expected_draws_per_slot: f64,
}

impl SamplingMetrics {
    pub fn new(expected_draws_per_slot: f64) -> Self {
        Self {
            expected_draws_per_slot,
            ..Self::default()
        }
    }

    pub fn with_capacity(expected_draws_per_slot: f64, slots: usize) -> Self {
        Self {
            draws_per_slot: Vec::with_capacity(slots),
            expected_draws_per_slot,
            ..Self::default()
        }
    }

    pub fn record_edge_rejection(&mut self) {
        self.edge_rejections += 1;
    }

    pub fn record_self_pair_rejection(&mut self) {
        self.self_pair_rejections += 1;
    }

    /// Record an accepted slot that took `draws` attempts (including the accepted one).
    pub fn record_slot(&mut self, draws: u32) {
        self.draws_per_slot.push(draws);
        self.total_draws += u64::from(draws);
    }

    /// Account for the draws of a slot that ran out of budget.
    pub fn record_exhausted_slot(&mut self, draws: u32) {
        self.total_draws += u64::from(draws);
    }

    pub fn slots(&self) -> usize {
        self.draws_per_slot.len()
    }

    pub fn snapshot(&self) -> SamplingSnapshot {
        let mut sorted: Vec<u32> = self.draws_per_slot.clone();
        sorted.sort_unstable();

        let mean_draws_per_slot = if sorted.is_empty() {
            0.0
        } else {
            sorted.iter().map(|d| f64::from(*d)).sum::<f64>() / sorted.len() as f64
        };

        SamplingSnapshot {
            slots: sorted.len(),
            total_draws: self.total_draws,
            edge_rejections: self.edge_rejections,
            self_pair_rejections: self.self_pair_rejections,
            mean_draws_per_slot,
            expected_draws_per_slot: self.expected_draws_per_slot,
            p50: percentile(&sorted, 50.0),
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
            max: sorted.last().copied().unwrap_or(0),
        }
    }
}

fn percentile(sorted: &[u32], p: f32) -> u32 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((p / 100.0) * (sorted.len() as f32)).ceil() as usize;
    sorted[idx.saturating_sub(1).min(sorted.len() - 1)]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingSnapshot {
    pub slots: usize,
    pub total_draws: u64,
    pub edge_rejections: u64,
    pub self_pair_rejections: u64,
    pub mean_draws_per_slot: f64,
    pub expected_draws_per_slot: f64,
    pub p50: u32,
    pub p95: u32,
    pub p99: u32,
    pub max: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_percentiles() {
        let mut metrics = SamplingMetrics::new(1.25);
        for draws in 1..=100 {
            metrics.record_slot(draws);
        }
        metrics.record_edge_rejection();
        metrics.record_self_pair_rejection();

        let snap = metrics.snapshot();
        assert_eq!(snap.slots, 100);
        assert_eq!(snap.total_draws, 5050);
        assert_eq!(snap.p50, 50);
        assert_eq!(snap.p95, 95);
        assert_eq!(snap.p99, 99);
        assert_eq!(snap.max, 100);
        assert!((snap.mean_draws_per_slot - 50.5).abs() < 1e-9);
        assert_eq!(snap.edge_rejections, 1);
        assert_eq!(snap.self_pair_rejections, 1);
    }

    #[test]
    fn test_empty_snapshot() {
        let metrics = SamplingMetrics::default();
        let snap = metrics.snapshot();
        assert_eq!(snap.slots, 0);
        assert_eq!(snap.p99, 0);
        assert_eq!(snap.mean_draws_per_slot, 0.0);
    }

    #[test]
    fn test_exhausted_slot_counts_draws_only() {
        let mut metrics = SamplingMetrics::default();
        metrics.record_slot(3);
        metrics.record_exhausted_slot(10);
        assert_eq!(metrics.slots(), 1);
        assert_eq!(metrics.snapshot().total_draws, 13);
    }
}
