use crate::error::SamplingError;
use crate::progress::SlotObserver;
use linkprep_core::config::{SamplerConfig, SelfPairPolicy};
use linkprep_core::metrics::SamplingMetrics;
use linkprep_core::model::EdgePair;
use rand::Rng;
use storage::index::AdjacencyGraph;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerOptions {
    /// Draws allowed per output slot before giving up.
    pub max_retries_per_slot: u32,
    pub self_pairs: SelfPairPolicy,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self::from(&SamplerConfig::default())
    }
}

impl From<&SamplerConfig> for SamplerOptions {
    fn from(config: &SamplerConfig) -> Self {
        Self {
            max_retries_per_slot: config.max_retries_per_slot,
            self_pairs: config.self_pairs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NegativeSet {
    pub pairs: Vec<EdgePair>,
    pub metrics: SamplingMetrics,
}

/// Rejection sampler for non-edges.
///
/// Each slot draws `u` and `v` independently and uniformly from `[0, N)` until
/// the pair is not an edge. Slots are independent: the same non-edge may fill
/// more than one slot.
pub struct NegativeSampler {
    options: SamplerOptions,
}

impl NegativeSampler {
    pub fn new(options: SamplerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SamplerOptions {
        &self.options
    }

    fn accepts_self_pairs(&self) -> bool {
        self.options.self_pairs == SelfPairPolicy::Accept
    }

    /// `N² / capacity`, the mean of the geometric number of draws per slot.
    pub fn expected_draws_per_slot(&self, graph: &AdjacencyGraph) -> f64 {
        let capacity = graph.non_edge_capacity(self.accepts_self_pairs());
        if capacity == 0 {
            return f64::INFINITY;
        }
        let n = graph.order() as f64;
        n * n / capacity as f64
    }

    pub fn sample<R, O>(
        &self,
        graph: &AdjacencyGraph,
        k: usize,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<NegativeSet, SamplingError>
    where
        R: Rng + ?Sized,
        O: SlotObserver + ?Sized,
    {
        let expected = self.expected_draws_per_slot(graph);
        let mut metrics = SamplingMetrics::with_capacity(expected, k);
        let mut pairs = Vec::with_capacity(k);
        if k == 0 {
            return Ok(NegativeSet { pairs, metrics });
        }

        let density = graph.density();
        if graph.non_edge_capacity(self.accepts_self_pairs()) == 0 {
            warn!(order = graph.order(), density, "Graph has no non-edge to sample");
            return Err(SamplingError::Exhausted {
                slot: 0,
                attempts: 0,
                density,
            });
        }

        info!(
            k,
            order = graph.order(),
            density,
            expected_draws_per_slot = expected,
            "Sampling negative pairs"
        );
        observer.on_start(k);

        let n = graph.order() as u64;
        let reject_self = !self.accepts_self_pairs();
        for slot in 0..k {
            let mut draws = 0u32;
            let pair = loop {
                if draws == self.options.max_retries_per_slot {
                    metrics.record_exhausted_slot(draws);
                    warn!(slot, attempts = draws, density, "Retry budget exhausted");
                    observer.on_finish();
                    return Err(SamplingError::Exhausted {
                        slot,
                        attempts: draws,
                        density,
                    });
                }
                draws += 1;

                let u = rng.gen_range(0..n);
                let v = rng.gen_range(0..n);
                if reject_self && u == v {
                    metrics.record_self_pair_rejection();
                    continue;
                }
                if graph.is_edge(u, v) {
                    metrics.record_edge_rejection();
                    continue;
                }
                break (u, v);
            };

            pairs.push(pair);
            metrics.record_slot(draws);
            observer.on_slot(slot, draws);
        }
        observer.on_finish();

        Ok(NegativeSet { pairs, metrics })
    }
}
