use crate::assemble::{assemble, DatasetBundles};
use crate::error::PipelineError;
use ingestion::{Dataset, DatasetLoader};
use linkprep_core::config::PrepConfig;
use linkprep_core::metrics::SamplingSnapshot;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sampler::{partition_with_rng, NegativeSampler, SamplerOptions, SlotObserver};
use std::path::Path;
use storage::publish::{Manifest, Publisher, RunInfo};
use tracing::info;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub manifest: Manifest,
    pub sampling: SamplingSnapshot,
}

/// Everything up to, but excluding, writing.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub dataset: Dataset,
    pub bundles: DatasetBundles,
    pub sampling: SamplingSnapshot,
}

/// Split and sample an already loaded dataset.
///
/// One generator seeded with `split.seed` feeds, in order: the positive
/// permutation, the negative permutation, and the negative sampler.
pub fn prepare<O>(
    config: &PrepConfig,
    dataset: Dataset,
    observer: &mut O,
) -> Result<PreparedDataset, PipelineError>
where
    O: SlotObserver + ?Sized,
{
    let mut rng = StdRng::seed_from_u64(config.split.seed);
    let edge_count = dataset.edge_count();
    let dev_ratio = config.split.dev_ratio;

    info!("Sample positive cases");
    let positive_split = partition_with_rng(edge_count, dev_ratio, &mut rng)?;
    let negative_split = partition_with_rng(edge_count, dev_ratio, &mut rng)?;
    info!(
        train = positive_split.train.len(),
        dev = positive_split.dev.len(),
        seed = config.split.seed,
        "Partitioned edge pools"
    );

    info!("Sample negative cases");
    let sampler = NegativeSampler::new(SamplerOptions::from(&config.sampler));
    let negatives = sampler.sample(&dataset.graph, edge_count, &mut rng, observer)?;
    let sampling = negatives.metrics.snapshot();
    info!(
        draws = sampling.total_draws,
        edge_rejections = sampling.edge_rejections,
        self_pair_rejections = sampling.self_pair_rejections,
        mean_draws_per_slot = sampling.mean_draws_per_slot,
        expected_draws_per_slot = sampling.expected_draws_per_slot,
        p99 = sampling.p99,
        max = sampling.max,
        "Negative sampling metrics"
    );

    let bundles = assemble(&dataset, &positive_split, &negatives.pairs, &negative_split);
    Ok(PreparedDataset {
        dataset,
        bundles,
        sampling,
    })
}

/// Load, split, sample, assemble and publish one dataset.
pub fn run<O>(
    config: &PrepConfig,
    input_dir: &Path,
    output_dir: &Path,
    observer: &mut O,
) -> Result<RunReport, PipelineError>
where
    O: SlotObserver + ?Sized,
{
    info!(input = %input_dir.display(), "Loading dataset");
    let dataset = DatasetLoader::from_config(config).load(input_dir)?;

    let prepared = prepare(config, dataset, observer)?;

    info!(output = %output_dir.display(), "Saving dataset");
    let publisher = Publisher::new(output_dir, config.output.prefix.clone());
    let run_info = RunInfo {
        seed: config.split.seed,
        dev_ratio: config.split.dev_ratio,
        node_count: prepared.dataset.node_count(),
        edge_count: prepared.dataset.edge_count(),
    };
    let manifest = publisher.publish(&run_info, &prepared.bundles.labeled())?;

    Ok(RunReport {
        manifest,
        sampling: prepared.sampling,
    })
}
