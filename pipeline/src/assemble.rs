use ingestion::Dataset;
use linkprep_core::model::{EdgePair, PartitionBundle, PartitionLabel};
use sampler::IndexSplit;

/// Both partitions of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetBundles {
    pub train: PartitionBundle,
    pub dev: PartitionBundle,
}

impl DatasetBundles {
    pub fn get(&self, label: PartitionLabel) -> &PartitionBundle {
        match label {
            PartitionLabel::Train => &self.train,
            PartitionLabel::Dev => &self.dev,
        }
    }

    pub fn labeled(&self) -> [(PartitionLabel, &PartitionBundle); 2] {
        [
            (PartitionLabel::Train, &self.train),
            (PartitionLabel::Dev, &self.dev),
        ]
    }
}

/// Build train/dev bundles from index-selected slices of the positive pool
/// (`dataset.graph.edges()`) and the negative pool.
///
/// Side information and `origin_edges` are copied whole into both bundles.
pub fn assemble(
    dataset: &Dataset,
    positive_split: &IndexSplit,
    negatives: &[EdgePair],
    negative_split: &IndexSplit,
) -> DatasetBundles {
    let positives = dataset.graph.edges();
    let build = |pos_idx: &[usize], neg_idx: &[usize]| {
        let (pos_u, pos_v) = select_columns(positives, pos_idx);
        let (neg_u, neg_v) = select_columns(negatives, neg_idx);
        PartitionBundle {
            abstracts: dataset.corpus.abstracts.clone(),
            authors: dataset.corpus.authors.clone(),
            origin_edges: positives.to_vec(),
            pos_u,
            pos_v,
            neg_u,
            neg_v,
        }
    };

    DatasetBundles {
        train: build(&positive_split.train, &negative_split.train),
        dev: build(&positive_split.dev, &negative_split.dev),
    }
}

fn select_columns(pairs: &[EdgePair], indices: &[usize]) -> (Vec<u64>, Vec<u64>) {
    indices.iter().map(|&i| pairs[i]).unzip()
}
