use serde::{Deserialize, Serialize};

/// Dense node identifier in `[0, order)`.
pub type NodeId = u64;

/// An ordered node pair `(u, v)`.
pub type EdgePair = (NodeId, NodeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionLabel {
    Train,
    Dev,
}

impl PartitionLabel {
    pub const ALL: [PartitionLabel; 2] = [PartitionLabel::Train, PartitionLabel::Dev];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionLabel::Train => "train",
            PartitionLabel::Dev => "dev",
        }
    }
}

impl std::fmt::Display for PartitionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One partition of the link-prediction dataset.
///
/// `abstracts`, `authors` and `origin_edges` are the full, shared arrays and are
/// identical across partitions. The `pos_*` and `neg_*` columns hold this
/// partition's disjoint slice of the positive and negative pools.
#[derive(
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
    Serialize,
    Deserialize,
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
)]
#[archive(check_bytes)]
pub struct PartitionBundle {
    pub abstracts: Vec<String>,
    pub authors: Vec<Vec<String>>,
    pub origin_edges: Vec<(u64, u64)>,
    pub pos_u: Vec<u64>,
    pub pos_v: Vec<u64>,
    pub neg_u: Vec<u64>,
    pub neg_v: Vec<u64>,
}

impl PartitionBundle {
    pub fn positive_pairs(&self) -> impl Iterator<Item = EdgePair> + '_ {
        self.pos_u.iter().copied().zip(self.pos_v.iter().copied())
    }

    pub fn negative_pairs(&self) -> impl Iterator<Item = EdgePair> + '_ {
        self.neg_u.iter().copied().zip(self.neg_v.iter().copied())
    }

    pub fn positive_count(&self) -> usize {
        self.pos_u.len()
    }

    pub fn negative_count(&self) -> usize {
        self.neg_u.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_json_uses_expected_keys() {
        let bundle = PartitionBundle {
            abstracts: vec!["graph paper".to_string()],
            authors: vec![vec!["Ada".to_string()]],
            origin_edges: vec![(0, 1)],
            pos_u: vec![0],
            pos_v: vec![1],
            neg_u: vec![1],
            neg_v: vec![0],
        };

        let value = serde_json::to_value(&bundle).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "abstracts",
            "authors",
            "origin_edges",
            "pos_u",
            "pos_v",
            "neg_u",
            "neg_v",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(value["origin_edges"][0], serde_json::json!([0, 1]));
    }

    #[test]
    fn test_pair_iterators_zip_columns() {
        let bundle = PartitionBundle {
            pos_u: vec![0, 2],
            pos_v: vec![1, 3],
            neg_u: vec![4],
            neg_v: vec![5],
            ..Default::default()
        };
        assert_eq!(bundle.positive_pairs().collect::<Vec<_>>(), vec![(0, 1), (2, 3)]);
        assert_eq!(bundle.negative_pairs().collect::<Vec<_>>(), vec![(4, 5)]);
        assert_eq!(PartitionLabel::Dev.to_string(), "dev");
    }
}
