use crate::error::LoadError;
use linkprep_core::model::EdgePair;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parsed edge list plus the 1-based source line of every pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    pub pairs: Vec<EdgePair>,
    pub lines: Vec<usize>,
}

impl EdgeList {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

pub fn read_edge_list(path: &Path, delimiter: &str) -> Result<EdgeList, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    parse_edge_list(BufReader::new(file), path, delimiter)
}

/// One `<u><delimiter><v>` pair per line. Blank lines and `#` comments are skipped.
pub fn parse_edge_list<R: BufRead>(
    reader: R,
    source: &Path,
    delimiter: &str,
) -> Result<EdgeList, LoadError> {
    let mut edges = EdgeList::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| LoadError::io(source, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let malformed = |reason: String| LoadError::MalformedEdge {
            path: source.to_path_buf(),
            line: idx + 1,
            reason,
        };

        let fields: Vec<&str> = trimmed.split(delimiter).map(str::trim).collect();
        if fields.len() != 2 {
            return Err(malformed(format!(
                "expected 2 fields, found {}",
                fields.len()
            )));
        }
        let u = fields[0]
            .parse::<u64>()
            .map_err(|_| malformed(format!("invalid node id {:?}", fields[0])))?;
        let v = fields[1]
            .parse::<u64>()
            .map_err(|_| malformed(format!("invalid node id {:?}", fields[1])))?;

        edges.pairs.push((u, v));
        edges.lines.push(idx + 1);
    }
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_edge_list_skips_comments_and_blanks() {
        let input = "# citation graph\n0,1\n\n 1 , 2 \n";
        let edges = parse_edge_list(Cursor::new(input), Path::new("e.txt"), ",").unwrap();
        assert_eq!(edges.pairs, vec![(0, 1), (1, 2)]);
        assert_eq!(edges.lines, vec![2, 4]);
    }

    #[test]
    fn test_parse_edge_list_rejects_bad_ids() {
        for (input, line) in [("0,1\n-1,2\n", 2), ("x,1\n", 1), ("0,1,2\n", 1), ("7\n", 1)] {
            let err = parse_edge_list(Cursor::new(input), Path::new("e.txt"), ",").unwrap_err();
            match err {
                LoadError::MalformedEdge { line: got, .. } => assert_eq!(got, line, "{input:?}"),
                other => panic!("unexpected error for {input:?}: {other}"),
            }
        }
    }
}
