use crate::error::LoadError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Per-node side information, index-aligned with node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pub abstracts: Vec<String>,
    pub authors: Vec<Vec<String>>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.abstracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abstracts.is_empty()
    }
}

/// Reads `<index><separator><abstract>` lines. The index is discarded; line
/// order is node order.
pub fn read_abstracts(path: &Path, separator: &str) -> Result<Vec<String>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    parse_abstracts(BufReader::new(file), path, separator)
}

/// Reads `<index><separator><name><delimiter><name>...` lines.
pub fn read_authors(
    path: &Path,
    separator: &str,
    delimiter: &str,
) -> Result<Vec<Vec<String>>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    parse_authors(BufReader::new(file), path, separator, delimiter)
}

pub fn parse_abstracts<R: BufRead>(
    reader: R,
    source: &Path,
    separator: &str,
) -> Result<Vec<String>, LoadError> {
    let mut out = Vec::new();
    for_each_payload(reader, source, separator, |payload| {
        out.push(payload.to_string());
    })?;
    Ok(out)
}

pub fn parse_authors<R: BufRead>(
    reader: R,
    source: &Path,
    separator: &str,
    delimiter: &str,
) -> Result<Vec<Vec<String>>, LoadError> {
    let mut out = Vec::new();
    for_each_payload(reader, source, separator, |payload| {
        let names = payload
            .split(delimiter)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        out.push(names);
    })?;
    Ok(out)
}

fn for_each_payload<R, F>(
    reader: R,
    source: &Path,
    separator: &str,
    mut f: F,
) -> Result<(), LoadError>
where
    R: BufRead,
    F: FnMut(&str),
{
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| LoadError::io(source, e))?;
        match line.split_once(separator) {
            Some((_, payload)) => f(payload),
            None => {
                return Err(LoadError::MalformedLine {
                    path: source.to_path_buf(),
                    line: idx + 1,
                    separator: separator.to_string(),
                })
            }
        }
    }
    Ok(())
}
