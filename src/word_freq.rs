//! Word-frequency counting on top of `ChainTable`.
//!
//! Tokens are whitespace-delimited, cleaned by dropping ASCII punctuation and
//! lowercasing ASCII letters, then counted with `increment_or_insert`. The
//! top-N selection sorts by count descending, then key ascending.

use crate::chain_table::ChainTable;
use crate::config::TableConfig;
use crate::error::TableError;
use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FreqError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Table(#[from] TableError),
}

/// One distinct word and its number of occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    /// Count descending, then word ascending.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.word.cmp(&other.word))
    }
}

/// Drops ASCII punctuation and lowercases ASCII letters. Other characters,
/// including non-ASCII text, pass through unchanged.
pub fn clean_and_lowercase(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Counts cleaned tokens into a default-configured table.
pub fn count_tokens<'a, I>(tokens: I) -> Result<ChainTable<u64>, FreqError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table = ChainTable::new();
    add_tokens(&mut table, tokens)?;
    Ok(table)
}

/// Cleans and counts `tokens` into `table`. Tokens that clean to nothing
/// (pure punctuation) are skipped.
pub fn add_tokens<'a, I>(table: &mut ChainTable<u64>, tokens: I) -> Result<(), TableError>
where
    I: IntoIterator<Item = &'a str>,
{
    for token in tokens {
        let word = clean_and_lowercase(token);
        if word.is_empty() {
            continue;
        }
        table.increment_or_insert(&word)?;
    }
    Ok(())
}

/// Reads `reader` line by line and counts its whitespace-delimited tokens.
/// Bytes that are not valid UTF-8 decode as U+FFFD.
pub fn count_reader<R: BufRead>(
    reader: R,
    config: TableConfig,
) -> Result<ChainTable<u64>, FreqError> {
    count_lines(reader, config, Path::new("<reader>"))
}

fn count_lines<R: BufRead>(
    mut reader: R,
    config: TableConfig,
    path: &Path,
) -> Result<ChainTable<u64>, FreqError> {
    let mut table = ChainTable::with_config(config)?;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| FreqError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        if n == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        add_tokens(&mut table, line.split_whitespace())?;
    }
    debug!(distinct = table.len(), stats = ?table.stats(), "counted words");
    Ok(table)
}

/// Counts every word of the file at `path`.
pub fn count_file(path: &Path, config: TableConfig) -> Result<ChainTable<u64>, FreqError> {
    let file = File::open(path).map_err(|source| FreqError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    count_lines(BufReader::new(file), config, path)
}

/// The `n` most frequent words, ties broken alphabetically.
pub fn top_n(table: &ChainTable<u64>, n: usize) -> Vec<WordCount> {
    let mut counts: Vec<WordCount> = table
        .iter()
        .map(|(word, &count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect();
    counts.sort_unstable_by(WordCount::rank);
    counts.truncate(n);
    counts
}

/// One `rank. word count` line per entry, ranks starting at 1.
pub fn format_ranking(top: &[WordCount]) -> Vec<String> {
    top.iter()
        .enumerate()
        .map(|(rank, wc)| format!("{}. {} {}", rank + 1, wc.word, wc.count))
        .collect()
}

/// The `n` most frequent words of the file at `path`.
pub fn find_frequent_words(path: impl AsRef<Path>, n: usize) -> Result<Vec<String>, FreqError> {
    let path = path.as_ref();
    let table = count_file(path, TableConfig::default())?;
    let top = top_n(&table, n);
    info!(path = %path.display(), distinct = table.len(), returned = top.len(), "selected top words");
    Ok(top.into_iter().map(|wc| wc.word).collect())
}
