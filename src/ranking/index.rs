//! In-memory rank lookup built from a snapshot file.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::RANK_NOT_FOUND;
use crate::error_handling::RankError;

/// Domain → rank mapping loaded from a `rank,domain` snapshot.
///
/// Built once and immutable afterwards. Domains are opaque keys: no
/// normalization is applied on load or lookup.
#[derive(Debug, Clone, Default)]
pub struct RankIndex {
    ranks: HashMap<String, i64>,
}

impl RankIndex {
    /// Loads a snapshot file.
    ///
    /// Every line must be `rank,domain` with a positive integer rank. A single
    /// malformed line fails the whole load. When a domain appears twice the
    /// later line wins.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::Io`] if the file cannot be read,
    /// [`RankError::MalformedRow`] for a line without exactly two fields, and
    /// [`RankError::InvalidRank`] for a rank that is not a positive integer.
    pub async fn load(path: &Path) -> Result<Self, RankError> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| RankError::io("Failed to open snapshot", path, e))?;
        let mut lines = BufReader::new(file).lines();

        let mut builder = IndexBuilder::default();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| RankError::io("Failed to read snapshot", path, e))?
        {
            builder.push(&line)?;
        }

        let index = builder.finish();
        log::info!(
            "Loaded {} ranked domains from {}",
            index.len(),
            path.display()
        );
        Ok(index)
    }

    /// Parses snapshot content from any buffered reader, with the same rules
    /// as [`RankIndex::load`].
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, RankError> {
        let mut builder = IndexBuilder::default();
        for line in reader.lines() {
            let line =
                line.map_err(|e| RankError::io("Failed to read snapshot", "<reader>", e))?;
            builder.push(&line)?;
        }
        Ok(builder.finish())
    }

    /// Rank of `domain`, or `-1` if it is not on the list.
    pub fn rank(&self, domain: &str) -> i64 {
        self.ranks.get(domain).copied().unwrap_or(RANK_NOT_FOUND)
    }

    /// Number of distinct domains.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether the snapshot held no rows.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[derive(Default)]
struct IndexBuilder {
    ranks: HashMap<String, i64>,
    line_number: usize,
    duplicates: usize,
}

impl IndexBuilder {
    fn push(&mut self, line: &str) -> Result<(), RankError> {
        self.line_number += 1;
        let (rank, domain) = parse_row(self.line_number, line)?;
        if self.ranks.insert(domain.to_string(), rank).is_some() {
            self.duplicates += 1;
        }
        Ok(())
    }

    fn finish(self) -> RankIndex {
        if self.duplicates > 0 {
            log::debug!(
                "Ranking list contained {} duplicate domain(s); last occurrence kept",
                self.duplicates
            );
        }
        RankIndex { ranks: self.ranks }
    }
}

/// Splits one `rank,domain` row.
fn parse_row(line_number: usize, line: &str) -> Result<(i64, &str), RankError> {
    let mut fields = line.split(',');
    let (Some(rank_field), Some(domain), None) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(RankError::MalformedRow {
            line_number,
            line: line.to_string(),
        });
    };

    let rank = match rank_field.parse::<i64>() {
        Ok(rank) if rank > 0 => rank,
        _ => {
            return Err(RankError::InvalidRank {
                line_number,
                value: rank_field.to_string(),
            })
        }
    };

    Ok((rank, domain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn parse(content: &str) -> Result<RankIndex, RankError> {
        RankIndex::parse(Cursor::new(content))
    }

    #[test]
    fn test_rank_lookup_and_sentinel() {
        let index = parse("1,example.com\n2,example.org\n").unwrap();
        assert_eq!(index.rank("example.com"), 1);
        assert_eq!(index.rank("example.org"), 2);
        assert_eq!(index.rank("missing.test"), -1);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let index = parse("1,google.com\r\n2,facebook.com\r\n").unwrap();
        assert_eq!(index.rank("google.com"), 1);
        assert_eq!(index.rank("facebook.com"), 2);
    }

    #[test]
    fn test_domains_are_opaque_keys() {
        let index = parse("1,Example.com\n").unwrap();
        assert_eq!(index.rank("Example.com"), 1);
        assert_eq!(index.rank("example.com"), -1);
    }

    #[test]
    fn test_duplicate_domain_last_line_wins() {
        let index = parse("1,example.com\n5,example.com\n").unwrap();
        assert_eq!(index.rank("example.com"), 5);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_empty_snapshot() {
        let index = parse("").unwrap();
        assert!(index.is_empty());
        assert_eq!(index.rank("example.com"), -1);
    }

    #[test]
    fn test_three_fields_rejected() {
        let err = parse("1,example.com\n2,example.org,extra\n").unwrap_err();
        match err {
            RankError::MalformedRow { line_number, line } => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "2,example.org,extra");
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_single_field_rejected() {
        assert!(matches!(
            parse("example.com\n"),
            Err(RankError::MalformedRow { line_number: 1, .. })
        ));
    }

    #[test]
    fn test_blank_line_rejected() {
        assert!(matches!(
            parse("1,example.com\n\n2,example.org\n"),
            Err(RankError::MalformedRow { line_number: 2, .. })
        ));
    }

    #[test]
    fn test_non_integer_rank_rejected() {
        let err = parse("one,example.com\n").unwrap_err();
        match err {
            RankError::InvalidRank { line_number, value } => {
                assert_eq!(line_number, 1);
                assert_eq!(value, "one");
            }
            other => panic!("expected InvalidRank, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_and_negative_rank_rejected() {
        assert!(matches!(
            parse("0,example.com\n"),
            Err(RankError::InvalidRank { .. })
        ));
        assert!(matches!(
            parse("-3,example.com\n"),
            Err(RankError::InvalidRank { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("tranco-1700000000");
        std::fs::write(&path, "1,google.com\n2,facebook.com\n3,example.co.uk\n")
            .expect("Failed to write snapshot");

        let index = RankIndex::load(&path).await.unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.rank("example.co.uk"), 3);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("tranco-1");

        let err = RankIndex::load(&path).await.unwrap_err();
        assert!(matches!(err, RankError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_malformed_file_yields_no_index() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("tranco-1700000000");
        std::fs::write(&path, "1,google.com\nbroken\n").expect("Failed to write snapshot");

        assert!(RankIndex::load(&path).await.is_err());
    }
}
