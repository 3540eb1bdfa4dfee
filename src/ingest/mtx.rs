//! Matrix Market coordinate reader
//!
//! Reads the banner, the `rows columns entries` size line and the coordinate
//! entries of an adjacency matrix. Indices in the file are 1-based; the edge
//! list returned here is 0-based.

use crate::error::FormatError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Decoded contents of a Matrix Market file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixMarket {
    /// Declared dimension (rows == columns)
    pub size: usize,
    /// Symmetry declared by the banner
    pub symmetry: Symmetry,
    /// 0-based `(row, column)` pairs, in file order
    pub entries: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    Symmetric,
    General,
}

/// Upper bound on the entry buffer reserved from the size line
const MAX_PRESIZED_ENTRIES: usize = 1 << 20;

/// Read a Matrix Market file from disk
pub fn read_matrix_market(path: impl AsRef<Path>) -> Result<MatrixMarket, FormatError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Reading Matrix Market file {:?}", path);
    parse_matrix_market(BufReader::new(file)).map_err(|e| match e {
        FormatError::Io { source, .. } => FormatError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse Matrix Market text from any buffered reader
pub fn parse_matrix_market<R: BufRead>(reader: R) -> Result<MatrixMarket, FormatError> {
    let mut lines = reader.lines().enumerate().map(|(i, line)| {
        line.map(|l| (i + 1, l)).map_err(|source| FormatError::Io {
            path: Default::default(),
            source,
        })
    });

    let symmetry = match lines.next().transpose()? {
        Some((_, banner)) => parse_banner(&banner)?,
        None => return Err(FormatError::MissingBanner),
    };

    // Skip comments and blank lines up to the size line
    let (size_line, size_content) = loop {
        match lines.next().transpose()? {
            Some((n, line)) => {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('%') {
                    continue;
                }
                break (n, line);
            }
            None => {
                return Err(FormatError::MalformedSize {
                    line: 0,
                    content: String::new(),
                })
            }
        }
    };

    let dims: Vec<usize> = size_content
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| FormatError::MalformedSize {
            line: size_line,
            content: size_content.clone(),
        })?;
    let (rows, columns, expected) = match dims.as_slice() {
        [r, c, nz] => (*r, *c, *nz),
        _ => {
            return Err(FormatError::MalformedSize {
                line: size_line,
                content: size_content,
            })
        }
    };
    if rows != columns {
        return Err(FormatError::NotSquare { rows, columns });
    }

    // The header's count is unverified until the body has been read
    let mut entries = Vec::with_capacity(expected.min(MAX_PRESIZED_ENTRIES));
    for item in lines {
        let (n, line) = item?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        let (row, column) = parse_entry(trimmed).ok_or_else(|| FormatError::MalformedEntry {
            line: n,
            content: line.clone(),
        })?;
        if row == 0 || column == 0 || row > rows || column > rows {
            return Err(FormatError::EntryOutOfRange {
                line: n,
                row,
                column,
                size: rows,
            });
        }
        entries.push((row - 1, column - 1));
    }

    if entries.len() != expected {
        return Err(FormatError::EntryCountMismatch {
            expected,
            found: entries.len(),
        });
    }

    Ok(MatrixMarket {
        size: rows,
        symmetry,
        entries,
    })
}

fn parse_banner(line: &str) -> Result<Symmetry, FormatError> {
    let mut tokens = line.split_whitespace();
    if !tokens
        .next()
        .map_or(false, |t| t.eq_ignore_ascii_case("%%MatrixMarket"))
    {
        return Err(FormatError::MissingBanner);
    }

    let fields: Vec<String> = tokens.map(str::to_ascii_lowercase).collect();
    let unsupported = || FormatError::UnsupportedBanner(line.trim().to_string());
    match fields.as_slice() {
        [object, format, field, symmetry]
            if object == "matrix"
                && format == "coordinate"
                && matches!(field.as_str(), "pattern" | "integer" | "real") =>
        {
            match symmetry.as_str() {
                "symmetric" => Ok(Symmetry::Symmetric),
                "general" => Ok(Symmetry::General),
                _ => Err(unsupported()),
            }
        }
        _ => Err(unsupported()),
    }
}

/// `row column [value]`; the value column is ignored for adjacency input.
fn parse_entry(line: &str) -> Option<(usize, usize)> {
    let mut tokens = line.split_whitespace();
    let row = tokens.next()?.parse().ok()?;
    let column = tokens.next()?.parse().ok()?;
    Some((row, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<MatrixMarket, FormatError> {
        parse_matrix_market(text.as_bytes())
    }

    #[test]
    fn test_parse_pattern_symmetric() {
        let mm = parse(
            "%%MatrixMarket matrix coordinate pattern symmetric\n\
             % a triangle\n\
             3 3 3\n\
             2 1\n\
             3 1\n\
             3 2\n",
        )
        .unwrap();

        assert_eq!(mm.size, 3);
        assert_eq!(mm.symmetry, Symmetry::Symmetric);
        assert_eq!(mm.entries, vec![(1, 0), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_value_column_is_ignored() {
        let mm = parse("%%MatrixMarket matrix coordinate real general\n2 2 1\n1 2 0.5\n").unwrap();
        assert_eq!(mm.symmetry, Symmetry::General);
        assert_eq!(mm.entries, vec![(0, 1)]);
    }

    #[test]
    fn test_not_square() {
        let err = parse("%%MatrixMarket matrix coordinate pattern symmetric\n3 4 1\n1 2\n").unwrap_err();
        assert!(matches!(err, FormatError::NotSquare { rows: 3, columns: 4 }));
    }

    #[test]
    fn test_missing_banner() {
        assert!(matches!(parse("3 3 0\n"), Err(FormatError::MissingBanner)));
        assert!(matches!(parse(""), Err(FormatError::MissingBanner)));
    }

    #[test]
    fn test_unsupported_banner() {
        let err = parse("%%MatrixMarket matrix array real general\n2 2\n").unwrap_err();
        assert!(matches!(err, FormatError::UnsupportedBanner(_)));
    }

    #[test]
    fn test_malformed_size_line() {
        let err = parse("%%MatrixMarket matrix coordinate pattern symmetric\n3 x 1\n").unwrap_err();
        assert!(matches!(err, FormatError::MalformedSize { line: 2, .. }));
    }

    #[test]
    fn test_entry_out_of_range() {
        let err = parse("%%MatrixMarket matrix coordinate pattern symmetric\n2 2 1\n3 1\n").unwrap_err();
        assert!(matches!(err, FormatError::EntryOutOfRange { line: 3, row: 3, .. }));
    }

    #[test]
    fn test_malformed_entry() {
        let err = parse("%%MatrixMarket matrix coordinate pattern symmetric\n2 2 1\n1\n").unwrap_err();
        assert!(matches!(err, FormatError::MalformedEntry { line: 3, .. }));
    }

    #[test]
    fn test_oversized_entry_count() {
        let err = parse(
            "%%MatrixMarket matrix coordinate pattern symmetric\n\
             3 3 18446744073709551615\n\
             1 2\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FormatError::EntryCountMismatch {
                expected: usize::MAX,
                found: 1
            }
        ));
    }

    #[test]
    fn test_entry_count_mismatch() {
        let err = parse("%%MatrixMarket matrix coordinate pattern symmetric\n3 3 2\n2 1\n").unwrap_err();
        assert!(matches!(
            err,
            FormatError::EntryCountMismatch { expected: 2, found: 1 }
        ));
    }
}
