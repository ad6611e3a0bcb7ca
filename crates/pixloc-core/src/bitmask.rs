//! Bitmask alphabet: rendered grid rows and caller-supplied needles.
//!
//! `*` marks a pixel matching the configured color, `_` any other pixel.

use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;

pub const MATCH: char = '*';
pub const MISS: char = '_';

/// One grid row rendered in the bitmask alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmaskLine(String);

impl BitmaskLine {
    pub fn from_matches(matches: impl IntoIterator<Item = bool>) -> Self {
        Self(
            matches
                .into_iter()
                .map(|m| if m { MATCH } else { MISS })
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BitmaskLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Needle for the 2D search: rows top to bottom, all the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmaskPattern {
    rows: Vec<String>,
}

impl BitmaskPattern {
    pub fn new<I, S>(rows: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<String> = rows.into_iter().map(Into::into).collect();
        let Some(first) = rows.first() else {
            return Err(PatternError::Empty);
        };
        let width = first.len();

        for (row, line) in rows.iter().enumerate() {
            if line.is_empty() {
                return Err(PatternError::EmptyRow { row });
            }
            if let Some(ch) = line.chars().find(|c| *c != MATCH && *c != MISS) {
                return Err(PatternError::InvalidChar { row, ch });
            }
            if line.len() != width {
                return Err(PatternError::RaggedRow {
                    row,
                    expected: width,
                    actual: line.len(),
                });
            }
        }

        Ok(Self { rows })
    }

    /// Needle reproducing the given rendered rows.
    pub fn from_lines(lines: &[BitmaskLine]) -> Result<Self, PatternError> {
        Self::new(lines.iter().map(|l| l.as_str().to_string()))
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> &str {
        &self.rows[index]
    }
}

impl FromStr for BitmaskPattern {
    type Err = PatternError;

    /// Parses comma-separated rows. Whitespace around rows is ignored, so
    /// the multi-line output of a bitmask trace parses back as-is.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(PatternError::Empty);
        }
        Self::new(s.split(',').map(str::trim))
    }
}

impl fmt::Display for BitmaskPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rows.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_from_matches() {
        let line = BitmaskLine::from_matches([true, false, false, true]);
        assert_eq!(line.as_str(), "*__*");
        assert_eq!(line.len(), 4);
        assert_eq!(line.to_string(), "*__*");
    }

    #[test]
    fn test_parse_pattern() {
        let p: BitmaskPattern = "*__,**_,***,**_,*__".parse().unwrap();
        assert_eq!(p.width(), 3);
        assert_eq!(p.height(), 5);
        assert_eq!(p.row(2), "***");
        assert_eq!(p.to_string(), "*__,**_,***,**_,*__");
    }

    #[test]
    fn test_parse_trace_output() {
        let p: BitmaskPattern = "_*,\n**,\n*_\n".parse().unwrap();
        assert_eq!(p.height(), 3);
        assert_eq!(p.to_string(), "_*,**,*_");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<BitmaskPattern>(), Err(PatternError::Empty));
        assert_eq!(
            "**,,**".parse::<BitmaskPattern>(),
            Err(PatternError::EmptyRow { row: 1 })
        );
        assert_eq!(
            "*x".parse::<BitmaskPattern>(),
            Err(PatternError::InvalidChar { row: 0, ch: 'x' })
        );
        assert_eq!(
            "**,*".parse::<BitmaskPattern>(),
            Err(PatternError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_empty_rows_list() {
        assert_eq!(
            BitmaskPattern::new(Vec::<String>::new()),
            Err(PatternError::Empty)
        );
    }
}
