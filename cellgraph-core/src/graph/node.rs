//! Graph Nodes
//!
//! This module defines what may be used as a node identifier in the
//! dependency graph.
//!
//! Nodes are opaque: the graph only needs equality, hashing and cloning.
//! The one extra requirement is validity. An identifier that does not name
//! anything (an empty cell name, for instance) is rejected at the operation
//! boundary before the graph is touched.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::GraphError;

/// An identifier that can participate in the dependency relation.
pub trait Node: Clone + Eq + Hash + fmt::Debug {
    /// Whether this value identifies a node at all.
    fn is_valid(&self) -> bool {
        true
    }
}

impl Node for String {
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl Node for Box<str> {
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl Node for Arc<str> {
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl Node for &'static str {
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl Node for u32 {}
impl Node for u64 {}
impl Node for usize {}

/// A spreadsheet cell coordinate, written in A1 notation.
///
/// `column` is zero-based (`A` is 0, `Z` is 25, `AA` is 26) and `row` is
/// the one-based row number as it appears in the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    column: u32,
    row: u32,
}

impl CellRef {
    /// Create a cell reference. Row 0 does not exist in A1 notation, so
    /// such a reference is constructible but not a valid node.
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Get the zero-based column index.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Get the one-based row number.
    pub fn row(&self) -> u32 {
        self.row
    }
}

impl Node for CellRef {
    fn is_valid(&self) -> bool {
        self.row > 0
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bijective base 26: A..Z, AA..AZ, BA..
        let mut letters = Vec::new();
        let mut n = self.column as u64 + 1;
        while n > 0 {
            let rem = ((n - 1) % 26) as u8;
            letters.push(b'A' + rem);
            n = (n - 1) / 26;
        }
        letters.reverse();
        for letter in letters {
            write!(f, "{}", letter as char)?;
        }
        write!(f, "{}", self.row)
    }
}

impl FromStr for CellRef {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() || digits.is_empty() {
            return Err(GraphError::invalid_input(format!("malformed cell name {s:?}")));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GraphError::invalid_input(format!("malformed cell name {s:?}")));
        }

        let mut column: u64 = 0;
        for c in letters.bytes() {
            let value = (c.to_ascii_uppercase() - b'A') as u64 + 1;
            column = column * 26 + value;
            if column > u32::MAX as u64 {
                return Err(GraphError::invalid_input(format!("column out of range in {s:?}")));
            }
        }

        let row: u32 = digits
            .parse()
            .map_err(|_| GraphError::invalid_input(format!("row out of range in {s:?}")))?;
        if row == 0 {
            return Err(GraphError::invalid_input(format!("row 0 in cell name {s:?}")));
        }

        Ok(Self {
            column: (column - 1) as u32,
            row,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_are_invalid() {
        assert!(!String::new().is_valid());
        assert!(!"".is_valid());
        assert!(!Arc::<str>::from("").is_valid());
        assert!("A1".to_string().is_valid());
        assert!(Box::<str>::from("x").is_valid());
    }

    #[test]
    fn integers_are_always_valid() {
        assert!(0u32.is_valid());
        assert!(u64::MAX.is_valid());
        assert!(7usize.is_valid());
    }

    #[test]
    fn parse_simple_cell_names() {
        let a1: CellRef = "A1".parse().unwrap();
        assert_eq!((a1.column(), a1.row()), (0, 1));

        let z9: CellRef = "z9".parse().unwrap();
        assert_eq!((z9.column(), z9.row()), (25, 9));

        let aa10: CellRef = "AA10".parse().unwrap();
        assert_eq!((aa10.column(), aa10.row()), (26, 10));
    }

    #[test]
    fn display_matches_parse() {
        for name in ["A1", "Z26", "AA1", "AZ300", "BA2", "ZZ99", "AAA1"] {
            let cell: CellRef = name.parse().unwrap();
            assert_eq!(cell.to_string(), name);
        }
    }

    #[test]
    fn malformed_cell_names_are_rejected() {
        for name in ["", "A", "12", "A0", "1A", "A1B", "A-1", "É1"] {
            let err = name.parse::<CellRef>().unwrap_err();
            assert!(matches!(err, GraphError::InvalidInput { .. }), "{name}");
        }
    }

    #[test]
    fn row_zero_is_not_a_valid_node() {
        assert!(!CellRef::new(0, 0).is_valid());
        assert!(CellRef::new(0, 1).is_valid());
    }
}
