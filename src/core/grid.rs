//! Grid: a validated N×N matrix of ASCII symbols.
//!
//! A `Grid` can only be built through [`Grid::new`], which rejects empty and
//! non-square input. Everything downstream (detector, ledger, stores) relies on
//! that and never re-checks the shape.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Square DNA matrix stored row-major.
///
/// The row-major concatenation doubles as the canonical key used for
/// deduplication, so it is kept as a `String` rather than rebuilt per lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Grid {
    size: usize,
    sequence: String,
}

impl Grid {
    pub fn new<I, S>(rows: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<S> = rows.into_iter().collect();
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }

        let mut sequence = String::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if !line.is_ascii() {
                return Err(GridError::NonAscii { row });
            }
            if line.len() != size {
                return Err(GridError::NotSquare { row, expected: size, actual: line.len() });
            }
            sequence.push_str(line);
        }

        Ok(Self { size, sequence })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize { self.size }

    /// Row-major concatenation of every symbol. Unique identity of the grid.
    pub fn canonical_key(&self) -> &str { &self.sequence }

    /// Symbol at `(row, col)`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> u8 {
        self.sequence.as_bytes()[row * self.size + col]
    }

    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.size;
        &self.sequence.as_bytes()[start..start + self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.size).map(move |r| &self.sequence[r * self.size..(r + 1) * self.size])
    }
}

impl TryFrom<Vec<String>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Grid::new(rows)
    }
}

impl From<Grid> for Vec<String> {
    fn from(grid: Grid) -> Self {
        grid.rows().map(str::to_owned).collect()
    }
}
