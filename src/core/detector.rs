//! Pattern detector: is this grid a mutant?
//!
//! A grid is a mutant when it holds more than one run of four equal symbols.
//!
//! Counting is deliberately asymmetric:
//!
//! | Direction | Contribution |
//! |-----------|--------------|
//! | row       | at most 1 per row, however many runs it holds |
//! | column    | at most 1 per column |
//! | diagonal  | 1 per 4-cell window, overlapping windows on one line count separately |
//!
//! Rows and columns are scanned together by index, then every diagonal window
//! is visited from its top-left anchor. The scan stops as soon as the count
//! passes the threshold.

use super::grid::Grid;

/// Length of a qualifying run.
pub const RUN_LENGTH: usize = 4;

/// A grid is a mutant once the run count exceeds this.
const THRESHOLD: usize = 1;

/// Classify `grid`. Pure and deterministic.
pub fn is_mutant(grid: &Grid) -> bool {
    let n = grid.size();
    let mut count = 0;

    for i in 0..n {
        if has_run(grid.row(i).iter().copied()) {
            count += 1;
        }
        if has_run((0..n).map(|row| grid.at(row, i))) {
            count += 1;
        }
        if count > THRESHOLD {
            return true;
        }
    }

    if n < RUN_LENGTH {
        return false;
    }

    let last = n - RUN_LENGTH;
    for i in 0..=last {
        for j in 0..=last {
            if all_equal((0..RUN_LENGTH).map(|k| grid.at(i + k, j + k))) {
                count += 1;
            }
            if all_equal((0..RUN_LENGTH).map(|k| grid.at(i + k, j + RUN_LENGTH - 1 - k))) {
                count += 1;
            }
            if count > THRESHOLD {
                return true;
            }
        }
    }

    count > THRESHOLD
}

/// Does the line contain any run of `RUN_LENGTH` equal symbols?
fn has_run(line: impl Iterator<Item = u8>) -> bool {
    let mut prev = None;
    let mut streak = 0;
    for symbol in line {
        streak = if prev == Some(symbol) { streak + 1 } else { 1 };
        if streak == RUN_LENGTH {
            return true;
        }
        prev = Some(symbol);
    }
    false
}

fn all_equal(mut window: impl Iterator<Item = u8>) -> bool {
    match window.next() {
        Some(first) => window.all(|s| s == first),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::new(rows).unwrap()
    }

    /// N×N grid with no run in any direction: cell (r, c) = ALPHABET[(c + 2r) % 4].
    /// Rows step by 1, columns by 2, main diagonals by 3, anti-diagonals by 1.
    fn runless(n: usize, alphabet: &[u8; 4]) -> Vec<String> {
        (0..n)
            .map(|r| (0..n).map(|c| alphabet[(c + 2 * r) % 4] as char).collect())
            .collect()
    }

    #[test]
    fn horizontal_mutant() {
        assert!(is_mutant(&grid(&["AAAA", "CAGT", "TTTT", "AGAG"])));
    }

    #[test]
    fn vertical_mutant() {
        assert!(is_mutant(&grid(&["ATGC", "ATGC", "ATGC", "ATGC"])));
    }

    #[test]
    fn mixed_mutant() {
        assert!(is_mutant(&grid(&["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"])));
    }

    #[test]
    fn human() {
        assert!(!is_mutant(&grid(&["ACGCGA", "CTGTGC", "TTATGT", "AGAAGG", "CCTATA", "TCACTG"])));
    }

    #[test]
    fn runless_base_is_human() {
        for n in 1..10 {
            assert!(!is_mutant(&Grid::new(runless(n, b"ACGT")).unwrap()), "n = {n}");
        }
    }

    #[test]
    fn small_grids_are_never_mutant() {
        assert!(!is_mutant(&grid(&["A"])));
        assert!(!is_mutant(&grid(&["AA", "AA"])));
        assert!(!is_mutant(&grid(&["AAA", "AAA", "AAA"])));
    }

    #[test]
    fn one_row_counts_once_even_with_two_runs() {
        let mut rows = runless(8, b"ACGT");
        rows[0] = "AAAATTTT".into();
        assert!(!is_mutant(&Grid::new(rows.clone()).unwrap()));

        rows[0] = "AAAAAAAA".into();
        assert!(!is_mutant(&Grid::new(rows).unwrap()));
    }

    #[test]
    fn one_column_counts_once_even_with_two_runs() {
        let rows: Vec<String> = runless(8, b"ACGT")
            .into_iter()
            .enumerate()
            .map(|(r, row)| {
                let fill = if r < 4 { 'A' } else { 'T' };
                std::iter::once(fill).chain(row.chars().skip(1)).collect()
            })
            .collect();
        assert!(!is_mutant(&Grid::new(rows).unwrap()));
    }

    #[test]
    fn overlapping_diagonal_windows_each_count() {
        let mut rows: Vec<Vec<u8>> = runless(5, b"CGTN").into_iter().map(String::into_bytes).collect();
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = b'A';
        }
        let rows: Vec<String> = rows.into_iter().map(|r| String::from_utf8(r).unwrap()).collect();
        assert!(is_mutant(&Grid::new(rows).unwrap()));
    }

    #[test]
    fn single_diagonal_window_is_not_enough() {
        assert!(!is_mutant(&grid(&["ACGT", "GATC", "TCAG", "CGTA"])));
    }

    #[test]
    fn anti_diagonal_and_row() {
        assert!(!is_mutant(&grid(&["CCCC", "GTAG", "TAGC", "AGTC"])));
        assert!(!is_mutant(&grid(&["CCCA", "GTAG", "TAGC", "AGTT"])));
        assert!(is_mutant(&grid(&["GTCA", "CGAT", "TACG", "AAAA"])));
    }

    #[test]
    fn deterministic() {
        let g = grid(&["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"]);
        assert_eq!(is_mutant(&g), is_mutant(&g));
    }

    #[test]
    fn has_run_finds_runs_anywhere() {
        assert!(has_run(b"AAAA".iter().copied()));
        assert!(has_run(b"CTTTTG".iter().copied()));
        assert!(!has_run(b"AAATAAA".iter().copied()));
        assert!(!has_run(std::iter::empty()));
    }
}
