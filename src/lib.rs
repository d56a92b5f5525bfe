// # Guard patrol and disk compaction solvers
//
// This crate holds the solvers for two independent grid/array puzzles: a guard
// patrolling a lab grid (and the obstacles that would trap it in a loop), and a
// disk whose file blocks are compacted into free space under two policies.
//
// The engines live in `patrol` and `disk` and are pure functions from parsed
// input to an answer. Binaries under `src/bin` only read input, time the run and
// print results.

use anyhow::Context;

/// Typed parse errors for both input formats.
pub mod error;

/// Registry of the puzzles this crate can solve.
pub mod puzzles;

/// The `Puzzle` trait shared by both engines, and a loader that picks one by name.
pub mod solver;

/// Guard patrol simulation and loop-causing obstacle search.
pub mod patrol;

/// Disk block sequence and its two compaction strategies.
pub mod disk;

/// SVG rendering of a patrol. Enabled with the `svg` feature.
#[cfg(feature = "svg")]
pub mod svg;

/// Tools for generating puzzle inputs.
pub mod mapgen {
    /// Seeded random labs and disk maps.
    pub mod random;
}

/// Raises a running maximum in place.
pub trait SetMax {
    /// Replaces `self` with `v` when `v` is larger; returns whether it did.
    fn setmax(&mut self, v: Self) -> bool;
}
impl<T: PartialOrd> SetMax for T {
    fn setmax(&mut self, v: T) -> bool {
        *self < v && {
            *self = v;
            true
        }
    }
}

/// `vec!` that nests: `mat![init; rows; cols]` builds a row-major grid.
///
/// ```
/// use aoc2024::mat;
/// let mut blocked = mat![false; 2; 3];
/// blocked[1][2] = true;
/// assert_eq!(blocked, vec![vec![false; 3], vec![false, false, true]]);
/// assert_eq!(mat!['.', '#'], vec!['.', '#']);
/// ```
#[macro_export]
macro_rules! mat {
    ($($e:expr),*) => { vec![$($e),*] };
    ($($e:expr,)*) => { vec![$($e),*] };
    ($e:expr; $d:expr) => { vec![$e; $d] };
    ($e:expr; $d:expr $(; $ds:expr)+) => { vec![mat![$e $(; $ds)*]; $d] };
}

/// Reads a whole puzzle input.
///
/// `-` reads stdin; anything else is opened as a file path. A missing or
/// unreadable file is reported with the path in the error context.
pub fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        use std::io::Read as _;
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(path).with_context(|| format!("No such input: {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setmax_reports_updates() {
        let mut best = 3;
        assert!(best.setmax(5));
        assert!(!best.setmax(4));
        assert!(!best.setmax(5));
        assert_eq!(best, 5);
    }

    #[test]
    fn read_input_missing_file_names_path() {
        let err = read_input("definitely/not/here.txt").unwrap_err();
        assert!(format!("{:#}", err).contains("definitely/not/here.txt"));
    }
}
