//! # Random Input Generation
//!
//! Seeded generators for both puzzle formats. The output is text in exactly
//! the format the parsers accept, so it can be fed to the binaries or used to
//! drive invariant tests.

use crate::patrol::DIRS;
use itertools::Itertools;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Checks that `density` is a usable obstacle probability in `0.0..=1.0`.
pub fn check_density(density: f64) -> anyhow::Result<f64> {
    if !density.is_finite() || !(0.0..=1.0).contains(&density) {
        anyhow::bail!("density must be within 0..=1, got {}", density);
    }
    Ok(density)
}

/// Generates a random lab map.
///
/// # Arguments
/// * `rows`, `cols` - Size of the grid. Both must be at least 1.
/// * `density` - Probability that a cell is an obstacle. Values outside
///   `0.0..=1.0` are clamped; NaN counts as no obstacles.
/// * `seed` - Seed for the random number generator for reproducibility.
///
/// # Returns
/// Newline-separated rows over `.#^>v<` with exactly one guard, placed on a
/// cell that is not an obstacle and facing a random direction.
pub fn generate_lab(rows: usize, cols: usize, density: f64, seed: u64) -> String {
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(seed);
    let density = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    };
    let mut grid = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| if rng.random_bool(density) { '#' } else { '.' })
                .collect_vec()
        })
        .collect_vec();

    // The guard overwrites whatever was under it.
    let row = rng.random_range(0..rows);
    let col = rng.random_range(0..cols);
    let dir = *DIRS.choose(&mut rng).unwrap_or(&DIRS[0]);
    grid[row][col] = dir.glyph();

    grid.iter().map(|r| r.iter().collect::<String>()).join("\n")
}

/// Generates a random disk map of `len` digits.
///
/// File lengths are drawn from 1..=9 and gap lengths from 0..=9, so every file
/// owns at least one block.
pub fn generate_disk_map(len: usize, seed: u64) -> String {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..len)
        .map(|i| {
            let d: u8 = if i % 2 == 0 {
                rng.random_range(1..=9)
            } else {
                rng.random_range(0..=9)
            };
            (b'0' + d) as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::DiskMap;
    use crate::patrol::Lab;

    #[test]
    fn test_generate_lab() {
        let input = generate_lab(8, 11, 0.2, 123);
        let lab = Lab::parse(&input).expect("generated lab should parse");
        assert_eq!((lab.rows(), lab.cols()), (8, 11));
        assert_eq!(input, generate_lab(8, 11, 0.2, 123));
    }

    #[test]
    fn test_generate_lab_single_cell() {
        let input = generate_lab(1, 1, 1.0, 7);
        assert!(Lab::parse(&input).is_ok(), "input: {:?}", input);
    }

    #[test]
    fn test_check_density() {
        assert_eq!(check_density(0.25).unwrap(), 0.25);
        assert!(check_density(f64::NAN).is_err());
        assert!(check_density(f64::INFINITY).is_err());
        assert!(check_density(1.5).is_err());
        assert!(Lab::parse(&generate_lab(4, 4, f64::NAN, 1)).is_ok());
    }

    #[test]
    fn test_generate_disk_map() {
        let input = generate_disk_map(25, 123);
        assert_eq!(input.len(), 25);
        let map = DiskMap::parse(&input).expect("generated map should parse");
        assert_eq!(map.file_count(), 13);
        for (i, &l) in map.lengths().iter().enumerate() {
            if i % 2 == 0 {
                assert!(l >= 1, "file {} is empty", i / 2);
            }
        }
    }
}
