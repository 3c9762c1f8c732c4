//! # Simplex Noise
//!
//! Seeded 2D simplex noise, the smooth source behind the height field.
//!
//! ## Determinism Guarantee
//!
//! The permutation table is shuffled by a `ChaCha8Rng` seeded from the
//! `WorldSeed`, so the same seed yields the same table, and the same
//! samples, on every platform.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::seed::WorldSeed;

/// Eight unit-ish gradient directions for 2D simplex.
const GRADIENTS: [[f64; 2]; 8] = [
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.707_106_781, 0.707_106_781],
    [-0.707_106_781, 0.707_106_781],
    [0.707_106_781, -0.707_106_781],
    [-0.707_106_781, -0.707_106_781],
];

/// 2D Simplex noise generator.
///
/// Produces smooth, continuous values in `[-1, 1]`.
///
/// # Example
///
/// ```rust
/// use sylvan_procedural::{SimplexNoise, WorldSeed};
///
/// let noise = SimplexNoise::new(WorldSeed::new(42));
/// let value = noise.sample(100.5, 7.0);
/// assert!((-1.0..=1.0).contains(&value));
/// ```
#[derive(Clone)]
pub struct SimplexNoise {
    /// 256-entry permutation, doubled so lookups never wrap.
    perm: [u8; 512],
}

impl SimplexNoise {
    /// Skewing factor for 2D simplex grid: (sqrt(3) - 1) / 2.
    const F2: f64 = 0.366_025_403_784_438_6;
    /// Unskewing factor for 2D simplex grid: (3 - sqrt(3)) / 6.
    const G2: f64 = 0.211_324_865_405_187_1;
    /// Output scale mapping corner sums onto `[-1, 1]`.
    const SCALE: f64 = 70.0;

    /// Creates a new noise generator from a seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed.value());
        table.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    #[inline]
    fn hash(&self, i: i64, j: i64) -> usize {
        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        usize::from(self.perm[ii + usize::from(self.perm[jj])])
    }

    /// Samples 2D simplex noise. Output lies in `[-1, 1]`.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let skew = (x + y) * Self::F2;
        let i = (x + skew).floor();
        let j = (y + skew).floor();

        let unskew = (i + j) * Self::G2;
        let x0 = x - (i - unskew);
        let y0 = y - (j - unskew);

        // Lower or upper triangle of the skewed cell.
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + Self::G2;
        let y1 = y0 - f64::from(j1) + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        #[allow(clippy::cast_possible_truncation)]
        let (ci, cj) = (i as i64, j as i64);

        let n0 = corner(x0, y0, self.hash(ci, cj));
        let n1 = corner(
            x1,
            y1,
            self.hash(ci.wrapping_add(i64::from(i1)), cj.wrapping_add(i64::from(j1))),
        );
        let n2 = corner(x2, y2, self.hash(ci.wrapping_add(1), cj.wrapping_add(1)));

        (Self::SCALE * (n0 + n1 + n2)).clamp(-1.0, 1.0)
    }

    /// Fractal (octaved) noise, normalized back to `[-1, 1]`.
    ///
    /// * `octaves` - number of layers (at least one is always sampled)
    /// * `persistence` - amplitude decay per octave
    /// * `lacunarity` - frequency growth per octave
    #[must_use]
    pub fn fbm(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut norm = 0.0;

        for _ in 0..octaves.max(1) {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            norm += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        total / norm
    }
}

/// Contribution of one simplex corner.
#[inline]
fn corner(x: f64, y: f64, hash: usize) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t <= 0.0 {
        return 0.0;
    }
    let [gx, gy] = GRADIENTS[hash & 7];
    let t2 = t * t;
    t2 * t2 * (gx * x + gy * y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let noise1 = SimplexNoise::new(WorldSeed::new(12345));
        let noise2 = SimplexNoise::new(WorldSeed::new(12345));

        for i in 0..100 {
            let x = f64::from(i) * 0.1;
            let y = f64::from(i) * 0.17;
            assert_eq!(
                noise1.sample(x, y).to_bits(),
                noise2.sample(x, y).to_bits(),
                "Noise should be deterministic"
            );
        }
    }

    #[test]
    fn test_different_seeds_different_results() {
        let noise1 = SimplexNoise::new(WorldSeed::new(1));
        let noise2 = SimplexNoise::new(WorldSeed::new(2));

        let differs = (0..50).any(|i| {
            let x = f64::from(i) * 0.37 + 0.11;
            noise1.sample(x, 7.0) != noise2.sample(x, 7.0)
        });
        assert!(differs, "Different seeds should produce different results");
    }

    #[test]
    fn test_range() {
        let noise = SimplexNoise::new(WorldSeed::new(42));

        for i in 0..10_000 {
            let x = f64::from(i) * 0.1 - 500.0;
            let y = f64::from(i) * 0.13 - 650.0;
            let value = noise.sample(x, y);
            assert!((-1.0..=1.0).contains(&value), "Value {value} out of range at ({x}, {y})");
        }
    }

    #[test]
    fn test_continuity() {
        let noise = SimplexNoise::new(WorldSeed::new(42));
        let delta = 0.001;

        for i in 0..200 {
            let x = f64::from(i) * 0.731 - 40.0;
            let diff = (noise.sample(x, 7.0) - noise.sample(x + delta, 7.0)).abs();
            assert!(diff < 0.02, "Noise should be continuous at {x}: diff = {diff}");
        }
    }

    #[test]
    fn test_fbm_range() {
        let noise = SimplexNoise::new(WorldSeed::new(42));

        for i in 0..1000 {
            let x = f64::from(i) * 0.53 - 250.0;
            let value = noise.fbm(x, 7.0, 4, 0.5, 2.0);
            assert!((-1.0..=1.0).contains(&value), "fbm value {value} out of range");
        }
    }

    #[test]
    fn test_fbm_zero_octaves_samples_once() {
        let noise = SimplexNoise::new(WorldSeed::new(9));
        assert_eq!(noise.fbm(3.3, 7.0, 0, 0.5, 2.0), noise.sample(3.3, 7.0));
    }

    #[test]
    fn test_huge_coordinates_are_finite() {
        let noise = SimplexNoise::new(WorldSeed::new(3));
        for x in [1e12, -1e12, 1e30, -1e30] {
            assert!(noise.sample(x, 7.0).is_finite());
        }
    }
}
