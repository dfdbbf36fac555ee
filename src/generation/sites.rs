//! Site scattering for the world plane
//!
//! Scatters zone seed sites uniformly in the map square and adds four far
//! anchor sites that keep every real cell bounded.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Distance of the anchor sites from the origin, relative to the map
/// half-width
const ANCHOR_DISTANCE: f32 = 3.0;

/// Scatter `count` sites uniformly in `[-half_width, half_width]` on X and Z
///
/// The same seed always produces the same sites.
pub fn scatter_sites(count: usize, half_width: f32, seed: u32) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);

    (0..count)
        .map(|_| {
            let x = rng.gen_range(-half_width..half_width);
            let z = rng.gen_range(-half_width..half_width);
            Vec3::new(x, 0.0, z)
        })
        .collect()
}

/// Four anchor sites far outside the map square, one per axis direction
///
/// Without them the cells of sites near the map rim stay unbounded and
/// their borders never close into loops. The anchors' own cells are
/// discarded after clipping.
pub fn star_sites(half_width: f32) -> [Vec3; 4] {
    let reach = half_width * ANCHOR_DISTANCE;

    [
        Vec3::new(0.0, 0.0, reach),
        Vec3::new(0.0, 0.0, -reach),
        Vec3::new(reach, 0.0, 0.0),
        Vec3::new(-reach, 0.0, 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scatter_count() {
        let sites = scatter_sites(50, 200.0, 42);
        assert_eq!(sites.len(), 50);
    }

    #[test]
    fn test_scatter_deterministic() {
        let a = scatter_sites(20, 100.0, 7);
        let b = scatter_sites(20, 100.0, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scatter_seeds_differ() {
        let a = scatter_sites(20, 100.0, 1);
        let b = scatter_sites(20, 100.0, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_scatter_bounds() {
        let sites = scatter_sites(200, 50.0, 99);
        for site in &sites {
            assert!(site.x >= -50.0 && site.x < 50.0);
            assert!(site.z >= -50.0 && site.z < 50.0);
            assert_eq!(site.y, 0.0);
        }
    }

    #[test]
    fn test_scatter_empty() {
        assert!(scatter_sites(0, 100.0, 0).is_empty());
    }

    #[test]
    fn test_star_positions() {
        let stars = star_sites(10.0);
        assert_eq!(stars[0], Vec3::new(0.0, 0.0, 30.0));
        assert_eq!(stars[1], Vec3::new(0.0, 0.0, -30.0));
        assert_eq!(stars[2], Vec3::new(30.0, 0.0, 0.0));
        assert_eq!(stars[3], Vec3::new(-30.0, 0.0, 0.0));
    }
}
