//! Spatial indexing for fast position-to-zone lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use glam::Vec3;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// Wrapper around a KD-tree of zone sites
///
/// Provides O(log n) nearest-site lookups to convert world positions into
/// zone IDs. By the Voronoi property the zone with the nearest site is the
/// zone whose cell contains the position.
///
/// # Performance
///
/// - Construction: O(n log n), negligible for typical zone counts
/// - Query: O(log n)
/// - Memory: ~24 bytes per zone
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 3, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build a spatial index from zone sites
    ///
    /// This is called once during world generation.
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_worldgen::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let sites = vec![
    ///     Vec3::new(10.0, 0.0, 0.0),
    ///     Vec3::new(0.0, 0.0, 10.0),
    ///     Vec3::new(-10.0, 0.0, 0.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&sites);
    /// let zone_id = index.find_nearest(Vec3::new(9.0, 0.0, 1.0));
    /// assert_eq!(zone_id, 0); // Closest to first site
    /// # }
    /// ```
    pub fn new(sites: &[Vec3]) -> Self {
        // Convert Vec3 to [f32; 3] array format for kiddo
        let points: Vec<[f32; 3]> = sites.iter().map(|s| [s.x, s.y, s.z]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the zone with the site nearest to a position
    ///
    /// # Example
    ///
    /// ```
    /// # use voronoi_worldgen::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let sites = vec![Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0)];
    /// # let index = SpatialIndex::new(&sites);
    /// let zone_id = index.find_nearest(Vec3::new(8.0, 0.0, 0.5));
    /// // zone_id is the index of the closest site
    /// # }
    /// ```
    pub fn find_nearest(&self, position: Vec3) -> usize {
        let query = [position.x, position.y, position.z];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let sites = vec![
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(-10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -10.0),
        ];

        let index = SpatialIndex::new(&sites);

        assert_eq!(index.find_nearest(Vec3::new(9.0, 0.0, 1.0)), 0);
        assert_eq!(index.find_nearest(Vec3::new(0.5, 0.0, 9.5)), 1);
        assert_eq!(index.find_nearest(Vec3::new(-8.0, 0.0, 0.0)), 2);
        assert_eq!(index.find_nearest(Vec3::new(1.0, 0.0, -9.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let sites = vec![Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0)];

        let index = SpatialIndex::new(&sites);

        assert_eq!(index.find_nearest(sites[0]), 0);
        assert_eq!(index.find_nearest(sites[1]), 1);
    }
}
