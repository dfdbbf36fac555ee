//! Voronoi cell structure
//!
//! The geometric output of generation: one site plus the clipped border
//! polygon around it.

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geom;

/// A clipped Voronoi cell on the world plane
///
/// Each cell pairs an input site with the ordered border polygon that
/// encloses everything nearer to that site than to any other. Borders run
/// counter-clockwise viewed from above and close implicitly; the first
/// vertex is not repeated at the end.
///
/// # Design Notes
///
/// Cells are NOT serialized individually. They are regenerated from
/// WorldConfig when loading a save file, ensuring consistency and compact
/// save files.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// The site this cell surrounds
    ///
    /// Sites are the scattered seed points, not polygon centers; the two
    /// differ whenever clipping cut into the cell.
    pub site: Vec3,

    /// Border polygon vertices
    ///
    /// These are circumcenters of the Delaunay triangles around the site,
    /// plus crossing points where clipping met the map rim. Fewer than 3
    /// vertices means the cell degenerated, which happens to the far
    /// anchor sites and to cells entirely outside the map square.
    pub border: Vec<Vec3>,
}

impl VoronoiCell {
    /// Create a cell from a site and its clipped border
    ///
    /// This is typically called during world generation, not by user code.
    pub fn new(site: Vec3, border: Vec<Vec3>) -> Self {
        Self { site, border }
    }

    /// Check that the border still encloses area
    ///
    /// Only valid cells become zones; the rest are clipping residue.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.border.len() >= 3
    }

    /// Number of border vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.border.len()
    }

    /// Area enclosed by the border
    pub fn area(&self) -> f32 {
        geom::polygon_area(&self.border)
    }

    /// Average of the border vertices
    ///
    /// The anchor point for placing content in the cell. It is not the
    /// site: clipping can pull the border average away from it.
    pub fn center(&self) -> Vec3 {
        geom::polygon_center(&self.border)
    }

    /// Check if a point lies inside the border polygon
    pub fn contains(&self, point: Vec3) -> bool {
        geom::point_in_polygon(&self.border, point)
    }

    /// Axis-aligned bounds of the border, as (min, max)
    pub fn bounds(&self) -> (Vec3, Vec3) {
        if self.border.is_empty() {
            return (Vec3::ZERO, Vec3::ZERO);
        }

        let mut min = self.border[0];
        let mut max = self.border[0];
        for p in &self.border[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }
        (min, max)
    }

    /// Distance from a point to the nearest border segment
    ///
    /// Useful as a margin check so placed content does not straddle a
    /// cell boundary.
    pub fn distance_to_border(&self, point: Vec3) -> f32 {
        if self.border.is_empty() {
            return 0.0;
        }

        let mut best = f32::MAX;
        for i in 0..self.border.len() {
            let a = self.border[i];
            let b = self.border[(i + 1) % self.border.len()];
            best = best.min(geom::distance_to_segment(point, a, b));
        }
        best
    }
}
