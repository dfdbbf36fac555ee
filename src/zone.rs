//! Zone structure
//!
//! Zones are the playable output of world assembly: a valid clipped cell
//! joined with its biome and a private content seed.

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geom;

/// One zone of the generated world
///
/// Generic over the biome type `B` so games can carry their own biome data
/// through a custom sampler.
///
/// # Design Notes
///
/// Zones are NOT serialized individually. They are regenerated from
/// WorldConfig when loading a save file; `seed` is what downstream
/// content placement (spawns, props, loot) should derive its randomness
/// from so the zone repopulates identically.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Zone<B> {
    /// Zone identifier (0 to zone count - 1)
    ///
    /// IDs are stable and deterministic: the same configuration always
    /// produces the same zones with the same IDs.
    pub id: usize,

    /// The site the zone's cell surrounds
    pub site: Vec3,

    /// Border polygon, at least 3 vertices, counter-clockwise viewed from
    /// above
    pub border: Vec<Vec3>,

    /// Assigned biome
    pub biome: B,

    /// Seed reserved for placing content inside this zone
    pub seed: u32,
}

impl<B> Zone<B> {
    /// Average of the border vertices
    ///
    /// The anchor point for zone-level placement, such as a camp or quest
    /// marker.
    pub fn center(&self) -> Vec3 {
        geom::polygon_center(&self.border)
    }

    /// Area enclosed by the border
    pub fn area(&self) -> f32 {
        geom::polygon_area(&self.border)
    }

    /// Check if a point lies inside the zone
    pub fn contains(&self, point: Vec3) -> bool {
        geom::point_in_polygon(&self.border, point)
    }

    /// Distance from a point to the nearest border segment
    pub fn distance_to_border(&self, point: Vec3) -> f32 {
        let mut best = f32::MAX;
        for i in 0..self.border.len() {
            let a = self.border[i];
            let b = self.border[(i + 1) % self.border.len()];
            best = best.min(geom::distance_to_segment(point, a, b));
        }
        best
    }
}
