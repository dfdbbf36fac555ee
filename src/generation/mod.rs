//! Core world generation pipeline
//!
//! Scatters sites on the map plane, triangulates them incrementally,
//! refines the result to Delaunay by edge flipping, extracts the Voronoi
//! dual from triangle circumcenters, then orders and clips each cell
//! border to the map square.

mod clip;
mod delaunay;
mod mesh;
mod sites;
mod triangulate;
mod voronoi;

pub use clip::{bounding_square, clip_cells, clip_polygon, order_border, ClipPlane};
pub use delaunay::{refine, RefineOutcome};
pub use mesh::{MeshHalfEdge, MeshTriangle, MeshVertex, TriMesh};
pub use sites::{scatter_sites, star_sites};
pub use triangulate::triangulate;
pub use voronoi::{raw_cells, RawCell, VoronoiEdge};

use glam::Vec3;

use crate::cell::VoronoiCell;
use crate::config::WorldConfig;
use crate::error::Result;

/// Generate clipped Voronoi cells from a configuration
///
/// Scatters the configured number of sites over the map square, adds the
/// four anchor sites and runs [`build_cells`]. The same configuration
/// always produces the same cells.
pub fn generate_cells(config: &WorldConfig) -> Result<Vec<VoronoiCell>> {
    let half_width = config.half_width();

    // Step 1: scatter zone sites, fenced in by the anchors
    let mut all_sites = sites::scatter_sites(config.zone_count(), half_width, config.seed);
    all_sites.extend(sites::star_sites(half_width));

    build_cells(&all_sites, half_width)
}

/// Build clipped Voronoi cells around an explicit site set
///
/// The input should already include far anchor sites (see [`star_sites`]);
/// without them the outermost cells never close into loops. One cell comes
/// back per site that borders a dual edge, in first-encounter order. Cells
/// left with fewer than 3 border vertices after clipping are degenerate
/// and meant to be skipped.
///
/// # Errors
///
/// Returns [`crate::WorldGenError::DegenerateSites`] when the sites cannot
/// form a single triangle.
pub fn build_cells(sites: &[Vec3], half_width: f32) -> Result<Vec<VoronoiCell>> {
    // Step 2: triangulate, then refine to Delaunay
    let triangles = triangulate::triangulate(sites)?;
    let mut tri_mesh = mesh::TriMesh::build(&triangles);
    let outcome = delaunay::refine(&mut tri_mesh);

    log::debug!(
        "triangulated {} sites into {} triangles ({} flips over {} passes)",
        sites.len(),
        tri_mesh.tris.len(),
        outcome.flips,
        outcome.passes
    );

    // Step 3: the dual diagram, cut down to the map square
    let raw = voronoi::raw_cells(&tri_mesh);
    Ok(clip::clip_cells(&raw, half_width))
}
