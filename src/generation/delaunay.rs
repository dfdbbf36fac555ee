//! Delaunay refinement by edge flipping
//!
//! Takes any triangulation in half-edge form and flips interior edges
//! until every triangle's circumcircle is empty of opposing corners.

use glam::Vec3Swizzles;

use crate::generation::mesh::TriMesh;
use crate::geom;

/// Sweep limit before refinement gives up
const MAX_PASSES: usize = 100_000;

/// Statistics from one refinement run
#[derive(Debug, Clone, Copy)]
pub struct RefineOutcome {
    /// Full sweeps over the edge list
    pub passes: usize,
    /// Total flips performed
    pub flips: usize,
    /// False when the sweep limit was hit before the mesh settled
    pub converged: bool,
}

/// Flip edges until the triangulation is Delaunay
///
/// Each pass sweeps every interior edge. An edge flips when the neighbor's
/// far corner sits strictly inside this triangle's circumcircle, the
/// surrounding quadrilateral is convex, and the flipped edge would not
/// itself demand flipping back. A sweep without flips means the mesh has
/// settled; after [`MAX_PASSES`] sweeps the mesh is returned as is with a
/// warning instead of looping further.
pub fn refine(mesh: &mut TriMesh) -> RefineOutcome {
    let mut passes = 0;
    let mut flips = 0;

    loop {
        passes += 1;
        if passes > MAX_PASSES {
            log::warn!(
                "edge flipping not settled after {} passes ({} flips), keeping current mesh",
                MAX_PASSES,
                flips
            );
            return RefineOutcome {
                passes: MAX_PASSES,
                flips,
                converged: false,
            };
        }

        let mut flipped_this_pass = false;

        for edge in 0..mesh.edges.len() {
            let opposite = match mesh.edges[edge].opposite {
                Some(opp) => opp,
                None => continue,
            };

            // c-a spans the shared side; b is this triangle's far corner,
            // d the neighbor's
            let a = mesh.dst(edge).xz();
            let b = mesh.dst(mesh.edges[edge].next).xz();
            let c = mesh.dst(mesh.edges[edge].prev).xz();
            let d = mesh.dst(mesh.edges[opposite].next).xz();

            if geom::in_circle(a, b, c, d) < 0.0
                && geom::is_quadrilateral_convex(a, b, c, d)
                && geom::in_circle(b, c, d, a) >= 0.0
            {
                flips += 1;
                flipped_this_pass = true;
                mesh.flip(edge);
            }
        }

        if !flipped_this_pass {
            return RefineOutcome {
                passes,
                flips,
                converged: true,
            };
        }
    }
}
