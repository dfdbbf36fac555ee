//! Incremental visibility triangulation
//!
//! Builds an initial triangulation by inserting sites in ascending x order
//! and connecting each to every existing edge whose midpoint it can see.
//! The result is a valid triangulation but generally not Delaunay yet;
//! edge flipping refines it afterwards.

use std::collections::HashSet;

use glam::{Vec3, Vec3Swizzles};

use crate::error::{Result, WorldGenError};
use crate::geom;

/// Orientation determinant magnitude below which three points count as
/// collinear
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Triangulate a site set on the XZ plane
///
/// Sites are sorted by x and inserted one at a time; each new site forms a
/// triangle with every existing edge whose midpoint is visible from it,
/// meaning the sight line crosses no other edge. Triangles whose corners
/// turn out collinear are discarded, which happens when a sight line passes
/// exactly through a vertex of the triangulation.
///
/// # Errors
///
/// Returns [`WorldGenError::DegenerateSites`] when fewer than 3 distinct
/// positions exist or all sites lie on one line.
pub fn triangulate(sites: &[Vec3]) -> Result<Vec<[Vec3; 3]>> {
    let distinct: HashSet<(u32, u32)> = sites
        .iter()
        .map(|p| (p.x.to_bits(), p.z.to_bits()))
        .collect();
    if distinct.len() < 3 {
        return Err(WorldGenError::DegenerateSites(format!(
            "need at least 3 distinct sites (got {})",
            distinct.len()
        )));
    }

    let mut points = sites.to_vec();
    points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    seed_first_triangle(&mut points)?;

    let mut triangles: Vec<[Vec3; 3]> = vec![[points[0], points[1], points[2]]];

    // Every edge of the triangulation so far, as endpoint pairs. Shared
    // edges appear once per triangle that created them; the redundancy is
    // harmless for visibility testing.
    let mut edges: Vec<(Vec3, Vec3)> = vec![
        (points[0], points[1]),
        (points[1], points[2]),
        (points[2], points[0]),
    ];

    for i in 3..points.len() {
        let current = points[i];

        // Edges created for this site are buffered and appended after the
        // pass so they never block their own sibling sight lines
        let mut new_edges: Vec<(Vec3, Vec3)> = Vec::new();

        for j in 0..edges.len() {
            let (a, b) = edges[j];

            if !can_see_edge(current, j, &edges) {
                continue;
            }
            if is_collinear(a, current, b) {
                continue;
            }

            new_edges.push((a, current));
            new_edges.push((b, current));
            triangles.push([a, current, b]);
        }

        edges.append(&mut new_edges);
    }

    Ok(triangles)
}

/// Arrange the first three points of `points` into a non-degenerate seed
/// triangle, scanning forward past duplicates and collinear runs
fn seed_first_triangle(points: &mut [Vec3]) -> Result<()> {
    let mut second = 1;
    while second < points.len() && points[second].xz() == points[0].xz() {
        second += 1;
    }

    let mut third = second + 1;
    while third < points.len() && is_collinear(points[0], points[second], points[third]) {
        third += 1;
    }
    if third == points.len() {
        return Err(WorldGenError::DegenerateSites(
            "all sites lie on one line".to_string(),
        ));
    }

    points.swap(1, second);
    points.swap(2, third);
    Ok(())
}

/// True when the sight line from `point` to the midpoint of edge `j`
/// crosses none of the other edges
fn can_see_edge(point: Vec3, j: usize, edges: &[(Vec3, Vec3)]) -> bool {
    let (a, b) = edges[j];
    let midpoint = ((a + b) * 0.5).xz();

    for (k, other) in edges.iter().enumerate() {
        if k == j {
            continue;
        }
        if geom::segments_intersect(point.xz(), midpoint, other.0.xz(), other.1.xz()) {
            return false;
        }
    }

    true
}

fn is_collinear(a: Vec3, b: Vec3, c: Vec3) -> bool {
    geom::point_left_of_line(a.xz(), b.xz(), c.xz()).abs() < DEGENERATE_EPSILON
}
