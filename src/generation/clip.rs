//! Cell border ordering and clipping to the map square
//!
//! Turns each raw cell's unordered dual edges into a border loop, then
//! clips every loop against the four planes of the bounding square.

use glam::{Vec3, Vec3Swizzles};

use crate::cell::VoronoiCell;
use crate::generation::voronoi::RawCell;
use crate::geom;

/// Squared length below which a dual edge is dropped as degenerate; also
/// the matching tolerance when chaining border points
const MIN_EDGE_DIST_SQ: f32 = 1e-2;

/// Tolerance when classifying a point as inside a clip plane
///
/// Points on the boundary count as inside, so clipping an already clipped
/// polygon leaves it unchanged.
const CLIP_EPSILON: f32 = 1e-4;

/// An infinite clip line on the XZ plane
#[derive(Debug, Clone, Copy)]
pub struct ClipPlane {
    /// A point on the plane
    pub point: Vec3,
    /// Normal pointing toward the kept side
    pub normal: Vec3,
}

impl ClipPlane {
    /// Signed distance from the plane, positive on the kept side
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point - self.point)
    }
}

/// The four inward-facing planes of the map square
pub fn bounding_square(half_width: f32) -> Vec<ClipPlane> {
    let corners = [
        Vec3::new(-half_width, 0.0, half_width),
        Vec3::new(-half_width, 0.0, -half_width),
        Vec3::new(half_width, 0.0, -half_width),
        Vec3::new(half_width, 0.0, half_width),
    ];

    (0..corners.len())
        .map(|i| {
            let v1 = corners[i];
            let v2 = corners[(i + 1) % corners.len()];

            let dir = v2 - v1;
            let normal = Vec3::new(-dir.z, 0.0, dir.x).normalize();

            ClipPlane {
                point: (v1 + v2) * 0.5,
                normal,
            }
        })
        .collect()
}

/// Order a cell's dual edges into a border polygon
///
/// Degenerate edges are dropped, the rest are turned to run the same way
/// around the site, and the chain is walked end to start. Cells of the far
/// anchor sites are open toward the rim; their walk consumes fewer edges
/// than exist, which is reported at debug level and leaves a partial
/// border for clipping to shrink away.
pub fn order_border(cell: &RawCell) -> Vec<Vec3> {
    let site = cell.site.xz();

    let mut edges: Vec<(Vec3, Vec3)> = Vec::with_capacity(cell.edges.len());
    for edge in &cell.edges {
        if (edge.start - edge.end).length_squared() < MIN_EDGE_DIST_SQ {
            continue;
        }

        // Turn the edge so the border runs one way around the site
        let midpoint = ((edge.start + edge.end) * 0.5).xz();
        if geom::point_left_of_line(site, midpoint, edge.start.xz()) < 0.0 {
            edges.push((edge.end, edge.start));
        } else {
            edges.push((edge.start, edge.end));
        }
    }

    if edges.is_empty() {
        return Vec::new();
    }

    let mut border = Vec::with_capacity(edges.len());
    border.push(edges[0].1);

    let mut used = vec![false; edges.len()];
    used[0] = true;
    let mut current = edges[0].1;

    for _ in 1..edges.len() {
        let next = (1..edges.len())
            .find(|&k| !used[k] && (edges[k].0 - current).length_squared() < MIN_EDGE_DIST_SQ);

        match next {
            Some(k) => {
                used[k] = true;
                border.push(edges[k].1);
                current = edges[k].1;
            }
            None => break,
        }
    }

    let unused = used.iter().filter(|&&u| !u).count();
    if unused > 0 {
        log::debug!(
            "border of cell at ({:.1}, {:.1}) stays open, {} of {} edges unchained",
            cell.site.x,
            cell.site.z,
            unused,
            edges.len()
        );
    }

    border
}

/// Clip a polygon against a set of planes (Sutherland-Hodgman)
///
/// Vertices on the kept side of every plane survive; edges crossing a
/// plane gain the crossing point. A polygon entirely outside any plane
/// comes back empty.
pub fn clip_polygon(polygon: &[Vec3], planes: &[ClipPlane]) -> Vec<Vec3> {
    let mut vertices = polygon.to_vec();

    for plane in planes {
        let mut kept = Vec::with_capacity(vertices.len() + 1);

        for j in 0..vertices.len() {
            let v1 = vertices[j];
            let v2 = vertices[(j + 1) % vertices.len()];

            let dist1 = plane.distance(v1);
            let dist2 = plane.distance(v2);
            let inside1 = dist1 >= -CLIP_EPSILON;
            let inside2 = dist2 >= -CLIP_EPSILON;

            if inside1 && inside2 {
                kept.push(v2);
            } else if !inside1 && inside2 {
                kept.push(crossing(v1, v2, dist1, dist2));
                kept.push(v2);
            } else if inside1 && !inside2 {
                kept.push(crossing(v1, v2, dist1, dist2));
            }
        }

        vertices = kept;
    }

    vertices
}

/// Point where the segment v1-v2 meets the plane separating them
fn crossing(v1: Vec3, v2: Vec3, dist1: f32, dist2: f32) -> Vec3 {
    // The endpoints straddle the plane, so the denominator cannot vanish
    let t = dist1 / (dist1 - dist2);
    v1 + (v2 - v1) * t
}

/// Order and clip every raw cell
pub fn clip_cells(raw: &[RawCell], half_width: f32) -> Vec<VoronoiCell> {
    let planes = bounding_square(half_width);

    raw.iter()
        .map(|cell| {
            let border = order_border(cell);
            let border = clip_polygon(&border, &planes);
            VoronoiCell::new(cell.site, border)
        })
        .collect()
}
