//! 2D geometry predicates and polygon helpers
//!
//! The generator works on the XZ plane; positions are `Vec3` with `y = 0`
//! and the predicates here operate on their `Vec2` projections.

use glam::{Vec2, Vec3, Vec3Swizzles};

/// Tolerance used by the segment intersection test
const INTERSECT_EPSILON: f32 = 1e-5;

/// Doubled-area threshold below which a triangle counts as collinear
const COLLINEAR_EPSILON: f32 = 1e-7;

/// Check if the triangle (p1, p2, p3) is wound clockwise
///
/// Collinear points count as clockwise, matching how degenerate triangles
/// are treated during orientation.
#[inline]
pub fn is_clockwise(p1: Vec2, p2: Vec2, p3: Vec2) -> bool {
    let determinant =
        p1.x * p2.y + p3.x * p1.y + p2.x * p3.y - p1.x * p3.y - p3.x * p2.y - p2.x * p1.y;
    determinant <= 0.0
}

/// Signed test for which side of the directed line a -> b the point p lies on
///
/// Positive means p is to the left of the line, negative to the right,
/// zero on the line.
#[inline]
pub fn point_left_of_line(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (a.x - p.x) * (b.y - p.y) - (a.y - p.y) * (b.x - p.x)
}

/// In-circle determinant for the circumcircle of (a, b, c)
///
/// With (a, b, c) wound clockwise, the result is negative when d lies
/// strictly inside the circumcircle, positive outside, and zero on it.
pub fn in_circle(a_vec: Vec2, b_vec: Vec2, c_vec: Vec2, d_vec: Vec2) -> f32 {
    // Translate by d so the determinant reduces to 3x3
    let a = a_vec.x - d_vec.x;
    let d = b_vec.x - d_vec.x;
    let g = c_vec.x - d_vec.x;

    let b = a_vec.y - d_vec.y;
    let e = b_vec.y - d_vec.y;
    let h = c_vec.y - d_vec.y;

    let c = a * a + b * b;
    let f = d * d + e * e;
    let i = g * g + h * h;

    (a * e * i) + (b * f * g) + (c * d * h) - (g * e * c) - (h * f * a) - (i * d * b)
}

/// Check if the quadrilateral (a, b, c, d) is convex
///
/// Exactly one of the four corner triangles must disagree in winding with
/// the other three; any other pattern means a concave or degenerate quad.
pub fn is_quadrilateral_convex(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let abc = is_clockwise(a, b, c);
    let abd = is_clockwise(a, b, d);
    let bcd = is_clockwise(b, c, d);
    let cad = is_clockwise(c, a, d);

    (abc && abd && bcd && !cad)
        || (abc && abd && !bcd && cad)
        || (abc && !abd && bcd && cad)
        // The opposite sign, which makes everything inverted
        || (!abc && !abd && !bcd && cad)
        || (!abc && !abd && bcd && !cad)
        || (!abc && abd && !bcd && !cad)
}

/// Check if the segments (l1_p1, l1_p2) and (l2_p1, l2_p2) intersect
///
/// Endpoints are inset by a small epsilon, so segments that merely share
/// an endpoint do not count as intersecting.
pub fn segments_intersect(l1_p1: Vec2, l1_p2: Vec2, l2_p1: Vec2, l2_p2: Vec2) -> bool {
    let denominator = (l2_p2.y - l2_p1.y) * (l1_p2.x - l1_p1.x)
        - (l2_p2.x - l2_p1.x) * (l1_p2.y - l1_p1.y);

    // Parallel lines never intersect
    if denominator == 0.0 {
        return false;
    }

    let u_a = ((l2_p2.x - l2_p1.x) * (l1_p1.y - l2_p1.y)
        - (l2_p2.y - l2_p1.y) * (l1_p1.x - l2_p1.x))
        / denominator;
    let u_b = ((l1_p2.x - l1_p1.x) * (l1_p1.y - l2_p1.y)
        - (l1_p2.y - l1_p1.y) * (l1_p1.x - l2_p1.x))
        / denominator;

    u_a >= INTERSECT_EPSILON
        && u_a <= 1.0 - INTERSECT_EPSILON
        && u_b >= INTERSECT_EPSILON
        && u_b <= 1.0 - INTERSECT_EPSILON
}

/// Circumcenter of the triangle (a, b, c)
///
/// Uses the determinant form rather than perpendicular-bisector slopes, so
/// axis-aligned edges need no special casing. Returns `None` when the
/// points are collinear within floating tolerance; callers treat such
/// triangles as having no dual vertex.
pub fn circumcenter(a: Vec2, b: Vec2, c: Vec2) -> Option<Vec2> {
    let bx = b.x - a.x;
    let by = b.y - a.y;
    let cx = c.x - a.x;
    let cy = c.y - a.y;

    let d = 2.0 * (bx * cy - by * cx);
    if d.abs() < COLLINEAR_EPSILON {
        return None;
    }

    let b_len_sq = bx * bx + by * by;
    let c_len_sq = cx * cx + cy * cy;

    let ux = (cy * b_len_sq - by * c_len_sq) / d;
    let uy = (bx * c_len_sq - cx * b_len_sq) / d;

    Some(Vec2::new(a.x + ux, a.y + uy))
}

/// Area of a polygon on the XZ plane (shoelace formula, always positive)
pub fn polygon_area(polygon: &[Vec3]) -> f32 {
    if polygon.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..polygon.len() {
        let p1 = polygon[i].xz();
        let p2 = polygon[(i + 1) % polygon.len()].xz();
        sum += p1.x * p2.y - p2.x * p1.y;
    }

    (sum * 0.5).abs()
}

/// Average of a polygon's vertices
///
/// This is the zone-center point used for placement, not the area-weighted
/// centroid.
pub fn polygon_center(polygon: &[Vec3]) -> Vec3 {
    if polygon.is_empty() {
        return Vec3::ZERO;
    }

    let mut center = Vec3::ZERO;
    for p in polygon {
        center += *p;
    }
    center / polygon.len() as f32
}

/// Check if a point lies inside a polygon on the XZ plane (ray crossing)
pub fn point_in_polygon(polygon: &[Vec3], point: Vec3) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let p = point.xz();
    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let pi = polygon[i].xz();
        let pj = polygon[j].xz();

        if (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Distance from a point to a segment on the XZ plane
pub fn distance_to_segment(point: Vec3, a: Vec3, b: Vec3) -> f32 {
    let p = point.xz();
    let a = a.xz();
    let b = b.xz();

    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return (p - a).length();
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t - p).length()
}

/// Hashable key for an exact XZ position
///
/// Bit patterns distinguish positions that are exact copies of the same
/// value, which is how duplicated corners are matched up.
pub(crate) fn pos_key(p: Vec3) -> (u32, u32) {
    (p.x.to_bits(), p.z.to_bits())
}
