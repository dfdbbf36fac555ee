//! Voronoi dual of a Delaunay triangulation
//!
//! Connects circumcenters of neighboring triangles into dual edges and
//! groups the edges into one raw cell per site.

use std::collections::HashMap;

use glam::{Vec3, Vec3Swizzles};

use crate::generation::mesh::TriMesh;
use crate::geom;

/// One edge of the Voronoi diagram
///
/// Runs between the circumcenters of two neighboring triangles. `site` is
/// the input site whose cell the edge borders.
#[derive(Debug, Clone, Copy)]
pub struct VoronoiEdge {
    pub start: Vec3,
    pub end: Vec3,
    pub site: Vec3,
}

/// A Voronoi cell before border ordering and clipping
#[derive(Debug, Clone)]
pub struct RawCell {
    /// The site this cell surrounds
    pub site: Vec3,
    /// Bordering edges, unordered
    pub edges: Vec<VoronoiEdge>,
}

/// Build one raw cell per site from a refined mesh
///
/// Every interior half-edge whose triangle and neighbor both have a
/// circumcenter contributes the dual edge between those centers, tagged
/// with the site the half-edge leaves from. Degenerate triangles have no
/// circumcenter and contribute nothing. Cells come back in first-encounter
/// order, so the output is deterministic for a given mesh.
pub fn raw_cells(mesh: &TriMesh) -> Vec<RawCell> {
    let centers = circumcenters(mesh);

    let mut cells: Vec<RawCell> = Vec::new();
    let mut slot_of: HashMap<(u32, u32), usize> = HashMap::new();

    for tri in 0..mesh.tris.len() {
        let center = match centers[tri] {
            Some(c) => c,
            None => continue,
        };

        for edge in mesh.tri_edges(tri) {
            let opposite = match mesh.edges[edge].opposite {
                Some(opp) => opp,
                None => continue,
            };
            let neighbor = match centers[mesh.edges[opposite].tri] {
                Some(c) => c,
                None => continue,
            };

            let site = mesh.src(edge);
            let slot = *slot_of.entry(geom::pos_key(site)).or_insert_with(|| {
                cells.push(RawCell {
                    site,
                    edges: Vec::new(),
                });
                cells.len() - 1
            });

            cells[slot].edges.push(VoronoiEdge {
                start: center,
                end: neighbor,
                site,
            });
        }
    }

    cells
}

/// Circumcenters per triangle, `None` where the corners are collinear
fn circumcenters(mesh: &TriMesh) -> Vec<Option<Vec3>> {
    (0..mesh.tris.len())
        .map(|tri| {
            let [a, b, c] = mesh.tri_corners(tri);
            geom::circumcenter(a.xz(), b.xz(), c.xz())
                .map(|center| Vec3::new(center.x, 0.0, center.y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::delaunay::refine;
    use crate::generation::triangulate::triangulate;

    fn star_fan_cells() -> Vec<RawCell> {
        // Origin surrounded by four axis sites; the dual cell of the origin
        // is the square with corners (+-15, +-15)
        let sites = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 30.0),
            Vec3::new(0.0, 0.0, -30.0),
            Vec3::new(30.0, 0.0, 0.0),
            Vec3::new(-30.0, 0.0, 0.0),
        ];
        let triangles = triangulate(&sites).unwrap();
        let mut mesh = TriMesh::build(&triangles);
        refine(&mut mesh);
        raw_cells(&mesh)
    }

    #[test]
    fn test_origin_cell_edges() {
        let cells = star_fan_cells();
        let origin = cells
            .iter()
            .find(|c| c.site == Vec3::ZERO)
            .expect("origin site should own a cell");

        assert_eq!(origin.edges.len(), 4);

        for edge in &origin.edges {
            assert_eq!(edge.site, Vec3::ZERO);
            assert!((edge.start.x.abs() - 15.0).abs() < 1e-3);
            assert!((edge.start.z.abs() - 15.0).abs() < 1e-3);
            assert!((edge.end.x.abs() - 15.0).abs() < 1e-3);
            assert!((edge.end.z.abs() - 15.0).abs() < 1e-3);
            // Each edge runs along one side of the square
            assert!(((edge.start - edge.end).length() - 30.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_cells_grouped_by_site() {
        let cells = star_fan_cells();

        // Every site with an interior edge owns exactly one cell
        let mut seen = std::collections::HashSet::new();
        for cell in &cells {
            assert!(seen.insert(geom::pos_key(cell.site)));
            assert!(!cell.edges.is_empty());
            for edge in &cell.edges {
                assert_eq!(edge.site, cell.site);
            }
        }
    }

    #[test]
    fn test_degenerate_triangle_contributes_nothing() {
        // Two triangles sharing a side, one of them collinear
        let good = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
        ];
        let flat = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ];

        let mesh = TriMesh::build(&[good, flat]);
        let interior = mesh.edges.iter().filter(|e| e.opposite.is_some()).count();
        assert_eq!(interior, 2);

        assert!(raw_cells(&mesh).is_empty());
    }
}
