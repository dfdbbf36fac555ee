//! Half-edge mesh over a triangle set
//!
//! Vertices, half-edges and triangles live in parallel arenas and refer to
//! each other by index. Corners are duplicated per triangle; half-edges of
//! a side shared by two triangles are linked as opposites by exact corner
//! position.

use std::collections::HashMap;

use glam::{Vec3, Vec3Swizzles};

use crate::geom;

/// A corner of one triangle
#[derive(Debug, Clone)]
pub struct MeshVertex {
    /// Position on the XZ plane
    pub position: Vec3,
    /// One half-edge leaving this vertex
    pub edge: usize,
}

/// A directed edge along one triangle
#[derive(Debug, Clone)]
pub struct MeshHalfEdge {
    /// The vertex this edge points to
    pub vert: usize,
    /// Next edge around the triangle
    pub next: usize,
    /// Previous edge around the triangle
    pub prev: usize,
    /// The edge running the other way along the shared side, if the side
    /// is interior
    pub opposite: Option<usize>,
    /// The triangle this edge belongs to
    pub tri: usize,
}

/// One triangle of the mesh
#[derive(Debug, Clone)]
pub struct MeshTriangle {
    /// Corner vertices
    pub verts: [usize; 3],
    /// One of the triangle's three half-edges
    pub edge: usize,
}

/// Triangle mesh in half-edge form
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    pub verts: Vec<MeshVertex>,
    pub edges: Vec<MeshHalfEdge>,
    pub tris: Vec<MeshTriangle>,
}

impl TriMesh {
    /// Build a half-edge mesh from a triangle list
    ///
    /// Triangles are first forced to clockwise winding so every edge cycle
    /// runs the same way. The corner positions of a shared side are exact
    /// copies of the same input points, so opposites are matched by a hash
    /// of the endpoint positions instead of a pairwise scan.
    pub fn build(triangles: &[[Vec3; 3]]) -> TriMesh {
        let mut mesh = TriMesh {
            verts: Vec::with_capacity(triangles.len() * 3),
            edges: Vec::with_capacity(triangles.len() * 3),
            tris: Vec::with_capacity(triangles.len()),
        };

        for tri in triangles {
            let mut corners = *tri;
            if !geom::is_clockwise(corners[0].xz(), corners[1].xz(), corners[2].xz()) {
                corners.swap(0, 1);
            }

            let base_v = mesh.verts.len();
            let base_e = mesh.edges.len();
            let tri_idx = mesh.tris.len();

            for (i, corner) in corners.iter().enumerate() {
                // Edge i points to corner i and leaves from corner i - 1
                mesh.verts.push(MeshVertex {
                    position: *corner,
                    edge: base_e + (i + 1) % 3,
                });
                mesh.edges.push(MeshHalfEdge {
                    vert: base_v + i,
                    next: base_e + (i + 1) % 3,
                    prev: base_e + (i + 2) % 3,
                    opposite: None,
                    tri: tri_idx,
                });
            }

            mesh.tris.push(MeshTriangle {
                verts: [base_v, base_v + 1, base_v + 2],
                edge: base_e,
            });
        }

        mesh.link_opposites();
        mesh
    }

    fn link_opposites(&mut self) {
        let keys: Vec<((u32, u32), (u32, u32))> = (0..self.edges.len())
            .map(|i| (geom::pos_key(self.src(i)), geom::pos_key(self.dst(i))))
            .collect();

        // First occurrence of each directed side wins
        let mut directed: HashMap<((u32, u32), (u32, u32)), usize> =
            HashMap::with_capacity(keys.len());
        for (i, key) in keys.iter().enumerate() {
            directed.entry(*key).or_insert(i);
        }

        for (i, &(from, to)) in keys.iter().enumerate() {
            if let Some(&opp) = directed.get(&(to, from)) {
                if opp != i {
                    self.edges[i].opposite = Some(opp);
                }
            }
        }
    }

    /// Position of the vertex a half-edge points to
    #[inline]
    pub fn dst(&self, edge: usize) -> Vec3 {
        self.verts[self.edges[edge].vert].position
    }

    /// Position of the vertex a half-edge leaves from
    #[inline]
    pub fn src(&self, edge: usize) -> Vec3 {
        self.verts[self.edges[self.edges[edge].prev].vert].position
    }

    /// The three half-edges of a triangle, in cycle order
    pub fn tri_edges(&self, tri: usize) -> [usize; 3] {
        let e1 = self.tris[tri].edge;
        let e2 = self.edges[e1].next;
        let e3 = self.edges[e2].next;
        [e1, e2, e3]
    }

    /// Corner positions of a triangle
    pub fn tri_corners(&self, tri: usize) -> [Vec3; 3] {
        let [v0, v1, v2] = self.tris[tri].verts;
        [
            self.verts[v0].position,
            self.verts[v1].position,
            self.verts[v2].position,
        ]
    }

    /// Flip the side shared between two triangles
    ///
    /// Rewires the six half-edges of the quadrilateral around `edge` so the
    /// diagonal runs between the two far corners instead. Opposite links
    /// stay valid. Does nothing when the edge has no opposite.
    pub fn flip(&mut self, edge: usize) {
        // This triangle's edge cycle
        let one = edge;
        let two = self.edges[one].next;
        let three = self.edges[one].prev;

        // The neighbor's edge cycle
        let four = match self.edges[one].opposite {
            Some(opp) => opp,
            None => return,
        };
        let five = self.edges[four].next;
        let six = self.edges[four].prev;

        // c-a is the shared side; b is this triangle's far corner, d the
        // neighbor's
        let a = self.edges[one].vert;
        let b = self.edges[two].vert;
        let c = self.edges[three].vert;
        let d = self.edges[five].vert;

        // a and c lose their edge along the old diagonal
        self.verts[a].edge = two;
        self.verts[c].edge = five;

        // Edge cycles of the two new triangles
        self.edges[one].next = three;
        self.edges[one].prev = five;
        self.edges[two].next = four;
        self.edges[two].prev = six;
        self.edges[three].next = five;
        self.edges[three].prev = one;

        self.edges[four].next = six;
        self.edges[four].prev = two;
        self.edges[five].next = one;
        self.edges[five].prev = three;
        self.edges[six].next = two;
        self.edges[six].prev = four;

        // The diagonal now runs d-b
        self.edges[one].vert = b;
        self.edges[two].vert = b;
        self.edges[three].vert = c;
        self.edges[four].vert = d;
        self.edges[five].vert = d;
        self.edges[six].vert = a;

        // Both triangle slots survive with new corner sets
        let t1 = self.edges[one].tri;
        let t2 = self.edges[four].tri;

        self.edges[one].tri = t1;
        self.edges[three].tri = t1;
        self.edges[five].tri = t1;

        self.edges[two].tri = t2;
        self.edges[four].tri = t2;
        self.edges[six].tri = t2;

        self.tris[t1].verts = [b, c, d];
        self.tris[t2].verts = [b, d, a];

        self.tris[t1].edge = three;
        self.tris[t2].edge = four;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_mesh() -> TriMesh {
        // Two triangles sharing the diagonal (1,0)-(0,1)
        TriMesh::build(&[
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
            [
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
        ])
    }

    fn assert_cycles_intact(mesh: &TriMesh) {
        for i in 0..mesh.edges.len() {
            assert_eq!(mesh.edges[mesh.edges[i].next].prev, i);
            assert_eq!(mesh.edges[mesh.edges[i].prev].next, i);

            // Three steps return to the start
            let back = mesh.edges[mesh.edges[mesh.edges[i].next].next].next;
            assert_eq!(back, i);
        }

        for t in 0..mesh.tris.len() {
            for e in mesh.tri_edges(t) {
                assert_eq!(mesh.edges[e].tri, t);
            }
        }
    }

    #[test]
    fn test_build_counts() {
        let mesh = quad_mesh();
        assert_eq!(mesh.tris.len(), 2);
        assert_eq!(mesh.edges.len(), 6);
        assert_eq!(mesh.verts.len(), 6);
    }

    #[test]
    fn test_corners_are_per_triangle() {
        let mesh = quad_mesh();

        // (1,0) and (0,1) each appear in both triangles as separate corners
        let count = |p: Vec3| {
            mesh.verts
                .iter()
                .filter(|v| v.position == p)
                .count()
        };
        assert_eq!(count(Vec3::new(1.0, 0.0, 0.0)), 2);
        assert_eq!(count(Vec3::new(0.0, 0.0, 1.0)), 2);
    }

    #[test]
    fn test_triangles_wound_clockwise() {
        let mesh = quad_mesh();
        for t in 0..mesh.tris.len() {
            let [a, b, c] = mesh.tri_corners(t);
            assert!(geom::is_clockwise(a.xz(), b.xz(), c.xz()));
        }
    }

    #[test]
    fn test_opposites_mutual() {
        let mesh = quad_mesh();

        let mut interior = 0;
        for (i, edge) in mesh.edges.iter().enumerate() {
            if let Some(opp) = edge.opposite {
                interior += 1;
                assert_eq!(mesh.edges[opp].opposite, Some(i));
                // Opposites run the same side in reverse
                assert_eq!(mesh.src(i), mesh.dst(opp));
                assert_eq!(mesh.dst(i), mesh.src(opp));
            }
        }

        // One shared side, two half-edges
        assert_eq!(interior, 2);
    }

    #[test]
    fn test_single_triangle_is_all_border() {
        let mesh = TriMesh::build(&[[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ]]);

        assert!(mesh.edges.iter().all(|e| e.opposite.is_none()));
        assert_cycles_intact(&mesh);
    }

    #[test]
    fn test_flip() {
        let mut mesh = quad_mesh();

        let shared = (0..mesh.edges.len())
            .find(|&e| mesh.edges[e].opposite.is_some())
            .unwrap();
        mesh.flip(shared);

        assert_cycles_intact(&mesh);

        // The diagonal now connects (0,0) and (1,1)
        let opp = mesh.edges[shared].opposite.unwrap();
        let ends = [mesh.src(shared), mesh.dst(shared)];
        assert!(ends.contains(&Vec3::new(0.0, 0.0, 0.0)));
        assert!(ends.contains(&Vec3::new(1.0, 0.0, 1.0)));
        assert_eq!(mesh.src(shared), mesh.dst(opp));
        assert_eq!(mesh.dst(shared), mesh.src(opp));

        // Windings survive the rewire
        for t in 0..mesh.tris.len() {
            let [a, b, c] = mesh.tri_corners(t);
            assert!(geom::is_clockwise(a.xz(), b.xz(), c.xz()));
        }
    }

    #[test]
    fn test_flip_without_opposite_is_noop() {
        let mut mesh = TriMesh::build(&[[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ]]);
        let before = mesh.tris[0].verts;

        mesh.flip(0);
        assert_eq!(mesh.tris[0].verts, before);
    }
}
