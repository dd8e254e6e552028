/// Triangle meshes, the base solid and subdivision
use crate::color::{Color, PALETTE};
use crate::error::{Error, Result};
use crate::math::{face_normal, midpoint, vec3, Vec3};

/// Deepest subdivision accepted by [`Mesh::subdivided`] (4^8 children per face).
pub const MAX_SUBDIVISION_DEPTH: u32 = 8;

/// Largest triangle count [`Mesh::subdivided`] will produce: the base solid at
/// [`MAX_SUBDIVISION_DEPTH`].
pub const MAX_TRIANGLES: usize = 4 << (2 * MAX_SUBDIVISION_DEPTH);

/// Half the edge length of the cube the base solid is inscribed in.
pub const BASE_HALF_EXTENT: f64 = 100.0;

/// A flat-colored triangle. Vertex order fixes the winding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub color: Color,
}

impl Triangle {
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3, color: Color) -> Self {
        Self {
            vertices: [v1, v2, v3],
            color,
        }
    }

    /// Unit normal from the triangle's vertices
    pub fn normal(&self) -> Result<Vec3> {
        let [v1, v2, v3] = &self.vertices;
        face_normal(v1, v2, v3)
    }

    /// Area of the triangle's projection onto the XY plane.
    pub fn projected_area(&self) -> f64 {
        let [a, b, c] = &self.vertices;
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() * 0.5
    }

    /// Split into four children sharing the edge midpoints: three corners
    /// followed by the center triangle.
    pub fn split(&self) -> [Triangle; 4] {
        let [v1, v2, v3] = self.vertices;
        let v12 = midpoint(&v1, &v2);
        let v23 = midpoint(&v2, &v3);
        let v31 = midpoint(&v3, &v1);
        let color = self.color;

        [
            Triangle::new(v1, v12, v31, color),
            Triangle::new(v12, v2, v23, color),
            Triangle::new(v31, v23, v3, color),
            Triangle::new(v12, v23, v31, color),
        ]
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Deepest subdivision that keeps this mesh within [`MAX_TRIANGLES`].
    ///
    /// Depth 0 is always allowed since it allocates nothing new.
    pub fn max_subdivision_depth(&self) -> u32 {
        let mut depth = 0;
        let mut count = self.len().max(1);
        while depth < MAX_SUBDIVISION_DEPTH && count.saturating_mul(4) <= MAX_TRIANGLES {
            count *= 4;
            depth += 1;
        }
        depth
    }

    /// Subdivide `depth` times, failing before any allocation when the result
    /// would exceed [`MAX_SUBDIVISION_DEPTH`] or [`MAX_TRIANGLES`].
    pub fn subdivided(&self, depth: u32) -> Result<Mesh> {
        if depth == 0 {
            return Ok(self.clone());
        }
        let count = 4usize
            .checked_pow(depth)
            .and_then(|factor| self.len().checked_mul(factor));
        match count {
            Some(count) if depth <= MAX_SUBDIVISION_DEPTH && count <= MAX_TRIANGLES => {
                Ok(subdivide(self, depth))
            }
            _ => Err(Error::InvalidSubdivision {
                depth,
                max: self.max_subdivision_depth(),
            }),
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.triangles.iter().flat_map(|t| t.vertices.iter());
        let first = *points.next()?;
        let bounds = points.fold(Bounds { min: first, max: first }, |b, p| Bounds {
            min: b.min.inf(p),
            max: b.max.sup(p),
        });
        Some(bounds)
    }

    /// Recenter on the origin and scale uniformly so the largest axis spans
    /// `[-half_extent, half_extent]`. Flat meshes along every axis are only
    /// recentered.
    pub fn fit_to(&self, half_extent: f64) -> Mesh {
        let Some(bounds) = self.bounds() else {
            return self.clone();
        };
        let center = bounds.center();
        let largest = bounds.size().max();
        let scale = if largest > 0.0 {
            2.0 * half_extent / largest
        } else {
            1.0
        };

        let triangles = self
            .triangles
            .iter()
            .map(|t| Triangle {
                vertices: t.vertices.map(|v| (v - center) * scale),
                color: t.color,
            })
            .collect();
        Mesh { triangles }
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

/// The tetrahedron on alternating corners of a cube of half-extent 100.
///
/// Faces are colored white, red, green and blue, in that order.
pub fn base_solid() -> Mesh {
    let h = BASE_HALF_EXTENT;
    let a = vec3(h, h, h);
    let b = vec3(-h, -h, h);
    let c = vec3(-h, h, -h);
    let d = vec3(h, -h, -h);

    let [white, red, green, blue] = PALETTE;
    Mesh {
        triangles: vec![
            Triangle::new(a, b, c, white),
            Triangle::new(a, b, d, red),
            Triangle::new(c, d, a, green),
            Triangle::new(c, d, b, blue),
        ],
    }
}

/// Replace every triangle with its four children, `depth` times.
pub fn subdivide(mesh: &Mesh, depth: u32) -> Mesh {
    let mut current = mesh.clone();
    for _ in 0..depth {
        let mut next = Mesh::with_capacity(current.len() * 4);
        for triangle in &current.triangles {
            next.triangles.extend(triangle.split());
        }
        current = next;
    }
    current
}
