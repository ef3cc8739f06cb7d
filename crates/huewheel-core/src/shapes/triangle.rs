//! Triangle shapes.

use super::{ShapeTrait, closest_point_on_segment, unit_at};
use kurbo::{Point, Size};

/// A triangle defined by three vertices.
///
/// The vertices must not be collinear: containment divides by the
/// triangle's signed double area.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    /// Create a new triangle.
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    pub fn centroid(&self) -> Point {
        Point::new(
            (self.a.x + self.b.x + self.c.x) / 3.0,
            (self.a.y + self.b.y + self.c.y) / 3.0,
        )
    }

    /// Area via the shoelace formula.
    pub fn area(&self) -> f64 {
        let (a, b, c) = (self.a, self.b, self.c);
        ((a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) / 2.0).abs()
    }

    /// Side lengths `(AB, BC, CA)`.
    pub fn side_lengths(&self) -> (f64, f64, f64) {
        (
            self.a.distance(self.b),
            self.b.distance(self.c),
            self.c.distance(self.a),
        )
    }
}

impl ShapeTrait for Triangle {
    fn is_inside(&self, point: Point) -> bool {
        let (a, b, c) = (self.a, self.b, self.c);
        let denominator = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        let alpha = ((b.y - c.y) * (point.x - c.x) + (c.x - b.x) * (point.y - c.y)) / denominator;
        let beta = ((c.y - a.y) * (point.x - c.x) + (a.x - c.x) * (point.y - c.y)) / denominator;
        let gamma = 1.0 - alpha - beta;
        alpha >= 0.0 && beta >= 0.0 && gamma >= 0.0
    }

    fn clamped_point(&self, point: Point) -> Point {
        if self.is_inside(point) {
            return point;
        }
        let edges = [(self.a, self.b), (self.b, self.c), (self.c, self.a)];
        let mut best = closest_point_on_segment(point, edges[0].0, edges[0].1);
        let mut best_dist = (point - best).hypot2();
        for &(start, end) in &edges[1..] {
            let candidate = closest_point_on_segment(point, start, end);
            let dist = (point - candidate).hypot2();
            // Strictly less: on ties the earlier edge wins.
            if dist < best_dist {
                best = candidate;
                best_dist = dist;
            }
        }
        best
    }

    fn reference_point(&self) -> Point {
        self.centroid()
    }
}

/// An equilateral triangle inscribed in a circle of `radius` around `center`.
///
/// Vertex A sits at the rotation angle, B and C follow at +120° and +240°.
/// In the picker, A is the fully saturated hue and BC is the lightness axis.
#[derive(Debug, Clone, PartialEq)]
pub struct EquilateralTriangle {
    triangle: Triangle,
    center: Point,
    radius: f64,
    /// Rotation angle in radians.
    rotation: f64,
}

impl EquilateralTriangle {
    /// Create a new equilateral triangle. The rotation is given in degrees.
    pub fn new(center: Point, radius: f64, rotation_degrees: f64) -> Self {
        let vertex = |offset: f64| center + unit_at(rotation_degrees + offset) * radius;
        Self {
            triangle: Triangle::new(vertex(0.0), vertex(120.0), vertex(240.0)),
            center,
            radius,
            rotation: rotation_degrees.to_radians(),
        }
    }

    /// The underlying general triangle.
    pub fn as_triangle(&self) -> &Triangle {
        &self.triangle
    }

    pub fn vertices(&self) -> [Point; 3] {
        self.triangle.vertices()
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Distance from the center to each vertex.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Rotation angle in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn side_length(&self) -> f64 {
        self.radius * 3.0_f64.sqrt()
    }

    /// Size of the axis-aligned box of the unrotated triangle.
    pub fn bounding_box_size(&self) -> Size {
        Size::new(2.0 * self.radius, 3.0_f64.sqrt() * self.radius)
    }

    /// How far the point is from vertex A toward the base BC, in `[0, 100]`.
    pub fn distance_percentage(&self, point: Point) -> f64 {
        let Triangle { a, b, c } = self.triangle;
        projection_percentage(point, a, b.midpoint(c))
    }

    /// Position of the point along the base from B (0) to C (100).
    pub fn bc_percentage(&self, point: Point) -> f64 {
        let Triangle { b, c, .. } = self.triangle;
        projection_percentage(point, b, c)
    }
}

impl ShapeTrait for EquilateralTriangle {
    fn is_inside(&self, point: Point) -> bool {
        self.triangle.is_inside(point)
    }

    fn clamped_point(&self, point: Point) -> Point {
        self.triangle.clamped_point(point)
    }

    fn reference_point(&self) -> Point {
        self.triangle.centroid()
    }
}

/// Scalar projection of `point` onto `from`→`to`, clamped to `[0, 1]` and scaled to percent.
fn projection_percentage(point: Point, from: Point, to: Point) -> f64 {
    let axis = to - from;
    let len_sq = axis.hypot2();
    if len_sq == 0.0 {
        return 0.0;
    }
    ((point - from).dot(axis) / len_sq).clamp(0.0, 1.0) * 100.0
}
