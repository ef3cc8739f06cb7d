//! Shape primitives for the picker's interactive regions.
//!
//! Every shape answers three questions: is a point inside it, what is the
//! nearest valid point to an arbitrary point, and where does keyboard
//! navigation start from. Shape-specific readings (angles, percentages)
//! live on the concrete types.

mod circle;
mod rectangle;
mod ring;
mod triangle;

pub use circle::Circle;
pub use rectangle::Rectangle;
pub use ring::Ring;
pub use triangle::{EquilateralTriangle, Triangle};

use kurbo::{Point, Vec2};

/// Common capability set shared by all shapes.
pub trait ShapeTrait {
    /// Check if a point lies inside (or on the boundary of) the shape.
    fn is_inside(&self, point: Point) -> bool;

    /// Get the nearest point to `point` that satisfies [`ShapeTrait::is_inside`].
    fn clamped_point(&self, point: Point) -> Point;

    /// Point that keyboard navigation offsets from (center or centroid).
    fn reference_point(&self) -> Point;
}

/// Enum wrapper for all shape types.
///
/// `Ring` and `EquilateralTriangle` are specializations of `Circle` and
/// `Triangle`; they get their own variants so callers can match on the most
/// specific kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Ring(Ring),
    Rectangle(Rectangle),
    Triangle(Triangle),
    EquilateralTriangle(EquilateralTriangle),
}

impl Shape {
    pub fn is_inside(&self, point: Point) -> bool {
        match self {
            Shape::Circle(s) => s.is_inside(point),
            Shape::Ring(s) => s.is_inside(point),
            Shape::Rectangle(s) => s.is_inside(point),
            Shape::Triangle(s) => s.is_inside(point),
            Shape::EquilateralTriangle(s) => s.is_inside(point),
        }
    }

    pub fn clamped_point(&self, point: Point) -> Point {
        match self {
            Shape::Circle(s) => s.clamped_point(point),
            Shape::Ring(s) => s.clamped_point(point),
            Shape::Rectangle(s) => s.clamped_point(point),
            Shape::Triangle(s) => s.clamped_point(point),
            Shape::EquilateralTriangle(s) => s.clamped_point(point),
        }
    }

    pub fn reference_point(&self) -> Point {
        match self {
            Shape::Circle(s) => s.reference_point(),
            Shape::Ring(s) => s.reference_point(),
            Shape::Rectangle(s) => s.reference_point(),
            Shape::Triangle(s) => s.reference_point(),
            Shape::EquilateralTriangle(s) => s.reference_point(),
        }
    }

    /// Short name used in log output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Circle(_) => "circle",
            Shape::Ring(_) => "ring",
            Shape::Rectangle(_) => "rectangle",
            Shape::Triangle(_) => "triangle",
            Shape::EquilateralTriangle(_) => "equilateral triangle",
        }
    }
}

impl From<Circle> for Shape {
    fn from(shape: Circle) -> Self {
        Shape::Circle(shape)
    }
}

impl From<Ring> for Shape {
    fn from(shape: Ring) -> Self {
        Shape::Ring(shape)
    }
}

impl From<Rectangle> for Shape {
    fn from(shape: Rectangle) -> Self {
        Shape::Rectangle(shape)
    }
}

impl From<Triangle> for Shape {
    fn from(shape: Triangle) -> Self {
        Shape::Triangle(shape)
    }
}

impl From<EquilateralTriangle> for Shape {
    fn from(shape: EquilateralTriangle) -> Self {
        Shape::EquilateralTriangle(shape)
    }
}

/// Closest point to `point` on the segment `a`→`b`.
///
/// A zero-length segment collapses to `a`.
pub fn closest_point_on_segment(point: Point, a: Point, b: Point) -> Point {
    let seg = b - a;
    let len_sq = seg.hypot2();
    if len_sq == 0.0 {
        return a;
    }
    let t = (point - a).dot(seg) / len_sq;
    if t < 0.0 {
        a
    } else if t > 1.0 {
        b
    } else {
        a + seg * t
    }
}

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Angle of `point` around `center` in degrees, normalized to `[0, 360)`.
pub(crate) fn angle_around(center: Point, point: Point) -> f64 {
    let d = point - center;
    normalize_degrees(d.y.atan2(d.x).to_degrees())
}

/// Unit vector at `degrees` (y pointing down, clockwise on screen).
pub(crate) fn unit_at(degrees: f64) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Retries for a boundary point that rounded to the wrong side of its edge.
const MAX_NUDGES: usize = 16;

/// One nudge, a couple of ulps at the magnitude of the shape's coordinates.
fn nudge_step(center: Point, extent: f64) -> f64 {
    (center.x.abs() + center.y.abs() + extent.abs()).max(1.0) * f64::EPSILON * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_point_on_segment_interior() {
        let p = closest_point_on_segment(Point::new(5.0, 5.0), Point::ZERO, Point::new(10.0, 0.0));
        assert!((p.x - 5.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn test_closest_point_on_segment_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(closest_point_on_segment(Point::new(-3.0, 2.0), a, b), a);
        assert_eq!(closest_point_on_segment(Point::new(14.0, -1.0), a, b), b);
    }

    #[test]
    fn test_closest_point_on_degenerate_segment() {
        let a = Point::new(2.0, 3.0);
        assert_eq!(closest_point_on_segment(Point::new(9.0, 9.0), a, a), a);
    }

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-9);
        assert!((normalize_degrees(720.0)).abs() < 1e-9);
        assert!((normalize_degrees(45.0) - 45.0).abs() < 1e-9);
        let tiny = normalize_degrees(-1e-15);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_shape_dispatch_matches_concrete_type() {
        let circle = Circle::new(Point::new(0.0, 0.0), 10.0);
        let shape = Shape::from(circle.clone());
        let p = Point::new(30.0, 0.0);
        assert_eq!(shape.clamped_point(p), circle.clamped_point(p));
        assert_eq!(shape.is_inside(p), circle.is_inside(p));
        assert_eq!(shape.reference_point(), circle.reference_point());
        assert_eq!(shape.kind_name(), "circle");
    }
}
