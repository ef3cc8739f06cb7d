//! Circle shape.

use super::{MAX_NUDGES, ShapeTrait, angle_around, nudge_step, unit_at};
use kurbo::Point;
use std::f64::consts::PI;

/// A filled circle (disk).
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Project `point` onto the circumference along the center→point ray.
    ///
    /// A point exactly at the center has no direction; it maps to the
    /// boundary point at angle 0 (to the right of the center).
    pub fn project_onto_boundary(&self, point: Point) -> Point {
        project_at_radius(self.center, self.radius, point)
    }

    /// Get the point on the circumference at `degrees`.
    pub fn point_at_angle(&self, degrees: f64) -> Point {
        self.center + unit_at(degrees) * self.radius
    }

    /// Angle of the point around the center, in degrees within `[0, 360)`.
    pub fn angle_from_point(&self, point: Point) -> f64 {
        angle_around(self.center, point)
    }

    /// Distance from the center as a percentage of the radius, clamped to `[0, 100]`.
    pub fn radius_percentage(&self, point: Point) -> f64 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        let distance = (point - self.center).hypot();
        (distance / self.radius * 100.0).clamp(0.0, 100.0)
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

impl ShapeTrait for Circle {
    fn is_inside(&self, point: Point) -> bool {
        (point - self.center).hypot2() <= self.radius * self.radius
    }

    fn clamped_point(&self, point: Point) -> Point {
        if self.is_inside(point) {
            point
        } else {
            project_onto_edge(self.center, self.radius, point, -1.0, |p| self.is_inside(p))
        }
    }

    fn reference_point(&self) -> Point {
        self.center
    }
}

/// Scale the center→point ray to length `radius`, with the angle-0 fallback.
pub(super) fn project_at_radius(center: Point, radius: f64, point: Point) -> Point {
    let d = point - center;
    let distance = d.hypot();
    if distance == 0.0 {
        Point::new(center.x + radius, center.y)
    } else {
        center + d * (radius / distance)
    }
}

/// Project onto the circle of `radius`, then step the radius by a few ulps
/// in `direction` (-1 inward, +1 outward) until `accept` holds.
pub(super) fn project_onto_edge(
    center: Point,
    radius: f64,
    point: Point,
    direction: f64,
    accept: impl Fn(Point) -> bool,
) -> Point {
    let step = nudge_step(center, radius) * direction;
    let mut projected = project_at_radius(center, radius, point);
    for n in 1..=MAX_NUDGES {
        if accept(projected) {
            break;
        }
        projected = project_at_radius(center, radius + step * n as f64, point);
    }
    projected
}
