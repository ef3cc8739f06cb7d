//! Ring (annulus) shape.

use super::circle::{project_at_radius, project_onto_edge};
use super::{Circle, ShapeTrait, angle_around, unit_at};
use kurbo::Point;
use std::f64::consts::PI;

/// Tolerance on squared distance for membership of the median circle.
const MEDIAN_TOLERANCE: f64 = 1e-6;

/// A ring between an inner and an outer radius.
///
/// When `constrained` is set the ring acts as a one-dimensional track along
/// its median circle: every clamped point lands on that circle and the
/// radial reading is meaningless.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    /// Center point.
    pub center: Point,
    /// Inner radius.
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Track mode: behave as the median circle only.
    pub constrained: bool,
}

impl Ring {
    /// Create a new ring.
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64, constrained: bool) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            constrained,
        }
    }

    /// The outer circle this ring is cut from.
    pub fn as_circle(&self) -> Circle {
        Circle::new(self.center, self.outer_radius)
    }

    /// Radius halfway between the inner and outer edges.
    pub fn median_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Get the point at `degrees` on the median circle (where the drag handle sits).
    pub fn point_at_angle(&self, degrees: f64) -> Point {
        self.center + unit_at(degrees) * self.median_radius()
    }

    /// Angle of the point around the center, in degrees within `[0, 360)`.
    pub fn angle_from_point(&self, point: Point) -> f64 {
        angle_around(self.center, point)
    }

    /// Position across the band: 0 at the inner edge, 100 at the outer edge.
    ///
    /// Always 0 for a constrained ring.
    pub fn radius_percentage(&self, point: Point) -> f64 {
        let band = self.outer_radius - self.inner_radius;
        if self.constrained || band <= 0.0 {
            return 0.0;
        }
        let distance = (point - self.center).hypot();
        ((distance - self.inner_radius) / band * 100.0).clamp(0.0, 100.0)
    }

    pub fn inner_circumference(&self) -> f64 {
        2.0 * PI * self.inner_radius
    }

    /// Inner and outer circumferences.
    pub fn circumferences(&self) -> (f64, f64) {
        (self.inner_circumference(), self.as_circle().circumference())
    }

    /// Area of the band.
    pub fn area(&self) -> f64 {
        PI * (self.outer_radius * self.outer_radius - self.inner_radius * self.inner_radius)
    }
}

impl ShapeTrait for Ring {
    fn is_inside(&self, point: Point) -> bool {
        let distance_sq = (point - self.center).hypot2();
        if self.constrained {
            let median = self.median_radius();
            (distance_sq - median * median).abs() < MEDIAN_TOLERANCE
        } else {
            distance_sq >= self.inner_radius * self.inner_radius
                && distance_sq <= self.outer_radius * self.outer_radius
        }
    }

    fn clamped_point(&self, point: Point) -> Point {
        if self.constrained {
            return project_at_radius(self.center, self.median_radius(), point);
        }
        let distance = (point - self.center).hypot();
        if distance < self.inner_radius {
            // Includes the exact center, which falls back to angle 0.
            project_onto_edge(self.center, self.inner_radius, point, 1.0, |p| self.is_inside(p))
        } else if distance > self.outer_radius {
            project_onto_edge(self.center, self.outer_radius, point, -1.0, |p| self.is_inside(p))
        } else {
            point
        }
    }

    fn reference_point(&self) -> Point {
        self.center
    }
}
