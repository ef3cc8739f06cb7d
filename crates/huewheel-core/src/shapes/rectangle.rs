//! Rectangle shape.

use super::{MAX_NUDGES, ShapeTrait, nudge_step};
use kurbo::{Affine, Point};

/// A rectangle positioned by its center, optionally rotated.
///
/// All containment and clamping work happens in the rectangle's local frame:
/// origin at the center, axes aligned with the sides, y pointing down.
/// `clamped_x` / `clamped_y` pin the clamped point onto the center line of
/// that axis, which turns the rectangle into a one-dimensional slider.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    /// Center point.
    pub center: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Rotation angle in radians (around center).
    pub rotation: f64,
    /// Pin clamped points to the vertical center line.
    pub clamped_x: bool,
    /// Pin clamped points to the horizontal center line.
    pub clamped_y: bool,
}

impl Rectangle {
    /// Create a new rectangle. The rotation is given in degrees.
    pub fn new(center: Point, width: f64, height: f64, rotation_degrees: f64) -> Self {
        Self {
            center,
            width,
            height,
            rotation: rotation_degrees.to_radians(),
            clamped_x: false,
            clamped_y: false,
        }
    }

    /// Pin the x axis to the center line.
    pub fn with_clamped_x(mut self, clamped: bool) -> Self {
        self.clamped_x = clamped;
        self
    }

    /// Pin the y axis to the center line.
    pub fn with_clamped_y(mut self, clamped: bool) -> Self {
        self.clamped_y = clamped;
        self
    }

    /// Transform from world coordinates into the local frame.
    fn to_local(&self) -> Affine {
        Affine::rotate(-self.rotation) * Affine::translate(-self.center.to_vec2())
    }

    /// Transform from the local frame back to world coordinates.
    fn to_world(&self) -> Affine {
        Affine::translate(self.center.to_vec2()) * Affine::rotate(self.rotation)
    }

    /// Non-negative half width and half height.
    fn half_extents(&self) -> (f64, f64) {
        (self.width.abs() / 2.0, self.height.abs() / 2.0)
    }

    /// Corners in order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let (hw, hh) = self.half_extents();
        let world = self.to_world();
        [
            world * Point::new(-hw, -hh),
            world * Point::new(hw, -hh),
            world * Point::new(hw, hh),
            world * Point::new(-hw, hh),
        ]
    }

    /// Vertical reading: 100 at the top edge, 0 at the bottom edge.
    ///
    /// Inverted relative to the y-down frame so that "up" means "more".
    pub fn vertical_percentage(&self, point: Point) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        let (_, hh) = self.half_extents();
        let y = (self.to_local() * point).y.clamp(-hh, hh);
        100.0 - (y + hh) / self.height * 100.0
    }

    /// Horizontal reading: 0 at the left edge, 100 at the right edge.
    pub fn horizontal_percentage(&self, point: Point) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        let (hw, _) = self.half_extents();
        let x = (self.to_local() * point).x.clamp(-hw, hw);
        (x + hw) / self.width * 100.0
    }

    /// Vertical and horizontal readings together.
    pub fn percentages(&self, point: Point) -> (f64, f64) {
        (self.vertical_percentage(point), self.horizontal_percentage(point))
    }
}

impl ShapeTrait for Rectangle {
    fn is_inside(&self, point: Point) -> bool {
        let local = self.to_local() * point;
        let (hw, hh) = self.half_extents();
        local.x >= -hw && local.x <= hw && local.y >= -hh && local.y <= hh
    }

    fn clamped_point(&self, point: Point) -> Point {
        let local = self.to_local() * point;
        let (hw, hh) = self.half_extents();
        let x = if self.clamped_x { 0.0 } else { local.x.clamp(-hw, hw) };
        let y = if self.clamped_y { 0.0 } else { local.y.clamp(-hh, hh) };
        let clamped = Point::new(x, y);
        if clamped == local {
            // Avoid round-trip drift for interior points.
            return point;
        }
        // The trip back to world space can round past an edge; pull the
        // local point toward the center until it tests inside.
        let step = nudge_step(self.center, hw.max(hh));
        let mut target = clamped;
        let mut world = self.to_world() * target;
        for _ in 0..MAX_NUDGES {
            if self.is_inside(world) {
                break;
            }
            target = Point::new(toward_zero(target.x, step), toward_zero(target.y, step));
            world = self.to_world() * target;
        }
        world
    }

    fn reference_point(&self) -> Point {
        self.center
    }
}

fn toward_zero(value: f64, step: f64) -> f64 {
    if value.abs() <= step { 0.0 } else { value - step * value.signum() }
}
