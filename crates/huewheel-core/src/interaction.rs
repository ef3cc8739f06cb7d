//! Resolving pointer and keyboard positions against a shape.
//!
//! A raw point is clamped into the shape, then the shape kind decides which
//! readings are reported. Keyboard navigation goes through the same path so
//! both produce identical `Interaction` values.

use crate::shapes::Shape;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Default keyboard step in local units.
pub const KEY_STEP: f64 = 5.0;

/// Readings reported for an interaction, per shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Percentages {
    /// Plain circle: angle in degrees and distance from the center in percent.
    Circle { angle: f64, radius: f64 },
    /// Ring: angle only. Rings drive hue, never a radial value.
    Ring { angle: f64 },
    /// Rectangle: horizontal (left = 0) and vertical (top = 100) readings.
    Rectangle { horizontal: f64, vertical: f64 },
    /// Triangle: distance toward the base, when a caller supplies one.
    /// [`resolve`] leaves it empty; callers read the point instead.
    Triangle { distance: Option<f64> },
}

impl Percentages {
    pub fn angle(&self) -> Option<f64> {
        match *self {
            Percentages::Circle { angle, .. } | Percentages::Ring { angle } => Some(angle),
            _ => None,
        }
    }

    pub fn radius_percentage(&self) -> Option<f64> {
        match *self {
            Percentages::Circle { radius, .. } => Some(radius),
            _ => None,
        }
    }

    pub fn horizontal(&self) -> Option<f64> {
        match *self {
            Percentages::Rectangle { horizontal, .. } => Some(horizontal),
            _ => None,
        }
    }

    pub fn vertical(&self) -> Option<f64> {
        match *self {
            Percentages::Rectangle { vertical, .. } => Some(vertical),
            _ => None,
        }
    }

    pub fn distance_percentage(&self) -> Option<f64> {
        match *self {
            Percentages::Triangle { distance } => distance,
            _ => None,
        }
    }

    /// Check if no reading is present.
    pub fn is_empty(&self) -> bool {
        matches!(self, Percentages::Triangle { distance: None })
    }
}

/// Result of resolving a point against a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// The clamped point, in the same local space as the shape.
    pub point: Point,
    /// Shape-specific readings at that point.
    pub percentages: Percentages,
}

/// Clamp `point` into `shape` and compute the readings for its kind.
pub fn resolve(point: Point, shape: &Shape) -> Interaction {
    let point = shape.clamped_point(point);
    let percentages = match shape {
        Shape::Ring(ring) => Percentages::Ring {
            angle: ring.angle_from_point(point),
        },
        Shape::Circle(circle) => Percentages::Circle {
            angle: circle.angle_from_point(point),
            radius: circle.radius_percentage(point),
        },
        Shape::Rectangle(rect) => Percentages::Rectangle {
            horizontal: rect.horizontal_percentage(point),
            vertical: rect.vertical_percentage(point),
        },
        Shape::Triangle(_) | Shape::EquilateralTriangle(_) => Percentages::Triangle { distance: None },
    };
    log::debug!("Resolved {} interaction at ({:.2}, {:.2})", shape.kind_name(), point.x, point.y);
    Interaction { point, percentages }
}

/// Arrow keys understood by keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    /// Parse a DOM-style key name (`"ArrowUp"` etc.).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(ArrowKey::Up),
            "ArrowDown" => Some(ArrowKey::Down),
            "ArrowLeft" => Some(ArrowKey::Left),
            "ArrowRight" => Some(ArrowKey::Right),
            _ => None,
        }
    }

    /// Screen-space offset for one press (y grows downward).
    pub fn offset(self, step: f64) -> Vec2 {
        match self {
            ArrowKey::Up => Vec2::new(0.0, -step),
            ArrowKey::Down => Vec2::new(0.0, step),
            ArrowKey::Left => Vec2::new(-step, 0.0),
            ArrowKey::Right => Vec2::new(step, 0.0),
        }
    }
}

/// Resolve a key press: offset the shape's reference point and resolve it.
pub fn resolve_key(shape: &Shape, key: ArrowKey, step: f64) -> Interaction {
    let moved = shape.reference_point() + key.offset(step);
    resolve(shape.clamped_point(moved), shape)
}
