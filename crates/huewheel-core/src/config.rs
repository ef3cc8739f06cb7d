//! Picker layout configuration.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layout configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse layout: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid layout: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Dimensions of the picker, in local units.
///
/// The local space is the container minus its padding, with the origin at
/// the top-left of that content box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelLayout {
    /// Side length of the square container.
    pub size: f64,
    /// Padding between the container edge and the ring.
    pub padding: f64,
    /// Width of the hue ring.
    pub ring_width: f64,
    /// Gap between the ring's inner edge and the triangle vertices.
    pub triangle_inset: f64,
    /// Arrow key step.
    pub key_step: f64,
}

impl Default for WheelLayout {
    fn default() -> Self {
        Self {
            size: 200.0,
            padding: 8.0,
            ring_width: 16.0,
            triangle_inset: 4.0,
            key_step: crate::interaction::KEY_STEP,
        }
    }
}

impl WheelLayout {
    /// Parse and validate a layout from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every derived radius is positive.
    pub fn validate(&self) -> ConfigResult<()> {
        let fields = [
            ("size", self.size),
            ("padding", self.padding),
            ("ring_width", self.ring_width),
            ("triangle_inset", self.triangle_inset),
            ("key_step", self.key_step),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.outer_radius() <= 0.0 {
            return Err(ConfigError::Invalid("padding leaves no room for the ring".to_string()));
        }
        if self.ring_width <= 0.0 || self.inner_radius() <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "ring_width must be in (0, {})",
                self.outer_radius()
            )));
        }
        if self.triangle_radius() <= 0.0 {
            return Err(ConfigError::Invalid("triangle_inset leaves no room for the triangle".to_string()));
        }
        if self.key_step == 0.0 {
            return Err(ConfigError::Invalid("key_step must be positive".to_string()));
        }
        Ok(())
    }

    /// Side of the content box.
    pub fn content_size(&self) -> f64 {
        self.size - 2.0 * self.padding
    }

    pub fn center(&self) -> Point {
        let half = self.content_size() / 2.0;
        Point::new(half, half)
    }

    pub fn outer_radius(&self) -> f64 {
        self.content_size() / 2.0
    }

    pub fn inner_radius(&self) -> f64 {
        self.outer_radius() - self.ring_width
    }

    /// Radius of the ring's track, where the hue handle sits.
    pub fn median_radius(&self) -> f64 {
        self.outer_radius() - self.ring_width / 2.0
    }

    /// Circumradius of the saturation/lightness triangle.
    pub fn triangle_radius(&self) -> f64 {
        self.inner_radius() - self.triangle_inset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let layout = WheelLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.center(), Point::new(92.0, 92.0));
        assert_eq!(layout.outer_radius(), 92.0);
        assert_eq!(layout.inner_radius(), 76.0);
        assert_eq!(layout.median_radius(), 84.0);
        assert_eq!(layout.triangle_radius(), 72.0);
        assert_eq!(layout.key_step, 5.0);
    }

    #[test]
    fn test_from_json_partial() {
        let layout = WheelLayout::from_json(r#"{"size": 300, "ring_width": 20}"#).unwrap();
        assert_eq!(layout.size, 300.0);
        assert_eq!(layout.ring_width, 20.0);
        assert_eq!(layout.padding, 8.0);
        assert_eq!(layout.inner_radius(), 122.0);
    }

    #[test]
    fn test_json_round_trip() {
        let layout = WheelLayout {
            size: 256.0,
            ..WheelLayout::default()
        };
        let json = layout.to_json().unwrap();
        assert_eq!(WheelLayout::from_json(&json).unwrap(), layout);
    }

    #[test]
    fn test_parse_error() {
        let result = WheelLayout::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_layouts() {
        let too_wide = WheelLayout {
            ring_width: 100.0,
            ..WheelLayout::default()
        };
        assert!(matches!(too_wide.validate(), Err(ConfigError::Invalid(_))));

        let negative = WheelLayout {
            padding: -1.0,
            ..WheelLayout::default()
        };
        assert!(matches!(negative.validate(), Err(ConfigError::Invalid(_))));

        let no_triangle = WheelLayout {
            triangle_inset: 76.0,
            ..WheelLayout::default()
        };
        assert!(no_triangle.validate().is_err());

        let stuck = WheelLayout {
            key_step: 0.0,
            ..WheelLayout::default()
        };
        assert!(stuck.validate().is_err());

        assert!(WheelLayout::from_json(r#"{"size": 10, "padding": 5}"#).is_err());
    }
}
