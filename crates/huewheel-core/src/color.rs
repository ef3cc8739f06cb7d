//! Canonical HSLA color and the color model contract.
//!
//! The picker works in HSLA internally. Callers pick the external
//! representation by supplying a [`ColorModel`]; the core never looks inside
//! that representation.

use peniko::Color;
use peniko::color::{AlphaColor, Hsl, Rgba8, Srgb, parse_color};
use serde::{Deserialize, Serialize};

/// Canonical color: hue in degrees `[0, 360]`, saturation and lightness in
/// `[0, 100]`, alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslaColor {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl HslaColor {
    pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Fully saturated, mid-lightness, opaque color for a hue.
    pub fn pure_hue(h: f64) -> Self {
        Self::new(h, 100.0, 50.0, 1.0)
    }

    /// Convert to an sRGB color.
    pub fn to_color(&self) -> Color {
        AlphaColor::<Hsl>::new([self.h as f32, self.s as f32, self.l as f32, self.a as f32])
            .convert::<Srgb>()
    }

    /// Convert to 8-bit RGBA, for painting.
    pub fn to_rgba8(&self) -> Rgba8 {
        self.to_color().to_rgba8()
    }

    /// Convert from an sRGB color. Achromatic colors get hue 0.
    pub fn from_color(color: Color) -> Self {
        let [h, s, l, a] = color.convert::<Hsl>().components;
        Self::new(finite_or_zero(h), finite_or_zero(s), finite_or_zero(l), f64::from(a))
    }

    /// Overlay the fields present in `patch`.
    pub fn apply(self, patch: HslaPatch) -> Self {
        Self {
            h: patch.h.unwrap_or(self.h),
            s: patch.s.unwrap_or(self.s),
            l: patch.l.unwrap_or(self.l),
            a: patch.a.unwrap_or(self.a),
        }
    }
}

fn finite_or_zero(value: f32) -> f64 {
    if value.is_finite() { f64::from(value) } else { 0.0 }
}

/// Partial HSLA update; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HslaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl HslaPatch {
    pub fn hue(h: f64) -> Self {
        Self {
            h: Some(h),
            ..Self::default()
        }
    }

    pub fn saturation_lightness(s: f64, l: f64) -> Self {
        Self {
            s: Some(s),
            l: Some(l),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.h.is_none() && self.s.is_none() && self.l.is_none() && self.a.is_none()
    }
}

/// Conversion contract between an external color representation and HSLA.
///
/// Implementations must be total and pure: the synchronizer relies on
/// `equal` to break update loops between lossy representations.
pub trait ColorModel {
    type Color: Clone + std::fmt::Debug;

    fn default_color(&self) -> Self::Color;
    fn to_hsla(&self, color: &Self::Color) -> HslaColor;
    fn from_hsla(&self, hsla: &HslaColor) -> Self::Color;
    fn equal(&self, first: &Self::Color, second: &Self::Color) -> bool;
}

/// Identity model: the external color is HSLA itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslaModel {
    pub default: HslaColor,
}

impl Default for HslaModel {
    fn default() -> Self {
        Self {
            default: HslaColor::pure_hue(0.0),
        }
    }
}

impl ColorModel for HslaModel {
    type Color = HslaColor;

    fn default_color(&self) -> HslaColor {
        self.default
    }

    fn to_hsla(&self, color: &HslaColor) -> HslaColor {
        *color
    }

    fn from_hsla(&self, hsla: &HslaColor) -> HslaColor {
        *hsla
    }

    fn equal(&self, first: &HslaColor, second: &HslaColor) -> bool {
        first == second
    }
}

/// sRGB model over `peniko::Color`; colors are equal when their 8-bit channels match.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RgbaModel;

impl ColorModel for RgbaModel {
    type Color = Color;

    fn default_color(&self) -> Color {
        Color::from_rgba8(0, 0, 0, 255)
    }

    fn to_hsla(&self, color: &Color) -> HslaColor {
        HslaColor::from_color(*color)
    }

    fn from_hsla(&self, hsla: &HslaColor) -> Color {
        hsla.to_color()
    }

    fn equal(&self, first: &Color, second: &Color) -> bool {
        channels(*first) == channels(*second)
    }
}

fn channels(color: Color) -> (u8, u8, u8, u8) {
    let Rgba8 { r, g, b, a } = color.to_rgba8();
    (r, g, b, a)
}

/// CSS hex string model (`#rrggbb`, or `#rrggbbaa` when translucent).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HexModel;

impl HexModel {
    fn normalize(color: &str) -> String {
        color
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }
}

impl ColorModel for HexModel {
    type Color = String;

    fn default_color(&self) -> String {
        "#000000".to_string()
    }

    fn to_hsla(&self, color: &String) -> HslaColor {
        match parse_color(color.trim()) {
            Ok(parsed) => HslaColor::from_color(parsed.to_alpha_color::<Srgb>()),
            Err(e) => {
                log::warn!("Failed to parse hex color {:?}: {}", color, e);
                self.to_hsla(&self.default_color())
            }
        }
    }

    fn from_hsla(&self, hsla: &HslaColor) -> String {
        let Rgba8 { r, g, b, a } = hsla.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    fn equal(&self, first: &String, second: &String) -> bool {
        Self::normalize(first) == Self::normalize(second)
    }
}
