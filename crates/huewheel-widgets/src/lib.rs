//! egui widgets for the HueWheel color picker.
//!
//! - **Wheel**: hue ring with a saturation/lightness triangle, driven by a
//!   [`huewheel_core::Picker`]

pub mod wheel;

pub use wheel::{ColorWheel, hsla_to_color32};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Radius of the triangle's drag handle
    pub const HANDLE_RADIUS: f32 = 6.0;
    /// Polygons used to paint the hue ring
    pub const RING_SEGMENTS: usize = 96;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Focused handle color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
}
