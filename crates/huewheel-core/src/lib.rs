//! Huewheel Core Library
//!
//! Platform-agnostic geometry, interaction and color synchronization for a
//! hue ring / saturation-lightness triangle color picker.

pub mod color;
pub mod config;
pub mod input;
pub mod interaction;
pub mod picker;
pub mod shapes;
pub mod sync;

pub use color::{ColorModel, HexModel, HslaColor, HslaModel, HslaPatch, RgbaModel};
pub use config::{ConfigError, ConfigResult, WheelLayout};
pub use input::{InteractionListener, InteractiveHandler, KeyEvent, PointerCapture, PointerEvent, PointerKind};
pub use interaction::{ArrowKey, Interaction, KEY_STEP, Percentages, resolve, resolve_key};
pub use picker::{Handle, Picker, PickerPart};
pub use shapes::{Circle, EquilateralTriangle, Rectangle, Ring, Shape, ShapeTrait, Triangle};
pub use sync::{ColorSync, SyncCache, reconcile_external, reconcile_internal};
