//! Reconciliation between an external color value and the internal HSLA state.
//!
//! Two triggers feed the synchronizer: the caller replacing the external
//! color, and interactions patching the HSLA value. A cache of the last
//! agreed `(color, hsla)` pair decides whether anything propagates. A value
//! that round-trips through the model to something `equal` to the cache is
//! never reported back out, which stops update loops between lossy
//! representations.

use crate::color::{ColorModel, HslaColor, HslaPatch};

/// Last agreed pair of external color and HSLA value.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncCache<T> {
    pub color: T,
    pub hsla: HslaColor,
}

/// Reconcile a new external color against the cache.
///
/// Returns the replacement cache when the color differs from the cached one;
/// its `hsla` is the value to publish as current state.
pub fn reconcile_external<M: ColorModel>(
    model: &M,
    cache: &SyncCache<M::Color>,
    color: &M::Color,
) -> Option<SyncCache<M::Color>> {
    if model.equal(color, &cache.color) {
        return None;
    }
    Some(SyncCache {
        color: color.clone(),
        hsla: model.to_hsla(color),
    })
}

/// Reconcile a new HSLA value against the cache.
///
/// Returns the replacement cache when both the HSLA value and its external
/// conversion differ from the cache; its `color` is the value to emit.
pub fn reconcile_internal<M: ColorModel>(
    model: &M,
    cache: &SyncCache<M::Color>,
    hsla: HslaColor,
) -> Option<SyncCache<M::Color>> {
    if hsla == cache.hsla {
        return None;
    }
    let color = model.from_hsla(&hsla);
    if model.equal(&color, &cache.color) {
        log::trace!("HSLA change round-trips to the cached color, not emitting");
        return None;
    }
    Some(SyncCache { color, hsla })
}

/// Owns the cache and the current HSLA state for one picker.
#[derive(Debug, Clone)]
pub struct ColorSync<M: ColorModel> {
    model: M,
    cache: SyncCache<M::Color>,
    hsla: HslaColor,
}

impl<M: ColorModel> ColorSync<M> {
    /// Create a synchronizer starting at `color`, or the model default.
    pub fn new(model: M, color: Option<M::Color>) -> Self {
        let color = color.unwrap_or_else(|| model.default_color());
        let hsla = model.to_hsla(&color);
        Self {
            model,
            cache: SyncCache { color, hsla },
            hsla,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Current HSLA state.
    pub fn hsla(&self) -> HslaColor {
        self.hsla
    }

    /// Last external color agreed with the caller.
    pub fn color(&self) -> &M::Color {
        &self.cache.color
    }

    /// The caller supplied a new external color.
    ///
    /// Returns true when the HSLA state changed as a result.
    pub fn set_color(&mut self, color: &M::Color) -> bool {
        match reconcile_external(&self.model, &self.cache, color) {
            Some(cache) => {
                log::debug!("External color changed, publishing {:?}", cache.hsla);
                self.hsla = cache.hsla;
                self.cache = cache;
                true
            }
            None => false,
        }
    }

    /// Merge `patch` into the current HSLA state.
    ///
    /// Returns the external color to emit, if the change is observable.
    pub fn update(&mut self, patch: HslaPatch) -> Option<M::Color> {
        self.hsla = self.hsla.apply(patch);
        let cache = reconcile_internal(&self.model, &self.cache, self.hsla)?;
        log::debug!("HSLA changed, emitting {:?}", cache.color);
        let color = cache.color.clone();
        self.cache = cache;
        Some(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{HexModel, HslaModel, RgbaModel};
    use std::cell::Cell;

    /// Hex model that counts conversions, to check what reconciliation calls.
    #[derive(Default)]
    struct CountingModel {
        to_hsla: Cell<usize>,
        from_hsla: Cell<usize>,
    }

    impl ColorModel for CountingModel {
        type Color = String;

        fn default_color(&self) -> String {
            HexModel.default_color()
        }

        fn to_hsla(&self, color: &String) -> HslaColor {
            self.to_hsla.set(self.to_hsla.get() + 1);
            HexModel.to_hsla(color)
        }

        fn from_hsla(&self, hsla: &HslaColor) -> String {
            self.from_hsla.set(self.from_hsla.get() + 1);
            HexModel.from_hsla(hsla)
        }

        fn equal(&self, first: &String, second: &String) -> bool {
            HexModel.equal(first, second)
        }
    }

    #[test]
    fn test_new_uses_default_color() {
        let sync = ColorSync::new(HexModel, None);
        assert_eq!(sync.color(), "#000000");
        assert!(sync.hsla().l.abs() < 1e-3);
    }

    #[test]
    fn test_round_trip_does_not_emit() {
        let mut sync = ColorSync::new(HexModel, Some("#ff0000".to_string()));
        let hsla = sync.hsla();
        assert!(hsla.h.abs() < 1e-3);
        assert!((hsla.s - 100.0).abs() < 1e-3);
        assert!((hsla.l - 50.0).abs() < 1e-3);

        assert_eq!(sync.update(HslaPatch::default()), None);
        assert_eq!(sync.update(HslaPatch::hue(hsla.h)), None);
    }

    #[test]
    fn test_lossy_change_is_absorbed() {
        let mut sync = ColorSync::new(RgbaModel, None);
        sync.update(HslaPatch::saturation_lightness(100.0, 50.0));
        // A hue nudge too small to move any 8-bit channel.
        let before = *sync.color();
        assert_eq!(sync.update(HslaPatch::hue(0.01)), None);
        assert_eq!(sync.color().to_rgba8().r, before.to_rgba8().r);
        // The HSLA state still moves.
        assert!((sync.hsla().h - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_observable_change_emits_once() {
        let mut sync = ColorSync::new(HexModel, Some("#ff0000".to_string()));
        let emitted = sync.update(HslaPatch::hue(120.0));
        assert_eq!(emitted.as_deref(), Some("#00ff00"));
        assert_eq!(sync.update(HslaPatch::hue(120.0)), None);
        assert_eq!(sync.color(), "#00ff00");
    }

    #[test]
    fn test_external_change_publishes_without_emitting() {
        let mut sync = ColorSync::new(HslaModel::default(), None);
        let next = HslaColor::new(200.0, 40.0, 60.0, 1.0);
        assert!(sync.set_color(&next));
        assert_eq!(sync.hsla(), next);
        // Feeding back the published state is not a change.
        assert_eq!(sync.update(HslaPatch::default()), None);
        assert!(!sync.set_color(&next));
    }

    #[test]
    fn test_external_equal_color_skips_conversion() {
        let model = CountingModel::default();
        let mut sync = ColorSync::new(model, Some("#ff0000".to_string()));
        assert_eq!(sync.model().to_hsla.get(), 1);
        assert!(!sync.set_color(&"#FF0000".to_string()));
        assert_eq!(sync.model().to_hsla.get(), 1);
    }

    #[test]
    fn test_unchanged_hsla_skips_conversion() {
        let model = CountingModel::default();
        let mut sync = ColorSync::new(model, Some("#123456".to_string()));
        sync.update(HslaPatch::default());
        assert_eq!(sync.model().from_hsla.get(), 0);
    }

    #[test]
    fn test_pure_reconcile_functions() {
        let model = HslaModel::default();
        let cache = SyncCache {
            color: HslaColor::pure_hue(0.0),
            hsla: HslaColor::pure_hue(0.0),
        };
        assert!(reconcile_external(&model, &cache, &HslaColor::pure_hue(0.0)).is_none());
        let next = reconcile_internal(&model, &cache, HslaColor::pure_hue(30.0)).unwrap();
        assert_eq!(next.color, HslaColor::pure_hue(30.0));
        assert_eq!(next.hsla, HslaColor::pure_hue(30.0));
    }
}
