//! Hue ring plus saturation/lightness triangle, wired to a color synchronizer.

use crate::color::{ColorModel, HslaColor, HslaPatch};
use crate::config::WheelLayout;
use crate::input::{InteractionListener, InteractiveHandler, KeyEvent, PointerCapture, PointerEvent};
use crate::interaction::Interaction;
use crate::shapes::{EquilateralTriangle, Ring, Shape, ShapeTrait};
use crate::sync::ColorSync;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Interactive part of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickerPart {
    Ring,
    Triangle,
}

/// A drag handle to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Which part the handle belongs to.
    pub part: PickerPart,
    /// Position in local coordinates.
    pub position: Point,
    /// Color the handle represents.
    pub color: HslaColor,
}

impl Handle {
    pub fn new(part: PickerPart, position: Point, color: HslaColor) -> Self {
        Self {
            part,
            position,
            color,
        }
    }
}

type ChangeCallback<T> = Box<dyn FnMut(&T)>;

/// A complete color picker.
///
/// Owns one interaction handler per part and routes input to the part
/// pressed (pointer) or focused (keyboard). Observable color changes go to
/// the `on_change` callback; changes made through [`Picker::set_color`] never
/// do. Each part's drag holds its own `C` capture from press to release.
pub struct Picker<M: ColorModel, C: PointerCapture = ()> {
    sync: ColorSync<M>,
    on_change: Option<ChangeCallback<M::Color>>,
    layout: WheelLayout,
    ring_handler: InteractiveHandler<C>,
    triangle_handler: InteractiveHandler<C>,
    /// Part receiving the current drag.
    active: Option<PickerPart>,
    /// Part receiving keyboard input.
    focused: Option<PickerPart>,
}

impl<M: ColorModel> Picker<M> {
    /// Create a picker at the model's default color.
    pub fn new(model: M) -> Self {
        Self::with_captures(model, None, (), ())
    }

    /// Create a picker at `color`.
    pub fn with_color(model: M, color: M::Color) -> Self {
        Self::with_captures(model, Some(color), (), ())
    }
}

impl<M: ColorModel, C: PointerCapture> Picker<M, C> {
    /// Create a picker whose ring and triangle drags acquire the given captures.
    pub fn with_captures(model: M, color: Option<M::Color>, ring_capture: C, triangle_capture: C) -> Self {
        let layout = WheelLayout::default();
        Self {
            sync: ColorSync::new(model, color),
            on_change: None,
            layout,
            ring_handler: InteractiveHandler::new(ring_capture).with_key_step(layout.key_step),
            triangle_handler: InteractiveHandler::new(triangle_capture).with_key_step(layout.key_step),
            active: None,
            focused: None,
        }
    }

    /// Replace the layout. Ends any drag in progress.
    pub fn with_layout(mut self, layout: WheelLayout) -> Self {
        for handler in [&mut self.ring_handler, &mut self.triangle_handler] {
            handler.end_drag();
            handler.set_key_step(layout.key_step);
        }
        self.active = None;
        self.layout = layout;
        self
    }

    /// Capture held by a part's handler.
    pub fn capture(&self, part: PickerPart) -> &C {
        match part {
            PickerPart::Ring => self.ring_handler.capture(),
            PickerPart::Triangle => self.triangle_handler.capture(),
        }
    }

    /// Set the change callback.
    pub fn on_change(mut self, callback: impl FnMut(&M::Color) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    /// Current HSLA state.
    pub fn hsla(&self) -> HslaColor {
        self.sync.hsla()
    }

    /// Last external color agreed with the caller.
    pub fn color(&self) -> &M::Color {
        self.sync.color()
    }

    /// Replace the external color. Does not call `on_change`.
    pub fn set_color(&mut self, color: &M::Color) -> bool {
        self.sync.set_color(color)
    }

    /// The hue track.
    pub fn ring(&self) -> Ring {
        Ring::new(
            self.layout.center(),
            self.layout.inner_radius(),
            self.layout.outer_radius(),
            true,
        )
    }

    /// The saturation/lightness triangle, with vertex A pointing at the current hue.
    pub fn triangle(&self) -> EquilateralTriangle {
        EquilateralTriangle::new(self.layout.center(), self.layout.triangle_radius(), self.hsla().h)
    }

    /// Which part, if any, lies under `point`.
    pub fn hit_test(&self, point: Point) -> Option<PickerPart> {
        let band = Ring {
            constrained: false,
            ..self.ring()
        };
        if band.is_inside(point) {
            Some(PickerPart::Ring)
        } else if self.triangle().is_inside(point) {
            Some(PickerPart::Triangle)
        } else {
            None
        }
    }

    pub fn focused(&self) -> Option<PickerPart> {
        self.focused
    }

    /// Move keyboard focus.
    pub fn set_focus(&mut self, part: Option<PickerPart>) {
        self.focused = part;
    }

    /// Check if a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Process a pointer event in local coordinates.
    ///
    /// Returns the color passed to `on_change`, if any.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<M::Color> {
        let part = match event {
            PointerEvent::Down { position, .. } => {
                let part = self.hit_test(position)?;
                if let Some(previous) = self.active.filter(|&p| p != part) {
                    self.handler_mut(previous).end_drag();
                }
                self.active = Some(part);
                self.focused = Some(part);
                part
            }
            _ => self.active?,
        };

        let mut listener = PartListener::new(part, self.triangle(), self.hsla().h);
        let shape = self.shape(part);
        let handler = self.handler_mut(part);
        handler.handle_pointer_event(&shape, event, &mut listener);
        if !handler.is_dragging() {
            self.active = None;
        }
        self.publish(listener.patch?)
    }

    /// Process a key event for the focused part.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> Option<M::Color> {
        let part = self.focused?;
        let mut listener = PartListener::new(part, self.triangle(), self.hsla().h);
        let shape = self.shape(part);
        self.handler_mut(part).handle_key_event(&shape, event, &mut listener);
        self.publish(listener.patch?)
    }

    /// Handles for the current color: the hue on the ring track and the
    /// saturation/lightness point in the triangle.
    pub fn handles(&self) -> Vec<Handle> {
        let hsla = self.hsla();
        let ring = self.ring();
        let triangle = self.triangle();
        vec![
            Handle::new(
                PickerPart::Ring,
                ring.point_at_angle(hsla.h),
                HslaColor::pure_hue(hsla.h),
            ),
            Handle::new(
                PickerPart::Triangle,
                triangle_point(&triangle, hsla.s, hsla.l),
                hsla,
            ),
        ]
    }

    fn shape(&self, part: PickerPart) -> Shape {
        match part {
            PickerPart::Ring => self.ring().into(),
            PickerPart::Triangle => self.triangle().into(),
        }
    }

    fn handler_mut(&mut self, part: PickerPart) -> &mut InteractiveHandler<C> {
        match part {
            PickerPart::Ring => &mut self.ring_handler,
            PickerPart::Triangle => &mut self.triangle_handler,
        }
    }

    fn publish(&mut self, patch: HslaPatch) -> Option<M::Color> {
        let color = self.sync.update(patch)?;
        if let Some(callback) = self.on_change.as_mut() {
            callback(&color);
        }
        Some(color)
    }
}

/// Point in the triangle for a saturation/lightness pair.
///
/// Inverse of the readings taken by [`PartListener`]: the A→base axis and
/// the BC axis are perpendicular, so each reading moves along its own axis.
fn triangle_point(triangle: &EquilateralTriangle, saturation: f64, lightness: f64) -> Point {
    let [a, b, c] = triangle.vertices();
    let distance = (100.0 - saturation) / 100.0;
    let along = lightness / 100.0 - 0.5;
    let point = a + (b.midpoint(c) - a) * distance + (c - b) * along;
    triangle.clamped_point(point)
}

/// Turns interactions on one part into an HSLA patch.
///
/// Saturation is `100 - distance%`, the reverse of a plain distance reading:
/// vertex A is painted as the pure hue, so it must read as full saturation.
/// Lightness is the position from B (black) to C (white).
struct PartListener {
    part: PickerPart,
    triangle: EquilateralTriangle,
    hue: f64,
    patch: Option<HslaPatch>,
}

impl PartListener {
    fn new(part: PickerPart, triangle: EquilateralTriangle, hue: f64) -> Self {
        Self {
            part,
            triangle,
            hue,
            patch: None,
        }
    }

    fn triangle_patch(&self, point: Point) -> HslaPatch {
        // Inverted on purpose: A is full saturation.
        HslaPatch::saturation_lightness(
            100.0 - self.triangle.distance_percentage(point),
            self.triangle.bc_percentage(point),
        )
    }
}

impl InteractionListener for PartListener {
    fn on_move(&mut self, interaction: &Interaction) {
        self.patch = Some(match self.part {
            PickerPart::Ring => HslaPatch::hue(interaction.percentages.angle().unwrap_or(self.hue)),
            PickerPart::Triangle => self.triangle_patch(interaction.point),
        });
    }

    fn on_key(&mut self, interaction: &Interaction) {
        self.patch = Some(match self.part {
            // Arrow keys on the ring leave the hue where it is.
            PickerPart::Ring => HslaPatch::hue(self.hue),
            PickerPart::Triangle => self.triangle_patch(interaction.point),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexModel;
    use crate::input::PointerKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    const EPS: f64 = 1e-6;

    /// Records which parts hold a live capture; shared so it outlives the picker.
    #[derive(Clone, Default)]
    struct SharedCapture {
        live: Rc<RefCell<i32>>,
        acquired: Rc<RefCell<usize>>,
    }

    impl PointerCapture for SharedCapture {
        fn acquire(&mut self, _kind: PointerKind) {
            *self.live.borrow_mut() += 1;
            *self.acquired.borrow_mut() += 1;
        }

        fn release(&mut self, _kind: PointerKind) {
            *self.live.borrow_mut() -= 1;
        }
    }

    fn red_picker() -> (Picker<HexModel>, Rc<RefCell<Vec<String>>>) {
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let sink = emitted.clone();
        let picker = Picker::with_color(HexModel, "#ff0000".to_string())
            .on_change(move |color: &String| sink.borrow_mut().push(color.clone()));
        (picker, emitted)
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            kind: PointerKind::Mouse,
        }
    }

    fn drag(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
            kind: PointerKind::Mouse,
            pressed: true,
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            kind: PointerKind::Mouse,
        }
    }

    #[test]
    fn test_hit_test() {
        let (picker, _) = red_picker();
        assert_eq!(picker.hit_test(Point::new(92.0, 4.0)), Some(PickerPart::Ring));
        assert_eq!(picker.hit_test(Point::new(92.0, 92.0)), Some(PickerPart::Triangle));
        assert_eq!(picker.hit_test(Point::new(0.0, 0.0)), None);
        // Between the ring and the triangle's tip.
        assert_eq!(picker.hit_test(Point::new(92.0, 18.0)), None);
    }

    #[test]
    fn test_initial_handles() {
        let (picker, emitted) = red_picker();
        let handles = picker.handles();
        assert_eq!(handles[0].part, PickerPart::Ring);
        // The hex round trip goes through f32 channels.
        assert!((handles[0].position.x - 176.0).abs() < 1e-3);
        assert!((handles[0].position.y - 92.0).abs() < 1e-3);
        // Fully saturated mid-lightness sits on vertex A.
        let [a, ..] = picker.triangle().vertices();
        assert!((handles[1].position - a).hypot() < 1e-3);
        assert!(emitted.borrow().is_empty());
    }

    #[test]
    fn test_ring_drag_sets_hue() {
        let (mut picker, emitted) = red_picker();
        assert!(picker.handle_pointer_event(down(92.0, 4.0)).is_some());
        assert!(picker.is_dragging());
        assert!((picker.hsla().h - 270.0).abs() < EPS);

        // Leaving the ring keeps steering the hue.
        picker.handle_pointer_event(drag(200.0, 92.0));
        assert!(picker.hsla().h.abs() < EPS);
        assert_eq!(emitted.borrow().last().map(String::as_str), Some("#ff0000"));

        picker.handle_pointer_event(up(200.0, 92.0));
        assert!(!picker.is_dragging());
        assert_eq!(emitted.borrow().len(), 2);
        // Rotation follows the hue.
        assert!(picker.triangle().rotation().abs() < EPS);
    }

    #[test]
    fn test_triangle_drag_sets_saturation_and_lightness() {
        let (mut picker, emitted) = red_picker();
        picker.handle_pointer_event(down(92.0, 92.0));
        let hsla = picker.hsla();
        assert!(hsla.h.abs() < EPS);
        assert!((hsla.s - 100.0 / 3.0).abs() < EPS);
        assert!((hsla.l - 50.0).abs() < EPS);
        assert_eq!(emitted.borrow().len(), 1);

        // Dragging past vertex A clamps back onto it.
        picker.handle_pointer_event(drag(300.0, 92.0));
        assert!((picker.hsla().s - 100.0).abs() < EPS);
        assert_eq!(emitted.borrow().last().map(String::as_str), Some("#ff0000"));
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let (mut picker, emitted) = red_picker();
        assert!(picker.handle_pointer_event(down(0.0, 0.0)).is_none());
        assert!(!picker.is_dragging());
        assert!(picker.handle_pointer_event(drag(92.0, 4.0)).is_none());
        assert!(emitted.borrow().is_empty());
    }

    #[test]
    fn test_set_color_does_not_emit() {
        let (mut picker, emitted) = red_picker();
        assert!(picker.set_color(&"#00ff00".to_string()));
        assert!((picker.hsla().h - 120.0).abs() < 1e-3);
        assert!((picker.triangle().rotation() - 120.0_f64.to_radians()).abs() < 1e-3);
        assert!(!picker.set_color(&"#00FF00".to_string()));
        assert!(emitted.borrow().is_empty());
    }

    #[test]
    fn test_ring_keys_keep_hue() {
        let (mut picker, emitted) = red_picker();
        picker.set_focus(Some(PickerPart::Ring));
        assert!(picker.handle_key_event(&KeyEvent::Pressed("ArrowUp".to_string())).is_none());
        assert!(picker.hsla().h.abs() < EPS);
        assert!(emitted.borrow().is_empty());
    }

    #[test]
    fn test_triangle_keys() {
        let (mut picker, emitted) = red_picker();
        assert!(picker.handle_key_event(&KeyEvent::Pressed("ArrowDown".to_string())).is_none());

        picker.set_focus(Some(PickerPart::Triangle));
        assert!(picker.handle_key_event(&KeyEvent::Pressed("ArrowDown".to_string())).is_some());
        let hsla = picker.hsla();
        assert!((hsla.s - 100.0 / 3.0).abs() < EPS);
        // B (black) is below the center when the hue is 0.
        assert!(hsla.l < 50.0);
        assert_eq!(emitted.borrow().len(), 1);
    }

    #[test]
    fn test_press_focuses_part() {
        let (mut picker, _) = red_picker();
        picker.handle_pointer_event(down(92.0, 92.0));
        picker.handle_pointer_event(up(92.0, 92.0));
        assert_eq!(picker.focused(), Some(PickerPart::Triangle));
    }

    #[test]
    fn test_handle_tracks_triangle_reading() {
        let (mut picker, _) = red_picker();
        picker.handle_pointer_event(down(100.0, 80.0));
        let handle = picker.handles()[1];
        assert!((handle.position - Point::new(100.0, 80.0)).hypot() < 1e-6);
    }

    #[test]
    fn test_custom_layout() {
        let layout = WheelLayout {
            size: 300.0,
            ..WheelLayout::default()
        };
        let picker = Picker::new(HexModel).with_layout(layout);
        assert_eq!(picker.ring().center, Point::new(142.0, 142.0));
        assert!((picker.triangle().radius() - 122.0).abs() < EPS);
        assert_eq!(picker.color(), "#000000");
    }

    #[test]
    fn test_drag_holds_capture_until_release() {
        let capture = SharedCapture::default();
        let mut picker = Picker::with_captures(
            HexModel,
            Some("#ff0000".to_string()),
            capture.clone(),
            capture.clone(),
        );
        picker.handle_pointer_event(down(92.0, 4.0));
        assert_eq!(*capture.live.borrow(), 1);
        picker.handle_pointer_event(drag(180.0, 92.0));
        assert_eq!(*capture.live.borrow(), 1);
        picker.handle_pointer_event(up(180.0, 92.0));
        assert_eq!(*capture.live.borrow(), 0);

        // A press outside both parts acquires nothing.
        picker.handle_pointer_event(down(0.0, 0.0));
        assert_eq!(*capture.acquired.borrow(), 1);
    }

    #[test]
    fn test_switching_parts_releases_previous_capture() {
        let capture = SharedCapture::default();
        let mut picker = Picker::with_captures(HexModel, None, capture.clone(), capture.clone());
        picker.handle_pointer_event(down(92.0, 4.0));
        picker.handle_pointer_event(down(92.0, 92.0));
        assert_eq!(*capture.live.borrow(), 1);
        assert_eq!(*capture.acquired.borrow(), 2);
        assert_eq!(picker.focused(), Some(PickerPart::Triangle));
    }

    #[test]
    fn test_dropping_picker_mid_drag_releases_capture() {
        let capture = SharedCapture::default();
        {
            let mut picker = Picker::with_captures(HexModel, None, capture.clone(), capture.clone());
            picker.handle_pointer_event(down(92.0, 92.0));
            assert!(picker.is_dragging());
            assert_eq!(*capture.live.borrow(), 1);
        }
        assert_eq!(*capture.live.borrow(), 0);
    }

    #[test]
    fn test_relayout_ends_drag() {
        let capture = SharedCapture::default();
        let mut picker = Picker::with_captures(HexModel, None, capture.clone(), capture.clone());
        picker.handle_pointer_event(down(92.0, 4.0));
        let picker = picker.with_layout(WheelLayout {
            key_step: 2.0,
            ..WheelLayout::default()
        });
        assert!(!picker.is_dragging());
        assert_eq!(*capture.live.borrow(), 0);
        assert_eq!(picker.layout().key_step, 2.0);
    }
}
