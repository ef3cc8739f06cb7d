//! Ring and triangle color wheel widget.

use egui::{
    Color32, CursorIcon, EventFilter, Key, Mesh, Pos2, Rect, Sense, Stroke, Ui, Vec2, vec2,
};
use huewheel_core::{
    ColorModel, HslaColor, KeyEvent, Picker, PickerPart, PointerCapture, PointerEvent, PointerKind,
};
use kurbo::Point;

use crate::{sizing, theme};

/// Arrow keys forwarded to the picker, with their DOM names.
const ARROW_KEYS: [(Key, &str); 4] = [
    (Key::ArrowUp, "ArrowUp"),
    (Key::ArrowDown, "ArrowDown"),
    (Key::ArrowLeft, "ArrowLeft"),
    (Key::ArrowRight, "ArrowRight"),
];

/// Convert an HSLA color to an egui color.
pub fn hsla_to_color32(hsla: HslaColor) -> Color32 {
    let rgba = hsla.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Interactive hue ring with a saturation/lightness triangle.
///
/// The widget only paints and forwards input; all color state lives in the
/// [`Picker`].
pub struct ColorWheel<'a, M: ColorModel, C: PointerCapture = ()> {
    picker: &'a mut Picker<M, C>,
    tooltip: Option<&'a str>,
    segments: usize,
}

impl<'a, M: ColorModel, C: PointerCapture> ColorWheel<'a, M, C> {
    /// Create a wheel for `picker`.
    pub fn new(picker: &'a mut Picker<M, C>) -> Self {
        Self {
            picker,
            tooltip: None,
            segments: sizing::RING_SEGMENTS,
        }
    }

    /// Set the hover text.
    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Number of polygons used to paint the ring.
    pub fn segments(mut self, segments: usize) -> Self {
        self.segments = segments.max(3);
        self
    }

    /// Show the wheel and return (changed, rect).
    pub fn show(self, ui: &mut Ui) -> (bool, Rect) {
        let layout = *self.picker.layout();
        let size = layout.size as f32;
        let (rect, mut response) = ui.allocate_exact_size(vec2(size, size), Sense::click_and_drag());
        let origin = rect.min + Vec2::splat(layout.padding as f32);

        let mut changed = false;
        if let Some(event) = pointer_event(ui, &response, origin, self.picker.is_dragging()) {
            if let PointerEvent::Down { .. } = event {
                response.request_focus();
            }
            changed |= self.picker.handle_pointer_event(event).is_some();
        }

        if response.gained_focus() && self.picker.focused().is_none() {
            self.picker.set_focus(Some(PickerPart::Ring));
        }
        if response.has_focus() {
            ui.memory_mut(|m| {
                m.set_focus_lock_filter(
                    response.id,
                    EventFilter {
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        ..Default::default()
                    },
                )
            });
            for (key, name) in ARROW_KEYS {
                if ui.input(|i| i.key_pressed(key)) {
                    let event = KeyEvent::Pressed(name.to_string());
                    changed |= self.picker.handle_key_event(&event).is_some();
                }
            }
        } else if response.lost_focus() {
            self.picker.set_focus(None);
        }

        if changed {
            log::debug!("Color wheel changed to {:?}", self.picker.hsla());
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui, origin, response.has_focus());
        }

        let response = match self.tooltip {
            Some(tooltip) => response.on_hover_text(tooltip),
            None => response,
        };
        response.on_hover_cursor(CursorIcon::Crosshair);
        (changed, rect)
    }

    fn paint(&self, ui: &Ui, origin: Pos2, focused: bool) {
        let painter = ui.painter();
        let to_screen = |p: Point| origin + vec2(p.x as f32, p.y as f32);
        let ring = self.picker.ring();
        let center = to_screen(ring.center);
        let outer_radius = ring.outer_radius as f32;
        let inner_radius = ring.inner_radius as f32;

        // Hue ring as segments; angles grow clockwise with y pointing down.
        for i in 0..self.segments {
            let angle1 = (i as f32 / self.segments as f32) * std::f32::consts::TAU;
            let angle2 = ((i + 1) as f32 / self.segments as f32) * std::f32::consts::TAU;
            let hue = (i as f64 + 0.5) / self.segments as f64 * 360.0;
            let hue_color = hsla_to_color32(HslaColor::pure_hue(hue));

            let at = |radius: f32, angle: f32| center + radius * Vec2::angled(angle);
            painter.add(egui::Shape::convex_polygon(
                vec![
                    at(outer_radius, angle1),
                    at(outer_radius, angle2),
                    at(inner_radius, angle2),
                    at(inner_radius, angle1),
                ],
                hue_color,
                Stroke::NONE,
            ));
        }

        // A is the pure hue, B black, C white.
        let [a, b, c] = self.picker.triangle().vertices();
        let hsla = self.picker.hsla();
        let mut mesh = Mesh::default();
        mesh.colored_vertex(to_screen(a), hsla_to_color32(HslaColor::pure_hue(hsla.h)));
        mesh.colored_vertex(to_screen(b), Color32::BLACK);
        mesh.colored_vertex(to_screen(c), Color32::WHITE);
        mesh.add_triangle(0, 1, 2);
        painter.add(egui::Shape::mesh(mesh));

        for handle in self.picker.handles() {
            let position = to_screen(handle.position);
            let radius = match handle.part {
                PickerPart::Ring => ring_handle_radius(ring.outer_radius - ring.inner_radius),
                PickerPart::Triangle => sizing::HANDLE_RADIUS,
            };
            let active = focused && self.picker.focused() == Some(handle.part);
            let stroke_color = if active { theme::ACCENT } else { Color32::WHITE };
            painter.circle_filled(position, radius, hsla_to_color32(handle.color));
            painter.circle_stroke(position, radius, Stroke::new(2.0, stroke_color));
            painter.circle_stroke(position, radius + 1.0, Stroke::new(1.0, theme::BORDER));
        }
    }
}

/// Ring handles fill most of the band.
pub(crate) fn ring_handle_radius(ring_width: f64) -> f32 {
    (ring_width as f32 / 2.0 - 1.0).max(sizing::HANDLE_RADIUS)
}

/// Translate this frame's primary-button input into a picker pointer event.
fn pointer_event(
    ui: &Ui,
    response: &egui::Response,
    origin: Pos2,
    dragging: bool,
) -> Option<PointerEvent> {
    let (pressed, down, released, pos, touch) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
            i.any_touches(),
        )
    });
    let pos = pos?;
    let kind = if touch { PointerKind::Touch } else { PointerKind::Mouse };
    let local = pos - origin;
    let position = Point::new(local.x as f64, local.y as f64);

    if pressed && response.hovered() {
        Some(PointerEvent::Down { position, kind })
    } else if dragging && released {
        Some(PointerEvent::Up { position, kind })
    } else if dragging {
        Some(PointerEvent::Move {
            position,
            kind,
            pressed: down,
        })
    } else {
        None
    }
}
