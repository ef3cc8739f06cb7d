//! Pointer/keyboard events and the drag session that turns them into interactions.

use crate::interaction::{ArrowKey, Interaction, KEY_STEP, resolve, resolve_key};
use crate::shapes::Shape;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Which device produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Pointer event in the picker's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        kind: PointerKind,
    },
    /// `pressed` is false when the button was released outside our view.
    Move {
        position: Point,
        kind: PointerKind,
        pressed: bool,
    },
    Up {
        position: Point,
        kind: PointerKind,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => position,
        }
    }

    pub fn kind(&self) -> PointerKind {
        match *self {
            PointerEvent::Down { kind, .. }
            | PointerEvent::Move { kind, .. }
            | PointerEvent::Up { kind, .. } => kind,
        }
    }
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Receives interactions synchronously while an event is being handled.
pub trait InteractionListener {
    /// Called for pointer presses and drags.
    fn on_move(&mut self, interaction: &Interaction);

    /// Called for arrow-key navigation.
    fn on_key(&mut self, interaction: &Interaction);
}

/// Global move/up listeners held for the duration of a drag.
///
/// The host registers whatever it needs in `acquire` and must undo it in
/// `release`. The handler guarantees the calls are paired.
pub trait PointerCapture {
    fn acquire(&mut self, kind: PointerKind);
    fn release(&mut self, kind: PointerKind);
}

/// No-op capture for hosts that track drags themselves.
impl PointerCapture for () {
    fn acquire(&mut self, _kind: PointerKind) {}
    fn release(&mut self, _kind: PointerKind) {}
}

/// Turns raw input into interactions against one shape.
///
/// A drag session starts on `Down`, follows `Move` while the button is held,
/// and ends on `Up`, on a buttonless `Move`, or when the handler is dropped.
#[derive(Debug)]
pub struct InteractiveHandler<C: PointerCapture = ()> {
    capture: C,
    /// Device of the active drag session, if any.
    session: Option<PointerKind>,
    /// Once touch input is seen, mouse events are browser emulation.
    has_touch: bool,
    /// Keyboard step in local units.
    key_step: f64,
}

impl Default for InteractiveHandler<()> {
    fn default() -> Self {
        Self::new(())
    }
}

impl<C: PointerCapture> InteractiveHandler<C> {
    /// Create a handler that acquires `capture` during drags.
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            session: None,
            has_touch: false,
            key_step: KEY_STEP,
        }
    }

    /// Set the keyboard step.
    pub fn with_key_step(mut self, step: f64) -> Self {
        self.key_step = step;
        self
    }

    pub fn set_key_step(&mut self, step: f64) {
        self.key_step = step;
    }

    pub fn key_step(&self) -> f64 {
        self.key_step
    }

    /// Check if a drag session is active.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Process a pointer event; returns the interaction sent to the listener, if any.
    pub fn handle_pointer_event(
        &mut self,
        shape: &Shape,
        event: PointerEvent,
        listener: &mut dyn InteractionListener,
    ) -> Option<Interaction> {
        match event {
            PointerEvent::Down { position, kind } => {
                if self.has_touch && kind == PointerKind::Mouse {
                    return None;
                }
                if kind == PointerKind::Touch {
                    self.has_touch = true;
                }
                let interaction = resolve(position, shape);
                listener.on_move(&interaction);
                self.begin_drag(kind);
                Some(interaction)
            }
            PointerEvent::Move { position, pressed, .. } => {
                self.session?;
                if !pressed {
                    self.end_drag();
                    return None;
                }
                let interaction = resolve(position, shape);
                listener.on_move(&interaction);
                Some(interaction)
            }
            PointerEvent::Up { .. } => {
                self.end_drag();
                None
            }
        }
    }

    /// Process a key event; only arrow key presses produce an interaction.
    pub fn handle_key_event(
        &mut self,
        shape: &Shape,
        event: &KeyEvent,
        listener: &mut dyn InteractionListener,
    ) -> Option<Interaction> {
        let KeyEvent::Pressed(name) = event else {
            return None;
        };
        let key = ArrowKey::from_key_name(name)?;
        let interaction = resolve_key(shape, key, self.key_step);
        listener.on_key(&interaction);
        Some(interaction)
    }

    fn begin_drag(&mut self, kind: PointerKind) {
        // A second press without a release replaces the old session.
        self.end_drag();
        self.capture.acquire(kind);
        self.session = Some(kind);
    }

    /// End the active drag session, releasing the capture.
    pub fn end_drag(&mut self) {
        if let Some(kind) = self.session.take() {
            self.capture.release(kind);
        }
    }
}

impl<C: PointerCapture> Drop for InteractiveHandler<C> {
    fn drop(&mut self) {
        self.end_drag();
    }
}
