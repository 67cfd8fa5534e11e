//! Decoding browser events into engine inputs.

use crate::config::{Axis, Dim};
use crate::engine::HandleId;
use crate::geometry::{Point, TrackRect};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, MouseEvent, TouchEvent};

/// Attribute marking handle elements, valued `start` or `end`. Rendered
/// literally as `data-handle` in `components`.
pub const HANDLE_ATTR: &str = "data-handle";

/// Keys the slider reacts to while a handle has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

impl Key {
    /// Decode a `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Option<Key> {
        match name {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            _ => None,
        }
    }

    /// +1 for ArrowRight/ArrowUp, -1 for ArrowLeft/ArrowDown.
    pub fn direction(self) -> f64 {
        match self {
            Key::ArrowRight | Key::ArrowUp => 1.0,
            Key::ArrowLeft | Key::ArrowDown => -1.0,
        }
    }

    /// The dimension this key adjusts under the given axis mode.
    ///
    /// Single-axis sliders take all four arrows; `xy` splits them into
    /// horizontal (x) and vertical (y).
    pub fn dim(self, axis: Axis) -> Dim {
        match axis {
            Axis::X => Dim::X,
            Axis::Y => Dim::Y,
            Axis::Xy => match self {
                Key::ArrowLeft | Key::ArrowRight => Dim::X,
                Key::ArrowUp | Key::ArrowDown => Dim::Y,
            },
        }
    }
}

pub fn track_rect(element: &Element) -> TrackRect {
    let rect = element.get_bounding_client_rect();
    TrackRect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub fn mouse_point(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

/// Only the primary button drags.
pub fn is_primary_button(event: &MouseEvent) -> bool {
    event.button() == 0
}

/// Client position of the first active touch, falling back to the first
/// changed touch (touchend has no active touches left).
pub fn touch_point(event: &TouchEvent) -> Option<Point> {
    event
        .touches()
        .get(0)
        .or_else(|| event.changed_touches().get(0))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
}

/// Handle element under the event target, if the press landed on one.
pub fn grabbed_handle(event: &Event) -> Option<(HandleId, HtmlElement)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let element = target.closest(&format!("[{}]", HANDLE_ATTR)).ok()??;
    let handle = HandleId::from_attr(&element.get_attribute(HANDLE_ATTR)?)?;
    let element = element.dyn_into::<HtmlElement>().ok()?;
    Some((handle, element))
}
