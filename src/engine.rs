//! Interaction state machine behind the slider.
//!
//! `SliderEngine` owns the handle coordinates together with the drag and
//! focus state. Every input method takes plain values (client pixels, a
//! track rectangle, a decoded key) and returns the [`Notification`] the host
//! should hear about, if any. Nothing in here touches the DOM.
//!
//! ```text
//!   idle --pointer_down / track_press--> dragging --pointer_up--> idle
//!                                         |  ^                 (DragEnded)
//!                                         +--+ pointer_move (Changed)
//! ```

use crate::config::{Dim, SliderConfig, SliderOptions};
use crate::geometry::{
    clamp_to_bounds, pixel_from_value, step_value, value_from_pixel, Coord, Point, TrackRect,
};
use crate::input::Key;
use log::debug;
use serde::{Deserialize, Serialize};

/// Which handle an event refers to. Single-value sliders only have `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleId {
    Start,
    End,
}

impl HandleId {
    pub fn other(self) -> HandleId {
        match self {
            HandleId::Start => HandleId::End,
            HandleId::End => HandleId::Start,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HandleId::Start => "start",
            HandleId::End => "end",
        }
    }

    pub fn from_attr(value: &str) -> Option<HandleId> {
        match value {
            "start" => Some(HandleId::Start),
            "end" => Some(HandleId::End),
            _ => None,
        }
    }
}

/// An active drag: the handle and the handle-minus-pointer offset captured
/// when it started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub handle: HandleId,
    pub offset: Point,
}

/// Something the host should be told about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    Changed { handle: HandleId, value: Coord },
    DragEnded { handle: HandleId, value: Coord },
}

impl Notification {
    pub fn handle(&self) -> HandleId {
        match *self {
            Notification::Changed { handle, .. } | Notification::DragEnded { handle, .. } => handle,
        }
    }

    pub fn value(&self) -> Coord {
        match *self {
            Notification::Changed { value, .. } | Notification::DragEnded { value, .. } => value,
        }
    }

    /// Attach the effective configuration for delivery to callbacks.
    pub fn into_change(self, config: &SliderConfig) -> SliderChange {
        SliderChange {
            handle: self.handle(),
            value: self.value(),
            config: config.clone(),
        }
    }
}

/// Payload of `on_change` / `on_drag_end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderChange {
    pub handle: HandleId,
    pub value: Coord,
    pub config: SliderConfig,
}

/// Everything the view needs to render one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderView {
    pub config: SliderConfig,
    pub start: Coord,
    pub end: Option<Coord>,
    pub dragging: Option<HandleId>,
    pub focused: Option<HandleId>,
}

#[derive(Debug, Clone)]
pub struct SliderEngine {
    config: SliderConfig,
    start: Coord,
    end: Option<Coord>,
    drag: Option<Drag>,
    focus: Option<HandleId>,
}

impl SliderEngine {
    /// Initial coordinates are clamped to bounds (not snapped). In range
    /// mode a missing end defaults to the maximum and the two handles are
    /// put in order.
    pub fn new(config: SliderConfig, start: Coord, end: Option<Coord>) -> Self {
        let mut engine = Self {
            config,
            start: Coord::default(),
            end: None,
            drag: None,
            focus: None,
        };
        engine.place(start, end);
        engine
    }

    pub fn from_options(options: &SliderOptions) -> Self {
        let config = options.resolve_lenient();
        let start = options.initial_start(&config);
        let end = options.initial_end(&config);
        Self::new(config, start, end)
    }

    /// Replace configuration and coordinates after the host changed its
    /// props. Emits nothing; drag and focus survive if their handle still
    /// exists.
    pub fn sync(&mut self, config: SliderConfig, start: Coord, end: Option<Coord>) {
        self.config = config;
        self.place(start, end);
        if self.drag.is_some_and(|d| self.value(d.handle).is_none()) {
            self.drag = None;
        }
        if self.focus.is_some_and(|h| self.value(h).is_none()) {
            self.focus = None;
        }
    }

    fn place(&mut self, start: Coord, end: Option<Coord>) {
        let start = self.clamp_coord(start);
        if !self.config.range {
            self.start = start;
            self.end = None;
            return;
        }
        let end = self.clamp_coord(end.unwrap_or_else(|| self.config.max_coord()));
        let (mut start, mut end) = (start, end);
        for &dim in self.config.axis.dims() {
            if let (Some(a), Some(b)) = (start.get(dim), end.get(dim)) {
                if a > b {
                    start = start.with(dim, b);
                    end = end.with(dim, a);
                }
            }
        }
        self.start = start;
        self.end = Some(end);
    }

    fn clamp_coord(&self, coord: Coord) -> Coord {
        let axis = self.config.axis;
        let mut out = Coord::for_axis(axis, coord.x, coord.y.unwrap_or(self.config.y_min));
        for &dim in axis.dims() {
            if let Some(v) = out.get(dim) {
                out = out.with(dim, clamp_to_bounds(v, &self.config.bounds(dim)));
            }
        }
        out
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn value(&self, handle: HandleId) -> Option<Coord> {
        match handle {
            HandleId::Start => Some(self.start),
            HandleId::End => self.end,
        }
    }

    pub fn handles(&self) -> impl Iterator<Item = HandleId> + '_ {
        [HandleId::Start, HandleId::End]
            .into_iter()
            .filter(move |&h| self.value(h).is_some())
    }

    pub fn drag(&self) -> Option<Drag> {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn focused(&self) -> Option<HandleId> {
        self.focus
    }

    pub fn view(&self) -> SliderView {
        SliderView {
            config: self.config.clone(),
            start: self.start,
            end: self.end,
            dragging: self.drag.map(|d| d.handle),
            focused: self.focus,
        }
    }

    /// Track-local pixel position of a handle. Inactive axes sit at 0.
    pub fn handle_position(&self, handle: HandleId, rect: &TrackRect) -> Option<Point> {
        let coord = self.value(handle)?;
        let mut pos = Point::ZERO;
        for &dim in self.config.axis.dims() {
            let Some(v) = coord.get(dim) else { continue };
            let px = pixel_from_value(v, rect.extent(dim), &self.config.bounds(dim));
            match dim {
                Dim::X => pos.x = px,
                Dim::Y => pos.y = px,
            }
        }
        Some(pos)
    }

    /// Handle closest to a track-local point. Ties go to `End` when the point
    /// lies past it, otherwise to `Start`.
    pub fn nearest_handle(&self, local: Point, rect: &TrackRect) -> HandleId {
        let (Some(start), Some(end)) = (
            self.handle_position(HandleId::Start, rect),
            self.handle_position(HandleId::End, rect),
        ) else {
            return HandleId::Start;
        };
        let dims = self.config.axis.dims();
        let to_start = local.distance_on(start, dims);
        let to_end = local.distance_on(end, dims);
        if to_start < to_end {
            HandleId::Start
        } else if to_end < to_start {
            HandleId::End
        } else if local.get(dims[0]) > end.get(dims[0]) {
            HandleId::End
        } else {
            HandleId::Start
        }
    }

    /// Mouse-down or touch-start on a handle. Returns whether a drag began.
    pub fn pointer_down(&mut self, handle: HandleId, client: Point, rect: &TrackRect) -> bool {
        if self.config.disabled {
            return false;
        }
        let Some(local) = self.handle_position(handle, rect) else {
            return false;
        };
        let offset = rect.to_client(local) - client;
        debug!("drag start on {} handle, offset {:?}", handle.as_str(), offset);
        self.drag = Some(Drag { handle, offset });
        true
    }

    /// Pointer moved anywhere on the page. Only acts while dragging.
    pub fn pointer_move(&mut self, client: Point, rect: &TrackRect) -> Option<Notification> {
        let drag = self.drag?;
        let local = rect.to_local(client + drag.offset);
        self.move_to_pixel(drag.handle, local, rect)
    }

    /// Pointer released. Ends the drag and reports the final value; ignored
    /// while idle.
    pub fn pointer_up(&mut self) -> Option<Notification> {
        let drag = self.drag.take()?;
        let value = self.value(drag.handle)?;
        debug!("drag end on {} handle at {:?}", drag.handle.as_str(), value);
        Some(Notification::DragEnded {
            handle: drag.handle,
            value,
        })
    }

    /// Drop an active drag without notifying, e.g. on unmount.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Press on the bare track: jump the nearest handle there and keep
    /// dragging it from the pressed point.
    pub fn track_press(&mut self, client: Point, rect: &TrackRect) -> Option<Notification> {
        if self.config.disabled {
            return None;
        }
        let local = rect.to_local(client);
        let handle = self.nearest_handle(local, rect);
        debug!("track press at {:?}, moving {} handle", local, handle.as_str());
        self.drag = Some(Drag {
            handle,
            offset: Point::ZERO,
        });
        self.move_to_pixel(handle, local, rect)
    }

    pub fn focus(&mut self, handle: HandleId) {
        if self.value(handle).is_some() {
            self.focus = Some(handle);
        }
    }

    pub fn blur(&mut self) {
        self.focus = None;
    }

    /// Arrow key while a handle has focus: to the adjacent grid point,
    /// clamped.
    pub fn key_down(&mut self, key: Key) -> Option<Notification> {
        if self.config.disabled {
            return None;
        }
        let handle = self.focus?;
        let current = self.value(handle)?;
        let dim = key.dim(self.config.axis);
        let value = current.get(dim)?;
        let stepped = step_value(value, key.direction(), &self.config.bounds(dim));
        self.commit(handle, current.with(dim, stepped))
    }

    fn move_to_pixel(
        &mut self,
        handle: HandleId,
        local: Point,
        rect: &TrackRect,
    ) -> Option<Notification> {
        let mut next = self.value(handle)?;
        for &dim in self.config.axis.dims() {
            let bounds = self.config.bounds(dim);
            next = next.with(dim, value_from_pixel(local.get(dim), rect.extent(dim), &bounds));
        }
        self.commit(handle, next)
    }

    fn commit(&mut self, handle: HandleId, next: Coord) -> Option<Notification> {
        let current = self.value(handle)?;
        let next = self.keep_order(handle, next);
        if next == current {
            return None;
        }
        match handle {
            HandleId::Start => self.start = next,
            HandleId::End => self.end = Some(next),
        }
        Some(Notification::Changed {
            handle,
            value: next,
        })
    }

    /// In range mode `Start` may not pass `End` on any axis.
    fn keep_order(&self, handle: HandleId, next: Coord) -> Coord {
        if !self.config.range {
            return next;
        }
        let Some(other) = self.value(handle.other()) else {
            return next;
        };
        let mut out = next;
        for &dim in self.config.axis.dims() {
            if let (Some(v), Some(o)) = (out.get(dim), other.get(dim)) {
                let v = match handle {
                    HandleId::Start => v.min(o),
                    HandleId::End => v.max(o),
                };
                out = out.with(dim, v);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Axis, AxisBounds};

    fn rect() -> TrackRect {
        TrackRect::new(0.0, 0.0, 200.0, 100.0)
    }

    fn x_engine(start: f64) -> SliderEngine {
        SliderEngine::new(SliderConfig::default(), Coord::new(start, None), None)
    }

    fn range_engine(start: f64, end: f64) -> SliderEngine {
        let mut config = SliderConfig::default();
        config.range = true;
        SliderEngine::new(config, Coord::new(start, None), Some(Coord::new(end, None)))
    }

    #[test]
    fn drag_updates_value_and_ends_once() {
        let mut engine = x_engine(0.0);
        assert!(engine.pointer_down(HandleId::Start, Point::new(0.0, 50.0), &rect()));
        assert!(engine.is_dragging());

        let note = engine.pointer_move(Point::new(100.0, 50.0), &rect());
        assert_eq!(
            note,
            Some(Notification::Changed {
                handle: HandleId::Start,
                value: Coord::new(50.0, None)
            })
        );
        // same position, no change
        assert_eq!(engine.pointer_move(Point::new(100.0, 50.0), &rect()), None);

        let end = engine.pointer_up();
        assert_eq!(
            end,
            Some(Notification::DragEnded {
                handle: HandleId::Start,
                value: Coord::new(50.0, None)
            })
        );
        assert_eq!(engine.pointer_up(), None);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let mut engine = x_engine(50.0);
        // handle sits at 100px; grab it 10px to its right
        engine.pointer_down(HandleId::Start, Point::new(110.0, 0.0), &rect());
        assert_eq!(engine.drag().map(|d| d.offset), Some(Point::new(-10.0, 0.0)));
        let note = engine.pointer_move(Point::new(130.0, 0.0), &rect());
        assert_eq!(note.map(|n| n.value().x), Some(60.0));
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut engine = x_engine(10.0);
        assert_eq!(engine.pointer_move(Point::new(150.0, 0.0), &rect()), None);
        assert_eq!(engine.value(HandleId::Start), Some(Coord::new(10.0, None)));
    }

    #[test]
    fn drag_far_outside_track_clamps() {
        let mut engine = x_engine(50.0);
        engine.pointer_down(HandleId::Start, Point::new(100.0, 0.0), &rect());
        let note = engine.pointer_move(Point::new(9000.0, 0.0), &rect());
        assert_eq!(note.map(|n| n.value().x), Some(100.0));
        let note = engine.pointer_move(Point::new(-9000.0, 0.0), &rect());
        assert_eq!(note.map(|n| n.value().x), Some(0.0));
    }

    #[test]
    fn track_press_jumps_and_starts_drag() {
        let mut engine = x_engine(0.0);
        let note = engine.track_press(Point::new(50.0, 10.0), &rect());
        assert_eq!(note.map(|n| n.value().x), Some(25.0));
        assert_eq!(engine.drag().map(|d| d.offset), Some(Point::ZERO));
        assert_eq!(
            engine.pointer_up(),
            Some(Notification::DragEnded {
                handle: HandleId::Start,
                value: Coord::new(25.0, None)
            })
        );
    }

    #[test]
    fn track_press_moves_nearest_range_handle() {
        let mut engine = range_engine(20.0, 80.0);
        let note = engine.track_press(Point::new(150.0, 0.0), &rect());
        assert_eq!(note.map(|n| n.handle()), Some(HandleId::End));
        assert_eq!(engine.value(HandleId::End), Some(Coord::new(75.0, None)));
        engine.pointer_up();

        let note = engine.track_press(Point::new(10.0, 0.0), &rect());
        assert_eq!(note.map(|n| n.handle()), Some(HandleId::Start));
        assert_eq!(engine.value(HandleId::Start), Some(Coord::new(5.0, None)));
    }

    #[test]
    fn coincident_handles_split_by_side() {
        let mut engine = range_engine(50.0, 50.0);
        engine.track_press(Point::new(150.0, 0.0), &rect());
        assert_eq!(engine.drag().map(|d| d.handle), Some(HandleId::End));
        engine.pointer_up();
        engine.track_press(Point::new(20.0, 0.0), &rect());
        assert_eq!(engine.drag().map(|d| d.handle), Some(HandleId::Start));
    }

    #[test]
    fn range_handles_do_not_cross() {
        let mut engine = range_engine(20.0, 60.0);
        engine.pointer_down(HandleId::Start, Point::new(40.0, 0.0), &rect());
        let note = engine.pointer_move(Point::new(180.0, 0.0), &rect());
        assert_eq!(note.map(|n| n.value().x), Some(60.0));
        engine.pointer_up();

        engine.focus(HandleId::End);
        assert_eq!(engine.key_down(Key::ArrowLeft), None);
        assert_eq!(engine.value(HandleId::End), Some(Coord::new(60.0, None)));
    }

    #[test]
    fn reversed_initial_range_is_ordered() {
        let engine = range_engine(70.0, 30.0);
        assert_eq!(engine.value(HandleId::Start), Some(Coord::new(30.0, None)));
        assert_eq!(engine.value(HandleId::End), Some(Coord::new(70.0, None)));
    }

    #[test]
    fn keyboard_needs_focus() {
        let mut engine = x_engine(10.0);
        assert_eq!(engine.key_down(Key::ArrowRight), None);

        engine.focus(HandleId::Start);
        let note = engine.key_down(Key::ArrowRight);
        assert_eq!(note.map(|n| n.value().x), Some(11.0));
        let note = engine.key_down(Key::ArrowDown);
        assert_eq!(note.map(|n| n.value().x), Some(10.0));

        engine.blur();
        assert_eq!(engine.key_down(Key::ArrowRight), None);
        assert_eq!(engine.value(HandleId::Start), Some(Coord::new(10.0, None)));
    }

    #[test]
    fn keyboard_from_off_grid_moves_to_adjacent_step() {
        let mut config = SliderConfig::default();
        config.x_step = 5.0;
        let mut engine = SliderEngine::new(config, Coord::new(32.0, None), None);
        engine.focus(HandleId::Start);
        let note = engine.key_down(Key::ArrowLeft);
        assert_eq!(note.map(|n| n.value().x), Some(30.0));

        engine.sync(engine.config().clone(), Coord::new(32.0, None), None);
        let note = engine.key_down(Key::ArrowRight);
        assert_eq!(note.map(|n| n.value().x), Some(35.0));
    }

    #[test]
    fn keyboard_stops_at_bounds() {
        let mut engine = x_engine(100.0);
        engine.focus(HandleId::Start);
        assert_eq!(engine.key_down(Key::ArrowUp), None);
    }

    #[test]
    fn xy_keys_adjust_separate_axes() {
        let config = SliderConfig::from_bounds(
            Axis::Xy,
            AxisBounds::new(0.0, 10.0, 1.0),
            AxisBounds::new(0.0, 1.0, 0.25),
        );
        let mut engine = SliderEngine::new(config, Coord::new(5.0, Some(0.5)), None);
        engine.focus(HandleId::Start);
        let note = engine.key_down(Key::ArrowUp);
        assert_eq!(note.map(|n| n.value()), Some(Coord::new(5.0, Some(0.75))));
        let note = engine.key_down(Key::ArrowLeft);
        assert_eq!(note.map(|n| n.value()), Some(Coord::new(4.0, Some(0.75))));
    }

    #[test]
    fn xy_drag_maps_both_axes() {
        let config = SliderConfig::from_bounds(
            Axis::Xy,
            AxisBounds::default(),
            AxisBounds::new(0.0, 10.0, 1.0),
        );
        let mut engine = SliderEngine::new(config, Coord::new(0.0, Some(0.0)), None);
        let note = engine.track_press(Point::new(50.0, 30.0), &rect());
        assert_eq!(note.map(|n| n.value()), Some(Coord::new(25.0, Some(3.0))));
    }

    #[test]
    fn focus_on_missing_handle_is_ignored() {
        let mut engine = x_engine(0.0);
        engine.focus(HandleId::End);
        assert_eq!(engine.focused(), None);
        assert!(!engine.pointer_down(HandleId::End, Point::ZERO, &rect()));
    }

    #[test]
    fn disabled_slider_ignores_input() {
        let mut config = SliderConfig::default();
        config.disabled = true;
        let mut engine = SliderEngine::new(config, Coord::new(10.0, None), None);
        assert!(!engine.pointer_down(HandleId::Start, Point::ZERO, &rect()));
        assert_eq!(engine.track_press(Point::new(100.0, 0.0), &rect()), None);
        engine.focus(HandleId::Start);
        assert_eq!(engine.key_down(Key::ArrowRight), None);
    }

    #[test]
    fn sync_clamps_without_notifying() {
        let mut engine = x_engine(90.0);
        let config = SliderConfig::from_bounds(
            Axis::X,
            AxisBounds::new(0.0, 50.0, 1.0),
            AxisBounds::default(),
        );
        engine.sync(config, Coord::new(90.0, None), None);
        assert_eq!(engine.value(HandleId::Start), Some(Coord::new(50.0, None)));
    }

    #[test]
    fn sync_out_of_range_mode_drops_end_drag() {
        let mut engine = range_engine(10.0, 90.0);
        engine.track_press(Point::new(190.0, 0.0), &rect());
        engine.focus(HandleId::End);
        engine.sync(SliderConfig::default(), Coord::new(10.0, None), None);
        assert!(!engine.is_dragging());
        assert_eq!(engine.focused(), None);
        assert_eq!(engine.handles().count(), 1);
    }

    #[test]
    fn handle_ids_round_trip_through_attributes() {
        for handle in [HandleId::Start, HandleId::End] {
            assert_eq!(HandleId::from_attr(handle.as_str()), Some(handle));
        }
        assert_eq!(HandleId::from_attr("middle"), None);
    }

    #[test]
    fn notification_carries_effective_config() {
        let engine = x_engine(0.0);
        let change = Notification::Changed {
            handle: HandleId::Start,
            value: Coord::new(3.0, None),
        }
        .into_change(engine.config());
        assert_eq!(change.config.x_max, 100.0);
        assert_eq!(change.value.y, None);
    }
}
