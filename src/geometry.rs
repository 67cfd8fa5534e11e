//! Pixel <-> value mapping along the slider track.
//!
//! All functions here are pure and never panic, including on inverted
//! bounds (`min > max`); results for inverted bounds are unspecified.

use crate::config::{Axis, AxisBounds, Dim};
use crate::utils::{decimal_places, round_to_places};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Slack when counting whole steps in a span, so 0.3 / 0.1 is 3 and not 2.
const STEP_EPSILON: f64 = 1e-9;

/// A position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn get(&self, dim: Dim) -> f64 {
        match dim {
            Dim::X => self.x,
            Dim::Y => self.y,
        }
    }

    /// Euclidean distance over the given dimensions only.
    pub fn distance_on(&self, other: Point, dims: &[Dim]) -> f64 {
        dims.iter()
            .map(|&d| (self.get(d) - other.get(d)).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Bounding box of the track in client (viewport) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl TrackRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Length of the track along a dimension.
    pub fn extent(&self, dim: Dim) -> f64 {
        match dim {
            Dim::X => self.width,
            Dim::Y => self.height,
        }
    }

    /// Client position -> track-local position.
    pub fn to_local(&self, client: Point) -> Point {
        client - self.origin()
    }

    /// Track-local position -> client position.
    pub fn to_client(&self, local: Point) -> Point {
        local + self.origin()
    }
}

/// A slider value. `y` is present only when the axis mode includes y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Coord {
    pub fn new(x: f64, y: Option<f64>) -> Self {
        Self { x, y }
    }

    /// Build a coordinate, dropping `y` when the axis has none.
    pub fn for_axis(axis: Axis, x: f64, y: f64) -> Self {
        Self {
            x,
            y: axis.has_y().then_some(y),
        }
    }

    pub fn get(&self, dim: Dim) -> Option<f64> {
        match dim {
            Dim::X => Some(self.x),
            Dim::Y => self.y,
        }
    }

    pub fn with(mut self, dim: Dim, value: f64) -> Self {
        match dim {
            Dim::X => self.x = value,
            Dim::Y => self.y = Some(value),
        }
        self
    }
}

/// Clamp into `[min, max]`. Inverted bounds clamp to `max`.
pub fn clamp_to_bounds(value: f64, bounds: &AxisBounds) -> f64 {
    value.max(bounds.min).min(bounds.max)
}

/// Snap an offset from `min` (in value units) onto the step grid and clamp
/// it to the largest whole step that still fits below `max`.
pub fn snap_offset(offset: f64, bounds: &AxisBounds) -> f64 {
    let span = bounds.span();
    if !(span > 0.0) || !bounds.has_valid_step() {
        return bounds.min;
    }
    grid_value((offset / bounds.step).round(), bounds)
}

/// Value of the `steps`-th grid point, limited to the grid inside the bounds.
/// Expects a positive span and a valid step.
fn grid_value(steps: f64, bounds: &AxisBounds) -> f64 {
    let max_steps = (bounds.span() / bounds.step + STEP_EPSILON).floor();
    let steps = steps.max(0.0).min(max_steps);
    let places = decimal_places(bounds.step).max(decimal_places(bounds.min));
    round_to_places(bounds.min + steps * bounds.step, places).min(bounds.max)
}

/// Map a pixel position along a track of length `extent` to a stepped value.
///
/// Positions outside the track clamp to its edges; a zero-length track maps
/// everything to `min`.
pub fn value_from_pixel(pos: f64, extent: f64, bounds: &AxisBounds) -> f64 {
    if !(extent > 0.0) {
        return bounds.min;
    }
    let ratio = pos.max(0.0).min(extent) / extent;
    snap_offset(ratio * bounds.span(), bounds)
}

/// Position of a value as a percentage of the track, in `[0, 100]`.
pub fn percent_from_value(value: f64, bounds: &AxisBounds) -> f64 {
    let span = bounds.span();
    if !(span > 0.0) {
        return 0.0;
    }
    ((value - bounds.min) / span * 100.0).max(0.0).min(100.0)
}

/// Pixel offset of a value along a track of length `extent`.
pub fn pixel_from_value(value: f64, extent: f64, bounds: &AxisBounds) -> f64 {
    percent_from_value(value, bounds) / 100.0 * extent
}

/// Move a value to the neighbouring grid point in `direction` (positive up,
/// negative down). Off-grid values go to the nearest grid point strictly
/// past them, so a move never skips a grid point. At a bound the value is
/// returned unchanged.
pub fn step_value(value: f64, direction: f64, bounds: &AxisBounds) -> f64 {
    if !(bounds.span() > 0.0) || !bounds.has_valid_step() {
        return bounds.min;
    }
    let position = (value - bounds.min) / bounds.step;
    if direction > 0.0 {
        grid_value((position + STEP_EPSILON).floor() + 1.0, bounds).max(value)
    } else if direction < 0.0 {
        grid_value((position - STEP_EPSILON).ceil() - 1.0, bounds).min(value)
    } else {
        grid_value(position.round(), bounds)
    }
}
