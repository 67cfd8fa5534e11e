//! Slider configuration: defaults, axis modes and resolved bounds.
//!
//! `SliderOptions` is what a host hands us (every field optional, camelCase
//! when it comes from JavaScript). `SliderConfig` is the effective
//! configuration with all defaults resolved; it is what change
//! notifications carry back to the host.

use crate::geometry::Coord;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

// Default bounds for any axis without explicit values
pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 100.0;
pub const DEFAULT_STEP: f64 = 1.0;

// Styling
pub const DEFAULT_CLASS_PREFIX: &str = "range-slider";

/// Which axes the slider moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
    Xy,
}

impl Axis {
    pub fn has_x(self) -> bool {
        matches!(self, Axis::X | Axis::Xy)
    }

    pub fn has_y(self) -> bool {
        matches!(self, Axis::Y | Axis::Xy)
    }

    /// The active dimensions, x first.
    pub fn dims(self) -> &'static [Dim] {
        match self {
            Axis::X => &[Dim::X],
            Axis::Y => &[Dim::Y],
            Axis::Xy => &[Dim::X, Dim::Y],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Xy => "xy",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dimension of a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    X,
    Y,
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::X => f.write_str("x"),
            Dim::Y => f.write_str("y"),
        }
    }
}

/// Value range and step of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
        }
    }
}

impl AxisBounds {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Fill in defaults for any missing part.
    pub fn resolve(min: Option<f64>, max: Option<f64>, step: Option<f64>) -> Self {
        Self {
            min: min.unwrap_or(DEFAULT_MIN),
            max: max.unwrap_or(DEFAULT_MAX),
            step: step.unwrap_or(DEFAULT_STEP),
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// `min > max` is accepted but yields caller-defined results.
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    pub fn has_valid_step(&self) -> bool {
        self.step.is_finite() && self.step > 0.0
    }

    pub fn validate(&self, dim: Dim) -> Result<(), ConfigError> {
        for value in [self.min, self.max] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteBound { dim, value });
            }
        }
        if !self.has_valid_step() {
            return Err(ConfigError::InvalidStep {
                dim,
                step: self.step,
            });
        }
        Ok(())
    }
}

/// Configuration problems detected while resolving options.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Step must be finite and strictly positive
    InvalidStep { dim: Dim, step: f64 },
    NonFiniteBound { dim: Dim, value: f64 },
    /// Options object coming from JavaScript could not be read
    Options(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidStep { dim, step } => {
                write!(f, "Invalid {}Step {}: must be a positive number", dim, step)
            }
            ConfigError::NonFiniteBound { dim, value } => {
                write!(f, "Invalid {} bound {}: must be a finite number", dim, value)
            }
            ConfigError::Options(msg) => write!(f, "Invalid slider options: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Effective slider configuration with every default resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderConfig {
    pub axis: Axis,
    pub class_name_prefix: String,
    pub x_min: f64,
    pub x_max: f64,
    pub x_step: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub y_step: f64,
    pub range: bool,
    pub disabled: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self::from_bounds(Axis::default(), AxisBounds::default(), AxisBounds::default())
    }
}

impl SliderConfig {
    pub fn from_bounds(axis: Axis, x: AxisBounds, y: AxisBounds) -> Self {
        Self {
            axis,
            class_name_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            x_min: x.min,
            x_max: x.max,
            x_step: x.step,
            y_min: y.min,
            y_max: y.max,
            y_step: y.step,
            range: false,
            disabled: false,
        }
    }

    pub fn bounds(&self, dim: Dim) -> AxisBounds {
        match dim {
            Dim::X => AxisBounds::new(self.x_min, self.x_max, self.x_step),
            Dim::Y => AxisBounds::new(self.y_min, self.y_max, self.y_step),
        }
    }

    fn set_bounds(&mut self, dim: Dim, bounds: AxisBounds) {
        match dim {
            Dim::X => {
                self.x_min = bounds.min;
                self.x_max = bounds.max;
                self.x_step = bounds.step;
            }
            Dim::Y => {
                self.y_min = bounds.min;
                self.y_max = bounds.max;
                self.y_step = bounds.step;
            }
        }
    }

    /// Check the bounds of every active axis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.axis
            .dims()
            .iter()
            .try_for_each(|&dim| self.bounds(dim).validate(dim))
    }

    /// Replace unusable steps with the default and warn about inverted bounds.
    ///
    /// Inverted bounds are kept as given.
    pub fn sanitized(mut self) -> Self {
        for &dim in self.axis.dims() {
            let mut bounds = self.bounds(dim);
            if !bounds.has_valid_step() {
                let err = ConfigError::InvalidStep {
                    dim,
                    step: bounds.step,
                };
                warn!("{}; falling back to step {}", err, DEFAULT_STEP);
                bounds.step = DEFAULT_STEP;
                self.set_bounds(dim, bounds);
            }
            if bounds.is_inverted() {
                warn!(
                    "{} bounds are inverted (min {} > max {})",
                    dim, bounds.min, bounds.max
                );
            }
        }
        self
    }

    /// Coordinate with every active axis at its minimum.
    pub fn min_coord(&self) -> Coord {
        Coord::for_axis(self.axis, self.x_min, self.y_min)
    }

    /// Coordinate with every active axis at its maximum.
    pub fn max_coord(&self) -> Coord {
        Coord::for_axis(self.axis, self.x_max, self.y_max)
    }
}

/// Host-supplied slider options; anything missing takes its default.
///
/// Equality compares numbers bit for bit, so options holding a NaN still
/// equal themselves and an unchanged prop never looks like a change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderOptions {
    pub axis: Option<Axis>,
    pub class_name_prefix: Option<String>,
    pub x: Option<f64>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub x_step: Option<f64>,
    pub y: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub y_step: Option<f64>,
    pub range: Option<bool>,
    pub x_end: Option<f64>,
    pub y_end: Option<f64>,
    pub disabled: Option<bool>,
}

impl PartialEq for SliderOptions {
    fn eq(&self, other: &Self) -> bool {
        self.axis == other.axis
            && self.class_name_prefix == other.class_name_prefix
            && self.range == other.range
            && self.disabled == other.disabled
            && self.numbers() == other.numbers()
    }
}

impl SliderOptions {
    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Options(e.to_string()))
    }

    fn build(&self) -> SliderConfig {
        let axis = self.axis.unwrap_or_default();
        let x = AxisBounds::resolve(self.x_min, self.x_max, self.x_step);
        let y = AxisBounds::resolve(self.y_min, self.y_max, self.y_step);
        let mut config = SliderConfig::from_bounds(axis, x, y);
        if let Some(prefix) = &self.class_name_prefix {
            config.class_name_prefix = prefix.clone();
        }
        config.range = self.range.unwrap_or(false);
        config.disabled = self.disabled.unwrap_or(false);
        config
    }

    /// Resolve defaults into an effective configuration.
    pub fn resolve(&self) -> Result<SliderConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }

    /// Like [`resolve`](Self::resolve) but never fails: bad steps fall back to
    /// the default with a warning.
    pub fn resolve_lenient(&self) -> SliderConfig {
        self.build().sanitized()
    }

    /// Initial coordinate of the start (or only) handle.
    pub fn initial_start(&self, config: &SliderConfig) -> Coord {
        Coord::for_axis(
            config.axis,
            self.x.unwrap_or(config.x_min),
            self.y.unwrap_or(config.y_min),
        )
    }

    /// Initial coordinate of the end handle, present only in range mode.
    pub fn initial_end(&self, config: &SliderConfig) -> Option<Coord> {
        config.range.then(|| {
            Coord::for_axis(
                config.axis,
                self.x_end.unwrap_or(config.x_max),
                self.y_end.unwrap_or(config.y_max),
            )
        })
    }

    fn numbers(&self) -> [Option<u64>; 10] {
        [
            self.x, self.x_min, self.x_max, self.x_step, self.x_end, self.y, self.y_min,
            self.y_max, self.y_step, self.y_end,
        ]
        .map(|n| n.map(f64::to_bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_zero_hundred_one() {
        let config = SliderOptions::default().resolve().unwrap();
        assert_eq!(config.axis, Axis::X);
        assert_eq!(config.bounds(Dim::X), AxisBounds::new(0.0, 100.0, 1.0));
        assert_eq!(config.bounds(Dim::Y), AxisBounds::new(0.0, 100.0, 1.0));
        assert_eq!(config.class_name_prefix, "range-slider");
        assert!(!config.range);
    }

    #[test]
    fn zero_step_is_rejected() {
        let options = SliderOptions {
            x_step: Some(0.0),
            ..Default::default()
        };
        assert_eq!(
            options.resolve(),
            Err(ConfigError::InvalidStep {
                dim: Dim::X,
                step: 0.0
            })
        );
    }

    #[test]
    fn inactive_axis_is_not_validated() {
        let options = SliderOptions {
            axis: Some(Axis::X),
            y_step: Some(-1.0),
            ..Default::default()
        };
        assert!(options.resolve().is_ok());
    }

    #[test]
    fn lenient_resolution_replaces_bad_step() {
        let options = SliderOptions {
            axis: Some(Axis::Y),
            y_step: Some(f64::NAN),
            ..Default::default()
        };
        let config = options.resolve_lenient();
        assert_eq!(config.y_step, DEFAULT_STEP);
    }

    #[test]
    fn options_with_nan_equal_themselves() {
        let options = SliderOptions {
            x: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(options.clone(), options);
        assert_ne!(
            options,
            SliderOptions {
                x: Some(1.0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn inverted_bounds_are_left_alone() {
        let options = SliderOptions {
            x_min: Some(10.0),
            x_max: Some(0.0),
            ..Default::default()
        };
        let config = options.resolve_lenient();
        assert_eq!(config.x_min, 10.0);
        assert_eq!(config.x_max, 0.0);
        assert!(config.bounds(Dim::X).is_inverted());
    }

    #[test]
    fn initial_coordinates_default_to_bounds() {
        let options = SliderOptions {
            axis: Some(Axis::Xy),
            range: Some(true),
            x_min: Some(-5.0),
            y_max: Some(50.0),
            ..Default::default()
        };
        let config = options.resolve().unwrap();
        assert_eq!(options.initial_start(&config), Coord::new(-5.0, Some(0.0)));
        assert_eq!(options.initial_end(&config), Some(Coord::new(100.0, Some(50.0))));
    }

    #[test]
    fn y_is_absent_in_x_mode() {
        let options = SliderOptions {
            y: Some(42.0),
            ..Default::default()
        };
        let config = options.resolve().unwrap();
        assert_eq!(options.initial_start(&config).y, None);
        assert_eq!(options.initial_end(&config), None);
    }

    #[test]
    fn options_parse_from_camel_case_json() {
        let options =
            SliderOptions::from_json(r#"{"axis":"xy","xMax":10,"yStep":0.5,"classNamePrefix":"s"}"#)
                .unwrap();
        assert_eq!(options.axis, Some(Axis::Xy));
        assert_eq!(options.x_max, Some(10.0));
        assert_eq!(options.y_step, Some(0.5));
        assert_eq!(options.class_name_prefix.as_deref(), Some("s"));
    }

    #[test]
    fn unknown_axis_is_an_options_error() {
        let err = SliderOptions::from_json(r#"{"axis":"z"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Options(_)));
    }

    #[test]
    fn effective_config_serializes_camel_case() {
        let json = serde_json::to_value(SliderConfig::default()).unwrap();
        assert_eq!(json["axis"], "x");
        assert_eq!(json["xMin"], 0.0);
        assert_eq!(json["yStep"], 1.0);
        assert_eq!(json["classNamePrefix"], "range-slider");
    }
}
