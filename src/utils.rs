use crate::config::Axis;

/// Upper bound on the decimal places we keep when rounding snapped values.
const MAX_DECIMAL_PLACES: u32 = 10;

/// Number of digits after the decimal point in the shortest representation
/// of `value` (`0.25` -> 2, `5` -> 0).
pub fn decimal_places(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let text = value.abs().to_string();
    match text.split_once('.') {
        Some((_, frac)) => (frac.len() as u32).min(MAX_DECIMAL_PLACES),
        None => 0,
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Render a value with as many decimals as its step uses.
pub fn format_value(value: f64, step: f64) -> String {
    format!("{:.*}", decimal_places(step) as usize, value)
}

/// BEM element class: `prefix__element`.
pub fn element_class(prefix: &str, element: &str) -> String {
    format!("{}__{}", prefix, element)
}

/// BEM modifier class: `base--modifier`.
pub fn modifier_class(base: &str, modifier: &str) -> String {
    format!("{}--{}", base, modifier)
}

/// Inline style placing a handle at the given percentages of the track.
pub fn handle_style(axis: Axis, left_pct: f64, top_pct: f64) -> String {
    match axis {
        Axis::X => format!("left: {:.4}%;", left_pct),
        Axis::Y => format!("top: {:.4}%;", top_pct),
        Axis::Xy => format!("left: {:.4}%; top: {:.4}%;", left_pct, top_pct),
    }
}

/// Inline style for the highlighted part of the track between two
/// percentage positions (`from` is the origin for single-handle sliders).
pub fn active_style(axis: Axis, from: (f64, f64), to: (f64, f64)) -> String {
    let (left, width) = (from.0.min(to.0), (to.0 - from.0).abs());
    let (top, height) = (from.1.min(to.1), (to.1 - from.1).abs());
    match axis {
        Axis::X => format!("left: {:.4}%; width: {:.4}%;", left, width),
        Axis::Y => format!("top: {:.4}%; height: {:.4}%;", top, height),
        Axis::Xy => format!(
            "left: {:.4}%; top: {:.4}%; width: {:.4}%; height: {:.4}%;",
            left, top, width, height
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_places_of_common_steps() {
        assert_eq!(decimal_places(1.0), 0);
        assert_eq!(decimal_places(0.1), 1);
        assert_eq!(decimal_places(0.25), 2);
        assert_eq!(decimal_places(-2.5), 1);
        assert_eq!(decimal_places(f64::NAN), 0);
    }

    #[test]
    fn rounding_removes_float_noise() {
        assert_eq!(round_to_places(0.1 + 0.2, 1), 0.3);
        assert_eq!(round_to_places(12.3456, 2), 12.35);
    }

    #[test]
    fn values_format_with_step_precision() {
        assert_eq!(format_value(3.0, 1.0), "3");
        assert_eq!(format_value(0.3, 0.05), "0.30");
    }

    #[test]
    fn class_names_follow_bem() {
        assert_eq!(element_class("rs", "track"), "rs__track");
        assert_eq!(modifier_class("rs__handle", "end"), "rs__handle--end");
    }

    #[test]
    fn handle_style_only_sets_active_axes() {
        assert_eq!(handle_style(Axis::X, 25.0, 80.0), "left: 25.0000%;");
        assert_eq!(handle_style(Axis::Y, 25.0, 80.0), "top: 80.0000%;");
    }

    #[test]
    fn active_style_spans_between_points() {
        assert_eq!(
            active_style(Axis::X, (60.0, 0.0), (20.0, 0.0)),
            "left: 20.0000%; width: 40.0000%;"
        );
    }
}
