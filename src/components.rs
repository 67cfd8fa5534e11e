//! The `RangeSlider` Yew component.
//!
//! Markup:
//!
//! ```text
//! div.<prefix>.<prefix>--<axis>
//!   div.<prefix>__track
//!     div.<prefix>__active
//!     div.<prefix>__handle.<prefix>__handle--start   (tabindex=0)
//!     div.<prefix>__handle.<prefix>__handle--end     (range mode only)
//! ```

use crate::config::{Axis, Dim, SliderConfig, SliderOptions, DEFAULT_CLASS_PREFIX};
use crate::engine::{HandleId, SliderChange};
use crate::geometry::{percent_from_value, Coord};
use crate::hooks::use_slider;
use crate::utils::{active_style, element_class, handle_style, modifier_class};
use web_sys::FocusEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct RangeSliderProps {
    #[prop_or_default]
    pub axis: Axis,
    #[prop_or(AttrValue::Static(DEFAULT_CLASS_PREFIX))]
    pub class_name_prefix: AttrValue,
    #[prop_or_default]
    pub x: Option<f64>,
    #[prop_or_default]
    pub x_min: Option<f64>,
    #[prop_or_default]
    pub x_max: Option<f64>,
    #[prop_or_default]
    pub x_step: Option<f64>,
    #[prop_or_default]
    pub y: Option<f64>,
    #[prop_or_default]
    pub y_min: Option<f64>,
    #[prop_or_default]
    pub y_max: Option<f64>,
    #[prop_or_default]
    pub y_step: Option<f64>,
    /// Two handles selecting an interval instead of one value.
    #[prop_or_default]
    pub range: bool,
    #[prop_or_default]
    pub x_end: Option<f64>,
    #[prop_or_default]
    pub y_end: Option<f64>,
    #[prop_or_default]
    pub disabled: bool,
    /// Fired on every value change with the moved handle's new value.
    #[prop_or_default]
    pub on_change: Callback<SliderChange>,
    /// Fired once when a drag is released, with the final value.
    #[prop_or_default]
    pub on_drag_end: Callback<SliderChange>,
}

impl RangeSliderProps {
    pub fn options(&self) -> SliderOptions {
        SliderOptions {
            axis: Some(self.axis),
            class_name_prefix: Some(self.class_name_prefix.to_string()),
            x: self.x,
            x_min: self.x_min,
            x_max: self.x_max,
            x_step: self.x_step,
            y: self.y,
            y_min: self.y_min,
            y_max: self.y_max,
            y_step: self.y_step,
            range: Some(self.range),
            x_end: self.x_end,
            y_end: self.y_end,
            disabled: Some(self.disabled),
        }
    }

    pub fn from_options(
        options: SliderOptions,
        on_change: Callback<SliderChange>,
        on_drag_end: Callback<SliderChange>,
    ) -> Self {
        Self {
            axis: options.axis.unwrap_or_default(),
            class_name_prefix: options
                .class_name_prefix
                .map(AttrValue::from)
                .unwrap_or(AttrValue::Static(DEFAULT_CLASS_PREFIX)),
            x: options.x,
            x_min: options.x_min,
            x_max: options.x_max,
            x_step: options.x_step,
            y: options.y,
            y_min: options.y_min,
            y_max: options.y_max,
            y_step: options.y_step,
            range: options.range.unwrap_or(false),
            x_end: options.x_end,
            y_end: options.y_end,
            disabled: options.disabled.unwrap_or(false),
            on_change,
            on_drag_end,
        }
    }
}

/// Percentage position of a coordinate along both track dimensions.
fn percent_of(config: &SliderConfig, coord: Coord) -> (f64, f64) {
    let left = percent_from_value(coord.x, &config.bounds(Dim::X));
    let top = coord
        .y
        .map(|y| percent_from_value(y, &config.bounds(Dim::Y)))
        .unwrap_or(0.0);
    (left, top)
}

#[function_component(RangeSlider)]
pub fn range_slider(props: &RangeSliderProps) -> Html {
    let slider = use_slider(
        props.options(),
        props.on_change.clone(),
        props.on_drag_end.clone(),
    );
    let view = &slider.view;
    let config = &view.config;
    let prefix = config.class_name_prefix.as_str();

    let root_class = classes!(
        prefix.to_string(),
        modifier_class(prefix, config.axis.as_str()),
        config.disabled.then(|| modifier_class(prefix, "disabled")),
        view.dragging.is_some().then(|| modifier_class(prefix, "dragging")),
    );

    let start_pct = percent_of(config, view.start);
    let active = match view.end {
        Some(end) => active_style(config.axis, start_pct, percent_of(config, end)),
        None => active_style(config.axis, (0.0, 0.0), start_pct),
    };

    let handle_class = element_class(prefix, "handle");
    let render_handle = |handle: HandleId, coord: Coord| {
        let (left, top) = percent_of(config, coord);
        let class = classes!(
            handle_class.clone(),
            modifier_class(&handle_class, handle.as_str()),
            (view.dragging == Some(handle)).then(|| modifier_class(&handle_class, "dragging")),
            (view.focused == Some(handle)).then(|| modifier_class(&handle_class, "focused")),
        );
        let tabindex = if config.disabled { "-1" } else { "0" };
        html! {
            <div
                class={class}
                data-handle={handle.as_str()}
                tabindex={tabindex}
                style={handle_style(config.axis, left, top)}
                onfocus={slider.on_handle_focus.reform(move |_: FocusEvent| handle)}
                onblur={slider.on_handle_blur.clone()}
                onkeydown={slider.on_handle_key_down.clone()}
            />
        }
    };

    html! {
        <div class={root_class}>
            <div
                ref={slider.track.clone()}
                class={element_class(prefix, "track")}
                onmousedown={slider.on_track_mouse_down.clone()}
            >
                <div class={element_class(prefix, "active")} style={active} />
                { render_handle(HandleId::Start, view.start) }
                { for view.end.map(|end| render_handle(HandleId::End, end)) }
            </div>
        </div>
    }
}
