//! Draggable range slider for the web.
//!
//! A track with one or two handles moved by mouse, touch or keyboard along
//! `x`, `y` or both axes. Values are clamped to bounds, snapped to a step and
//! reported to the host through change callbacks carrying the effective
//! configuration.
//!
//! The interaction logic lives in [`SliderEngine`] and is plain Rust; the
//! [`RangeSlider`] Yew component and [`mount_range_slider`] (for plain
//! JavaScript pages) wire it to the DOM.

use log::{info, warn};
use wasm_bindgen::prelude::*;
use yew::{AppHandle, Callback};

pub mod components;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod hooks;
pub mod input;
pub mod logging;
pub mod utils;

pub use components::{RangeSlider, RangeSliderProps};
pub use config::{Axis, AxisBounds, ConfigError, Dim, SliderConfig, SliderOptions};
pub use engine::{HandleId, Notification, SliderChange, SliderEngine, SliderView};
pub use geometry::{Coord, Point, TrackRect};
pub use input::Key;
pub use utils::format_value;

/// A slider mounted from JavaScript. Call `destroy()` to unmount it and
/// detach its listeners.
#[wasm_bindgen]
pub struct SliderHandle {
    app: AppHandle<RangeSlider>,
}

#[wasm_bindgen]
impl SliderHandle {
    pub fn destroy(self) {
        self.app.destroy();
    }
}

/// Wrap a JS function as a change callback receiving `(value, config)`.
fn js_callback(function: Option<js_sys::Function>) -> Callback<SliderChange> {
    let Some(function) = function else {
        return Callback::noop();
    };
    Callback::from(move |change: SliderChange| {
        let value = serde_wasm_bindgen::to_value(&change.value);
        let config = serde_wasm_bindgen::to_value(&change.config);
        match (value, config) {
            (Ok(value), Ok(config)) => {
                if let Err(err) = function.call2(&JsValue::NULL, &value, &config) {
                    warn!("slider callback threw: {:?}", err);
                }
            }
            (Err(e), _) | (_, Err(e)) => warn!("could not convert slider change: {}", e),
        }
    })
}

/// Mount a slider into `element`.
///
/// `options` is an object with the same camelCase keys as the component
/// props (`axis`, `xMin`, `yStep`, `range`, ...); `undefined` or `null`
/// takes every default.
#[wasm_bindgen]
pub fn mount_range_slider(
    element: web_sys::Element,
    options: JsValue,
    on_change: Option<js_sys::Function>,
    on_drag_end: Option<js_sys::Function>,
) -> Result<SliderHandle, JsValue> {
    console_error_panic_hook::set_once();
    // a logger may already be installed by the host page
    let _ = logging::init(log::LevelFilter::Info);

    let options: SliderOptions = if options.is_undefined() || options.is_null() {
        SliderOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| ConfigError::Options(e.to_string()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    let config = options
        .resolve()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let props = RangeSliderProps::from_options(
        options,
        js_callback(on_change),
        js_callback(on_drag_end),
    );
    let app = yew::Renderer::<RangeSlider>::with_root_and_props(element, props).render();
    info!("mounted {} slider (range: {})", config.axis, config.range);
    Ok(SliderHandle { app })
}
