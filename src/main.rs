//! Demo page for the range slider: one slider per axis mode plus a range
//! selection, each driven as a controlled component.

use log::{debug, info, LevelFilter};
use range_slider::{format_value, logging, Axis, Coord, HandleId, RangeSlider, SliderChange};
use yew::prelude::*;

// Initial demo values
const HORIZONTAL_START: f64 = 30.0;
const VERTICAL_START: f64 = 0.25;
const PAD_START: (f64, f64) = (50.0, 50.0);
const RANGE_START: (f64, f64) = (20.0, 80.0);

/// Log the final value of a drag.
fn log_drag_end(label: &'static str) -> Callback<SliderChange> {
    Callback::from(move |change: SliderChange| {
        info!(
            "{} drag ended on {} handle at {:?}",
            label,
            change.handle.as_str(),
            change.value
        );
    })
}

/// Readout of a coordinate using the precision of each axis step.
fn describe(value: Coord, x_step: f64, y_step: f64) -> String {
    match value.y {
        Some(y) => format!(
            "x: {}, y: {}",
            format_value(value.x, x_step),
            format_value(y, y_step)
        ),
        None => format_value(value.x, x_step),
    }
}

#[function_component(Demo)]
fn demo() -> Html {
    let horizontal = use_state(|| HORIZONTAL_START);
    let vertical = use_state(|| VERTICAL_START);
    let pad = use_state(|| PAD_START);
    let range = use_state(|| RANGE_START);

    let on_horizontal = {
        let horizontal = horizontal.clone();
        Callback::from(move |change: SliderChange| {
            debug!("horizontal -> {:?}", change.value);
            horizontal.set(change.value.x);
        })
    };

    let on_vertical = {
        let vertical = vertical.clone();
        Callback::from(move |change: SliderChange| {
            if let Some(y) = change.value.y {
                vertical.set(y);
            }
        })
    };

    let on_pad = {
        let pad = pad.clone();
        Callback::from(move |change: SliderChange| {
            pad.set((change.value.x, change.value.y.unwrap_or(pad.1)));
        })
    };

    let on_range = {
        let range = range.clone();
        Callback::from(move |change: SliderChange| {
            let (start, end) = *range;
            match change.handle {
                HandleId::Start => range.set((change.value.x, end)),
                HandleId::End => range.set((start, change.value.x)),
            }
        })
    };

    let reset = {
        let horizontal = horizontal.clone();
        let vertical = vertical.clone();
        let pad = pad.clone();
        let range = range.clone();
        Callback::from(move |_: MouseEvent| {
            info!("resetting demo sliders");
            horizontal.set(HORIZONTAL_START);
            vertical.set(VERTICAL_START);
            pad.set(PAD_START);
            range.set(RANGE_START);
        })
    };

    html! {
        <div class="demo">
            <section class="demo__item">
                <h3>{ "Horizontal (step 5)" }</h3>
                <RangeSlider
                    x={*horizontal}
                    x_step={5.0}
                    on_change={on_horizontal}
                    on_drag_end={log_drag_end("horizontal")}
                />
                <span class="demo__value">{ describe(Coord::new(*horizontal, None), 5.0, 1.0) }</span>
            </section>

            <section class="demo__item">
                <h3>{ "Vertical (0..1, step 0.05)" }</h3>
                <RangeSlider
                    axis={Axis::Y}
                    y={*vertical}
                    y_min={0.0}
                    y_max={1.0}
                    y_step={0.05}
                    on_change={on_vertical}
                    on_drag_end={log_drag_end("vertical")}
                />
                <span class="demo__value">{ format_value(*vertical, 0.05) }</span>
            </section>

            <section class="demo__item">
                <h3>{ "Pad (xy)" }</h3>
                <RangeSlider
                    axis={Axis::Xy}
                    class_name_prefix="pad-slider"
                    x={pad.0}
                    y={pad.1}
                    on_change={on_pad}
                    on_drag_end={log_drag_end("pad")}
                />
                <span class="demo__value">{ describe(Coord::new(pad.0, Some(pad.1)), 1.0, 1.0) }</span>
            </section>

            <section class="demo__item">
                <h3>{ "Range" }</h3>
                <RangeSlider
                    range=true
                    x={range.0}
                    x_end={range.1}
                    on_change={on_range}
                    on_drag_end={log_drag_end("range")}
                />
                <span class="demo__value">
                    { format!("{} - {}", format_value(range.0, 1.0), format_value(range.1, 1.0)) }
                </span>
            </section>

            <section class="demo__item">
                <h3>{ "Disabled" }</h3>
                <RangeSlider x={40.0} disabled=true />
            </section>

            <button onclick={reset}>{ "Reset" }</button>
        </div>
    }
}

/// Entry point: installs logging and renders the demo.
fn main() {
    console_error_panic_hook::set_once();
    let _ = logging::init(LevelFilter::Debug);
    yew::Renderer::<Demo>::new().render();
}
