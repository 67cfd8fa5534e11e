//! Yew glue between browser events and the [`SliderEngine`].

use crate::config::SliderOptions;
use crate::engine::{HandleId, Notification, SliderChange, SliderEngine, SliderView};
use crate::geometry::{Point, TrackRect};
use crate::input::{self, Key};
use gloo_events::{EventListener, EventListenerOptions};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, FocusEvent, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};
use yew::prelude::*;

/// Host callbacks, refreshed on every render so listeners created during an
/// earlier render reach the current ones.
#[derive(Clone, Default)]
struct HostCallbacks {
    on_change: Callback<SliderChange>,
    on_drag_end: Callback<SliderChange>,
}

/// State shared between the component and its DOM listeners.
#[derive(Clone)]
struct SliderShared {
    engine: Rc<RefCell<SliderEngine>>,
    callbacks: Rc<RefCell<HostCallbacks>>,
    // window listeners, alive only while a drag is active
    drag_listeners: Rc<RefCell<Vec<EventListener>>>,
    track: NodeRef,
    redraw: UseForceUpdateHandle,
}

impl SliderShared {
    fn track_rect(&self) -> Option<TrackRect> {
        self.track
            .cast::<Element>()
            .map(|track| input::track_rect(&track))
    }

    fn deliver(&self, note: Option<Notification>) {
        let Some(note) = note else { return };
        let change = note.into_change(self.engine.borrow().config());
        let callbacks = self.callbacks.borrow().clone();
        match note {
            Notification::Changed { .. } => callbacks.on_change.emit(change),
            Notification::DragEnded { .. } => callbacks.on_drag_end.emit(change),
        }
        self.redraw.force_update();
    }

    /// Press on a handle (drag it) or on the bare track (jump, then drag).
    fn press(&self, handle: Option<HandleId>, client: Point) {
        let Some(rect) = self.track_rect() else { return };
        let (note, dragging) = {
            let mut engine = self.engine.borrow_mut();
            let note = match handle {
                Some(handle) => {
                    engine.pointer_down(handle, client, &rect);
                    None
                }
                None => engine.track_press(client, &rect),
            };
            (note, engine.is_dragging())
        };
        if dragging {
            self.attach_drag_listeners();
            self.redraw.force_update();
        }
        self.deliver(note);
    }

    fn pointer_move(&self, client: Point) {
        let Some(rect) = self.track_rect() else { return };
        let note = self.engine.borrow_mut().pointer_move(client, &rect);
        self.deliver(note);
    }

    fn pointer_up(&self) {
        let note = self.engine.borrow_mut().pointer_up();
        self.detach_drag_listeners();
        self.deliver(note);
    }

    fn attach_drag_listeners(&self) {
        let window = gloo_utils::window();
        let mut listeners = Vec::with_capacity(5);

        let shared = self.clone();
        listeners.push(EventListener::new(&window, "mousemove", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                shared.pointer_move(input::mouse_point(event));
            }
        }));

        let shared = self.clone();
        listeners.push(EventListener::new_with_options(
            &window,
            "touchmove",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(touch) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                // keep the page from scrolling under the drag
                event.prevent_default();
                if let Some(point) = input::touch_point(touch) {
                    shared.pointer_move(point);
                }
            },
        ));

        for name in ["mouseup", "touchend", "touchcancel"] {
            let shared = self.clone();
            listeners.push(EventListener::new(&window, name, move |_| shared.pointer_up()));
        }

        *self.drag_listeners.borrow_mut() = listeners;
    }

    fn detach_drag_listeners(&self) {
        let stale = std::mem::take(&mut *self.drag_listeners.borrow_mut());
        drop(stale);
    }

    fn key_down(&self, event: &KeyboardEvent) {
        let Some(key) = Key::from_key_name(&event.key()) else {
            return;
        };
        event.prevent_default();
        let note = self.engine.borrow_mut().key_down(key);
        self.deliver(note);
    }
}

/// Focus a grabbed handle so arrow keys reach it after the press.
fn focus_handle(element: &HtmlElement) {
    if let Err(err) = element.focus() {
        warn!("could not focus slider handle: {:?}", err);
    }
}

/// Everything `RangeSlider` needs to render and wire up its elements.
pub struct UseSliderHandle {
    pub view: SliderView,
    pub track: NodeRef,
    pub on_track_mouse_down: Callback<MouseEvent>,
    pub on_handle_focus: Callback<HandleId>,
    pub on_handle_blur: Callback<FocusEvent>,
    pub on_handle_key_down: Callback<KeyboardEvent>,
}

/// Own a [`SliderEngine`] for the lifetime of a component.
///
/// Changed `options` are synced into the engine without notifying the host.
/// Touch-start is bound natively on the track (non-passive, so it can
/// suppress emulated mouse events); drag listeners are bound on the window
/// for the duration of a drag. Everything is detached on unmount.
#[hook]
pub fn use_slider(
    options: SliderOptions,
    on_change: Callback<SliderChange>,
    on_drag_end: Callback<SliderChange>,
) -> UseSliderHandle {
    let engine = {
        let options = options.clone();
        use_mut_ref(move || SliderEngine::from_options(&options))
    };
    let last_options = {
        let options = options.clone();
        use_mut_ref(move || options)
    };
    let callbacks = use_mut_ref(HostCallbacks::default);
    let drag_listeners = use_mut_ref(Vec::<EventListener>::new);
    let track = use_node_ref();
    let redraw = use_force_update();

    *callbacks.borrow_mut() = HostCallbacks {
        on_change,
        on_drag_end,
    };

    if *last_options.borrow() != options {
        let config = options.resolve_lenient();
        let start = options.initial_start(&config);
        let end = options.initial_end(&config);
        engine.borrow_mut().sync(config, start, end);
        *last_options.borrow_mut() = options;
    }

    let shared = SliderShared {
        engine: engine.clone(),
        callbacks,
        drag_listeners,
        track: track.clone(),
        redraw,
    };

    {
        let shared = shared.clone();
        use_effect_with((), move |_| {
            let touch_start = shared.track.cast::<Element>().map(|track| {
                let shared = shared.clone();
                EventListener::new_with_options(
                    &track,
                    "touchstart",
                    EventListenerOptions::enable_prevent_default(),
                    move |event: &Event| {
                        let Some(point) = event.dyn_ref::<TouchEvent>().and_then(input::touch_point)
                        else {
                            return;
                        };
                        event.prevent_default();
                        let grabbed = input::grabbed_handle(event);
                        if let Some((_, element)) = &grabbed {
                            focus_handle(element);
                        }
                        shared.press(grabbed.map(|(handle, _)| handle), point);
                    },
                )
            });
            move || {
                drop(touch_start);
                shared.engine.borrow_mut().cancel_drag();
                shared.detach_drag_listeners();
            }
        });
    }

    let on_track_mouse_down = {
        let shared = shared.clone();
        Callback::from(move |event: MouseEvent| {
            if !input::is_primary_button(&event) {
                return;
            }
            let grabbed = input::grabbed_handle(&event);
            // no text selection while dragging; focus is given back below
            event.prevent_default();
            if let Some((_, element)) = &grabbed {
                focus_handle(element);
            }
            shared.press(grabbed.map(|(handle, _)| handle), input::mouse_point(&event));
        })
    };

    let on_handle_focus = {
        let shared = shared.clone();
        Callback::from(move |handle: HandleId| {
            shared.engine.borrow_mut().focus(handle);
            shared.redraw.force_update();
        })
    };

    let on_handle_blur = {
        let shared = shared.clone();
        Callback::from(move |_: FocusEvent| {
            shared.engine.borrow_mut().blur();
            shared.redraw.force_update();
        })
    };

    let on_handle_key_down = {
        let shared = shared.clone();
        Callback::from(move |event: KeyboardEvent| shared.key_down(&event))
    };

    let view = engine.borrow().view();

    UseSliderHandle {
        view,
        track,
        on_track_mouse_down,
        on_handle_focus,
        on_handle_blur,
        on_handle_key_down,
    }
}
