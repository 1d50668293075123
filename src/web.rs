//! Browser frame-loop driver.
//!
//! [`WebViewer`] owns a [`ViewEngine`] behind `Rc<RefCell<_>>`, wires
//! pointer, wheel and keyboard listeners on the canvas, and ticks the engine
//! from `requestAnimationFrame`. The ground description arrives either from
//! JS through [`WebViewer::ground_loaded`] or via [`WebViewer::load_ground`],
//! which fetches it and resolves once bounds are set up.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement,
    KeyboardEvent, MouseEvent, Response, WheelEvent,
};

use crate::error::ViewerError;
use crate::ground::GroundModel;
use crate::options::Options;
use crate::{InputEvent, MouseButton, ViewEngine};

/// `WheelEvent.deltaMode` for line-based scrolling.
const DOM_DELTA_LINE: u32 = 1;
/// Pixel wheel deltas are scaled to roughly one notch per 100 px.
const PIXEL_SCROLL_SCALE: f32 = 0.01;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

#[wasm_bindgen(start)]
fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn js_error(e: &ViewerError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A DOM listener removed again when dropped.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback =
            Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.kind,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Bounded seabed camera driven by the browser's animation frames.
#[wasm_bindgen]
pub struct WebViewer {
    engine: Rc<RefCell<ViewEngine>>,
    canvas: HtmlCanvasElement,
    frame: FrameCallback,
    /// Pending `requestAnimationFrame` handle.
    frame_handle: Rc<Cell<Option<i32>>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WebViewer {
    /// Attach to `canvas`. `options_toml` overrides the default options.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        options_toml: Option<String>,
    ) -> Result<WebViewer, JsValue> {
        let options = match options_toml.as_deref() {
            Some(toml) => {
                Options::from_toml_str(toml).map_err(|e| js_error(&e))?
            }
            None => Options::default(),
        };
        sync_canvas_size(&canvas);
        let engine = Rc::new(RefCell::new(ViewEngine::new(
            options,
            (canvas.width(), canvas.height()),
        )));

        let mut viewer = Self {
            engine,
            canvas,
            frame: Rc::new(RefCell::new(None)),
            frame_handle: Rc::new(Cell::new(None)),
            listeners: Vec::new(),
        };
        viewer.wire_listeners()?;
        Ok(viewer)
    }

    /// Begin ticking on every animation frame.
    pub fn start(&self) -> Result<(), JsValue> {
        if self.frame.borrow().is_some() {
            return Ok(());
        }
        let engine = Rc::clone(&self.engine);
        let next = Rc::clone(&self.frame);
        let handle = Rc::clone(&self.frame_handle);
        *self.frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle.set(None);
            {
                let mut engine = engine.borrow_mut();
                if !engine.is_running() {
                    return;
                }
                let _ = engine.tick();
            }
            if let Some(callback) = next.borrow().as_ref() {
                match request_frame(callback) {
                    Ok(id) => handle.set(Some(id)),
                    Err(e) => log::error!("requestAnimationFrame: {e:?}"),
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(callback) = self.frame.borrow().as_ref() {
            self.frame_handle.set(Some(request_frame(callback)?));
        }
        Ok(())
    }

    /// Stop the loop, cancel the pending frame and detach all listeners.
    pub fn stop(&mut self) {
        self.engine.borrow_mut().stop();
        if let (Some(id), Some(window)) =
            (self.frame_handle.take(), web_sys::window())
        {
            let _ = window.cancel_animation_frame(id);
        }
        let _ = self.frame.borrow_mut().take();
        self.listeners.clear();
    }

    /// Completion callback for a ground description loaded by JS (JSON).
    ///
    /// On error the camera stays usable without bounds and the error is
    /// rethrown to JS.
    pub fn ground_loaded(&self, json: &str) -> Result<(), JsValue> {
        let mut ground =
            GroundModel::from_json_str(json).map_err(|e| js_error(&e))?;
        self.engine
            .borrow_mut()
            .on_ground_loaded(&mut ground)
            .map_err(|e| js_error(&e))
    }

    /// Fetch a ground description (`.json` or TOML) and set up bounds once
    /// it arrives.
    pub fn load_ground(&self, url: String) -> js_sys::Promise {
        let engine = Rc::clone(&self.engine);
        wasm_bindgen_futures::future_to_promise(async move {
            let text = fetch_text(&url).await?;
            let parsed = if url.ends_with(".json") {
                GroundModel::from_json_str(&text)
            } else {
                GroundModel::from_toml_str(&text)
            };
            let mut ground = parsed.map_err(|e| js_error(&e))?;
            engine
                .borrow_mut()
                .on_ground_loaded(&mut ground)
                .map_err(|e| js_error(&e))?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Return the camera to its start pose.
    pub fn reset_camera(&self) {
        self.engine.borrow_mut().reset_camera();
    }

    /// Select a sky preset by name.
    pub fn set_environment(&self, name: &str) {
        self.engine.borrow_mut().set_environment(name);
    }

    /// Eye position rounded to two decimals, `[x, y, z]`.
    pub fn camera_position(&self) -> Vec<f32> {
        self.engine.borrow().camera_position_display().to_vec()
    }

    /// Camera uniform block as a flat `f32` array, ready for upload.
    pub fn camera_uniform(&self) -> Vec<f32> {
        let uniform = self.engine.borrow().camera_uniform();
        bytemuck::cast_slice(&[uniform]).to_vec()
    }

    /// Active sky preset name.
    pub fn environment_name(&self) -> String {
        self.engine.borrow().environment().name
    }

    /// HDRI path of the active preset, if it is known.
    pub fn environment_hdri(&self) -> Option<String> {
        self.engine.borrow().environment().hdri_path
    }

    /// Environment light intensity of the active preset.
    pub fn environment_intensity(&self) -> f32 {
        self.engine.borrow().environment().intensity
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.engine.borrow().fps()
    }

    /// Whether bounds are active.
    pub fn is_constrained(&self) -> bool {
        self.engine
            .borrow()
            .constraint_state()
            .constraint()
            .is_some()
    }
}

impl WebViewer {
    fn wire_listeners(&mut self) -> Result<(), JsValue> {
        let canvas: &EventTarget = self.canvas.as_ref();

        let engine = Rc::clone(&self.engine);
        self.listeners.push(Listener::attach(
            canvas,
            "mousedown",
            true,
            move |ev| {
                if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
                    pointer_button(&engine, ev, true);
                }
            },
        )?);

        let engine = Rc::clone(&self.engine);
        self.listeners.push(Listener::attach(
            canvas,
            "mouseup",
            true,
            move |ev| {
                if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
                    pointer_button(&engine, ev, false);
                }
            },
        )?);

        let engine = Rc::clone(&self.engine);
        self.listeners.push(Listener::attach(
            canvas,
            "mousemove",
            true,
            move |ev| {
                if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
                    let mut engine = engine.borrow_mut();
                    let _ = engine.handle_input(InputEvent::ModifiersChanged {
                        shift: ev.shift_key(),
                    });
                    let _ = engine.handle_input(InputEvent::CursorMoved {
                        x: ev.offset_x() as f32,
                        y: ev.offset_y() as f32,
                    });
                }
            },
        )?);

        let engine = Rc::clone(&self.engine);
        self.listeners.push(Listener::attach(
            canvas,
            "wheel",
            false,
            move |ev| {
                if let Some(ev) = ev.dyn_ref::<WheelEvent>() {
                    ev.prevent_default();
                    let dy = ev.delta_y() as f32;
                    let delta = if ev.delta_mode() == DOM_DELTA_LINE {
                        -dy
                    } else {
                        -dy * PIXEL_SCROLL_SCALE
                    };
                    let _ = engine
                        .borrow_mut()
                        .handle_input(InputEvent::Scroll { delta });
                }
            },
        )?);

        self.listeners.push(Listener::attach(
            canvas,
            "contextmenu",
            false,
            |ev| ev.prevent_default(),
        )?);

        let Some(window) = web_sys::window() else {
            return Err(JsValue::from_str("no window"));
        };
        let window: &EventTarget = window.as_ref();

        let engine = Rc::clone(&self.engine);
        self.listeners.push(Listener::attach(
            window,
            "keydown",
            true,
            move |ev| {
                if let Some(ev) = ev.dyn_ref::<KeyboardEvent>() {
                    let _ = engine.borrow_mut().handle_key(&ev.code());
                }
            },
        )?);

        let engine = Rc::clone(&self.engine);
        let canvas = self.canvas.clone();
        self.listeners.push(Listener::attach(
            window,
            "resize",
            true,
            move |_| {
                sync_canvas_size(&canvas);
                engine.borrow_mut().resize(canvas.width(), canvas.height());
            },
        )?);

        Ok(())
    }
}

fn pointer_button(
    engine: &Rc<RefCell<ViewEngine>>,
    ev: &MouseEvent,
    pressed: bool,
) {
    let Some(button) = MouseButton::from_dom_button(ev.button()) else {
        return;
    };
    let mut engine = engine.borrow_mut();
    let _ = engine.handle_input(InputEvent::ModifiersChanged {
        shift: ev.shift_key(),
    });
    let _ = engine.handle_input(InputEvent::MouseButton { button, pressed });
}

/// Match the canvas backing store to its CSS size.
fn sync_canvas_size(canvas: &HtmlCanvasElement) {
    let width = canvas.client_width().max(1) as u32;
    let height = canvas.client_height().max(1) as u32;
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
    }
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response =
        JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "GET {url}: HTTP {}",
            response.status()
        )));
    }
    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("ground response is not text"))
}
