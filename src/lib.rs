// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod demo;
pub mod error;
pub mod logging;
pub mod utils;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use config::ClientConfig;
pub use error::{Error, Result};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue, prelude::wasm_bindgen};
#[cfg(target_arch = "wasm32")]
use web_sys::{Window, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, Event, HtmlElement};
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;

#[cfg(target_arch = "wasm32")]
use controller::{FrameLoop, InputEvent, InputProcessor};

#[cfg(target_arch = "wasm32")]
const CANVAS_WIDTH: u32 = 800;
#[cfg(target_arch = "wasm32")]
const CANVAS_HEIGHT: u32 = 600;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    // no process environment in the browser
    let config = ClientConfig::default();
    logging::init(&config);

    let (window, document, canvas) = init_canvas(CANVAS_WIDTH, CANVAS_HEIGHT)?;
    setup_app(&window, &document, &canvas, config)
}

/// Main application setup for WASM
#[cfg(target_arch = "wasm32")]
fn setup_app(
    window: &Window,
    document: &Document,
    canvas: &HtmlCanvasElement,
    config: ClientConfig,
) -> std::result::Result<(), JsValue> {
    let mut frame_loop = demo::home_system(config).map_err(|e| js_error(e.to_string()))?;
    frame_loop.set_viewport(canvas.width(), canvas.height());
    let frame_loop = Rc::new(RefCell::new(frame_loop));

    setup_input_listeners(document, window, canvas, frame_loop.clone())?;

    let performance = window.performance().ok_or(js_error("no performance on window"))?;
    let mut last_time = performance.now();

    // Continuous update using requestAnimationFrame
    let f = RcCellCallback::new(window.clone(), move || {
        let now = performance.now();
        let dt = (now - last_time) / 1000.0;
        last_time = now;
        // the external renderer reads the uniform from the loop; nothing to draw here
        let _ = frame_loop.borrow_mut().step(dt);
    });
    f.start();

    tracing::info!("orrery started ({}x{})", canvas.width(), canvas.height());
    Ok(())
}

/// Setup all input event listeners with platform-agnostic abstractions
#[cfg(target_arch = "wasm32")]
fn setup_input_listeners(
    document: &Document,
    window: &Window,
    canvas: &HtmlCanvasElement,
    frame_loop: Rc<RefCell<FrameLoop>>,
) -> std::result::Result<(), JsValue> {
    let input_processor = InputProcessor::default();

    // Keyboard down
    {
        let frame_loop = frame_loop.clone();
        let document_for_exit = document.clone();
        let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let key = e.key();
            if input_processor.is_escape(&key) {
                document_for_exit.exit_pointer_lock();
            } else if input_processor.wants_next_target(&key) {
                if let Err(err) = frame_loop.borrow_mut().cycle_follow_target() {
                    tracing::warn!("cannot switch follow target: {err}");
                }
                e.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        keydown.forget();
    }

    // Focus loss
    {
        let frame_loop = frame_loop.clone();
        let blur = Closure::wrap(Box::new(move |_e: Event| {
            frame_loop.borrow_mut().input.process_event(&InputEvent::FocusLost);
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
        blur.forget();
    }

    // Visibility change
    {
        let frame_loop = frame_loop.clone();
        let doc_vis = document.clone();
        let visibility = Closure::wrap(Box::new(move |_e: Event| {
            let event = InputEvent::VisibilityChanged { visible: !doc_vis.hidden() };
            frame_loop.borrow_mut().input.process_event(&event);
        }) as Box<dyn FnMut(Event)>);
        document.add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())?;
        visibility.forget();
    }

    // Pointer lock change
    {
        let frame_loop = frame_loop.clone();
        let doc_pl = document.clone();
        let plc = Closure::wrap(Box::new(move |_e: Event| {
            let event = InputEvent::PointerLockChanged { locked: doc_pl.pointer_lock_element().is_some() };
            frame_loop.borrow_mut().input.process_event(&event);
        }) as Box<dyn FnMut(Event)>);
        document.add_event_listener_with_callback("pointerlockchange", plc.as_ref().unchecked_ref())?;
        plc.forget();
    }

    // Canvas click to enter pointer lock
    {
        let canvas_click = canvas.clone();
        let click = Closure::wrap(Box::new(move |_e: MouseEvent| {
            if let Ok(html_el) = canvas_click.clone().dyn_into::<HtmlElement>() {
                html_el.request_pointer_lock();
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();
    }

    // Mouse move
    {
        let mm = Closure::wrap(Box::new(move |e: MouseEvent| {
            let event = controller::input::wasm::mouse_move_to_input(&e);
            frame_loop.borrow_mut().input.process_event(&event);
        }) as Box<dyn FnMut(MouseEvent)>);
        document.add_event_listener_with_callback("mousemove", mm.as_ref().unchecked_ref())?;
        mm.forget();
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn init_canvas(width: u32, height: u32) -> std::result::Result<(Window, Document, HtmlCanvasElement), JsValue> {
    let window = web_sys::window().ok_or(js_error("no global `window`"))?;
    let document = window.document().ok_or(js_error("no document on window"))?;
    let body = document.body().ok_or(js_error("no body on document"))?;
    let canvas_el = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| js_error("failed to create canvas"))?;
    canvas_el.set_width(width);
    canvas_el.set_height(height);
    body.append_child(&canvas_el)?;
    Ok((window, document, canvas_el))
}

#[cfg(target_arch = "wasm32")]
fn js_error<E: Into<String>>(msg: E) -> JsValue {
    JsValue::from_str(&msg.into())
}

#[cfg(target_arch = "wasm32")]
struct RcCellCallback {
    inner: Rc<RefCell<Box<dyn FnMut()>>>,
    window: Window,
}

#[cfg(target_arch = "wasm32")]
impl RcCellCallback {
    fn new(window: Window, f: impl FnMut() + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Box::new(f))),
            window,
        }
    }

    fn start(self) {
        let inner = self.inner.clone();
        let window = self.window.clone();

        let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
        let callback_clone = callback.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            inner.borrow_mut().as_mut()();

            // Recursively schedule next frame
            let cb_ref = callback_clone.borrow();
            if let Some(cb) = cb_ref.as_ref() {
                if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_err() {
                    tracing::error!("requestAnimationFrame failed, stopping loop");
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = callback.borrow().as_ref() {
            if self.window.request_animation_frame(cb.as_ref().unchecked_ref()).is_err() {
                tracing::error!("requestAnimationFrame failed at start");
            }
        }

        // Leak the closure to keep it alive
        std::mem::forget(callback);
    }
}
