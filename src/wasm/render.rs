use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, AddEventListenerOptions, HtmlCanvasElement, WebGlRenderingContext as GL};

use super::webgl::PerformanceClock;
use crate::clock::TimeSource;
use crate::{launch, Config, FrameState, Renderer, SetupError, ShaderSources};

pub type SharedRenderer = Rc<RefCell<Renderer<GL>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Runs setup once the document has loaded, or right away if it already has.
pub fn start_when_ready(config: Config) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    if document.ready_state() == "complete" {
        setup(&config);
        return Ok(());
    }

    let on_load = Closure::once(move || setup(&config));
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "load",
        on_load.as_ref().unchecked_ref(),
        &options,
    )?;
    on_load.forget();
    Ok(())
}

fn setup(config: &Config) {
    let canvas = match locate_canvas(&config.canvas_selector) {
        Ok(canvas) => canvas,
        Err(err) => {
            log::error!("{err}");
            return;
        }
    };

    let clock = PerformanceClock::new();
    let Some(renderer) = launch(&canvas, ShaderSources::default(), config, &clock) else {
        return;
    };
    let renderer = Rc::new(RefCell::new(renderer));

    if let Err(err) = register_teardown(&renderer) {
        log::warn!("teardown not registered: {}", SetupError::from(err));
    }
    if let Err(err) = run_frames(renderer, clock) {
        log::error!("{}", SetupError::from(err));
    }
}

fn locate_canvas(selector: &str) -> Result<HtmlCanvasElement, SetupError> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| SetupError::Js("no document".to_owned()))?;
    document
        .query_selector(selector)?
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| SetupError::SurfaceNotFound {
            selector: selector.to_owned(),
        })
}

/// Runs [`Renderer::cleanup`] once when the page is about to be discarded.
pub fn register_teardown(renderer: &SharedRenderer) -> Result<(), JsValue> {
    let renderer = Rc::clone(renderer);
    let on_unload = Closure::once(move || renderer.borrow_mut().cleanup());
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    window().ok_or("no window")?.add_event_listener_with_callback_and_add_event_listener_options(
        "beforeunload",
        on_unload.as_ref().unchecked_ref(),
        &options,
    )?;
    on_unload.forget();
    Ok(())
}

/// Handle on a running animation-frame loop.
pub struct FrameLoop {
    renderer: SharedRenderer,
    clock: PerformanceClock,
    callback: FrameCallback,
    requested: Rc<Cell<u32>>,
}

impl FrameLoop {
    /// Animation frames requested so far.
    pub fn frames_requested(&self) -> u32 {
        self.requested.get()
    }

    /// Runs one iteration of the loop body outside the browser's schedule.
    pub fn tick(&self) -> FrameState {
        step(&self.renderer, &self.clock, &self.callback, &self.requested)
    }
}

/// Draws on every animation frame until the renderer reports `Stopped`.
pub fn run_frames(renderer: SharedRenderer, clock: PerformanceClock) -> Result<FrameLoop, JsValue> {
    // `f` holds the animation-frame closure so it can re-schedule itself.
    // Storing it inside an `Option` allows creating the `Closure` first and
    // then obtaining a reference to it from within itself.
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let requested = Rc::new(Cell::new(0));
    let frame = {
        let (renderer, clock, f, requested) =
            (Rc::clone(&renderer), clock.clone(), Rc::clone(&f), Rc::clone(&requested));
        Closure::wrap(Box::new(move || {
            step(&renderer, &clock, &f, &requested);
        }) as Box<dyn FnMut()>)
    };
    *f.borrow_mut() = Some(frame);

    request_frame(&f)?;
    requested.set(1);
    Ok(FrameLoop {
        renderer,
        clock,
        callback: f,
        requested,
    })
}

fn step(
    renderer: &SharedRenderer,
    clock: &PerformanceClock,
    f: &FrameCallback,
    requested: &Cell<u32>,
) -> FrameState {
    let state = renderer.borrow().render_frame(clock.now_ms());
    if state == FrameState::Stopped {
        log::debug!("frame loop stopped");
        return state;
    }
    match request_frame(f) {
        Ok(()) => requested.set(requested.get() + 1),
        Err(err) => log::error!("failed to schedule frame: {err:?}"),
    }
    state
}

fn request_frame(f: &FrameCallback) -> Result<(), JsValue> {
    let slot = f.borrow();
    let callback = slot.as_ref().ok_or("frame callback missing")?;
    window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}
