use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, Window};

use super::render::{acquire_context, Renderer};
use crate::config::Config;
use crate::error::BackdropError;
use crate::frame_loop::{FrameLoop, Mode};
use crate::hue::parse_hue;
use crate::surface::{self, FALLBACK_BACKGROUND};
use crate::throttle::Throttle;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Animated shader backdrop bound to one canvas.
///
/// Clones share the same instance. All failures stay inside: the page sees
/// either the animation, the static gradient, or an untouched canvas.
#[derive(Clone)]
pub struct Backdrop {
    state: Rc<RefCell<State>>,
}

struct State {
    window: Window,
    root: Option<Element>,
    canvas: Option<HtmlCanvasElement>,
    config: Config,
    mode: Mode,
    frames: FrameLoop<i32>,
    renderer: Option<Renderer>,
    resize: Option<ResizeHook>,
    /// `requestAnimationFrame` callback; `request_frame` hands it back to
    /// the browser after every frame.
    on_frame: Option<Closure<dyn FnMut(f64)>>,
}

impl Backdrop {
    /// Sets up the backdrop on `canvas`, or does nothing when it is absent.
    ///
    /// `data-*` attributes on the canvas override `config`.
    pub fn install(window: &Window, canvas: Option<HtmlCanvasElement>, config: Config) -> Backdrop {
        let config = match &canvas {
            Some(c) => with_dataset(c, config),
            None => config,
        };
        let reduced_motion = prefers_reduced_motion(window);
        let mode = Mode::decide(canvas.is_some(), reduced_motion, || {
            canvas.as_ref().and_then(acquire_context).is_some()
        });
        let document = window.document();

        let backdrop = Backdrop {
            state: Rc::new(RefCell::new(State {
                window: window.clone(),
                root: document.as_ref().and_then(Document::document_element),
                canvas,
                frames: FrameLoop::new(config.time_scale),
                config,
                mode,
                renderer: None,
                resize: None,
                on_frame: None,
            })),
        };

        match mode {
            Mode::Inactive => log::debug!("backdrop: no canvas, nothing to do"),
            Mode::StaticFallback => {
                log::info!("backdrop: static fallback (reduced motion: {reduced_motion})");
                backdrop.state.borrow().apply_fallback();
            }
            Mode::Animated => {
                backdrop.start();
                if let Some(document) = &document {
                    if let Err(e) = backdrop.watch_visibility(document) {
                        log::warn!("backdrop: cannot watch visibility: {e:?}");
                    }
                }
            }
        }
        backdrop
    }

    pub fn mode(&self) -> Mode {
        self.state.borrow().mode
    }

    /// Handle of the outstanding animation-frame request, if any.
    pub fn frame_handle(&self) -> Option<i32> {
        self.state.borrow().frames.handle()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.state.borrow().frames.frames_drawn()
    }

    /// Resolution last pushed to the shader.
    pub fn resolution(&self) -> Option<(i32, i32)> {
        self.state.borrow().renderer.as_ref().map(Renderer::resolution)
    }

    /// Cancels the pending frame; nothing is drawn until [`Self::resume`].
    pub fn pause(&self) {
        self.state.borrow_mut().pause();
    }

    /// Rebuilds the animation from scratch with a fresh clock.
    pub fn resume(&self) {
        if self.mode() == Mode::Animated {
            self.start();
        }
    }

    fn start(&self) {
        let weak = Rc::downgrade(&self.state);
        let mut st = self.state.borrow_mut();
        st.teardown();
        if let Err(e) = st.build(weak) {
            log::warn!("backdrop: {e}");
            st.teardown();
            st.mode = Mode::Inactive;
        }
    }

    fn watch_visibility(&self, document: &Document) -> Result<(), JsValue> {
        let backdrop = self.clone();
        let doc = document.clone();
        let on_change = Closure::wrap(Box::new(move || {
            if doc.hidden() {
                backdrop.pause();
            } else {
                backdrop.resume();
            }
        }) as Box<dyn FnMut()>);
        document.add_event_listener_with_callback("visibilitychange", on_change.as_ref().unchecked_ref())?;
        // Lives as long as the page.
        on_change.forget();
        Ok(())
    }
}

impl State {
    fn build(&mut self, weak: Weak<RefCell<State>>) -> Result<(), BackdropError> {
        let Some(canvas) = self.canvas.clone() else {
            return Ok(());
        };
        let gl = acquire_context(&canvas).ok_or(BackdropError::Allocation("webgl2 context"))?;
        self.renderer = Some(Renderer::new(gl)?);
        self.resize_surface();
        self.resize = Some(ResizeHook::attach(
            &self.window,
            self.config.resize_throttle_ms,
            weak.clone(),
        )?);

        self.frames.restart(now_ms(&self.window));
        self.on_frame = Some(frame_callback(weak));
        self.request_frame()?;
        log::debug!("backdrop: animating");
        Ok(())
    }

    /// Releases everything `build` acquired.
    fn teardown(&mut self) {
        self.pause();
        if let Some(hook) = self.resize.take() {
            hook.detach(&self.window);
        }
        self.renderer = None;
        self.on_frame = None;
    }

    fn pause(&mut self) {
        if let Some(id) = self.frames.pause() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("backdrop: cancel frame {id}: {e:?}");
            }
            log::debug!("backdrop: paused");
        }
    }

    fn request_frame(&mut self) -> Result<(), JsValue> {
        let Some(cb) = self.on_frame.as_ref() else {
            return Ok(());
        };
        let id = self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        self.frames.scheduled(id);
        Ok(())
    }

    fn render_frame(&mut self, now: f64) {
        let Some(time) = self.frames.tick(now) else {
            return;
        };
        let hue = self.read_hue();
        if let Some(renderer) = &self.renderer {
            renderer.draw(time, hue);
        }
        if let Err(e) = self.request_frame() {
            log::warn!("backdrop: cannot schedule frame: {e:?}");
            self.frames.pause();
        }
    }

    fn read_hue(&self) -> f32 {
        let raw = self
            .root
            .as_ref()
            .and_then(|root| self.window.get_computed_style(root).ok().flatten())
            .and_then(|style| style.get_property_value(&self.config.hue_property).ok())
            .unwrap_or_default();
        parse_hue(&raw, self.config.default_hue)
    }

    fn resize_surface(&mut self) {
        let (Some(canvas), Some(renderer)) = (&self.canvas, self.renderer.as_mut()) else {
            return;
        };
        let wanted = surface::backing_size(
            canvas.client_width(),
            canvas.client_height(),
            self.window.device_pixel_ratio(),
            self.config.max_pixel_ratio,
        );
        if let Some((w, h)) = surface::resize_target((canvas.width(), canvas.height()), wanted) {
            canvas.set_width(w);
            canvas.set_height(h);
        }
        renderer.sync_viewport();
    }

    fn apply_fallback(&self) {
        let Some(canvas) = &self.canvas else {
            return;
        };
        if let Err(e) = canvas.style().set_property("background", FALLBACK_BACKGROUND) {
            log::warn!("backdrop: cannot apply fallback: {e:?}");
        }
    }
}

fn frame_callback(weak: Weak<RefCell<State>>) -> Closure<dyn FnMut(f64)> {
    Closure::wrap(Box::new(move |now: f64| {
        if let Some(state) = weak.upgrade() {
            state.borrow_mut().render_frame(now);
        }
    }) as Box<dyn FnMut(f64)>)
}

/// Window `resize` listener feeding a trailing-edge throttled resync.
struct ResizeHook {
    listener: Closure<dyn FnMut()>,
    throttle: Rc<RefCell<Throttle<i32>>>,
}

impl ResizeHook {
    fn attach(window: &Window, window_ms: i32, weak: Weak<RefCell<State>>) -> Result<Self, JsValue> {
        let throttle = Rc::new(RefCell::new(Throttle::new(window_ms)));

        let apply = {
            let throttle = throttle.clone();
            Rc::new(Closure::wrap(Box::new(move || {
                if !throttle.borrow_mut().fire() {
                    return;
                }
                if let Some(state) = weak.upgrade() {
                    state.borrow_mut().resize_surface();
                }
            }) as Box<dyn FnMut()>))
        };

        let listener = {
            let throttle = throttle.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                let callback: &JsValue = (*apply).as_ref();
                let armed = throttle.borrow_mut().trigger(|ms| {
                    window.set_timeout_with_callback_and_timeout_and_arguments_0(
                        callback.unchecked_ref(),
                        ms,
                    )
                });
                if let Err(e) = armed {
                    log::warn!("backdrop: cannot schedule resize: {e:?}");
                }
            }) as Box<dyn FnMut()>)
        };

        window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())?;
        Ok(Self { listener, throttle })
    }

    fn detach(self, window: &Window) {
        if let Err(e) =
            window.remove_event_listener_with_callback("resize", self.listener.as_ref().unchecked_ref())
        {
            log::warn!("backdrop: cannot remove resize listener: {e:?}");
        }
        if let Some(id) = self.throttle.borrow_mut().cancel() {
            window.clear_timeout_with_handle(id);
        }
    }
}

fn with_dataset(canvas: &HtmlCanvasElement, config: Config) -> Config {
    let dataset = canvas.dataset();
    let (config, errors) = config.with_overrides(|key| dataset.get(key));
    for e in errors {
        log::warn!("backdrop: {e}, keeping default");
    }
    config
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}
