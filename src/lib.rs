//! Animated shader backdrop for a single-page site, compiled to WebAssembly.
//!
//! The modules at the crate root are plain Rust and build on any target;
//! browser glue lives in `wasm` and only exists on `wasm32`.

pub mod config;
pub mod error;
pub mod frame_loop;
pub mod hue;
pub mod palette;
pub mod shader;
pub mod surface;
pub mod throttle;

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use crate::config::Config;

    mod backdrop;
    mod palette;
    mod render;

    pub use backdrop::Backdrop;
    pub use render::{acquire_context, Renderer};

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let config = Config::default();

        palette::install(&window, &document, &config);

        let canvas = document
            .get_element_by_id(&config.canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        // The backdrop lives as long as the page.
        std::mem::forget(Backdrop::install(&window, canvas, config));
        Ok(())
    }
}
