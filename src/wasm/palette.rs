use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, HtmlElement, Storage, Window};

use crate::config::Config;
use crate::palette::Palette;

/// Restores the saved accent hue and wires the palette button.
///
/// A missing button or unavailable storage only costs the feature.
pub fn install(window: &Window, document: &Document, config: &Config) {
    let Some(root) = document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    let storage = window.local_storage().ok().flatten();
    let saved = storage
        .as_ref()
        .and_then(|s| s.get_item(&config.storage_key).ok().flatten());
    let mut palette = Palette::restore(saved.as_deref());
    write_hue(&root, &config.hue_property, &palette);

    let Some(button) = document.get_element_by_id(&config.palette_button_id) else {
        log::debug!("palette: no #{} button", config.palette_button_id);
        return;
    };

    let property = config.hue_property.clone();
    let key = config.storage_key.clone();
    let on_click = Closure::wrap(Box::new(move || {
        palette.advance();
        write_hue(&root, &property, &palette);
        save(storage.as_ref(), &key, &palette);
    }) as Box<dyn FnMut()>);

    let listening = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    match listening {
        Ok(()) => on_click.forget(),
        Err(e) => log::warn!("palette: cannot listen for clicks: {e:?}"),
    }
}

fn write_hue(root: &HtmlElement, property: &str, palette: &Palette) {
    if let Err(e) = root.style().set_property(property, &palette.css_value()) {
        log::warn!("palette: cannot set {property}: {e:?}");
    }
}

fn save(storage: Option<&Storage>, key: &str, palette: &Palette) {
    let Some(storage) = storage else {
        return;
    };
    if let Err(e) = storage.set_item(key, &palette.stored_value()) {
        log::warn!("palette: cannot persist selection: {e:?}");
    }
}
