use thiserror::Error;

use crate::surface::MAX_PIXEL_RATIO;

/// Shortest resize throttle window a page may configure.
pub const MIN_RESIZE_THROTTLE_MS: i32 = 200;

/// Tunables for the backdrop and the accent palette.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Id of the canvas the backdrop renders into.
    pub canvas_id: String,
    /// Id of the button that cycles the accent palette.
    pub palette_button_id: String,
    /// CSS custom property carrying the accent hue.
    pub hue_property: String,
    /// `localStorage` key of the selected palette index.
    pub storage_key: String,
    /// Resize events are coalesced into one resync per window; never below
    /// [`MIN_RESIZE_THROTTLE_MS`].
    pub resize_throttle_ms: i32,
    /// Upper bound on `devicePixelRatio` when sizing the backing buffer; at
    /// most [`MAX_PIXEL_RATIO`].
    pub max_pixel_ratio: f64,
    /// Hue used when the custom property is missing or not a number.
    pub default_hue: f32,
    /// Converts frame timestamps (ms) into shader time.
    pub time_scale: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_id: "gl".into(),
            palette_button_id: "palette".into(),
            hue_property: "--hue".into(),
            storage_key: "hueIndex".into(),
            resize_throttle_ms: 200,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            default_hue: 210.0,
            time_scale: 0.0005,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("data-{key}=\"{value}\" is not a valid value")]
    Invalid { key: &'static str, value: String },
}

/// Dataset keys (camelCase, as `HTMLElement.dataset` exposes them).
pub const KEY_DEFAULT_HUE: &str = "defaultHue";
pub const KEY_THROTTLE_MS: &str = "resizeThrottleMs";
pub const KEY_MAX_PIXEL_RATIO: &str = "maxPixelRatio";

impl Config {
    /// Applies overrides found through `lookup` on top of `self`.
    ///
    /// Every key is attempted; invalid values leave the default in place and
    /// are returned so the caller can report them.
    pub fn with_overrides<F>(mut self, lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(raw) = lookup(KEY_DEFAULT_HUE) {
            match raw.trim().parse::<f32>() {
                Ok(h) if h.is_finite() => self.default_hue = h,
                _ => errors.push(invalid(KEY_DEFAULT_HUE, raw)),
            }
        }
        if let Some(raw) = lookup(KEY_THROTTLE_MS) {
            match raw.trim().parse::<i32>() {
                Ok(ms) if ms >= MIN_RESIZE_THROTTLE_MS => self.resize_throttle_ms = ms,
                _ => errors.push(invalid(KEY_THROTTLE_MS, raw)),
            }
        }
        if let Some(raw) = lookup(KEY_MAX_PIXEL_RATIO) {
            match raw.trim().parse::<f64>() {
                Ok(r) if r > 0.0 && r <= MAX_PIXEL_RATIO => self.max_pixel_ratio = r,
                _ => errors.push(invalid(KEY_MAX_PIXEL_RATIO, raw)),
            }
        }

        (self, errors)
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { key, value }
}
