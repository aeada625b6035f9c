//! Backing-buffer sizing for the render surface.

/// Hard ceiling on the pixel ratio, whatever the configured cap says.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Static stand-in for the animation, set as the canvas `background`.
pub const FALLBACK_BACKGROUND: &str = "radial-gradient(1100px 700px at 12% -8%, #0c1616 0, transparent), \
     radial-gradient(900px 520px at 105% 12%, #0a1212 0, transparent)";

/// Pixel ratio actually used for a reported `devicePixelRatio`.
///
/// Missing or nonsensical ratios count as 1; anything above `max` (itself
/// limited to [`MAX_PIXEL_RATIO`]) is capped.
pub fn effective_pixel_ratio(device_pixel_ratio: f64, max: f64) -> f64 {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    dpr.min(max.min(MAX_PIXEL_RATIO))
}

/// Backing size for a surface displayed at `client_w` × `client_h` CSS pixels.
pub fn backing_size(client_w: i32, client_h: i32, device_pixel_ratio: f64, max: f64) -> (u32, u32) {
    let ratio = effective_pixel_ratio(device_pixel_ratio, max);
    let scale = |v: i32| (f64::from(v.max(0)) * ratio).floor() as u32;
    (scale(client_w), scale(client_h))
}

/// Returns the size to apply, or `None` when the surface already matches.
pub fn resize_target(current: (u32, u32), wanted: (u32, u32)) -> Option<(u32, u32)> {
    (current != wanted).then_some(wanted)
}
