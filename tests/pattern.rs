//! CPU rendition of `FRAGMENT_SHADER`, evaluated one pixel at a time so the
//! pattern can be checked without a GPU. Keep it in step with the GLSL.

use backdrop_wasm::shader::FRAGMENT_SHADER;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;

#[cfg(target_arch = "wasm32")]
wasm_bindgen_test_configure!(run_in_browser);

const GRID_SCALE: f32 = 5.0;
const TAU: f32 = 6.2831;

#[derive(Clone, Copy, Debug, PartialEq)]
struct V2(f32, f32);

impl V2 {
    fn add(self, o: V2) -> V2 {
        V2(self.0 + o.0, self.1 + o.1)
    }
    fn sub(self, o: V2) -> V2 {
        V2(self.0 - o.0, self.1 - o.1)
    }
    fn scale(self, k: f32) -> V2 {
        V2(self.0 * k, self.1 * k)
    }
    fn dot(self, o: V2) -> f32 {
        self.0 * o.0 + self.1 * o.1
    }
    fn length(self) -> f32 {
        self.dot(self).sqrt()
    }
    fn map(self, f: impl Fn(f32) -> f32) -> V2 {
        V2(f(self.0), f(self.1))
    }
}

fn fract(x: f32) -> f32 {
    x - x.floor()
}

fn glsl_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

/// GLSL `smoothstep`, including the reversed-edge form used for falloffs.
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// HSL to RGB with `hue` in turns (wrapped to [0, 1)).
fn hsl(hue: f32, sat: f32, light: f32) -> [f32; 3] {
    let hue = glsl_mod(hue, 1.0);
    let v = if light <= 0.5 {
        light * (1.0 + sat)
    } else {
        light + sat - light * sat
    };
    if v <= 0.0 {
        return [0.0; 3];
    }
    let m = light + light - v;
    let sv = (v - m) / v;
    let h6 = hue * 6.0;
    let sextant = h6.floor();
    let mut frac = h6 - sextant;
    if glsl_mod(sextant, 2.0) == 0.0 {
        frac = 1.0 - frac;
    }
    let vsf = v * sv * frac;
    match sextant as i32 {
        0 => [v, v - vsf, m],
        1 => [v - vsf, v, m],
        2 => [m, v, v - vsf],
        3 => [m, v - vsf, v],
        4 => [v - vsf, m, v],
        _ => [v, m, v - vsf],
    }
}

/// Per-cell pseudo-random offset in [-1, 1]², a pure function of the cell.
fn cell_hash(cell: (f32, f32)) -> (f32, f32) {
    let c = V2(cell.0, cell.1);
    let p = V2(c.dot(V2(127.1, 311.7)), c.dot(V2(269.5, 183.3)));
    let r = p.map(|x| -1.0 + 2.0 * fract(x.sin() * 43758.5453));
    (r.0, r.1)
}

fn point_in_cell(cell: V2, phase: f32) -> V2 {
    let (hx, hy) = cell_hash((cell.0, cell.1));
    V2(hx, hy).map(|h| 0.5 + 0.5 * (phase + h * TAU).sin())
}

/// Screen position to rotated pattern space for shader time `time`.
fn pattern_uv(frag: (f32, f32), resolution: (f32, f32), time: f32) -> V2 {
    let uv = V2(
        (frag.0 - 0.5 * resolution.0) / resolution.1,
        (frag.1 - 0.5 * resolution.1) / resolution.1,
    );
    let (s, c) = (time * 0.1).sin_cos();
    V2(uv.0 * c - uv.1 * s, uv.0 * s + uv.1 * c)
}

/// Colour of the pixel at `frag` (window coordinates, origin bottom-left).
///
/// `time` is the value fed to the time uniform, `hue` is in degrees.
fn shade(frag: (f32, f32), resolution: (f32, f32), time: f32, hue: f32) -> [f32; 3] {
    let uv = pattern_uv(frag, resolution, time);
    let p = uv.scale(GRID_SCALE);
    let cell = p.map(f32::floor);
    let local = p.map(fract);
    let phase = time * 0.1 * 0.5;
    let center_point = point_in_cell(cell, phase);

    let mut glow = 0.0;
    for y in -1..=1 {
        for x in -1..=1 {
            let offset = V2(x as f32, y as f32);
            let diff = offset.add(point_in_cell(cell.add(offset), phase)).sub(local);
            glow += smoothstep(0.1, 0.0, diff.length());

            if x == 0 && y == 0 {
                continue;
            }

            let span = diff.sub(center_point.sub(local));
            let separation = span.length();
            if separation < 1.0 {
                let along = (diff.dot(span) / span.dot(span)).clamp(0.0, 1.0);
                let seg = smoothstep(0.05, 0.0, diff.sub(span.scale(along)).length());
                glow += seg * 0.3 * (1.0 - separation);
            }
        }
    }

    let h = hue / 360.0;
    let accent = hsl(h, 0.9, 0.6);
    let ambient = hsl(h, 0.8, 0.05);
    let vignette = smoothstep(1.5, 0.4, uv.length());
    std::array::from_fn(|i| (glow * accent[i] + ambient[i]) * vignette)
}

const RES: (f32, f32) = (800.0, 600.0);

fn max_channel(c: [f32; 3]) -> f32 {
    c[0].max(c[1]).max(c[2])
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn same_inputs_same_colour() {
    for &(x, y) in &[(0.5, 0.5), (400.0, 300.0), (123.5, 456.5), (799.5, 1.5)] {
        let a = shade((x, y), RES, 12.75, 152.0);
        let b = shade((x, y), RES, 12.75, 152.0);
        assert_eq!(a, b, "pixel ({x}, {y}) is not reproducible");
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn far_from_centre_is_black() {
    // uv.x ≈ -3.3 on a very wide surface, well past the vignette radius.
    let c = shade((0.5, 300.0), (4000.0, 600.0), 3.0, 210.0);
    assert_eq!(c, [0.0; 3]);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn ambient_tint_reaches_the_centre() {
    let c = shade((400.0, 300.0), RES, 0.0, 210.0);
    assert!(c.iter().all(|&v| v >= 0.009), "centre too dark: {c:?}");
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn points_glow_in_accent_colour() {
    let mut brightest = 0.0f32;
    for yi in 0..75 {
        for xi in 0..100 {
            let frag = (200.0 + xi as f32 * 4.0 + 0.5, 150.0 + yi as f32 * 4.0 + 0.5);
            brightest = brightest.max(max_channel(shade(frag, RES, 0.0, 210.0)));
        }
    }
    assert!(brightest > 0.5, "no point glow found, brightest {brightest}");
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn red_accent_dominates_every_pixel() {
    for yi in 0..30 {
        for xi in 0..40 {
            let frag = (xi as f32 * 20.0 + 0.5, yi as f32 * 20.0 + 0.5);
            let [r, g, b] = shade(frag, RES, 5.0, 0.0);
            assert!(r >= g && r >= b, "({frag:?}) -> {r} {g} {b}");
        }
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn hue_wraps_at_full_turn() {
    let a = shade((410.5, 280.5), RES, 8.0, 0.0);
    let b = shade((410.5, 280.5), RES, 8.0, 360.0);
    for (x, y) in a.iter().zip(b) {
        assert!((x - y).abs() < 1e-5);
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn pattern_moves_over_time() {
    let (mut moved, mut total) = (0, 0);
    for yi in 0..60 {
        for xi in 0..80 {
            let frag = (xi as f32 * 10.0 + 0.5, yi as f32 * 10.0 + 0.5);
            if shade(frag, RES, 0.0, 210.0) != shade(frag, RES, 40.0, 210.0) {
                moved += 1;
            }
            total += 1;
        }
    }
    // Points and segments cover a few percent of the surface at any time.
    assert!(moved * 20 > total, "only {moved} of {total} pixels changed");
}

fn close(a: [f32; 3], b: [f32; 3]) -> bool {
    a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn mirror_uses_shader_constants() {
    for needle in [
        "GRID_SCALE = 5.0",
        "TAU = 6.2831",
        "43758.5453",
        "u_time * 0.1",
        "time * 0.5",
        "smoothstep(0.1, 0.0, length(diff))",
        "smoothstep(0.05, 0.0,",
        "seg * 0.3 * (1.0 - separation)",
        "hsl(h, 0.9, 0.6)",
        "hsl(h, 0.8, 0.05)",
        "smoothstep(1.5, 0.4, length(uv))",
    ] {
        assert!(FRAGMENT_SHADER.contains(needle), "shader no longer has `{needle}`");
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn hsl_primaries() {
    assert!(close(hsl(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
    assert!(close(hsl(120.0 / 360.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
    assert!(close(hsl(240.0 / 360.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn hsl_wraps_whole_turns() {
    assert!(close(hsl(1.0, 0.9, 0.6), hsl(0.0, 0.9, 0.6)));
    assert!(close(hsl(-0.25, 0.9, 0.6), hsl(0.75, 0.9, 0.6)));
    assert_eq!(hsl(0.3, 0.8, 0.0), [0.0; 3]);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn reversed_smoothstep_falls_off() {
    assert_eq!(smoothstep(0.1, 0.0, 0.0), 1.0);
    assert_eq!(smoothstep(0.1, 0.0, 0.2), 0.0);
    assert!((smoothstep(0.1, 0.0, 0.05) - 0.5).abs() < 1e-6);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn hash_is_bounded() {
    for x in -20..20 {
        for y in -20..20 {
            let (a, b) = cell_hash((x as f32, y as f32));
            assert!((-1.0..=1.0).contains(&a) && (-1.0..=1.0).contains(&b));
        }
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn rotation_preserves_distance_from_centre() {
    let res = (800.0, 600.0);
    let still = pattern_uv((700.0, 100.0), res, 0.0);
    let turned = pattern_uv((700.0, 100.0), res, 17.0);
    assert!((still.length() - turned.length()).abs() < 1e-5);
    assert_ne!(still, turned);
}
