//! GLSL sources for the backdrop program.
//!
//! `tests/pattern.rs` mirrors `FRAGMENT_SHADER` on the CPU; keep them in step.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

pub const ATTR_POSITION: &str = "a_position";
pub const UNIFORM_RESOLUTION: &str = "u_resolution";
pub const UNIFORM_TIME: &str = "u_time";
pub const UNIFORM_HUE: &str = "u_hue";

/// Two triangles covering clip space.
pub const QUAD: [f32; 12] = [
    -1.0, -1.0, 1.0, -1.0, -1.0, 1.0, //
    -1.0, 1.0, 1.0, -1.0, 1.0, 1.0,
];
pub const QUAD_VERTICES: i32 = (QUAD.len() / 2) as i32;

pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 a_position;
void main() {
    gl_Position = vec4(a_position, 0.0, 1.0);
}
"#;

pub const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

uniform vec2 u_resolution;
uniform float u_time;
uniform float u_hue;

out vec4 frag_color;

const float GRID_SCALE = 5.0;
const float TAU = 6.2831;

vec3 hsl(float hue, float sat, float light) {
    hue = mod(hue, 1.0);
    vec3 rgb = vec3(0.0);
    float v = (light <= 0.5) ? (light * (1.0 + sat)) : (light + sat - light * sat);
    if (v > 0.0) {
        float m = light + light - v;
        float sv = (v - m) / v;
        hue *= 6.0;
        float sextant = floor(hue);
        float frac = hue - sextant;
        if (mod(sextant, 2.0) == 0.0) frac = 1.0 - frac;
        float vsf = v * sv * frac;
        if (sextant == 0.0) rgb = vec3(v, v - vsf, m);
        else if (sextant == 1.0) rgb = vec3(v - vsf, v, m);
        else if (sextant == 2.0) rgb = vec3(m, v, v - vsf);
        else if (sextant == 3.0) rgb = vec3(m, v - vsf, v);
        else if (sextant == 4.0) rgb = vec3(v - vsf, m, v);
        else rgb = vec3(v, m, v - vsf);
    }
    return rgb;
}

mat2 rotation(float a) {
    return mat2(cos(a), -sin(a), sin(a), cos(a));
}

vec2 cell_hash(vec2 cell) {
    cell = vec2(dot(cell, vec2(127.1, 311.7)), dot(cell, vec2(269.5, 183.3)));
    return -1.0 + 2.0 * fract(sin(cell) * 43758.5453);
}

vec2 point_in_cell(vec2 cell, float phase) {
    return 0.5 + 0.5 * sin(phase + cell_hash(cell) * TAU);
}

void main() {
    vec2 uv = (gl_FragCoord.xy - 0.5 * u_resolution) / u_resolution.y;
    float time = u_time * 0.1;
    uv *= rotation(time);

    vec2 p = uv * GRID_SCALE;
    vec2 cell = floor(p);
    vec2 local = fract(p);
    float phase = time * 0.5;
    vec2 center_point = point_in_cell(cell, phase);

    float glow = 0.0;
    for (int y = -1; y <= 1; y++) {
        for (int x = -1; x <= 1; x++) {
            vec2 offset = vec2(float(x), float(y));
            vec2 diff = offset + point_in_cell(cell + offset, phase) - local;
            glow += smoothstep(0.1, 0.0, length(diff));

            if (x == 0 && y == 0) continue;

            vec2 span = diff - (center_point - local);
            float separation = length(span);
            if (separation < 1.0) {
                float along = clamp(dot(diff, span) / dot(span, span), 0.0, 1.0);
                float seg = smoothstep(0.05, 0.0, length(diff - along * span));
                glow += seg * 0.3 * (1.0 - separation);
            }
        }
    }

    float h = u_hue / 360.0;
    vec3 color = glow * hsl(h, 0.9, 0.6);
    color += hsl(h, 0.8, 0.05);
    color *= smoothstep(1.5, 0.4, length(uv));

    frag_color = vec4(color, 1.0);
}
"#;
