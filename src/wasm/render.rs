use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation,
};

use crate::error::BackdropError;
use crate::shader::{self, ShaderStage};

/// Fetches the WebGL2 context of `canvas`, if the browser will give one.
pub fn acquire_context(canvas: &HtmlCanvasElement) -> Option<GL> {
    canvas
        .get_context("webgl2")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<GL>().ok())
}

/// GPU side of the backdrop: one program, one quad, three uniforms.
///
/// GL objects are released on drop.
pub struct Renderer {
    gl: GL,
    program: WebGlProgram,
    quad: WebGlBuffer,
    u_resolution: Option<WebGlUniformLocation>,
    u_time: Option<WebGlUniformLocation>,
    u_hue: Option<WebGlUniformLocation>,
    resolution: (i32, i32),
}

impl Renderer {
    pub fn new(gl: GL) -> Result<Self, BackdropError> {
        let vs = compile(&gl, ShaderStage::Vertex, shader::VERTEX_SHADER)?;
        let fs = match compile(&gl, ShaderStage::Fragment, shader::FRAGMENT_SHADER) {
            Ok(fs) => fs,
            Err(e) => {
                gl.delete_shader(Some(&vs));
                return Err(e);
            }
        };
        let linked = link(&gl, &vs, &fs);
        gl.delete_shader(Some(&vs));
        gl.delete_shader(Some(&fs));
        let program = linked?;
        gl.use_program(Some(&program));

        let Some(quad) = gl.create_buffer() else {
            gl.delete_program(Some(&program));
            return Err(BackdropError::Allocation("vertex buffer"));
        };
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&quad));
        let vertices = js_sys::Float32Array::from(&shader::QUAD[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);

        let loc = gl.get_attrib_location(&program, shader::ATTR_POSITION);
        if loc < 0 {
            gl.delete_buffer(Some(&quad));
            gl.delete_program(Some(&program));
            return Err(BackdropError::MissingAttribute(shader::ATTR_POSITION));
        }
        gl.enable_vertex_attrib_array(loc as u32);
        gl.vertex_attrib_pointer_with_i32(loc as u32, 2, GL::FLOAT, false, 0, 0);

        let u_resolution = gl.get_uniform_location(&program, shader::UNIFORM_RESOLUTION);
        let u_time = gl.get_uniform_location(&program, shader::UNIFORM_TIME);
        let u_hue = gl.get_uniform_location(&program, shader::UNIFORM_HUE);

        Ok(Self {
            gl,
            program,
            quad,
            u_resolution,
            u_time,
            u_hue,
            resolution: (0, 0),
        })
    }

    /// Matches viewport and resolution uniform to the drawing buffer.
    pub fn sync_viewport(&mut self) {
        let w = self.gl.drawing_buffer_width();
        let h = self.gl.drawing_buffer_height();
        self.gl.viewport(0, 0, w, h);
        self.gl.uniform2f(self.u_resolution.as_ref(), w as f32, h as f32);
        self.resolution = (w, h);
    }

    /// Resolution last pushed to the shader.
    pub fn resolution(&self) -> (i32, i32) {
        self.resolution
    }

    pub fn draw(&self, time: f32, hue: f32) {
        self.gl.uniform1f(self.u_time.as_ref(), time);
        self.gl.uniform1f(self.u_hue.as_ref(), hue);
        self.gl.draw_arrays(GL::TRIANGLES, 0, shader::QUAD_VERTICES);
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.gl.delete_buffer(Some(&self.quad));
        self.gl.delete_program(Some(&self.program));
    }
}

fn compile(gl: &GL, stage: ShaderStage, source: &str) -> Result<WebGlShader, BackdropError> {
    let kind = match stage {
        ShaderStage::Vertex => GL::VERTEX_SHADER,
        ShaderStage::Fragment => GL::FRAGMENT_SHADER,
    };
    let sh = gl
        .create_shader(kind)
        .ok_or(BackdropError::Allocation("shader object"))?;
    gl.shader_source(&sh, source);
    gl.compile_shader(&sh);

    let ok = gl
        .get_shader_parameter(&sh, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(sh)
    } else {
        let log = gl.get_shader_info_log(&sh).unwrap_or_default();
        gl.delete_shader(Some(&sh));
        Err(BackdropError::Compile { stage, log })
    }
}

fn link(gl: &GL, vs: &WebGlShader, fs: &WebGlShader) -> Result<WebGlProgram, BackdropError> {
    let program = gl
        .create_program()
        .ok_or(BackdropError::Allocation("program object"))?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);

    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        gl.detach_shader(&program, vs);
        gl.detach_shader(&program, fs);
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(BackdropError::Link(log))
    }
}
