//! Builds the single GPU program the demo draws with.
//!
//! Both stages are read from disk, compiled and linked with the fixed
//! attribute layout below. Failures are collected into a [`Bootstrap`]
//! report instead of aborting, and the caller picks a [`ShaderPolicy`] to
//! decide whether a broken program is acceptable.

use std::fmt;
use std::path::{Path, PathBuf};

use glow::HasContext;

use crate::engine::utils::load_file;

/// Fixed vertex attribute locations shared by every shader of the demo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum AttributeSlot {
    Position = 0,
    Colour = 1,
    Normal = 2,
    TexCoord = 3,
    /// Reserved; no shader input is bound to it.
    Index = 4,
}

impl AttributeSlot {
    pub const fn location(self) -> u32 {
        self as u32
    }

    /// Name of the shader input bound to this slot before linking.
    pub const fn shader_name(self) -> Option<&'static str> {
        match self {
            AttributeSlot::Position => Some("in_Position"),
            AttributeSlot::Colour => Some("in_Color"),
            AttributeSlot::Normal => Some("in_Normal"),
            AttributeSlot::TexCoord => Some("in_TexCoord"),
            AttributeSlot::Index => None,
        }
    }
}

pub const BOUND_ATTRIBUTES: [AttributeSlot; 4] = [
    AttributeSlot::Position,
    AttributeSlot::Colour,
    AttributeSlot::Normal,
    AttributeSlot::TexCoord,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("Vertex"),
            ShaderStage::Fragment => f.write_str("Fragment"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShaderError {
    /// The driver refused to hand out a shader or program object.
    Create(String),
    MissingSource { stage: ShaderStage, path: PathBuf },
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
    /// A linked input ended up somewhere other than its fixed slot.
    Misbound { slot: AttributeSlot, found: u32 },
}

impl ShaderError {
    /// Compiler or linker output, if the failure carries any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log } => Some(log),
            ShaderError::Create(_)
            | ShaderError::MissingSource { .. }
            | ShaderError::Misbound { .. } => None,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Create(reason) => write!(f, "unable to create GL shader object: {reason}"),
            ShaderError::MissingSource { stage, path } => {
                write!(f, "{stage} shader source {} could not be opened", path.display())
            }
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader not compiled: {}", log.trim_end())
            }
            ShaderError::Link { log } => write!(f, "shader program not linked: {}", log.trim_end()),
            ShaderError::Misbound { slot, found } => write!(
                f,
                "{} bound to {found} instead of {}",
                slot.shader_name().unwrap_or("attribute"),
                slot.location()
            ),
        }
    }
}

impl std::error::Error for ShaderError {}

/// All failures of one bootstrap, returned when the strict policy rejects it.
#[derive(Debug)]
pub struct BootstrapError {
    pub failures: Vec<ShaderError>,
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shader bootstrap failed")?;
        for failure in &self.failures {
            write!(f, "; {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BootstrapError {}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShaderPolicy {
    /// Log failures and draw with whatever program resulted.
    #[default]
    Lenient,
    /// Any failure aborts startup.
    Strict,
}

/// Outcome of [`bootstrap_program`]: the program handle plus every failure
/// met on the way. The program is already active when this is returned.
#[derive(Debug)]
pub struct Bootstrap {
    pub program: glow::Program,
    pub failures: Vec<ShaderError>,
}

impl Bootstrap {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn is_linked(&self) -> bool {
        !self
            .failures
            .iter()
            .any(|failure| matches!(failure, ShaderError::Link { .. }))
    }

    /// Applies `policy`. A rejected program is deleted before returning.
    pub fn resolve(
        self,
        gl: &glow::Context,
        policy: ShaderPolicy,
    ) -> Result<glow::Program, BootstrapError> {
        match self.into_program(policy) {
            Ok(program) => Ok(program),
            Err((program, err)) => {
                unsafe { gl.delete_program(program) };
                Err(err)
            }
        }
    }

    fn into_program(
        self,
        policy: ShaderPolicy,
    ) -> Result<glow::Program, (glow::Program, BootstrapError)> {
        if self.succeeded() {
            return Ok(self.program);
        }
        match policy {
            ShaderPolicy::Lenient => {
                // Compile and link failures were logged with their info log.
                for failure in &self.failures {
                    if failure.diagnostic().is_none() {
                        log::warn!("{failure}");
                    }
                }
                log::warn!(
                    "Continuing with {} shader failure(s), program linked: {}",
                    self.failures.len(),
                    self.is_linked()
                );
                Ok(self.program)
            }
            ShaderPolicy::Strict => Err((
                self.program,
                BootstrapError {
                    failures: self.failures,
                },
            )),
        }
    }
}

/// Reads, compiles and links the vertex and fragment shaders at the given
/// paths, then makes the program current.
///
/// Compile and link failures are logged and recorded in the returned
/// report; only the inability to create GL objects at all is an error.
pub fn bootstrap_program(
    gl: &glow::Context,
    vertex_path: &Path,
    fragment_path: &Path,
) -> Result<Bootstrap, ShaderError> {
    let mut failures = Vec::new();

    let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_path, &mut failures)?;
    let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_path, &mut failures) {
        Ok(shader) => shader,
        Err(err) => {
            unsafe { gl.delete_shader(vertex) };
            return Err(err);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(reason) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(ShaderError::Create(reason));
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);

        // Locations only take effect when bound before linking.
        for slot in BOUND_ATTRIBUTES {
            if let Some(name) = slot.shader_name() {
                gl.bind_attrib_location(program, slot.location(), name);
            }
        }

        gl.link_program(program);
        let linked = gl.get_program_link_status(program);
        if !linked {
            let log = gl.get_program_info_log(program);
            log::warn!("Shader program not linked.");
            log_info(&log);
            failures.push(ShaderError::Link { log });
        }

        if linked {
            failures.extend(misbound_attributes(&resolve_attributes(gl, program)));
        }

        gl.use_program(Some(program));

        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        Ok(Bootstrap { program, failures })
    }
}

/// Reads back where each bound input landed, `None` for inputs the shaders
/// do not use.
fn resolve_attributes(
    gl: &glow::Context,
    program: glow::Program,
) -> Vec<(AttributeSlot, Option<u32>)> {
    BOUND_ATTRIBUTES
        .iter()
        .filter_map(|&slot| {
            let name = slot.shader_name()?;
            let found = unsafe { gl.get_attrib_location(program, name) };
            match found {
                Some(location) => log::info!("{name} bound to {location}"),
                None => log::info!("{name} unused"),
            }
            Some((slot, found))
        })
        .collect()
}

/// Active inputs whose resolved location differs from their fixed slot.
fn misbound_attributes(attributes: &[(AttributeSlot, Option<u32>)]) -> Vec<ShaderError> {
    attributes
        .iter()
        .filter_map(|&(slot, found)| match found {
            Some(found) if found != slot.location() => Some(ShaderError::Misbound { slot, found }),
            _ => None,
        })
        .collect()
}

fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    path: &Path,
    failures: &mut Vec<ShaderError>,
) -> Result<glow::Shader, ShaderError> {
    // The loaded bytes live only until the driver has its own copy.
    let source = match load_file(path) {
        Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        None => {
            failures.push(ShaderError::MissingSource {
                stage,
                path: path.to_path_buf(),
            });
            String::new()
        }
    };

    unsafe {
        let shader = gl.create_shader(stage.gl_type()).map_err(ShaderError::Create)?;
        gl.shader_source(shader, &source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            log::warn!("{stage} shader not compiled.");
            log_info(&log);
            failures.push(ShaderError::Compile { stage, log });
        }

        Ok(shader)
    }
}

fn log_info(info: &str) {
    let info = info.trim_end();
    if !info.is_empty() {
        log::warn!("Shader Info Log:\n{info}");
    }
}
