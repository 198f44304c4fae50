//! Window, GL display, context and surface creation.

use std::num::NonZeroU32;

use anyhow::{anyhow, bail, Context as _};
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use glow::HasContext;
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::engine::config::DemoConfig;

/// The window together with its current GL context and surface.
pub struct GlWindow {
    // Dropped in declaration order: the surface goes before the window it
    // was created for.
    pub surface: Surface<WindowSurface>,
    pub context: PossiblyCurrentContext,
    pub window: Window,
}

impl GlWindow {
    /// Opens the window, makes a core-profile context current on it and
    /// loads the GL function pointers.
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &DemoConfig,
    ) -> anyhow::Result<(Self, glow::Context)> {
        let window_attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(false);

        // Double buffering is the template default; MSAA is only a preference.
        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let requested_samples = config.samples;
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes.clone()))
            .build(event_loop, template, |configs| {
                pick_config(configs, requested_samples)
            })
            .map_err(|err| anyhow!("{err}"))
            .context("Unable to find a suitable GL config")?;

        log::info!(
            "Using GL config with {} sample(s) (requested {requested_samples})",
            gl_config.num_samples()
        );

        let window = match window {
            Some(window) => window,
            None => glutin_winit::finalize_window(event_loop, window_attributes, &gl_config)
                .context("Unable to create window")?,
        };

        let raw_window_handle = window
            .window_handle()
            .context("Unable to get window handle")?
            .as_raw();

        let display = gl_config.display();
        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));

        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .with_context(|| format!("Unable to create OpenGL {major}.{minor} core context"))?;

        let (width, height) = surface_size(window.inner_size(), config);
        let surface_attributes =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_window_handle, width, height);
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .context("Unable to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("Unable to make GL context current")?;

        if let Some(interval) = NonZeroU32::new(config.swap_interval) {
            if let Err(err) = surface.set_swap_interval(&context, SwapInterval::Wait(interval)) {
                log::warn!("Unable to set swap interval {interval}: {err}");
            }
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol))
        };

        let version = gl.version();
        let version_string = unsafe { gl.get_parameter_string(glow::VERSION) };
        log::info!("{version_string}");
        if !meets_version((version.major, version.minor), (major.into(), minor.into())) {
            bail!(
                "OpenGL {major}.{minor} functions unavailable, driver reports {}.{}",
                version.major,
                version.minor
            );
        }

        let gl_window = Self {
            surface,
            context,
            window,
        };
        Ok((gl_window, gl))
    }

    pub fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.surface.resize(&self.context, width, height);
        }
    }

    pub fn swap_buffers(&self) -> anyhow::Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("Unable to swap buffers")
    }
}

fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>, requested_samples: u8) -> Config {
    configs
        .reduce(|best, candidate| {
            if prefers_samples(candidate.num_samples(), best.num_samples(), requested_samples) {
                candidate
            } else {
                best
            }
        })
        .expect("glutin only calls the picker with at least one config")
}

/// Exact match on the requested sample count wins, then the larger count.
fn prefers_samples(candidate: u8, current: u8, requested: u8) -> bool {
    if current == requested {
        return false;
    }
    candidate == requested || candidate > current
}

fn meets_version(found: (u32, u32), required: (u32, u32)) -> bool {
    found >= required
}

fn surface_size(size: PhysicalSize<u32>, config: &DemoConfig) -> (NonZeroU32, NonZeroU32) {
    let fallback_width = NonZeroU32::new(config.width).unwrap_or(NonZeroU32::MIN);
    let fallback_height = NonZeroU32::new(config.height).unwrap_or(NonZeroU32::MIN);
    (
        NonZeroU32::new(size.width).unwrap_or(fallback_width),
        NonZeroU32::new(size.height).unwrap_or(fallback_height),
    )
}
