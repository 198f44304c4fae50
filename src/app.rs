use std::process::ExitCode;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

use crate::engine::config::DemoConfig;
use crate::engine::rendering::GlWindow;
use crate::engine::systems::{FrameEvent, FrameLoop, FrameTarget, LoopState};
use crate::index::Program;

/// Exit status for a fatal setup or frame failure.
pub const FATAL_EXIT_CODE: u8 = 1;

struct App {
    config: DemoConfig,
    frame_loop: FrameLoop,
    gl_window: Option<GlWindow>,
    program: Option<Program>,
    fatal: Option<anyhow::Error>,
}

/// One frame: draw the scene, then present it.
struct Frame<'a> {
    gl_window: &'a GlWindow,
    program: &'a mut Program,
}

impl FrameTarget for Frame<'_> {
    fn render_frame(&mut self) -> anyhow::Result<()> {
        let size = self.gl_window.window.inner_size();
        self.program.render(size.width, size.height);
        self.gl_window.swap_buffers()
    }
}

impl App {
    fn new(config: DemoConfig) -> Self {
        let frame_loop = FrameLoop::new(config.exit_after_frames);
        Self {
            config,
            frame_loop,
            gl_window: None,
            program: None,
            fatal: None,
        }
    }

    fn setup(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<(GlWindow, Program)> {
        let (gl_window, gl) = GlWindow::create(event_loop, &self.config)?;
        let program = Program::new(gl, &self.config)?;
        Ok((gl_window, program))
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gl_window), Some(program)) = (&self.gl_window, &mut self.program) else {
            return;
        };

        let mut frame = Frame { gl_window, program };
        let result = self.frame_loop.tick(&mut frame);
        match result {
            Ok(LoopState::Running) => gl_window.window.request_redraw(),
            Ok(LoopState::Stopped) => event_loop.exit(),
            Err(err) => self.fail(event_loop, err.context("Unable to render frame")),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl_window.is_some() || self.fatal.is_some() {
            return;
        }

        match self.setup(event_loop) {
            Ok((gl_window, program)) => {
                log::info!("Entering frame loop");
                gl_window.window.request_redraw();
                self.gl_window = Some(gl_window);
                self.program = Some(program);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.frame_loop.handle(Some(&FrameEvent::from(&event))) == LoopState::Stopped {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(gl_window) = &self.gl_window {
                    gl_window.resize(size);
                    gl_window.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // The context is still current here; it is dropped with `gl_window`.
        if let Some(program) = &self.program {
            program.cleanup();
        }
    }
}

/// Runs the demo to completion and returns the process exit status: success
/// on a normal quit, [`FATAL_EXIT_CODE`] when setup or a frame fails.
pub fn run(config: DemoConfig) -> ExitCode {
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Unable to initialize windowing subsystem: {err}");
            return ExitCode::from(FATAL_EXIT_CODE);
        }
    };

    let mut app = App::new(config);
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop terminated abnormally: {err}");
        return ExitCode::from(FATAL_EXIT_CODE);
    }

    if app.fatal.is_some() {
        return ExitCode::from(FATAL_EXIT_CODE);
    }

    log::info!(
        "Exiting after {} frame(s), loop {:?}",
        app.frame_loop.frames(),
        app.frame_loop.state()
    );
    ExitCode::SUCCESS
}
