//! The RUNNING/STOPPED frame loop state and its quit predicate.

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// The slice of window input the frame loop cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    CloseRequested,
    KeyPressed(KeyCode),
    KeyReleased(KeyCode),
    Other,
}

impl From<&WindowEvent> for FrameEvent {
    fn from(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CloseRequested => FrameEvent::CloseRequested,
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => match event.state {
                    ElementState::Pressed => FrameEvent::KeyPressed(code),
                    ElementState::Released => FrameEvent::KeyReleased(code),
                },
                PhysicalKey::Unidentified(_) => FrameEvent::Other,
            },
            _ => FrameEvent::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Close and Escape-down stop the loop; nothing else does.
pub fn evaluate(event: Option<&FrameEvent>) -> LoopState {
    match event {
        Some(FrameEvent::CloseRequested) | Some(FrameEvent::KeyPressed(KeyCode::Escape)) => {
            LoopState::Stopped
        }
        _ => LoopState::Running,
    }
}

/// Something that can draw and present one frame.
pub trait FrameTarget {
    fn render_frame(&mut self) -> anyhow::Result<()>;
}

#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
    frame_limit: Option<u64>,
}

impl FrameLoop {
    pub fn new(frame_limit: Option<u64>) -> Self {
        Self {
            state: LoopState::Running,
            frames: 0,
            frame_limit,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Feeds one input event through the quit predicate. Once stopped the
    /// loop stays stopped.
    pub fn handle(&mut self, event: Option<&FrameEvent>) -> LoopState {
        if self.is_running() && evaluate(event) == LoopState::Stopped {
            log::info!("Quit requested after {} frame(s)", self.frames);
            self.state = LoopState::Stopped;
        }
        self.state
    }

    /// Renders one frame if still running, then applies the frame limit. A
    /// frame that fails stops the loop.
    pub fn tick(&mut self, target: &mut impl FrameTarget) -> anyhow::Result<LoopState> {
        if !self.is_running() {
            return Ok(self.state);
        }

        if let Err(err) = target.render_frame() {
            self.state = LoopState::Stopped;
            return Err(err);
        }
        self.frames += 1;

        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            log::info!("Frame limit of {} reached", self.frames);
            self.state = LoopState::Stopped;
        }
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;

    use super::*;

    #[derive(Default)]
    struct CountingTarget {
        frames: u32,
        fail: bool,
    }

    impl FrameTarget for CountingTarget {
        fn render_frame(&mut self) -> anyhow::Result<()> {
            if self.fail {
                bail!("lost context");
            }
            self.frames += 1;
            Ok(())
        }
    }

    #[test]
    fn close_and_escape_stop_the_loop() {
        assert_eq!(evaluate(Some(&FrameEvent::CloseRequested)), LoopState::Stopped);
        assert_eq!(
            evaluate(Some(&FrameEvent::KeyPressed(KeyCode::Escape))),
            LoopState::Stopped
        );
    }

    #[test]
    fn everything_else_keeps_running() {
        assert_eq!(evaluate(None), LoopState::Running);
        assert_eq!(evaluate(Some(&FrameEvent::Other)), LoopState::Running);
        assert_eq!(
            evaluate(Some(&FrameEvent::KeyPressed(KeyCode::Space))),
            LoopState::Running
        );
        assert_eq!(
            evaluate(Some(&FrameEvent::KeyReleased(KeyCode::Escape))),
            LoopState::Running
        );
    }

    #[test]
    fn window_events_map_to_frame_events() {
        assert_eq!(
            FrameEvent::from(&WindowEvent::CloseRequested),
            FrameEvent::CloseRequested
        );
        assert_eq!(FrameEvent::from(&WindowEvent::Focused(true)), FrameEvent::Other);
    }

    #[test]
    fn renders_every_step_until_quit() {
        let mut target = CountingTarget::default();
        let mut frame_loop = FrameLoop::new(None);

        let events = [
            None,
            Some(FrameEvent::KeyPressed(KeyCode::KeyA)),
            None,
            Some(FrameEvent::KeyPressed(KeyCode::Escape)),
            None,
        ];
        for event in &events {
            frame_loop.handle(event.as_ref());
            frame_loop.tick(&mut target).unwrap();
        }

        assert_eq!(frame_loop.state(), LoopState::Stopped);
        assert_eq!(frame_loop.frames(), 3);
        assert_eq!(target.frames, 3);
    }

    #[test]
    fn stopped_loop_never_restarts() {
        let mut frame_loop = FrameLoop::new(None);
        frame_loop.handle(Some(&FrameEvent::CloseRequested));
        frame_loop.handle(Some(&FrameEvent::Other));
        assert!(!frame_loop.is_running());

        let mut target = CountingTarget::default();
        assert_eq!(frame_loop.tick(&mut target).unwrap(), LoopState::Stopped);
        assert_eq!(target.frames, 0);
    }

    #[test]
    fn frame_limit_stops_after_presenting() {
        let mut target = CountingTarget::default();
        let mut frame_loop = FrameLoop::new(Some(2));

        assert_eq!(frame_loop.tick(&mut target).unwrap(), LoopState::Running);
        assert_eq!(frame_loop.tick(&mut target).unwrap(), LoopState::Stopped);
        assert_eq!(frame_loop.tick(&mut target).unwrap(), LoopState::Stopped);
        assert_eq!(target.frames, 2);
    }

    #[test]
    fn render_failure_is_propagated() {
        let mut target = CountingTarget {
            fail: true,
            ..Default::default()
        };
        let mut frame_loop = FrameLoop::new(None);
        assert!(frame_loop.tick(&mut target).is_err());
        assert_eq!(frame_loop.frames(), 0);
        assert_eq!(frame_loop.state(), LoopState::Stopped);
        assert_eq!(frame_loop.tick(&mut target).unwrap(), LoopState::Stopped);
        assert_eq!(target.frames, 0);
    }
}
