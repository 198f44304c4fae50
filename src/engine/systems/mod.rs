pub mod frame_loop;

pub use frame_loop::{evaluate, FrameEvent, FrameLoop, FrameTarget, LoopState};
