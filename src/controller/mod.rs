// CONTROLLER: input and the update loop
pub mod input;
pub mod frame_loop;

pub use input::{InputEvent, InputProcessor, InputState, KeyBindings};
pub use frame_loop::{CameraUniform, FrameLoop};
