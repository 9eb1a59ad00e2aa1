pub mod assets;
pub mod config;
pub mod draw_command;
pub mod drawing;
pub mod error;
pub mod frame_loop;
pub mod framebuffer;
pub mod grid;
pub mod input;
pub mod minimap;
pub mod player;
pub mod projection;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod texture;
pub mod vector;

/// Default frame width in pixels.
pub const SCREEN_WIDTH: u32 = 500;
/// Default frame height in pixels.
pub const SCREEN_HEIGHT: u32 = 500;

pub use draw_command::{DrawCommand, RenderTarget};
pub use drawing::ImageTarget;
pub use error::{Error, Result};
pub use frame_loop::{DumpMode, FramePacer, FrameSink, GameLoop, PngSink, TimeStep};
pub use framebuffer::FrameBuffer;
pub use renderer::{FrameRenderer, RenderOptions};
pub use scene::Scene;
