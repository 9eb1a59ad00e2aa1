pub mod directive;
mod error;
pub mod map;
mod scene;
pub mod types;

pub use error::*;
pub use map::MapLayout;
pub use scene::*;
pub use strum;
pub use types::{Facing, Rgb, Surface, WallFace};
