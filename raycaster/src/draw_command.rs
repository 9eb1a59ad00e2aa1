use cubfile::Rgb;

use crate::minimap::{ScreenPos, ScreenRect};

/// A high-level draw command emitted by the renderer.
///
/// The renderer reads the scene and produces a sequence of these commands.
/// A `RenderTarget` implementation consumes them to produce pixels.
///
/// All colors are fully resolved by the renderer (textures sampled, shading
/// applied), so backends only rasterize.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// One full-height screen column of the 3D view.
    WallColumn {
        x: i32,
        ceiling: Rgb,
        floor: Rgb,
        /// First wall row. Rows above it are ceiling.
        wall_start: i32,
        /// First floor row. `texels` covers `[wall_start, wall_end)`.
        wall_end: i32,
        texels: Vec<Rgb>,
    },
    /// Filled square for one minimap tile.
    MinimapTile {
        origin: ScreenPos,
        size: u32,
        color: Rgb,
    },
    /// Line from the player marker to where a fan ray stopped, clipped to `clip`.
    MinimapRay {
        from: ScreenPos,
        to: ScreenPos,
        color: Rgb,
        clip: ScreenRect,
    },
    /// Filled circle at the player's minimap position. The radius is capped
    /// at [`MAX_PLAYER_RADIUS`].
    PlayerMarker {
        center: ScreenPos,
        radius: i32,
        color: Rgb,
    },
}

/// Largest player marker radius drawn, in pixels.
pub const MAX_PLAYER_RADIUS: i32 = 256;

/// Trait for rendering backends that consume `DrawCommand`s.
pub trait RenderTarget {
    /// Prepare a fresh frame.
    fn begin_frame(&mut self);

    /// Execute a single draw command.
    fn draw(&mut self, cmd: &DrawCommand);

    /// Finalize the current frame. After this call, the frame is ready to read or save.
    fn end_frame(&mut self);
}
