use cubfile::Rgb;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::player::Player;
use crate::vector::Vec2;

/// Pixel position on the frame.
/// (0,0) is top-left, positive X = right, positive Y = down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned pixel rectangle, `[x, x + width) x [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (dx, dy) = (x as i64 - self.x as i64, y as i64 - self.y as i64);
        dx >= 0 && dy >= 0 && dx < self.width as i64 && dy < self.height as i64
    }

    /// Overlap with the `width` x `height` frame, as inclusive pixel bounds
    /// `(min_x, min_y, max_x, max_y)`. `None` when nothing is on screen.
    pub fn on_screen(&self, width: u32, height: u32) -> Option<(i32, i32, i32, i32)> {
        let min_x = (self.x as i64).max(0);
        let min_y = (self.y as i64).max(0);
        let max_x = (self.x as i64 + self.width as i64).min(width as i64) - 1;
        let max_y = (self.y as i64 + self.height as i64).min(height as i64) - 1;
        if min_x > max_x || min_y > max_y {
            return None;
        }
        Some((min_x as i32, min_y as i32, max_x as i32, max_y as i32))
    }
}

/// Largest accepted `MinimapLayout::scale`, in pixels per tile.
pub const MAX_MINIMAP_SCALE: u32 = 256;
/// Largest accepted `MinimapLayout::viewport_tiles`.
pub const MAX_VIEWPORT_TILES: u32 = 256;

fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Minimap colors. Empty and out-of-grid tiles use the scene floor color instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapPalette {
    pub wall: Rgb,
    pub walkable: Rgb,
    pub ray: Rgb,
    pub player: Rgb,
}

impl Default for MinimapPalette {
    fn default() -> Self {
        Self {
            wall: Rgb::new(255, 255, 255),
            walkable: Rgb::new(64, 64, 64),
            ray: Rgb::new(255, 220, 0),
            player: Rgb::new(255, 0, 0),
        }
    }
}

/// Geometry of the minimap overlay: a square window of `viewport_tiles`
/// tiles, `scale` pixels each, whose top-left corner sits at `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapLayout {
    pub scale: u32,
    pub viewport_tiles: u32,
    pub offset: ScreenPos,
}

impl Default for MinimapLayout {
    fn default() -> Self {
        Self {
            scale: 10,
            viewport_tiles: 15,
            offset: ScreenPos { x: 10, y: 10 },
        }
    }
}

impl MinimapLayout {
    /// The same layout with `scale` and `viewport_tiles` limited to
    /// [`MAX_MINIMAP_SCALE`] and [`MAX_VIEWPORT_TILES`].
    pub fn clamped(&self) -> Self {
        Self {
            scale: self.scale.min(MAX_MINIMAP_SCALE),
            viewport_tiles: self.viewport_tiles.min(MAX_VIEWPORT_TILES),
            offset: self.offset,
        }
    }

    fn half(&self) -> i32 {
        (self.viewport_tiles / 2) as i32
    }

    /// Grid cell shown in the top-left tile of the viewport. Keeps the
    /// player's cell in the middle of the window.
    pub fn camera_start(&self, pos: Vec2) -> (i32, i32) {
        let (x, y) = pos.cell();
        (x.saturating_sub(self.half()), y.saturating_sub(self.half()))
    }

    /// Project a world point to minimap pixels for a given camera start.
    /// Truncates toward zero like the tile grid does.
    pub fn world_to_screen(&self, camera_start: (i32, i32), world: Vec2) -> ScreenPos {
        let scale = self.scale as f64;
        let project = |offset: i32, world: f64, start: i32| {
            saturate(offset as i64 + ((world - start as f64) * scale) as i64)
        };
        ScreenPos {
            x: project(self.offset.x, world.x, camera_start.0),
            y: project(self.offset.y, world.y, camera_start.1),
        }
    }

    /// Where the player marker is drawn: the center tile plus the player's
    /// sub-tile offset.
    pub fn player_center(&self, pos: Vec2) -> ScreenPos {
        let scale = self.scale as i64;
        let frac = pos.fract();
        let center = |offset: i32, frac: f64| {
            saturate(offset as i64 + self.half() as i64 * scale + (frac * scale as f64) as i64)
        };
        ScreenPos {
            x: center(self.offset.x, frac.x),
            y: center(self.offset.y, frac.y),
        }
    }

    /// Top-left pixel of viewport tile `(i, j)`.
    pub fn tile_origin(&self, i: u32, j: u32) -> ScreenPos {
        let scale = self.scale as i64;
        ScreenPos {
            x: saturate(self.offset.x as i64 + i as i64 * scale),
            y: saturate(self.offset.y as i64 + j as i64 * scale),
        }
    }

    /// The pixel area covered by the viewport. Ray lines are clipped to it.
    pub fn viewport(&self) -> ScreenRect {
        let side = self.viewport_tiles.saturating_mul(self.scale);
        ScreenRect {
            x: self.offset.x,
            y: self.offset.y,
            width: side,
            height: side,
        }
    }
}

/// Fixed-step ray march used for the minimap fan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayMarch {
    /// Distance advanced per step, in tiles.
    pub step: f64,
    pub max_steps: u32,
}

impl Default for RayMarch {
    fn default() -> Self {
        Self {
            step: 0.05,
            max_steps: 200,
        }
    }
}

/// March from `origin` along `dir` until the sample lands in a solid cell or
/// the step budget runs out. Each step advances before it tests, so the
/// returned point is inside the wall that stopped it.
pub fn march_ray(grid: &Grid, origin: Vec2, dir: Vec2, march: &RayMarch) -> Vec2 {
    let delta = dir * march.step;
    let mut pos = origin;
    for _ in 0..march.max_steps {
        pos = pos + delta;
        let (x, y) = pos.cell();
        if grid.is_solid(x, y) {
            break;
        }
    }
    pos
}

/// `count` directions spread evenly across the player's field of view,
/// left edge first. A single ray points straight ahead.
pub fn fan_directions(player: &Player, count: u32) -> impl Iterator<Item = Vec2> + '_ {
    let fov = player.fov();
    (0..count).map(move |i| {
        let angle = if count <= 1 {
            0.0
        } else {
            -fov / 2.0 + fov * i as f64 / (count - 1) as f64
        };
        player.dir.rotate(angle)
    })
}
