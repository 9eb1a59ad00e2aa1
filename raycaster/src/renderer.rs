use cubfile::Rgb;
use tracing::trace;

use crate::draw_command::{DrawCommand, MAX_PLAYER_RADIUS, RenderTarget};
use crate::grid::Tile;
use crate::minimap::{MinimapLayout, MinimapPalette, RayMarch, fan_directions, march_ray};
use crate::projection::project;
use crate::ray::cast_column;
use crate::scene::Scene;
use crate::texture::sample_column;

/// Configurable rendering options.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub show_minimap: bool,
    /// Draw the field-of-view ray fan on the minimap. Ignored when the minimap is hidden.
    pub show_rays: bool,
    pub minimap: MinimapLayout,
    pub palette: MinimapPalette,
    pub ray_count: u32,
    pub march: RayMarch,
    pub player_radius: i32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_minimap: true,
            show_rays: true,
            minimap: MinimapLayout::default(),
            palette: MinimapPalette::default(),
            ray_count: 2000,
            march: RayMarch::default(),
            player_radius: 5,
        }
    }
}

/// Turns a [`Scene`] into the draw commands for one frame: the 3D view
/// column by column, then the minimap overlay on top.
pub struct FrameRenderer {
    width: u32,
    height: u32,
    pub options: RenderOptions,
}

impl FrameRenderer {
    pub fn new(width: u32, height: u32, options: RenderOptions) -> Self {
        Self {
            width,
            height,
            options,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Produce draw commands for the current frame.
    pub fn draw_frame(&self, scene: &Scene) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(self.width as usize);

        // 1. Walls, ceiling and floor
        self.draw_walls(scene, &mut commands);

        // 2. Minimap overlay
        if self.options.show_minimap {
            self.draw_minimap(scene, &mut commands);
        }

        trace!("frame produced {} draw commands", commands.len());
        commands
    }

    /// Draw one frame into `target`.
    pub fn render<T: RenderTarget + ?Sized>(&self, scene: &Scene, target: &mut T) {
        target.begin_frame();
        for cmd in self.draw_frame(scene) {
            target.draw(&cmd);
        }
        target.end_frame();
    }

    fn draw_walls(&self, scene: &Scene, commands: &mut Vec<DrawCommand>) {
        let player = &scene.player;
        for column in 0..self.width {
            let hit = cast_column(player, &scene.grid, column, self.width);
            let stripe = project(hit.perp_dist, self.height);
            let texels = sample_column(&scene.textures, &hit, player.pos, &stripe, self.height);
            commands.push(DrawCommand::WallColumn {
                x: column as i32,
                ceiling: scene.ceiling,
                floor: scene.floor,
                wall_start: stripe.draw_start,
                wall_end: stripe.draw_end,
                texels,
            });
        }
    }

    fn tile_color(&self, scene: &Scene, x: i32, y: i32) -> Rgb {
        match scene.grid.tile(x, y) {
            Some(Tile::Wall) => self.options.palette.wall,
            Some(Tile::Walkable | Tile::PlayerStart(_)) => self.options.palette.walkable,
            Some(Tile::Empty) | None => scene.floor,
        }
    }

    fn draw_minimap(&self, scene: &Scene, commands: &mut Vec<DrawCommand>) {
        let layout = self.options.minimap.clamped();
        let pos = scene.player.pos;
        let camera = layout.camera_start(pos);

        // Tiles
        for j in 0..layout.viewport_tiles {
            for i in 0..layout.viewport_tiles {
                let x = camera.0.saturating_add(i as i32);
                let y = camera.1.saturating_add(j as i32);
                commands.push(DrawCommand::MinimapTile {
                    origin: layout.tile_origin(i, j),
                    size: layout.scale,
                    color: self.tile_color(scene, x, y),
                });
            }
        }

        let center = layout.player_center(pos);

        // Field-of-view fan
        if self.options.show_rays {
            let clip = layout.viewport();
            for dir in fan_directions(&scene.player, self.options.ray_count) {
                let end = march_ray(&scene.grid, pos, dir, &self.options.march);
                commands.push(DrawCommand::MinimapRay {
                    from: center,
                    to: layout.world_to_screen(camera, end),
                    color: self.options.palette.ray,
                    clip,
                });
            }
        }

        // Player marker
        commands.push(DrawCommand::PlayerMarker {
            center,
            radius: self.options.player_radius.clamp(0, MAX_PLAYER_RADIUS),
            color: self.options.palette.player,
        });
    }
}
