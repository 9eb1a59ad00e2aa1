use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::frame_loop::budget_for_fps;
use crate::minimap::{MinimapLayout, MinimapPalette, RayMarch, ScreenPos};
use crate::player::{DEFAULT_PLANE_LENGTH, MovementSpeeds};
use crate::renderer::RenderOptions;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Renderer configuration, loadable from a TOML file.
///
/// All fields default to their standard values. CLI flags override config file values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    // Frame
    pub width: u32,
    pub height: u32,
    /// Target frame rate for the cap. 0 disables sleeping.
    pub fps: u32,
    // Camera and movement
    pub plane_length: f64,
    pub move_speed: f64,
    pub rot_speed: f64,
    // Minimap
    pub show_minimap: bool,
    pub show_rays: bool,
    pub minimap_scale: u32,
    pub minimap_viewport_tiles: u32,
    pub minimap_offset: [i32; 2],
    pub ray_count: u32,
    pub march_step: f64,
    pub max_march_steps: u32,
    pub player_radius: i32,
    pub minimap_colors: MinimapPalette,
}

impl Default for RendererConfig {
    fn default() -> Self {
        let speeds = MovementSpeeds::default();
        let layout = MinimapLayout::default();
        let march = RayMarch::default();
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            fps: 60,
            plane_length: DEFAULT_PLANE_LENGTH,
            move_speed: speeds.move_speed,
            rot_speed: speeds.rot_speed,
            show_minimap: true,
            show_rays: true,
            minimap_scale: layout.scale,
            minimap_viewport_tiles: layout.viewport_tiles,
            minimap_offset: [layout.offset.x, layout.offset.y],
            ray_count: 2000,
            march_step: march.step,
            max_march_steps: march.max_steps,
            player_radius: 5,
            minimap_colors: MinimapPalette::default(),
        }
    }
}

impl RendererConfig {
    /// Load config from a TOML file.
    #[cfg(feature = "bin")]
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = toml::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn speeds(&self) -> MovementSpeeds {
        MovementSpeeds {
            move_speed: self.move_speed,
            rot_speed: self.rot_speed,
        }
    }

    pub fn frame_budget(&self) -> Duration {
        budget_for_fps(self.fps)
    }

    /// Convert into RenderOptions for the renderer.
    pub fn into_render_options(self) -> RenderOptions {
        RenderOptions {
            show_minimap: self.show_minimap,
            show_rays: self.show_rays,
            minimap: MinimapLayout {
                scale: self.minimap_scale,
                viewport_tiles: self.minimap_viewport_tiles,
                offset: ScreenPos {
                    x: self.minimap_offset[0],
                    y: self.minimap_offset[1],
                },
            },
            palette: self.minimap_colors,
            ray_count: self.ray_count,
            march: RayMarch {
                step: self.march_step,
                max_steps: self.max_march_steps,
            },
            player_radius: self.player_radius,
        }
    }

    /// Generate a commented default TOML config string.
    pub fn generate_default_toml() -> String {
        r#"# cub3d Renderer Configuration
# Pass with --config <path>.

# Frame size in pixels
width = 500
height = 500

# Frame rate cap (0 = uncapped)
fps = 60

# Camera plane length: tan(FOV / 2). 0.66 gives a ~66 degree field of view
plane_length = 0.66

# Movement speed in tiles per second
move_speed = 3.0

# Rotation speed in radians per second
rot_speed = 2.5

# Minimap overlay (true = show, false = hide)
show_minimap = true

# Field-of-view ray fan on the minimap
show_rays = true

# Pixels per minimap tile
minimap_scale = 10

# Tiles shown along each side of the minimap window
minimap_viewport_tiles = 15

# Top-left corner of the minimap, in pixels
minimap_offset = [10, 10]

# Number of rays in the minimap fan
ray_count = 2000

# Distance each fan ray advances per step, in tiles
march_step = 0.05

# Steps before a fan ray gives up
max_march_steps = 200

# Radius of the player marker, in pixels
player_radius = 5

# Minimap colors as [r, g, b]. Empty tiles use the scene floor color.
[minimap_colors]
wall = [255, 255, 255]
walkable = [64, 64, 64]
ray = [255, 220, 0]
player = [255, 0, 0]
"#
        .to_string()
    }

    /// Apply CLI flag overrides. Flags use negative form (--no-X disables).
    #[cfg(feature = "bin")]
    pub fn apply_cli_overrides(&mut self, matches: &clap::ArgMatches) {
        if matches.is_present("NO_MINIMAP") {
            self.show_minimap = false;
        }
        if matches.is_present("NO_RAYS") {
            self.show_rays = false;
        }
    }
}
