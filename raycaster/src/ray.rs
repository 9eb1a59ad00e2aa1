use crate::grid::{Grid, Tile};
use crate::player::Player;
use crate::vector::Vec2;

/// Which kind of grid line the ray crossed last before hitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    /// Stepped in x: the wall face runs north-south.
    Vertical,
    /// Stepped in y: the wall face runs east-west.
    Horizontal,
}

/// Result of walking one ray through the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub dir: Vec2,
    /// Cell the ray stopped in.
    pub cell: (i32, i32),
    /// Step sign per axis (-1 or +1).
    pub step: (i32, i32),
    pub side: WallSide,
    /// Distance to the wall projected onto the camera direction.
    pub perp_dist: f64,
    /// The ray left the stored rows or ran out of steps instead of hitting a wall.
    pub out_of_bounds: bool,
    pub steps: usize,
}

/// Camera-space offset of a screen column, in `[-1, 1)`.
pub fn camera_x(column: u32, width: u32) -> f64 {
    2.0 * column as f64 / width as f64 - 1.0
}

pub fn ray_direction(player: &Player, camera_x: f64) -> Vec2 {
    player.dir + player.plane * camera_x
}

/// Per-axis `|1 / d|`, infinite for a zero component so that axis never wins.
fn delta_dist(d: f64) -> f64 {
    if d == 0.0 { f64::INFINITY } else { (1.0 / d).abs() }
}

/// Walk `dir` from `origin` one grid line at a time until a wall or the edge
/// of the stored rows. Ties between the axes advance y.
///
/// The walk is bounded by `width + height + 2` steps, which is more than any
/// ray starting inside the grid needs to leave it.
pub fn trace(grid: &Grid, origin: Vec2, dir: Vec2) -> RayHit {
    let (mut map_x, mut map_y) = origin.cell();
    let delta_x = delta_dist(dir.x);
    let delta_y = delta_dist(dir.y);

    let (step_x, mut side_x) = if dir.x < 0.0 {
        (-1, (origin.x - map_x as f64) * delta_x)
    } else if dir.x > 0.0 {
        (1, (map_x as f64 + 1.0 - origin.x) * delta_x)
    } else {
        (1, f64::INFINITY)
    };
    let (step_y, mut side_y) = if dir.y < 0.0 {
        (-1, (origin.y - map_y as f64) * delta_y)
    } else if dir.y > 0.0 {
        (1, (map_y as f64 + 1.0 - origin.y) * delta_y)
    } else {
        (1, f64::INFINITY)
    };

    let max_steps = grid.width() + grid.height() + 2;
    let mut side = WallSide::Vertical;
    let mut steps = 0;
    let out_of_bounds = loop {
        if steps >= max_steps {
            break true;
        }
        if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            side = WallSide::Vertical;
        } else {
            side_y += delta_y;
            map_y += step_y;
            side = WallSide::Horizontal;
        }
        steps += 1;

        match grid.tile(map_x, map_y) {
            None => break true,
            Some(Tile::Wall) => break false,
            Some(_) => {}
        }
    };

    let perp_dist = match side {
        WallSide::Vertical => (map_x as f64 - origin.x + (1 - step_x) as f64 / 2.0) / dir.x,
        WallSide::Horizontal => (map_y as f64 - origin.y + (1 - step_y) as f64 / 2.0) / dir.y,
    };

    RayHit {
        dir,
        cell: (map_x, map_y),
        step: (step_x, step_y),
        side,
        perp_dist,
        out_of_bounds,
        steps,
    }
}

/// Cast the ray for screen column `column` of a `width`-wide frame.
pub fn cast_column(player: &Player, grid: &Grid, column: u32, width: u32) -> RayHit {
    let dir = ray_direction(player, camera_x(column, width));
    trace(grid, player.pos, dir)
}
