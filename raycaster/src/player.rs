use cubfile::Facing;

use crate::grid::Grid;
use crate::input::KeyState;
use crate::vector::Vec2;

/// Default camera plane length: `tan(FOV / 2)` for a ~66 degree field of view.
pub const DEFAULT_PLANE_LENGTH: f64 = 0.66;

/// Player pose: position, facing direction, and camera plane.
///
/// `dir` and `plane` are only ever rotated together, which keeps them
/// perpendicular and their lengths fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub dir: Vec2,
    pub plane: Vec2,
}

/// Movement rates, in tiles per second and radians per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementSpeeds {
    pub move_speed: f64,
    pub rot_speed: f64,
}

impl Default for MovementSpeeds {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            rot_speed: 2.5,
        }
    }
}

impl Player {
    /// Place the player at the center of a spawn tile, facing a cardinal direction.
    pub fn spawn(x: usize, y: usize, facing: Facing, plane_length: f64) -> Self {
        let dir = match facing {
            Facing::North => Vec2::new(0.0, -1.0),
            Facing::South => Vec2::new(0.0, 1.0),
            Facing::West => Vec2::new(-1.0, 0.0),
            Facing::East => Vec2::new(1.0, 0.0),
        };
        Self {
            pos: Vec2::new(x as f64 + 0.5, y as f64 + 0.5),
            dir,
            plane: dir.perp() * plane_length,
        }
    }

    /// Horizontal field of view in radians, derived from the plane length.
    pub fn fov(&self) -> f64 {
        2.0 * (self.plane.length() / self.dir.length()).atan()
    }

    /// Move by `delta` if the destination cell is inside the grid and not a
    /// wall. Only the destination point is tested, so a large step can pass
    /// through a diagonal corner.
    fn try_move(&mut self, grid: &Grid, delta: Vec2) -> bool {
        let target = self.pos + delta;
        let (x, y) = target.cell();
        if grid.is_solid(x, y) {
            return false;
        }
        self.pos = target;
        true
    }

    pub fn move_forward(&mut self, grid: &Grid, distance: f64) -> bool {
        self.try_move(grid, self.dir * distance)
    }

    pub fn move_backward(&mut self, grid: &Grid, distance: f64) -> bool {
        self.try_move(grid, -(self.dir * distance))
    }

    pub fn strafe_left(&mut self, grid: &Grid, distance: f64) -> bool {
        self.try_move(grid, -(self.plane * distance))
    }

    pub fn strafe_right(&mut self, grid: &Grid, distance: f64) -> bool {
        self.try_move(grid, self.plane * distance)
    }

    /// Rotate direction and camera plane together. Positive is clockwise on screen.
    pub fn rotate(&mut self, angle: f64) {
        self.dir = self.dir.rotate(angle);
        self.plane = self.plane.rotate(angle);
    }

    pub fn rotate_left(&mut self, angle: f64) {
        self.rotate(-angle);
    }

    pub fn rotate_right(&mut self, angle: f64) {
        self.rotate(angle);
    }

    /// Apply one frame of held keys, scaled by the elapsed time `dt` in seconds.
    pub fn integrate(&mut self, grid: &Grid, keys: &KeyState, speeds: &MovementSpeeds, dt: f64) {
        let step = speeds.move_speed * dt;
        let turn = speeds.rot_speed * dt;
        if keys.forward {
            self.move_forward(grid, step);
        }
        if keys.backward {
            self.move_backward(grid, step);
        }
        if keys.strafe_left {
            self.strafe_left(grid, step);
        }
        if keys.strafe_right {
            self.strafe_right(grid, step);
        }
        if keys.rotate_left {
            self.rotate_left(turn);
        }
        if keys.rotate_right {
            self.rotate_right(turn);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::approx_eq;

    fn room() -> Grid {
        Grid::from_rows(&["11111", "10001", "10001", "10001", "11111"])
    }

    #[test]
    fn spawn_orientation() {
        let p = Player::spawn(2, 3, Facing::North, 0.66);
        assert_eq!(p.pos, Vec2::new(2.5, 3.5));
        assert_eq!(p.dir, Vec2::new(0.0, -1.0));
        assert_eq!(p.plane, Vec2::new(0.66, 0.0));

        let p = Player::spawn(0, 0, Facing::South, 0.66);
        assert_eq!(p.plane, Vec2::new(-0.66, 0.0));
        let p = Player::spawn(0, 0, Facing::West, 0.66);
        assert_eq!(p.plane, Vec2::new(0.0, -0.66));
        let p = Player::spawn(0, 0, Facing::East, 0.66);
        assert_eq!(p.plane, Vec2::new(0.0, 0.66));
    }

    #[test]
    fn fov_from_plane() {
        let p = Player::spawn(0, 0, Facing::East, 1.0);
        assert!(approx_eq(p.fov(), std::f64::consts::FRAC_PI_2));
    }

    #[test]
    fn open_move_is_speed_times_dt() {
        let grid = room();
        let mut p = Player::spawn(2, 2, Facing::East, 0.66);
        let speeds = MovementSpeeds {
            move_speed: 3.0,
            rot_speed: 2.0,
        };
        let keys = KeyState {
            forward: true,
            ..KeyState::IDLE
        };
        p.integrate(&grid, &keys, &speeds, 0.1);
        assert!(approx_eq(p.pos.x, 2.5 + 0.3));
        assert!(approx_eq(p.pos.y, 2.5));
    }

    #[test]
    fn strafe_moves_along_plane() {
        let grid = room();
        let mut p = Player::spawn(2, 2, Facing::North, 0.66);
        assert!(p.strafe_right(&grid, 0.5));
        assert!(approx_eq(p.pos.x, 2.5 + 0.33));
        assert!(p.strafe_left(&grid, 1.0));
        assert!(approx_eq(p.pos.x, 2.5 + 0.33 - 0.66));
        assert!(approx_eq(p.pos.y, 2.5));
    }

    #[test]
    fn move_into_wall_is_rejected() {
        let grid = room();
        let mut p = Player::spawn(1, 1, Facing::North, 0.66);
        let before = p.pos;
        assert!(!p.move_forward(&grid, 0.6));
        assert_eq!(p.pos, before);
        assert!(!p.move_backward(&grid, 3.2));
        assert_eq!(p.pos, before);
    }

    #[test]
    fn move_out_of_grid_is_rejected() {
        // No wall border: the only obstacle is the grid edge.
        let grid = Grid::from_rows(&["000", "0N0", "000"]);
        let mut p = Player::spawn(1, 1, Facing::West, 0.66);
        assert!(p.move_forward(&grid, 1.0));
        assert!(!p.move_forward(&grid, 1.0));
        assert!(approx_eq(p.pos.x, 0.5));
    }

    #[test]
    fn rotation_round_trip_keeps_camera_invariants() {
        let mut p = Player::spawn(2, 2, Facing::North, 0.66);
        let original = p;
        for _ in 0..37 {
            p.rotate_right(0.11);
            assert!(p.dir.dot(p.plane).abs() < 1e-9);
            assert!((p.dir.length() - 1.0).abs() < 1e-9);
            assert!((p.plane.length() - 0.66).abs() < 1e-9);
        }
        for _ in 0..37 {
            p.rotate_left(0.11);
        }
        assert!(approx_eq(p.dir.x, original.dir.x));
        assert!(approx_eq(p.dir.y, original.dir.y));
        assert!(approx_eq(p.plane.x, original.plane.x));
        assert!(approx_eq(p.plane.y, original.plane.y));
    }

    #[test]
    fn rotate_left_turns_north_towards_west() {
        let mut p = Player::spawn(2, 2, Facing::North, 0.66);
        p.rotate_left(std::f64::consts::FRAC_PI_2);
        assert!(approx_eq(p.dir.x, -1.0));
        assert!(approx_eq(p.dir.y, 0.0));
    }
}
