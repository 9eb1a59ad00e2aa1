use serde::Serialize;

use crate::error::{Result, SceneError};
use crate::types::Facing;

/// The map section of a scene file, after validation.
///
/// Rows are kept as written (ragged, spawn character included). Positions past
/// the end of a row are treated as empty space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapLayout {
    rows: Vec<String>,
    width: usize,
    spawn: (usize, usize),
    facing: Facing,
}

impl MapLayout {
    /// Validate raw map rows: exactly one player start, and every walkable
    /// tile enclosed by walls on all four sides.
    pub fn new(rows: Vec<String>) -> Result<Self> {
        if rows.is_empty() {
            return Err(SceneError::MissingMap);
        }

        let mut spawns = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if let Some(facing) = Facing::from_char(c) {
                    spawns.push((x, y, facing));
                }
            }
        }
        let (sx, sy, facing) = match spawns.as_slice() {
            [only] => *only,
            _ => return Err(SceneError::SpawnCount(spawns.len())),
        };

        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let layout = Self {
            rows,
            width,
            spawn: (sx, sy),
            facing,
        };
        layout.check_closed()?;
        Ok(layout)
    }

    fn char_at(&self, x: isize, y: isize) -> char {
        if x < 0 || y < 0 {
            return ' ';
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.as_bytes().get(x as usize))
            .map(|&b| b as char)
            .unwrap_or(' ')
    }

    fn check_closed(&self) -> Result<()> {
        for (y, row) in self.rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '1' || c == ' ' {
                    continue;
                }
                let (xi, yi) = (x as isize, y as isize);
                let neighbors = [(xi - 1, yi), (xi + 1, yi), (xi, yi - 1), (xi, yi + 1)];
                if neighbors
                    .iter()
                    .any(|&(nx, ny)| self.char_at(nx, ny) == ' ')
                {
                    return Err(SceneError::OpenMap { x, y });
                }
            }
        }
        Ok(())
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Longest row length.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Spawn tile as `(column, row)`.
    pub fn spawn(&self) -> (usize, usize) {
        self.spawn
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ragged_closed_map() {
        let layout = MapLayout::new(rows(&[
            "  1111",
            "111001",
            "10W001",
            "111111",
        ]))
        .unwrap();
        assert_eq!(layout.width(), 6);
        assert_eq!(layout.height(), 4);
        assert_eq!(layout.spawn(), (2, 2));
        assert_eq!(layout.facing(), Facing::West);
    }

    #[test]
    fn open_edge_is_rejected() {
        let err = MapLayout::new(rows(&["1111", "10N0", "1111"])).unwrap_err();
        assert!(matches!(err, SceneError::OpenMap { x: 3, y: 1 }));
    }

    #[test]
    fn hole_next_to_floor_is_rejected() {
        let err = MapLayout::new(rows(&["11111", "10 N1", "11111"])).unwrap_err();
        assert!(matches!(err, SceneError::OpenMap { x: 1, y: 1 }));
    }

    #[test]
    fn short_row_below_floor_is_rejected() {
        // The floor at (3,1) has nothing below it because row 2 ends early.
        let err = MapLayout::new(rows(&["11111", "1N001", "111"])).unwrap_err();
        assert!(matches!(err, SceneError::OpenMap { x: 3, y: 1 }));
    }

    #[test]
    fn spawn_count_must_be_one() {
        let err = MapLayout::new(rows(&["111", "101", "111"])).unwrap_err();
        assert!(matches!(err, SceneError::SpawnCount(0)));

        let err = MapLayout::new(rows(&["1111", "1NS1", "1111"])).unwrap_err();
        assert!(matches!(err, SceneError::SpawnCount(2)));
    }
}
