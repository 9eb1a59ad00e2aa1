use cubfile::{Facing, MapLayout};

/// Semantic category of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Walkable,
    /// Space outside the placed content.
    Empty,
    /// Spawn marker. Only seen while building the grid; stored as `Walkable`.
    PlayerStart(Facing),
}

impl Tile {
    pub fn from_char(c: char) -> Self {
        match c {
            '1' => Tile::Wall,
            '0' => Tile::Walkable,
            c => match Facing::from_char(c) {
                Some(facing) => Tile::PlayerStart(facing),
                None => Tile::Empty,
            },
        }
    }

    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }
}

/// Spawn tile found while building a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub x: usize,
    pub y: usize,
    pub facing: Facing,
}

/// Read-only tile map, indexed `[row][column]`. Rows may differ in length.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Vec<Tile>>,
    width: usize,
    spawn: Option<Spawn>,
}

impl Grid {
    /// Build a grid from map rows. The first spawn character found is recorded
    /// and replaced by a walkable tile.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let mut spawn = None;
        let rows: Vec<Vec<Tile>> = rows
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.as_ref()
                    .chars()
                    .enumerate()
                    .map(|(x, c)| match Tile::from_char(c) {
                        Tile::PlayerStart(facing) => {
                            if spawn.is_none() {
                                spawn = Some(Spawn { x, y, facing });
                            }
                            Tile::Walkable
                        }
                        tile => tile,
                    })
                    .collect()
            })
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width, spawn }
    }

    pub fn from_layout(layout: &MapLayout) -> Self {
        Self::from_rows(layout.rows())
    }

    /// Longest row length.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn spawn(&self) -> Option<Spawn> {
        self.spawn
    }

    /// Tile at `(x, y)`, or `None` if the coordinate is outside the stored
    /// rows (negative, past the last row, or past the end of a short row).
    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows.get(y as usize)?.get(x as usize).copied()
    }

    /// Whether a ray or a move treats this cell as an obstacle. Anything
    /// outside the stored rows is solid.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).is_none_or(Tile::is_wall)
    }
}
