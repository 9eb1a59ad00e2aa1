use cubfile::{Rgb, SceneDescription};

use crate::grid::Grid;
use crate::player::Player;
use crate::texture::TextureSet;

/// Everything a frame needs: the map, the player pose, wall textures, and
/// the flat floor and ceiling colors.
///
/// Built once at startup. Only `player` changes afterwards.
#[derive(Debug, Clone)]
pub struct Scene {
    pub grid: Grid,
    pub player: Player,
    pub textures: TextureSet,
    pub floor: Rgb,
    pub ceiling: Rgb,
}

impl Scene {
    /// Build from a validated scene description and its decoded textures.
    pub fn new(desc: &SceneDescription, textures: TextureSet, plane_length: f64) -> Self {
        let (x, y) = desc.map.spawn();
        Self {
            grid: Grid::from_layout(&desc.map),
            player: Player::spawn(x, y, desc.map.facing(), plane_length),
            textures,
            floor: desc.floor,
            ceiling: desc.ceiling,
        }
    }

    /// Build from raw map rows. Returns `None` when the rows hold no spawn tile.
    pub fn from_rows<S: AsRef<str>>(
        rows: &[S],
        textures: TextureSet,
        floor: Rgb,
        ceiling: Rgb,
        plane_length: f64,
    ) -> Option<Self> {
        let grid = Grid::from_rows(rows);
        let spawn = grid.spawn()?;
        Some(Self {
            player: Player::spawn(spawn.x, spawn.y, spawn.facing, plane_length),
            grid,
            textures,
            floor,
            ceiling,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec2;
    use cubfile::Facing;

    const MAP: &str = "\
NO ./north.png
SO ./south.png
WE ./west.png
EA ./east.png
F 90,60,30
C 20,120,220

111111
1000W1
111111
";

    #[test]
    fn from_description_places_player() {
        let desc = SceneDescription::parse(MAP).unwrap();
        let scene = Scene::new(&desc, TextureSet::checkerboard(16), 0.66);
        assert_eq!(scene.player.pos, Vec2::new(4.5, 1.5));
        assert_eq!(scene.player.dir, Vec2::new(-1.0, 0.0));
        assert_eq!(scene.floor, Rgb::new(90, 60, 30));
        assert_eq!(scene.ceiling, Rgb::new(20, 120, 220));
        assert_eq!(scene.grid.width(), 6);
    }

    #[test]
    fn from_rows_requires_spawn() {
        let textures = TextureSet::checkerboard(8);
        let rows = ["111", "101"];
        assert!(Scene::from_rows(&rows, textures.clone(), Rgb::BLACK, Rgb::BLACK, 0.66).is_none());

        let rows = ["111", "1S1", "111"];
        let scene = Scene::from_rows(&rows, textures, Rgb::BLACK, Rgb::BLACK, 0.66).unwrap();
        assert_eq!(scene.grid.spawn().map(|s| s.facing), Some(Facing::South));
    }
}
