use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// An 8-bit-per-channel color, as written in `F` and `C` directives.
///
/// Serialized as a `[r, g, b]` array so config files can write colors inline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into `0xRRGGBB`.
    pub fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpack from `0xRRGGBB`. The top byte is ignored.
    pub fn from_packed(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(v: [u8; 3]) -> Self {
        Rgb::new(v[0], v[1], v[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(v: Rgb) -> Self {
        v.to_array()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// One of the four wall orientations a texture can be assigned to.
///
/// `Display`/`FromStr` use the scene-file identifiers (`NO`, `SO`, `WE`, `EA`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum WallFace {
    #[strum(serialize = "NO")]
    North,
    #[strum(serialize = "SO")]
    South,
    #[strum(serialize = "WE")]
    West,
    #[strum(serialize = "EA")]
    East,
}

/// Initial facing of the player, taken from the spawn tile character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    North,
    South,
    West,
    East,
}

impl Facing {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Facing::North),
            'S' => Some(Facing::South),
            'W' => Some(Facing::West),
            'E' => Some(Facing::East),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Facing::North => 'N',
            Facing::South => 'S',
            Facing::West => 'W',
            Facing::East => 'E',
        }
    }
}

/// Which flat surface a color directive applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Surface {
    #[strum(serialize = "F")]
    Floor,
    #[strum(serialize = "C")]
    Ceiling,
}
