//! Line-level grammar for the header section of a scene file.

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{eof, map_res, value};

use crate::types::{Surface, WallFace};

/// A single parsed header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `NO ./path/to/texture.png`
    Texture(WallFace, &'a str),
    /// `F 220,100,0`. Components are not range-checked yet.
    Color(Surface, [u32; 3]),
}

fn wall_face(i: &str) -> IResult<&str, WallFace> {
    alt((
        value(WallFace::North, tag("NO")),
        value(WallFace::South, tag("SO")),
        value(WallFace::West, tag("WE")),
        value(WallFace::East, tag("EA")),
    ))(i)
}

fn texture(i: &str) -> IResult<&str, Directive<'_>> {
    let (i, face) = wall_face(i)?;
    let (i, _) = space1(i)?;
    let (i, path) = take_till1(|c: char| c.is_whitespace())(i)?;
    let (i, _) = space0(i)?;
    let (i, _) = eof(i)?;
    Ok((i, Directive::Texture(face, path)))
}

fn component(i: &str) -> IResult<&str, u32> {
    let (i, _) = space0(i)?;
    let (i, v) = map_res(digit1, |s: &str| s.parse::<u32>())(i)?;
    let (i, _) = space0(i)?;
    Ok((i, v))
}

fn color(i: &str) -> IResult<&str, Directive<'_>> {
    let (i, surface) = alt((
        value(Surface::Floor, char('F')),
        value(Surface::Ceiling, char('C')),
    ))(i)?;
    let (i, _) = space1(i)?;
    let (i, r) = component(i)?;
    let (i, _) = char(',')(i)?;
    let (i, g) = component(i)?;
    let (i, _) = char(',')(i)?;
    let (i, b) = component(i)?;
    let (i, _) = eof(i)?;
    Ok((i, Directive::Color(surface, [r, g, b])))
}

/// Parse one header directive. Leading whitespace is not allowed.
pub fn directive(i: &str) -> IResult<&str, Directive<'_>> {
    alt((texture, color))(i)
}

/// Returns true if `line` consists only of map characters and has at least one
/// non-space tile.
pub fn is_map_line(line: &str) -> bool {
    line.chars().all(is_map_char) && line.chars().any(|c| c != ' ')
}

pub fn is_map_char(c: char) -> bool {
    matches!(c, '0' | '1' | 'N' | 'S' | 'E' | 'W' | ' ')
}

pub fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == ' ' || c == '\t')
}
