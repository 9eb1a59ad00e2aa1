use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::directive::{Directive, directive, is_blank, is_map_line};
use crate::error::{Result, SceneError};
use crate::map::MapLayout;
use crate::types::{Rgb, Surface, WallFace};

/// Texture file paths for each wall face, exactly as written in the scene file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TexturePaths {
    pub north: String,
    pub south: String,
    pub west: String,
    pub east: String,
}

impl TexturePaths {
    pub fn path(&self, face: WallFace) -> &str {
        match face {
            WallFace::North => &self.north,
            WallFace::South => &self.south,
            WallFace::West => &self.west,
            WallFace::East => &self.east,
        }
    }
}

/// A fully parsed and validated `.cub` scene description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneDescription {
    pub textures: TexturePaths,
    pub floor: Rgb,
    pub ceiling: Rgb,
    pub map: MapLayout,
}

#[derive(Default)]
struct HeaderBuilder {
    north: Option<String>,
    south: Option<String>,
    west: Option<String>,
    east: Option<String>,
    floor: Option<Rgb>,
    ceiling: Option<Rgb>,
}

impl HeaderBuilder {
    fn texture_slot(&mut self, face: WallFace) -> &mut Option<String> {
        match face {
            WallFace::North => &mut self.north,
            WallFace::South => &mut self.south,
            WallFace::West => &mut self.west,
            WallFace::East => &mut self.east,
        }
    }

    fn color_slot(&mut self, surface: Surface) -> &mut Option<Rgb> {
        match surface {
            Surface::Floor => &mut self.floor,
            Surface::Ceiling => &mut self.ceiling,
        }
    }

    fn apply(&mut self, line: usize, d: Directive<'_>) -> Result<()> {
        match d {
            Directive::Texture(face, path) => {
                let slot = self.texture_slot(face);
                if slot.is_some() {
                    return Err(SceneError::DuplicateDirective {
                        line,
                        identifier: face.to_string(),
                    });
                }
                *slot = Some(path.to_string());
            }
            Directive::Color(surface, components) => {
                let mut rgb = [0u8; 3];
                for (out, value) in rgb.iter_mut().zip(components) {
                    *out = u8::try_from(value).map_err(|_| SceneError::ColorOutOfRange {
                        line,
                        surface,
                        value,
                    })?;
                }
                let slot = self.color_slot(surface);
                if slot.is_some() {
                    return Err(SceneError::DuplicateDirective {
                        line,
                        identifier: surface.to_string(),
                    });
                }
                *slot = Some(Rgb::from(rgb));
            }
        }
        Ok(())
    }

    fn finish(mut self, map: MapLayout) -> Result<SceneDescription> {
        for face in WallFace::iter() {
            if self.texture_slot(face).is_none() {
                return Err(SceneError::MissingDirective(face.to_string()));
            }
        }
        let floor = self
            .floor
            .ok_or_else(|| SceneError::MissingDirective(Surface::Floor.to_string()))?;
        let ceiling = self
            .ceiling
            .ok_or_else(|| SceneError::MissingDirective(Surface::Ceiling.to_string()))?;

        Ok(SceneDescription {
            textures: TexturePaths {
                north: self.north.unwrap_or_default(),
                south: self.south.unwrap_or_default(),
                west: self.west.unwrap_or_default(),
                east: self.east.unwrap_or_default(),
            },
            floor,
            ceiling,
            map,
        })
    }
}

#[derive(PartialEq, Eq)]
enum Section {
    Header,
    Map,
    AfterMap,
}

impl SceneDescription {
    /// Read and parse a scene file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        debug!("read {} bytes from {}", contents.len(), path.display());
        Self::parse(&contents)
    }

    /// Parse scene file contents.
    ///
    /// The header holds the six directives in any order, separated by blank
    /// lines as desired. The first line made only of map characters starts the
    /// map; the map ends at the first blank line and nothing but blank lines may
    /// follow it.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut header = HeaderBuilder::default();
        let mut rows = Vec::new();
        let mut section = Section::Header;

        for (idx, raw) in contents.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_end_matches('\r');

            match section {
                Section::Header => {
                    if is_blank(line) {
                        continue;
                    }
                    if let Ok((_, d)) = directive(line) {
                        trace!("line {line_no}: {d:?}");
                        header.apply(line_no, d)?;
                    } else if is_map_line(line) {
                        section = Section::Map;
                        rows.push(line.to_string());
                    } else {
                        return Err(SceneError::Malformed {
                            line: line_no,
                            content: line.to_string(),
                        });
                    }
                }
                Section::Map => {
                    if is_blank(line) {
                        section = Section::AfterMap;
                    } else if is_map_line(line) {
                        rows.push(line.to_string());
                    } else {
                        return Err(SceneError::Malformed {
                            line: line_no,
                            content: line.to_string(),
                        });
                    }
                }
                Section::AfterMap => {
                    if !is_blank(line) {
                        return Err(SceneError::ContentAfterMap { line: line_no });
                    }
                }
            }
        }

        if rows.is_empty() {
            return Err(SceneError::MissingMap);
        }
        let map = MapLayout::new(rows)?;
        let scene = header.finish(map)?;
        debug!(
            "parsed scene: {}x{} map, spawn {:?} facing {:?}",
            scene.map.width(),
            scene.map.height(),
            scene.map.spawn(),
            scene.map.facing()
        );
        Ok(scene)
    }
}

impl FromStr for SceneDescription {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
