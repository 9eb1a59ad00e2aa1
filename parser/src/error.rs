use thiserror::Error;

use crate::types::Surface;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file")]
    Io(#[from] std::io::Error),
    #[error("line {line}: duplicate `{identifier}` directive")]
    DuplicateDirective { line: usize, identifier: String },
    #[error("missing `{0}` directive")]
    MissingDirective(String),
    #[error("line {line}: {surface} color component {value} is outside 0-255")]
    ColorOutOfRange {
        line: usize,
        surface: Surface,
        value: u32,
    },
    #[error("line {line}: unrecognized line {content:?}")]
    Malformed { line: usize, content: String },
    #[error("line {line}: content after the map")]
    ContentAfterMap { line: usize },
    #[error("scene has no map")]
    MissingMap,
    #[error("expected exactly one player start, found {0}")]
    SpawnCount(usize),
    #[error("map is not closed: open tile at column {x}, row {y}")]
    OpenMap { x: usize, y: usize },
}

pub type Result<T> = std::result::Result<T, SceneError>;
