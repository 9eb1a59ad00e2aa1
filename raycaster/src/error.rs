use std::fmt;
use std::path::PathBuf;

/// Typed error for asset loading, input scripts, and frame output.
#[derive(Debug)]
pub enum Error {
    /// A texture file could not be opened or decoded.
    TextureLoad {
        path: PathBuf,
        source: image::ImageError,
    },
    /// A texture decoded to an image with no pixels.
    EmptyTexture(PathBuf),
    /// An input script segment could not be parsed.
    InputScript(String),
    /// Writing a frame to disk failed.
    FrameWrite {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextureLoad { path, .. } => {
                write!(f, "failed to load texture {}", path.display())
            }
            Self::EmptyTexture(path) => write!(f, "texture {} has no pixels", path.display()),
            Self::InputScript(msg) => write!(f, "invalid input script: {msg}"),
            Self::FrameWrite { path, .. } => {
                write!(f, "failed to write frame to {}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TextureLoad { source, .. } | Self::FrameWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
