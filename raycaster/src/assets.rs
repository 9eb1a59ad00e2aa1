use std::path::{Path, PathBuf};

use cubfile::{SceneDescription, WallFace};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::texture::{Texture, TextureSet};

/// Resolve a texture path from a scene file. Relative paths are taken
/// relative to the directory holding the scene file.
pub fn resolve_texture_path(raw: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Decode one texture file into RGB pixels.
pub fn load_texture(path: &Path) -> Result<Texture> {
    let image = image::open(path)
        .map_err(|source| Error::TextureLoad {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();
    let texture =
        Texture::from_image(&image).ok_or_else(|| Error::EmptyTexture(path.to_path_buf()))?;
    if !texture.height().is_power_of_two() {
        warn!(
            "texture {} is {} pixels tall; rows will wrap with modulo instead of a mask",
            path.display(),
            texture.height()
        );
    }
    Ok(texture)
}

/// Load the four wall textures named by a scene. Any failure aborts the load.
pub fn load_textures(desc: &SceneDescription, base_dir: &Path) -> Result<TextureSet> {
    let load = |face: WallFace| -> Result<Texture> {
        let path = resolve_texture_path(desc.textures.path(face), base_dir);
        let texture = load_texture(&path)?;
        info!(
            "Loaded {} texture {}: {}x{}",
            face,
            path.display(),
            texture.width(),
            texture.height()
        );
        Ok(texture)
    };

    Ok(TextureSet {
        north: load(WallFace::North)?,
        south: load(WallFace::South)?,
        west: load(WallFace::West)?,
        east: load(WallFace::East)?,
    })
}
