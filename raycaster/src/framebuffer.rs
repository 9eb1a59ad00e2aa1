use std::path::Path;

use cubfile::Rgb;
use image::RgbImage;

use crate::error::{Error, Result};

pub(crate) fn to_pixel(color: Rgb) -> image::Rgb<u8> {
    image::Rgb(color.to_array())
}

/// Owned RGB frame, repainted in full every frame.
///
/// All writes go through [`FrameBuffer::set`], which silently drops
/// coordinates outside the frame.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    image: RgbImage,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
    }

    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if self.contains(x, y) {
            self.image.put_pixel(x as u32, y as u32, to_pixel(color));
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        if !self.contains(x, y) {
            return None;
        }
        let p = self.image.get_pixel(x as u32, y as u32);
        Some(Rgb::new(p[0], p[1], p[2]))
    }

    pub fn fill(&mut self, color: Rgb) {
        let pixel = to_pixel(color);
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Raw image access for bulk drawing helpers. Callers must clip to the frame.
    pub(crate) fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.image.save(path).map_err(|source| Error::FrameWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_discarded() {
        let mut fb = FrameBuffer::new(4, 3);
        let red = Rgb::new(255, 0, 0);
        fb.set(-1, 0, red);
        fb.set(0, -1, red);
        fb.set(4, 0, red);
        fb.set(0, 3, red);
        fb.set(i32::MAX, i32::MIN, red);
        assert!(fb.image().pixels().all(|p| p.0 == [0, 0, 0]));

        fb.set(3, 2, red);
        assert_eq!(fb.get(3, 2), Some(red));
        assert_eq!(fb.get(4, 2), None);
    }

    #[test]
    fn fill_covers_every_pixel() {
        let mut fb = FrameBuffer::new(5, 5);
        fb.fill(Rgb::new(1, 2, 3));
        assert!(fb.image().pixels().all(|p| p.0 == [1, 2, 3]));
    }
}
