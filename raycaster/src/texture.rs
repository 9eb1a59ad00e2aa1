use cubfile::{Rgb, WallFace};
use image::RgbImage;

use crate::projection::WallStripe;
use crate::ray::{RayHit, WallSide};
use crate::vector::Vec2;

/// A decoded wall texture. Always at least 1x1.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Texture {
    /// Wrap a row-major pixel buffer. Returns `None` for an empty texture or a
    /// buffer whose length does not match `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_image(image: &RgbImage) -> Option<Self> {
        let pixels = image.pixels().map(|p| Rgb::new(p[0], p[1], p[2])).collect();
        Self::from_pixels(image.width(), image.height(), pixels)
    }

    /// A `size`x`size` two-color checkerboard with 8x8 pixel cells.
    pub fn checkerboard(size: u32, a: Rgb, b: Rgb) -> Self {
        let size = size.max(1);
        let pixels = (0..size)
            .flat_map(|y| (0..size).map(move |x| if ((x / 8) + (y / 8)) % 2 == 0 { a } else { b }))
            .collect();
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at `(x, y)`, black outside the texture.
    pub fn color_at(&self, x: i32, y: i32) -> Rgb {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Rgb::BLACK;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Map an unbounded texture row into `[0, height)`: a bit mask for
    /// power-of-two heights, Euclidean modulo otherwise.
    pub fn wrap_row(&self, row: i32) -> i32 {
        let h = self.height as i32;
        if self.height.is_power_of_two() {
            row & (h - 1)
        } else {
            row.rem_euclid(h)
        }
    }
}

/// One texture per wall face.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSet {
    pub north: Texture,
    pub south: Texture,
    pub west: Texture,
    pub east: Texture,
}

impl TextureSet {
    pub fn get(&self, face: WallFace) -> &Texture {
        match face {
            WallFace::North => &self.north,
            WallFace::South => &self.south,
            WallFace::West => &self.west,
            WallFace::East => &self.east,
        }
    }

    /// Procedural textures for running without image assets. Each face gets
    /// its own color so orientation stays readable.
    pub fn checkerboard(size: u32) -> Self {
        let light = Rgb::new(200, 200, 200);
        Self {
            north: Texture::checkerboard(size, Rgb::new(180, 40, 40), light),
            south: Texture::checkerboard(size, Rgb::new(40, 150, 60), light),
            west: Texture::checkerboard(size, Rgb::new(50, 70, 180), light),
            east: Texture::checkerboard(size, Rgb::new(200, 170, 40), light),
        }
    }
}

/// The face a ray hit. A ray travelling east hits the east-facing texture slot,
/// matching the original asset layout.
pub fn wall_face(side: WallSide, dir: Vec2) -> WallFace {
    match side {
        WallSide::Vertical if dir.x > 0.0 => WallFace::East,
        WallSide::Vertical => WallFace::West,
        WallSide::Horizontal if dir.y > 0.0 => WallFace::South,
        WallSide::Horizontal => WallFace::North,
    }
}

/// Halve each channel. Applied to walls hit on a horizontal side.
pub fn shade(color: Rgb) -> Rgb {
    Rgb::from_packed((color.packed() >> 1) & 0x7F7F7F)
}

/// Where along the wall face the ray hit, in `[0, 1)`.
pub fn wall_x(hit: &RayHit, origin: Vec2) -> f64 {
    let x = match hit.side {
        WallSide::Vertical => origin.y + hit.perp_dist * hit.dir.y,
        WallSide::Horizontal => origin.x + hit.perp_dist * hit.dir.x,
    };
    x - x.floor()
}

/// Texture column for a wall hit, mirrored on the faces where the texture
/// would otherwise read backwards.
pub fn texture_x(wall_x: f64, width: u32, side: WallSide, dir: Vec2) -> i32 {
    let w = width as i32;
    let mut tex_x = (wall_x * width as f64) as i32;
    let flip = match side {
        WallSide::Vertical => dir.x > 0.0,
        WallSide::Horizontal => dir.y < 0.0,
    };
    if flip {
        tex_x = w - tex_x - 1;
    }
    tex_x.clamp(0, w - 1)
}

/// Steps down one texture column while the wall stripe is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureColumn {
    pub tex_x: i32,
    /// Texture rows advanced per screen row.
    pub step: f64,
    pub pos: f64,
}

impl TextureColumn {
    /// Start at the first visible wall row. Using the clamped `draw_start`
    /// skips the part of a tall wall cut off by the top of the screen.
    pub fn new(texture: &Texture, tex_x: i32, stripe: &WallStripe, screen_height: u32) -> Self {
        let step = texture.height() as f64 / stripe.line_height.max(1) as f64;
        let offset = stripe.draw_start - screen_height as i32 / 2 + stripe.line_height / 2;
        Self {
            tex_x,
            step,
            pos: offset as f64 * step,
        }
    }

    /// Texel for the current row, then advance one screen row.
    pub fn next_texel(&mut self, texture: &Texture) -> Rgb {
        let row = texture.wrap_row(self.pos as i32);
        self.pos += self.step;
        texture.color_at(self.tex_x, row)
    }
}

/// Sample the texels for rows `[draw_start, draw_end)` of one wall column,
/// shading horizontal-side hits.
pub fn sample_column(
    textures: &TextureSet,
    hit: &RayHit,
    origin: Vec2,
    stripe: &WallStripe,
    screen_height: u32,
) -> Vec<Rgb> {
    let texture = textures.get(wall_face(hit.side, hit.dir));
    let tex_x = texture_x(wall_x(hit, origin), texture.width(), hit.side, hit.dir);
    let mut column = TextureColumn::new(texture, tex_x, stripe, screen_height);
    let shaded = hit.side == WallSide::Horizontal;
    (stripe.draw_start..stripe.draw_end)
        .map(|_| {
            let texel = column.next_texel(texture);
            if shaded { shade(texel) } else { texel }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;

    fn gradient(width: u32, height: u32) -> Texture {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| Rgb::new(x as u8, y as u8, 0)))
            .collect();
        Texture::from_pixels(width, height, pixels).unwrap()
    }

    fn hit(side: WallSide, dir: Vec2, perp_dist: f64) -> RayHit {
        RayHit {
            dir,
            cell: (0, 0),
            step: (1, 1),
            side,
            perp_dist,
            out_of_bounds: false,
            steps: 1,
        }
    }

    #[test]
    fn rejects_empty_or_mismatched_pixels() {
        assert!(Texture::from_pixels(0, 4, vec![]).is_none());
        assert!(Texture::from_pixels(2, 2, vec![Rgb::BLACK; 3]).is_none());
        assert!(Texture::from_pixels(1, 1, vec![Rgb::BLACK]).is_some());
    }

    #[test]
    fn color_at_outside_is_black() {
        let tex = gradient(4, 4);
        assert_eq!(tex.color_at(3, 2), Rgb::new(3, 2, 0));
        assert_eq!(tex.color_at(-1, 0), Rgb::BLACK);
        assert_eq!(tex.color_at(0, 4), Rgb::BLACK);
    }

    #[test]
    fn wrap_row_power_of_two_and_modulo() {
        let pow2 = gradient(4, 64);
        assert_eq!(pow2.wrap_row(65), 1);
        assert_eq!(pow2.wrap_row(-1), 63);

        let odd = gradient(4, 48);
        assert_eq!(odd.wrap_row(50), 2);
        assert_eq!(odd.wrap_row(-1), 47);
    }

    #[test]
    fn face_selection() {
        let east = Vec2::new(1.0, 0.2);
        let west = Vec2::new(-1.0, 0.2);
        assert_eq!(wall_face(WallSide::Vertical, east), WallFace::East);
        assert_eq!(wall_face(WallSide::Vertical, west), WallFace::West);
        assert_eq!(wall_face(WallSide::Horizontal, Vec2::new(0.1, 1.0)), WallFace::South);
        assert_eq!(wall_face(WallSide::Horizontal, Vec2::new(0.1, -1.0)), WallFace::North);
    }

    #[test]
    fn shade_halves_channels() {
        assert_eq!(shade(Rgb::new(255, 128, 1)), Rgb::new(127, 64, 0));
        assert_eq!(shade(Rgb::BLACK), Rgb::BLACK);
    }

    #[test]
    fn texture_x_flips_and_clamps() {
        let dir = Vec2::new(1.0, 0.0);
        assert_eq!(texture_x(0.0, 64, WallSide::Vertical, dir), 63);
        assert_eq!(texture_x(0.0, 64, WallSide::Vertical, -dir), 0);
        assert_eq!(texture_x(0.999_999, 64, WallSide::Horizontal, Vec2::new(0.0, 1.0)), 63);
        assert_eq!(texture_x(0.999_999, 64, WallSide::Horizontal, Vec2::new(0.0, -1.0)), 0);
    }

    #[test]
    fn sampler_indices_stay_in_bounds() {
        let tex = gradient(48, 37);
        let dirs = [
            Vec2::new(0.7, -0.3),
            Vec2::new(-0.2, 0.9),
            Vec2::new(-1.0, -0.01),
            Vec2::new(0.01, 1.0),
        ];
        for height in [120u32, 500, 501] {
            for perp in [0.05, 0.3, 0.5, 1.0, 2.7, 9.0, 40.0] {
                let stripe = project(perp, height);
                assert!(stripe.draw_start >= 0 && stripe.draw_end < height as i32);
                for dir in dirs {
                    for side in [WallSide::Vertical, WallSide::Horizontal] {
                        let h = hit(side, dir, perp);
                        let tx = texture_x(wall_x(&h, Vec2::new(3.3, 7.9)), tex.width(), side, dir);
                        assert!((0..48).contains(&tx));

                        let mut column = TextureColumn::new(&tex, tx, &stripe, height);
                        for _ in stripe.draw_start..stripe.draw_end {
                            let row = tex.wrap_row(column.pos as i32);
                            assert!((0..37).contains(&row));
                            column.next_texel(&tex);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn clipped_wall_starts_mid_texture() {
        // A wall twice the screen height shows the middle half of the texture.
        let tex = gradient(4, 64);
        let stripe = project(0.5, 500);
        let column = TextureColumn::new(&tex, 0, &stripe, 500);
        assert!((column.pos - 16.0).abs() < 1e-9);
    }

    #[test]
    fn sample_column_shades_horizontal_hits() {
        let textures = TextureSet {
            north: Texture::from_pixels(1, 1, vec![Rgb::new(200, 100, 50)]).unwrap(),
            south: Texture::from_pixels(1, 1, vec![Rgb::new(1, 1, 1)]).unwrap(),
            west: Texture::from_pixels(1, 1, vec![Rgb::new(2, 2, 2)]).unwrap(),
            east: Texture::from_pixels(1, 1, vec![Rgb::new(10, 20, 30)]).unwrap(),
        };
        let stripe = project(2.0, 100);
        let origin = Vec2::new(1.5, 1.5);

        let north = sample_column(
            &textures,
            &hit(WallSide::Horizontal, Vec2::new(0.0, -1.0), 2.0),
            origin,
            &stripe,
            100,
        );
        assert_eq!(north.len(), (stripe.draw_end - stripe.draw_start) as usize);
        assert!(north.iter().all(|&c| c == Rgb::new(100, 50, 25)));

        let east = sample_column(
            &textures,
            &hit(WallSide::Vertical, Vec2::new(1.0, 0.0), 2.0),
            origin,
            &stripe,
            100,
        );
        assert!(east.iter().all(|&c| c == Rgb::new(10, 20, 30)));
    }
}
