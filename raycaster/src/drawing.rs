use cubfile::Rgb;
use imageproc::drawing::{BresenhamLineIter, draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use crate::draw_command::{DrawCommand, MAX_PLAYER_RADIUS, RenderTarget};
use crate::framebuffer::{FrameBuffer, to_pixel};
use crate::minimap::{ScreenPos, ScreenRect};

const COLOR_CLEAR: Rgb = Rgb::BLACK;

/// Paint one screen column: ceiling, textured wall, floor.
fn draw_wall_column(
    frame: &mut FrameBuffer,
    x: i32,
    ceiling: Rgb,
    floor: Rgb,
    wall_start: i32,
    wall_end: i32,
    texels: &[Rgb],
) {
    let height = frame.height() as i32;
    for y in 0..wall_start.min(height) {
        frame.set(x, y, ceiling);
    }
    for (y, &texel) in (wall_start..wall_end).zip(texels) {
        frame.set(x, y, texel);
    }
    for y in wall_end.max(0)..height {
        frame.set(x, y, floor);
    }
}

/// Filled square, cropped to the frame before it reaches imageproc.
fn draw_tile(frame: &mut FrameBuffer, origin: ScreenPos, size: u32, color: Rgb) {
    let area = ScreenRect {
        x: origin.x,
        y: origin.y,
        width: size,
        height: size,
    };
    let Some((min_x, min_y, max_x, max_y)) = area.on_screen(frame.width(), frame.height())
    else {
        return;
    };
    draw_filled_rect_mut(
        frame.image_mut(),
        Rect::at(min_x, min_y).of_size((max_x - min_x + 1) as u32, (max_y - min_y + 1) as u32),
        to_pixel(color),
    );
}

/// Cut the segment `from -> to` down to the inclusive box `min..=max`.
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    min: (f64, f64),
    max: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [
        (-dx, from.0 - min.0),
        (dx, max.0 - from.0),
        (-dy, from.1 - min.1),
        (dy, max.1 - from.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

/// Bresenham line limited to `clip` and the frame.
fn draw_clipped_line(
    frame: &mut FrameBuffer,
    from: ScreenPos,
    to: ScreenPos,
    color: Rgb,
    clip: ScreenRect,
) {
    let Some((min_x, min_y, max_x, max_y)) = clip.on_screen(frame.width(), frame.height()) else {
        return;
    };
    let Some((start, end)) = clip_segment(
        (from.x as f64, from.y as f64),
        (to.x as f64, to.y as f64),
        (min_x as f64, min_y as f64),
        (max_x as f64, max_y as f64),
    ) else {
        return;
    };
    let start = (start.0.round() as f32, start.1.round() as f32);
    let end = (end.0.round() as f32, end.1.round() as f32);
    for (x, y) in BresenhamLineIter::new(start, end) {
        if clip.contains(x, y) {
            frame.set(x, y, color);
        }
    }
}

/// Filled circle. Markers entirely off the frame are skipped.
fn draw_marker(frame: &mut FrameBuffer, center: ScreenPos, radius: i32, color: Rgb) {
    if radius < 0 {
        return;
    }
    let radius = radius.min(MAX_PLAYER_RADIUS);
    let (cx, cy, r) = (center.x as i64, center.y as i64, radius as i64);
    if cx + r < 0
        || cy + r < 0
        || cx - r >= frame.width() as i64
        || cy - r >= frame.height() as i64
    {
        return;
    }
    draw_filled_circle_mut(
        frame.image_mut(),
        (center.x, center.y),
        radius,
        to_pixel(color),
    );
}

/// Software renderer that draws into an owned [`FrameBuffer`].
pub struct ImageTarget {
    canvas: FrameBuffer,
}

impl ImageTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: FrameBuffer::new(width, height),
        }
    }

    /// Access the current frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.canvas
    }

    /// Canvas dimensions.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }
}

impl RenderTarget for ImageTarget {
    fn begin_frame(&mut self) {
        self.canvas.fill(COLOR_CLEAR);
    }

    fn draw(&mut self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::WallColumn {
                x,
                ceiling,
                floor,
                wall_start,
                wall_end,
                texels,
            } => {
                draw_wall_column(
                    &mut self.canvas,
                    *x,
                    *ceiling,
                    *floor,
                    *wall_start,
                    *wall_end,
                    texels,
                );
            }
            DrawCommand::MinimapTile {
                origin,
                size,
                color,
            } => {
                draw_tile(&mut self.canvas, *origin, *size, *color);
            }
            DrawCommand::MinimapRay {
                from,
                to,
                color,
                clip,
            } => {
                draw_clipped_line(&mut self.canvas, *from, *to, *color, *clip);
            }
            DrawCommand::PlayerMarker {
                center,
                radius,
                color,
            } => {
                draw_marker(&mut self.canvas, *center, *radius, *color);
            }
        }
    }

    fn end_frame(&mut self) {
        // No-op: the frame is ready to read via frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn count(target: &ImageTarget, color: Rgb) -> usize {
        target
            .frame()
            .image()
            .pixels()
            .filter(|p| p.0 == color.to_array())
            .count()
    }

    #[test]
    fn wall_column_spans() {
        let mut target = ImageTarget::new(4, 10);
        target.begin_frame();
        let wall = Rgb::new(9, 9, 9);
        target.draw(&DrawCommand::WallColumn {
            x: 1,
            ceiling: BLUE,
            floor: RED,
            wall_start: 3,
            wall_end: 7,
            texels: vec![wall; 4],
        });
        target.end_frame();

        let frame = target.frame();
        assert_eq!(frame.get(1, 2), Some(BLUE));
        assert_eq!(frame.get(1, 3), Some(wall));
        assert_eq!(frame.get(1, 6), Some(wall));
        assert_eq!(frame.get(1, 7), Some(RED));
        assert_eq!(frame.get(1, 9), Some(RED));
        assert_eq!(count(&target, BLUE), 3);
        assert_eq!(count(&target, RED), 3);
    }

    #[test]
    fn offscreen_commands_do_not_panic() {
        let mut target = ImageTarget::new(20, 20);
        target.begin_frame();
        target.draw(&DrawCommand::WallColumn {
            x: 25,
            ceiling: BLUE,
            floor: RED,
            wall_start: 0,
            wall_end: 20,
            texels: vec![RED; 20],
        });
        target.draw(&DrawCommand::MinimapTile {
            origin: ScreenPos { x: 15, y: -5 },
            size: 10,
            color: RED,
        });
        target.draw(&DrawCommand::PlayerMarker {
            center: ScreenPos { x: -2, y: 19 },
            radius: 5,
            color: BLUE,
        });
        target.end_frame();
        // Only the on-screen part of the tile lands: 5 x 5 pixels.
        assert_eq!(count(&target, RED), 25);
        assert!(count(&target, BLUE) > 0);
    }

    #[test]
    fn ray_is_clipped_to_viewport() {
        let mut target = ImageTarget::new(50, 50);
        target.begin_frame();
        let clip = ScreenRect {
            x: 10,
            y: 10,
            width: 20,
            height: 20,
        };
        target.draw(&DrawCommand::MinimapRay {
            from: ScreenPos { x: 15, y: 20 },
            to: ScreenPos { x: 45, y: 20 },
            color: RED,
            clip,
        });
        // x in [15, 30) on row 20.
        assert_eq!(count(&target, RED), 15);
        assert_eq!(target.frame().get(29, 20), Some(RED));
        assert_eq!(target.frame().get(30, 20), Some(Rgb::BLACK));
    }

    #[test]
    fn disk_covers_radius() {
        let mut target = ImageTarget::new(40, 40);
        target.begin_frame();
        target.draw(&DrawCommand::PlayerMarker {
            center: ScreenPos { x: 20, y: 20 },
            radius: 5,
            color: RED,
        });
        assert_eq!(count(&target, RED), 97);
        assert_eq!(target.frame().get(25, 20), Some(RED));
        assert_eq!(target.frame().get(20, 15), Some(RED));
        assert_eq!(target.frame().get(24, 24), Some(Rgb::BLACK));
    }

    #[test]
    fn far_ray_endpoint_is_cut_to_viewport() {
        let mut target = ImageTarget::new(50, 50);
        target.begin_frame();
        let clip = ScreenRect {
            x: 0,
            y: 0,
            width: 40,
            height: 40,
        };
        target.draw(&DrawCommand::MinimapRay {
            from: ScreenPos { x: 5, y: 5 },
            to: ScreenPos {
                x: i32::MAX,
                y: i32::MAX,
            },
            color: RED,
            clip,
        });
        assert_eq!(target.frame().get(5, 5), Some(RED));
        assert_eq!(target.frame().get(39, 39), Some(RED));
        assert_eq!(target.frame().get(40, 40), Some(Rgb::BLACK));
        assert_eq!(count(&target, RED), 35);
    }

    #[test]
    fn oversized_tile_and_marker_stay_on_frame() {
        let mut target = ImageTarget::new(16, 16);
        target.begin_frame();
        target.draw(&DrawCommand::MinimapTile {
            origin: ScreenPos { x: -8, y: 4 },
            size: u32::MAX,
            color: RED,
        });
        assert_eq!(count(&target, RED), 16 * 12);

        target.draw(&DrawCommand::PlayerMarker {
            center: ScreenPos {
                x: i32::MAX,
                y: 0,
            },
            radius: 5,
            color: BLUE,
        });
        target.draw(&DrawCommand::PlayerMarker {
            center: ScreenPos { x: 8, y: 8 },
            radius: -3,
            color: BLUE,
        });
        assert_eq!(count(&target, BLUE), 0);

        target.draw(&DrawCommand::PlayerMarker {
            center: ScreenPos { x: 8, y: 8 },
            radius: i32::MAX,
            color: BLUE,
        });
        assert_eq!(count(&target, BLUE), 16 * 16);
    }

    #[test]
    fn segment_clipping() {
        let min = (0.0, 0.0);
        let max = (9.0, 9.0);
        assert_eq!(
            clip_segment((-6.0, 2.0), (10.0, 2.0), min, max),
            Some(((0.0, 2.0), (9.0, 2.0)))
        );
        assert_eq!(clip_segment((-5.0, -1.0), (20.0, -1.0), min, max), None);
        assert_eq!(
            clip_segment((3.0, 3.0), (3.0, 3.0), min, max),
            Some(((3.0, 3.0), (3.0, 3.0)))
        );
    }
}
