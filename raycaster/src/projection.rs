/// Smallest perpendicular distance used for projection. A ray that starts on
/// a wall face would otherwise divide by zero.
pub const MIN_PERP_DIST: f64 = 1e-4;

/// Vertical extent of one wall column on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallStripe {
    pub line_height: i32,
    /// First wall row, clamped to the screen.
    pub draw_start: i32,
    /// Last wall row, clamped to the screen.
    pub draw_end: i32,
    /// First wall row before clamping. Negative when the wall is taller than the screen.
    pub unclamped_start: i32,
}

/// Project a perpendicular wall distance onto a screen of `height` rows.
///
/// Ceiling covers `[0, draw_start)`, the floor covers `[draw_end, height)`.
pub fn project(perp_dist: f64, height: u32) -> WallStripe {
    let h = height as i32;
    let line_height = (height as f64 / perp_dist.max(MIN_PERP_DIST)) as i32;
    let unclamped_start = -line_height / 2 + h / 2;
    WallStripe {
        line_height,
        draw_start: unclamped_start.max(0),
        draw_end: (line_height / 2 + h / 2).min(h - 1),
        unclamped_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distant_wall_is_centered() {
        let stripe = project(4.0, 500);
        assert_eq!(stripe.line_height, 125);
        assert_eq!(stripe.draw_start, 188);
        assert_eq!(stripe.draw_end, 312);
        assert_eq!(stripe.unclamped_start, 188);
    }

    #[test]
    fn close_wall_is_clamped() {
        let stripe = project(0.25, 500);
        assert_eq!(stripe.line_height, 2000);
        assert_eq!(stripe.draw_start, 0);
        assert_eq!(stripe.draw_end, 499);
        assert_eq!(stripe.unclamped_start, -750);
    }

    #[test]
    fn zero_distance_is_finite() {
        let stripe = project(0.0, 500);
        assert!(stripe.line_height > 4_000_000);
        assert_eq!(stripe.draw_start, 0);
        assert_eq!(stripe.draw_end, 499);
    }

    #[test]
    fn infinite_distance_collapses() {
        let stripe = project(f64::INFINITY, 500);
        assert_eq!(stripe.line_height, 0);
        assert_eq!(stripe.draw_start, 250);
        assert_eq!(stripe.draw_end, 250);
    }
}
