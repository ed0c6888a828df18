// Pitch-local geometry: points, rectangles, grid snapping and clamping.
//
// All coordinates are CSS pixels relative to the pitch's top-left corner.
// A token's position is the centre of its bounding box.

/// Side length of one grid cell, in pixels.
pub const GRID_SIZE: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// Axis-aligned rectangle in pitch-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `p` lies inside the rectangle. All four edges are inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right()) / 2.0,
            (self.top + self.bottom()) / 2.0,
        )
    }

    /// Whether `other` lies entirely within this rectangle.
    pub fn encloses(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Round a coordinate to the nearest grid line. Halves round up, so 20.0
/// snaps to 40.0 and -20.0 snaps to 0.0.
pub fn snap_to_grid(value: f64) -> f64 {
    (value / GRID_SIZE + 0.5).floor() * GRID_SIZE
}

pub fn snap_point(p: Point) -> Point {
    Point::new(snap_to_grid(p.x), snap_to_grid(p.y))
}

/// Clamp a token centre so the token's whole box stays inside the pitch.
///
/// When the token is larger than the pitch along an axis, the lower bound
/// wins and the token sits flush with the top/left edge.
pub fn clamp_to_pitch(p: Point, pitch: Size, token: Size) -> Point {
    let half_w = token.width / 2.0;
    let half_h = token.height / 2.0;
    Point::new(
        half_w.max((pitch.width - half_w).min(p.x)),
        half_h.max((pitch.height - half_h).min(p.y)),
    )
}

/// Format a pixel offset the way it is stored: `80.0` becomes `"80px"`,
/// `22.5` becomes `"22.5px"`.
pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

/// Parse a stored pixel offset such as `"80px"`. A bare number is accepted
/// too. Returns `None` for empty or non-numeric input.
pub fn parse_px(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    if number.is_empty() {
        return None;
    }
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_rounds_to_nearest_grid_line() {
        assert_eq!(snap_to_grid(83.0), 80.0);
        assert_eq!(snap_to_grid(121.0), 120.0);
        assert_eq!(snap_to_grid(101.0), 120.0);
        assert_eq!(snap_to_grid(0.0), 0.0);
        assert_eq!(snap_to_grid(19.9), 0.0);
    }

    #[test]
    fn snap_rounds_halves_up() {
        assert_eq!(snap_to_grid(20.0), 40.0);
        assert_eq!(snap_to_grid(300.0), 320.0);
        assert_eq!(snap_to_grid(-20.0), 0.0);
        assert_eq!(snap_to_grid(-21.0), -40.0);
    }

    #[test]
    fn clamp_keeps_token_inside() {
        let pitch = Size::new(640.0, 920.0);
        let token = Size::new(48.0, 48.0);

        let inside = clamp_to_pitch(Point::new(80.0, 120.0), pitch, token);
        assert_eq!(inside, Point::new(80.0, 120.0));

        let top_left = clamp_to_pitch(Point::new(0.0, 0.0), pitch, token);
        assert_eq!(top_left, Point::new(24.0, 24.0));

        let bottom_right = clamp_to_pitch(Point::new(640.0, 920.0), pitch, token);
        assert_eq!(bottom_right, Point::new(616.0, 896.0));
    }

    #[test]
    fn clamp_prefers_lower_bound_when_token_exceeds_pitch() {
        let pitch = Size::new(30.0, 30.0);
        let token = Size::new(48.0, 48.0);
        let p = clamp_to_pitch(Point::new(15.0, 15.0), pitch, token);
        assert_eq!(p, Point::new(24.0, 24.0));
    }

    #[test]
    fn rect_contains_is_edge_inclusive() {
        let r = Rect::new(240.0, 800.0, 160.0, 80.0);
        assert!(r.contains(Point::new(240.0, 800.0)));
        assert!(r.contains(Point::new(400.0, 880.0)));
        assert!(r.contains(Point::new(320.0, 840.0)));
        assert!(!r.contains(Point::new(239.9, 840.0)));
        assert!(!r.contains(Point::new(320.0, 880.1)));
    }

    #[test]
    fn rect_center_and_enclosure() {
        let pitch = Rect::new(0.0, 0.0, 640.0, 920.0);
        let gk = Rect::new(240.0, 800.0, 160.0, 80.0);
        assert_eq!(gk.center(), Point::new(320.0, 840.0));
        assert!(pitch.encloses(&gk));
        assert!(!gk.encloses(&pitch));
        assert!(!pitch.encloses(&Rect::new(600.0, 0.0, 80.0, 10.0)));
    }

    #[test]
    fn px_strings() {
        assert_eq!(format_px(80.0), "80px");
        assert_eq!(format_px(22.5), "22.5px");
        assert_eq!(parse_px("80px"), Some(80.0));
        assert_eq!(parse_px(" 22.5px "), Some(22.5));
        assert_eq!(parse_px("120"), Some(120.0));
        assert_eq!(parse_px(""), None);
        assert_eq!(parse_px("px"), None);
        assert_eq!(parse_px("abcpx"), None);
        assert_eq!(parse_px("NaNpx"), None);
    }
}
