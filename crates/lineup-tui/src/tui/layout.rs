// Screen layout and pitch coordinate mapping.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                               |
// +------------------------------+-------------------+
// | Pitch (fill)                 | Bench (24 cols)   |
// |                              |                   |
// +------------------------------+-------------------+
// | Help Bar (1 row)                                 |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

use lineup_core::formation::geometry::{Point, Size};

/// Width of the bench column, including borders.
pub const BENCH_WIDTH: u16 = 24;

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    /// Pitch block, including its border.
    pub pitch: Rect,
    /// Bench block, including its border.
    pub bench: Rect,
    pub help_bar: Rect,
}

impl AppLayout {
    /// Drawable pitch surface inside the border.
    pub fn pitch_inner(&self) -> Rect {
        self.pitch.inner(Margin {
            vertical: 1,
            horizontal: 1,
        })
    }

    /// Bench list rows inside the border.
    pub fn bench_inner(&self) -> Rect {
        self.bench.inner(Margin {
            vertical: 1,
            horizontal: 1,
        })
    }
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(6),    // pitch + bench
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(BENCH_WIDTH)])
        .split(vertical[1]);

    AppLayout {
        status_bar: vertical[0],
        pitch: horizontal[0],
        bench: horizontal[1],
        help_bar: vertical[2],
    }
}

/// Whether the cell `(col, row)` lies inside `area`.
pub fn contains_cell(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}

// ---------------------------------------------------------------------------
// Pitch mapping
// ---------------------------------------------------------------------------

/// Maps between terminal cells of the pitch surface and pitch pixels.
///
/// The whole pitch is stretched over the surface, so one cell covers
/// `pitch.width / area.width` by `pitch.height / area.height` pixels.
#[derive(Debug, Clone, Copy)]
pub struct PitchView {
    pub area: Rect,
    pub pitch: Size,
}

impl PitchView {
    pub fn new(area: Rect, pitch: Size) -> Self {
        PitchView { area, pitch }
    }

    fn px_per_col(&self) -> f64 {
        self.pitch.width / f64::from(self.area.width.max(1))
    }

    fn px_per_row(&self) -> f64 {
        self.pitch.height / f64::from(self.area.height.max(1))
    }

    /// Pixel at the centre of cell `(col, row)`, or `None` off the surface.
    pub fn to_pixels(&self, col: u16, row: u16) -> Option<Point> {
        if !contains_cell(self.area, col, row) {
            return None;
        }
        let x = (f64::from(col - self.area.x) + 0.5) * self.px_per_col();
        let y = (f64::from(row - self.area.y) + 0.5) * self.px_per_row();
        Some(Point::new(x, y))
    }

    /// Cell containing pixel `p`, clamped to the surface.
    pub fn to_cell(&self, p: Point) -> (u16, u16) {
        let max_col = self.area.width.saturating_sub(1);
        let max_row = self.area.height.saturating_sub(1);
        let col = ((p.x / self.px_per_col()).floor().max(0.0) as u16).min(max_col);
        let row = ((p.y / self.px_per_row()).floor().max(0.0) as u16).min(max_row);
        (self.area.x + col, self.area.y + row)
    }

    /// Cells covered by a pixel rectangle, clamped to the surface.
    pub fn to_cell_rect(&self, left: f64, top: f64, width: f64, height: f64) -> Rect {
        let (x0, y0) = self.to_cell(Point::new(left, top));
        // Exclusive far edge: step back a hair so an edge on a cell
        // boundary does not spill into the next cell.
        let (x1, y1) = self.to_cell(Point::new(
            (left + width - 0.001).max(left),
            (top + height - 0.001).max(top),
        ));
        Rect::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
