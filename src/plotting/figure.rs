//! The figure handed to a rendering surface: curves plus axes decoration.
//!
//! Setters follow the usual plotting vocabulary (`plot`, `set_xlim`, `set_title`, ...) so the
//! orchestrator reads as a sequence of plotting calls.
use ndarray::Array1;

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub x: Array1<f64>,
    pub y: Array1<f64>,
}

/// Corner the legend box is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperRight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub curves: Vec<Curve>,
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    pub grid: bool,
    pub legend: Option<LegendPosition>,
}

impl Default for Figure {
    fn default() -> Self {
        Figure {
            curves: Vec::new(),
            x_limits: (0.0, 1.0),
            y_limits: (0.0, 1.0),
            x_label: String::new(),
            y_label: String::new(),
            title: String::new(),
            grid: false,
            legend: None,
        }
    }
}

impl Figure {
    pub fn plot(&mut self, x: Array1<f64>, y: Array1<f64>, label: &str) {
        self.curves.push(Curve {
            label: label.to_string(),
            x,
            y,
        });
    }

    pub fn set_xlim(&mut self, min: f64, max: f64) {
        self.x_limits = (min, max);
    }

    pub fn set_ylim(&mut self, min: f64, max: f64) {
        self.y_limits = (min, max);
    }

    pub fn set_xlabel(&mut self, label: &str) {
        self.x_label = label.to_string();
    }

    pub fn set_ylabel(&mut self, label: &str) {
        self.y_label = label.to_string();
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_grid(&mut self, grid: bool) {
        self.grid = grid;
    }

    pub fn set_legend(&mut self, position: LegendPosition) {
        self.legend = Some(position);
    }
}

type Point = (f64, f64);

// part of the segment p0-p1 inside the horizontal band lo..=hi, endpoints kept exact when not cut
fn clip_to_band(p0: Point, p1: Point, lo: f64, hi: f64) -> Option<(Point, Point)> {
    if !(p0.1.is_finite() && p1.1.is_finite()) {
        return None;
    }
    let dy = p1.1 - p0.1;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    if dy == 0.0 {
        if p0.1 < lo || p0.1 > hi {
            return None;
        }
    } else {
        let ta = (lo - p0.1) / dy;
        let tb = (hi - p0.1) / dy;
        let (enter, exit) = if ta < tb { (ta, tb) } else { (tb, ta) };
        t0 = t0.max(enter);
        t1 = t1.min(exit);
        if t0 > t1 {
            return None;
        }
    }
    let at = |t: f64| {
        if t == 0.0 {
            p0
        } else if t == 1.0 {
            p1
        } else {
            (p0.0 + t * (p1.0 - p0.0), p0.1 + t * dy)
        }
    };
    Some((at(t0), at(t1)))
}

impl Curve {
    /// Polylines of the curve that lie inside the y-window.
    ///
    /// A line is cut where it leaves the window (at the crossing point) and where a sample
    /// is not finite.
    pub fn visible_segments(&self, y_min: f64, y_max: f64) -> Vec<Vec<Point>> {
        let points: Vec<Point> = self.x.iter().copied().zip(self.y.iter().copied()).collect();
        let mut segments = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        for pair in points.windows(2) {
            let (p0, p1) = (pair[0], pair[1]);
            match clip_to_band(p0, p1, y_min, y_max) {
                Some((a, b)) => {
                    if current.last() != Some(&a) {
                        if !current.is_empty() {
                            segments.push(std::mem::take(&mut current));
                        }
                        current.push(a);
                    }
                    current.push(b);
                    if b != p1 {
                        segments.push(std::mem::take(&mut current));
                    }
                }
                None => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}
