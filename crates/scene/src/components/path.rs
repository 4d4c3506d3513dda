use std::fmt::Write as _;

use foundation::math::Vec2;

/// Screen-space polyline made of one or more disjoint runs.
///
/// Clipping splits a line into several runs where it leaves and re-enters the
/// viewport; every run holds at least two points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenPath {
    pub runs: Vec<Vec<Vec2>>,
}

impl ScreenPath {
    pub fn new(runs: Vec<Vec<Vec2>>) -> Self {
        Self { runs }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.runs.iter().map(Vec::len).sum()
    }

    /// SVG path data (`M x,y L x,y ...` per run); empty for an empty path.
    pub fn to_svg_d(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            for (i, p) in run.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(out, "{cmd}{},{}", p.x, p.y);
            }
        }
        out
    }
}
