use eframe::egui::{Color32, Pos2, Stroke};

/// Abstract 2D target for the render passes.
///
/// The app implements this over an `egui::Painter`; tests implement it over a
/// recording buffer. Coordinates are local pixels, origin at the top-left.
pub trait Surface {
    /// Width and height of the drawable area in pixels.
    fn size(&self) -> (f32, f32);

    /// Strokes an open polyline through `points` in order.
    fn polyline(&mut self, points: &[Pos2], stroke: Stroke);

    fn line_segment(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    /// Strokes a segment as alternating `dash_len`-on / `gap_len`-off dashes.
    fn dashed_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke, dash_len: f32, gap_len: f32);

    fn circle_filled(&mut self, center: Pos2, radius: f32, fill: Color32);

    fn circle_stroked(&mut self, center: Pos2, radius: f32, stroke: Stroke);
}

/// A recorded drawing operation, for asserting on render output in tests.
#[cfg(test)]
#[derive(Clone, Debug)]
pub enum DrawOp {
    Polyline { points: Vec<Pos2>, color: Color32 },
    Line { from: Pos2, to: Pos2, color: Color32 },
    DashedLine { from: Pos2, to: Pos2, color: Color32 },
    CircleFilled { center: Pos2, radius: f32, color: Color32 },
    CircleStroked { center: Pos2, radius: f32, color: Color32 },
}

#[cfg(test)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn polylines(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Polyline { .. }))
            .collect()
    }

    pub fn dashed_lines(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::DashedLine { .. }))
            .collect()
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn polyline(&mut self, points: &[Pos2], stroke: Stroke) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            color: stroke.color,
        });
    }

    fn line_segment(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color: stroke.color,
        });
    }

    fn dashed_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke, _dash: f32, _gap: f32) {
        self.ops.push(DrawOp::DashedLine {
            from,
            to,
            color: stroke.color,
        });
    }

    fn circle_filled(&mut self, center: Pos2, radius: f32, fill: Color32) {
        self.ops.push(DrawOp::CircleFilled {
            center,
            radius,
            color: fill,
        });
    }

    fn circle_stroked(&mut self, center: Pos2, radius: f32, stroke: Stroke) {
        self.ops.push(DrawOp::CircleStroked {
            center,
            radius,
            color: stroke.color,
        });
    }
}
