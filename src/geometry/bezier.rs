use super::{Orientation, Point};
use serde::{Deserialize, Serialize};

/// A cubic bezier segment between two connector anchors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierSegment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl BezierSegment {
    /// Builds the segment connecting `source` to `sink` so the curve departs
    /// and arrives tangent to each endpoint's orientation.
    ///
    /// The control point offset is half the absolute coordinate delta along
    /// the axis matching the endpoint's orientation, so curves flex in
    /// proportion to the distance covered. A zero delta collapses the control
    /// point onto its anchor, degenerating to a straight segment.
    pub fn between(
        source: Point,
        source_orientation: Orientation,
        sink: Point,
        sink_orientation: Orientation,
    ) -> Self {
        let p1 = Self::control_point(source, source_orientation, sink);
        let p2 = Self::control_point(sink, sink_orientation, source);
        Self {
            p0: source,
            p1,
            p2,
            p3: sink,
        }
    }

    fn control_point(anchor: Point, orientation: Orientation, far: Point) -> Point {
        let magnitude = if orientation.is_horizontal() {
            (far.x - anchor.x).abs() / 2.0
        } else {
            (far.y - anchor.y).abs() / 2.0
        };
        let (dx, dy) = orientation.outward();
        anchor.offset(dx * magnitude, dy * magnitude)
    }

    /// Evaluates the curve at fraction `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let t2 = t * t;
        let a = mt2 * mt;
        let b = 3.0 * mt2 * t;
        let c = 3.0 * mt * t2;
        let d = t2 * t;
        Point::new(
            a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
            a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
        )
    }

    /// First derivative of the curve at fraction `t`.
    pub fn derivative_at(&self, t: f64) -> (f64, f64) {
        let mt = 1.0 - t;
        let a = 3.0 * mt * mt;
        let b = 6.0 * mt * t;
        let c = 3.0 * t * t;
        (
            a * (self.p1.x - self.p0.x) + b * (self.p2.x - self.p1.x) + c * (self.p3.x - self.p2.x),
            a * (self.p1.y - self.p0.y) + b * (self.p2.y - self.p1.y) + c * (self.p3.y - self.p2.y),
        )
    }

    /// Tangent angle (radians) as the curve leaves the source anchor.
    pub fn start_angle(&self) -> f64 {
        self.angle_at(0.0)
    }

    /// Tangent angle (radians) as the curve arrives at the sink anchor.
    pub fn end_angle(&self) -> f64 {
        self.angle_at(1.0)
    }

    fn angle_at(&self, t: f64) -> f64 {
        let (dx, dy) = self.derivative_at(t);
        if dx == 0.0 && dy == 0.0 {
            // Fully degenerate curve: fall back to the chord direction.
            (self.p3.y - self.p0.y).atan2(self.p3.x - self.p0.x)
        } else {
            dy.atan2(dx)
        }
    }
}
