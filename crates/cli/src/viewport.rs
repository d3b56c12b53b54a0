use hexmap::Point2;

/// Fits a fixed-resolution virtual canvas into a window of arbitrary size.
/// The canvas is scaled uniformly to the largest size that fits, and centered
/// with bars filling the leftover space on one axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Letterbox {
    canvas: Point2,
    window: Point2,
}

impl Letterbox {
    pub fn new(canvas: Point2, window: Point2) -> Self {
        Self { canvas, window }
    }

    /// Multiplier from canvas pixels to window pixels
    pub fn scale(&self) -> f64 {
        (self.window.x / self.canvas.x).min(self.window.y / self.canvas.y)
    }

    /// Window position of the canvas's top-left corner
    pub fn offset(&self) -> Point2 {
        let scale = self.scale();
        Point2::new(
            (self.window.x - self.canvas.x * scale) * 0.5,
            (self.window.y - self.canvas.y * scale) * 0.5,
        )
    }

    /// Map a window position (e.g. the pointer) onto the canvas. Positions in
    /// the bars are clamped to the nearest canvas edge.
    pub fn window_to_canvas(&self, point: Point2) -> Point2 {
        let scale = self.scale();
        let offset = self.offset();
        Point2::new(
            ((point.x - offset.x) / scale).clamp(0.0, self.canvas.x),
            ((point.y - offset.y) / scale).clamp(0.0, self.canvas.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_pillarbox() {
        // Wider window than canvas, so there are bars on the left and right
        let letterbox =
            Letterbox::new(Point2::new(640.0, 480.0), Point2::new(1280.0, 720.0));
        assert_approx_eq!(letterbox.scale(), 1.5);
        assert_eq!(letterbox.offset(), Point2::new(160.0, 0.0));

        let mapped = letterbox.window_to_canvas(Point2::new(640.0, 360.0));
        assert_eq!(mapped, Point2::new(320.0, 240.0));

        // Inside the left bar
        let mapped = letterbox.window_to_canvas(Point2::new(10.0, 30.0));
        assert_eq!(mapped, Point2::new(0.0, 20.0));
    }

    #[test]
    fn test_letterbox() {
        let letterbox =
            Letterbox::new(Point2::new(640.0, 480.0), Point2::new(320.0, 480.0));
        assert_approx_eq!(letterbox.scale(), 0.5);
        assert_eq!(letterbox.offset(), Point2::new(0.0, 120.0));

        let mapped = letterbox.window_to_canvas(Point2::new(320.0, 479.0));
        assert_eq!(mapped, Point2::new(640.0, 480.0));
    }
}
