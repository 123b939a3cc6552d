use tiny_skia::{Path, PathBuilder, Rect};

/// Cubic bezier control-point offset approximating a quarter circle.
const ARC_KAPPA: f32 = 0.552_284_8;

/// Builds a closed clockwise rectangle path with circular-arc corners.
///
/// A radius <= 0 yields a plain rectangle, so callers can pass the result of
/// `max(0.0, radius - inset)` without branching. Radii larger than half an
/// extent are reduced to fit, the way a 2D canvas arc join would.
pub fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    if !(w > 0.0 && h > 0.0) {
        return None;
    }
    if radius <= 0.0 {
        return Rect::from_xywh(x, y, w, h).map(PathBuilder::from_rect);
    }

    let r = radius.min(w / 2.0).min(h / 2.0);
    let k = ARC_KAPPA * r;
    let (x1, y1) = (x + w, y + h);
    let mut pb = PathBuilder::new();

    pb.move_to(x + r, y);
    pb.line_to(x1 - r, y);
    pb.cubic_to(x1 - r + k, y, x1, y + r - k, x1, y + r);
    pb.line_to(x1, y1 - r);
    pb.cubic_to(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1);
    pb.line_to(x + r, y1);
    pb.cubic_to(x + r - k, y1, x, y1 - r + k, x, y1 - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();

    pb.finish()
}
