use crate::types::*;
use euclid::point2;

fn ratio(value: f64, extent: f64) -> f64 {
    if extent == 0.0 {
        0.0
    } else {
        value / extent
    }
}

/// Canvas pixels to size-independent ratios. A zero-sized axis maps to 0.
pub fn normalize(point: CanvasPoint, size: CanvasSize) -> NormalizedPoint {
    point2(ratio(point.x, size.width), ratio(point.y, size.height))
}

/// Ratios back to pixels of the *local* canvas, whatever size the sender had.
pub fn denormalize(point: NormalizedPoint, size: CanvasSize) -> CanvasPoint {
    point2(point.x * size.width, point.y * size.height)
}

/// Maps a pointer position to canvas pixels when the canvas element is
/// displayed at `displayed` but backed by a surface of `canvas` pixels.
pub fn viewport_to_canvas(
    client: ViewportPoint,
    displayed: ViewportRect,
    canvas: CanvasSize,
) -> CanvasPoint {
    let scale_x = if displayed.size.width == 0.0 {
        1.0
    } else {
        canvas.width / displayed.size.width
    };
    let scale_y = if displayed.size.height == 0.0 {
        1.0
    } else {
        canvas.height / displayed.size.height
    };
    point2(
        (client.x - displayed.origin.x) * scale_x,
        (client.y - displayed.origin.y) * scale_y,
    )
}

/// Cursor overlay position: offset from the canvas element's corner, unscaled.
pub fn viewport_offset(client: ViewportPoint, displayed: ViewportRect) -> ViewportPoint {
    point2(client.x - displayed.origin.x, client.y - displayed.origin.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{rect, size2};

    #[test]
    fn it_keeps_proportional_position_across_canvas_sizes() {
        let sender = size2(800.0, 600.0);
        let receiver = size2(400.0, 300.0);

        let n = normalize(point2(400.0, 300.0), sender);
        assert_eq!(n, point2(0.5, 0.5));
        assert_eq!(denormalize(n, receiver), point2(200.0, 150.0));
    }

    #[test]
    fn it_maps_zero_extent_to_origin() {
        let n = normalize(point2(10.0, 10.0), size2(0.0, 100.0));
        assert_eq!(n, point2(0.0, 0.1));
    }

    #[test]
    fn it_scales_pointer_into_backing_surface() {
        // canvas element shown at half its backing resolution
        let displayed = rect(100.0, 50.0, 400.0, 300.0);
        let p = viewport_to_canvas(point2(300.0, 200.0), displayed, size2(800.0, 600.0));
        assert_eq!(p, point2(400.0, 300.0));

        let offset = viewport_offset(point2(300.0, 200.0), displayed);
        assert_eq!(offset, point2(200.0, 150.0));
    }
}
