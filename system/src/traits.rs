use crate::message::CompositeOp;
use crate::types::{CanvasPoint, CanvasSize};

/// Pixel surface a client paints on.
pub trait Canvas {
    fn size(&self) -> CanvasSize;

    fn stroke_segment(
        &mut self,
        from: CanvasPoint,
        to: CanvasPoint,
        color: Option<&str>,
        width: Option<f64>,
        op: CompositeOp,
    );

    fn stamp_glyph(
        &mut self,
        at: CanvasPoint,
        glyph: Option<&str>,
        color: Option<&str>,
        size: Option<f64>,
    );

    fn clear(&mut self);
}

/// Full-raster capture and restore, used by the undo/redo history.
pub trait SnapshotSource {
    type Snapshot: Clone;

    fn capture_full_canvas(&self) -> Self::Snapshot;

    fn restore_full_canvas(&mut self, snapshot: &Self::Snapshot);
}
