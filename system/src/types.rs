use euclid::{Point2D, Rect, Size2D};

/// Identity of a live connection. Assigned by the relay on connect and
/// meaningless once the connection is gone.
pub type ConnectionId = uuid::Uuid;

/// Pixel space of a client's own drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSpace;

/// Canvas space divided by canvas dimensions. Both axes run from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSpace;

/// On-screen pixels, relative to the page or the displayed canvas element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSpace;

pub type CanvasPoint = Point2D<f64, CanvasSpace>;
pub type CanvasSize = Size2D<f64, CanvasSpace>;
pub type NormalizedPoint = Point2D<f64, NormalizedSpace>;
pub type ViewportPoint = Point2D<f64, ViewportSpace>;
pub type ViewportRect = Rect<f64, ViewportSpace>;
