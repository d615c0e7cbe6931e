use crate::geometry::{denormalize, normalize};
use crate::types::*;
use euclid::point2;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Display name used for connections that never announced a usable one.
pub const ANONYMOUS: &str = "Anonymous";

/// Trims a self-reported name, falling back to [`ANONYMOUS`] when nothing is left.
pub fn display_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => ANONYMOUS.to_owned(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeOp {
    /// Paint over existing pixels.
    #[serde(alias = "source-over")]
    Draw,
    /// Punch transparency through existing pixels.
    #[serde(alias = "destination-out")]
    Erase,
}

impl std::default::Default for CompositeOp {
    fn default() -> Self {
        CompositeOp::Draw
    }
}

// Payload fields come straight from browser clients: `NaN` arrives as
// `null`, slider values arrive as strings. Undecodable values fall back to
// defaults instead of failing the whole frame.

fn lenient_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<serde_json::Value>::deserialize(deserializer)
}

fn finite(n: f64) -> Option<f64> {
    if n.is_finite() {
        Some(n)
    } else {
        None
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_value(deserializer)?.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok().and_then(finite),
        _ => None,
    }))
}

fn lenient_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0.0))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_value(deserializer)?.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }))
}

fn lenient_op<'de, D>(deserializer: D) -> Result<CompositeOp, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_value(deserializer)?
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

// Chat text is shown as-is; anything that is not a string is shown as its JSON.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match lenient_value(deserializer)? {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

/// One line stroke sample. Coordinates are ratios of the sender's canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub x0: f64,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub y0: f64,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub x1: f64,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub y1: f64,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_op")]
    pub op: CompositeOp,
}

impl Segment {
    pub fn between(
        from: CanvasPoint,
        to: CanvasPoint,
        canvas: CanvasSize,
        color: Option<String>,
        size: Option<f64>,
        op: CompositeOp,
    ) -> Self {
        let from = normalize(from, canvas);
        let to = normalize(to, canvas);
        Self {
            x0: from.x,
            y0: from.y,
            x1: to.x,
            y1: to.y,
            color,
            size,
            op,
        }
    }

    /// End points in pixels of the given (local) canvas.
    pub fn endpoints(&self, canvas: CanvasSize) -> (CanvasPoint, CanvasPoint) {
        (
            denormalize(point2(self.x0, self.y0), canvas),
            denormalize(point2(self.x1, self.y1), canvas),
        )
    }
}

/// A single discrete glyph mark, normalized like [`Segment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub x: f64,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub y: f64,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub doodle: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<f64>,
}

impl Stamp {
    pub fn at(
        point: CanvasPoint,
        canvas: CanvasSize,
        doodle: Option<String>,
        color: Option<String>,
        size: Option<f64>,
    ) -> Self {
        let n = normalize(point, canvas);
        Self {
            x: n.x,
            y: n.y,
            doodle,
            color,
            size,
        }
    }

    pub fn position(&self, canvas: CanvasSize) -> CanvasPoint {
        denormalize(point2(self.x, self.y), canvas)
    }
}

/// Pointer position in viewport pixels. Not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorMove {
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub x: f64,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorMoved {
    pub id: ConnectionId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub name: String,
}

/// Every registered connection and its presence record.
pub type UserDirectory = HashMap<ConnectionId, Presence>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLine {
    pub name: String,
    pub message: String,
}

/// Events a client sends to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    UserConnected(#[serde(deserialize_with = "lenient_string")] Option<String>),
    CursorMove(CursorMove),
    Drawing(Segment),
    Doodle(Stamp),
    Clear,
    Undo,
    Redo,
    ChatMessage(#[serde(deserialize_with = "lenient_text")] String),
}

/// Events the relay sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// First event on every connection; tells the client its own id.
    Connected { id: ConnectionId },
    UpdateUsers(UserDirectory),
    UserDisconnected(ConnectionId),
    CursorMoved(CursorMoved),
    Drawing(Segment),
    Doodle(Stamp),
    Clear,
    Undo,
    Redo,
    ChatMessage(ChatLine),
}

impl ClientEvent {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ServerEvent {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
