use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::color::RgbColor;

pub const DOCUMENT_VERSION: &str = "volley_court/1";

/// One path command, serialized canvas-style as `["M", x, y]`.
///
/// Quadratic segments (`["Q", cx, cy, x, y]`) are accepted on input and
/// flattened to their end point.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
}

impl PathCommand {
    pub fn point(&self) -> (f64, f64) {
        match *self {
            PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => (x, y),
        }
    }
}

impl Serialize for PathCommand {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (op, (x, y)) = match self {
            PathCommand::MoveTo(..) => ("M", self.point()),
            PathCommand::LineTo(..) => ("L", self.point()),
        };
        (op, x, y).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PathCommand {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Vec<Value> = Vec::deserialize(deserializer)?;
        parse_command(&raw).map_err(serde::de::Error::custom)
    }
}

fn parse_command(raw: &[Value]) -> Result<PathCommand> {
    let op = raw.first().and_then(Value::as_str).unwrap_or_default();
    let nums: Vec<f64> = raw.iter().skip(1).filter_map(Value::as_f64).collect();
    if nums.len() != raw.len().saturating_sub(1) {
        bail!("non-numeric coordinate in path command {:?}", raw);
    }
    match (op, nums.as_slice()) {
        ("M", [x, y]) => Ok(PathCommand::MoveTo(*x, *y)),
        ("L", [x, y]) | ("Q", [_, _, x, y]) => Ok(PathCommand::LineTo(*x, *y)),
        _ => bail!("unsupported path command {:?}", raw),
    }
}

/// A freehand stroke in canvas pixel coordinates.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    #[serde(rename = "type")]
    pub kind: String,
    pub stroke: RgbColor,
    pub stroke_width: u32,
    pub fill: String,
    pub path: Vec<PathCommand>,
}

impl Stroke {
    pub fn new(color: RgbColor, width: u32, fill: &str) -> Self {
        Self {
            kind: "path".to_string(),
            stroke: color,
            stroke_width: width,
            fill: fill.to_string(),
            path: Vec::new(),
        }
    }

    /// Append a point; the first one starts the path.
    pub fn push(&mut self, x: f64, y: f64) {
        if self.path.last().map(|c| c.point()) == Some((x, y)) {
            return;
        }
        let cmd = if self.path.is_empty() {
            PathCommand::MoveTo(x, y)
        } else {
            PathCommand::LineTo(x, y)
        };
        self.path.push(cmd);
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.path.iter().map(PathCommand::point)
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// All strokes drawn over one canvas.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StrokeDocument {
    pub version: String,
    pub width: u32,
    pub height: u32,
    pub background: RgbColor,
    #[serde(default)]
    pub objects: Vec<Stroke>,
}

impl StrokeDocument {
    pub fn new(width: u32, height: u32, background: RgbColor) -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            width,
            height,
            background,
            objects: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let doc: StrokeDocument = serde_json::from_str(json)?;
        if doc.width == 0 || doc.height == 0 {
            bail!("stroke document has an empty canvas ({}x{})", doc.width, doc.height);
        }
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
