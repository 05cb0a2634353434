use anyhow::Result;
use image::RgbImage;

use super::stroke::{PathCommand, Stroke, StrokeDocument};
use crate::core::color::RgbColor;
use crate::core::config::DrawingConfig;
use crate::renderer::{canvas, processor};

/// Paint every stroke of `doc` onto `image`, scaling canvas coordinates
/// to the image size.
pub fn paint_strokes(image: &mut RgbImage, doc: &StrokeDocument) {
    let sx = image.width() as f64 / doc.width as f64;
    let sy = image.height() as f64 / doc.height as f64;
    let scale = |(x, y): (f64, f64)| ((x * sx).floor() as i64, (y * sy).floor() as i64);

    for stroke in &doc.objects {
        let width = ((stroke.stroke_width as f64 * sx.min(sy)).round() as u32).max(1);
        let mut points = stroke.points().map(&scale);
        let Some(mut prev) = points.next() else {
            continue;
        };
        canvas::disc(image, prev.0, prev.1, width, stroke.stroke);
        for next in points {
            canvas::segment(image, prev, next, width, stroke.stroke);
            prev = next;
        }
    }
}

/// Freehand overlay on a scaled-down copy of the court.
pub struct DrawingCanvas {
    background: RgbImage,
    document: StrokeDocument,
    settings: DrawingConfig,
    current: Option<Stroke>,
}

impl DrawingCanvas {
    pub fn new(court: &RgbImage, settings: &DrawingConfig, background_color: RgbColor) -> Result<Self> {
        let scale = settings.canvas_scale.max(1);
        let width = (court.width() / scale).max(1);
        let height = (court.height() / scale).max(1);
        let background = processor::downscale(court, width, height)?;
        Ok(Self {
            background,
            document: StrokeDocument::new(width, height, background_color),
            settings: settings.clone(),
            current: None,
        })
    }

    /// Continue an earlier drawing. Strokes from a canvas of another size
    /// are rescaled to this one.
    pub fn resume(&mut self, previous: StrokeDocument) {
        let sx = self.document.width as f64 / previous.width as f64;
        let sy = self.document.height as f64 / previous.height as f64;
        for mut stroke in previous.objects {
            for cmd in stroke.path.iter_mut() {
                *cmd = match *cmd {
                    PathCommand::MoveTo(x, y) => PathCommand::MoveTo(x * sx, y * sy),
                    PathCommand::LineTo(x, y) => PathCommand::LineTo(x * sx, y * sy),
                };
            }
            self.document.objects.push(stroke);
        }
    }

    pub fn width(&self) -> u32 {
        self.document.width
    }

    pub fn height(&self) -> u32 {
        self.document.height
    }

    pub fn begin_stroke(&mut self, x: f64, y: f64) {
        self.end_stroke();
        let mut stroke = Stroke::new(self.settings.stroke_color, self.settings.stroke_width, &self.settings.fill_color);
        stroke.push(x, y);
        self.current = Some(stroke);
    }

    pub fn extend_stroke(&mut self, x: f64, y: f64) {
        match self.current.as_mut() {
            Some(stroke) => stroke.push(x, y),
            None => self.begin_stroke(x, y),
        }
    }

    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.current.take() {
            if !stroke.is_empty() {
                log::debug!("Stroke finished with {} points", stroke.path.len());
                self.document.objects.push(stroke);
            }
        }
    }

    pub fn stroke_count(&self) -> usize {
        self.document.objects.len() + usize::from(self.current.is_some())
    }

    /// Background with finished and in-progress strokes on top.
    pub fn composite(&self) -> RgbImage {
        let mut image = self.background.clone();
        if let Some(stroke) = &self.current {
            let mut doc = self.document.clone();
            doc.objects.push(stroke.clone());
            paint_strokes(&mut image, &doc);
        } else {
            paint_strokes(&mut image, &self.document);
        }
        image
    }

    pub fn into_document(mut self) -> StrokeDocument {
        self.end_stroke();
        self.document
    }
}
