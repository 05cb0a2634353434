pub mod canvas;
pub mod stroke;

pub use canvas::{paint_strokes, DrawingCanvas};
pub use stroke::StrokeDocument;
