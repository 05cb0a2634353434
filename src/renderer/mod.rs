pub mod canvas;
pub mod cell;
pub mod court;
pub mod display;
pub mod processor;

pub use display::{DisplayManager, DisplayMode, Viewport};
