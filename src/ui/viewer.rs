use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use image::RgbImage;
use std::time::Duration;

use crate::drawing::DrawingCanvas;
use crate::renderer::cell::CellData;
use crate::renderer::processor::{self, FrameProcessor};
use crate::renderer::{DisplayManager, DisplayMode, Viewport};

/// An image scaled to the terminal and split into half-block cells.
struct FittedFrame {
    cells: Vec<CellData>,
    width: u32,
    height: u32,
}

fn fit_frame(image: &RgbImage, term: (u16, u16)) -> Result<FittedFrame> {
    // last row is the status line
    let rows = term.1.saturating_sub(1).max(1);
    let (width, height) = processor::fit_canvas(image.width(), image.height(), term.0, rows);
    let scaled = processor::downscale(image, width, height)?;
    let cells = FrameProcessor::new(width as usize, height as usize).process_frame(scaled.as_raw());
    Ok(FittedFrame { cells, width, height })
}

fn is_exit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Show `image` full-terminal until a key is pressed.
pub fn show_court(image: &RgbImage, mode: DisplayMode, status: &str) -> Result<()> {
    let mut display = DisplayManager::new(mode, false)?;
    let mut frame = fit_frame(image, display.terminal_size())?;
    display.render_diff(&frame.cells, frame.width as usize, status)?;

    loop {
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => break,
            Event::Resize(cols, rows) => {
                frame = fit_frame(image, (cols, rows))?;
                display.invalidate();
                display.render_diff(&frame.cells, frame.width as usize, status)?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Terminal cell under the mouse to drawing-canvas coordinates.
fn cell_to_canvas(
    viewport: &Viewport,
    frame_size: (u32, u32),
    canvas_size: (u32, u32),
    col: u16,
    row: u16,
) -> Option<(f64, f64)> {
    let (lx, ly) = viewport.to_local(col, row)?;
    // a cell spans one pixel across and two down; aim at its middle
    let px = lx as f64 + 0.5;
    let py = ly as f64 * 2.0 + 1.0;
    let sx = canvas_size.0 as f64 / frame_size.0 as f64;
    let sy = canvas_size.1 as f64 / frame_size.1 as f64;
    Some(((px * sx).floor(), (py * sy).floor()))
}

/// Freehand drawing with the mouse until q / Esc / Enter.
pub fn draw_on_court(canvas: &mut DrawingCanvas, mode: DisplayMode) -> Result<()> {
    let status = "Disegno: trascina col mouse | q per terminare";
    let mut display = DisplayManager::new(mode, true)?;
    let canvas_size = (canvas.width(), canvas.height());
    let mut term = display.terminal_size();
    let mut dirty = true;
    let mut viewport = Viewport::default();
    let mut frame_size = (1, 1);

    loop {
        if dirty {
            let frame = fit_frame(&canvas.composite(), term)?;
            frame_size = (frame.width, frame.height);
            let line = format!("{} | tratti: {}", status, canvas.stroke_count());
            viewport = display.render_diff(&frame.cells, frame.width as usize, &line)?;
            dirty = false;
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press && is_exit_key(&key) => break,
            Event::Resize(cols, rows) => {
                term = (cols, rows);
                display.invalidate();
                dirty = true;
            }
            Event::Mouse(mouse) => {
                let Some((x, y)) = cell_to_canvas(&viewport, frame_size, canvas_size, mouse.column, mouse.row) else {
                    continue;
                };
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => canvas.begin_stroke(x, y),
                    MouseEventKind::Drag(MouseButton::Left) => canvas.extend_stroke(x, y),
                    MouseEventKind::Up(MouseButton::Left) => canvas.end_stroke(),
                    _ => continue,
                }
                dirty = true;
            }
            _ => {}
        }
    }

    canvas.end_stroke();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_frame_fills_terminal_height() {
        let image = RgbImage::from_pixel(900, 1800, image::Rgb([143, 188, 143]));
        let frame = fit_frame(&image, (80, 25)).unwrap();
        assert_eq!((frame.width, frame.height), (24, 48));
        assert_eq!(frame.cells.len(), 24 * 24);
    }

    #[test]
    fn test_cell_to_canvas_mapping() {
        let viewport = Viewport { x: 10, y: 0, cols: 24, rows: 24 };
        // 24x48 frame shown for a 300x600 canvas: 12.5 canvas px per frame px
        let hit = cell_to_canvas(&viewport, (24, 48), (300, 600), 10, 0).unwrap();
        assert_eq!(hit, (6.0, 12.0));
        let far = cell_to_canvas(&viewport, (24, 48), (300, 600), 33, 23).unwrap();
        assert_eq!(far, (293.0, 587.0));
        assert_eq!(cell_to_canvas(&viewport, (24, 48), (300, 600), 9, 0), None);
    }
}
