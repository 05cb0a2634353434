use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use std::io::{BufWriter, Stdout, Write};

use super::cell::CellData;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum DisplayMode {
    Ascii,
    Rgb,
}

/// ASCII character set from darkest to brightest
const ASCII_CHARS: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Top-left terminal cell of the drawn content, plus its size in cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Cell relative to the content, if `(col, row)` falls on it.
    pub fn to_local(&self, col: u16, row: u16) -> Option<(u16, u16)> {
        let inside = col >= self.x && row >= self.y && col < self.x + self.cols && row < self.y + self.rows;
        inside.then(|| (col - self.x, row - self.y))
    }
}

/// Centered placement of `content_cols x content_rows` on the terminal,
/// leaving `reserved_rows` at the bottom for the status line.
pub fn center_viewport(term: (u16, u16), content_cols: u16, content_rows: u16, reserved_rows: u16) -> Viewport {
    let (term_cols, term_rows) = term;
    let usable_rows = term_rows.saturating_sub(reserved_rows);
    Viewport {
        x: term_cols.saturating_sub(content_cols) / 2,
        y: usable_rows.saturating_sub(content_rows) / 2,
        cols: content_cols.min(term_cols),
        rows: content_rows.min(usable_rows),
    }
}

pub struct DisplayManager {
    stdout: BufWriter<Stdout>,
    mode: DisplayMode,
    mouse: bool,
    last_cells: Option<Vec<CellData>>,
    last_viewport: Viewport,
    render_buffer: Vec<u8>,
}

impl DisplayManager {
    pub fn new(mode: DisplayMode, mouse: bool) -> Result<Self> {
        let mut dm = Self {
            stdout: BufWriter::with_capacity(1024 * 1024, std::io::stdout()),
            mode,
            mouse,
            last_cells: None,
            last_viewport: Viewport::default(),
            render_buffer: Vec::with_capacity(256 * 1024),
        };
        dm.initialize_terminal()?;
        Ok(dm)
    }

    fn initialize_terminal(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.execute(EnterAlternateScreen)?;
        self.stdout.execute(cursor::Hide)?;
        if self.mouse {
            self.stdout.execute(EnableMouseCapture)?;
        }
        // Disable line wrap
        self.stdout.write_all(b"\x1b[?7l")?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        terminal::size().unwrap_or((80, 24))
    }

    /// Forget what is on screen; the next render repaints everything.
    pub fn invalidate(&mut self) {
        self.last_cells = None;
    }

    // Helper for zero-allocation integer writing
    #[inline(always)]
    fn write_u8_fast(buffer: &mut Vec<u8>, n: u8) {
        if n >= 100 {
            buffer.push(b'0' + n / 100);
        }
        if n >= 10 {
            buffer.push(b'0' + (n / 10) % 10);
        }
        buffer.push(b'0' + n % 10);
    }

    #[inline(always)]
    fn write_u16_fast(buffer: &mut Vec<u8>, n: u16) {
        let mut digits = [0u8; 5];
        let mut len = 0;
        let mut n = n;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        buffer.extend(digits[..len].iter().rev());
    }

    fn ascii_for(color: (u8, u8, u8)) -> char {
        // 0.299*R + 0.587*G + 0.114*B
        let brightness = (color.0 as u32 * 299 + color.1 as u32 * 587 + color.2 as u32 * 114) / 1000;
        let idx = (brightness * (ASCII_CHARS.len() as u32 - 1) / 255) as usize;
        ASCII_CHARS[idx]
    }

    /// Diffing renderer: only cells that changed since the last call are
    /// written. Returns where the content landed.
    pub fn render_diff(&mut self, cells: &[CellData], width: usize, status: &str) -> Result<Viewport> {
        if width == 0 {
            return Ok(self.last_viewport);
        }

        let term = self.terminal_size();
        let content_rows = (cells.len() / width) as u16;
        let viewport = center_viewport(term, width as u16, content_rows, 1);

        let mut force_redraw = false;
        self.render_buffer.clear();
        if viewport != self.last_viewport || self.last_cells.as_ref().map(|v| v.len()) != Some(cells.len()) {
            self.render_buffer.extend_from_slice(b"\x1b[0m\x1b[2J");
            self.last_cells = Some(vec![CellData::default(); cells.len()]);
            self.last_viewport = viewport;
            force_redraw = true;
        }

        let (last_cells, buffer) = match &mut self.last_cells {
            Some(v) => (v, &mut self.render_buffer),
            None => return Ok(viewport),
        };

        let mut last_fg: Option<(u8, u8, u8)> = None;
        let mut last_bg: Option<(u8, u8, u8)> = None;
        let mut cursor_x: i32 = -1;
        let mut cursor_y: i32 = -1;

        for (i, cell) in cells.iter().enumerate() {
            if !force_redraw && *cell == last_cells[i] {
                // If cell didn't change, invalidate cursor tracker
                cursor_x = -1;
                continue;
            }

            let x = (i % width) as u16;
            let y = (i / width) as u16;
            if x >= viewport.cols || y >= viewport.rows {
                cursor_x = -1;
                continue;
            }
            let target_x = x + viewport.x;
            let target_y = y + viewport.y;

            if cursor_x != target_x as i32 || cursor_y != target_y as i32 {
                buffer.extend_from_slice(b"\x1b[");
                Self::write_u16_fast(buffer, target_y + 1);
                buffer.push(b';');
                Self::write_u16_fast(buffer, target_x + 1);
                buffer.push(b'H');
                cursor_x = target_x as i32;
                cursor_y = target_y as i32;
            }

            let ch = match self.mode {
                DisplayMode::Rgb => {
                    if Some(cell.fg) != last_fg {
                        buffer.extend_from_slice(b"\x1b[38;2;");
                        Self::write_u8_fast(buffer, cell.fg.0);
                        buffer.push(b';');
                        Self::write_u8_fast(buffer, cell.fg.1);
                        buffer.push(b';');
                        Self::write_u8_fast(buffer, cell.fg.2);
                        buffer.push(b'm');
                        last_fg = Some(cell.fg);
                    }
                    if Some(cell.bg) != last_bg {
                        buffer.extend_from_slice(b"\x1b[48;2;");
                        Self::write_u8_fast(buffer, cell.bg.0);
                        buffer.push(b';');
                        Self::write_u8_fast(buffer, cell.bg.1);
                        buffer.push(b';');
                        Self::write_u8_fast(buffer, cell.bg.2);
                        buffer.push(b'm');
                        last_bg = Some(cell.bg);
                    }
                    cell.char
                }
                DisplayMode::Ascii => Self::ascii_for(cell.fg),
            };

            let mut b_dst = [0u8; 4];
            buffer.extend_from_slice(ch.encode_utf8(&mut b_dst).as_bytes());
            last_cells[i] = *cell;
            cursor_x += 1;
        }

        buffer.extend_from_slice(b"\x1b[0m");

        // Status line on the last terminal row
        let status_row = term.1.saturating_sub(1);
        buffer.extend_from_slice(b"\x1b[");
        Self::write_u16_fast(buffer, status_row + 1);
        buffer.extend_from_slice(b";1H\x1b[2K");
        let status: String = status.chars().take(term.0 as usize).collect();
        buffer.extend_from_slice(status.as_bytes());

        self.stdout.write_all(&buffer[..])?;
        self.stdout.flush()?;
        Ok(viewport)
    }
}

impl Drop for DisplayManager {
    fn drop(&mut self) {
        let _ = self.stdout.write_all(b"\x1b[0m\x1b[?7h");
        if self.mouse {
            let _ = self.stdout.execute(DisableMouseCapture);
        }
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(LeaveAlternateScreen);
        let _ = self.stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_numbers() {
        let mut buf = Vec::new();
        DisplayManager::write_u8_fast(&mut buf, 0);
        buf.push(b' ');
        DisplayManager::write_u8_fast(&mut buf, 143);
        buf.push(b' ');
        DisplayManager::write_u16_fast(&mut buf, 1200);
        buf.push(b' ');
        DisplayManager::write_u16_fast(&mut buf, 7);
        assert_eq!(String::from_utf8(buf).unwrap(), "0 143 1200 7");
    }

    #[test]
    fn test_ascii_ramp_ends() {
        assert_eq!(DisplayManager::ascii_for((0, 0, 0)), ' ');
        assert_eq!(DisplayManager::ascii_for((255, 255, 255)), '@');
    }

    #[test]
    fn test_viewport_centering_and_hit_test() {
        let vp = center_viewport((80, 25), 24, 24, 1);
        assert_eq!(vp, Viewport { x: 28, y: 0, cols: 24, rows: 24 });
        assert_eq!(vp.to_local(28, 0), Some((0, 0)));
        assert_eq!(vp.to_local(51, 23), Some((23, 23)));
        assert_eq!(vp.to_local(52, 0), None);
        assert_eq!(vp.to_local(27, 5), None);
    }
}
