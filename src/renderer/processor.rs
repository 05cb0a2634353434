use anyhow::{Context, Result};
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbImage;
use rayon::prelude::*;

use super::cell::CellData;

/// Largest canvas with the court's aspect ratio that fits `cols x rows`
/// half-block cells. Height is kept even so every cell has two pixels.
pub fn fit_canvas(court_w: u32, court_h: u32, cols: u16, rows: u16) -> (u32, u32) {
    let max_w = cols.max(1) as u64;
    let max_h = rows.max(1) as u64 * 2;
    let (cw, ch) = (court_w as u64, court_h as u64);
    let (w, h) = if max_w * ch >= max_h * cw {
        (max_h * cw / ch, max_h)
    } else {
        (max_w, max_w * ch / cw)
    };
    ((w as u32).max(1), ((h as u32) & !1).max(2))
}

/// Area-averaging downscale, so 2 px sector lines survive as lighter
/// shades instead of vanishing between samples.
pub fn downscale(image: &RgbImage, width: u32, height: u32) -> Result<RgbImage> {
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    let src = Image::from_vec_u8(image.width(), image.height(), image.as_raw().clone(), PixelType::U8x3)
        .context("Failed to wrap court raster")?;
    let mut dst = Image::new(width, height, PixelType::U8x3);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box));
    Resizer::new()
        .resize(&src, &mut dst, &options)
        .context("Failed to resize court raster")?;

    RgbImage::from_raw(width, height, dst.into_vec())
        .context("Resized buffer does not match target dimensions")
}

/// RGB canvas to half-block terminal cells.
pub struct FrameProcessor {
    pub width: usize,
    pub height: usize,
}

impl FrameProcessor {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn process_frame(&self, pixel_data: &[u8]) -> Vec<CellData> {
        let mut cells = vec![CellData::default(); self.width * (self.height / 2)];
        self.process_frame_into(pixel_data, &mut cells);
        cells
    }

    // Half-Block: 1x Horizontal, 2x Vertical (▀ character)
    pub fn process_frame_into(&self, pixel_data: &[u8], cells: &mut [CellData]) {
        let w = self.width;
        let term_height = self.height / 2;

        if w == 0 || cells.len() != w * term_height {
            log::warn!("Cell buffer size {} does not match {}x{}", cells.len(), w, term_height);
            return;
        }

        // One terminal row per task
        cells.par_chunks_mut(w).enumerate().for_each(|(cy, row)| {
            let get_pixel = |x: usize, y: usize| -> (u8, u8, u8) {
                let offset = (y * w + x) * 3;
                if offset + 2 < pixel_data.len() {
                    (pixel_data[offset], pixel_data[offset + 1], pixel_data[offset + 2])
                } else {
                    (0, 0, 0)
                }
            };

            for (cx, cell) in row.iter_mut().enumerate() {
                *cell = CellData {
                    char: '▀',
                    fg: get_pixel(cx, cy * 2),
                    bg: get_pixel(cx, cy * 2 + 1),
                };
            }
        });
    }
}
