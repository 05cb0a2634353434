use image::RgbImage;
use std::ops::Range;

use crate::core::color::RgbColor;

pub fn blank(width: u32, height: u32, color: RgbColor) -> RgbImage {
    RgbImage::from_pixel(width, height, color.to_pixel())
}

/// Pixels covered by a stroke of `thickness` centered on `center`:
/// `[center - (t-1)/2, center + t/2]`, clipped to `limit`.
pub fn band(center: u32, thickness: u32, limit: &Range<u32>) -> Range<u32> {
    let start = center.saturating_sub(thickness.saturating_sub(1) / 2);
    let end = center.saturating_add(thickness / 2).saturating_add(1);
    start.max(limit.start)..end.min(limit.end).max(start.max(limit.start))
}

fn intersect(a: &Range<u32>, b: &Range<u32>) -> Range<u32> {
    let start = a.start.max(b.start);
    start..a.end.min(b.end).max(start)
}

pub fn fill_rect(image: &mut RgbImage, xs: Range<u32>, ys: Range<u32>, color: RgbColor) {
    let xs = intersect(&xs, &(0..image.width()));
    let ys = intersect(&ys, &(0..image.height()));
    let pixel = color.to_pixel();
    for y in ys {
        for x in xs.clone() {
            image.put_pixel(x, y, pixel);
        }
    }
}

/// Horizontal line at `y` over `xs`, never painting outside `clip_y`.
pub fn hline(
    image: &mut RgbImage,
    y: u32,
    xs: Range<u32>,
    thickness: u32,
    clip_y: &Range<u32>,
    color: RgbColor,
) {
    let ys = band(y, thickness, clip_y);
    fill_rect(image, xs, ys, color);
}

/// Vertical line at `x` over `ys`.
pub fn vline(image: &mut RgbImage, x: u32, ys: Range<u32>, thickness: u32, color: RgbColor) {
    let xs = band(x, thickness, &(0..image.width()));
    fill_rect(image, xs, ys, color);
}

/// Outline along the image border, growing inwards.
pub fn rect_outline(image: &mut RgbImage, thickness: u32, color: RgbColor) {
    let (w, h) = image.dimensions();
    let t_x = thickness.min(w);
    let t_y = thickness.min(h);
    fill_rect(image, 0..w, 0..t_y, color);
    fill_rect(image, 0..w, h - t_y..h, color);
    fill_rect(image, 0..t_x, 0..h, color);
    fill_rect(image, w - t_x..w, 0..h, color);
}

/// Filled disc; a diameter of 1 or 2 degenerates to a square dot.
/// Only the part overlapping the image is visited.
pub fn disc(image: &mut RgbImage, cx: i64, cy: i64, diameter: u32, color: RgbColor) {
    let r = diameter as i64 / 2;
    let Some((xs, ys)) = clip_box(image, (cx, cy), (cx, cy), r) else {
        return;
    };
    let pixel = color.to_pixel();
    let r_sq = (r as i128) * (r as i128) + r as i128;
    for y in ys {
        let dy = y as i128 - cy as i128;
        for x in xs.clone() {
            let dx = x as i128 - cx as i128;
            if dx * dx + dy * dy <= r_sq {
                image.put_pixel(x, y, pixel);
            }
        }
    }
}

/// Bounding box of `a..b` grown by `margin`, intersected with the image.
fn clip_box(image: &RgbImage, a: (i64, i64), b: (i64, i64), margin: i64) -> Option<(Range<u32>, Range<u32>)> {
    let axis = |lo: i64, hi: i64, size: u32| -> Option<Range<u32>> {
        let start = lo.saturating_sub(margin).max(0);
        let end = hi.saturating_add(margin).min(size as i64 - 1);
        (start <= end).then(|| start as u32..end as u32 + 1)
    };
    let xs = axis(a.0.min(b.0), a.0.max(b.0), image.width())?;
    let ys = axis(a.1.min(b.1), a.1.max(b.1), image.height())?;
    Some((xs, ys))
}

/// Thick segment: every pixel within `thickness / 2` of the segment, the
/// same coverage as stamping a disc along it. Work is bounded by the part
/// of the image the stroke can reach.
pub fn segment(image: &mut RgbImage, from: (i64, i64), to: (i64, i64), thickness: u32, color: RgbColor) {
    let r = thickness as i64 / 2;
    let Some((xs, ys)) = clip_box(image, from, to, r) else {
        return;
    };
    let pixel = color.to_pixel();
    // a 1 px stroke still needs the pixels the line passes through
    let r_sq = ((r * r + r) as f64).max(0.25);

    let (ax, ay) = (from.0 as f64, from.1 as f64);
    let (vx, vy) = (to.0 as f64 - ax, to.1 as f64 - ay);
    let len_sq = vx * vx + vy * vy;

    for y in ys {
        for x in xs.clone() {
            let (px, py) = (x as f64 - ax, y as f64 - ay);
            let t = if len_sq > 0.0 { ((px * vx + py * vy) / len_sq).clamp(0.0, 1.0) } else { 0.0 };
            let (dx, dy) = (px - t * vx, py - t * vy);
            if dx * dx + dy * dy <= r_sq {
                image.put_pixel(x, y, pixel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: RgbColor = RgbColor(0, 0, 0);
    const FG: RgbColor = RgbColor(255, 255, 255);

    fn painted_rows(image: &RgbImage, x: u32) -> Vec<u32> {
        (0..image.height()).filter(|&y| image.get_pixel(x, y).0 == [255, 255, 255]).collect()
    }

    #[test]
    fn test_band_is_thickness_wide() {
        assert_eq!(band(900, 5, &(0..1800)), 898..903);
        assert_eq!(band(300, 2, &(0..1800)), 300..302);
        assert_eq!(band(0, 5, &(0..1800)), 0..3);
        assert_eq!(band(10, 5, &(10..20)), 10..13);
    }

    #[test]
    fn test_hline_respects_clip() {
        let mut image = blank(10, 20, BG);
        hline(&mut image, 10, 0..10, 5, &(10..20), FG);
        assert_eq!(painted_rows(&image, 4), vec![10, 11, 12]);
    }

    #[test]
    fn test_rect_outline_stays_in_image() {
        let mut image = blank(20, 30, BG);
        rect_outline(&mut image, 3, FG);
        assert_eq!(image.dimensions(), (20, 30));
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(19, 29).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(3, 3).0, [0, 0, 0]);
        assert_eq!(painted_rows(&image, 10), vec![0, 1, 2, 27, 28, 29]);
    }

    #[test]
    fn test_segment_connects_endpoints() {
        let mut image = blank(20, 20, BG);
        segment(&mut image, (2, 2), (17, 9), 1, FG);
        assert_eq!(image.get_pixel(2, 2).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(17, 9).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(17, 2).0, [0, 0, 0]);
    }

    #[test]
    fn test_segment_clips_offscreen_points() {
        let mut image = blank(5, 5, BG);
        segment(&mut image, (-10, 2), (10, 2), 1, FG);
        assert_eq!(painted_rows(&image, 0), vec![2]);
        assert_eq!(painted_rows(&image, 4), vec![2]);
    }

    #[test]
    fn test_segment_to_far_away_point() {
        let mut image = blank(10, 10, BG);
        segment(&mut image, (0, 0), (i64::MAX, 0), 1, FG);
        assert_eq!(painted_rows(&image, 9), vec![0]);

        let mut image = blank(10, 10, BG);
        segment(&mut image, (0, 5), (200_000_000, 5), 15, FG);
        assert_eq!(painted_rows(&image, 9), (0..10).collect::<Vec<_>>());

        let mut image = blank(10, 10, BG);
        segment(&mut image, (i64::MIN, -50), (i64::MAX, -50), 3, FG);
        assert!(painted_rows(&image, 5).is_empty());
    }

    #[test]
    fn test_huge_disc_covers_only_the_image() {
        let mut image = blank(10, 10, BG);
        disc(&mut image, 5, 5, u32::MAX, FG);
        assert_eq!(painted_rows(&image, 0), (0..10).collect::<Vec<_>>());

        let mut image = blank(10, 10, BG);
        disc(&mut image, i64::MAX, i64::MIN, 40, FG);
        assert!(painted_rows(&image, 5).is_empty());
    }
}
