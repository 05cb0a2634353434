use image::RgbImage;

use super::canvas;
use crate::core::config::CourtLayout;
use crate::core::court::CourtSpec;
use crate::core::sectors::{Orientation, SectorGrid};
use crate::core::selection::PointRecord;

/// Court raster: width x height RGB, regenerated on every render.
pub type RenderedCourt = RgbImage;

/// Draws the court and its sector grids. Holds nothing but the `CourtSpec`, so
/// the same input always yields the same pixels.
pub struct CourtRenderer {
    spec: CourtSpec,
}

impl CourtRenderer {
    pub fn new(spec: CourtSpec) -> Self {
        Self { spec }
    }

    /// Fill, center line, boundary, then the two attack lines.
    pub fn render_base_court(&self) -> RenderedCourt {
        let spec = &self.spec;
        let style = spec.style();
        let (w, h) = (spec.width(), spec.height());
        let full_height = 0..h;

        let mut image = canvas::blank(w, h, style.fill_color);

        let center = spec.half_height();
        canvas::hline(&mut image, center, 0..w, style.line_thickness, &full_height, style.line_color);
        canvas::rect_outline(&mut image, style.line_thickness, style.line_color);

        let offset = spec.attack_line_offset();
        for y in [center - offset, center + offset] {
            canvas::hline(&mut image, y, 0..w, style.line_thickness, &full_height, style.line_color);
        }

        image
    }

    /// Interior sector lines of one half. Nothing is painted outside the
    /// half's rows.
    pub fn overlay_sector_grid(&self, image: &mut RenderedCourt, grid: &SectorGrid) {
        let style = self.spec.style();
        let extent = grid.extent();

        for line in grid.interior_lines() {
            match line.orientation {
                Orientation::Horizontal => canvas::hline(
                    image,
                    line.position,
                    line.span,
                    style.sector_line_thickness,
                    &extent,
                    style.sector_line_color,
                ),
                Orientation::Vertical => canvas::vline(
                    image,
                    line.position,
                    line.span,
                    style.sector_line_thickness,
                    style.sector_line_color,
                ),
            }
        }
    }

    /// Markers on the centers of both zones, joined by the ball path.
    pub fn mark_point(&self, image: &mut RenderedCourt, layout: &CourtLayout, record: &PointRecord) {
        let style = self.spec.style();
        let (ax, ay) = layout.attack.center(record.attack);
        let (dx, dy) = layout.defense.center(record.defense);
        let marker = style
            .line_thickness
            .saturating_mul(4)
            .max(8)
            .min(self.spec.width().max(self.spec.height()));

        canvas::segment(
            image,
            (ax as i64, ay as i64),
            (dx as i64, dy as i64),
            style.line_thickness,
            style.point_color,
        );
        canvas::disc(image, ax as i64, ay as i64, marker, style.point_color);
        canvas::disc(image, dx as i64, dy as i64, marker, style.point_color);
    }

    /// Base court plus both grids, and the point if one is given.
    pub fn render(&self, layout: &CourtLayout, point: Option<&PointRecord>) -> RenderedCourt {
        let mut image = self.render_base_court();
        self.overlay_sector_grid(&mut image, &layout.attack);
        self.overlay_sector_grid(&mut image, &layout.defense);
        if let Some(record) = point {
            self.mark_point(&mut image, layout, record);
        }
        log::debug!(
            "Rendered court {}x{} (attack sectors {:.1}x{:.1}, defense sectors {:.1}x{:.1})",
            image.width(),
            image.height(),
            layout.attack.sector_width(),
            layout.attack.sector_height(),
            layout.defense.sector_width(),
            layout.defense.sector_height()
        );
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::RgbColor;
    use crate::core::config::CourtConfig;
    use crate::core::court::{AttackLineOffset, CourtStyle};
    use crate::core::sectors::Half;

    const FILL: RgbColor = RgbColor(10, 20, 30);
    const LINE: RgbColor = RgbColor(250, 250, 250);
    const SECTOR: RgbColor = RgbColor(100, 100, 100);

    fn style() -> CourtStyle {
        CourtStyle {
            fill_color: FILL,
            line_color: LINE,
            sector_line_color: SECTOR,
            point_color: RgbColor::RED,
            line_thickness: 5,
            sector_line_thickness: 2,
        }
    }

    fn spec(width: u32, height: u32) -> CourtSpec {
        CourtSpec::new(width, height, style(), AttackLineOffset::Proportional).unwrap()
    }

    fn is(image: &RgbImage, x: u32, y: u32, color: RgbColor) -> bool {
        image.get_pixel(x, y).0 == [color.0, color.1, color.2]
    }

    #[test]
    fn test_dimensions_match_spec() {
        for (w, h, t) in [(900, 1800, 5), (31, 64, 40), (7, 12, 1)] {
            let style = CourtStyle { line_thickness: t, ..style() };
            let spec = CourtSpec::new(w, h, style, AttackLineOffset::Proportional).unwrap();
            let image = CourtRenderer::new(spec).render_base_court();
            assert_eq!(image.dimensions(), (w, h));
        }
    }

    #[test]
    fn test_structural_line_positions() {
        let image = CourtRenderer::new(spec(900, 1800)).render_base_court();
        let x = 450;
        for y in [900, 600, 1200] {
            assert!(is(&image, x, y, LINE), "expected line at y={}", y);
        }
        // 5 px thick: two rows either side, fill beyond
        assert!(is(&image, x, 898, LINE) && is(&image, x, 902, LINE));
        assert!(is(&image, x, 897, FILL) && is(&image, x, 903, FILL));
        assert!(is(&image, x, 750, FILL));
        // boundary
        assert!(is(&image, 0, 750, LINE) && is(&image, 899, 750, LINE));
        assert!(is(&image, x, 0, LINE) && is(&image, x, 1799, LINE));
    }

    #[test]
    fn test_render_is_idempotent() {
        let layout = CourtConfig::default().validate().unwrap();
        let renderer = CourtRenderer::new(layout.spec);
        assert_eq!(renderer.render_base_court(), renderer.render_base_court());
        assert_eq!(renderer.render(&layout, None), renderer.render(&layout, None));
    }

    #[test]
    fn test_attack_grid_never_crosses_center() {
        let spec = spec(900, 1800);
        let renderer = CourtRenderer::new(spec);
        let mut image = canvas::blank(900, 1800, FILL);
        let grid = SectorGrid::new(Half::Attack, 3, 3, &spec).unwrap();
        renderer.overlay_sector_grid(&mut image, &grid);

        for y in 900..1800 {
            for x in 0..900 {
                assert!(is(&image, x, y, FILL));
            }
        }
        assert!(is(&image, 300, 899, SECTOR) && is(&image, 600, 0, SECTOR));
    }

    #[test]
    fn test_defense_grid_never_crosses_center() {
        let spec = spec(900, 1800);
        let renderer = CourtRenderer::new(spec);
        let mut image = canvas::blank(900, 1800, FILL);
        let grid = SectorGrid::new(Half::Defense, 3, 6, &spec).unwrap();
        renderer.overlay_sector_grid(&mut image, &grid);

        for y in 0..900 {
            for x in 0..900 {
                assert!(is(&image, x, y, FILL));
            }
        }
        assert!(is(&image, 300, 900, SECTOR) && is(&image, 600, 1799, SECTOR));
        for y in [1050, 1200, 1350, 1500, 1650] {
            assert!(is(&image, 10, y, SECTOR), "expected sector line at y={}", y);
        }
    }

    #[test]
    fn test_overlay_draws_one_line_per_interior_edge() {
        let spec = spec(900, 1800);
        let renderer = CourtRenderer::new(spec);
        let grid = SectorGrid::new(Half::Defense, 4, 5, &spec).unwrap();
        let mut image = canvas::blank(900, 1800, FILL);
        renderer.overlay_sector_grid(&mut image, &grid);

        // Scan a row free of horizontal lines for vertical runs.
        let y = 905;
        let mut runs = 0;
        let mut inside = false;
        for x in 0..900 {
            let painted = is(&image, x, y, SECTOR);
            if painted && !inside {
                runs += 1;
            }
            inside = painted;
        }
        assert_eq!(runs, 3);

        let mut runs = 0;
        let mut inside = false;
        for y in 900..1800 {
            let painted = is(&image, 100, y, SECTOR);
            if painted && !inside {
                runs += 1;
            }
            inside = painted;
        }
        assert_eq!(runs, 4);
    }

    #[test]
    fn test_mark_point_uses_point_color() {
        let layout = CourtConfig::default().validate().unwrap();
        let renderer = CourtRenderer::new(layout.spec);
        let record = PointRecord::new(
            layout.attack.coordinate(2, 1).unwrap(),
            layout.defense.coordinate(1, 4).unwrap(),
        );
        let image = renderer.render(&layout, Some(&record));
        assert!(is(&image, 450, 150, RgbColor::RED));
        assert!(is(&image, 150, 1425, RgbColor::RED));
        assert!(!is(&image, 750, 1650, RgbColor::RED));
    }

    #[test]
    fn test_mark_point_with_oversized_line_thickness() {
        let config = CourtConfig { line_thickness: 1 << 30, ..CourtConfig::default() };
        let layout = config.validate().unwrap();
        let renderer = CourtRenderer::new(layout.spec);
        let record = PointRecord::new(layout.attack.first(), layout.defense.first());
        let image = renderer.render(&layout, Some(&record));
        assert_eq!(image.dimensions(), (900, 1800));
        assert!(is(&image, 0, 0, RgbColor::RED) && is(&image, 899, 1799, RgbColor::RED));
    }
}
