use serde::{Deserialize, Serialize};

use super::color::RgbColor;
use super::error::ConfigError;

pub const DEFAULT_WIDTH: u32 = 900;
pub const DEFAULT_HEIGHT: u32 = 1800;

/// Where the two attack ("3 m") lines sit relative to the center line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "pixels")]
pub enum AttackLineOffset {
    /// A sixth of the court height: 3 m on an 18 m court.
    #[default]
    Proportional,
    /// Fixed distance in pixels from the center line.
    Fixed(u32),
}

/// Colors and stroke widths of the court drawing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CourtStyle {
    pub fill_color: RgbColor,
    pub line_color: RgbColor,
    pub sector_line_color: RgbColor,
    pub point_color: RgbColor,
    pub line_thickness: u32,
    pub sector_line_thickness: u32,
}

impl Default for CourtStyle {
    fn default() -> Self {
        Self {
            fill_color: RgbColor::DARK_SEA_GREEN,
            line_color: RgbColor::WHITE,
            sector_line_color: RgbColor::LIGHT_GRAY,
            point_color: RgbColor::RED,
            line_thickness: 5,
            sector_line_thickness: 2,
        }
    }
}

/// Immutable, validated description of the court raster.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CourtSpec {
    width: u32,
    height: u32,
    style: CourtStyle,
    attack_line: AttackLineOffset,
}

impl CourtSpec {
    pub fn new(
        width: u32,
        height: u32,
        style: CourtStyle,
        attack_line: AttackLineOffset,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height < 2 {
            return Err(ConfigError::EmptyCourt { width, height });
        }
        if style.line_thickness == 0 {
            return Err(ConfigError::ZeroThickness { what: "court line" });
        }
        if style.sector_line_thickness == 0 {
            return Err(ConfigError::ZeroThickness { what: "sector line" });
        }

        let spec = Self { width, height, style, attack_line };
        let offset = spec.attack_line_offset();
        if offset == 0 || offset >= spec.half_height() {
            return Err(ConfigError::AttackLineOutOfCourt {
                offset,
                half_height: spec.half_height(),
            });
        }
        Ok(spec)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn style(&self) -> &CourtStyle {
        &self.style
    }

    /// Height of one half court; also the y of the center line.
    pub fn half_height(&self) -> u32 {
        self.height / 2
    }

    pub fn attack_line_offset(&self) -> u32 {
        match self.attack_line {
            AttackLineOffset::Proportional => self.height / 6,
            AttackLineOffset::Fixed(px) => px,
        }
    }
}

impl Default for CourtSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            style: CourtStyle::default(),
            attack_line: AttackLineOffset::Proportional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_attack_line_matches_three_meters() {
        let spec = CourtSpec::default();
        assert_eq!(spec.half_height(), 900);
        assert_eq!(spec.attack_line_offset(), 300);
    }

    #[test]
    fn test_proportional_offset_scales_with_height() {
        let spec = CourtSpec::new(300, 600, CourtStyle::default(), AttackLineOffset::Proportional).unwrap();
        assert_eq!(spec.attack_line_offset(), 100);
    }

    #[test]
    fn test_fixed_offset_must_fit_half_court() {
        let err = CourtSpec::new(300, 600, CourtStyle::default(), AttackLineOffset::Fixed(300)).unwrap_err();
        assert_eq!(err, ConfigError::AttackLineOutOfCourt { offset: 300, half_height: 300 });
        assert!(CourtSpec::new(300, 600, CourtStyle::default(), AttackLineOffset::Fixed(299)).is_ok());
    }

    #[test]
    fn test_rejects_degenerate_court() {
        assert!(matches!(
            CourtSpec::new(0, 1800, CourtStyle::default(), AttackLineOffset::Proportional),
            Err(ConfigError::EmptyCourt { .. })
        ));
        let style = CourtStyle { sector_line_thickness: 0, ..CourtStyle::default() };
        assert!(matches!(
            CourtSpec::new(900, 1800, style, AttackLineOffset::Proportional),
            Err(ConfigError::ZeroThickness { .. })
        ));
    }
}
