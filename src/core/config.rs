use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::color::RgbColor;
use super::court::{AttackLineOffset, CourtSpec, CourtStyle, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::error::ConfigError;
use super::sectors::{Half, SectorGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: u32,
    pub rows: u32,
}

/// Freehand drawing canvas settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Canvas is the court divided by this factor
    pub canvas_scale: u32,
    pub stroke_width: u32,
    pub stroke_color: RgbColor,
    /// Passed through untouched into the exported stroke document
    pub fill_color: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            canvas_scale: 3,
            stroke_width: 5,
            stroke_color: RgbColor::RED,
            fill_color: "rgba(255, 165, 0, 0.3)".to_string(),
        }
    }
}

/// On-disk court configuration. Every field has a default, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtConfig {
    pub width: u32,
    pub height: u32,
    pub fill_color: RgbColor,
    pub line_color: RgbColor,
    pub sector_line_color: RgbColor,
    pub point_color: RgbColor,
    pub line_thickness: u32,
    pub sector_line_thickness: u32,
    pub attack_line: AttackLineOffset,
    pub attack_grid: GridConfig,
    pub defense_grid: GridConfig,
    pub drawing: DrawingConfig,
}

impl Default for CourtConfig {
    fn default() -> Self {
        let style = CourtStyle::default();
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fill_color: style.fill_color,
            line_color: style.line_color,
            sector_line_color: style.sector_line_color,
            point_color: style.point_color,
            line_thickness: style.line_thickness,
            sector_line_thickness: style.sector_line_thickness,
            attack_line: AttackLineOffset::Proportional,
            attack_grid: GridConfig { columns: 3, rows: 3 },
            defense_grid: GridConfig { columns: 3, rows: 6 },
            drawing: DrawingConfig::default(),
        }
    }
}

/// A configuration that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtLayout {
    pub spec: CourtSpec,
    pub attack: SectorGrid,
    pub defense: SectorGrid,
    pub drawing: DrawingConfig,
}

impl CourtLayout {
    pub fn grid(&self, half: Half) -> &SectorGrid {
        match half {
            Half::Attack => &self.attack,
            Half::Defense => &self.defense,
        }
    }
}

impl CourtConfig {
    /// Default config file location
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("volley_court").join("config.json"))
    }

    /// Load from `path` if given, otherwise from the default location when
    /// a file exists there, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::config_path() {
            Some(default_path) if default_path.exists() => Self::from_file(&default_path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: CourtConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::info!("Loaded court config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<CourtLayout, ConfigError> {
        let style = CourtStyle {
            fill_color: self.fill_color,
            line_color: self.line_color,
            sector_line_color: self.sector_line_color,
            point_color: self.point_color,
            line_thickness: self.line_thickness,
            sector_line_thickness: self.sector_line_thickness,
        };
        let spec = CourtSpec::new(self.width, self.height, style, self.attack_line)?;
        let attack = SectorGrid::new(Half::Attack, self.attack_grid.columns, self.attack_grid.rows, &spec)?;
        let defense = SectorGrid::new(Half::Defense, self.defense_grid.columns, self.defense_grid.rows, &spec)?;

        let scale = self.drawing.canvas_scale;
        if scale == 0 || scale > spec.width() || scale > spec.height() {
            return Err(ConfigError::InvalidCanvasScale(scale));
        }
        if self.drawing.stroke_width == 0 {
            return Err(ConfigError::ZeroThickness { what: "drawing stroke" });
        }

        Ok(CourtLayout {
            spec,
            attack,
            defense,
            drawing: self.drawing.clone(),
        })
    }
}
