use super::config::{CourtConfig, CourtLayout};
use super::error::ConfigError;
use super::sectors::{Half, SectorCoordinate};
use super::selection::PointRecord;
use crate::renderer::court::{CourtRenderer, RenderedCourt};

/// Transient state of one interactive session: the validated layout, the
/// two zone selections and the last recorded point.
///
/// Nothing is cached; `render` rebuilds the image from the current state.
pub struct CourtSession {
    layout: CourtLayout,
    attack: SectorCoordinate,
    defense: SectorCoordinate,
    last_record: Option<PointRecord>,
}

impl CourtSession {
    pub fn new(config: &CourtConfig) -> Result<Self, ConfigError> {
        let layout = config.validate()?;
        Ok(Self {
            attack: layout.attack.first(),
            defense: layout.defense.first(),
            last_record: None,
            layout,
        })
    }

    pub fn layout(&self) -> &CourtLayout {
        &self.layout
    }

    pub fn selection(&self, half: Half) -> SectorCoordinate {
        match half {
            Half::Attack => self.attack,
            Half::Defense => self.defense,
        }
    }

    /// Swap in a new configuration. Selections that still exist in the new
    /// grids are kept, others fall back to zone (1, 1). On error the
    /// session is left untouched.
    pub fn reconfigure(&mut self, config: &CourtConfig) -> Result<(), ConfigError> {
        let layout = config.validate()?;
        let keep = |zone: SectorCoordinate, half: Half| {
            let grid = layout.grid(half);
            grid.coordinate(zone.column(), zone.row()).unwrap_or_else(|_| grid.first())
        };
        self.attack = keep(self.attack, Half::Attack);
        self.defense = keep(self.defense, Half::Defense);
        self.last_record = None;
        self.layout = layout;
        log::info!(
            "Court reconfigured: {}x{}",
            self.layout.spec.width(),
            self.layout.spec.height()
        );
        Ok(())
    }

    pub fn select(&mut self, half: Half, column: u32, row: u32) -> Result<SectorCoordinate, ConfigError> {
        let zone = self.layout.grid(half).coordinate(column, row)?;
        match half {
            Half::Attack => self.attack = zone,
            Half::Defense => self.defense = zone,
        }
        Ok(zone)
    }

    pub fn record_point(&mut self) -> PointRecord {
        let record = PointRecord::new(self.attack, self.defense);
        log::info!("{}", record);
        self.last_record = Some(record);
        record
    }

    pub fn last_record(&self) -> Option<&PointRecord> {
        self.last_record.as_ref()
    }

    pub fn render(&self) -> RenderedCourt {
        CourtRenderer::new(self.layout.spec).render(&self.layout, self.last_record.as_ref())
    }
}
