use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use super::court::CourtSpec;
use super::error::ConfigError;

/// One side of the center line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    Attack,
    Defense,
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Half::Attack => f.write_str("attack"),
            Half::Defense => f.write_str("defense"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// An interior grid line before thickness is applied.
///
/// `position` is the y of a horizontal line or the x of a vertical one;
/// `span` is the covered range along the other axis (end exclusive).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GridLine {
    pub orientation: Orientation,
    pub position: u32,
    pub span: Range<u32>,
}

/// A 1-indexed `(column, row)` zone of one half.
///
/// Only `SectorGrid::coordinate` builds these, so they are always in range
/// for the grid that produced them.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct SectorCoordinate {
    half: Half,
    column: u32,
    row: u32,
}

impl SectorCoordinate {
    pub fn half(&self) -> Half {
        self.half
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for SectorCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Columns x rows partition of one half court.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SectorGrid {
    half: Half,
    columns: u32,
    rows: u32,
    court_width: u32,
    court_height: u32,
}

impl SectorGrid {
    pub fn new(half: Half, columns: u32, rows: u32, court: &CourtSpec) -> Result<Self, ConfigError> {
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid { half, columns, rows });
        }
        if columns > court.width() || rows > court.half_height() {
            return Err(ConfigError::GridTooDense {
                half,
                columns,
                rows,
                width: court.width(),
                half_height: court.half_height(),
            });
        }
        Ok(Self {
            half,
            columns,
            rows,
            court_width: court.width(),
            court_height: court.height(),
        })
    }

    pub fn half(&self) -> Half {
        self.half
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    fn half_height(&self) -> u32 {
        self.court_height / 2
    }

    pub fn y_origin(&self) -> u32 {
        match self.half {
            Half::Attack => 0,
            Half::Defense => self.half_height(),
        }
    }

    /// Rows of pixels owned by this half (end exclusive).
    pub fn extent(&self) -> Range<u32> {
        match self.half {
            Half::Attack => 0..self.half_height(),
            Half::Defense => self.half_height()..self.court_height,
        }
    }

    pub fn sector_width(&self) -> f64 {
        self.court_width as f64 / self.columns as f64
    }

    pub fn sector_height(&self) -> f64 {
        self.half_height() as f64 / self.rows as f64
    }

    // Integer forms of `i * sector_width` / `i * sector_height`, floored.
    fn column_edge(&self, i: u32) -> u32 {
        (i as u64 * self.court_width as u64 / self.columns as u64) as u32
    }

    fn row_edge(&self, i: u32) -> u32 {
        self.y_origin() + (i as u64 * self.half_height() as u64 / self.rows as u64) as u32
    }

    /// `rows - 1` horizontal lines across the full width, then
    /// `columns - 1` vertical lines limited to this half.
    pub fn interior_lines(&self) -> Vec<GridLine> {
        let horizontal = (1..self.rows).map(|i| GridLine {
            orientation: Orientation::Horizontal,
            position: self.row_edge(i),
            span: 0..self.court_width,
        });
        let vertical = (1..self.columns).map(|i| GridLine {
            orientation: Orientation::Vertical,
            position: self.column_edge(i),
            span: self.extent(),
        });
        horizontal.chain(vertical).collect()
    }

    pub fn coordinate(&self, column: u32, row: u32) -> Result<SectorCoordinate, ConfigError> {
        if (1..=self.columns).contains(&column) && (1..=self.rows).contains(&row) {
            Ok(SectorCoordinate { half: self.half, column, row })
        } else {
            Err(ConfigError::ZoneOutOfRange {
                half: self.half,
                column,
                row,
                columns: self.columns,
                rows: self.rows,
            })
        }
    }

    /// The top-left zone, always present.
    pub fn first(&self) -> SectorCoordinate {
        SectorCoordinate { half: self.half, column: 1, row: 1 }
    }

    /// Pixel rectangle `(x_range, y_range)` of a zone.
    pub fn bounds(&self, zone: SectorCoordinate) -> (Range<u32>, Range<u32>) {
        let last_row_end = self.extent().end;
        let y_end = if zone.row == self.rows { last_row_end } else { self.row_edge(zone.row) };
        (
            self.column_edge(zone.column - 1)..self.column_edge(zone.column),
            self.row_edge(zone.row - 1)..y_end,
        )
    }

    pub fn center(&self, zone: SectorCoordinate) -> (u32, u32) {
        let (xs, ys) = self.bounds(zone);
        ((xs.start + xs.end) / 2, (ys.start + ys.end) / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn court() -> CourtSpec {
        CourtSpec::default()
    }

    #[test]
    fn test_line_counts_match_grid() {
        let grid = SectorGrid::new(Half::Defense, 3, 6, &court()).unwrap();
        let lines = grid.interior_lines();
        let vertical = lines.iter().filter(|l| l.orientation == Orientation::Vertical).count();
        let horizontal = lines.iter().filter(|l| l.orientation == Orientation::Horizontal).count();
        assert_eq!(vertical, 2);
        assert_eq!(horizontal, 5);
    }

    #[test]
    fn test_vertical_lines_evenly_divided() {
        let grid = SectorGrid::new(Half::Attack, 3, 3, &court()).unwrap();
        let xs: Vec<u32> = grid
            .interior_lines()
            .into_iter()
            .filter(|l| l.orientation == Orientation::Vertical)
            .map(|l| l.position)
            .collect();
        assert_eq!(xs, vec![300, 600]);
    }

    #[test]
    fn test_vertical_span_stays_in_half() {
        let attack = SectorGrid::new(Half::Attack, 3, 3, &court()).unwrap();
        let defense = SectorGrid::new(Half::Defense, 3, 6, &court()).unwrap();
        for line in attack.interior_lines() {
            assert!(line.orientation == Orientation::Horizontal || line.span == (0..900));
        }
        for line in defense.interior_lines() {
            if line.orientation == Orientation::Vertical {
                assert_eq!(line.span, 900..1800);
            } else {
                assert!(line.position >= 900);
            }
        }
    }

    #[test]
    fn test_positions_are_floored() {
        // 1000 / 3 = 333.33.., 2000 / 3 = 666.66..
        let spec = CourtSpec::new(1000, 1800, Default::default(), Default::default()).unwrap();
        let grid = SectorGrid::new(Half::Attack, 3, 7, &spec).unwrap();
        let lines = grid.interior_lines();
        let xs: Vec<u32> = lines
            .iter()
            .filter(|l| l.orientation == Orientation::Vertical)
            .map(|l| l.position)
            .collect();
        assert_eq!(xs, vec![333, 666]);
        // 900 / 7 = 128.57..
        assert_eq!(lines[0].position, 128);
        assert_eq!(lines[1].position, 257);
    }

    #[test]
    fn test_zero_sized_grid_rejected() {
        assert_eq!(
            SectorGrid::new(Half::Attack, 0, 3, &court()).unwrap_err(),
            ConfigError::EmptyGrid { half: Half::Attack, columns: 0, rows: 3 }
        );
        assert!(matches!(
            SectorGrid::new(Half::Defense, 3, 901, &court()),
            Err(ConfigError::GridTooDense { .. })
        ));
    }

    #[test]
    fn test_coordinate_range_is_one_indexed() {
        let grid = SectorGrid::new(Half::Defense, 3, 6, &court()).unwrap();
        assert!(grid.coordinate(1, 1).is_ok());
        assert!(grid.coordinate(3, 6).is_ok());
        assert!(grid.coordinate(0, 1).is_err());
        assert!(grid.coordinate(4, 1).is_err());
        assert!(grid.coordinate(1, 7).is_err());
    }

    #[test]
    fn test_zone_bounds_and_center() {
        let grid = SectorGrid::new(Half::Defense, 3, 6, &court()).unwrap();
        let zone = grid.coordinate(1, 4).unwrap();
        assert_eq!(grid.bounds(zone), (0..300, 1350..1500));
        assert_eq!(grid.center(zone), (150, 1425));

        let last = grid.coordinate(3, 6).unwrap();
        assert_eq!(grid.bounds(last), (600..900, 1650..1800));
    }
}
