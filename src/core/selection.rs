use std::fmt;

use super::sectors::SectorCoordinate;

/// A point: where the attack started and where the ball landed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PointRecord {
    pub attack: SectorCoordinate,
    pub defense: SectorCoordinate,
}

impl PointRecord {
    pub fn new(attack: SectorCoordinate, defense: SectorCoordinate) -> Self {
        Self { attack, defense }
    }
}

impl fmt::Display for PointRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attacco da: Zona {}, Caduta in: Zona {}", self.attack, self.defense)
    }
}

/// Parse a `column,row` pair as typed on the command line.
pub fn parse_zone_pair(s: &str) -> Result<(u32, u32), String> {
    let (column, row) = s
        .split_once(',')
        .ok_or_else(|| format!("expected COLUMN,ROW, got {:?}", s))?;
    let column = column.trim().parse::<u32>().map_err(|e| format!("bad column {:?}: {}", column, e))?;
    let row = row.trim().parse::<u32>().map_err(|e| format!("bad row {:?}: {}", row, e))?;
    Ok((column, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::court::CourtSpec;
    use crate::core::sectors::{Half, SectorGrid};

    #[test]
    fn test_record_message() {
        let court = CourtSpec::default();
        let attack = SectorGrid::new(Half::Attack, 3, 3, &court).unwrap();
        let defense = SectorGrid::new(Half::Defense, 3, 6, &court).unwrap();

        let record = PointRecord::new(attack.coordinate(2, 1).unwrap(), defense.coordinate(1, 4).unwrap());
        assert_eq!(record.to_string(), "Attacco da: Zona (2, 1), Caduta in: Zona (1, 4)");
    }

    #[test]
    fn test_parse_zone_pair() {
        assert_eq!(parse_zone_pair("2,1"), Ok((2, 1)));
        assert_eq!(parse_zone_pair(" 3 , 6 "), Ok((3, 6)));
        assert!(parse_zone_pair("3").is_err());
        assert!(parse_zone_pair("a,1").is_err());
    }
}
