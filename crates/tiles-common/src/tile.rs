//! Tile coordinates.
//!
//! `x` and `y` are signed so that callers can ask about tiles outside a grid
//! (negative indices, wrapped world copies) and get a clean "no such tile"
//! answer instead of an overflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TilesError;

/// A tile coordinate (z/x/y).
///
/// `z` indexes the levels of a tiling grid, `x` is the tile column and `y` is
/// the tile row counted from the top of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level (index into the grid's tile matrices)
    pub z: u32,
    /// Column (x)
    pub x: i64,
    /// Row (y)
    pub y: i64,
}

impl TileCoord {
    pub fn new(z: u32, x: i64, y: i64) -> Self {
        Self { z, x, y }
    }
}

impl TryFrom<[i64; 3]> for TileCoord {
    type Error = TilesError;

    /// Build a coordinate from `[z, x, y]`; a zoom outside `u32` is rejected.
    fn try_from([z, x, y]: [i64; 3]) -> Result<Self, Self::Error> {
        let z = u32::try_from(z)
            .map_err(|_| TilesError::InvalidTileCoord(format!("zoom {} out of range", z)))?;
        Ok(Self { z, x, y })
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

impl FromStr for TileCoord {
    type Err = TilesError;

    /// Parse a `z/x/y` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != 3 {
            return Err(TilesError::InvalidTileCoord(format!(
                "{}. Expected 'z/x/y'",
                s
            )));
        }
        let invalid = |part: &str| TilesError::InvalidTileCoord(format!("{} in {}", part, s));

        Ok(Self {
            z: parts[0].parse().map_err(|_| invalid(parts[0]))?,
            x: parts[1].parse().map_err(|_| invalid(parts[1]))?,
            y: parts[2].parse().map_err(|_| invalid(parts[2]))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let coord = TileCoord::new(3, 5, 2);
        assert_eq!(coord.to_string(), "3/5/2");
        assert_eq!("3/5/2".parse::<TileCoord>().unwrap(), coord);
        assert_eq!("4/-1/0".parse::<TileCoord>().unwrap(), TileCoord::new(4, -1, 0));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("3/5".parse::<TileCoord>().is_err());
        assert!("a/5/2".parse::<TileCoord>().is_err());
        assert!("-1/5/2".parse::<TileCoord>().is_err());
    }

    #[test]
    fn test_try_from_array() {
        assert_eq!(TileCoord::try_from([3, -1, 7]).unwrap(), TileCoord::new(3, -1, 7));
        assert!(matches!(
            TileCoord::try_from([-1, 0, 0]),
            Err(TilesError::InvalidTileCoord(_))
        ));
        assert!(TileCoord::try_from([1 << 32, 0, 0]).is_err());
    }
}
