use crate::must_tile;
use crate::tile::{Tile, tiles_to_string};
use std::fmt;

use anyhow::{Result, ensure};

/// Number of counted tile symbols; reds collapse onto their normal five.
pub const NUM_IDS: usize = 34;

/// Counting bag over deaka'd tile IDs. Counts are signed: element-wise
/// subtraction does not floor at zero, that is the caller's business. The
/// unknown tile cannot be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSet([i16; NUM_IDS]);

impl Default for TileSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSet {
    #[must_use]
    pub const fn new() -> Self {
        Self([0; NUM_IDS])
    }

    /// The full physical set: 4 of each of the 34 real symbols.
    #[must_use]
    pub const fn all() -> Self {
        Self([4; NUM_IDS])
    }

    pub fn from_tiles(tiles: &[Tile]) -> Result<Self> {
        let mut set = Self::new();
        for &tile in tiles {
            set.add(tile, 1)?;
        }
        Ok(set)
    }

    pub fn add(&mut self, tile: Tile, n: i16) -> Result<()> {
        ensure!(!tile.is_unknown(), "a tile set cannot contain unknowns");
        self.0[tile.deaka().as_usize()] += n;
        Ok(())
    }

    pub fn count(&self, tile: Tile) -> Result<i16> {
        ensure!(!tile.is_unknown(), "a tile set does not contain unknowns");
        Ok(self.0[tile.deaka().as_usize()])
    }

    pub fn has(&self, tile: Tile) -> Result<bool> {
        Ok(self.count(tile)? > 0)
    }

    /// Element-wise subtraction, without flooring at zero.
    pub fn remove_set(&mut self, other: &Self) {
        for (count, &sub) in self.0.iter_mut().zip(other.0.iter()) {
            *count -= sub;
        }
    }

    /// Expands to a tile list in ID order. Negative counts contribute
    /// nothing.
    #[must_use]
    pub fn to_tiles(&self) -> Vec<Tile> {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(id, &count)| {
                std::iter::repeat_n(must_tile!(id), count.max(0) as usize)
            })
            .collect()
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&tiles_to_string(&self.to_tiles()))
    }
}
