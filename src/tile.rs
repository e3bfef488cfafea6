use crate::{t, tu8};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) const MJAI_PAI_STRINGS_LEN: usize = 3 * 9 + 4 + 3 + 3 + 1;
pub(crate) const MJAI_PAI_STRINGS: [&str; MJAI_PAI_STRINGS_LEN] = [
    "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", // m
    "1p", "2p", "3p", "4p", "5p", "6p", "7p", "8p", "9p", // p
    "1s", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s", // s
    "E", "S", "W", "N", "P", "F", "C", // z
    "5mr", "5pr", "5sr", // aka
    "?",   // unknown
];

static MJAI_PAI_STRINGS_MAP: LazyLock<AHashMap<&'static str, Tile>> = LazyLock::new(|| {
    MJAI_PAI_STRINGS
        .iter()
        .enumerate()
        .map(|(id, &s)| (s, Tile::try_from(id).unwrap()))
        .collect()
});

/// One of the 37 distinguishable tiles, or the unknown placeholder.
///
/// IDs 0..=33 are the 34 real symbols in mjai order, 34..=36 the red fives
/// and 37 the unknown tile.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(u8);

/// Suit of a tile, or its honor/unknown category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Man,
    Pin,
    Sou,
    Honor,
    Unknown,
}

#[derive(Debug)]
pub enum InvalidTile {
    Number(usize),
    String(String),
    Parts {
        kind: TileKind,
        num: u8,
        is_red: bool,
    },
}

impl Tile {
    /// # Safety
    /// Calling this method with an out-of-bounds tile ID is undefined behavior.
    #[inline]
    #[must_use]
    pub const fn new_unchecked(id: u8) -> Self {
        Self(id)
    }

    /// Builds a tile from its suit, number and red flag. Red is only valid
    /// on a suited 5; honors pass `TileKind::Honor` with 1..=7 in E S W N P
    /// F C order.
    pub const fn from_parts(kind: TileKind, num: u8, is_red: bool) -> Result<Self, InvalidTile> {
        let err = InvalidTile::Parts { kind, num, is_red };
        let kind_idx = match kind {
            TileKind::Man => 0,
            TileKind::Pin => 1,
            TileKind::Sou => 2,
            TileKind::Honor => {
                if num < 1 || num > 7 || is_red {
                    return Err(err);
                }
                return Ok(Self(3 * 9 + num - 1));
            }
            TileKind::Unknown => return Err(err),
        };
        if num < 1 || num > 9 {
            return Err(err);
        }
        if is_red {
            if num != 5 {
                return Err(err);
            }
            return Ok(Self(3 * 9 + 4 + 3 + kind_idx));
        }
        Ok(Self(kind_idx * 9 + num - 1))
    }

    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn kind(self) -> TileKind {
        match self.deaka().0 / 9 {
            0 => TileKind::Man,
            1 => TileKind::Pin,
            2 => TileKind::Sou,
            3 => TileKind::Honor,
            _ => TileKind::Unknown,
        }
    }

    /// 1..=9 for suits, 1..=7 for honors, 0 for the unknown tile.
    #[inline]
    #[must_use]
    pub const fn num(self) -> u8 {
        match self.deaka().0 {
            id @ 0..=26 => id % 9 + 1,
            id @ 27..=33 => id - 27 + 1,
            _ => 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn deaka(self) -> Self {
        match self.0 {
            tu8!(5mr) => t!(5m),
            tu8!(5pr) => t!(5p),
            tu8!(5sr) => t!(5s),
            _ => self,
        }
    }

    #[inline]
    #[must_use]
    pub const fn akaize(self) -> Self {
        match self.0 {
            tu8!(5m) => t!(5mr),
            tu8!(5p) => t!(5pr),
            tu8!(5s) => t!(5sr),
            _ => self,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_aka(self) -> bool {
        matches!(self.0, 34..=36)
    }

    #[inline]
    #[must_use]
    pub const fn is_jihai(self) -> bool {
        matches!(self.0, 27..=33)
    }

    /// Terminal or honor.
    #[inline]
    #[must_use]
    pub const fn is_yaokyuu(self) -> bool {
        match self.deaka().0 {
            id @ 0..=26 => id % 9 == 0 || id % 9 == 8,
            27..=33 => true,
            _ => false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.0 >= tu8!(?)
    }

    /// Red-insensitive symbol equality.
    #[inline]
    #[must_use]
    pub const fn has_same_symbol(self, other: Self) -> bool {
        self.deaka().0 == other.deaka().0
    }

    /// The dora indicated by this tile: suits wrap 9 to 1, winds cycle
    /// E S W N, dragons cycle P F C. The unknown tile maps to itself.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        if self.is_unknown() {
            return self;
        }
        let tile = self.deaka();
        let kind = tile.0 / 9;
        let num = tile.0 % 9;

        if kind < 3 {
            Self(kind * 9 + (num + 1) % 9)
        } else if num < 4 {
            Self(3 * 9 + (num + 1) % 4)
        } else {
            Self(3 * 9 + 4 + (num - 4 + 1) % 3)
        }
    }

    /// Shifts a suited tile by `n` within its suit, never crossing the 1..=9
    /// bounds. Honors and unknown tiles have no neighbors, whatever `n` is.
    /// The result is always a non-red tile.
    #[must_use]
    pub const fn offset(self, n: i8) -> Option<Self> {
        if self.is_unknown() || self.is_jihai() {
            return None;
        }
        let tile = self.deaka();
        let num = (tile.0 % 9) as i16 + 1 + n as i16;
        if 1 <= num && num <= 9 {
            Some(Self(tile.0 / 9 * 9 + num as u8 - 1))
        } else {
            None
        }
    }

    /// Sort key: suit-major, number-minor, a red five strictly between its
    /// normal five and six, honors after all suits, unknown last.
    const fn order_key(self) -> u8 {
        match self.0 {
            id @ 0..=4 => id,        // 1m-5m
            tu8!(5mr) => 5,
            id @ 5..=13 => id + 1,   // 6m-5p
            tu8!(5pr) => 15,
            id @ 14..=22 => id + 2,  // 6p-5s
            tu8!(5sr) => 25,
            id @ 23..=33 => id + 3,  // 6s-C
            _ => 40,                 // ?
        }
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for Tile {
    fn default() -> Self {
        t!(?)
    }
}

impl TryFrom<u8> for Tile {
    type Error = InvalidTile;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::try_from(v as usize)
    }
}

impl TryFrom<usize> for Tile {
    type Error = InvalidTile;

    fn try_from(v: usize) -> Result<Self, Self::Error> {
        if v >= MJAI_PAI_STRINGS_LEN {
            Err(InvalidTile::Number(v))
        } else {
            Ok(Self(v as u8))
        }
    }
}

impl FromStr for Tile {
    type Err = InvalidTile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MJAI_PAI_STRINGS_MAP
            .get(s)
            .copied()
            .ok_or_else(|| InvalidTile::String(s.to_owned()))
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MJAI_PAI_STRINGS[self.0 as usize])
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Man => 'm',
            Self::Pin => 'p',
            Self::Sou => 's',
            Self::Honor => 't',
            Self::Unknown => '?',
        };
        write!(f, "{c}")
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tile = String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)?;
        Ok(tile)
    }
}

impl Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl fmt::Display for InvalidTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not a valid tile: ")?;
        match self {
            Self::Number(n) => fmt::Display::fmt(n, f),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Parts { kind, num, is_red } => {
                write!(f, "kind {kind}, num {num}, red {is_red}")
            }
        }
    }
}

impl Error for InvalidTile {}

/// Space-joined tile names, the notation used across error messages and
/// tests.
#[must_use]
pub fn tiles_to_string(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(Tile::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses whitespace-separated tile names, e.g. `"1m 2m 3m E 5pr"`.
pub fn tiles_from_str(s: &str) -> Result<Vec<Tile>, InvalidTile> {
    s.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::must_tile;
    use rand::seq::SliceRandom;

    #[test]
    fn convert() {
        "E".parse::<Tile>().unwrap();
        "5mr".parse::<Tile>().unwrap();
        "?".parse::<Tile>().unwrap();
        Tile::try_from(0_u8).unwrap();
        Tile::try_from(36_u8).unwrap();
        Tile::try_from(37_u8).unwrap();

        "".parse::<Tile>().unwrap_err();
        "0s".parse::<Tile>().unwrap_err();
        "!".parse::<Tile>().unwrap_err();
        Tile::try_from(38_u8).unwrap_err();
        Tile::try_from(u8::MAX).unwrap_err();
    }

    #[test]
    fn constructors_agree() {
        for (id, &name) in MJAI_PAI_STRINGS.iter().enumerate() {
            let by_id = must_tile!(id);
            let by_name: Tile = name.parse().unwrap();
            assert_eq!(by_id, by_name);
            assert_eq!(by_id.to_string(), name);

            if !by_id.is_unknown() {
                let by_parts =
                    Tile::from_parts(by_id.kind(), by_id.num(), by_id.is_aka()).unwrap();
                assert_eq!(by_id, by_parts);
            }
        }
    }

    #[test]
    fn from_parts_rejects() {
        Tile::from_parts(TileKind::Unknown, 1, false).unwrap_err();
        Tile::from_parts(TileKind::Man, 0, false).unwrap_err();
        Tile::from_parts(TileKind::Man, 10, false).unwrap_err();
        Tile::from_parts(TileKind::Honor, 8, false).unwrap_err();
        Tile::from_parts(TileKind::Honor, 5, true).unwrap_err();
        Tile::from_parts(TileKind::Pin, 4, true).unwrap_err();
        assert_eq!(Tile::from_parts(TileKind::Honor, 7, false).unwrap(), t!(C));
        assert_eq!(Tile::from_parts(TileKind::Sou, 5, true).unwrap(), t!(5sr));
    }

    #[test]
    fn same_symbol() {
        for &name in &MJAI_PAI_STRINGS {
            let tile: Tile = name.parse().unwrap();
            assert!(tile.has_same_symbol(tile));
        }
        assert!(t!(5m).has_same_symbol(t!(5mr)));
        assert!(t!(5mr).has_same_symbol(t!(5m)));
        assert!(!t!(5m).has_same_symbol(t!(5p)));
        assert!(!t!(1m).has_same_symbol(t!(2m)));
        assert!(!t!(E).has_same_symbol(t!(S)));
        assert!(!t!(E).has_same_symbol(t!(?)));
    }

    #[test]
    fn sort_order() {
        let mut tiles: Vec<Tile> = [
            "?", "5sr", "5pr", "5mr", "C", "F", "P", "N", "W", "S", "E", "9s", "8s", "7s",
            "6s", "5s", "4s", "3s", "2s", "1s", "9p", "8p", "7p", "6p", "5p", "4p", "3p",
            "2p", "1p", "9m", "8m", "7m", "6m", "5m", "4m", "3m", "2m", "1m",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
        tiles.sort();
        let expected = "1m 2m 3m 4m 5m 5mr 6m 7m 8m 9m \
                        1p 2p 3p 4p 5p 5pr 6p 7p 8p 9p \
                        1s 2s 3s 4s 5s 5sr 6s 7s 8s 9s \
                        E S W N P F C ?";
        assert_eq!(tiles_to_string(&tiles), expected);
    }

    #[test]
    fn sort_full_wall() {
        // 136 physical tiles: 4 of each symbol, one 5 per suit being red.
        let mut wall = Vec::with_capacity(136);
        for id in 0..34_u8 {
            let tile = must_tile!(id);
            wall.extend([tile; 4]);
            if tile.akaize().is_aka() {
                wall.pop();
                wall.push(tile.akaize());
            }
        }
        wall.shuffle(&mut rand::rng());
        wall.sort();

        let mut expected = Vec::with_capacity(136);
        for id in 0..34_u8 {
            let tile = must_tile!(id);
            if tile.akaize().is_aka() {
                expected.extend([tile; 3]);
                expected.push(tile.akaize());
            } else {
                expected.extend([tile; 4]);
            }
        }
        assert_eq!(wall, expected);
    }

    #[test]
    fn dora_next() {
        assert_eq!(t!(4m).next(), t!(5m));
        assert_eq!(t!(9m).next(), t!(1m));
        assert_eq!(t!(9p).next(), t!(1p));
        assert_eq!(t!(9s).next(), t!(1s));
        assert_eq!(t!(E).next(), t!(S));
        assert_eq!(t!(S).next(), t!(W));
        assert_eq!(t!(W).next(), t!(N));
        assert_eq!(t!(N).next(), t!(E));
        assert_eq!(t!(P).next(), t!(F));
        assert_eq!(t!(F).next(), t!(C));
        assert_eq!(t!(C).next(), t!(P));
        assert_eq!(t!(5mr).next(), t!(6m));
        assert_eq!(t!(?).next(), t!(?));
    }

    #[test]
    fn offset() {
        assert_eq!(t!(1m).offset(0), Some(t!(1m)));
        assert_eq!(t!(1m).offset(8), Some(t!(9m)));
        assert_eq!(t!(1m).offset(9), None);
        assert_eq!(t!(1m).offset(-1), None);
        assert_eq!(t!(9s).offset(1), None);
        assert_eq!(t!(9s).offset(-8), Some(t!(1s)));
        assert_eq!(t!(5p).offset(2), Some(t!(7p)));
        // Offsetting a red five always lands on plain tiles.
        assert_eq!(t!(5mr).offset(0), Some(t!(5m)));
        assert_eq!(t!(5pr).offset(1), Some(t!(6p)));
        for honor in t![E, S, W, N, P, F, C, ?] {
            assert_eq!(honor.offset(0), None);
            assert_eq!(honor.offset(1), None);
            assert_eq!(honor.offset(-1), None);
        }
    }

    #[test]
    fn aka_round_trip() {
        assert_eq!(t!(5m).akaize(), t!(5mr));
        assert_eq!(t!(5mr).deaka(), t!(5m));
        assert_eq!(t!(5sr).akaize(), t!(5sr));
        assert_eq!(t!(4m).akaize(), t!(4m));
        assert_eq!(t!(E).akaize(), t!(E));
        assert_eq!(t!(E).deaka(), t!(E));
        assert_eq!(t!(?).akaize(), t!(?));
        assert_eq!(t!(?).deaka(), t!(?));
    }

    #[test]
    fn classification() {
        for tile in t![1m, 9m, 1p, 9p, 1s, 9s, E, S, W, N, P, F, C] {
            assert!(tile.is_yaokyuu(), "{tile}");
        }
        for tile in t![2m, 5m, 5mr, 8s, 5pr] {
            assert!(!tile.is_yaokyuu(), "{tile}");
        }
        assert!(!t!(?).is_yaokyuu());
        assert!(t!(E).is_jihai());
        assert!(!t!(1m).is_jihai());
        assert!(!t!(?).is_jihai());
        assert_eq!(t!(5pr).kind(), TileKind::Pin);
        assert_eq!(t!(C).kind(), TileKind::Honor);
        assert_eq!(t!(?).kind(), TileKind::Unknown);
        assert_eq!(t!(C).num(), 7);
        assert_eq!(t!(5sr).num(), 5);
        assert_eq!(t!(?).num(), 0);
    }

    #[test]
    fn serde_round_trip() {
        for &name in &MJAI_PAI_STRINGS {
            let tile: Tile = name.parse().unwrap();
            let json = serde_json::to_string(&tile).unwrap();
            assert_eq!(json, format!("\"{name}\""));
            let back: Tile = serde_json::from_str(&json).unwrap();
            assert_eq!(back, tile);
        }
        serde_json::from_str::<Tile>("\"0m\"").unwrap_err();
    }

    #[test]
    fn string_helpers() {
        let tiles = tiles_from_str("1m 5pr  C ?").unwrap();
        assert_eq!(tiles, t![1m, 5pr, C, ?]);
        assert_eq!(tiles_to_string(&tiles), "1m 5pr C ?");
        assert_eq!(tiles_to_string(&[]), "");
        tiles_from_str("1m xx").unwrap_err();
    }
}
