use crate::tile::{Tile, tiles_to_string};
use std::fmt;

use serde::Serialize;

/// A grouped set of tiles as it appears in a decomposed hand: a run, a
/// triplet, a quad or a pair.
///
/// Values are produced from a validated [`Fuuro`](crate::fuuro::Fuuro) (or
/// by a hand decomposer) and carry no validation of their own; they trust
/// their producer and keep its canonical tile order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "pais", rename_all = "snake_case")]
pub enum Mentsu {
    Shuntsu([Tile; 3]),
    Kotsu([Tile; 3]),
    Kantsu([Tile; 4]),
    Toitsu([Tile; 2]),
}

impl Mentsu {
    #[must_use]
    pub fn pais(&self) -> &[Tile] {
        match self {
            Self::Shuntsu(pais) | Self::Kotsu(pais) => pais,
            Self::Kantsu(pais) => pais,
            Self::Toitsu(pais) => pais,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Shuntsu(_) => "shuntsu",
            Self::Kotsu(_) => "kotsu",
            Self::Kantsu(_) => "kantsu",
            Self::Toitsu(_) => "toitsu",
        }
    }
}

impl fmt::Display for Mentsu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}]", self.name(), tiles_to_string(self.pais()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::t;

    #[test]
    fn display() {
        assert_eq!(
            Mentsu::Shuntsu(t![1m, 2m, 3m]).to_string(),
            "shuntsu: [1m 2m 3m]"
        );
        assert_eq!(Mentsu::Kotsu(t![E, E, E]).to_string(), "kotsu: [E E E]");
        assert_eq!(
            Mentsu::Kantsu(t![5p, 5p, 5pr, 5p]).to_string(),
            "kantsu: [5p 5p 5pr 5p]"
        );
        assert_eq!(Mentsu::Toitsu(t![C, C]).to_string(), "toitsu: [C C]");
    }

    #[test]
    fn pais() {
        assert_eq!(Mentsu::Shuntsu(t![7s, 8s, 9s]).pais(), t![7s, 8s, 9s]);
        assert_eq!(Mentsu::Toitsu(t![N, N]).pais().len(), 2);
        assert_eq!(Mentsu::Kantsu(t![1m, 1m, 1m, 1m]).name(), "kantsu");
    }
}
