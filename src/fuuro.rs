use crate::mentsu::Mentsu;
use crate::tile::Tile;

use anyhow::{Result, ensure};
use serde::Serialize;
use tinyvec::ArrayVec;

const NUM_PLAYERS: u8 = 4;

fn sorted_pais<const N: usize>(tiles: [Tile; N]) -> ArrayVec<[Tile; 4]> {
    let mut pais: ArrayVec<[Tile; 4]> = tiles.into_iter().collect();
    pais.sort();
    pais
}

/// A claimed run: the discarded `taken` tile plus two hand tiles, only ever
/// from the seat to the actor's left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chi {
    taken: Tile,
    consumed: [Tile; 2],
    target: u8,
    pais: ArrayVec<[Tile; 4]>,
}

impl Chi {
    pub fn new(actor: u8, target: u8, taken: Tile, consumed: [Tile; 2]) -> Result<Self> {
        ensure!(actor < NUM_PLAYERS, "chi: invalid actor index: {actor}");
        ensure!(target < NUM_PLAYERS, "chi: invalid target index: {target}");
        ensure!(
            target == (actor + 3) % 4,
            "chi: target {target} is not the seat to the left of actor {actor}"
        );

        let tiles = [taken, consumed[0], consumed[1]];
        for tile in tiles {
            ensure!(!tile.is_unknown(), "chi: unknown tile");
            ensure!(!tile.is_jihai(), "chi: honor tile {tile}");
            ensure!(
                tile.kind() == taken.kind(),
                "chi: {tile} does not match the suit of {taken}"
            );
        }

        let pais = sorted_pais(tiles);
        ensure!(
            pais[1].num() == pais[0].num() + 1 && pais[2].num() == pais[1].num() + 1,
            "chi: {} {} {} do not form a run",
            pais[0],
            pais[1],
            pais[2]
        );

        Ok(Self {
            taken,
            consumed,
            target,
            pais,
        })
    }

    #[must_use]
    pub const fn taken(&self) -> Tile {
        self.taken
    }
    #[must_use]
    pub const fn consumed(&self) -> &[Tile; 2] {
        &self.consumed
    }
    #[must_use]
    pub const fn target(&self) -> u8 {
        self.target
    }
    #[must_use]
    pub fn pais(&self) -> &[Tile] {
        &self.pais
    }
}

/// A claimed triplet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pon {
    taken: Tile,
    consumed: [Tile; 2],
    target: u8,
    pais: ArrayVec<[Tile; 4]>,
}

impl Pon {
    pub fn new(actor: u8, target: u8, taken: Tile, consumed: [Tile; 2]) -> Result<Self> {
        ensure!(actor < NUM_PLAYERS, "pon: invalid actor index: {actor}");
        ensure!(target < NUM_PLAYERS, "pon: invalid target index: {target}");
        ensure!(target != actor, "pon: cannot take from own discard");
        ensure!(!taken.is_unknown(), "pon: unknown taken tile");
        for tile in consumed {
            ensure!(
                tile.has_same_symbol(taken),
                "pon: consumed {tile} does not match taken {taken}"
            );
        }

        Ok(Self {
            taken,
            consumed,
            target,
            pais: sorted_pais([taken, consumed[0], consumed[1]]),
        })
    }

    #[must_use]
    pub const fn taken(&self) -> Tile {
        self.taken
    }
    #[must_use]
    pub const fn consumed(&self) -> &[Tile; 2] {
        &self.consumed
    }
    #[must_use]
    pub const fn target(&self) -> u8 {
        self.target
    }
    #[must_use]
    pub fn pais(&self) -> &[Tile] {
        &self.pais
    }
}

/// A quad completed by claiming a discard; the actor must draw a
/// replacement tile before discarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Daiminkan {
    taken: Tile,
    consumed: [Tile; 3],
    target: u8,
    pais: ArrayVec<[Tile; 4]>,
}

impl Daiminkan {
    pub fn new(actor: u8, target: u8, taken: Tile, consumed: [Tile; 3]) -> Result<Self> {
        ensure!(actor < NUM_PLAYERS, "daiminkan: invalid actor index: {actor}");
        ensure!(target < NUM_PLAYERS, "daiminkan: invalid target index: {target}");
        ensure!(target != actor, "daiminkan: cannot take from own discard");
        ensure!(!taken.is_unknown(), "daiminkan: unknown taken tile");
        for tile in consumed {
            ensure!(
                tile.has_same_symbol(taken),
                "daiminkan: consumed {tile} does not match taken {taken}"
            );
        }

        Ok(Self {
            taken,
            consumed,
            target,
            pais: sorted_pais([taken, consumed[0], consumed[1], consumed[2]]),
        })
    }

    #[must_use]
    pub const fn taken(&self) -> Tile {
        self.taken
    }
    #[must_use]
    pub const fn consumed(&self) -> &[Tile; 3] {
        &self.consumed
    }
    #[must_use]
    pub const fn target(&self) -> u8 {
        self.target
    }
    #[must_use]
    pub fn pais(&self) -> &[Tile] {
        &self.pais
    }
}

/// A self-declared concealed quad. Takes nothing from anyone and keeps the
/// hand concealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ankan {
    consumed: [Tile; 4],
    pais: ArrayVec<[Tile; 4]>,
}

impl Ankan {
    pub fn new(consumed: [Tile; 4]) -> Result<Self> {
        for tile in consumed {
            ensure!(!tile.is_unknown(), "ankan: unknown tile");
            ensure!(
                tile.has_same_symbol(consumed[0]),
                "ankan: {tile} does not match {}",
                consumed[0]
            );
        }

        Ok(Self {
            consumed,
            pais: sorted_pais(consumed),
        })
    }

    #[must_use]
    pub const fn consumed(&self) -> &[Tile; 4] {
        &self.consumed
    }
    #[must_use]
    pub fn pais(&self) -> &[Tile] {
        &self.pais
    }
}

/// A quad made by adding a drawn tile onto an earlier pon.
///
/// `taken` and `target` describe the original pon, and may be unresolved
/// when the value is built from call data alone; `Player::kakan` restores
/// them from the seat's meld list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kakan {
    taken: Option<Tile>,
    consumed: [Tile; 2],
    added: Tile,
    target: Option<u8>,
    pais: ArrayVec<[Tile; 4]>,
}

impl Kakan {
    pub fn new(taken: Tile, consumed: [Tile; 2], added: Tile, target: u8) -> Result<Self> {
        ensure!(target < NUM_PLAYERS, "kakan: invalid target index: {target}");
        Self::validate_symbols(Some(taken), consumed, added)?;

        Ok(Self {
            taken: Some(taken),
            consumed,
            added,
            target: Some(target),
            pais: sorted_pais([taken, consumed[0], consumed[1], added]),
        })
    }

    /// Builds a kakan from call data: the added tile plus the three tiles of
    /// the pon meld. Which of the three was originally taken is not part of
    /// the call, so the last one stands in for it and the target stays
    /// unresolved.
    pub fn from_call(added: Tile, consumed: [Tile; 3]) -> Result<Self> {
        Self::validate_symbols(Some(consumed[2]), [consumed[0], consumed[1]], added)?;

        Ok(Self {
            taken: Some(consumed[2]),
            consumed: [consumed[0], consumed[1]],
            added,
            target: None,
            pais: sorted_pais([added, consumed[0], consumed[1], consumed[2]]),
        })
    }

    /// Seat-side resolution: upgrades an existing pon, preserving its taken
    /// tile and target.
    pub fn upgrade(pon: &Pon, added: Tile) -> Result<Self> {
        ensure!(
            added.has_same_symbol(pon.taken()),
            "kakan: added {added} does not match pon of {}",
            pon.taken()
        );

        Ok(Self {
            taken: Some(pon.taken()),
            consumed: *pon.consumed(),
            added,
            target: Some(pon.target()),
            pais: sorted_pais([pon.taken(), pon.consumed()[0], pon.consumed()[1], added]),
        })
    }

    fn validate_symbols(taken: Option<Tile>, consumed: [Tile; 2], added: Tile) -> Result<()> {
        ensure!(!added.is_unknown(), "kakan: unknown added tile");
        for tile in taken.into_iter().chain(consumed) {
            ensure!(
                tile.has_same_symbol(added),
                "kakan: {tile} does not match added {added}"
            );
        }
        Ok(())
    }

    #[must_use]
    pub const fn taken(&self) -> Option<Tile> {
        self.taken
    }
    #[must_use]
    pub const fn consumed(&self) -> &[Tile; 2] {
        &self.consumed
    }
    #[must_use]
    pub const fn added(&self) -> Tile {
        self.added
    }
    #[must_use]
    pub const fn target(&self) -> Option<u8> {
        self.target
    }
    #[must_use]
    pub fn pais(&self) -> &[Tile] {
        &self.pais
    }
}

/// Every way a meld can be acquired. Closed: matching on it is exhaustive,
/// so a new call shape cannot be added without the compiler pointing at
/// every place that must handle it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fuuro {
    Chi(Chi),
    Pon(Pon),
    Daiminkan(Daiminkan),
    Ankan(Ankan),
    Kakan(Kakan),
}

impl Fuuro {
    /// The claimed tile; a concealed quad claims nothing, and a kakan built
    /// from call data may not know which tile its pon once took.
    #[must_use]
    pub const fn taken(&self) -> Option<Tile> {
        match self {
            Self::Chi(f) => Some(f.taken),
            Self::Pon(f) => Some(f.taken),
            Self::Daiminkan(f) => Some(f.taken),
            Self::Ankan(_) => None,
            Self::Kakan(f) => f.taken,
        }
    }

    /// Tiles surrendered from the actor's own hand.
    #[must_use]
    pub fn consumed(&self) -> &[Tile] {
        match self {
            Self::Chi(f) => &f.consumed,
            Self::Pon(f) => &f.consumed,
            Self::Daiminkan(f) => &f.consumed,
            Self::Ankan(f) => &f.consumed,
            Self::Kakan(f) => &f.consumed,
        }
    }

    #[must_use]
    pub const fn target(&self) -> Option<u8> {
        match self {
            Self::Chi(f) => Some(f.target),
            Self::Pon(f) => Some(f.target),
            Self::Daiminkan(f) => Some(f.target),
            Self::Ankan(_) => None,
            Self::Kakan(f) => f.target,
        }
    }

    /// Canonical sorted tile list of the whole meld.
    #[must_use]
    pub fn pais(&self) -> &[Tile] {
        match self {
            Self::Chi(f) => &f.pais,
            Self::Pon(f) => &f.pais,
            Self::Daiminkan(f) => &f.pais,
            Self::Ankan(f) => &f.pais,
            Self::Kakan(f) => &f.pais,
        }
    }

    #[must_use]
    pub fn to_mentsu(&self) -> Mentsu {
        let pais = self.pais();
        match self {
            Self::Chi(_) => Mentsu::Shuntsu([pais[0], pais[1], pais[2]]),
            Self::Pon(_) => Mentsu::Kotsu([pais[0], pais[1], pais[2]]),
            Self::Daiminkan(_) | Self::Ankan(_) | Self::Kakan(_) => {
                Mentsu::Kantsu([pais[0], pais[1], pais[2], pais[3]])
            }
        }
    }

    /// Whether discarding `dahai` right after taking this meld would be a
    /// forbidden swap call (kuikae).
    ///
    /// Discarding the claimed symbol itself is always a swap. Beyond that
    /// only a chi taken at one end of its run forbids the suji tile three
    /// away on the open side; a kanchan chi and all pon/kan have no suji
    /// swap.
    #[must_use]
    pub fn is_kuikae(&self, dahai: Tile) -> bool {
        let claimed = match self.taken() {
            Some(taken) => taken,
            None => self.pais()[0],
        };
        if dahai.has_same_symbol(claimed) {
            return true;
        }

        let Self::Chi(chi) = self else {
            return false;
        };

        let pais = chi.pais();
        if dahai.kind() != pais[0].kind() {
            return false;
        }
        if chi.taken().num() == pais[1].num() {
            // Kanchan: the run was completed in the middle.
            return false;
        }

        let num = dahai.num();
        num > 3 && num - 3 == pais[0].num() || num < 7 && num + 3 == pais[2].num()
    }
}

impl From<Chi> for Fuuro {
    fn from(f: Chi) -> Self {
        Self::Chi(f)
    }
}
impl From<Pon> for Fuuro {
    fn from(f: Pon) -> Self {
        Self::Pon(f)
    }
}
impl From<Daiminkan> for Fuuro {
    fn from(f: Daiminkan) -> Self {
        Self::Daiminkan(f)
    }
}
impl From<Ankan> for Fuuro {
    fn from(f: Ankan) -> Self {
        Self::Ankan(f)
    }
}
impl From<Kakan> for Fuuro {
    fn from(f: Kakan) -> Self {
        Self::Kakan(f)
    }
}
