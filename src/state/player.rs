use crate::fuuro::{Ankan, Chi, Daiminkan, Fuuro, Kakan, Pon};
use crate::tile::{Tile, tiles_to_string};

use anyhow::{Context, Result, bail, ensure};
use log::trace;
use serde::Serialize;

pub const MAX_PLAYER_ID: u8 = 3;
pub const INIT_TEHAIS_LEN: usize = 13;
pub const MAX_FUUROS: usize = 4;
/// Riichi stake.
pub const KYOTAKU_POINT: i32 = 1000;

// Reference: <https://note.com/daku_longyi/n/n51fe08566f1b>
const MAX_HO_LEN: usize = 24;
const MAX_SUTEHAIS_LEN: usize = 27;

/// Reach progress of a seat. Strictly monotonic within a hand: it never
/// moves backwards until the next deal resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ReachState {
    #[default]
    NotReach,
    Declared,
    Accepted,
}

/// One seat's complete rule-relevant state, mutated exclusively through the
/// per-action operations below. Every operation checks its preconditions
/// before touching anything, so a failed call leaves the seat unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// 0 is the initial dealer, counting counter-clockwise.
    id: u8,
    name: String,
    /// Hand excluding melds, sorted; after a draw the drawn tile sits last.
    tehais: Vec<Tile>,
    fuuros: Vec<Fuuro>,
    /// River: discards still lying in front of the seat. Claimed discards
    /// are removed.
    ho: Vec<Tile>,
    /// Every discard ever made, claimed ones included.
    sutehais: Vec<Tile>,
    /// Tiles safe against this seat beyond the river itself: same-turn
    /// passes, and everything discarded after an accepted reach.
    extra_anpais: Vec<Tile>,
    reach_state: ReachState,
    /// Position in the river of the reach declaration tile.
    reach_ho_index: Option<usize>,
    /// Position in the discard log of the reach declaration tile.
    reach_sutehai_index: Option<usize>,
    score: i32,
    /// True between a draw (or chi/pon) and the matching discard.
    can_dahai: bool,
    /// One-way latch: false once any meld other than an ankan is taken.
    is_menzen: bool,
}

impl Player {
    pub fn new(id: u8, name: impl Into<String>, init_score: i32) -> Result<Self> {
        ensure!(id <= MAX_PLAYER_ID, "player ID is invalid: {id}");

        Ok(Self {
            id,
            name: name.into(),
            tehais: Vec::with_capacity(INIT_TEHAIS_LEN + 1),
            fuuros: Vec::with_capacity(MAX_FUUROS),
            ho: Vec::with_capacity(MAX_HO_LEN),
            sutehais: Vec::with_capacity(MAX_SUTEHAIS_LEN),
            extra_anpais: Vec::new(),
            reach_state: ReachState::NotReach,
            reach_ho_index: None,
            reach_sutehai_index: None,
            score: init_score,
            can_dahai: false,
            is_menzen: true,
        })
    }

    /// Starts a new hand from a fresh 13-tile deal, clearing everything the
    /// previous hand left behind. `score` overwrites the running total when
    /// given.
    pub fn start_kyoku(&mut self, tehais: &[Tile], score: Option<i32>) -> Result<()> {
        ensure!(
            tehais.len() == INIT_TEHAIS_LEN,
            "haipai must be {INIT_TEHAIS_LEN} tiles, got {}",
            tehais.len()
        );

        self.tehais.clear();
        self.tehais.extend_from_slice(tehais);
        self.tehais.sort();
        self.fuuros.clear();
        self.ho.clear();
        self.sutehais.clear();
        self.extra_anpais.clear();
        self.reach_state = ReachState::NotReach;
        self.reach_ho_index = None;
        self.reach_sutehai_index = None;
        self.can_dahai = false;
        self.is_menzen = true;

        if let Some(score) = score {
            self.score = score;
        }
        Ok(())
    }

    pub fn tsumo(&mut self, pai: Tile) -> Result<()> {
        ensure!(!self.can_dahai, "cannot draw while a discard is pending");

        self.tehais.push(pai);
        self.can_dahai = true;
        Ok(())
    }

    pub fn dahai(&mut self, pai: Tile) -> Result<()> {
        ensure!(self.can_dahai, "not in a state to discard");

        let index = find_tehai(&self.tehais, pai).with_context(|| {
            format!(
                "cannot discard {pai}: not in tehais [{}]",
                tiles_to_string(&self.tehais)
            )
        })?;
        self.tehais.remove(index);
        self.tehais.sort();
        self.ho.push(pai);
        self.sutehais.push(pai);

        if self.reach_state != ReachState::Accepted {
            self.extra_anpais.clear();
        }
        self.can_dahai = false;
        Ok(())
    }

    pub fn chi(&mut self, fuuro: Chi) -> Result<()> {
        ensure!(!self.can_dahai, "cannot call chi while a discard is pending");
        ensure!(
            self.reach_state == ReachState::NotReach,
            "cannot call chi during reach"
        );
        ensure!(self.fuuros.len() < MAX_FUUROS, "cannot make a 5th fuuro");

        self.remove_tehais(fuuro.consumed())?;
        self.fuuros.push(fuuro.into());
        self.can_dahai = true;
        self.is_menzen = false;
        Ok(())
    }

    pub fn pon(&mut self, fuuro: Pon) -> Result<()> {
        ensure!(!self.can_dahai, "cannot call pon while a discard is pending");
        ensure!(
            self.reach_state == ReachState::NotReach,
            "cannot call pon during reach"
        );
        ensure!(self.fuuros.len() < MAX_FUUROS, "cannot make a 5th fuuro");

        self.remove_tehais(fuuro.consumed())?;
        self.fuuros.push(fuuro.into());
        self.can_dahai = true;
        self.is_menzen = false;
        Ok(())
    }

    /// Unlike chi and pon, the seat still owes a replacement draw before it
    /// may discard.
    pub fn daiminkan(&mut self, fuuro: Daiminkan) -> Result<()> {
        ensure!(
            !self.can_dahai,
            "cannot call daiminkan while a discard is pending"
        );
        ensure!(
            self.reach_state == ReachState::NotReach,
            "cannot call daiminkan during reach"
        );
        ensure!(self.fuuros.len() < MAX_FUUROS, "cannot make a 5th fuuro");

        self.remove_tehais(fuuro.consumed())?;
        self.fuuros.push(fuuro.into());
        self.can_dahai = false;
        self.is_menzen = false;
        Ok(())
    }

    /// Declared out of the seat's own drawn hand; keeps the hand concealed
    /// and is the one call allowed during reach.
    pub fn ankan(&mut self, fuuro: Ankan) -> Result<()> {
        ensure!(self.can_dahai, "ankan requires an undiscarded draw");
        ensure!(self.fuuros.len() < MAX_FUUROS, "cannot make a 5th fuuro");

        self.remove_tehais(fuuro.consumed())?;
        self.fuuros.push(fuuro.into());
        self.can_dahai = false;
        Ok(())
    }

    /// Upgrades this seat's earlier pon of the same symbol, preserving that
    /// pon's taken tile and target.
    pub fn kakan(&mut self, fuuro: Kakan) -> Result<()> {
        ensure!(self.can_dahai, "kakan requires an undiscarded draw");
        ensure!(
            self.reach_state == ReachState::NotReach,
            "cannot call kakan during reach"
        );

        let added = fuuro.added();
        let pon_index = self
            .fuuros
            .iter()
            .position(|f| matches!(f, Fuuro::Pon(pon) if pon.taken().has_same_symbol(added)))
            .with_context(|| format!("no pon of {added} to upgrade"))?;
        let index = find_tehai(&self.tehais, added).with_context(|| {
            format!(
                "cannot add {added}: not in tehais [{}]",
                tiles_to_string(&self.tehais)
            )
        })?;

        let Fuuro::Pon(pon) = &self.fuuros[pon_index] else {
            unreachable!()
        };
        let upgraded = Kakan::upgrade(pon, added)?;

        self.tehais.remove(index);
        self.fuuros[pon_index] = upgraded.into();
        self.can_dahai = false;
        Ok(())
    }

    pub fn reach(&mut self) -> Result<()> {
        ensure!(self.can_dahai, "reach must be declared on the seat's turn");
        ensure!(
            self.reach_state == ReachState::NotReach,
            "cannot reach again during a reach"
        );
        ensure!(self.is_menzen, "cannot reach with an open hand");

        self.reach_state = ReachState::Declared;
        Ok(())
    }

    /// Settles a declared reach once nobody claims the declaration tile:
    /// bookmarks where in the river and discard log it sits and pays the
    /// stake (`delta`, or the standard -1000).
    pub fn reach_accepted(&mut self, delta: Option<i32>) -> Result<()> {
        ensure!(
            !self.can_dahai,
            "reach is accepted after the declaration discard"
        );
        ensure!(
            self.reach_state == ReachState::Declared,
            "reach acceptance requires a prior declaration"
        );
        ensure!(self.is_menzen, "cannot accept reach for an open hand");

        self.reach_state = ReachState::Accepted;
        self.reach_ho_index = self.ho.len().checked_sub(1);
        self.reach_sutehai_index = self.sutehais.len().checked_sub(1);
        self.score += delta.unwrap_or(-KYOTAKU_POINT);
        Ok(())
    }

    /// Applies another seat's call on this seat's freshest discard: the
    /// tile leaves the river but stays in the discard log, which keeps
    /// recording it for furiten purposes.
    pub fn on_targeted(&mut self, fuuro: &Fuuro) -> Result<()> {
        if matches!(fuuro, Fuuro::Ankan(_) | Fuuro::Kakan(_)) {
            bail!("a concealed or added quad takes no discard");
        }
        ensure!(
            fuuro.target() == Some(self.id),
            "fuuro target {:?} is not this seat ({})",
            fuuro.target(),
            self.id
        );

        let last = self.ho.last().copied().context("the river is empty")?;
        let taken = fuuro.taken().context("fuuro has no taken tile")?;
        ensure!(
            last == taken,
            "river tile {last} is not the taken tile {taken}"
        );

        self.ho.pop();
        Ok(())
    }

    pub fn add_extra_anpais(&mut self, pai: Tile) {
        self.extra_anpais.push(pai);
    }

    #[must_use]
    pub const fn id(&self) -> u8 {
        self.id
    }
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[must_use]
    pub fn tehais(&self) -> &[Tile] {
        &self.tehais
    }
    #[must_use]
    pub fn fuuros(&self) -> &[Fuuro] {
        &self.fuuros
    }
    #[must_use]
    pub fn ho(&self) -> &[Tile] {
        &self.ho
    }
    #[must_use]
    pub fn sutehais(&self) -> &[Tile] {
        &self.sutehais
    }
    #[must_use]
    pub fn extra_anpais(&self) -> &[Tile] {
        &self.extra_anpais
    }
    #[must_use]
    pub const fn reach_state(&self) -> ReachState {
        self.reach_state
    }
    #[must_use]
    pub const fn reach_ho_index(&self) -> Option<usize> {
        self.reach_ho_index
    }
    #[must_use]
    pub const fn reach_sutehai_index(&self) -> Option<usize> {
        self.reach_sutehai_index
    }
    #[must_use]
    pub const fn score(&self) -> i32 {
        self.score
    }
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }
    #[must_use]
    pub const fn can_dahai(&self) -> bool {
        self.can_dahai
    }
    #[must_use]
    pub const fn is_menzen(&self) -> bool {
        self.is_menzen
    }

    /// Removes a whole consumed set, or nothing at all: the removals are
    /// staged on a scratch hand so a missing tile cannot leave a
    /// half-applied call behind.
    fn remove_tehais(&mut self, consumed: &[Tile]) -> Result<()> {
        let mut tehais = self.tehais.clone();
        for &pai in consumed {
            let index = find_tehai(&tehais, pai).with_context(|| {
                format!(
                    "cannot consume {pai}: not in tehais [{}]",
                    tiles_to_string(&tehais)
                )
            })?;
            tehais.remove(index);
        }
        self.tehais = tehais;
        Ok(())
    }
}

/// Looks for an exact match from the back of the hand, then falls back to
/// an unknown placeholder. Partially observed hands (e.g. opponents modeled
/// as all-unknown) discard real tiles out of placeholders this way.
fn find_tehai(tehais: &[Tile], pai: Tile) -> Option<usize> {
    if let Some(index) = tehais.iter().rposition(|&t| t == pai) {
        return Some(index);
    }
    let index = tehais.iter().rposition(|&t| t.is_unknown());
    if index.is_some() {
        trace!("removing an unknown placeholder in place of {pai}");
    }
    index
}
