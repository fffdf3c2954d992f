use core::ops::Index;
use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use ledger::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod ledger;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2) -> Self {
        Self { size }
    }

    /// Validates board dimensions: both axes positive, total card count
    /// even. Odd or empty boards cannot be dealt into pairs.
    pub fn new(size: Coord2) -> Result<Self> {
        let total = mult(size.0, size.1);
        if total == 0 || total % 2 != 0 {
            return Err(GameError::InvalidBoardSize);
        }
        Ok(Self::new_unchecked(size))
    }

    pub const fn total_cards(&self) -> CardCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn pair_count(&self) -> CardCount {
        self.total_cards() / 2
    }
}

/// The dealt board: one hidden value per position, fixed for the whole
/// session. Only visibility changes during play, never the values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    values: Array2<CardValue>,
    pair_count: CardCount,
}

impl CardLayout {
    pub(crate) fn new(values: Array2<CardValue>, pair_count: CardCount) -> Self {
        Self { values, pair_count }
    }

    /// Builds a layout from an explicit value list in row-major position
    /// order, checking that the list fills the board and that every value
    /// appears exactly twice.
    pub fn from_values(size: Coord2, values: Vec<CardValue>) -> Result<Self> {
        let config = GameConfig::new(size)?;
        if values.len() != usize::from(config.total_cards()) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut occurrences: BTreeMap<CardValue, CardCount> = BTreeMap::new();
        for &value in &values {
            *occurrences.entry(value).or_default() += 1;
        }
        if occurrences.values().any(|&count| count != 2) {
            return Err(GameError::UnpairedValue);
        }

        let values = Array2::from_shape_vec(size.to_nd_index(), values)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self::new(values, config.pair_count()))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.values.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cards(&self) -> CardCount {
        self.values.len().try_into().unwrap()
    }

    pub fn pair_count(&self) -> CardCount {
        self.pair_count
    }

    pub fn value_at(&self, coords: Coord2) -> CardValue {
        self[coords]
    }
}

impl Index<Coord2> for CardLayout {
    type Output = CardValue;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.values[(x as usize, y as usize)]
    }
}

/// Immediate result of feeding one selection event to the engine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    Ignored,
    FirstSelected,
    Matched,
    MismatchPending,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            Ignored => false,
            FirstSelected => true,
            Matched => true,
            MismatchPending => true,
        }
    }
}

/// Result of driving the engine's scheduled deadline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Idle,
    Reverted,
    GameWon,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        use TickOutcome::*;
        match self {
            Idle => false,
            Reverted => true,
            GameWon => true,
        }
    }
}
