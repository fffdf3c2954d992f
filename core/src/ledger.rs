use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{CardCount, CardValue};

/// Set of values whose pairs have been found. Values enter at most once;
/// the ledger lives and dies with one game session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchLedger {
    matched: BTreeSet<CardValue>,
}

impl MatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a matched value, returning `false` if it was already there.
    pub fn record(&mut self, value: CardValue) -> bool {
        self.matched.insert(value)
    }

    pub fn contains(&self, value: CardValue) -> bool {
        self.matched.contains(&value)
    }

    pub fn matched_count(&self) -> CardCount {
        self.matched.len().try_into().unwrap_or(CardCount::MAX)
    }

    pub fn is_complete(&self, total_pairs: CardCount) -> bool {
        self.matched_count() == total_pairs
    }
}
