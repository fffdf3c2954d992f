use core::num::Saturating;
use core::time::Duration;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// The two designed delays of a turn: how long a mismatched pair stays
/// visible, and how long after the final match the win is announced.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    pub mismatch_delay: Duration,
    pub win_ack_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            mismatch_delay: Duration::from_millis(1000),
            win_ack_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Selection {
    coords: Coord2,
    value: CardValue,
}

/// Deferred follow-up owned by the engine. Dropping the session drops the
/// deadline with it, so a torn-down game cannot be mutated by a late tick.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Scheduled {
    Revert { due: Instant },
    AnnounceWin { due: Instant },
}

impl Scheduled {
    fn due(self) -> Instant {
        match self {
            Self::Revert { due } => due,
            Self::AnnounceWin { due } => due,
        }
    }
}

/// One complete game session: the dealt board plus every piece of mutable
/// turn state, updated only through `select` and `tick`.
#[derive(Clone, Debug, PartialEq)]
pub struct PairEngine {
    layout: CardLayout,
    face_up: Array2<bool>,
    ledger: MatchLedger,
    first: Option<Selection>,
    second: Option<Selection>,
    scheduled: Option<Scheduled>,
    tries: Saturating<u32>,
    state: EngineState,
    timings: Timings,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl PairEngine {
    pub fn new(layout: CardLayout) -> Self {
        Self::with_timings(layout, Timings::default())
    }

    pub fn with_timings(layout: CardLayout, timings: Timings) -> Self {
        let face_up = Array2::default(layout.size().to_nd_index());
        Self {
            layout,
            face_up,
            ledger: MatchLedger::new(),
            first: None,
            second: None,
            scheduled: None,
            tries: Saturating(0),
            state: Default::default(),
            timings,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn pair_count(&self) -> CardCount {
        self.layout.pair_count()
    }

    pub fn tries(&self) -> u32 {
        self.tries.0
    }

    pub fn matched_count(&self) -> CardCount {
        self.ledger.matched_count()
    }

    pub fn is_complete(&self) -> bool {
        self.ledger.is_complete(self.layout.pair_count())
    }

    pub fn is_face_up(&self, coords: Coord2) -> bool {
        self.face_up[coords.to_nd_index()]
    }

    pub fn card_at(&self, coords: Coord2) -> CardCell {
        let value = self.layout[coords];
        if self.ledger.contains(value) {
            CardCell::Matched(value)
        } else if self.face_up[coords.to_nd_index()] {
            CardCell::FaceUp(value)
        } else {
            CardCell::FaceDown
        }
    }

    pub fn first_selection(&self) -> Option<Coord2> {
        self.first.map(|selection| selection.coords)
    }

    pub fn has_pending_pair(&self) -> bool {
        self.second.is_some()
    }

    /// When the driver should call `tick` back, if anything is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduled.map(Scheduled::due)
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started_at) => self.ended_at.unwrap_or(now).duration_since(started_at),
            None => Duration::ZERO,
        }
    }

    /// Feeds one selection event into the turn engine. Invalid clicks are
    /// `Ignored` outcomes, not errors; only coordinates off the board are
    /// rejected.
    pub fn select(&mut self, coords: Coord2, now: Instant) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let coords = self.layout.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(Ignored);
        }
        let value = self.layout[coords];
        if self.ledger.contains(value) {
            return Ok(Ignored);
        }
        if self.first_selection() == Some(coords) {
            return Ok(Ignored);
        }
        // at most one pair in flight
        if self.second.is_some() {
            return Ok(Ignored);
        }

        self.face_up[coords.to_nd_index()] = true;
        self.mark_started(now);

        let Some(first) = self.first else {
            log::trace!("first card of the turn revealed at {:?}", coords);
            self.first = Some(Selection { coords, value });
            return Ok(FirstSelected);
        };

        if first.value == value {
            self.ledger.record(value);
            self.first = None;
            log::debug!(
                "matched value {} ({} of {} pairs)",
                value,
                self.ledger.matched_count(),
                self.layout.pair_count()
            );
            if self.ledger.is_complete(self.layout.pair_count()) {
                self.scheduled = Some(Scheduled::AnnounceWin {
                    due: now + self.timings.win_ack_delay,
                });
            }
            Ok(Matched)
        } else {
            log::trace!("mismatch at {:?} and {:?}, reversion scheduled", first.coords, coords);
            self.second = Some(Selection { coords, value });
            self.scheduled = Some(Scheduled::Revert {
                due: now + self.timings.mismatch_delay,
            });
            Ok(MismatchPending)
        }
    }

    /// Drives the scheduled deadline. Early calls are `Idle` no-ops; a due
    /// deadline fires exactly once.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        match self.scheduled {
            Some(scheduled) if scheduled.due() <= now => {
                self.scheduled = None;
                match scheduled {
                    Scheduled::Revert { .. } => self.revert_pending(),
                    Scheduled::AnnounceWin { .. } => self.announce_win(now),
                }
            }
            _ => TickOutcome::Idle,
        }
    }

    fn revert_pending(&mut self) -> TickOutcome {
        // the attempt is spent only once the pair flips back
        for selection in [self.first.take(), self.second.take()].into_iter().flatten() {
            self.face_up[selection.coords.to_nd_index()] = false;
        }
        self.tries += 1;
        TickOutcome::Reverted
    }

    fn announce_win(&mut self, now: Instant) -> TickOutcome {
        self.state = EngineState::Won;
        self.ended_at.replace(now);
        log::debug!(
            "all {} pairs matched after {} tries",
            self.layout.pair_count(),
            self.tries.0
        );
        TickOutcome::GameWon
    }

    fn mark_started(&mut self, now: Instant) {
        if matches!(self.state, EngineState::Ready) {
            log::debug!("first card revealed, session active");
            self.started_at.replace(now);
            self.state = EngineState::Active;
        }
    }
}
