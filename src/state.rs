use crate::card::Card;
use crate::deck::{Deck, DeckKind};
use crate::moves::Revertible;
use arrayvec::ArrayVec;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

pub const NUM_FOUNDATIONS: usize = 4;
pub const NUM_COLUMNS: usize = 7;

pub const FOUNDATION_LABELS: [&str; NUM_FOUNDATIONS] = ["SA", "SB", "SC", "SD"];
pub const COLUMN_LABELS: [&str; NUM_COLUMNS] = ["A", "B", "C", "D", "E", "F", "G"];

/// Addresses one deck of a [`GameState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Pile {
    Stock,
    Waste,
    Foundation(usize),
    Column(usize),
}

impl Pile {
    pub fn label(self) -> &'static str {
        match self {
            Pile::Stock => "stock",
            Pile::Waste => "O",
            Pile::Foundation(idx) => FOUNDATION_LABELS[idx],
            Pile::Column(idx) => COLUMN_LABELS[idx],
        }
    }
}

/// The whole game: every deck, the undo history and the score.
///
/// Only moves and the controller mutate it. Every one of the 52 cards
/// sits in exactly one deck at all times.
#[derive(Clone, Debug)]
pub struct GameState {
    stock: Deck,
    waste: Deck,
    foundations: ArrayVec<Deck, NUM_FOUNDATIONS>,
    columns: ArrayVec<Deck, NUM_COLUMNS>,
    history: Vec<Revertible>,
    stock_cycles: u32,
    base_score: i64,
    time_score: i64,
    start_time: Instant,
    end_time: Option<Instant>,
    lost: bool,
    won: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// An empty table: no cards anywhere, clock started now.
    pub fn new() -> Self {
        Self {
            stock: Deck::new(DeckKind::Stock),
            waste: Deck::new(DeckKind::Waste),
            foundations: (0..NUM_FOUNDATIONS)
                .map(|_| Deck::new(DeckKind::Foundation))
                .collect(),
            columns: (0..NUM_COLUMNS).map(|_| Deck::new(DeckKind::Column)).collect(),
            history: Vec::new(),
            stock_cycles: 0,
            base_score: 0,
            time_score: 0,
            start_time: Instant::now(),
            end_time: None,
            lost: false,
            won: false,
        }
    }

    pub fn pile(&self, pile: Pile) -> &Deck {
        match pile {
            Pile::Stock => &self.stock,
            Pile::Waste => &self.waste,
            Pile::Foundation(idx) => &self.foundations[idx],
            Pile::Column(idx) => &self.columns[idx],
        }
    }

    pub fn pile_mut(&mut self, pile: Pile) -> &mut Deck {
        match pile {
            Pile::Stock => &mut self.stock,
            Pile::Waste => &mut self.waste,
            Pile::Foundation(idx) => &mut self.foundations[idx],
            Pile::Column(idx) => &mut self.columns[idx],
        }
    }

    pub fn stock(&self) -> &Deck {
        &self.stock
    }

    pub fn waste(&self) -> &Deck {
        &self.waste
    }

    pub fn foundations(&self) -> &[Deck] {
        &self.foundations
    }

    pub fn columns(&self) -> &[Deck] {
        &self.columns
    }

    /// Moves the top card of one deck onto another.
    pub(crate) fn shift_top(&mut self, from: Pile, to: Pile) -> Option<Card> {
        let card = self.pile_mut(from).pop()?;
        self.pile_mut(to).push(card);
        Some(card)
    }

    pub fn history(&self) -> &[Revertible] {
        &self.history
    }

    pub(crate) fn remember(&mut self, entry: Revertible) {
        self.history.push(entry);
    }

    pub(crate) fn forget_last(&mut self) -> Option<Revertible> {
        self.history.pop()
    }

    pub fn stock_cycles(&self) -> u32 {
        self.stock_cycles
    }

    pub fn set_stock_cycles(&mut self, stock_cycles: u32) {
        self.stock_cycles = stock_cycles;
    }

    pub fn base_score(&self) -> i64 {
        self.base_score
    }

    pub fn set_base_score(&mut self, base_score: i64) {
        self.base_score = base_score;
    }

    pub fn time_score(&self) -> i64 {
        self.time_score
    }

    pub fn set_time_score(&mut self, time_score: i64) {
        self.time_score = time_score;
    }

    /// Total score, never below zero.
    pub fn score(&self) -> i64 {
        (self.base_score + self.time_score).max(0)
    }

    #[cfg(test)]
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    pub fn end_time(&self) -> Option<Instant> {
        self.end_time
    }

    pub fn set_end_time(&mut self, end_time: Instant) {
        self.end_time = Some(end_time);
    }

    /// Time played as of `now`; the clock stops once `end_time` is set.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.end_time
            .unwrap_or(now)
            .saturating_duration_since(self.start_time)
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Marks the game lost. A won game stays won.
    pub fn set_lost(&mut self) {
        if !self.won {
            self.lost = true;
        }
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Marks the game won. A lost game stays lost.
    pub fn set_won(&mut self) {
        if !self.lost {
            self.won = true;
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.lost || self.won
    }

    /// Every card on the table, deck by deck.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        std::iter::once(&self.stock)
            .chain(std::iter::once(&self.waste))
            .chain(self.foundations.iter())
            .chain(self.columns.iter())
            .flat_map(|deck| deck.cards().iter())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stock: self.stock.clone(),
            waste: self.waste.clone(),
            foundations: self.foundations.to_vec(),
            columns: self.columns.to_vec(),
            stock_cycles: self.stock_cycles,
            base_score: self.base_score,
            history_len: self.history.len(),
        }
    }

    /// Summary line, e.g. `12 move(s) played in 00:01:15 for 45 points`.
    pub fn summary_at(&self, now: Instant) -> String {
        let secs = self.elapsed_at(now).as_secs();
        format!(
            "{} move(s) played in {:02}:{:02}:{:02} for {} points",
            self.history.len(),
            secs / 3600,
            (secs / 60) % 60,
            secs % 60,
            self.score()
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.summary_at(Instant::now()))
    }
}

/// The parts of a [`GameState`] that moves and reverts touch, as a value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub stock: Deck,
    pub waste: Deck,
    pub foundations: Vec<Deck>,
    pub columns: Vec<Deck>,
    pub stock_cycles: u32,
    pub base_score: i64,
    pub history_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_never_goes_negative() {
        let mut state = GameState::new();
        state.set_base_score(10);
        state.set_time_score(-4);
        assert_eq!(state.score(), 6);
        state.set_time_score(-40);
        assert_eq!(state.score(), 0);
        assert_eq!(state.base_score(), 10);
    }

    #[test]
    fn lost_and_won_are_exclusive() {
        let mut state = GameState::new();
        assert!(!state.is_game_over());
        state.set_lost();
        state.set_won();
        assert!(state.is_lost());
        assert!(!state.is_won());
        assert!(state.is_game_over());

        let mut state = GameState::new();
        state.set_won();
        state.set_lost();
        assert!(state.is_won());
        assert!(!state.is_lost());
    }

    #[test]
    fn summary_formats_elapsed_time() {
        let mut state = GameState::new();
        state.set_base_score(45);
        let now = state.start_time() + Duration::from_secs(3600 + 75);
        assert_eq!(state.summary_at(now), "0 move(s) played in 01:01:15 for 45 points");
        state.set_end_time(state.start_time() + Duration::from_secs(29));
        assert_eq!(state.summary_at(now), "0 move(s) played in 00:00:29 for 45 points");
    }

    #[test]
    fn labels() {
        assert_eq!(Pile::Foundation(1).label(), "SB");
        assert_eq!(Pile::Column(6).label(), "G");
        assert_eq!(Pile::Waste.label(), "O");
    }
}
