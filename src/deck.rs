use crate::card::{Card, NUM_CARDS_DECK};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DeckKind {
    Stock,
    Waste,
    Foundation,
    Column,
}

/// An ordered pile of cards. Index 0 is the bottom, the last card is the top.
///
/// `invisible` counts face-down cards from the bottom and only ever
/// exceeds zero for columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Deck {
    kind: DeckKind,
    cards: Vec<Card>,
    invisible: usize,
}

impl Deck {
    pub fn new(kind: DeckKind) -> Self {
        Self {
            kind,
            cards: Vec::new(),
            invisible: 0,
        }
    }

    /// The 52 cards in ordinal order, ready to be shuffled.
    pub fn standard() -> Vec<Card> {
        (0..NUM_CARDS_DECK)
            .filter_map(|ordinal| Card::from_ordinal(ordinal).ok())
            .collect()
    }

    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn get(&self, row: usize) -> Option<Card> {
        self.cards.get(row).copied()
    }

    pub fn invisible(&self) -> usize {
        self.invisible
    }

    pub fn is_visible(&self, row: usize) -> bool {
        row >= self.invisible && row < self.cards.len()
    }

    /// Sets the number of face-down cards. Clamped to the deck size, and
    /// ignored for anything but a column.
    pub fn set_invisible(&mut self, invisible: usize) {
        if self.kind == DeckKind::Column {
            self.invisible = invisible.min(self.cards.len());
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn pop(&mut self) -> Option<Card> {
        let card = self.cards.pop();
        self.invisible = self.invisible.min(self.cards.len());
        card
    }

    /// The cards from `row` up to the top, without removing them.
    pub fn slice_from(&self, row: usize) -> &[Card] {
        self.cards.get(row..).unwrap_or(&[])
    }

    /// Removes and returns everything from `row` up to the top.
    pub fn split_off(&mut self, row: usize) -> Vec<Card> {
        if row >= self.cards.len() {
            return Vec::new();
        }
        let run = self.cards.split_off(row);
        self.invisible = self.invisible.min(self.cards.len());
        run
    }

    /// Turns the top face-down card face up if nothing visible is left
    /// above it. Returns whether a card was turned.
    pub fn reveal_top(&mut self) -> bool {
        if self.invisible > 0 && self.invisible == self.cards.len() {
            self.invisible -= 1;
            true
        } else {
            false
        }
    }

    /// Undoes [`Deck::reveal_top`].
    pub fn hide_top(&mut self) {
        if self.kind == DeckKind::Column && self.invisible < self.cards.len() {
            self.invisible += 1;
        }
    }

    /// Renders the cards sorted by `order` with `<` or `=` between
    /// neighbours, e.g. `[♧ 2 < ♧ 3 = ♧ 3]`. The deck itself is untouched.
    pub fn to_comparative_string<F>(&self, ascii: bool, mut order: F) -> String
    where
        F: FnMut(&Card, &Card) -> Ordering,
    {
        let mut sorted = self.cards.clone();
        sorted.sort_by(&mut order);
        let mut out = String::from("[");
        for (i, card) in sorted.iter().enumerate() {
            if i > 0 {
                let sign = if order(&sorted[i - 1], card) == Ordering::Less {
                    " < "
                } else {
                    " = "
                };
                out.push_str(sign);
            }
            out.push_str(&card.short_string(ascii));
        }
        out.push(']');
        out
    }

    pub fn to_plain_string(&self, ascii: bool) -> String {
        let cards: Vec<String> = self.cards.iter().map(|card| card.short_string(ascii)).collect();
        format!("[{}]", cards.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn column(cards: &[Card], invisible: usize) -> Deck {
        let mut deck = Deck::new(DeckKind::Column);
        deck.extend(cards.iter().copied());
        deck.set_invisible(invisible);
        deck
    }

    #[test]
    fn standard_deck_has_every_ordinal_once() {
        let cards = Deck::standard();
        assert_eq!(cards.len(), 52);
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.ordinal() as usize, i);
        }
    }

    #[test]
    fn invisible_only_sticks_to_columns() {
        let mut stock = Deck::new(DeckKind::Stock);
        stock.extend(Deck::standard());
        stock.set_invisible(10);
        assert_eq!(stock.invisible(), 0);

        let col = column(&Deck::standard()[..3], 7);
        assert_eq!(col.invisible(), 3);
    }

    #[test]
    fn reveal_turns_the_new_top_card() {
        let cards = Deck::standard();
        let mut col = column(&cards[..3], 2);
        assert!(!col.reveal_top());
        let run = col.split_off(2);
        assert_eq!(run, vec![cards[2]]);
        assert!(col.reveal_top());
        assert_eq!(col.invisible(), 1);
        assert!(col.is_visible(1));
        assert!(!col.is_visible(0));
        col.hide_top();
        assert_eq!(col.invisible(), 2);
    }

    #[test]
    fn comparative_string_marks_ties_and_steps() {
        let mut deck = Deck::new(DeckKind::Waste);
        deck.push(Card::new(Suit::Clubs, Rank::Four));
        deck.push(Card::new(Suit::Clubs, Rank::Two));
        deck.push(Card::new(Suit::Hearts, Rank::Four));
        let by_value = |a: &Card, b: &Card| a.rank().value().cmp(&b.rank().value());
        assert_eq!(deck.to_comparative_string(true, by_value), "[C 2 < C 4 = H 4]");
        // Original order is kept.
        assert_eq!(deck.to_plain_string(true), "[C 4, C 2, H 4]");
        assert_eq!(Deck::new(DeckKind::Waste).to_comparative_string(true, Card::cmp), "[]");
    }
}
