//! Legality of card transfers. Nothing here mutates a deck: a request is
//! checked against the current decks and, if legal, turned into a
//! [`Transfer`] that the move catalogue carries out.

use crate::card::{
    are_card_ranks_sequential, are_card_suits_the_same, can_be_placed_on_top_of, is_ace, is_king,
    Card,
};
use crate::deck::{Deck, DeckKind};
use crate::error::{MoveError, Result};
use crate::state::{GameState, Pile};

pub const STOCK_TO_COLUMN_POINTS: i64 = 5;
pub const TO_FOUNDATION_POINTS: i64 = 10;
pub const FROM_FOUNDATION_PENALTY: i64 = -15;
pub const REVEAL_POINTS: i64 = 5;
pub const RECYCLE_PENALTY: i64 = -100;

/// A checked request to move `count` cards starting at `row` of `from`
/// onto `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: Pile,
    pub to: Pile,
    pub row: usize,
    pub count: usize,
    /// Taking the run leaves a face-down card on top of `from`.
    pub reveals: bool,
}

pub fn can_move_card_to_foundation(foundation: &Deck, card: Card) -> bool {
    match foundation.top() {
        None => is_ace(card),
        Some(top) => are_card_suits_the_same(top, card) && are_card_ranks_sequential(top, card),
    }
}

/// `first` is the lowest card of the run being laid down.
pub fn can_move_run_to_column(column: &Deck, first: Card) -> bool {
    match column.top() {
        None => is_king(first),
        Some(top) => can_be_placed_on_top_of(top, first),
    }
}

/// Descending by one rank and alternating colour, bottom to top.
pub fn is_valid_run(run: &[Card]) -> bool {
    run.windows(2).all(|pair| can_be_placed_on_top_of(pair[0], pair[1]))
}

/// Works out which row of `deck` a move out of `pile` starts at.
///
/// Waste and foundations only ever give up their top card. A column gives
/// up any face-up card, defaulting to the top one.
pub fn source_row(deck: &Deck, pile: Pile, requested: Option<usize>) -> Result<usize> {
    let label = pile.label();
    match deck.kind() {
        DeckKind::Stock => Err(MoveError::illegal(
            "the stock is face down, cycle it to turn a card over",
        )),
        DeckKind::Waste | DeckKind::Foundation => deck
            .len()
            .checked_sub(1)
            .ok_or_else(|| MoveError::illegal(format!("there is no card on {}", label))),
        DeckKind::Column => {
            if deck.is_empty() {
                return Err(MoveError::illegal(format!("column {} is empty", label)));
            }
            let row = requested.unwrap_or(deck.len() - 1);
            if row >= deck.len() {
                return Err(MoveError::RowOutOfRange(format!(
                    "Column {} has no card {}",
                    label, row
                )));
            }
            if !deck.is_visible(row) {
                return Err(MoveError::RowOutOfRange(format!(
                    "Card {}{} is face down",
                    label, row
                )));
            }
            Ok(row)
        }
    }
}

pub fn check_destination(dest: &Deck, label: &str, run: &[Card]) -> Result<()> {
    let first = match run.first() {
        Some(card) => *card,
        None => return Err(MoveError::illegal("there are no cards to move")),
    };
    match dest.kind() {
        DeckKind::Stock | DeckKind::Waste => Err(MoveError::illegal(
            "cards cannot be put back on the stock",
        )),
        DeckKind::Foundation => {
            if run.len() > 1 {
                return Err(MoveError::illegal(
                    "only one card at a time can go to a foundation",
                ));
            }
            if can_move_card_to_foundation(dest, first) {
                Ok(())
            } else if let Some(top) = dest.top() {
                Err(MoveError::illegal(format!("{} cannot go on {}", first, top)))
            } else {
                Err(MoveError::illegal(format!(
                    "{} is empty, only an Ace can start it",
                    label
                )))
            }
        }
        DeckKind::Column => {
            if can_move_run_to_column(dest, first) {
                Ok(())
            } else if let Some(top) = dest.top() {
                Err(MoveError::illegal(format!("{} cannot go on {}", first, top)))
            } else {
                Err(MoveError::illegal(format!(
                    "column {} is empty, only a King can go there",
                    label
                )))
            }
        }
    }
}

/// Checks a full transfer request against `state` without touching it.
pub fn plan_transfer(
    state: &GameState,
    from: Pile,
    requested_row: Option<usize>,
    to: Pile,
) -> Result<Transfer> {
    if from == to {
        return Err(MoveError::illegal("source and destination are the same"));
    }
    let source = state.pile(from);
    let row = source_row(source, from, requested_row)?;
    let run = source.slice_from(row);
    if !is_valid_run(run) {
        return Err(MoveError::illegal(format!(
            "the cards from {}{} up are not a descending run of alternating colours",
            from.label(),
            row
        )));
    }
    check_destination(state.pile(to), to.label(), run)?;

    let reveals =
        source.kind() == DeckKind::Column && source.invisible() > 0 && row == source.invisible();
    Ok(Transfer {
        from,
        to,
        row,
        count: run.len(),
        reveals,
    })
}

/// Change to the base score for a completed transfer.
pub fn score_delta(from: DeckKind, to: DeckKind, reveals: bool) -> i64 {
    let mut delta = match (from, to) {
        (DeckKind::Stock | DeckKind::Waste, DeckKind::Column) => STOCK_TO_COLUMN_POINTS,
        (DeckKind::Stock | DeckKind::Waste, DeckKind::Foundation) => TO_FOUNDATION_POINTS,
        (DeckKind::Column, DeckKind::Foundation) => TO_FOUNDATION_POINTS,
        _ => 0,
    };
    if from == DeckKind::Foundation {
        delta += FROM_FOUNDATION_PENALTY;
    }
    if reveals {
        delta += REVEAL_POINTS;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    fn deck(kind: DeckKind, cards: &[Card], invisible: usize) -> Deck {
        let mut deck = Deck::new(kind);
        deck.extend(cards.iter().copied());
        deck.set_invisible(invisible);
        deck
    }

    #[test]
    fn foundation_builds_up_from_ace_in_suit() {
        let mut foundation = Deck::new(DeckKind::Foundation);
        assert!(!can_move_card_to_foundation(&foundation, card(Suit::Hearts, Rank::Two)));
        assert!(can_move_card_to_foundation(&foundation, card(Suit::Hearts, Rank::Ace)));
        foundation.push(card(Suit::Hearts, Rank::Ace));
        for rank in &Rank::ALL[..12] {
            let next = card(Suit::Hearts, *rank);
            assert!(can_move_card_to_foundation(&foundation, next), "{}", next);
            assert!(!can_move_card_to_foundation(&foundation, card(Suit::Diamonds, *rank)));
            foundation.push(next);
        }
        assert_eq!(foundation.len(), 13);
    }

    #[test]
    fn foundation_rejects_rank_gaps() {
        let foundation = deck(DeckKind::Foundation, &[card(Suit::Clubs, Rank::Ace)], 0);
        assert!(!can_move_card_to_foundation(&foundation, card(Suit::Clubs, Rank::Three)));
    }

    #[test]
    fn only_kings_open_an_empty_column() {
        let empty = Deck::new(DeckKind::Column);
        assert!(can_move_run_to_column(&empty, card(Suit::Spades, Rank::King)));
        for rank in &Rank::ALL[..11] {
            assert!(!can_move_run_to_column(&empty, card(Suit::Spades, *rank)));
        }
        assert!(!can_move_run_to_column(&empty, card(Suit::Spades, Rank::Ace)));
    }

    #[test]
    fn runs_must_descend_and_alternate() {
        let good = [
            card(Suit::Spades, Rank::Nine),
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Clubs, Rank::Seven),
        ];
        assert!(is_valid_run(&good));
        assert!(is_valid_run(&good[..1]));
        let same_colour = [card(Suit::Spades, Rank::Nine), card(Suit::Clubs, Rank::Eight)];
        assert!(!is_valid_run(&same_colour));
        let gap = [card(Suit::Spades, Rank::Nine), card(Suit::Hearts, Rank::Seven)];
        assert!(!is_valid_run(&gap));
    }

    #[test]
    fn column_source_never_reaches_face_down_cards() {
        let cards = [
            card(Suit::Clubs, Rank::Two),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Hearts, Rank::Eight),
        ];
        let column = deck(DeckKind::Column, &cards, 1);
        assert_eq!(source_row(&column, Pile::Column(0), None), Ok(2));
        assert_eq!(source_row(&column, Pile::Column(0), Some(1)), Ok(1));
        assert!(matches!(
            source_row(&column, Pile::Column(0), Some(0)),
            Err(MoveError::RowOutOfRange(_))
        ));
        assert!(matches!(
            source_row(&column, Pile::Column(0), Some(3)),
            Err(MoveError::RowOutOfRange(_))
        ));
    }

    #[test]
    fn waste_and_foundation_give_their_top_card() {
        let waste = deck(
            DeckKind::Waste,
            &[card(Suit::Clubs, Rank::Two), card(Suit::Clubs, Rank::Three)],
            0,
        );
        assert_eq!(source_row(&waste, Pile::Waste, Some(0)), Ok(1));
        let empty = Deck::new(DeckKind::Foundation);
        assert!(matches!(
            source_row(&empty, Pile::Foundation(0), None),
            Err(MoveError::IllegalMove(_))
        ));
    }

    #[test]
    fn foundation_takes_a_single_card() {
        let foundation = Deck::new(DeckKind::Foundation);
        let run = [card(Suit::Clubs, Rank::Ace), card(Suit::Hearts, Rank::King)];
        assert!(check_destination(&foundation, "SA", &run).is_err());
        assert!(check_destination(&foundation, "SA", &run[..1]).is_ok());
    }

    #[test]
    fn scoring_table() {
        use DeckKind::*;
        assert_eq!(score_delta(Waste, Column, false), 5);
        assert_eq!(score_delta(Waste, Foundation, false), 10);
        assert_eq!(score_delta(Column, Foundation, false), 10);
        assert_eq!(score_delta(Column, Foundation, true), 15);
        assert_eq!(score_delta(Column, Column, false), 0);
        assert_eq!(score_delta(Column, Column, true), 5);
        assert_eq!(score_delta(Foundation, Column, false), -15);
    }
}
