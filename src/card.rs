use crate::error::{MoveError, Result};
use derivative::Derivative;
use serde::Serialize;
use std::fmt;

pub const NUM_CARDS_DECK: u8 = 52;
pub const NUM_RANKS: u8 = 13;

// Declaration order is the ordinal order, do not reorder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn color(self) -> Color {
        match self {
            Suit::Diamonds | Suit::Hearts => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "\u{2667}",
            Suit::Diamonds => "\u{2666}",
            Suit::Hearts => "\u{2665}",
            Suit::Spades => "\u{2664}",
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "CLUBS",
            Suit::Diamonds => "DIAMONDS",
            Suit::Hearts => "HEARTS",
            Suit::Spades => "SPADES",
        }
    }
}

/// Card ranks in dealing order: the Ace comes last, so the declaration
/// index is *not* the game value. Use [`Rank::value`] for adjacency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Klondike value, Ace low: Ace = 1 .. King = 13.
    pub fn value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            other => other.index() + 2,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Rank::Two => "TWO",
            Rank::Three => "THREE",
            Rank::Four => "FOUR",
            Rank::Five => "FIVE",
            Rank::Six => "SIX",
            Rank::Seven => "SEVEN",
            Rank::Eight => "EIGHT",
            Rank::Nine => "NINE",
            Rank::Ten => "TEN",
            Rank::Jack => "JACK",
            Rank::Queen => "QUEEN",
            Rank::King => "KING",
            Rank::Ace => "ACE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// An immutable playing card. Identity, equality, hashing and ordering
/// all go through `ordinal`, which is `suit_index * 13 + rank_index`.
#[derive(Clone, Copy, Debug, Derivative, Serialize)]
#[derivative(PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    #[derivative(PartialEq = "ignore", Hash = "ignore", PartialOrd = "ignore", Ord = "ignore")]
    suit: Suit,
    #[derivative(PartialEq = "ignore", Hash = "ignore", PartialOrd = "ignore", Ord = "ignore")]
    rank: Rank,
    ordinal: u8,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            ordinal: suit.index() * NUM_RANKS + rank.index(),
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Result<Self> {
        if ordinal >= NUM_CARDS_DECK {
            return Err(MoveError::InvalidCard(ordinal));
        }
        let suit = Suit::ALL[(ordinal / NUM_RANKS) as usize];
        let rank = Rank::ALL[(ordinal % NUM_RANKS) as usize];
        Ok(Self::new(suit, rank))
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    #[cfg(test)]
    pub fn ordinal(&self) -> u8 {
        self.ordinal
    }

    pub fn color(&self) -> Color {
        self.suit.color()
    }

    /// Short form used on the board, e.g. `♤ K`, or `S K` with `ascii`.
    pub fn short_string(&self, ascii: bool) -> String {
        let suit = if ascii {
            self.suit.letter()
        } else {
            self.suit.symbol()
        };
        format!("{} {}", suit, self.rank.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.suit.name(), self.rank.name())
    }
}

pub fn is_red(card: Card) -> bool {
    card.color() == Color::Red
}

pub fn is_king(card: Card) -> bool {
    card.rank() == Rank::King
}

pub fn is_ace(card: Card) -> bool {
    card.rank() == Rank::Ace
}

/// True when `top` is exactly one rank above `bottom`, Ace low.
pub fn are_card_ranks_sequential(bottom: Card, top: Card) -> bool {
    bottom.rank().value() + 1 == top.rank().value()
}

pub fn are_card_colors_different(card1: Card, card2: Card) -> bool {
    is_red(card1) != is_red(card2)
}

pub fn are_card_suits_the_same(card1: Card, card2: Card) -> bool {
    card1.suit() == card2.suit()
}

/// Can `top` be laid on `bottom` in a column: one rank lower, other colour.
pub fn can_be_placed_on_top_of(bottom: Card, top: Card) -> bool {
    are_card_ranks_sequential(top, bottom) && are_card_colors_different(bottom, top)
}
