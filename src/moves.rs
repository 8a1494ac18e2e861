use crate::card::Card;
use crate::error::{MoveError, Result};
use crate::rules::{self, RECYCLE_PENALTY};
use crate::state::{GameState, Pile, COLUMN_LABELS, FOUNDATION_LABELS};
use tracing::debug;

pub const HELP: &str = "\
Klondike solitaire. Build the four foundations SA..SD up from Ace to King in one suit.
In the columns A..G cards go down one rank at a time in alternating colours, and
only a King (or a run starting with one) may fill an empty column.

  C              cycle the stock: turn one card onto the waste, or recycle the waste (-100)
                 when the stock is empty. Turning a card over is free.
  M <from> <to>  move a card or a run, e.g. M A3 SB or M O C
  R              revert the last cycle or move
  H              show this help
  Q              quit (counts as a loss)

Locations: O is the top of the waste, SA..SD are the foundations and A..G the columns.
A column may carry a row number to pick up a run, e.g. D4. Press <Return> to repeat
the previous command.";

/// Everything a player can ask for in one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Move {
    CycleStock,
    MoveCard { input: String },
    Revert,
    Help,
    Quit,
    /// Input that matched no command letter.
    Dummy { input: String },
}

impl Move {
    /// Names of the moves a player can choose from, in menu order.
    pub const NAMES: [&'static str; 5] = ["Cycle stock", "Move", "Revert", "Help", "Quit"];

    /// Picks a move by the first letter of the (case-insensitive) input.
    pub fn from_input(input: &str) -> Self {
        let input = input.trim().to_uppercase();
        match input.chars().next() {
            Some('C') => Move::CycleStock,
            Some('M') => Move::MoveCard { input },
            Some('R') => Move::Revert,
            Some('H') => Move::Help,
            Some('Q') => Move::Quit,
            _ => Move::Dummy { input },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Move::CycleStock => Self::NAMES[0],
            Move::MoveCard { .. } => Self::NAMES[1],
            Move::Revert => Self::NAMES[2],
            Move::Help => Self::NAMES[3],
            Move::Quit => Self::NAMES[4],
            Move::Dummy { .. } => "Dummy",
        }
    }

    /// Applies the move, returning a message for the player. On error the
    /// state is left untouched.
    pub fn apply(&self, state: &mut GameState) -> Result<String> {
        match self {
            Move::CycleStock => cycle_stock(state),
            Move::MoveCard { input } => move_card(state, input),
            Move::Revert => {
                let entry = state.forget_last().ok_or(MoveError::NothingToRevert)?;
                Ok(entry.revert(state))
            }
            Move::Help => Ok(HELP.to_string()),
            Move::Quit => {
                state.set_lost();
                Ok("Game Over".to_string())
            }
            Move::Dummy { input } => Err(MoveError::UnrecognizedCommand(input.clone())),
        }
    }
}

/// An entry of the undo history. Each one owns exactly what it needs to
/// put the state back the way it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Revertible {
    Draw {
        previous_score: i64,
    },
    Recycle {
        cards: usize,
        previous_cycles: u32,
        previous_score: i64,
    },
    Transfer {
        from: Pile,
        to: Pile,
        cards: Vec<Card>,
        revealed: bool,
        previous_score: i64,
    },
}

impl Revertible {
    pub fn revert(self, state: &mut GameState) -> String {
        match self {
            Revertible::Draw { previous_score } => {
                state.shift_top(Pile::Waste, Pile::Stock);
                state.set_base_score(previous_score);
                "Reverted: card returned to the stock".to_string()
            }
            Revertible::Recycle {
                cards,
                previous_cycles,
                previous_score,
            } => {
                for _ in 0..cards {
                    state.shift_top(Pile::Stock, Pile::Waste);
                }
                state.set_stock_cycles(previous_cycles);
                state.set_base_score(previous_score);
                format!("Reverted: back to cycle {}", previous_cycles)
            }
            Revertible::Transfer {
                from,
                to,
                cards,
                revealed,
                previous_score,
            } => {
                let dest = state.pile_mut(to);
                let row = dest.len().saturating_sub(cards.len());
                let run = dest.split_off(row);
                debug_assert_eq!(run, cards);
                let source = state.pile_mut(from);
                if revealed {
                    source.hide_top();
                }
                source.extend(run);
                state.set_base_score(previous_score);
                format!(
                    "Reverted: {} back from {} to {}",
                    describe(&cards),
                    to.label(),
                    from.label()
                )
            }
        }
    }
}

fn describe(cards: &[Card]) -> String {
    match cards {
        [card] => card.to_string(),
        _ => format!("{} cards", cards.len()),
    }
}

fn cycle_stock(state: &mut GameState) -> Result<String> {
    let previous_score = state.base_score();
    if state.shift_top(Pile::Stock, Pile::Waste).is_some() {
        state.remember(Revertible::Draw { previous_score });
        let turned = state.waste().len();
        return Ok(format!(
            "Stock card {} out of {}, cycle {}",
            turned,
            turned + state.stock().len(),
            state.stock_cycles()
        ));
    }
    if state.waste().is_empty() {
        return Err(MoveError::EmptyStockAndWaste);
    }

    let previous_cycles = state.stock_cycles();
    let mut cards = 0;
    while state.shift_top(Pile::Waste, Pile::Stock).is_some() {
        cards += 1;
    }
    state.set_stock_cycles(previous_cycles + 1);
    state.set_base_score(previous_score + RECYCLE_PENALTY);
    state.remember(Revertible::Recycle {
        cards,
        previous_cycles,
        previous_score,
    });
    Ok(format!("Stock recycled, cycle {}", state.stock_cycles()))
}

/// Resolves a location token such as `O`, `SB`, `C` or `C4`. Assumes the
/// token is already upper-case.
pub fn parse_location(token: &str) -> Result<(Pile, Option<usize>)> {
    if token == "O" {
        return Ok((Pile::Waste, None));
    }
    if let Some(idx) = FOUNDATION_LABELS.iter().position(|label| *label == token) {
        return Ok((Pile::Foundation(idx), None));
    }
    let unknown = || MoveError::UnknownLocation(token.to_string());
    let header = token.get(..1).ok_or_else(unknown)?;
    let idx = COLUMN_LABELS
        .iter()
        .position(|label| *label == header)
        .ok_or_else(unknown)?;
    let row = match &token[1..] {
        "" => None,
        digits if !digits.bytes().all(|b| b.is_ascii_digit()) => return Err(unknown()),
        digits => Some(digits.parse::<usize>().map_err(|_| {
            MoveError::RowOutOfRange(format!("Column {} has no card {}", header, digits))
        })?),
    };
    Ok((Pile::Column(idx), row))
}

fn split_tokens(input: &str) -> Result<(&str, &str)> {
    let mut chars = input.chars();
    chars.next();
    let tokens: Vec<&str> = chars.as_str().split_whitespace().collect();
    match tokens.as_slice() {
        [source, dest] => Ok((*source, *dest)),
        _ => Err(MoveError::MalformedMoveTokens(input.to_string())),
    }
}

fn move_card(state: &mut GameState, input: &str) -> Result<String> {
    let input = input.to_uppercase();
    let (source, dest) = split_tokens(&input)?;
    let (from, row) = parse_location(source)?;
    let (to, _) = parse_location(dest)?;
    let transfer = rules::plan_transfer(state, from, row, to)?;
    debug!(?transfer, "transfer accepted");

    let from_kind = state.pile(transfer.from).kind();
    let to_kind = state.pile(transfer.to).kind();
    let source_deck = state.pile_mut(transfer.from);
    let cards = source_deck.split_off(transfer.row);
    debug_assert_eq!(cards.len(), transfer.count);
    if transfer.reveals {
        source_deck.reveal_top();
    }
    state.pile_mut(transfer.to).extend(cards.iter().copied());

    let previous_score = state.base_score();
    let delta = rules::score_delta(from_kind, to_kind, transfer.reveals);
    state.set_base_score(previous_score + delta);

    let mut message = format!(
        "Moved {} from {} to {}",
        describe(&cards),
        source,
        transfer.to.label()
    );
    if transfer.reveals {
        message.push_str(", a card was turned over");
    }
    state.remember(Revertible::Transfer {
        from: transfer.from,
        to: transfer.to,
        cards,
        revealed: transfer.reveals,
        previous_score,
    });
    Ok(message)
}
