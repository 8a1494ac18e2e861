//! Starting, refereeing and finishing a game. The rules themselves live in
//! `rules` and `moves`; this module only drives them.

use crate::card::Card;
use crate::deck::Deck;
use crate::moves::{Move, HELP};
use crate::state::{GameState, Pile, NUM_COLUMNS};
use crate::ui::{Feedback, Ui};
use rand::seq::SliceRandom;
use rand::Rng;
use std::io;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

pub const TIME_PENALTY_POINTS: i64 = -2;
pub const TIME_PENALTY_INTERVAL_SECS: u64 = 10;
pub const BONUS_MIN_SECS: u64 = 30;
pub const BONUS_NUMERATOR: u64 = 700_000;

/// A freshly shuffled and dealt game.
pub fn init<R: Rng + ?Sized>(rng: &mut R) -> GameState {
    let mut cards = Deck::standard();
    cards.shuffle(rng);
    deal(cards)
}

/// Deals `cards` as they come: the last card is the top of the stock and
/// goes out first. Row by row, column `i` gets `i` face-down cards with
/// one face-up card on top. Whatever is left stays in the stock.
pub fn deal(cards: Vec<Card>) -> GameState {
    let mut state = GameState::new();
    state.pile_mut(Pile::Stock).extend(cards);
    for row in 0..NUM_COLUMNS {
        for col in row..NUM_COLUMNS {
            if state.shift_top(Pile::Stock, Pile::Column(col)).is_none() {
                break;
            }
        }
    }
    for col in 0..NUM_COLUMNS {
        state.pile_mut(Pile::Column(col)).set_invisible(col);
    }
    state
}

/// Won when no column hides a card and the stock is empty. Cards still in
/// the waste or the columns do not matter.
pub fn detect_game_win(state: &mut GameState) {
    let all_visible = state.columns().iter().all(|column| column.invisible() == 0);
    if all_visible && state.stock().is_empty() {
        state.set_won();
    }
}

pub fn apply_time_penalty(state: &mut GameState) {
    apply_time_penalty_at(state, Instant::now());
}

/// Recomputes the time score as -2 points per full 10 seconds played.
/// Does nothing once the clock has stopped.
pub fn apply_time_penalty_at(state: &mut GameState, now: Instant) {
    if state.end_time().is_some() {
        return;
    }
    let secs = state.elapsed_at(now).as_secs();
    let intervals = (secs / TIME_PENALTY_INTERVAL_SECS) as i64;
    state.set_time_score(TIME_PENALTY_POINTS * intervals);
}

/// Stops the clock and, if the game took more than 30 seconds, adds
/// 700000 / seconds to the time score. Only the first call counts.
pub fn apply_bonus_score_at(state: &mut GameState, now: Instant) {
    if state.end_time().is_some() {
        return;
    }
    state.set_end_time(now);
    let secs = state.elapsed_at(now).as_secs();
    if secs > BONUS_MIN_SECS {
        let bonus = (BONUS_NUMERATOR / secs) as i64;
        state.set_time_score(state.time_score() + bonus);
    }
}

/// Applies one move and runs the after-turn checks. The move's message or
/// error comes back as feedback for the next render.
pub fn play_turn(state: &mut GameState, mv: &Move) -> Feedback {
    let result = mv.apply(state);
    detect_game_win(state);
    apply_time_penalty(state);

    match serde_json::to_string(&state.snapshot()) {
        Ok(json) => trace!(
            state = %json,
            cards = state.all_cards().count(),
            history = state.history().len(),
            "after turn"
        ),
        Err(err) => warn!(%err, "could not serialize game state"),
    }

    match result {
        Ok(message) => Feedback::Info(message),
        Err(err) => {
            debug!(%err, mv = mv.name(), "move rejected");
            Feedback::Error(err.to_string())
        }
    }
}

/// Stops the clock, hands out the bonus for a win and returns the closing
/// message.
pub fn finish_game_at(state: &mut GameState, now: Instant) -> String {
    if state.is_won() {
        apply_bonus_score_at(state, now);
        info!(score = state.score(), "game won");
        format!("Congratulations, you beat the game!!! {}", state.summary_at(now))
    } else {
        if state.end_time().is_none() {
            state.set_end_time(now);
        }
        info!(score = state.score(), quit = state.is_lost(), "game over");
        format!("Game Over. {}", state.summary_at(now))
    }
}

/// Runs the turn loop until the game is won or lost.
///
/// An empty line repeats the previous command, and the game opens with
/// the help text as if `H` had been typed. Closing the input quits.
pub fn play<U: Ui>(ui: &mut U, state: &mut GameState) -> io::Result<()> {
    let mut feedback = Feedback::Info(HELP.to_string());
    let mut previous_input = String::from("H");

    while !state.is_game_over() {
        ui.render(state, &feedback)?;
        let input = match ui.request_move(state, &Move::NAMES)? {
            Some(raw) if raw.trim().is_empty() => previous_input.clone(),
            Some(raw) => raw.trim().to_uppercase(),
            None => {
                debug!("input closed, quitting");
                "Q".to_string()
            }
        };
        debug!(%input, "turn");
        let mv = Move::from_input(&input);
        previous_input = input;
        feedback = play_turn(state, &mv);
    }

    let message = finish_game_at(state, Instant::now());
    ui.render(state, &Feedback::Info(message))
}
