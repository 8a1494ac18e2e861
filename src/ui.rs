use crate::card::{is_red, Card};
use crate::deck::{Deck, DeckKind};
use crate::state::{GameState, COLUMN_LABELS, FOUNDATION_LABELS};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::time::Instant;

const COLUMN_WIDTH: usize = 8;
const FIRST_COLUMN_WIDTH: usize = 3;
const CLEAR_SCREEN: &str = "\x1bc";

/// What the last turn produced, shown on the next render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    Info(String),
    Error(String),
}

/// The two things the game needs from whoever is at the keyboard.
pub trait Ui {
    /// Show the state along with the outcome of the last turn.
    fn render(&mut self, state: &GameState, feedback: &Feedback) -> io::Result<()>;

    /// Block until the player typed a line. `None` means the input is gone.
    fn request_move(&mut self, state: &GameState, moves: &[&str]) -> io::Result<Option<String>>;
}

/// Draws the table as monospace text:
///
/// ```text
/// 0 move(s) played in 00:00:29 for 0 points
///
///     O                      SA      SB      SC      SD
///    ♤ 9                     _ _     _ _     _ _     _ _
///
///     A       B       C       D       E       F       G
///  0 ♦ 6     ? ?     ? ?     ? ?     ? ?     ? ?     ? ?
///  1         ♤ 8     ? ?     ? ?     ? ?     ? ?     ? ?
/// ...
///
/// Waste [♦ 2, ♤ 9]
/// Foundations []
/// ```
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
    ascii: bool,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W, ascii: bool) -> Self {
        Self {
            input,
            output,
            ascii,
            clear_screen: true,
        }
    }

    pub fn without_clear_screen(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn card_string(&self, card: Card) -> String {
        card.short_string(self.ascii)
    }

    fn top_string(&self, deck: &Deck) -> Cell {
        match deck.top() {
            Some(card) => Cell::card(self.card_string(card), card),
            None => Cell::plain("_ _"),
        }
    }

    fn board(&self, state: &GameState) -> String {
        let mut out = String::new();
        out.push_str(&state.summary_at(Instant::now()));
        out.push_str("\n\n");

        pad_n_add(&mut out, &Cell::plain(""), FIRST_COLUMN_WIDTH);
        pad_n_add(&mut out, &Cell::plain("O"), COLUMN_WIDTH);
        pad_n_add(&mut out, &Cell::plain(""), COLUMN_WIDTH * 2);
        for label in FOUNDATION_LABELS {
            pad_n_add(&mut out, &Cell::plain(label), COLUMN_WIDTH);
        }
        finish_line(&mut out);

        pad_n_add(&mut out, &Cell::plain(""), FIRST_COLUMN_WIDTH);
        pad_n_add(&mut out, &self.top_string(state.waste()), COLUMN_WIDTH);
        pad_n_add(&mut out, &Cell::plain(""), COLUMN_WIDTH * 2);
        for foundation in state.foundations() {
            pad_n_add(&mut out, &self.top_string(foundation), COLUMN_WIDTH);
        }
        finish_line(&mut out);
        out.push('\n');

        pad_n_add(&mut out, &Cell::plain(""), FIRST_COLUMN_WIDTH);
        for label in COLUMN_LABELS {
            pad_n_add(&mut out, &Cell::plain(label), COLUMN_WIDTH);
        }
        finish_line(&mut out);

        let mut row = 0;
        while self.print_row(&mut out, state.columns(), row) {
            row += 1;
        }

        out.push('\n');
        out.push_str(&format!("Waste {}\n", state.waste().to_plain_string(self.ascii)));
        out.push_str(&format!("Foundations {}\n", self.foundation_progress(state)));
        out
    }

    /// Foundation tops from the least to the most advanced, e.g.
    /// `[♥ 2 < ♧ 5 = ♤ 5]`. Empty foundations are left out.
    fn foundation_progress(&self, state: &GameState) -> String {
        let mut tops = Deck::new(DeckKind::Foundation);
        tops.extend(state.foundations().iter().filter_map(Deck::top));
        tops.to_comparative_string(self.ascii, |a, b| a.rank().value().cmp(&b.rank().value()))
    }

    /// Adds one row across all columns. Returns false, adding nothing, if
    /// no column reaches that row.
    fn print_row(&self, out: &mut String, columns: &[Deck], row: usize) -> bool {
        if columns.iter().all(|column| column.len() <= row) {
            return false;
        }
        pad_n_add(out, &Cell::plain(row.to_string()), FIRST_COLUMN_WIDTH);
        for column in columns {
            let cell = match column.get(row) {
                Some(_) if !column.is_visible(row) => Cell::plain("? ?"),
                Some(card) => Cell::card(self.card_string(card), card),
                None => Cell::plain(""),
            };
            pad_n_add(out, &cell, COLUMN_WIDTH);
        }
        finish_line(out);
        true
    }
}

impl<R: BufRead, W: Write> Ui for TerminalUi<R, W> {
    fn render(&mut self, state: &GameState, feedback: &Feedback) -> io::Result<()> {
        if self.clear_screen {
            write!(self.output, "{}", CLEAR_SCREEN)?;
        }
        let board = self.board(state);
        write!(self.output, "{}", board)?;
        match feedback {
            Feedback::Info(message) => writeln!(self.output, "{}", message)?,
            Feedback::Error(message) => writeln!(self.output, "{}", message.red())?,
        }
        self.output.flush()
    }

    fn request_move(&mut self, _state: &GameState, moves: &[&str]) -> io::Result<Option<String>> {
        writeln!(self.output, "{}", moves.join(", "))?;
        writeln!(self.output, "What would you like to do?")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}

/// A piece of text for one cell, red when it shows a red card.
struct Cell {
    text: String,
    red: bool,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            red: false,
        }
    }

    fn card(text: String, card: Card) -> Self {
        Self {
            text,
            red: is_red(card),
        }
    }
}

/// Left-pads single characters by one space, then right-pads to
/// `total` characters. Colour is applied after padding so escape codes
/// do not count towards the width.
fn pad_n_add(out: &mut String, cell: &Cell, total: usize) {
    let mut text = String::new();
    if cell.text.chars().count() == 1 {
        text.push(' ');
    }
    text.push_str(&cell.text);
    let width = text.chars().count();
    if width < total {
        text.push_str(&" ".repeat(total - width));
    }
    if cell.red {
        out.push_str(&text.red().to_string());
    } else {
        out.push_str(&text);
    }
}

fn finish_line(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}
