//! Quote-aware row scanner
//!
//! A single left-to-right pass with one character of lookahead. The only
//! state carried between characters is whether the scanner is inside a
//! quoted field, plus the field and row accumulators.

use crate::constants::{DELIMITER, QUOTE};
use std::iter::Peekable;
use std::str::Chars;

/// Quoting state of the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Unquoted,
    Quoted,
}

/// Splits text into rows of raw (untrimmed) fields
///
/// Rows whose fields are all empty after trimming are skipped. Iteration
/// yields the retained rows in source order.
#[derive(Debug)]
pub struct RowScanner<'a> {
    chars: Peekable<Chars<'a>>,
    state: QuoteState,
    field: String,
    row: Vec<String>,
    finished: bool,
    rows_scanned: usize,
    blank_rows: usize,
}

impl<'a> RowScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            state: QuoteState::Unquoted,
            field: String::new(),
            row: Vec::new(),
            finished: false,
            rows_scanned: 0,
            blank_rows: 0,
        }
    }

    /// Current quoting state; `Quoted` after exhaustion means an unterminated quote
    pub fn state(&self) -> QuoteState {
        self.state
    }

    /// Physical rows closed so far, blank ones included
    pub fn rows_scanned(&self) -> usize {
        self.rows_scanned
    }

    /// Rows skipped because every field was blank
    pub fn blank_rows(&self) -> usize {
        self.blank_rows
    }

    /// Apply one character to the state machine, returning a completed row if
    /// the character closed one
    fn step(&mut self, ch: char) -> Option<Vec<String>> {
        match (self.state, ch) {
            (QuoteState::Unquoted, QUOTE) => {
                self.state = QuoteState::Quoted;
                None
            }
            (QuoteState::Quoted, QUOTE) => {
                if self.chars.next_if_eq(&QUOTE).is_some() {
                    self.field.push(QUOTE);
                } else {
                    self.state = QuoteState::Unquoted;
                }
                None
            }
            (QuoteState::Unquoted, DELIMITER) => {
                self.close_field();
                None
            }
            (QuoteState::Unquoted, '\r') => {
                self.chars.next_if_eq(&'\n');
                self.close_row()
            }
            (QuoteState::Unquoted, '\n') => self.close_row(),
            (_, ch) => {
                self.field.push(ch);
                None
            }
        }
    }

    fn close_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
    }

    fn close_row(&mut self) -> Option<Vec<String>> {
        self.close_field();
        self.rows_scanned += 1;
        let row = std::mem::take(&mut self.row);
        if row.iter().all(|f| f.trim().is_empty()) {
            self.blank_rows += 1;
            None
        } else {
            Some(row)
        }
    }
}

impl Iterator for RowScanner<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ch) = self.chars.next() {
            if let Some(row) = self.step(ch) {
                return Some(row);
            }
        }

        if self.finished {
            return None;
        }
        self.finished = true;

        // Input ending on a line break leaves nothing pending
        if self.row.is_empty() && self.field.is_empty() {
            return None;
        }
        self.close_row()
    }
}
