//! Front-end state.

use super::input::{digit_cell, move_cursor};
use crate::controller::{GameEvent, GameSnapshot};
use bitcoin_toe_game::{Persona, Phase, Position};
use crossterm::event::KeyCode;
use std::collections::VecDeque;
use tracing::debug;

const MAX_NOTICES: usize = 4;

/// What a key press asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to send.
    None,
    /// Start a game as this persona.
    Select(Persona),
    /// Click a cell.
    Click(usize),
    /// Leave the application.
    Quit,
}

/// Latest state from the controller plus local cursor state.
#[derive(Debug)]
pub struct App {
    snapshot: Option<GameSnapshot>,
    cursor: Position,
    highlighted: Persona,
    notices: VecDeque<String>,
}

impl App {
    /// Creates an application waiting for its first snapshot.
    pub fn new() -> Self {
        Self {
            snapshot: None,
            cursor: Position::Center,
            highlighted: Persona::DonaldTrump,
            notices: VecDeque::new(),
        }
    }

    /// Latest snapshot, if one arrived.
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    /// Phase of the latest snapshot.
    pub fn phase(&self) -> Phase {
        self.snapshot
            .as_ref()
            .map_or(Phase::SelectingCharacter, |s| s.phase)
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Persona highlighted on the selection screen.
    pub fn highlighted(&self) -> Persona {
        self.highlighted
    }

    /// Recent notices, oldest first.
    pub fn notices(&self) -> impl Iterator<Item = &str> {
        self.notices.iter().map(String::as_str)
    }

    /// Applies an event from the controller.
    pub fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::StateChanged(snapshot) => self.snapshot = Some(snapshot),
            GameEvent::Notice(text) => {
                debug!(notice = %text, "Showing notice");
                if self.notices.len() == MAX_NOTICES {
                    self.notices.pop_front();
                }
                self.notices.push_back(text);
            }
        }
    }

    /// Translates a key press for the current phase.
    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        if matches!(key, KeyCode::Char('q') | KeyCode::Esc) {
            return Action::Quit;
        }

        match self.phase() {
            Phase::SelectingCharacter => match key {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    self.highlighted = self.highlighted.opponent();
                    Action::None
                }
                KeyCode::Char('1') => Action::Select(Persona::DonaldTrump),
                KeyCode::Char('2') => Action::Select(Persona::KamalaHarris),
                KeyCode::Enter => Action::Select(self.highlighted),
                _ => Action::None,
            },
            Phase::InProgress => match key {
                KeyCode::Char(c) if digit_cell(c).is_some() => {
                    digit_cell(c).map_or(Action::None, Action::Click)
                }
                KeyCode::Enter | KeyCode::Char(' ') => Action::Click(self.cursor.to_index()),
                KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                    self.cursor = move_cursor(self.cursor, key);
                    Action::None
                }
                _ => Action::None,
            },
            Phase::Won(_) | Phase::Drawn => Action::None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
