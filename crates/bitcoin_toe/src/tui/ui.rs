//! Stateless rendering.

use super::app::App;
use crate::controller::GameSnapshot;
use bitcoin_toe_game::{Cell, Mark, Persona, Phase, Position};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;

const TITLE: &str = "Crypto Prediction Tic-Tac-Toe: Battle Between Donald and Kamala";

/// Draws one frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Body
            Constraint::Length(3), // Status
            Constraint::Length(6), // Notices
        ])
        .split(frame.area());

    let title = Paragraph::new(TITLE)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match app.snapshot() {
        Some(snapshot) if snapshot.phase != Phase::SelectingCharacter => {
            draw_board(frame, chunks[1], snapshot, app.cursor());
        }
        _ => draw_selection(frame, chunks[1], app.highlighted()),
    }

    let status = Paragraph::new(status_line(app))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let notices: Vec<Line> = app.notices().map(Line::from).collect();
    let notices = Paragraph::new(notices)
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title("Notices"));
    frame.render_widget(notices, chunks[3]);
}

/// Text for the status bar.
pub fn status_line(app: &App) -> String {
    let Some(snapshot) = app.snapshot() else {
        return "Connecting...".to_string();
    };

    let mut status = match snapshot.phase {
        Phase::SelectingCharacter => {
            "Choose your character: 1/2 or arrows + Enter, q to quit".to_string()
        }
        Phase::InProgress if snapshot.opponent_pending => "Opponent is thinking...".to_string(),
        Phase::InProgress => "Your move: 1-9 or arrows + Enter".to_string(),
        Phase::Won(_) => snapshot
            .winner
            .map(|w| format!("{w} wins the game!"))
            .unwrap_or_default(),
        Phase::Drawn => "It's a draw!".to_string(),
    };

    if let Some(game_id) = snapshot.game_id {
        status = format!("Game #{game_id} | {status}");
    }
    if snapshot.transaction_in_flight {
        status.push_str(" | transaction pending");
    }
    status
}

fn draw_selection(frame: &mut Frame, area: Rect, highlighted: Persona) {
    let mut spans = Vec::new();
    for (i, persona) in Persona::iter().enumerate() {
        let style = if persona == highlighted {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" [{}] {} ", i + 1, persona), style));
        spans.push(Span::raw("   "));
    }

    let lines = vec![
        Line::from("Choose your character"),
        Line::from(""),
        Line::from(spans),
        Line::from(""),
        Line::from("Donald wins: BTC up. Kamala wins: BTC down."),
    ];
    let selection = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(selection, center_rect(area, 70, 5));
}

fn draw_board(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot, cursor: Position) {
    let board_area = center_rect(area, 44, 11);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, cells) in Position::ALL.chunks(3).enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(14),
                Constraint::Length(1),
                Constraint::Length(14),
                Constraint::Length(1),
                Constraint::Length(14),
            ])
            .split(rows[row * 2]);

        for (col, &pos) in cells.iter().enumerate() {
            draw_cell(frame, cols[col * 2], snapshot, cursor, pos);
            if col < 2 {
                frame.render_widget(
                    Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray)),
                    cols[col * 2 + 1],
                );
            }
        }
        if row < 2 {
            frame.render_widget(
                Paragraph::new("─".repeat(44)).style(Style::default().fg(Color::DarkGray)),
                rows[row * 2 + 1],
            );
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot, cursor: Position, pos: Position) {
    let (text, base) = match (snapshot.board.get(pos), snapshot.persona) {
        (Cell::Marked(mark), Some(persona)) => {
            let owner = match mark {
                Mark::Player => persona,
                Mark::Opponent => persona.opponent(),
            };
            let color = match owner {
                Persona::DonaldTrump => Color::Red,
                Persona::KamalaHarris => Color::Blue,
            };
            (
                short_name(owner).to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        }
        (Cell::Marked(mark), None) => (mark.symbol().to_string(), Style::default()),
        (Cell::Empty, _) => ((pos.to_index() + 1).to_string(), Style::default().fg(Color::DarkGray)),
    };

    let style = if pos == cursor && snapshot.phase == Phase::InProgress {
        base.bg(Color::White).fg(Color::Black)
    } else {
        base
    };

    let cell = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(text, style))])
        .alignment(Alignment::Center);
    frame.render_widget(cell, area);
}

fn short_name(persona: Persona) -> &'static str {
    match persona {
        Persona::DonaldTrump => "DONALD",
        Persona::KamalaHarris => "KAMALA",
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
