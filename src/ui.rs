//! Terminal UI rendering with ratatui

use crate::board::{Cell, BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::{Game, GameState};
use crate::settings::Settings;
use crate::tetromino::TetrominoType;
use crate::timer::Scheduler;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Total width needed: board(22) + next/stats(16) = 38
const GAME_WIDTH: u16 = 38;
/// Total height needed: board(20) + 2 for borders
const GAME_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;

/// Render the whole game screen
pub fn render_game<S: Scheduler>(frame: &mut Frame, game: &Game<S>, settings: &Settings) {
    let area = frame.area();
    let (block_char, _) = settings.visual.block_chars();

    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_WIDTH as u16 * 2 + 2),
            Constraint::Length(16),
        ])
        .split(game_area);

    render_board(frame, main_layout[0], game, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Next piece
            Constraint::Min(6),    // Stats
        ])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], game.next_piece(), block_char);
    render_stats(frame, right_layout[1], game);

    match game.state() {
        GameState::Idle => render_overlay(frame, area, "BLOCKTRIS", "Press Enter to start"),
        GameState::GameOver => {
            let subtitle = format!("Score {} - Enter to retry", game.score().points);
            render_overlay(frame, area, "GAME OVER", &subtitle);
        }
        GameState::Running => {}
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the next piece preview
fn render_next(frame: &mut Frame, area: Rect, next: Option<TetrominoType>, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(kind) = next {
        render_mini_piece(frame, inner, kind, block_char);
    }
}

/// Render a small piece preview
fn render_mini_piece(frame: &mut Frame, area: Rect, kind: TetrominoType, block_char: &str) {
    if area.height < 1 || area.width < 4 {
        return;
    }

    let color = kind.color();
    let shape = kind.shape();

    let lines: Vec<Line> = (0..shape.height())
        .map(|row| {
            let spans: Vec<Span> = (0..shape.width())
                .map(|col| {
                    if shape.is_filled(row, col) {
                        Span::styled(block_char, Style::default().fg(color))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the game board with the falling piece and its ghost
fn render_board<S: Scheduler>(frame: &mut Frame, area: Rect, game: &Game<S>, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();
    let show_ghost = settings.visual.show_ghost;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let piece = game.current_piece();
    let ghost_row = if show_ghost { game.ghost_row() } else { None };

    let lines: Vec<Line> = game
        .board()
        .rows()
        .enumerate()
        .map(|(row, cells)| {
            let row = row as i32;
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let col = col as i32;
                    let covers = |top: i32| {
                        piece.is_some_and(|p| {
                            p.shape
                                .filled()
                                .any(|(dr, dc)| top + dr == row && p.col + dc == col)
                        })
                    };

                    if let Some(p) = piece.filter(|p| covers(p.row)) {
                        Span::styled(block_char, Style::default().fg(p.color()))
                    } else if let (Some(p), Some(ghost)) = (piece, ghost_row) {
                        if covers(ghost) {
                            Span::styled(ghost_char, Style::default().fg(p.color()).dim())
                        } else {
                            cell_span(*cell, block_char)
                        }
                    } else {
                        cell_span(*cell, block_char)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

fn cell_span(cell: Cell, block_char: &str) -> Span<'_> {
    match cell {
        Cell::Filled(color) => Span::styled(block_char, Style::default().fg(color)),
        Cell::Empty => Span::raw(EMPTY),
    }
}

/// Label plus value, followed by a spacer line
fn stat(label: &'static str, value: u64, style: Style) -> [Line<'static>; 3] {
    [
        Line::styled(label, Style::default().fg(Color::Gray)),
        Line::styled(value.to_string(), style),
        Line::raw(""),
    ]
}

/// Render stats panel
fn render_stats<S: Scheduler>(frame: &mut Frame, area: Rect, game: &Game<S>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = game.score();
    let lines: Vec<Line> = [
        stat("SCORE", score.points, Style::default().fg(Color::Yellow).bold()),
        stat("LEVEL", score.level as u64, Style::default().fg(Color::Cyan)),
        stat("LINES", score.lines as u64, Style::default().fg(Color::Green)),
    ]
    .into_iter()
    .flatten()
    .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for start and game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 30u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::IntervalTimer;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(game: &Game<IntervalTimer>) -> String {
        let backend = TestBackend::new(60, 26);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_game(frame, game, &Settings::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_idle_shows_start_prompt() {
        let game = Game::default();
        let screen = draw(&game);
        assert!(screen.contains("Press Enter to start"));
        assert!(screen.contains("SCORE"));
    }

    #[test]
    fn test_running_shows_piece_and_ghost() {
        let mut game = Game::default();
        game.start();
        let screen = draw(&game);
        assert!(screen.contains("██"));
        assert!(screen.contains("░░"));
        assert!(!screen.contains("Press Enter"));
    }
}
