use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Board, Cell, Game};
use crate::input::{Menu, MenuAction};
use crate::metrics::SessionStats;

const LIGHT_SQUARE: Color = Color::Rgb(210, 210, 210);
const DARK_SQUARE: Color = Color::Rgb(180, 180, 180);
const SNAKE_HEAD: Color = Color::Rgb(0, 100, 0);
const SNAKE_BODY: Color = Color::Rgb(0, 255, 0);
const FOOD: Color = Color::Rgb(255, 0, 0);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame. Returns the clickable menu when the game is over.
    pub fn render(&self, frame: &mut Frame, game: &Game, stats: &SessionStats) -> Option<Menu> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(game, stats), chunks[0]);

        let board_area = Self::board_area(chunks[1], game.board(), game.config().cell_size);

        let menu = if game.status().is_playing() {
            frame.render_widget(self.render_board(game), board_area);
            None
        } else {
            let menu = Menu::game_over(board_area);
            self.render_game_over(frame, board_area, game, &menu);
            Some(menu)
        };

        frame.render_widget(self.render_controls(game), chunks[2]);

        menu
    }

    /// Bordered rectangle for the board, centred in `area` and clipped to it
    pub fn board_area(area: Rect, board: &Board, cell_size: u16) -> Rect {
        let width = (board.width() as u32 * cell_size as u32 + 2).min(area.width as u32) as u16;
        let height = (board.height() as u32 + 2).min(area.height as u32) as u16;

        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    fn render_header(&self, game: &Game, stats: &SessionStats) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled(
                "Snake",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Score: ", label),
            Span::styled(game.score().to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(stats.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(stats.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_board(&self, game: &Game) -> Paragraph<'_> {
        let board = game.board();
        let snake = game.snake();
        let food = game.food().position();
        let cell_size = game.config().cell_size as usize;

        let mut lines = Vec::with_capacity(board.height());

        for y in 0..board.height() as i32 {
            let mut spans = Vec::with_capacity(board.width());

            for x in 0..board.width() as i32 {
                let cell = Cell::new(x, y);
                let square = if (x + y) % 2 == 0 {
                    LIGHT_SQUARE
                } else {
                    DARK_SQUARE
                };
                let style = Style::default().bg(square);

                let span = if cell == snake.head() {
                    Span::styled(
                        glyph('■', cell_size),
                        style.fg(SNAKE_HEAD).add_modifier(Modifier::BOLD),
                    )
                } else if snake.occupies(cell) {
                    Span::styled(glyph('■', cell_size), style.fg(SNAKE_BODY))
                } else if cell == food {
                    Span::styled(glyph('●', cell_size), style.fg(FOOD))
                } else {
                    Span::styled(" ".repeat(cell_size), style)
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_game_over(&self, frame: &mut Frame, area: Rect, game: &Game, menu: &Menu) {
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
            area,
        );

        let centre_row = area.y + area.height / 2;
        let text_rows = [
            (
                centre_row.saturating_sub(2),
                Line::from(Span::styled(
                    "You lost!",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
            ),
            (
                centre_row,
                Line::from(vec![
                    Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        game.score().to_string(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                ]),
            ),
        ];

        for (row, line) in text_rows {
            if row > area.y && row + 1 < area.bottom() {
                let rect = Rect::new(area.x, row, area.width, 1);
                frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), rect);
            }
        }

        for item in menu.items() {
            let colour = match item.action {
                MenuAction::Restart => Color::Green,
                MenuAction::Quit => Color::Red,
            };
            frame.render_widget(
                Paragraph::new(item.label)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(colour).add_modifier(Modifier::BOLD)),
                item.region,
            );
        }
    }

    fn render_controls(&self, game: &Game) -> Paragraph<'_> {
        let text = if game.status().is_playing() {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        } else {
            Line::from(vec![
                Span::raw("Click a button, or press "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" to restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `ch` padded to `width` columns
fn glyph(ch: char, width: usize) -> String {
    let mut s = String::with_capacity(width * 3);
    s.push(ch);
    s.extend(std::iter::repeat(' ').take(width.saturating_sub(1)));
    s
}
