use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CellRole, GameState};
use crate::metrics::GameMetrics;

use super::board::BoardView;

/// Per-frame facts shown around the board that the game state does not carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub tick_interval_ms: u64,
    pub paused: bool,
    pub rush: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        board: &BoardView,
        state: &GameState,
        metrics: &GameMetrics,
        status: StatusLine,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics, status);
        frame.render_widget(stats, chunks[0]);

        let grid = self.render_grid(board, status);
        frame.render_widget(grid, chunks[1]);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, board: &BoardView, status: StatusLine) -> Paragraph<'static> {
        let grid = board.grid();
        let mut lines = Vec::with_capacity(grid.rows);

        for y in 0..grid.rows {
            let spans: Vec<Span<'static>> = board
                .row(y)
                .iter()
                .map(|role| match role {
                    CellRole::Head => Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    CellRole::Body => Span::styled("■ ", Style::default().fg(Color::Blue)),
                    CellRole::Food => Span::styled(
                        "● ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    CellRole::Blank => Span::styled("· ", Style::default().fg(Color::DarkGray)),
                })
                .collect();

            lines.push(Line::from(spans));
        }

        let title = if status.paused {
            " Snake (paused) "
        } else {
            " Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::Red))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        status: StatusLine,
    ) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Length: ", label),
            Span::styled(
                state.len().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Food: ", label),
            Span::styled(state.score().to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_length.to_string(), value),
            Span::raw("    "),
            Span::styled("Tick: ", label),
            Span::styled(format!("{}ms", status.tick_interval_ms), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ];

        if status.rush {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "RUSH",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }

        let mut text = vec![Line::from(spans)];
        if let Some(last) = metrics.last_game {
            text.push(Line::from(vec![Span::styled(
                format!(
                    "Last game: {} at length {}",
                    last.reason.describe(),
                    last.final_length
                ),
                Style::default().fg(if last.reason.is_win() {
                    Color::Green
                } else {
                    Color::Gray
                }),
            )]));
        }

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("1-3", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
