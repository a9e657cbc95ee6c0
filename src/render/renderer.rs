use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::view::{MenuItem, Screen, View};
use crate::game::{Direction, GameOverReason, GameState, Level, Phase, Position};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &View) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Main area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        // Center the main area horizontally
        let main_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match view.screen {
            Screen::Menu => frame.render_widget(self.render_menu(view), main_area),
            Screen::LevelSelect => {
                frame.render_widget(self.render_level_select(view.level), main_area)
            }
            Screen::Game => self.render_game(frame, main_area, view),
        }

        frame.render_widget(self.render_controls(view), chunks[2]);
    }

    fn render_game(&self, frame: &mut Frame, area: Rect, view: &View) {
        match view.state.phase {
            Phase::GameOver => {
                frame.render_widget(self.render_game_over(view), area);
            }
            Phase::Paused => {
                frame.render_widget(self.render_grid(view.state), area);
                let popup = centered_rect(30, 5, area);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_pause(), popup);
            }
            Phase::Running | Phase::Idle => {
                frame.render_widget(self.render_grid(view.state), area);
            }
        }
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        head_glyph(state.snake.direction),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.is_occupied_by_snake(pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if state.food == Some(pos) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, view: &View) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                view.state.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", label),
            Span::styled(view.metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(view.level.name(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(view.metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu(&self, view: &View) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let label = item.label(view.sound_enabled);
            let line = if i == view.menu_cursor {
                Line::from(Span::styled(
                    format!("> {label} <"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(label, Style::default().fg(Color::Gray)))
            };
            text.push(line);
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("High score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_level_select(&self, selected: Level) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SELECT LEVEL",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for level in Level::ALL {
            let detail = format!(
                "{:<6} {:>4} ms/step",
                level.name(),
                level.tick_interval().as_millis()
            );
            let line = if level == selected {
                Line::from(Span::styled(
                    format!("> {detail} <"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(detail, Style::default().fg(Color::Gray)))
            };
            text.push(line);
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_pause(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Space to resume",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_game_over(&self, view: &View) -> Paragraph<'_> {
        let headline = match view.state.game_over_reason {
            Some(GameOverReason::BoardCleared) => "BOARD CLEARED!",
            _ => "GAME OVER",
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.metrics.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        if view.new_record {
            text.push(Line::from(Span::styled(
                "NEW RECORD!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Esc",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" for the menu", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, view: &View) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let spans = match view.screen {
            Screen::Menu => vec![
                Span::styled("↑↓", key),
                Span::raw(" choose | "),
                Span::styled("Enter", key),
                Span::raw(" select | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
            Screen::LevelSelect => vec![
                Span::styled("↑↓", key),
                Span::raw(" change level | "),
                Span::styled("Enter", key),
                Span::raw(" or "),
                Span::styled("Esc", key),
                Span::raw(" back"),
            ],
            Screen::Game => vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move | "),
                Span::styled("Space", key),
                Span::raw(" pause | "),
                Span::styled("M", key),
                Span::raw(if view.sound_enabled { " mute | " } else { " unmute | " }),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
        };

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Head glyph pointing the way the snake moves
fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
