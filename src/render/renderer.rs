use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::result_banner;
use crate::game::{Cell, Simulation, SimulationState, SimulationStatus, Tile};
use crate::metrics::SessionMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        sim: &Simulation,
        metrics: &SessionMetrics,
        paused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Grid
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(sim, metrics, paused), chunks[0]);

        let grid_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        frame.render_widget(self.render_grid(sim.state(), sim.status()), grid_area);
        frame.render_widget(self.render_controls(sim.status()), chunks[2]);
    }

    fn render_grid(&self, state: &SimulationState, status: SimulationStatus) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid.rows() + 2);

        for row in 0..state.grid.rows() {
            let spans: Vec<Span> = (0..state.grid.cols())
                .map(|col| {
                    let cell = Cell::new(row as i32, col as i32);
                    match state.grid.get(cell) {
                        Some(Tile::SnakeBody) if cell == head => Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Some(Tile::SnakeBody) => {
                            Span::styled("□ ", Style::default().fg(Color::Green))
                        }
                        Some(Tile::Food) => Span::styled(
                            "$ ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Some(Tile::Wall) => {
                            Span::styled("# ", Style::default().fg(Color::Gray))
                        }
                        _ => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    }
                })
                .collect();

            lines.push(Line::from(spans));
        }

        let border_color = match status {
            SimulationStatus::Running => Color::White,
            SimulationStatus::Won => Color::Green,
            SimulationStatus::Lost => Color::Red,
        };

        if let Some(banner) = result_banner(status) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                banner,
                Style::default()
                    .fg(border_color)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(" Reflex Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        sim: &Simulation,
        metrics: &SessionMetrics,
        paused: bool,
    ) -> Paragraph<'_> {
        let state = sim.state();
        let mut spans = vec![
            Span::styled("Food eaten: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}/{}", state.eaten, sim.win_threshold()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.ticks.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{} ({} won)", metrics.games_played, metrics.games_won),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_eaten.to_string(),
                Style::default().fg(Color::White),
            ),
        ];

        if paused {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_controls(&self, status: SimulationStatus) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" new game | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ];
        if status.is_finished() {
            spans.insert(0, Span::raw("Game over | "));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{parse_level, ReflexPolicy};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(sim: &Simulation, paused: bool) -> String {
        screen_text_with(sim, &SessionMetrics::new(), paused)
    }

    fn screen_text_with(sim: &Simulation, metrics: &SessionMetrics, paused: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, sim, metrics, paused))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn sim(text: &str) -> Simulation {
        Simulation::with_rng(
            parse_level(text).unwrap(),
            ReflexPolicy::new(0.0),
            20,
            SmallRng::seed_from_u64(0),
        )
    }

    #[test]
    fn test_header_and_grid_drawn() {
        let sim = sim("4 4\n1 0\n####\n#  #\n#*$#\n####\n");
        let text = screen_text(&sim, false);
        assert!(text.contains("Food eaten: 0/20"));
        assert!(text.contains("Reflex Snake"));
        assert!(text.contains("■"));
        assert!(!text.contains("PAUSED"));
    }

    #[test]
    fn test_best_eaten_shown() {
        let sim = sim("4 4\n1 0\n####\n#  #\n#*$#\n####\n");
        let mut metrics = SessionMetrics::new();
        metrics.on_game_over(SimulationStatus::Lost, 13);
        metrics.on_game_over(SimulationStatus::Lost, 4);

        let text = screen_text_with(&sim, &metrics, false);
        assert!(text.contains("Best: 13"));
        assert!(text.contains("Games: 2 (0 won)"));
    }

    #[test]
    fn test_paused_indicator() {
        let sim = sim("4 4\n1 0\n####\n#  #\n#*$#\n####\n");
        assert!(screen_text(&sim, true).contains("PAUSED"));
    }

    #[test]
    fn test_loss_banner() {
        let mut sim = sim("3 3\n1 0\n###\n#*#\n###\n");
        assert_eq!(sim.tick(), SimulationStatus::Lost);
        assert!(screen_text(&sim, false).contains("CRASHED!!!"));
    }
}
