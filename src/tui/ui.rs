//! Stateless rendering of the board view.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tictac_core::{
    AnimationFrame, Board, Cell, Coord, EngineError, FrameTone, GameState, GameStatus, Mark, Mask,
    Pacing, Renderer, end_animation,
};
use tracing::{debug, instrument};

use super::Tui;

/// Seat labels shown around the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchView {
    /// Who plays X.
    pub x_label: String,
    /// Who plays O.
    pub o_label: String,
}

impl MatchView {
    fn label(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x_label,
            Mark::O => &self.o_label,
        }
    }
}

fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::X => Color::Blue,
        Mark::O => Color::Red,
    }
}

/// One picture of the grid: marks, emphasised cells and their colour.
#[derive(Debug, Clone, Copy)]
struct BoardView<'a> {
    board: &'a Board,
    highlight: Mask,
    tint: Color,
}

impl<'a> BoardView<'a> {
    fn of_state(state: &'a GameState) -> Self {
        let tint = match state.status() {
            GameStatus::Running => mark_color(state.turn()),
            GameStatus::Won(_) => Color::Green,
            GameStatus::Draw => Color::Yellow,
        };
        Self {
            board: state.board(),
            highlight: state.highlight(),
            tint,
        }
    }

    fn of_frame(step: &'a AnimationFrame) -> Self {
        let tint = match step.tone {
            FrameTone::Win => Color::Green,
            FrameTone::Fill => Color::Yellow,
        };
        Self {
            board: &step.board,
            highlight: step.highlight,
            tint,
        }
    }
}

/// Status line for `state`.
pub fn banner(state: &GameState, view: &MatchView) -> String {
    match state.status() {
        GameStatus::Running => format!("{} to move: {}", state.turn(), view.label(state.turn())),
        GameStatus::Draw => "Draw! Enter: continue | Esc: back to menu".to_string(),
        GameStatus::Won(mark) => format!(
            "{} wins ({})! Enter: continue | Esc: back to menu",
            mark,
            view.label(mark)
        ),
    }
}

/// Renders the board, banner and move counter.
pub fn draw(frame: &mut Frame, state: &GameState, view: &MatchView) {
    draw_with_board(frame, state, view, BoardView::of_state(state));
}

/// Renders `state` with the grid taken from one animation frame.
pub fn draw_animation_frame(
    frame: &mut Frame,
    state: &GameState,
    view: &MatchView,
    step: &AnimationFrame,
) {
    draw_with_board(frame, state, view, BoardView::of_frame(step));
}

fn draw_with_board(frame: &mut Frame, state: &GameState, view: &MatchView, grid: BoardView) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(9),    // Board
            Constraint::Length(3), // Banner
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new(format!(
        "X: {}   vs   O: {}   (move {})",
        view.x_label,
        view.o_label,
        state.moves()
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Tic-Tac-Toe"));
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], grid);

    let status = Paragraph::new(banner(state, view))
        .style(Style::default().fg(BoardView::of_state(state).tint))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new("WASD/arrows: move | Space/Enter: place | Q/Esc: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

/// Draws `message` in a titled box over the middle of the screen.
pub fn draw_popup(frame: &mut Frame, title: &str, message: &str) {
    let area = center_rect(frame.area(), 44, 7);
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(popup, area);
}

fn draw_board(frame: &mut Frame, area: Rect, grid: BoardView) {
    let board_area = center_rect(area, 40, 13);
    let framed = Block::default().borders(Borders::ALL);
    let inner = framed.inner(board_area);
    frame.render_widget(framed, board_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(inner);

    for y in 0..3 {
        draw_row(frame, rows[y * 2], grid, y);
        if y < 2 {
            draw_separator(frame, rows[y * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, grid: BoardView, y: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for x in 0..3 {
        if let Some(at) = Coord::new(x, y) {
            draw_cell(frame, cols[x * 2], grid, at);
        }
        if x < 2 {
            draw_separator_vertical(frame, cols[x * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, grid: BoardView, at: Coord) {
    let (symbol, base_style) = match grid.board.get(at) {
        Cell::Empty => ("   ", Style::default().fg(Color::DarkGray)),
        Cell::Occupied(mark) => (
            if mark == Mark::X { " X " } else { " O " },
            Style::default()
                .fg(mark_color(mark))
                .add_modifier(Modifier::BOLD),
        ),
    };

    let style = if grid.highlight.contains(at) {
        base_style.bg(grid.tint).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("──────────────────────────────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

/// Centres a `width` × `height` rectangle inside `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

/// Draws every round of a match to the terminal, then animates the result.
pub struct TuiRenderer<'a> {
    terminal: &'a mut Tui,
    view: MatchView,
    pacing: Pacing,
    rng: StdRng,
}

impl<'a> TuiRenderer<'a> {
    /// Creates a renderer drawing into `terminal`.
    ///
    /// `pacing` times the end-of-game animation and `seed` picks the order
    /// a drawn board is filled in.
    pub fn new(terminal: &'a mut Tui, view: MatchView, pacing: Pacing, seed: u64) -> Self {
        Self {
            terminal,
            view,
            pacing,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws `state` with a popup on top.
    #[instrument(skip(self, state))]
    pub fn render_with_popup(
        &mut self,
        state: &GameState,
        title: &str,
        message: &str,
    ) -> std::io::Result<()> {
        let view = &self.view;
        self.terminal.draw(|f| {
            draw(f, state, view);
            draw_popup(f, title, message);
        })?;
        Ok(())
    }
}

impl Renderer for TuiRenderer<'_> {
    fn render(&mut self, state: &GameState) -> Result<(), EngineError> {
        let view = &self.view;
        self.terminal
            .draw(|f| draw(f, state, view))
            .map_err(|e| EngineError::render(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self, state), fields(status = %state.status()))]
    fn finish(&mut self, state: &GameState) -> Result<(), EngineError> {
        let frames = end_animation(state, &self.pacing, &mut self.rng);
        if frames.is_empty() {
            return Ok(());
        }
        debug!(frames = frames.len(), "Animating result");
        let view = &self.view;
        for step in &frames {
            self.terminal
                .draw(|f| draw_animation_frame(f, state, view, step))
                .map_err(|e| EngineError::render(e.to_string()))?;
            std::thread::sleep(Duration::from_millis(step.hold_ms));
        }
        self.render(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn view() -> MatchView {
        MatchView {
            x_label: "Alice".to_string(),
            o_label: "Machine (random)".to_string(),
        }
    }

    #[test]
    fn test_banner_running() {
        let state = GameState::new(Mark::O);
        assert_eq!(banner(&state, &view()), "O to move: Machine (random)");
    }

    fn highlighted(terminal: &Terminal<TestBackend>, tint: Color, symbol: &str) -> usize {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .filter(|cell| cell.bg == tint && cell.symbol() == symbol)
            .count()
    }

    #[test]
    fn test_animation_frame_draws_overlay_board() {
        let e = Cell::Empty;
        let x = Cell::Occupied(Mark::X);
        let o = Cell::Occupied(Mark::O);
        let state = GameState::from_cells([[x, o, x], [x, o, e], [o, x, e]], Mark::X).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(9);
        let frames = tictac_core::fill_frames(&state, 1, &mut rng);
        let last = frames.last().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| draw_animation_frame(f, &state, &view(), last))
            .unwrap();
        // Only the freshly filled cell is lit.
        let lit = highlighted(&terminal, Color::Yellow, "X") + highlighted(&terminal, Color::Yellow, "O");
        assert_eq!(lit, 1);

        terminal.draw(|f| draw(f, &state, &view())).unwrap();
        // The played board lights every occupied cell and shows no filled marks.
        assert_eq!(highlighted(&terminal, Color::Yellow, "X"), 4);
        assert_eq!(highlighted(&terminal, Color::Yellow, "O"), 3);
    }

    #[test]
    fn test_center_rect_fits() {
        let area = Rect::new(0, 0, 80, 24);
        let centred = center_rect(area, 40, 12);
        assert_eq!(centred.width, 40);
        assert_eq!(centred.height, 12);
        assert_eq!(centred.x, 20);
        assert_eq!(centred.y, 6);
    }
}
