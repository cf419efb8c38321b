//! Terminal UI rendering with ratatui

use crate::settings::KeyBindings;
use blockfall::{Cell, GameState, PieceShape, Snapshot};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const BLOCK: &str = "██";
const EMPTY: &str = " .";

/// Side panel: next(6) + score(4) + best(4) + controls(9)
const PANEL_WIDTH: u16 = 18;

/// Extra data the engine does not own
pub struct HudInfo<'a> {
    pub best_score: Option<u32>,
    pub keys: &'a KeyBindings,
}

/// Short label for a configured key name
fn key_name(key: &str) -> String {
    match key.to_lowercase().as_str() {
        "left" => "←".to_string(),
        "right" => "→".to_string(),
        "up" => "↑".to_string(),
        "down" => "↓".to_string(),
        "space" => "Space".to_string(),
        "esc" | "escape" => "Esc".to_string(),
        "enter" => "Enter".to_string(),
        "tab" => "Tab".to_string(),
        _ => key.to_uppercase(),
    }
}

/// Every key bound to an action, slash separated
fn key_label(keys: &[String]) -> String {
    if keys.is_empty() {
        return "-".to_string();
    }
    keys.iter().map(|k| key_name(k)).collect::<Vec<_>>().join("/")
}

fn to_color(color: blockfall::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Render the whole game screen
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, hud: &HudInfo) {
    let area = frame.area();
    // Boards wider or taller than any terminal saturate instead of wrapping
    let board_width = u16::try_from(snapshot.width())
        .unwrap_or(u16::MAX)
        .saturating_mul(2)
        .saturating_add(2);
    let board_height = u16::try_from(snapshot.height())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let game_area = center_rect(
        area,
        board_width.saturating_add(PANEL_WIDTH),
        board_height.max(23),
    );

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Length(PANEL_WIDTH)])
        .split(game_area);

    render_board(frame, main_layout[0], snapshot);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Next piece
            Constraint::Length(4), // Score
            Constraint::Length(4), // Best
            Constraint::Min(9),    // Controls
        ])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], snapshot.next_piece);
    render_number(frame, right_layout[1], " Score ", Some(snapshot.score), Color::LightBlue);
    render_number(frame, right_layout[2], " Best ", hud.best_score, Color::Yellow);
    render_controls(frame, right_layout[3], hud.keys);

    match snapshot.state {
        GameState::Paused => {
            let hints = [format!("{} to resume", key_label(&hud.keys.pause))];
            render_overlay(frame, main_layout[0], "PAUSED", &hints)
        }
        GameState::GameOver => {
            let hints = [
                format!("{} to restart", key_label(&hud.keys.restart)),
                format!("{} to quit", key_label(&hud.keys.quit)),
            ];
            render_overlay(frame, main_layout[0], "GAME OVER", &hints)
        }
        GameState::Running => {}
    }
}

/// Center a rect of the given size within an area
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = snapshot
        .cells
        .iter()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, cell)| match cell {
                    Cell::Filled(color) if snapshot.is_active(x, y) => {
                        Span::styled(BLOCK, Style::default().fg(to_color(*color)).bold())
                    }
                    Cell::Filled(color) => Span::styled(BLOCK, Style::default().fg(to_color(*color))),
                    Cell::Empty => Span::styled(EMPTY, Style::default().fg(Color::DarkGray)),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_next(frame: &mut Frame, area: Rect, shape: PieceShape) {
    let block = Block::default().title(" Next ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let matrix = shape.matrix();
    let style = Style::default().fg(to_color(shape.color()));
    let lines: Vec<Line> = (0..matrix.size())
        .map(|row| {
            let spans: Vec<Span> = (0..matrix.size())
                .map(|col| {
                    if matrix.is_filled(row, col) {
                        Span::styled(BLOCK, style)
                    } else {
                        Span::raw("  ")
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_number(frame: &mut Frame, area: Rect, title: &str, value: Option<u32>, color: Color) {
    let text = value.map_or_else(|| "-".to_string(), |v| v.to_string());
    let paragraph = Paragraph::new(Line::styled(text, Style::default().fg(color).bold()))
        .alignment(Alignment::Center)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_controls(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
    let hint = Style::default().fg(Color::Gray);
    let movement = format!("{} {}", key_label(&keys.move_left), key_label(&keys.move_right));
    let entries = [
        (movement, "move"),
        (key_label(&keys.soft_drop), "soft drop"),
        (key_label(&keys.rotate), "rotate"),
        (key_label(&keys.hard_drop), "hard drop"),
        (key_label(&keys.pause), "pause"),
        (key_label(&keys.restart), "restart"),
        (key_label(&keys.quit), "quit"),
    ];
    let lines: Vec<Line> = entries
        .into_iter()
        .map(|(label, action)| Line::styled(format!("{label:<5} {action}"), hint))
        .collect();
    let paragraph =
        Paragraph::new(lines).block(Block::default().title(" Controls ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_overlay(frame: &mut Frame, area: Rect, title: &str, hints: &[String]) {
    // Border, title and a spacer around one row per hint
    let height = hints.len() as u16 + 4;
    let overlay_area = center_rect(area, area.width.saturating_sub(2), height);
    frame.render_widget(Clear, overlay_area);

    let mut lines = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Red).bold()),
        Line::raw(""),
    ];
    lines.extend(
        hints
            .iter()
            .map(|hint| Line::styled(hint.clone(), Style::default().fg(Color::Gray))),
    );
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, overlay_area);
}
