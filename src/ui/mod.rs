//! Terminal rendering surface.
//!
//! The session controller only hands over state snapshots through the
//! [`Surface`] trait; everything terminal-specific (raw mode, alternate
//! screen, refresh throttling) lives here.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use ratatui::{Frame, Terminal, TerminalOptions, Viewport};

use crate::event::Severity;
use crate::panels;
use crate::scan::ScanState;

/// Minimum interval between redraws (up to 4 frames per second).
const REFRESH_INTERVAL: Duration = Duration::from_millis(250);

/// Viewport height for the one-shot demo frame.
pub const DEMO_VIEWPORT_HEIGHT: u16 = 24;

/// The rendering capability the session controller drives.
///
/// `redraw` may be throttled by the implementation; `redraw_final` must
/// draw so the last frame of a session is never dropped.
pub trait Surface {
    /// Redraw all panels from a state snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be drawn to.
    fn redraw(&mut self, state: &ScanState) -> io::Result<()>;

    /// Redraw unconditionally, bypassing any throttle.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be drawn to.
    fn redraw_final(&mut self, state: &ScanState) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy)]
enum SurfaceMode {
    Fullscreen,
    Inline(u16),
}

/// Live terminal surface backed by ratatui + crossterm.
///
/// Terminal setup is deferred until the first frame is drawn, so a session
/// that fails before rendering (missing scanner binary) never touches the
/// terminal. Fullscreen mode restores the terminal on drop.
pub struct TuiSurface {
    mode: SurfaceMode,
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    raw_mode: bool,
    last_draw: Option<Instant>,
}

impl TuiSurface {
    /// Alternate-screen surface for live scans.
    #[must_use]
    pub fn fullscreen() -> Self {
        Self {
            mode: SurfaceMode::Fullscreen,
            terminal: None,
            raw_mode: false,
            last_draw: None,
        }
    }

    /// Inline surface that draws into the normal scrollback, used for the
    /// one-shot demo frame.
    #[must_use]
    pub fn inline(height: u16) -> Self {
        Self {
            mode: SurfaceMode::Inline(height),
            terminal: None,
            raw_mode: false,
            last_draw: None,
        }
    }

    fn terminal(&mut self) -> io::Result<&mut Terminal<CrosstermBackend<Stdout>>> {
        match &mut self.terminal {
            Some(terminal) => Ok(terminal),
            slot @ None => {
                let terminal = match self.mode {
                    SurfaceMode::Fullscreen => {
                        enable_raw_mode()?;
                        self.raw_mode = true;
                        let mut stdout = io::stdout();
                        execute!(stdout, EnterAlternateScreen)?;
                        Terminal::new(CrosstermBackend::new(stdout))?
                    }
                    SurfaceMode::Inline(height) => Terminal::with_options(
                        CrosstermBackend::new(io::stdout()),
                        TerminalOptions {
                            viewport: Viewport::Inline(height),
                        },
                    )?,
                };
                Ok(slot.insert(terminal))
            }
        }
    }

    fn draw(&mut self, state: &ScanState) -> io::Result<()> {
        let terminal = self.terminal()?;
        terminal.draw(|frame| render(frame, state))?;
        self.last_draw = Some(Instant::now());
        Ok(())
    }
}

impl Surface for TuiSurface {
    fn redraw(&mut self, state: &ScanState) -> io::Result<()> {
        if let Some(last) = self.last_draw {
            if last.elapsed() < REFRESH_INTERVAL {
                return Ok(());
            }
        }
        self.draw(state)
    }

    fn redraw_final(&mut self, state: &ScanState) -> io::Result<()> {
        self.draw(state)
    }
}

impl Drop for TuiSurface {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = disable_raw_mode();
            if let Some(terminal) = &mut self.terminal {
                let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
                let _ = terminal.show_cursor();
            }
        }
    }
}

/// Color class for a severity. Total: unknown severities render white.
#[must_use]
pub fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Critical => Color::Red,
        Severity::High => Color::Yellow,
        Severity::Medium => Color::LightRed,
        Severity::Low => Color::Blue,
        Severity::Info => Color::Cyan,
        Severity::Other(_) => Color::White,
    }
}

/// Compose all four panels into the frame.
pub fn render(frame: &mut Frame, state: &ScanState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title bar
            Constraint::Min(0),     // Results
            Constraint::Length(12), // Visualizer + controls
        ])
        .split(frame.size());

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    render_title(frame, chunks[0]);
    render_results(frame, state, chunks[1]);
    render_visualizer(frame, state, bottom[0]);
    render_controls(frame, state, bottom[1]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Span::styled(
        panels::title(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(title, area);
}

fn render_results(frame: &mut Frame, state: &ScanState, area: Rect) {
    let rows: Vec<Row> = panels::results_rows(state)
        .into_iter()
        .map(|row| {
            let (label, style) = match &row.severity {
                Some(severity) => (
                    severity.label(),
                    Style::default()
                        .fg(severity_color(severity))
                        .add_modifier(Modifier::BOLD),
                ),
                None => ("----".to_string(), Style::default().fg(Color::DarkGray)),
            };
            Row::new(vec![
                Cell::from(Span::styled(row.time, Style::default().fg(Color::Cyan))),
                Cell::from(Span::styled(label, style)),
                Cell::from(Span::styled(
                    row.template,
                    Style::default().fg(Color::Magenta),
                )),
                Cell::from(row.location),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(26),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Time", "Severity", "Template", "URL"]).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Cyan))
                .title(panels::results_title(state)),
        );
    frame.render_widget(table, area);
}

fn render_visualizer(frame: &mut Frame, state: &ScanState, area: Rect) {
    let mut lines: Vec<Line> = panels::severity_bars(state.tally())
        .into_iter()
        .map(|bar| {
            let fill = "\u{2588}".repeat(bar.width);
            Line::from(vec![
                Span::styled(
                    format!("{:8}\u{2502}", bar.severity.label()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{fill:<width$}", width = panels::BAR_WIDTH),
                    Style::default().fg(severity_color(&bar.severity)),
                ),
                Span::styled(
                    format!("\u{2502} {:3}", bar.count),
                    Style::default().fg(Color::Cyan),
                ),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Total Found: {}", state.tally().total()),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));

    let visualizer = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(Color::Green))
            .title("SEVERITY STATS"),
    );
    frame.render_widget(visualizer, area);
}

fn render_controls(frame: &mut Frame, state: &ScanState, area: Rect) {
    let indicator = panels::status_indicator(state.status());
    let light = if indicator.active {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };

    let controls = Paragraph::new(Line::from(vec![
        Span::styled("\u{25cf} ", light),
        Span::styled(
            format!("Status: {}", indicator.label),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title("CONTROLS"),
    );
    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_color_is_total() {
        for severity in Severity::FIXED {
            // Distinct from the unknown-severity fallback
            assert_ne!(severity_color(&severity), Color::White);
        }
        assert_eq!(
            severity_color(&Severity::Other("urgent".to_string())),
            Color::White
        );
    }

    #[test]
    fn same_severity_same_color() {
        assert_eq!(
            severity_color(&Severity::parse("CRITICAL")),
            severity_color(&Severity::Critical)
        );
    }
}
