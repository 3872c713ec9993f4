//! Layout and rendering for the askpg TUI.
//!
//! One screen: question input on top, the generated SQL beneath it, the
//! result table below, and a status line with the row count or an inline
//! error notice.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;
use crate::tui::widgets::{calculate_scroll_offset, InputBar, ResultTable};

/// Renders the full UI for the current state.
pub fn render(frame: &mut Frame, app: &App, connection: &str) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Question input
            Constraint::Length(7), // Generated SQL
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    let header_area = main_layout[0];
    let input_area = main_layout[1];
    let sql_area = main_layout[2];
    let results_area = main_layout[3];
    let status_area = main_layout[4];

    render_header(frame, header_area, connection);

    frame.render_widget(
        InputBar::new(&app.input, app.cursor, app.processing),
        input_area,
    );
    if !app.processing {
        // Place the terminal cursor inside the input bar
        let available_width = input_area.width.saturating_sub(5) as usize;
        let offset = calculate_scroll_offset(app.cursor, available_width);
        let x = input_area.x + 3 + (app.cursor - offset) as u16;
        frame.set_cursor_position((x, input_area.y + 1));
    }

    render_sql(frame, sql_area, app);
    render_results(frame, results_area, app);
    render_status(frame, status_area, app);
}

fn render_header(frame: &mut Frame, area: Rect, connection: &str) {
    let header = Line::from(vec![
        Span::styled(
            " askpg ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(connection, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_sql(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Generated SQL ");

    let content = match &app.outcome {
        Some(outcome) => Paragraph::new(outcome.sql.as_str()).wrap(Wrap { trim: false }),
        None => Paragraph::new(Span::styled(
            "No query generated yet.",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(content.block(block), area);
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Results ");

    let error_style = Style::default().fg(Color::Red);
    let dim = Style::default().fg(Color::DarkGray);

    let paragraph = if app.processing {
        Paragraph::new(Span::styled("Working...", dim))
    } else if let Some(notice) = &app.notice {
        Paragraph::new(Span::styled(notice.as_str(), error_style)).wrap(Wrap { trim: false })
    } else if let Some(outcome) = &app.outcome {
        if let Some(error) = &outcome.error {
            Paragraph::new(Span::styled(error.as_str(), error_style)).wrap(Wrap { trim: false })
        } else if let Some(result) = &outcome.result {
            let width = area.width.saturating_sub(2) as usize;
            let lines = ResultTable::new(result).render_to_lines(width);
            Paragraph::new(lines).scroll((app.scroll, 0))
        } else {
            // Sentinel with no message: render nothing
            Paragraph::new("")
        }
    } else {
        Paragraph::new(Span::styled("Results will appear here.", dim))
    };

    frame.render_widget(paragraph.block(block), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let text = if app.processing {
        "Generating SQL and running query...".to_string()
    } else if let Some(outcome) = &app.outcome {
        match (&outcome.result, &outcome.error) {
            (Some(result), _) => format!("Total rows returned: {}", result.row_count),
            (None, _) => "Query failed. Edit your question and press Enter to retry.".to_string(),
        }
    } else if app.notice.is_some() {
        "Request failed. Edit your question and press Enter to retry.".to_string()
    } else {
        "Enter: run   Up/Down: scroll   Ctrl+L: clear   Ctrl+C: quit".to_string()
    };

    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Left),
        area,
    );
}
