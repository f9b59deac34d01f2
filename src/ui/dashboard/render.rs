use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use unicode_width::UnicodeWidthStr;

use super::app::DashboardApp;
use super::widgets::{ack_glyph, status_style};
use crate::core::monitor::items::Item;

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Items table
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_items_table(frame, chunks[0], app);
    render_footer(frame, chunks[1], app);
}

/// Render the problems table with the selected row highlighted
fn render_items_table(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let title = format!(" Problems ({}) ", app.items().len());
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return; // Not enough space for header + at least one row
    }

    let header = Row::new(vec![
        Cell::from("Host").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Status").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Description").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Time").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Ack").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .height(1);

    let rows: Vec<Row> = app
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.selected_index {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(item.host.clone()),
                Cell::from(item.status.clone()).style(status_style(&item.status)),
                Cell::from(item.description.clone()),
                Cell::from(item.time.clone()),
                Cell::from(ack_glyph(item.ack)),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(rows, column_widths(app.items())).header(header);
    frame.render_widget(table, inner);
}

/// Column widths sized to the widest value in each column.
fn column_widths(items: &[Item]) -> [Constraint; 5] {
    let mut host_width = "Host".width();
    let mut status_width = "Status".width();
    let mut desc_width = "Description".width();
    let mut time_width = "Time".width();

    for item in items {
        host_width = host_width.max(item.host.width());
        status_width = status_width.max(item.status.width());
        desc_width = desc_width.max(item.description.width());
        time_width = time_width.max(item.time.width());
    }

    [
        Constraint::Length(host_width as u16),
        Constraint::Length(status_width as u16),
        Constraint::Length(desc_width as u16),
        Constraint::Length(time_width as u16),
        Constraint::Length(3),
    ]
}

fn render_footer(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let help = format!(
        " r: Refresh │ o/Enter: Open │ q: Quit │ next refresh in {}s ",
        app.seconds_until_refresh()
    );
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
