use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::transaction_table;
use crate::ui::app::{App, Screen};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter
            Constraint::Min(3),    // Pending table
            Constraint::Length(1), // Controls
        ])
        .split(area);

    render_filter(f, chunks[0], app);

    let empty: &[&str] = if app.switch.is_loading() {
        &["Loading transactions…"]
    } else {
        &[
            "No transactions waiting for review",
            "Press f to change the employee filter",
        ]
    };
    transaction_table(
        f,
        chunks[1],
        "Pending",
        app.list(Screen::Review),
        app.cursor(Screen::Review),
        empty,
    );

    render_controls(f, chunks[2], app);
}

fn render_filter(f: &mut Frame, area: Rect, app: &App) {
    let selection = app.switch.selection();
    let mut spans = vec![
        Span::styled(" Employee: ", theme::dim_style()),
        Span::styled(
            selection.to_string(),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if selection.is_empty() {
        if let Some(page) = app.switch.paginated().data() {
            let more = if page.has_more() { "" } else { " (all loaded)" };
            spans.push(Span::styled(
                format!("  {} loaded{more}", page.data.len()),
                theme::dim_style(),
            ));
        }
    } else if let Some(txns) = app.switch.by_employee().data() {
        spans.push(Span::styled(
            format!("  {} on file", txns.len()),
            theme::dim_style(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_controls(f: &mut Frame, area: Rect, app: &App) {
    let has_pending = !app.ledger.pending().is_empty();
    let enabled = |on: bool| {
        if on {
            Style::default().fg(theme::ACCENT)
        } else {
            theme::dim_style()
        }
    };

    let line = Line::from(vec![
        Span::styled(" [m] View More", enabled(app.switch.can_view_more())),
        Span::styled("   ", theme::dim_style()),
        Span::styled("[a] Approve First", enabled(has_pending)),
        Span::styled("   ", theme::dim_style()),
        Span::styled("[d] Decline First", enabled(has_pending)),
        Span::styled("   ", theme::dim_style()),
        Span::styled("[f] Filter", Style::default().fg(theme::ACCENT)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
