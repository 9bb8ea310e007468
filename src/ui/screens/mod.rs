pub(crate) mod decided;
pub(crate) mod review;

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::Transaction;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate, ListCursor};

pub(crate) fn transaction_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    txns: &[Transaction],
    cursor: ListCursor,
    empty: &[&str],
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} ({}) ", txns.len()),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if txns.is_empty() {
        let mut msg = vec![Line::from("")];
        for text in empty {
            msg.push(Line::from(Span::styled(*text, theme::dim_style())));
            msg.push(Line::from(""));
        }
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Employee", "Merchant", "Amount", "Id"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = txns
        .iter()
        .enumerate()
        .skip(cursor.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let style = if i == cursor.index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let amount_style = if txn.is_refund() {
                theme::credit_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", txn.date)),
                Cell::from(truncate(&txn.employee.full_name(), 22)),
                Cell::from(truncate(&txn.merchant, 30)),
                Cell::from(Span::styled(format_amount(txn.amount), amount_style)),
                Cell::from(Span::styled(txn.id.clone(), theme::dim_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(24),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(22),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
