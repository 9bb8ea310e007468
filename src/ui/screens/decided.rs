use ratatui::{layout::Rect, Frame};

use super::transaction_table;
use crate::ui::app::{App, Screen};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, screen: Screen) {
    let empty: &[&str] = match screen {
        Screen::Declined => &["Nothing declined yet"],
        _ => &["Nothing approved yet"],
    };
    transaction_table(
        f,
        area,
        &screen.to_string(),
        app.list(screen),
        app.cursor(screen),
        empty,
    );
}
