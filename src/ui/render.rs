use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;
use crate::api::RequestState;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.input_mode == InputMode::Picker {
        render_picker(f, f.area(), app);
    }
    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let count = app.list(*s).len();
            let count_style = match s {
                Screen::Review => Style::default().fg(theme::YELLOW),
                Screen::Approved => theme::approved_style(),
                Screen::Declined => theme::declined_style(),
            };
            let label_style = if *s == app.screen {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TEXT_DIM)
            };
            Line::from(vec![
                Span::styled(format!("{}:", i + 1), Style::default().fg(theme::TEXT_DIM)),
                Span::styled(format!("{s} "), label_style),
                Span::styled(format!("{count}"), count_style),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Review => super::screens::review::render(f, area, app),
        Screen::Approved | Screen::Declined => {
            super::screens::decided::render(f, area, app, app.screen)
        }
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Command => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
        InputMode::Picker => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    };

    let info = format!(" {} | {} ", app.screen, app.switch.selection());
    let (state, state_style) = if app.switch.is_loading() {
        ("Loading…".to_string(), Style::default().fg(theme::YELLOW).bg(theme::SURFACE))
    } else if let Some(err) = app.switch.error() {
        (format!("Error: {err}"), theme::error_style().bg(theme::SURFACE))
    } else {
        (String::new(), theme::status_bar_style())
    };

    let right = match app.screen {
        Screen::Review => " f filter | m more | a/d approve/decline | ? help ",
        Screen::Approved => " 1 review | : command | ? help ",
        Screen::Declined => " u restore | : command | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + state.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(state, state_style),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.len() as u16),
        ),
        InputMode::Picker => (
            Line::from(Span::styled(
                " j/k choose, Enter apply, Esc cancel",
                theme::dim_style(),
            )),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, f to filter, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_picker(f: &mut Frame, area: Rect, app: &App) {
    let choices = app.employee_choices();

    let items: Vec<ListItem> = if choices.is_empty() {
        let text = match app.switch.employees().state() {
            RequestState::Failed(err) => Span::styled(format!(" {err}"), theme::error_style()),
            _ => Span::styled(" Loading employees…", theme::dim_style()),
        };
        vec![ListItem::new(Line::from(text))]
    } else {
        let current = app.switch.selection();
        choices
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let marker = if e.id == current.id { "\u{2022} " } else { "  " };
                let style = if i == app.picker_index {
                    theme::selected_style()
                } else {
                    theme::normal_style()
                };
                ListItem::new(Line::from(Span::styled(format!("{marker}{e}"), style)))
            })
            .collect()
    };

    let popup_height = (items.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 36.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(" Employee ", theme::section_style()))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(list, popup_area);
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(
            " TxTriage Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", theme::section_style())),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           1-3        Switch tabs",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  q or Ctrl-q      Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Review", theme::section_style())),
        Line::from(Span::styled(
            "  f               Filter by employee     m          View More",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  a               Approve First          d          Decline First",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  u (Declined)    Restore to pending     :          Command mode",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Commands", theme::section_style())),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<12} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
