use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::models::Employee;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit TxTriage", cmd_quit, r);
    register_command!("quit", "Quit TxTriage", cmd_quit, r);
    register_command!(
        "approve",
        "Approve a transaction (e.g. :approve txn-0003, default first)",
        cmd_approve,
        r
    );
    register_command!("a", "Approve first pending transaction", cmd_approve, r);
    register_command!(
        "decline",
        "Decline a transaction (e.g. :decline txn-0003, default first)",
        cmd_decline,
        r
    );
    register_command!("d", "Decline first pending transaction", cmd_decline, r);
    register_command!(
        "restore",
        "Move a declined transaction back to pending",
        cmd_restore,
        r
    );
    register_command!("u", "Restore selected declined transaction", cmd_restore, r);
    register_command!("more", "Load the next page of transactions", cmd_more, r);
    register_command!("m", "Load the next page of transactions", cmd_more, r);
    register_command!("all", "Show transactions for all employees", cmd_all, r);
    register_command!(
        "employee",
        "Filter by employee (e.g. :employee Mary Johnson)",
        cmd_employee,
        r
    );
    register_command!("e", "Filter by employee (e.g. :e mary)", cmd_employee, r);
    register_command!("refresh", "Drop cached data and reload", cmd_refresh, r);
    register_command!("review", "Go to Review", cmd_review, r);
    register_command!("approved", "Go to Approved", cmd_approved, r);
    register_command!("declined", "Go to Declined", cmd_declined, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_approve(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.approve_first();
    } else {
        app.approve(args);
    }
    Ok(())
}

fn cmd_decline(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.decline_first();
    } else {
        app.decline(args);
    }
    Ok(())
}

fn cmd_restore(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.restore_selected();
    } else {
        app.restore(args);
    }
    Ok(())
}

fn cmd_more(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.view_more();
    Ok(())
}

fn cmd_all(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Review;
    app.load_all();
    Ok(())
}

fn cmd_employee(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :employee <name|id>. Use :all to clear the filter");
        return Ok(());
    }

    let employees = match app.switch.employees().data() {
        Some(list) => list.clone(),
        None => {
            app.set_status("Employee directory is still loading");
            return Ok(());
        }
    };

    match Employee::find(&employees, args) {
        Some(employee) => {
            app.screen = Screen::Review;
            app.select_employee(employee);
        }
        None => {
            let names: Vec<String> = employees.iter().map(Employee::full_name).collect();
            app.set_status(format!(
                "Employee '{args}' not found. Available: {}",
                names.join(", ")
            ));
        }
    }

    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.refresh();
    Ok(())
}

fn cmd_review(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Review;
    Ok(())
}

fn cmd_approved(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Approved;
    Ok(())
}

fn cmd_declined(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Declined;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
