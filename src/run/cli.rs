use anyhow::{Context, Result};
use std::path::Path;

use crate::api::{DataSource, LocalApi};
use crate::config::Config;
use crate::db::Database;
use crate::models::{Employee, Transaction};
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], db: Database, config: &Config) -> Result<()> {
    match args[1].as_str() {
        "employees" => cli_employees(db, config),
        "transactions" | "t" => cli_transactions(&args[2..], db, config),
        "import" => cli_import(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("txtriage {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("TxTriage: review card transactions by employee");
    println!();
    println!("Usage: txtriage [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  employees                     List the employee directory");
    println!("  transactions                  Print one page of the transaction feed");
    println!("    --page <n>                  Zero-based page (default: 0)");
    println!("    --employee <id|name>        All transactions of one employee instead");
    println!("  import <file.csv>             Import a card export (date, merchant, amount, employee)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn api(db: Database, config: &Config) -> LocalApi {
    LocalApi::new(db, config.page_size, config.latency)
}

fn cli_employees(db: Database, config: &Config) -> Result<()> {
    let employees = api(db, config).employees()?;
    if employees.is_empty() {
        println!("No employees");
        return Ok(());
    }

    println!("{:<24} Name", "ID");
    println!("{}", "─".repeat(48));
    for e in &employees {
        println!("{:<24} {}", e.id, e.full_name());
    }
    Ok(())
}

fn cli_transactions(args: &[String], db: Database, config: &Config) -> Result<()> {
    let employee = flag_value(args, "--employee")?;
    let page = flag_value(args, "--page")?;
    let mut api = api(db, config);

    if let Some(needle) = employee {
        let employees = api.employees()?;
        let employee = Employee::find(&employees, needle)
            .ok_or_else(|| anyhow::anyhow!("Employee '{needle}' not found"))?;
        let txns = api.transactions_by_employee(&employee.id)?;
        println!("{} ({} transactions)", employee, txns.len());
        print_transactions(&txns);
        return Ok(());
    }

    let page = match page {
        Some(p) => p
            .parse::<u32>()
            .with_context(|| format!("Invalid page number: {p}"))?,
        None => 0,
    };
    let response = api.transactions_paginated(page)?;
    println!("Page {page} ({} transactions)", response.data.len());
    print_transactions(&response.data);
    match response.next_page {
        Some(next) => println!("More: txtriage transactions --page {next}"),
        None => println!("End of feed"),
    }
    Ok(())
}

/// Value following `name`. A flag given without one is a usage error.
fn flag_value<'a>(args: &'a [String], name: &str) -> Result<Option<&'a str>> {
    let Some(pos) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    match args.get(pos + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => anyhow::bail!(
            "Usage: txtriage transactions [--page <n>] [--employee <id|name>] ({name} needs a value)"
        ),
    }
}

fn print_transactions(txns: &[Transaction]) {
    if txns.is_empty() {
        return;
    }
    println!(
        "{:<22} {:<12} {:<20} {:<22} {:>12}",
        "ID", "Date", "Employee", "Merchant", "Amount"
    );
    println!("{}", "─".repeat(92));
    for t in txns {
        println!(
            "{:<22} {:<12} {:<20} {:<22} {:>12}",
            t.id,
            t.date,
            t.employee.full_name(),
            t.merchant,
            format_amount(t.amount),
        );
    }
}

fn cli_import(args: &[String], mut db: Database) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: txtriage import <file.csv>");
    }

    let file_path = &args[0];
    let path = Path::new(file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let summary = crate::import::import_file(path, &mut db)?;
    let dupes = summary.parsed.saturating_sub(summary.inserted);
    println!("Parsed {} transactions", summary.parsed);
    if summary.new_employees > 0 {
        println!("Added {} new employees", summary.new_employees);
    }
    println!(
        "Imported {} new transactions ({dupes} duplicates skipped)",
        summary.inserted
    );
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
