use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::db::Database;
use crate::models::{Employee, Transaction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CsvColumns {
    pub(crate) date: usize,
    pub(crate) merchant: usize,
    pub(crate) amount: usize,
    pub(crate) employee: usize,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            date: 0,
            merchant: 1,
            amount: 2,
            employee: 3,
        }
    }
}

impl CsvColumns {
    pub(crate) fn detect(headers: &[String]) -> Self {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().to_lowercase();
                names.iter().any(|n| h == *n)
            })
        };
        let defaults = Self::default();
        Self {
            date: find(&["date", "transaction date", "posted"]).unwrap_or(defaults.date),
            merchant: find(&["merchant", "description", "payee"]).unwrap_or(defaults.merchant),
            amount: find(&["amount", "total"]).unwrap_or(defaults.amount),
            employee: find(&["employee", "cardholder", "name"]).unwrap_or(defaults.employee),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ImportSummary {
    pub(crate) parsed: usize,
    pub(crate) inserted: usize,
    pub(crate) new_employees: usize,
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read the CSV and return headers + all rows as strings.
    pub(crate) fn preview(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .context("Failed to open CSV file")?;

        let mut all_rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            all_rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if all_rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        // A header row has no field that reads as a date or an amount
        let first_row = &all_rows[0];
        let looks_like_header = first_row.iter().all(|field| {
            let trimmed = field.trim();
            Decimal::from_str(trimmed.replace(['$', ','], "").trim()).is_err()
                && NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").is_err()
                && NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err()
        });

        if looks_like_header {
            let headers = all_rows.remove(0);
            Ok((headers, all_rows))
        } else {
            let headers: Vec<String> = (0..first_row.len())
                .map(|i| format!("Column {}", i + 1))
                .collect();
            Ok((headers, all_rows))
        }
    }

    pub(crate) fn parse(
        rows: &[Vec<String>],
        columns: &CsvColumns,
        known: &[Employee],
    ) -> Result<(Vec<Transaction>, Vec<Employee>)> {
        let mut transactions = Vec::new();
        let mut created: Vec<Employee> = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            let field = |col: usize| row.get(col).map(|s| s.trim().to_string()).unwrap_or_default();

            let date_str = field(columns.date);
            if date_str.is_empty() {
                continue;
            }
            let date = parse_date(&date_str)
                .with_context(|| format!("Row {}: failed to parse date '{}'", i + 1, date_str))?;

            let merchant = field(columns.merchant);
            let amount = parse_decimal(&field(columns.amount))
                .with_context(|| format!("Row {}: failed to parse amount", i + 1))?;

            let name = field(columns.employee);
            if name.is_empty() {
                anyhow::bail!("Row {}: missing employee", i + 1);
            }
            let employee = match known
                .iter()
                .chain(created.iter())
                .find(|e| e.full_name().eq_ignore_ascii_case(&name))
            {
                Some(e) => e.clone(),
                None => {
                    let e = employee_from_name(&name);
                    created.push(e.clone());
                    e
                }
            };

            let date = date.format("%Y-%m-%d").to_string();
            transactions.push(Transaction {
                id: format!("txn-{}", compute_hash(&date, &merchant, &amount, &employee.id)),
                amount,
                employee,
                merchant,
                date,
                approved: false,
            });
        }

        Ok((transactions, created))
    }
}

pub(crate) fn import_file(path: &Path, db: &mut Database) -> Result<ImportSummary> {
    let (headers, rows) = CsvImporter::preview(path)?;
    let columns = CsvColumns::detect(&headers);
    let known = db.get_employees()?;
    let (txns, created) = CsvImporter::parse(&rows, &columns, &known)?;

    for employee in &created {
        db.insert_employee(employee)?;
    }
    let inserted = db.insert_transactions_batch(&txns)?;
    log::info!(
        "Imported {inserted}/{} transactions from {} ({} new employees)",
        txns.len(),
        path.display(),
        created.len()
    );

    Ok(ImportSummary {
        parsed: txns.len(),
        inserted,
        new_employees: created.len(),
    })
}

fn employee_from_name(name: &str) -> Employee {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    let slug = name
        .split_whitespace()
        .map(|p| p.to_lowercase())
        .collect::<Vec<_>>()
        .join("-");
    Employee::new(format!("emp-{slug}"), first, last)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    for fmt in &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    anyhow::bail!("Could not parse date: {}", s)
}

fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ','], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_str(&cleaned.replace('"', "")))
        .context(format!("Failed to parse '{}' as decimal", s))
}

/// Stable id for an imported row, so importing the same file twice adds
/// nothing. FNV-1a keeps it stable across Rust releases.
fn compute_hash(date: &str, merchant: &str, amount: &Decimal, employee_id: &str) -> String {
    let input = format!("{date}|{merchant}|{amount}|{employee_id}");
    let hash = fnv1a(input.as_bytes());
    format!("{hash:016x}")
}

fn fnv1a(data: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
