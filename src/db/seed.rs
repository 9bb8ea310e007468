use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Employee, Transaction};

const EMPLOYEES: &[(&str, &str, &str)] = &[
    ("emp-james-smith", "James", "Smith"),
    ("emp-mary-johnson", "Mary", "Johnson"),
    ("emp-john-williams", "John", "Williams"),
    ("emp-patricia-brown", "Patricia", "Brown"),
    ("emp-robert-jones", "Robert", "Jones"),
    ("emp-jennifer-garcia", "Jennifer", "Garcia"),
    ("emp-michael-miller", "Michael", "Miller"),
    ("emp-linda-davis", "Linda", "Davis"),
];

const NEW_HIRE: (&str, &str, &str) = ("emp-nina-newhire", "Nina", "Newhire");

const MERCHANTS: &[&str] = &[
    "Social Media Ads Inc",
    "Uber",
    "Delta Air Lines",
    "Blue Bottle Coffee",
    "Amazon Web Services",
    "Staples",
    "WeWork",
    "Sweetgreen",
    "Zoom",
    "Hilton Hotels",
];

const TRANSACTION_COUNT: usize = 32;

pub(crate) fn demo_employees() -> Vec<Employee> {
    EMPLOYEES
        .iter()
        .chain(std::iter::once(&NEW_HIRE))
        .map(|(id, first, last)| Employee::new(*id, *first, *last))
        .collect()
}

pub(crate) fn demo_transactions(employees: &[Employee]) -> Result<Vec<Transaction>> {
    let charged = &employees[..employees.len().min(EMPLOYEES.len())];
    if charged.is_empty() {
        return Ok(Vec::new());
    }
    let latest = NaiveDate::from_ymd_opt(2024, 3, 31).context("Invalid seed date")?;

    let txns = (0..TRANSACTION_COUNT)
        .map(|i| {
            let employee = charged[(i * 3) % charged.len()].clone();
            let merchant = MERCHANTS[(i * 7) % MERCHANTS.len()];
            let cents = ((i * 4793 + 1250) % 90_000 + 500) as i64;
            let date = latest - Duration::days((i as i64) * 2 + (i as i64 % 3));
            Transaction {
                id: format!("txn-{:04}", i + 1),
                amount: Decimal::new(cents, 2),
                employee,
                merchant: merchant.to_string(),
                date: date.format("%Y-%m-%d").to_string(),
                approved: false,
            }
        })
        .collect();
    Ok(txns)
}
