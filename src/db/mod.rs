mod schema;
mod seed;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

const TRANSACTION_COLUMNS: &str = "t.id, t.amount, t.merchant, t.date, t.approved,
                    e.id, e.first_name, e.last_name";

/// Backing store for the card feed and the employee directory.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_demo_data()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    pub(crate) fn seed_demo_data(&mut self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(0);
        }

        let employees = seed::demo_employees();
        for employee in &employees {
            self.insert_employee(employee)?;
        }
        let txns = seed::demo_transactions(&employees)?;
        let written = self.insert_transactions_batch(&txns)?;
        log::info!(
            "Seeded demo data: {} employees, {written} transactions",
            employees.len()
        );
        Ok(written)
    }

    // ── Employees ─────────────────────────────────────────────

    pub(crate) fn insert_employee(&self, employee: &Employee) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO employees (id, first_name, last_name) VALUES (?1, ?2, ?3)",
            params![employee.id, employee.first_name, employee.last_name],
        )?;
        Ok(())
    }

    pub(crate) fn get_employees(&self) -> Result<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, first_name, last_name FROM employees ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok(Employee {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transactions_batch(&mut self, txns: &[Transaction]) -> Result<usize> {
        let created_at = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        let mut count = 0;
        for txn in txns {
            count += tx.execute(
                "INSERT OR IGNORE INTO transactions (id, employee_id, merchant, date, amount, approved, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    txn.id,
                    txn.employee.id,
                    txn.merchant,
                    txn.date,
                    txn.amount.to_string(),
                    txn.approved,
                    created_at,
                ],
            )?;
        }
        tx.commit()?;
        Ok(count)
    }

    pub(crate) fn get_transactions_page(&self, offset: u32, limit: u32) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS}
             FROM transactions t JOIN employees e ON e.id = t.employee_id
             ORDER BY t.date DESC, t.id ASC
             LIMIT ?1 OFFSET ?2"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit, offset], transaction_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transactions_by_employee(&self, employee_id: &str) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS}
             FROM transactions t JOIN employees e ON e.id = t.employee_id
             WHERE t.employee_id = ?1
             ORDER BY t.date DESC, t.id ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![employee_id], transaction_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction_count(&self) -> Result<u32> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let amount_str: String = row.get(1)?;
    Ok(Transaction {
        id: row.get(0)?,
        amount: Decimal::from_str(&amount_str).unwrap_or_default(),
        merchant: row.get(2)?,
        date: row.get(3)?,
        approved: row.get(4)?,
        employee: Employee {
            id: row.get(5)?,
            first_name: row.get(6)?,
            last_name: row.get(7)?,
        },
    })
}
