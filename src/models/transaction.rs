use rust_decimal::Decimal;

use super::Employee;

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    pub employee: Employee,
    pub merchant: String,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    pub approved: bool,
}

impl Transaction {
    pub fn into_approved(self) -> Self {
        Self {
            approved: true,
            ..self
        }
    }

    pub fn is_refund(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}
