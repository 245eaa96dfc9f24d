//! Domain model for an operating expense.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Rent,
    Salary,
    Utilities,
    Marketing,
    Supplies,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "rent",
            ExpenseCategory::Salary => "salary",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Marketing => "marketing",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rent" => Ok(ExpenseCategory::Rent),
            "salary" => Ok(ExpenseCategory::Salary),
            "utilities" => Ok(ExpenseCategory::Utilities),
            "marketing" => Ok(ExpenseCategory::Marketing),
            "supplies" => Ok(ExpenseCategory::Supplies),
            "other" => Ok(ExpenseCategory::Other),
            other => Err(format!("unknown expense category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    /// Calendar day the expense is booked under (used by range filters).
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}
