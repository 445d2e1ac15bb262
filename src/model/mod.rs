pub mod employee;
pub mod team;

use chrono::{Months, NaiveDate};

/// Short English month name ("Jan".."Dec") for a date.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

/// Labels for the `count` months preceding `from`, oldest first.
pub fn previous_months(from: NaiveDate, count: u32) -> Vec<String> {
    (1..=count).rev().map(|i| month_label(from - Months::new(i))).collect()
}
