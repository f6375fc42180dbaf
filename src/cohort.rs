//! Outcome cohorts and currency parsing shared by every aggregator.
//!
//! Cohorts are independent: a single record can be due, taken and closed at once.

const NOT_DUE: [&str; 3] = ["Cancelled", "Rescheduled", "MRR"];
const NOT_TAKEN: [&str; 4] = ["Cancelled", "Rescheduled", "No Show", "MRR"];
const DEPOSIT_COLLECTED: &str = "deposit collected";
const CLOSED: &str = "Closed";

pub fn is_due(outcome: &str) -> bool {
    !NOT_DUE.contains(&outcome.trim())
}

pub fn is_taken(outcome: &str) -> bool {
    let outcome = outcome.trim();
    !NOT_TAKEN.contains(&outcome) && !outcome.eq_ignore_ascii_case(DEPOSIT_COLLECTED)
}

pub fn is_closed(outcome: &str) -> bool {
    outcome.trim() == CLOSED
}

/// Parses a currency string such as `"$1,234.56"`.
///
/// Every character other than digits, `-` and `.` is dropped, then the longest
/// numeric prefix is read. Blank or non-numeric input yields `0.0`.
pub fn parse_cash(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect();

    let bytes = cleaned.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    cleaned[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Running due/taken/closed tallies with the cash attributed to each cohort.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CohortTally {
    pub due: usize,
    pub taken: usize,
    pub closed: usize,
    pub cash: f64,
    pub cash_from_taken: f64,
    pub cash_from_closed: f64,
}

impl CohortTally {
    pub fn add(&mut self, outcome: &str, cash: f64) {
        self.cash += cash;
        if is_due(outcome) {
            self.due += 1;
        }
        if is_taken(outcome) {
            self.taken += 1;
            self.cash_from_taken += cash;
        }
        if is_closed(outcome) {
            self.closed += 1;
            self.cash_from_closed += cash;
        }
    }

    pub fn close_rate(&self) -> f64 {
        ratio(self.closed as f64, self.taken) * 100.0
    }

    pub fn show_rate(&self) -> f64 {
        ratio(self.taken as f64, self.due) * 100.0
    }

    pub fn avg_cash_per_call(&self) -> f64 {
        ratio(self.cash_from_taken, self.taken)
    }

    pub fn avg_cash_per_close(&self) -> f64 {
        ratio(self.cash_from_closed, self.closed)
    }
}

fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}
