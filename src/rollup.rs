use std::cmp::Ordering;

use crate::cohort::{parse_cash, CohortTally};
use crate::dates::timestamp_sort_key;
use crate::directory::Role;
use crate::models::{CallRow, Record, RollupRow};
use crate::series::group_by;

pub fn rollup_by(rows: &[&Record], role: Role) -> Vec<RollupRow> {
    let groups = group_by(
        rows,
        |row| {
            let name = role.name_of(row).trim();
            (!name.is_empty()).then_some(name)
        },
        |tally: &mut CohortTally, row| tally.add(&row.outcome, parse_cash(&row.cash_collected)),
    );

    let mut table: Vec<RollupRow> = groups
        .into_iter()
        .map(|(name, tally)| RollupRow {
            id: rollup_id(role, name),
            name: name.to_string(),
            total_cash_collected: tally.cash,
            avg_cash_per_call: tally.avg_cash_per_call(),
            avg_cash_per_close: tally.avg_cash_per_close(),
        })
        .collect();

    table.sort_by(|a, b| {
        b.total_cash_collected
            .partial_cmp(&a.total_cash_collected)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    table
}

pub fn closer_table(rows: &[&Record]) -> Vec<RollupRow> {
    rollup_by(rows, Role::Closer)
}

pub fn setter_table(rows: &[&Record]) -> Vec<RollupRow> {
    rollup_by(rows, Role::Setter)
}

/// `closer-jane-doe` style ids: role prefix, lowercased name, whitespace runs as one hyphen.
pub fn rollup_id(role: Role, name: &str) -> String {
    let slug = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("{}-{}", role.as_str(), slug)
}

/// Display rows, newest first. Rows with neither a timestamp nor a prospect are dropped.
pub fn call_rows(rows: &[&Record]) -> Vec<CallRow> {
    let mut sorted: Vec<&Record> = rows.to_vec();
    // `None` sorts before `Some`, so reversing puts unparseable stamps last.
    sorted.sort_by_cached_key(|row| std::cmp::Reverse(timestamp_sort_key(&row.timestamp)));

    sorted
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let timestamp = row.timestamp.trim();
            let prospect = row.prospect.trim();
            if timestamp.is_empty() && prospect.is_empty() {
                return None;
            }

            Some(CallRow {
                id: format!("c{}", index + 1),
                date: timestamp.split(' ').next().unwrap_or("").trim().to_string(),
                closer: row.closer.trim().to_string(),
                setter: row.setter.trim().to_string(),
                prospect: prospect.to_string(),
                outcome: row.outcome.trim().to_string(),
                cash_collected: parse_cash(&row.cash_collected),
                coach: row.coach.trim().to_string(),
                platform: row.platform.trim().to_string(),
            })
        })
        .collect()
}
