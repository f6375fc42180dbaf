use std::collections::BTreeSet;

use crate::dates::parse_backend_date;
use crate::models::{FilterCriteria, FilterValues, Record};

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        active(&self.platform).is_none()
            && active(&self.coach).is_none()
            && active(&self.closer).is_none()
            && active(&self.setter).is_none()
            && active(&self.funnel).is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        let Some(date) = parse_backend_date(&record.timestamp) else {
            return false;
        };

        if self.date_from.is_some_and(|from| date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| date > to) {
            return false;
        }

        field_matches(&self.platform, &record.platform)
            && field_matches(&self.coach, &record.coach)
            && field_matches(&self.closer, &record.closer)
            && field_matches(&self.setter, &record.setter)
            && field_matches(&self.funnel, &record.funnel)
    }
}

/// Returns the records passing `criteria`, in source order. Records are borrowed, never copied.
pub fn filter_records<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    let rows: Vec<&Record> = records
        .iter()
        .filter(|record| criteria.matches(record))
        .collect();
    tracing::debug!(total = records.len(), kept = rows.len(), "filtered records");
    rows
}

/// Distinct trimmed values per filterable field over the whole collection.
pub fn filter_values(records: &[Record]) -> FilterValues {
    let mut platforms = BTreeSet::new();
    let mut funnels = BTreeSet::new();
    let mut coaches = BTreeSet::new();
    let mut closers = BTreeSet::new();
    let mut setters = BTreeSet::new();

    for record in records {
        insert_trimmed(&mut platforms, &record.platform);
        insert_trimmed(&mut funnels, &record.funnel);
        insert_trimmed(&mut coaches, &record.coach);
        insert_trimmed(&mut closers, &record.closer);
        insert_trimmed(&mut setters, &record.setter);
    }

    FilterValues {
        platforms: sorted_for_display(platforms),
        funnels: sorted_for_display(funnels),
        coaches: sorted_for_display(coaches),
        closers: sorted_for_display(closers),
        setters: sorted_for_display(setters),
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn field_matches(wanted: &Option<String>, actual: &str) -> bool {
    match active(wanted) {
        Some(wanted) => normalize(actual) == normalize(wanted),
        None => true,
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn insert_trimmed(set: &mut BTreeSet<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        set.insert(value.to_string());
    }
}

fn sorted_for_display(set: BTreeSet<String>) -> Vec<String> {
    let mut values: Vec<String> = set.into_iter().collect();
    values.sort_by_cached_key(|v| v.to_lowercase());
    values
}
