//! Chart series: group a filtered view by a key, fold each group, then prune and sort.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::cohort::{parse_cash, CohortTally};
use crate::dates::{day_key, parse_backend_date};
use crate::models::{CategoryPoint, DatePoint, Record};

/// Groups `rows` by `key`, folding each row into its group's accumulator.
///
/// Rows whose key is `None` are skipped. Groups come back in first-seen order.
pub fn group_by<'a, K, A, F, G>(rows: &[&'a Record], mut key: F, mut fold: G) -> Vec<(K, A)>
where
    K: Eq + Hash + Clone,
    A: Default,
    F: FnMut(&'a Record) -> Option<K>,
    G: FnMut(&mut A, &'a Record),
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, A)> = Vec::new();

    for &row in rows {
        let Some(k) = key(row) else {
            continue;
        };
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, A::default()));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, row);
    }

    groups
}

/// Day-keyed series in ascending calendar order.
///
/// `keep` prunes groups before `value` turns each accumulator into a point value.
fn day_series<A, F, P, V>(rows: &[&Record], fold: F, keep: P, value: V) -> Vec<DatePoint>
where
    A: Default,
    F: FnMut(&mut A, &Record),
    P: Fn(&A) -> bool,
    V: Fn(&A) -> f64,
{
    let groups = group_by(rows, |row| day_key(&row.timestamp), fold);

    let mut points: Vec<DatePoint> = groups
        .into_iter()
        .filter(|(_, acc)| keep(acc))
        .map(|(date, acc)| DatePoint {
            date: date.to_string(),
            value: value(&acc),
        })
        .collect();

    points.sort_by(|a, b| {
        parse_backend_date(&a.date)
            .cmp(&parse_backend_date(&b.date))
            .then_with(|| a.date.cmp(&b.date))
    });
    points
}

/// Record count per distinct trimmed, non-empty value, most frequent first.
pub fn category_counts<F>(rows: &[&Record], field: F) -> Vec<CategoryPoint>
where
    F: Fn(&Record) -> &str,
{
    let groups = group_by(
        rows,
        |row| {
            let value = field(row).trim();
            (!value.is_empty()).then_some(value)
        },
        |count: &mut usize, _| *count += 1,
    );

    let mut points: Vec<CategoryPoint> = groups
        .into_iter()
        .filter(|(_, count)| *count != 0)
        .map(|(category, count)| CategoryPoint {
            category: category.to_string(),
            count,
        })
        .collect();

    points.sort_by(by_count_desc);
    points
}

fn by_count_desc(a: &CategoryPoint, b: &CategoryPoint) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.category.cmp(&b.category))
}

/// Total cash collected per day; days that net to zero are omitted.
pub fn cash_by_day(rows: &[&Record]) -> Vec<DatePoint> {
    day_series(
        rows,
        |total: &mut f64, row| *total += parse_cash(&row.cash_collected),
        |total| *total != 0.0,
        |total| *total,
    )
}

/// Closed / taken × 100 per day, for days with at least one taken call.
pub fn close_rate_by_day(rows: &[&Record]) -> Vec<DatePoint> {
    day_series(
        rows,
        |tally: &mut CohortTally, row| tally.add(&row.outcome, 0.0),
        |tally| tally.taken > 0,
        CohortTally::close_rate,
    )
}

/// Taken / due × 100 per day, for days with at least one taken call.
pub fn show_rate_by_day(rows: &[&Record]) -> Vec<DatePoint> {
    day_series(
        rows,
        |tally: &mut CohortTally, row| tally.add(&row.outcome, 0.0),
        |tally| tally.taken > 0,
        CohortTally::show_rate,
    )
}

pub fn lead_trend(rows: &[&Record]) -> Vec<DatePoint> {
    day_series(
        rows,
        |count: &mut usize, _| *count += 1,
        |count| *count > 0,
        |count| *count as f64,
    )
}

pub fn lead_source_breakdown(rows: &[&Record]) -> Vec<CategoryPoint> {
    category_counts(rows, |row| row.platform.as_str())
}

pub fn funnel_breakdown(rows: &[&Record]) -> Vec<CategoryPoint> {
    category_counts(rows, |row| row.funnel.as_str())
}

pub fn situation_breakdown(rows: &[&Record]) -> Vec<CategoryPoint> {
    category_counts(rows, |row| row.situation.as_str())
}

pub fn outcome_breakdown(rows: &[&Record]) -> Vec<CategoryPoint> {
    category_counts(rows, |row| row.outcome.as_str())
}

pub fn coach_breakdown(rows: &[&Record]) -> Vec<CategoryPoint> {
    category_counts(rows, |row| row.coach.as_str())
}

pub fn willingness_breakdown(rows: &[&Record]) -> Vec<CategoryPoint> {
    category_counts(rows, |row| row.willing_to_invest.as_str())
}

pub fn top_platform(rows: &[&Record]) -> Option<String> {
    lead_source_breakdown(rows)
        .into_iter()
        .next()
        .map(|point| point.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(timestamp: &str, outcome: &str, cash: &str, platform: &str) -> Record {
        Record {
            timestamp: timestamp.to_string(),
            outcome: outcome.to_string(),
            cash_collected: cash.to_string(),
            platform: platform.to_string(),
            ..Record::default()
        }
    }

    fn view(records: &[Record]) -> Vec<&Record> {
        records.iter().collect()
    }

    #[test]
    fn group_by_keeps_first_seen_order() {
        let records = vec![
            row("", "", "", "b"),
            row("", "", "", "a"),
            row("", "", "", "b"),
        ];
        let groups = group_by(
            &view(&records),
            |r| Some(r.platform.as_str()),
            |n: &mut usize, _| *n += 1,
        );
        assert_eq!(groups, vec![("b", 2), ("a", 1)]);
    }

    #[test]
    fn cash_by_day_sorts_chronologically_and_drops_zero_days() {
        let records = vec![
            row("1/10/2024 09:00", "Closed", "$50", ""),
            row("1/2/2024 10:00", "Closed", "$100", ""),
            row("1/2/2024 15:00", "Closed", "$25.50", ""),
            row("1/5/2024", "No Show", "$0", ""),
        ];
        let points = cash_by_day(&view(&records));
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, "1/2/2024");
        assert!((points[0].value - 125.5).abs() < 1e-9);
        assert_eq!(points[1].date, "1/10/2024");
    }

    #[test]
    fn same_day_in_two_layouts_orders_by_key() {
        let records = vec![
            row("2024-01-02 08:00", "Closed", "$10", ""),
            row("1/3/2024", "Closed", "$30", ""),
            row("1/2/2024 09:00", "Closed", "$20", ""),
        ];
        let dates: Vec<String> = cash_by_day(&view(&records))
            .into_iter()
            .map(|p| p.date)
            .collect();
        assert_eq!(dates, vec!["1/2/2024", "2024-01-02", "1/3/2024"]);
    }

    #[test]
    fn rate_series_skip_days_without_taken_calls() {
        let records = vec![
            row("1/1/2024", "Closed", "", ""),
            row("1/1/2024", "Follow Up", "", ""),
            row("1/2/2024", "No Show", "", ""),
            row("1/3/2024", "Follow Up", "", ""),
            row("1/3/2024", "No Show", "", ""),
        ];
        let close = close_rate_by_day(&view(&records));
        assert_eq!(close.len(), 2);
        assert_eq!(close[0].date, "1/1/2024");
        assert!((close[0].value - 50.0).abs() < 1e-9);
        assert_eq!(close[1].value, 0.0);

        let show = show_rate_by_day(&view(&records));
        assert_eq!(show.len(), 2);
        assert!((show[0].value - 100.0).abs() < 1e-9);
        assert!((show[1].value - 50.0).abs() < 1e-9);
    }

    #[test]
    fn categories_sort_by_count_then_name() {
        let records = vec![
            row("", "", "", "YouTube"),
            row("", "", "", "Instagram"),
            row("", "", "", " YouTube "),
            row("", "", "", "Ads"),
            row("", "", "", ""),
        ];
        let points = lead_source_breakdown(&view(&records));
        let labels: Vec<(&str, usize)> = points
            .iter()
            .map(|p| (p.category.as_str(), p.count))
            .collect();
        assert_eq!(labels, vec![("YouTube", 2), ("Ads", 1), ("Instagram", 1)]);
        assert_eq!(top_platform(&view(&records)).as_deref(), Some("YouTube"));
    }

    #[test]
    fn lead_trend_counts_per_day() {
        let records = vec![
            row("2024-01-02", "", "", ""),
            row("1/1/2024 10:00", "", "", ""),
            row("1/1/2024 11:00", "", "", ""),
            row("bad", "", "", ""),
        ];
        let points = lead_trend(&view(&records));
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, "1/1/2024");
        assert_eq!(points[0].value, 2.0);
        assert_eq!(points[1].date, "2024-01-02");
    }

    #[test]
    fn top_platform_is_none_without_platforms() {
        let records = vec![row("1/1/2024", "", "", "")];
        assert_eq!(top_platform(&view(&records)), None);
    }
}
