use crate::cohort::{parse_cash, CohortTally};
use crate::filter::filter_records;
use crate::models::{FilterCriteria, KpiSnapshot, Record};

pub fn calculate_kpis(records: &[Record], criteria: &FilterCriteria) -> KpiSnapshot {
    summarize(&filter_records(records, criteria))
}

pub fn summarize(rows: &[&Record]) -> KpiSnapshot {
    let mut tally = CohortTally::default();
    let mut revenue_generated = 0.0;

    for row in rows {
        tally.add(&row.outcome, parse_cash(&row.cash_collected));
        revenue_generated += parse_cash(&row.revenue_generated);
    }

    KpiSnapshot {
        cash_collected: tally.cash,
        revenue_generated,
        close_rate: tally.close_rate(),
        show_rate: tally.show_rate(),
        calls_due: tally.due,
        calls_taken: tally.taken,
        calls_closed: tally.closed,
        avg_cash_per_call: tally.avg_cash_per_call(),
        avg_cash_per_close: tally.avg_cash_per_close(),
    }
}
