use std::fmt::Write;

use crate::commission::{commission_summary, UnknownEmployee};
use crate::directory::EmployeeDirectory;
use crate::error::Result;
use crate::filter::filter_records;
use crate::models::{DashboardView, FilterCriteria, Record, RollupRow};
use crate::{kpi, rollup, series};

/// Builds every dashboard structure from a single filtered view.
pub fn build_view(records: &[Record], criteria: &FilterCriteria) -> DashboardView {
    let rows = filter_records(records, criteria);

    DashboardView {
        kpis: kpi::summarize(&rows),
        cash_by_day: series::cash_by_day(&rows),
        close_rate_by_day: series::close_rate_by_day(&rows),
        show_rate_by_day: series::show_rate_by_day(&rows),
        lead_sources: series::lead_source_breakdown(&rows),
        funnels: series::funnel_breakdown(&rows),
        situations: series::situation_breakdown(&rows),
        outcomes: series::outcome_breakdown(&rows),
        coaches: series::coach_breakdown(&rows),
        closers: rollup::closer_table(&rows),
        setters: rollup::setter_table(&rows),
        calls: rollup::call_rows(&rows),
    }
}

/// Human-readable label for the active criteria, e.g. `platform YouTube, from 2024-01-01`.
pub fn describe_criteria(criteria: &FilterCriteria) -> String {
    if criteria.is_empty() {
        return "all calls".to_string();
    }

    let mut parts = Vec::new();
    let fields = [
        ("platform", &criteria.platform),
        ("funnel", &criteria.funnel),
        ("coach", &criteria.coach),
        ("closer", &criteria.closer),
        ("setter", &criteria.setter),
    ];
    for (label, value) in fields {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            parts.push(format!("{label} {value}"));
        }
    }
    if let Some(from) = criteria.date_from {
        parts.push(format!("from {from}"));
    }
    if let Some(to) = criteria.date_to {
        parts.push(format!("to {to}"));
    }

    parts.join(", ")
}

pub fn build_report(
    records: &[Record],
    criteria: &FilterCriteria,
    directory: &EmployeeDirectory,
    policy: UnknownEmployee,
) -> Result<String> {
    let view = build_view(records, criteria);
    let commissions = commission_summary(records, criteria, directory, policy)?;
    let kpis = &view.kpis;

    let mut output = String::new();

    let _ = writeln!(output, "# Sales Calls Report");
    let _ = writeln!(output, "Generated for {}", describe_criteria(criteria));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Key Metrics");
    let _ = writeln!(output, "- Cash collected: ${:.2}", kpis.cash_collected);
    let _ = writeln!(output, "- Revenue generated: ${:.2}", kpis.revenue_generated);
    let _ = writeln!(output, "- Avg cash / call: ${:.2}", kpis.avg_cash_per_call);
    let _ = writeln!(output, "- Avg cash / close: ${:.2}", kpis.avg_cash_per_close);
    let _ = writeln!(
        output,
        "- Close rate: {:.0}% ({} closed of {} taken)",
        kpis.close_rate, kpis.calls_closed, kpis.calls_taken
    );
    let _ = writeln!(
        output,
        "- Show rate: {:.0}% ({} taken of {} due)",
        kpis.show_rate, kpis.calls_taken, kpis.calls_due
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Commissions");
    let _ = writeln!(output, "- Closers: ${:.2}", commissions.closer);
    let _ = writeln!(output, "- Setters: ${:.2}", commissions.setter);
    let _ = writeln!(output, "- Coaches: ${:.2}", commissions.coach);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Lead Source Mix");

    if view.lead_sources.is_empty() {
        let _ = writeln!(output, "No calls recorded for this window.");
    } else {
        for point in view.lead_sources.iter() {
            let _ = writeln!(output, "- {}: {} calls", point.category, point.count);
        }
    }

    write_leaderboard(&mut output, "Top Closers", &view.closers);
    write_leaderboard(&mut output, "Top Setters", &view.setters);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Calls");

    if view.calls.is_empty() {
        let _ = writeln!(output, "No calls recorded for this window.");
    } else {
        for call in view.calls.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} on {} with {}: {} (${:.2})",
                call.prospect, call.date, call.closer, call.outcome, call.cash_collected
            );
        }
    }

    Ok(output)
}

fn write_leaderboard(output: &mut String, title: &str, rows: &[RollupRow]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");

    if rows.is_empty() {
        let _ = writeln!(output, "Nobody in this window.");
        return;
    }

    for row in rows.iter().take(10) {
        let _ = writeln!(
            output,
            "- {}: ${:.2} collected (${:.2} / call, ${:.2} / close)",
            row.name, row.total_cash_collected, row.avg_cash_per_call, row.avg_cash_per_close
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn call(timestamp: &str, closer: &str, outcome: &str, cash: &str) -> Record {
        Record {
            timestamp: timestamp.to_string(),
            platform: "YouTube".to_string(),
            closer: closer.to_string(),
            prospect: "Pat".to_string(),
            outcome: outcome.to_string(),
            cash_collected: cash.to_string(),
            ..Record::default()
        }
    }

    #[test]
    fn view_matches_individual_builders() {
        let records = vec![
            call("1/1/2024", "Alan", "Closed", "$100"),
            call("1/2/2024", "Alan", "No Show", "$0"),
        ];
        let view = build_view(&records, &FilterCriteria::default());
        assert_eq!(view.kpis.calls_due, 2);
        assert_eq!(view.cash_by_day.len(), 1);
        assert_eq!(view.closers.len(), 1);
        assert_eq!(view.calls.len(), 2);
        assert_eq!(view.lead_sources[0].count, 2);
    }

    #[test]
    fn report_lists_metrics_and_leaders() {
        let records = vec![
            call("1/1/2024", "Alan", "Closed", "$100"),
            call("1/2/2024", "Alan", "No Show", "$0"),
        ];
        let report = build_report(
            &records,
            &FilterCriteria::default(),
            &EmployeeDirectory::builtin(),
            UnknownEmployee::Skip,
        )
        .unwrap();
        assert!(report.contains("Generated for all calls"));
        assert!(report.contains("- Cash collected: $100.00"));
        assert!(report.contains("- Close rate: 100% (1 closed of 1 taken)"));
        assert!(report.contains("- Closers: $10.00"));
        assert!(report.contains("- Alan: $100.00 collected"));
        assert!(report.contains("## Top Setters\nNobody in this window."));
    }

    #[test]
    fn empty_window_report() {
        let report = build_report(
            &[],
            &FilterCriteria::default(),
            &EmployeeDirectory::builtin(),
            UnknownEmployee::Skip,
        )
        .unwrap();
        assert!(report.contains("## Lead Source Mix\nNo calls recorded for this window."));
    }

    #[test]
    fn blank_criteria_describe_all_calls() {
        let criteria = FilterCriteria {
            coach: Some("  ".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(describe_criteria(&criteria), "all calls");
    }

    #[test]
    fn describes_active_criteria() {
        let criteria = FilterCriteria {
            platform: Some("YouTube".to_string()),
            closer: Some(" ".to_string()),
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..FilterCriteria::default()
        };
        assert_eq!(describe_criteria(&criteria), "platform YouTube, from 2024-01-01");
    }
}
