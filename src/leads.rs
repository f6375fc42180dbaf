use crate::filter::filter_records;
use crate::models::{FilterCriteria, LeadSummary, Record};
use crate::series;

pub fn lead_summary(records: &[Record], criteria: &FilterCriteria) -> LeadSummary {
    let rows = filter_records(records, criteria);

    LeadSummary {
        total_leads: rows.len(),
        top_platform: series::top_platform(&rows),
        applicant_sources: series::lead_source_breakdown(&rows),
        willingness_to_invest: series::willingness_breakdown(&rows),
        lead_trend: series::lead_trend(&rows),
    }
}
