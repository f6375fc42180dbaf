use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One raw call or lead row, kept exactly as the source supplied it.
///
/// Call exports name the platform and coach columns `Platform` / `Coach Name`,
/// lead exports `Source` / `Coach`. When a file carries both, the call export
/// column wins unless it is blank.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "RawRecord")]
pub struct Record {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Platform")]
    pub platform: String,
    #[serde(rename = "Funnel")]
    pub funnel: String,
    #[serde(rename = "Coach Name")]
    pub coach: String,
    #[serde(rename = "Closer Name")]
    pub closer: String,
    #[serde(rename = "Setter Name")]
    pub setter: String,
    #[serde(rename = "Prospect Name")]
    pub prospect: String,
    #[serde(rename = "Call Outcome")]
    pub outcome: String,
    #[serde(rename = "Cash Collected")]
    pub cash_collected: String,
    #[serde(rename = "Revenue Generated")]
    pub revenue_generated: String,
    #[serde(rename = "Situation")]
    pub situation: String,
    #[serde(rename = "Willing to Invest")]
    pub willing_to_invest: String,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "Timestamp", default)]
    timestamp: String,
    #[serde(rename = "Platform", default)]
    platform: String,
    #[serde(rename = "Source", default)]
    source: String,
    #[serde(rename = "Funnel", default)]
    funnel: String,
    #[serde(rename = "Coach Name", default)]
    coach_name: String,
    #[serde(rename = "Coach", default)]
    coach: String,
    #[serde(rename = "Closer Name", default)]
    closer: String,
    #[serde(rename = "Setter Name", default)]
    setter: String,
    #[serde(rename = "Prospect Name", default)]
    prospect: String,
    #[serde(rename = "Call Outcome", default)]
    outcome: String,
    #[serde(rename = "Cash Collected", default)]
    cash_collected: String,
    #[serde(rename = "Revenue Generated", default)]
    revenue_generated: String,
    #[serde(rename = "Situation", default)]
    situation: String,
    #[serde(rename = "Willing to Invest", default)]
    willing_to_invest: String,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        fn prefer(primary: String, fallback: String) -> String {
            if primary.trim().is_empty() {
                fallback
            } else {
                primary
            }
        }

        Record {
            timestamp: raw.timestamp,
            platform: prefer(raw.platform, raw.source),
            funnel: raw.funnel,
            coach: prefer(raw.coach_name, raw.coach),
            closer: raw.closer,
            setter: raw.setter,
            prospect: raw.prospect,
            outcome: raw.outcome,
            cash_collected: raw.cash_collected,
            revenue_generated: raw.revenue_generated,
            situation: raw.situation,
            willing_to_invest: raw.willing_to_invest,
        }
    }
}

/// User-chosen constraints. `None` and blank strings are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub platform: Option<String>,
    pub coach: Option<String>,
    pub closer: Option<String>,
    pub setter: Option<String>,
    pub funnel: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub cash_collected: f64,
    pub revenue_generated: f64,
    pub close_rate: f64,
    pub show_rate: f64,
    pub calls_due: usize,
    pub calls_taken: usize,
    pub calls_closed: usize,
    pub avg_cash_per_call: f64,
    pub avg_cash_per_close: f64,
}

/// A day-keyed chart point. `date` is the verbatim date portion of the source timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatePoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPoint {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupRow {
    pub id: String,
    pub name: String,
    pub total_cash_collected: f64,
    pub avg_cash_per_call: f64,
    pub avg_cash_per_close: f64,
}

/// Flattened, trimmed view of a record for tabular display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRow {
    pub id: String,
    pub date: String,
    pub closer: String,
    pub setter: String,
    pub prospect: String,
    pub outcome: String,
    pub cash_collected: f64,
    pub coach: String,
    pub platform: String,
}

/// Sorted distinct values used to populate filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterValues {
    pub platforms: Vec<String>,
    pub funnels: Vec<String>,
    pub coaches: Vec<String>,
    pub closers: Vec<String>,
    pub setters: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommissionSummary {
    pub closer: f64,
    pub setter: f64,
    pub coach: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummary {
    pub total_leads: usize,
    pub top_platform: Option<String>,
    pub applicant_sources: Vec<CategoryPoint>,
    pub willingness_to_invest: Vec<CategoryPoint>,
    pub lead_trend: Vec<DatePoint>,
}

/// Everything a dashboard page renders, computed from one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub kpis: KpiSnapshot,
    pub cash_by_day: Vec<DatePoint>,
    pub close_rate_by_day: Vec<DatePoint>,
    pub show_rate_by_day: Vec<DatePoint>,
    pub lead_sources: Vec<CategoryPoint>,
    pub funnels: Vec<CategoryPoint>,
    pub situations: Vec<CategoryPoint>,
    pub outcomes: Vec<CategoryPoint>,
    pub coaches: Vec<CategoryPoint>,
    pub closers: Vec<RollupRow>,
    pub setters: Vec<RollupRow>,
    pub calls: Vec<CallRow>,
}
