use std::collections::BTreeSet;

use crate::cohort::parse_cash;
use crate::directory::{EmployeeDirectory, Role};
use crate::error::{DashboardError, Result};
use crate::filter::filter_records;
use crate::models::{CommissionSummary, FilterCriteria, Record};

/// What to do when a record names someone the directory does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownEmployee {
    /// Contribute nothing and log a warning per distinct name.
    #[default]
    Skip,
    /// Abort the whole calculation.
    Fail,
}

pub fn commission_for(
    rows: &[&Record],
    role: Role,
    directory: &EmployeeDirectory,
    policy: UnknownEmployee,
) -> Result<f64> {
    let mut total = 0.0;
    let mut unknown: BTreeSet<&str> = BTreeSet::new();

    for row in rows {
        let name = role.name_of(row).trim();
        if name.is_empty() {
            continue;
        }

        match directory.lookup(role, name) {
            Some(info) => total += parse_cash(&row.cash_collected) * info.commission,
            None if policy == UnknownEmployee::Fail => {
                return Err(DashboardError::UnknownEmployee {
                    role,
                    name: name.to_string(),
                });
            }
            None => {
                if unknown.insert(name) {
                    tracing::warn!(%role, name, "no commission rate on file, counting as zero");
                }
            }
        }
    }

    Ok(total)
}

pub fn commission_summary(
    records: &[Record],
    criteria: &FilterCriteria,
    directory: &EmployeeDirectory,
    policy: UnknownEmployee,
) -> Result<CommissionSummary> {
    let rows = filter_records(records, criteria);
    Ok(CommissionSummary {
        closer: commission_for(&rows, Role::Closer, directory, policy)?,
        setter: commission_for(&rows, Role::Setter, directory, policy)?,
        coach: commission_for(&rows, Role::Coach, directory, policy)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{EmployeeInfo, Roster};

    fn call(closer: &str, coach: &str, cash: &str) -> Record {
        Record {
            timestamp: "1/1/2024".to_string(),
            closer: closer.to_string(),
            coach: coach.to_string(),
            outcome: "Closed".to_string(),
            cash_collected: cash.to_string(),
            ..Record::default()
        }
    }

    #[test]
    fn closer_commission_uses_directory_rate() {
        let records = vec![call("Alan", "", "$100"), call("Alan", "", "$0")];
        let view: Vec<&Record> = records.iter().collect();
        let total = commission_for(
            &view,
            Role::Closer,
            &EmployeeDirectory::builtin(),
            UnknownEmployee::Skip,
        )
        .unwrap();
        assert!((total - 10.0).abs() < 1e-9);
    }

    #[test]
    fn setter_commission_uses_setter_roster() {
        let mut first = call("Alan", "", "$200");
        first.setter = "Jack".to_string();
        let mut second = call("John", "", "$1,000");
        second.setter = "Tyler".to_string();
        let records = vec![first, second, call("Mike", "", "$500")];
        let view: Vec<&Record> = records.iter().collect();
        let total = commission_for(
            &view,
            Role::Setter,
            &EmployeeDirectory::builtin(),
            UnknownEmployee::Fail,
        )
        .unwrap();
        assert!((total - 60.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_names_count_as_zero_by_default() {
        let records = vec![call("Alan", "", "$100"), call("Stranger", "", "$1,000")];
        let view: Vec<&Record> = records.iter().collect();
        let total = commission_for(
            &view,
            Role::Closer,
            &EmployeeDirectory::builtin(),
            UnknownEmployee::Skip,
        )
        .unwrap();
        assert!((total - 10.0).abs() < 1e-9);
    }

    #[test]
    fn strict_policy_fails_on_unknown_names() {
        let records = vec![call("Stranger", "", "$1,000")];
        let view: Vec<&Record> = records.iter().collect();
        let err = commission_for(
            &view,
            Role::Closer,
            &EmployeeDirectory::builtin(),
            UnknownEmployee::Fail,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DashboardError::UnknownEmployee { role: Role::Closer, ref name } if name == "Stranger"
        ));
    }

    #[test]
    fn summary_respects_filter_and_injected_directory() {
        let directory = EmployeeDirectory {
            closers: Roster::new([EmployeeInfo {
                name: "Zoe".to_string(),
                email: "zoe@example.com".to_string(),
                commission: 0.5,
            }]),
            coaches: Roster::new([EmployeeInfo {
                name: "Cody".to_string(),
                email: "cody@example.com".to_string(),
                commission: 0.25,
            }]),
            ..EmployeeDirectory::default()
        };
        let records = vec![call("Zoe", "Cody", "$200"), call("Zoe", "", "$50")];
        let criteria = FilterCriteria {
            coach: Some("cody".to_string()),
            ..FilterCriteria::default()
        };
        let summary =
            commission_summary(&records, &criteria, &directory, UnknownEmployee::Skip).unwrap();
        assert!((summary.closer - 100.0).abs() < 1e-9);
        assert!((summary.coach - 50.0).abs() < 1e-9);
        assert_eq!(summary.setter, 0.0);
    }
}
