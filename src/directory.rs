//! Employee reference data: who earns which commission rate, per role.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Closer,
    Setter,
    Coach,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Closer => "closer",
            Role::Setter => "setter",
            Role::Coach => "coach",
        }
    }

    pub fn name_of(self, record: &Record) -> &str {
        match self {
            Role::Closer => &record.closer,
            Role::Setter => &record.setter,
            Role::Coach => &record.coach,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    pub name: String,
    pub email: String,
    /// Fraction of collected cash paid out, e.g. `0.1` for ten percent.
    pub commission: f64,
}

/// Name-keyed employees for a single role. Lookups are exact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(HashMap<String, EmployeeInfo>);

impl Roster {
    pub fn new(employees: impl IntoIterator<Item = EmployeeInfo>) -> Self {
        Self(
            employees
                .into_iter()
                .map(|info| (info.name.clone(), info))
                .collect(),
        )
    }

    pub fn lookup(&self, name: &str) -> Option<&EmployeeInfo> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDirectory {
    #[serde(default)]
    pub closers: Roster,
    #[serde(default)]
    pub setters: Roster,
    #[serde(default)]
    pub coaches: Roster,
}

impl EmployeeDirectory {
    pub fn roster(&self, role: Role) -> &Roster {
        match role {
            Role::Closer => &self.closers,
            Role::Setter => &self.setters,
            Role::Coach => &self.coaches,
        }
    }

    pub fn lookup(&self, role: Role, name: &str) -> Option<&EmployeeInfo> {
        self.roster(role).lookup(name)
    }

    /// The house roster used when no directory file is configured.
    pub fn builtin() -> Self {
        Self {
            closers: Roster::new([
                employee("Alan", 0.1),
                employee("John", 0.1),
                employee("Mike", 0.1),
            ]),
            setters: Roster::new([
                employee("Jack", 0.05),
                employee("Mark", 0.05),
                employee("Tyler", 0.05),
            ]),
            coaches: Roster::new([employee("Cody", 0.3), employee("James", 0.3)]),
        }
    }
}

fn employee(name: &str, commission: f64) -> EmployeeInfo {
    EmployeeInfo {
        name: name.to_string(),
        email: format!("{}@dashboard.com", name.to_lowercase()),
        commission,
    }
}
