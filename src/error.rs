use std::path::PathBuf;

use thiserror::Error;

use crate::directory::Role;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported file type for {} (expected .csv or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("no {role} named {name:?} in the employee directory")]
    UnknownEmployee { role: Role, name: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
