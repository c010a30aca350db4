use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between opening the sales file and drawing
/// a chart.
///
/// Empty selections are not errors: metrics report zeros and charts render
/// a "no data" placeholder instead.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The file is missing, unreadable, or not valid text in the chosen encoding.
    #[error("failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("unknown text encoding '{0}'")]
    UnknownEncoding(String),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A component asked for a column the loaded file does not have.
    #[error("column '{0}' not found in dataset")]
    ColumnNotFound(String),

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl DashboardError {
    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DashboardError::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error prevents the page from showing any data at all.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            DashboardError::Load { .. }
                | DashboardError::UnknownEncoding(_)
                | DashboardError::UnsupportedFormat(_)
                | DashboardError::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_message_names_the_file() {
        let err = DashboardError::load("missing.csv", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "failed to load missing.csv: No such file or directory"
        );
        assert!(err.is_load_failure());
    }

    #[test]
    fn missing_column_is_not_a_load_failure() {
        let err = DashboardError::ColumnNotFound("Zone".into());
        assert_eq!(err.to_string(), "column 'Zone' not found in dataset");
        assert!(!err.is_load_failure());
    }
}
