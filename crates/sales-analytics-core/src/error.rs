use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SalesAnalyticsError {
    #[error("Not found: no {table} entry for {key}")]
    NotFound { table: String, key: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SalesAnalyticsError {
    pub(crate) fn not_found(table: &str, key: impl Into<String>) -> Self {
        SalesAnalyticsError::NotFound {
            table: table.into(),
            key: key.into(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        SalesAnalyticsError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short label used when counting failures by class.
    pub fn kind(&self) -> &'static str {
        match self {
            SalesAnalyticsError::NotFound { .. } => "NotFound",
            SalesAnalyticsError::InvalidInput { .. } => "InvalidInput",
            SalesAnalyticsError::DateError(_) => "DateError",
            SalesAnalyticsError::SerializationError(_) => "SerializationError",
        }
    }
}

impl From<serde_json::Error> for SalesAnalyticsError {
    fn from(e: serde_json::Error) -> Self {
        SalesAnalyticsError::SerializationError(e.to_string())
    }
}
