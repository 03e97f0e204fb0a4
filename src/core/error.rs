use thiserror::Error;

/// Errors that can occur while validating or exporting a batch.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NftsError {
    /// One or more validation rules failed.
    #[error("validation failed: {}", join_violations(.0))]
    Validation(Vec<ValidationError>),

    /// A validated field could not be rendered into its fixed-width slot.
    ///
    /// This signals a broken validate-then-encode contract, not bad user input.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Classification table could not be loaded.
    #[error("classification table error: {0}")]
    Classification(String),

    /// Writing the batch file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_violations(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation failure.
///
/// Batch-level failures (empty batch, malformed taxpayer id) carry no record
/// index; everything else points at the 1-based position of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// 1-based record position within the batch, if the failure is per record.
    pub record: Option<usize>,
    /// Name of the invalid field (e.g. "series", "taxpayer_id").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(record) = self.record {
            write!(f, "record {}: {}: {}", record, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a batch-level validation error.
    pub fn batch(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record: None,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for the record at 1-based position `record`.
    pub fn record(record: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record: Some(record),
            field: field.into(),
            message: message.into(),
        }
    }
}
