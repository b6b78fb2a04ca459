/// Rejection raised at the query boundary before any record is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be at least 1 (got {value})")]
    BelowMinimum { field: &'static str, value: i64 },
    #[error("{field} must not exceed {max} (got {value})")]
    AboveMaximum {
        field: &'static str,
        value: i64,
        max: usize,
    },
    #[error("unknown value `{value}` for {field}")]
    UnknownValue { field: &'static str, value: String },
    #[error("malformed classification `{value}` for {field}")]
    MalformedClassification { field: &'static str, value: String },
    #[error("{field} must not contain blank values")]
    BlankValue { field: &'static str },
}

impl ValidationError {
    /// Name of the offending request field, as it appears in request bodies.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::BelowMinimum { field, .. }
            | ValidationError::AboveMaximum { field, .. }
            | ValidationError::UnknownValue { field, .. }
            | ValidationError::MalformedClassification { field, .. }
            | ValidationError::BlankValue { field } => field,
        }
    }
}
