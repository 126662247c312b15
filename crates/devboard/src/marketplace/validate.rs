//! Construction-time validation helpers shared by the domain factories.
//!
//! Raw request payloads are turned into validated value objects through
//! `parse` constructors; the helpers here enforce the enumerated bounds
//! (length ranges, list sizes, currency codes) and produce the single
//! `ValidationError` surface the transport maps to 400.

/// Validation errors raised while constructing domain value objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max} characters")]
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
    },
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },
    #[error("{field} holds {found} entries (allowed {min}..={max})")]
    EntryCountOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
        found: usize,
    },
    #[error("{field} entry exceeds {max} characters")]
    EntryTooLong { field: &'static str, max: usize },
    #[error("salary minimum {min} exceeds maximum {max}")]
    SalaryRangeInverted { min: u32, max: u32 },
    #[error("currency must be a three letter code, got '{0}'")]
    BadCurrency(String),
    #[error("{field} is not an accepted value")]
    BadValue { field: &'static str },
}

/// Trim and bound a free-text field.
pub(crate) fn bounded_text(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() && min > 0 {
        return Err(ValidationError::MissingField { field });
    }
    let length = trimmed.chars().count();
    if length < min || length > max {
        return Err(ValidationError::LengthOutOfRange { field, min, max });
    }
    Ok(trimmed.to_string())
}

/// Trim a list of entries, dropping blanks, and bound both the entry
/// count and each entry's length.
pub(crate) fn bounded_list(
    field: &'static str,
    values: &[String],
    min: usize,
    max: usize,
    entry_max: usize,
) -> Result<Vec<String>, ValidationError> {
    let entries: Vec<String> = values
        .iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect();
    if entries.len() < min || entries.len() > max {
        return Err(ValidationError::EntryCountOutOfRange {
            field,
            min,
            max,
            found: entries.len(),
        });
    }
    if entries.iter().any(|entry| entry.chars().count() > entry_max) {
        return Err(ValidationError::EntryTooLong { field, max: entry_max });
    }
    Ok(entries)
}

/// Normalize a currency code to its three-letter uppercase form.
pub(crate) fn currency_code(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::BadCurrency(raw.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}
