//! Entry validation.
//!
//! Checks run in a fixed order and stop at the first failure, so the caller
//! always learns about the earliest missing or invalid field.

use rust_decimal::Decimal;

use crate::{EngineError, Entry, EntryKind, ResultEngine};

pub(crate) const INVALID_DESCRIPTION: &str = "invalid description";
pub(crate) const INVALID_MONTH: &str = "invalid month";
pub(crate) const INVALID_YEAR: &str = "invalid year";
pub(crate) const INVALID_USER: &str = "invalid user";
pub(crate) const INVALID_VALUE: &str = "invalid value";
pub(crate) const INVALID_TYPE: &str = "invalid type";

/// The mandatory fields of an entry, borrowed once they passed validation.
pub(crate) struct RequiredFields<'a> {
    pub description: &'a str,
    pub month: i32,
    pub year: i32,
    pub user_id: i64,
    pub value: Decimal,
    pub kind: EntryKind,
}

/// Validate an entry, failing with [`EngineError::BusinessRule`] on the
/// first violated rule:
///
/// 1. description present and not blank
/// 2. month in `1..=12`
/// 3. year with exactly four digits
/// 4. owning user set
/// 5. value strictly positive
/// 6. kind set
pub fn validate(entry: &Entry) -> ResultEngine<()> {
    required_fields(entry).map(|_| ())
}

pub(crate) fn required_fields(entry: &Entry) -> ResultEngine<RequiredFields<'_>> {
    let description = entry
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| EngineError::business(INVALID_DESCRIPTION))?;

    let month = entry
        .month
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| EngineError::business(INVALID_MONTH))?;

    let year = entry
        .year
        .filter(|y| (1000..=9999).contains(y))
        .ok_or_else(|| EngineError::business(INVALID_YEAR))?;

    let user_id = entry
        .user_id
        .ok_or_else(|| EngineError::business(INVALID_USER))?;

    let value = entry
        .value
        .filter(|v| *v > Decimal::ZERO)
        .ok_or_else(|| EngineError::business(INVALID_VALUE))?;

    let kind = entry
        .kind
        .ok_or_else(|| EngineError::business(INVALID_TYPE))?;

    Ok(RequiredFields {
        description,
        month,
        year,
        user_id,
        value,
        kind,
    })
}
