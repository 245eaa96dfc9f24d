//! Converters between domain models and the `shared` wire DTOs.
//!
//! DTO -> domain conversions parse string-encoded dates and enum labels and
//! reject unknown values with a `Validation` error before any service runs.

pub mod activity_mapper;
pub mod course_mapper;
pub mod metrics_mapper;
pub mod people_mapper;
pub mod settings_mapper;

use chrono::NaiveDate;

use crate::backend::domain::error::{DomainError, DomainResult};

/// Parse an ISO `YYYY-MM-DD` day from a DTO field.
pub fn parse_day(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DomainError::Validation(format!("invalid date: {}", raw)))
}

/// Parse an optional ISO day, passing `None` through.
pub fn parse_optional_day(raw: Option<&str>) -> DomainResult<Option<NaiveDate>> {
    raw.map(parse_day).transpose()
}
