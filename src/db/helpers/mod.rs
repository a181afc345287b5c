use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::ClothingAttributeRecord;

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_rating(value: Option<i64>) -> Result<Option<u8>> {
    value
        .map(|raw| u8::try_from(raw).map_err(|_| anyhow!("rating out of range: {raw}")))
        .transpose()
}

pub fn attributes_from_columns(
    top: Option<String>,
    bottom: Option<String>,
    outerwear: Option<String>,
    shoes: Option<String>,
) -> ClothingAttributeRecord {
    ClothingAttributeRecord {
        top,
        bottom,
        outerwear,
        shoes,
    }
}
