//! Persisted entities: people and the parent/spouse facts that link them.
//!
//! Everything else in the crate (adjacency graphs, generations, kinship
//! titles, layout graphs) is derived from these two types on demand and is
//! never stored.

mod person;
mod relationship;

pub use person::{Gender, Person};
pub use relationship::{Relationship, RelationshipKind};

/// Optional calendar dates as `YYYY-MM-DD` strings.
///
/// Empty strings deserialize to `None`; timestamps keep only their date part
/// (`1980-05-01T00:00:00Z` reads as `1980-05-01`).
pub(crate) mod date_serde {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d";

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => s.serialize_str(&date.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        NaiveDate::parse_from_str(date_part, FORMAT)
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid date '{trimmed}': {e}")))
    }
}
