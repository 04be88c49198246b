use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::date_serde;

/// Status texts that mark a person as deceased even without a death date.
const DECEASED_MARKERS: &[&str] = &["殁", "deceased"];

/// Recorded gender of a person.
///
/// Only `Male` and `Female` carry gendered kinship vocabulary; `Other` falls
/// back to the neutral or default form wherever a title needs a gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Stable lowercase identifier used in JSON payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A modeled family member.
///
/// Field aliases accept the camelCase export of the browser application, so a
/// saved store can be loaded without conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    #[serde(alias = "firstName")]
    pub given_name: String,
    #[serde(default, alias = "lastName", skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    pub gender: Gender,
    #[serde(
        default,
        alias = "dateOfBirth",
        with = "date_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<NaiveDate>,
    #[serde(
        default,
        alias = "dateOfDeath",
        with = "date_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub death_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, alias = "jobTitle", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Explicit deceased flag set by the editing layer.
    #[serde(default, alias = "isDeceased", skip_serializing_if = "std::ops::Not::not")]
    pub deceased: bool,
}

impl Person {
    /// Create a person with only the required fields set.
    pub fn new(id: impl Into<String>, given_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            given_name: given_name.into(),
            family_name: None,
            gender,
            birth_date: None,
            death_date: None,
            status: None,
            job_title: None,
            location: None,
            deceased: false,
        }
    }

    #[must_use]
    pub fn with_family_name(mut self, family_name: impl Into<String>) -> Self {
        self.family_name = Some(family_name.into());
        self
    }

    #[must_use]
    pub const fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    #[must_use]
    pub const fn with_death_date(mut self, date: NaiveDate) -> Self {
        self.death_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns `true` when the person is known to have died.
    ///
    /// Any of the explicit flag, a recorded death date, or a deceased marker
    /// in the status text is sufficient.
    #[must_use]
    pub fn is_deceased(&self) -> bool {
        self.deceased
            || self.death_date.is_some()
            || self.status.as_deref().is_some_and(is_deceased_marker)
    }

    /// Full display name, family name first with no separator.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.family_name.as_deref() {
            Some(family) if !family.is_empty() => format!("{family}{}", self.given_name),
            _ => self.given_name.clone(),
        }
    }

    /// Completed years of age on `on`, or at death when a death date exists.
    ///
    /// Returns `None` without a birth date. Negative spans clamp to zero.
    #[must_use]
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        let end = self.death_date.unwrap_or(on);

        let mut years = end.year() - birth.year();
        if (end.month(), end.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        Some(u32::try_from(years).unwrap_or(0))
    }
}

fn is_deceased_marker(status: &str) -> bool {
    let status = status.trim();
    DECEASED_MARKERS
        .iter()
        .any(|marker| status.eq_ignore_ascii_case(marker))
}
