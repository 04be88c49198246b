//! The member roster: everyone with their title relative to the root.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use crate::config::KinshipConfig;
use crate::family::Family;
use crate::graph::Generations;
use crate::kinship::{Kinship, KinshipResolver};

/// One roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    /// Empty when there is no root or no path from it.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinship: Option<Kinship>,
    pub generation: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub deceased: bool,
}

/// Build the roster for `root` (or without titles if `None`).
///
/// The root comes first; everyone else is ordered by generation, then birth
/// date (undated last), then id. Ages are computed as of `today`.
#[must_use]
#[instrument(skip(family, config))]
pub fn roster(
    family: &Family,
    root: Option<&str>,
    config: &KinshipConfig,
    today: NaiveDate,
) -> Vec<RosterEntry> {
    let generations = Generations::compute(family);
    let mut resolver = root.map(|r| KinshipResolver::new(family, r, config.clone()));

    let mut entries: Vec<RosterEntry> = family
        .people()
        .map(|person| {
            let kinship = resolver.as_mut().and_then(|r| r.classify(&person.id));
            RosterEntry {
                id: person.id.clone(),
                name: person.display_name(),
                title: kinship.map(|k| k.title(config.locale)).unwrap_or_default(),
                kinship,
                generation: generations.get(&person.id).unwrap_or(1),
                age: person.age_on(today),
                deceased: person.is_deceased(),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        let is_root = |e: &RosterEntry| root == Some(e.id.as_str());
        is_root(b)
            .cmp(&is_root(a))
            .then_with(|| a.generation.cmp(&b.generation))
            .then_with(|| birth_key(family, &a.id).cmp(&birth_key(family, &b.id)))
            .then_with(|| a.id.cmp(&b.id))
    });
    entries
}

fn birth_key(family: &Family, id: &str) -> (bool, Option<NaiveDate>) {
    let birth = family.person(id).and_then(|p| p.birth_date);
    (birth.is_none(), birth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Person, Relationship};

    fn date(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 6, 1).expect("valid date")
    }

    fn family() -> Family {
        Family::new(
            [
                Person::new("dad", "Dad", Gender::Male).with_birth_date(date(1950)),
                Person::new("me", "Me", Gender::Female).with_birth_date(date(1980)),
                Person::new("bro", "Bro", Gender::Male).with_birth_date(date(1978)),
                Person::new("kid", "Kid", Gender::Male),
            ],
            vec![
                Relationship::parent("r1", "dad", "me"),
                Relationship::parent("r2", "dad", "bro"),
                Relationship::parent("r3", "me", "kid"),
            ],
        )
        .expect("family")
    }

    #[test]
    fn root_first_then_generation_and_birth() {
        let rows = roster(&family(), Some("me"), &KinshipConfig::default(), date(2020));
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["me", "dad", "bro", "kid"]);
        assert_eq!(rows[0].title, "本人");
        assert_eq!(rows[1].title, "爸爸");
        assert_eq!(rows[2].title, "哥哥");
        assert_eq!(rows[3].title, "兒子");
        assert_eq!(rows[1].age, Some(70));
        assert_eq!(rows[3].age, None);
    }

    #[test]
    fn without_root_titles_are_empty() {
        let rows = roster(&family(), None, &KinshipConfig::default(), date(2020));
        assert!(rows.iter().all(|r| r.title.is_empty() && r.kinship.is_none()));
        assert_eq!(rows[0].id, "dad");
    }
}
