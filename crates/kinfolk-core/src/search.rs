//! Member search by name.

use serde::Serialize;

use crate::family::Family;

/// Default number of search results.
pub const DEFAULT_LIMIT: usize = 5;

/// A matching person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
}

/// People whose name contains `query`, case-insensitively.
///
/// Both name orders (`family` + `given` and `given` + `family`, without a
/// separator) are matched, as is the name with a space between the parts.
/// Results are ordered by display name, then id, and capped at `limit`.
/// A blank query matches nobody.
#[must_use]
pub fn search(family: &Family, query: &str, limit: usize) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = family
        .people()
        .filter(|person| {
            let given = person.given_name.to_lowercase();
            let family_name = person.family_name.as_deref().unwrap_or_default().to_lowercase();
            [
                format!("{family_name}{given}"),
                format!("{given}{family_name}"),
                format!("{given} {family_name}"),
            ]
            .iter()
            .any(|candidate| candidate.contains(&needle))
        })
        .map(|person| SearchHit {
            id: person.id.clone(),
            name: person.display_name(),
        })
        .collect();

    hits.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    hits.truncate(limit);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Person};

    fn family() -> Family {
        Family::new(
            [
                Person::new("p1", "小明", Gender::Male).with_family_name("王"),
                Person::new("p2", "Ada", Gender::Female).with_family_name("Lovelace"),
                Person::new("p3", "明華", Gender::Female).with_family_name("陳"),
            ],
            Vec::new(),
        )
        .expect("family")
    }

    #[test]
    fn matches_either_name_order() {
        let family = family();
        assert_eq!(search(&family, "王小", 5)[0].id, "p1");
        assert_eq!(search(&family, "ada love", 5)[0].id, "p2");
        assert_eq!(search(&family, "ADALOVE", 5)[0].id, "p2");
        assert_eq!(search(&family, "lovelaceada", 5)[0].id, "p2");
    }

    #[test]
    fn limit_and_blank_query() {
        let family = family();
        assert_eq!(search(&family, "明", 5).len(), 2);
        assert_eq!(search(&family, "明", 1).len(), 1);
        assert!(search(&family, "   ", 5).is_empty());
    }
}
