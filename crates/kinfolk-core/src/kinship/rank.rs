//! Relative age and birth-order rank among siblings.
//!
//! A missing birth date counts as the earliest possible one: an undated
//! person is older than anyone, and sorts first among siblings.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::family::Family;
use crate::model::{Gender, Person};

/// Position of a sibling within their same-sex sibling group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rank", content = "n", rename_all = "snake_case")]
pub enum BirthRank {
    Eldest,
    /// 1-based position strictly between eldest and youngest.
    Ordinal(usize),
    Youngest,
}

/// `true` if `a` was born before `b`.
///
/// `a` without a birth date is always older; otherwise `b` without one is
/// never younger.
#[must_use]
pub fn is_older(a: &Person, b: &Person) -> bool {
    match (a.birth_date, b.birth_date) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(x), Some(y)) => x < y,
    }
}

/// Children of any of `id`'s recorded parents (`id` included) with exactly
/// `gender`.
#[must_use]
pub fn sibling_peers<'a>(family: &'a Family, id: &str, gender: Gender) -> Vec<&'a Person> {
    let ids: BTreeSet<&str> = family
        .parents_of(id)
        .flat_map(|parent| family.children_of(parent))
        .collect();
    ids.into_iter()
        .filter_map(|sibling| family.person(sibling))
        .filter(|p| p.gender == gender)
        .collect()
}

/// Birth-order rank of `target` among `peers`.
///
/// Groups of one or two get no rank. Peers are ordered by birth date, undated
/// first, then by id.
#[must_use]
pub fn birth_rank(peers: &[&Person], target: &str) -> Option<BirthRank> {
    if peers.len() <= 2 {
        return None;
    }

    let mut sorted: Vec<&Person> = peers.to_vec();
    sorted.sort_by(|a, b| a.birth_date.cmp(&b.birth_date).then_with(|| a.id.cmp(&b.id)));

    let index = sorted.iter().position(|p| p.id == target)?;
    Some(if index == 0 {
        BirthRank::Eldest
    } else if index == sorted.len() - 1 {
        BirthRank::Youngest
    } else {
        BirthRank::Ordinal(index + 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Relationship;
    use chrono::NaiveDate;

    fn born(id: &str, gender: Gender, year: Option<i32>) -> Person {
        let mut p = Person::new(id, id, gender);
        p.birth_date = year.and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
        p
    }

    #[test]
    fn undated_counts_as_older() {
        let undated = born("a", Gender::Male, None);
        let dated = born("b", Gender::Male, Some(1990));
        assert!(is_older(&undated, &dated));
        assert!(!is_older(&dated, &undated));
        assert!(is_older(&undated, &undated.clone()));
        assert!(is_older(&born("c", Gender::Male, Some(1980)), &dated));
    }

    #[test]
    fn ranks_three_or_more() {
        let a = born("a", Gender::Male, Some(2000));
        let b = born("b", Gender::Male, Some(2005));
        let c = born("c", Gender::Male, Some(2010));
        let d = born("d", Gender::Male, Some(2012));
        let peers = [&d, &b, &a, &c];
        assert_eq!(birth_rank(&peers, "a"), Some(BirthRank::Eldest));
        assert_eq!(birth_rank(&peers, "b"), Some(BirthRank::Ordinal(2)));
        assert_eq!(birth_rank(&peers, "c"), Some(BirthRank::Ordinal(3)));
        assert_eq!(birth_rank(&peers, "d"), Some(BirthRank::Youngest));
        assert_eq!(birth_rank(&peers, "zz"), None);
    }

    #[test]
    fn pairs_are_unranked() {
        let a = born("a", Gender::Female, Some(2000));
        let b = born("b", Gender::Female, Some(2005));
        assert_eq!(birth_rank(&[&a, &b], "a"), None);
    }

    #[test]
    fn undated_sorts_first() {
        let a = born("a", Gender::Male, Some(2000));
        let b = born("b", Gender::Male, None);
        let c = born("c", Gender::Male, Some(2010));
        assert_eq!(birth_rank(&[&a, &b, &c], "b"), Some(BirthRank::Eldest));
    }

    #[test]
    fn peers_span_both_parents_and_filter_gender() {
        let family = Family::new(
            [
                born("dad", Gender::Male, None),
                born("mom", Gender::Female, None),
                born("me", Gender::Male, Some(2000)),
                born("half", Gender::Male, Some(1995)),
                born("sis", Gender::Female, Some(1998)),
            ],
            vec![
                Relationship::parent("r1", "dad", "me"),
                Relationship::parent("r2", "mom", "me"),
                Relationship::parent("r3", "mom", "half"),
                Relationship::parent("r4", "dad", "sis"),
            ],
        )
        .expect("family");
        let ids: Vec<&str> = sibling_peers(&family, "me", Gender::Male)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["half", "me"]);
    }
}
