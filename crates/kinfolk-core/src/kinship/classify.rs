//! Path classification into structured kinship categories.
//!
//! Patterns are tried in a fixed order; the first match wins. A reachable
//! path that matches nothing becomes [`Kinship::Distant`] once it is at least
//! `distant_after` edges long, and [`Kinship::Relative`] otherwise.

use serde::Serialize;

use super::path::KinPath;
use super::rank::{BirthRank, birth_rank, is_older, sibling_peers};
use crate::family::Family;
use crate::graph::Step;
use crate::model::{Gender, Person};

use Step::{Daughter, Father, Husband, Mother, Son, Spouse, Wife};

/// Male or not-male, as the title vocabulary distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    #[must_use]
    pub const fn of(gender: Gender) -> Self {
        match gender {
            Gender::Male => Self::Male,
            Gender::Female | Gender::Other => Self::Female,
        }
    }

    /// Sex implied by a parent or child step.
    const fn of_step(step: Step) -> Self {
        match step {
            Father | Son | Husband => Self::Male,
            Mother | Daughter | Wife | Spouse => Self::Female,
        }
    }
}

/// Father's or mother's side of the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Paternal,
    Maternal,
}

impl Side {
    const fn of_step(step: Step) -> Self {
        match step {
            Father => Self::Paternal,
            _ => Self::Maternal,
        }
    }
}

/// Relative age of a person to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Older,
    Younger,
}

impl Seniority {
    const fn from_older(older: bool) -> Self {
        if older { Self::Older } else { Self::Younger }
    }
}

/// Cousin lineage: the same surname line (father's brother's children) or
/// any other line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CousinLine {
    Agnatic,
    Other,
}

/// How the root is married to the person a spouse-side title goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Partner {
    Husband,
    Wife,
    Spouse,
}

impl Partner {
    const fn of_step(step: Step) -> Option<Self> {
        match step {
            Husband => Some(Self::Husband),
            Wife => Some(Self::Wife),
            Spouse => Some(Self::Spouse),
            _ => None,
        }
    }
}

/// Structured kinship of a target person as seen from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Kinship {
    Oneself,
    Parent {
        sex: Sex,
    },
    Child {
        sex: Sex,
    },
    Partner {
        partner: Partner,
    },
    /// Brother's wife or sister's husband; seniority is the sibling's.
    SiblingSpouse {
        sibling: Sex,
        seniority: Seniority,
    },
    Grandparent {
        side: Side,
        sex: Sex,
    },
    /// Through the father only; `via` is the father's parent on the path.
    GreatGrandparent {
        via: Sex,
        sex: Sex,
    },
    /// Four or more generations up the direct male line.
    PaternalAncestor,
    Grandchild {
        via: Sex,
        sex: Sex,
    },
    /// Through son and grandson only.
    GreatGrandchild {
        sex: Sex,
    },
    Sibling {
        sex: Sex,
        seniority: Seniority,
        rank: Option<BirthRank>,
    },
    /// Child of a sibling; `via` is the sibling.
    SiblingChild {
        via: Sex,
        sex: Sex,
    },
    /// Parent's sibling. `seniority` compares a paternal uncle with the
    /// father the path runs through and is `None` when that comparison is
    /// impossible or not made.
    ParentSibling {
        side: Side,
        sex: Sex,
        seniority: Option<Seniority>,
    },
    /// Spouse of a parent's sibling; `sibling` is the parent's sibling.
    ParentSiblingSpouse {
        side: Side,
        sibling: Sex,
    },
    Cousin {
        line: CousinLine,
        sex: Sex,
        seniority: Seniority,
    },
    /// Spouse of a cousin; seniority is the cousin's.
    CousinSpouse {
        line: CousinLine,
        sex: Sex,
        seniority: Seniority,
    },
    /// Child of a cousin; `via` is the cousin.
    CousinChild {
        line: CousinLine,
        via: Sex,
        sex: Sex,
    },
    SpouseParent {
        partner: Partner,
        sex: Sex,
    },
    SpouseBrother {
        partner: Partner,
    },
    ChildSpouse {
        child: Sex,
    },
    /// Reachable but far away.
    Distant,
    /// Reachable, close, and unclassified.
    Relative,
}

/// Classify `path` from `root` to `target`.
#[must_use]
pub fn classify_path(
    family: &Family,
    root: &Person,
    target: &Person,
    path: &KinPath,
    distant_after: usize,
) -> Kinship {
    let steps = path.steps.as_slice();
    let target_sex = Sex::of(target.gender);
    let target_older = Seniority::from_older(is_older(target, root));
    let older_than_root = |step: usize| {
        path.person_at(step)
            .and_then(|id| family.person(id))
            .map(|p| Seniority::from_older(is_older(p, root)))
    };

    match steps {
        [] => Kinship::Oneself,
        [s @ (Father | Mother)] => Kinship::Parent { sex: Sex::of_step(*s) },
        [s @ (Son | Daughter)] => Kinship::Child { sex: Sex::of_step(*s) },
        [s @ (Husband | Wife | Spouse)] => Kinship::Partner {
            partner: Partner::of_step(*s).unwrap_or(Partner::Spouse),
        },

        [Father | Mother, Son, Wife | Spouse] => Kinship::SiblingSpouse {
            sibling: Sex::Male,
            seniority: older_than_root(2).unwrap_or(target_older),
        },
        [Father | Mother, Daughter, Husband | Spouse] => Kinship::SiblingSpouse {
            sibling: Sex::Female,
            seniority: older_than_root(2).unwrap_or(target_older),
        },

        [p @ (Father | Mother), g @ (Father | Mother)] => Kinship::Grandparent {
            side: Side::of_step(*p),
            sex: Sex::of_step(*g),
        },
        [Father, g @ (Father | Mother), s @ (Father | Mother)] => Kinship::GreatGrandparent {
            via: Sex::of_step(*g),
            sex: Sex::of_step(*s),
        },
        [Father, Father, Father, Father, ..] => Kinship::PaternalAncestor,

        [c @ (Son | Daughter), g @ (Son | Daughter)] => Kinship::Grandchild {
            via: Sex::of_step(*c),
            sex: Sex::of_step(*g),
        },
        [Son, Son, g @ (Son | Daughter)] => Kinship::GreatGrandchild {
            sex: Sex::of_step(*g),
        },

        [Father | Mother, s @ (Son | Daughter)] => {
            let sex = Sex::of_step(*s);
            let gender = match sex {
                Sex::Male => Gender::Male,
                Sex::Female => Gender::Female,
            };
            let peers = sibling_peers(family, &root.id, gender);
            Kinship::Sibling {
                sex,
                seniority: target_older,
                rank: birth_rank(&peers, &target.id),
            }
        }

        [Father | Mother, s @ (Son | Daughter), Son | Daughter] => Kinship::SiblingChild {
            via: Sex::of_step(*s),
            sex: target_sex,
        },

        [p @ (Father | Mother), Father | Mother, s @ (Son | Daughter)] => {
            let side = Side::of_step(*p);
            let sex = Sex::of_step(*s);
            let seniority = match (side, sex) {
                (Side::Paternal, Sex::Male) => path
                    .person_at(1)
                    .and_then(|id| family.person(id))
                    .map(|father| Seniority::from_older(is_older(target, father))),
                _ => None,
            };
            Kinship::ParentSibling {
                side,
                sex,
                seniority,
            }
        }

        [p @ (Father | Mother), Father | Mother, Son, Wife | Spouse] => {
            Kinship::ParentSiblingSpouse {
                side: Side::of_step(*p),
                sibling: Sex::Male,
            }
        }
        [p @ (Father | Mother), Father | Mother, Daughter, Husband | Spouse] => {
            Kinship::ParentSiblingSpouse {
                side: Side::of_step(*p),
                sibling: Sex::Female,
            }
        }

        [p @ (Father | Mother), Father | Mother, u @ (Son | Daughter), Son | Daughter] => {
            Kinship::Cousin {
                line: cousin_line(*p, *u),
                sex: target_sex,
                seniority: target_older,
            }
        }
        [
            p @ (Father | Mother),
            Father | Mother,
            u @ (Son | Daughter),
            Son | Daughter,
            Husband | Wife | Spouse,
        ] => Kinship::CousinSpouse {
            line: cousin_line(*p, *u),
            sex: target_sex,
            seniority: older_than_root(4).unwrap_or(Seniority::Younger),
        },
        [
            p @ (Father | Mother),
            Father | Mother,
            u @ (Son | Daughter),
            c @ (Son | Daughter),
            Son | Daughter,
        ] => Kinship::CousinChild {
            line: cousin_line(*p, *u),
            via: Sex::of_step(*c),
            sex: target_sex,
        },

        [first @ (Husband | Wife | Spouse), rest @ ..] => {
            let partner = Partner::of_step(*first).unwrap_or(Partner::Spouse);
            match rest {
                [s @ (Father | Mother)] => Kinship::SpouseParent {
                    partner,
                    sex: Sex::of_step(*s),
                },
                [Father | Mother, Son] => Kinship::SpouseBrother { partner },
                _ => fallback(steps.len(), distant_after),
            }
        }

        [Son, Wife | Spouse] => Kinship::ChildSpouse { child: Sex::Male },
        [Daughter, Husband | Spouse] => Kinship::ChildSpouse { child: Sex::Female },

        _ => fallback(steps.len(), distant_after),
    }
}

const fn fallback(len: usize, distant_after: usize) -> Kinship {
    if len >= distant_after {
        Kinship::Distant
    } else {
        Kinship::Relative
    }
}

/// Agnatic when the path runs father, grandparent, son: the cousin is a
/// child of the father's brother.
const fn cousin_line(parent: Step, uncle: Step) -> CousinLine {
    match (parent, uncle) {
        (Father, Son) => CousinLine::Agnatic,
        _ => CousinLine::Other,
    }
}
